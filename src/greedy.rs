//! One-ply players: the move whose resulting position evaluates best, or the
//! move on the best cell of the positional table.

use crate::board::{Board, Player};
use crate::eval::Evaluator;
use crate::position::Position;

/// Best move for `player` by one-ply lookahead, with its evaluation.
///
/// Ties go to the earliest move in [`Board::valid_moves`] order. Returns
/// `None` if `player` has no legal move.
pub fn best_move(board: &Board, player: Player, eval: &Evaluator) -> Option<(Position, i32)> {
    let mut best: Option<(Position, i32)> = None;
    for mv in board.valid_moves(player) {
        let mut child = board.clone();
        if child.make_move(mv, player).is_err() {
            continue;
        }
        let score = eval.evaluate(&child, player);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best
}

/// Legal move on the highest-weighted cell of the positional table.
///
/// Ignores what the move flips. Ties go to the earliest move in
/// [`Board::valid_moves`] order.
pub fn positional_move(board: &Board, player: Player, eval: &Evaluator) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for mv in board.valid_moves(player) {
        let weight = eval.weight_at(mv);
        if best.is_none_or(|(_, w)| weight > w) {
            best = Some((mv, weight));
        }
    }
    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_corner() {
        // a1 flips one disc into the corner; a4 flips three in the middle.
        let board: Board = "
            . O X . . .
            . . . . . .
            . . . . . .
            . O O O X .
            . . . . . .
            . . . . . .
        "
        .parse()
        .unwrap();
        assert_eq!(
            board.valid_moves(Player::Black),
            vec![Position::new(0, 0), Position::new(0, 3)]
        );
        let eval = Evaluator::for_board(&board);
        let (mv, _) = best_move(&board, Player::Black, &eval).unwrap();
        assert_eq!(mv, Position::new(0, 0));
    }

    #[test]
    fn test_no_moves() {
        let board: Board = "
            X X
            X X
        "
        .parse()
        .unwrap();
        let eval = Evaluator::for_board(&board);
        assert_eq!(best_move(&board, Player::White, &eval), None);
    }

    #[test]
    fn test_deterministic_and_first_on_ties() {
        // The four opening moves are symmetric, so the first one wins the tie.
        let board = Board::default();
        let eval = Evaluator::for_board(&board);
        let first = best_move(&board, Player::Black, &eval);
        assert_eq!(first.map(|(m, _)| m), Some(Position::new(3, 2)));
        for _ in 0..5 {
            assert_eq!(best_move(&board, Player::Black, &eval), first);
        }
    }

    #[test]
    fn test_positional_prefers_corner_over_c_square() {
        // a6 (edge), a7 (C-square) and a8 (corner) are all legal for Black.
        let board: Board = "
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . O X . . . . .
            . O X . . . . .
        "
        .parse()
        .unwrap();
        let eval = Evaluator::for_board(&board);
        assert_eq!(
            board.valid_moves(Player::Black),
            vec![Position::new(0, 5), Position::new(0, 6), Position::new(0, 7)]
        );
        assert_eq!(positional_move(&board, Player::Black, &eval), Some(Position::new(0, 7)));
    }

    #[test]
    fn test_positional_ties_go_to_first_move() {
        // all four opening moves sit on interior cells of equal weight
        let board = Board::default();
        let eval = Evaluator::for_board(&board);
        assert_eq!(positional_move(&board, Player::Black, &eval), Some(Position::new(3, 2)));
        assert_eq!(positional_move(&board, Player::White, &eval), Some(Position::new(4, 2)));
    }
}
