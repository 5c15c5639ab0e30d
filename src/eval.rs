//! Static position evaluation shared by the greedy and alpha-beta players.
//!
//! The score is a weighted sum of three terms, always from the point of view
//! of the player being evaluated for:
//!
//! - disc differential (own - opponent discs)
//! - mobility differential (own - opponent legal moves)
//! - positional sum: each own disc adds its cell weight, each opponent disc
//!   subtracts it. Corners are worth the most, cells touching a corner are
//!   penalised, and edges are mildly rewarded.
//!
//! A finished game (neither side can move) is scored as `±WIN_SCORE` plus the
//! disc differential so that any win outranks any heuristic position.

use crate::board::{Board, Player};
use crate::constants::{
    CORNER_WEIGHT, C_SQUARE_WEIGHT, DISC_WEIGHT, EDGE_NEAR_WEIGHT, EDGE_WEIGHT,
    INNER_RING_WEIGHT, INTERIOR_WEIGHT, MOBILITY_WEIGHT, WIN_SCORE, X_SQUARE_WEIGHT,
};
use crate::position::Position;

/// Multipliers for the evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub disc: i32,
    pub mobility: i32,
    pub positional: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            disc: DISC_WEIGHT,
            mobility: MOBILITY_WEIGHT,
            positional: 1,
        }
    }
}

/// Positional weight of cell `(x, y)` on a `width` x `height` board.
///
/// On 8x8 this reproduces the classic table:
///
/// ```text
/// 100 -20  10   5   5  10 -20 100
/// -20 -50  -2  -2  -2  -2 -50 -20
///  10  -2  -1  -1  -1  -1  -2  10
///   5  -2  -1  -1  -1  -1  -2   5
/// ...
/// ```
///
/// Cells outside the board weigh 0.
pub fn cell_weight(width: usize, height: usize, x: usize, y: usize) -> i32 {
    if x >= width || y >= height {
        return 0;
    }
    // distance to the nearest edge along each axis
    let dx = x.min(width - 1 - x);
    let dy = y.min(height - 1 - y);

    match (dx, dy) {
        (0, 0) => CORNER_WEIGHT,
        (1, 1) => X_SQUARE_WEIGHT,
        (0, 1) | (1, 0) => C_SQUARE_WEIGHT,
        (0, 2) | (2, 0) => EDGE_NEAR_WEIGHT,
        (0, _) | (_, 0) => EDGE_WEIGHT,
        (1, _) | (_, 1) => INNER_RING_WEIGHT,
        _ => INTERIOR_WEIGHT,
    }
}

/// Static evaluator with a positional table sized for one board shape.
#[derive(Debug, Clone)]
pub struct Evaluator {
    width: usize,
    height: usize,
    table: Vec<i32>,
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_weights(width, height, EvalWeights::default())
    }

    pub fn with_weights(width: usize, height: usize, weights: EvalWeights) -> Self {
        let table = (0..height)
            .flat_map(|y| (0..width).map(move |x| cell_weight(width, height, x, y)))
            .collect();
        Self {
            width,
            height,
            table,
            weights,
        }
    }

    /// Evaluator matching the shape of `board`.
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.width(), board.height())
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }

    /// Positional weight of `p` from the table; 0 off the board.
    pub fn weight_at(&self, p: Position) -> i32 {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return 0;
        }
        self.table[p.y as usize * self.width + p.x as usize]
    }

    /// Score `board` for `player`. Higher is better for `player`.
    pub fn evaluate(&self, board: &Board, player: Player) -> i32 {
        debug_assert_eq!((board.width(), board.height()), (self.width, self.height));
        let opp = player.opponent();

        let own_discs = board.count_pieces(player) as i32;
        let opp_discs = board.count_pieces(opp) as i32;
        let own_moves = board.mobility(player) as i32;
        let opp_moves = board.mobility(opp) as i32;

        if own_moves == 0 && opp_moves == 0 {
            let diff = own_discs - opp_discs;
            return match diff.signum() {
                1 => WIN_SCORE + diff,
                -1 => -WIN_SCORE + diff,
                _ => 0,
            };
        }

        let mut positional = 0;
        for (p, &w) in board.positions().zip(self.table.iter()) {
            let cell = board.get_cell(p);
            if cell == player {
                positional += w;
            } else if cell == opp {
                positional -= w;
            }
        }

        self.weights.disc * (own_discs - opp_discs)
            + self.weights.mobility * (own_moves - opp_moves)
            + self.weights.positional * positional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_table() {
        let expected: [[i32; 8]; 4] = [
            [100, -20, 10, 5, 5, 10, -20, 100],
            [-20, -50, -2, -2, -2, -2, -50, -20],
            [10, -2, -1, -1, -1, -1, -2, 10],
            [5, -2, -1, -1, -1, -1, -2, 5],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &w) in row.iter().enumerate() {
                assert_eq!(cell_weight(8, 8, x, y), w, "cell ({x},{y})");
                // vertical symmetry
                assert_eq!(cell_weight(8, 8, x, 7 - y), w, "cell ({x},{})", 7 - y);
            }
        }
    }

    #[test]
    fn test_small_board_corners() {
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(cell_weight(2, 2, x, y), CORNER_WEIGHT);
        }
    }

    #[test]
    fn test_opening_is_symmetric() {
        let board = Board::default();
        let eval = Evaluator::for_board(&board);
        assert_eq!(eval.evaluate(&board, Player::Black), 0);
        assert_eq!(eval.evaluate(&board, Player::White), 0);
    }

    #[test]
    fn test_zero_sum() {
        let mut board = Board::default();
        board.make_move(Position::new(3, 2), Player::Black).unwrap();
        let eval = Evaluator::for_board(&board);
        assert_eq!(
            eval.evaluate(&board, Player::Black),
            -eval.evaluate(&board, Player::White)
        );
    }

    #[test]
    fn test_finished_game_dominates() {
        let board: Board = "
            X X X X
            X X X X
            X X O O
            O O O O
        "
        .parse()
        .unwrap();
        let eval = Evaluator::for_board(&board);
        assert_eq!(eval.evaluate(&board, Player::Black), WIN_SCORE + 4);
        assert_eq!(eval.evaluate(&board, Player::White), -WIN_SCORE - 4);
    }

    #[test]
    fn test_corner_preferred_over_x_square() {
        let eval = Evaluator::new(8, 8);
        assert!(eval.weight_at(Position::new(0, 0)) > eval.weight_at(Position::new(3, 0)));
        assert!(eval.weight_at(Position::new(3, 0)) > eval.weight_at(Position::new(1, 1)));
    }

    #[test]
    fn test_off_board_weighs_nothing() {
        let eval = Evaluator::new(8, 8);
        assert_eq!(eval.weight_at(Position::new(-1, 0)), 0);
        assert_eq!(eval.weight_at(Position::new(0, 8)), 0);
        assert_eq!(eval.weight_at(Position::new(8, 3)), 0);
        assert_eq!(cell_weight(8, 8, 8, 0), 0);
        assert_eq!(cell_weight(4, 4, 0, 9), 0);
    }
}
