//! Random playouts (rollouts) used to estimate positions in the tree search.
//!
//! A playout plays uniformly random legal moves, passing for a side that has
//! none, until neither side can move. The random source is always passed in so
//! a fixed seed reproduces the same game.

use fastrand::Rng;
use log::error;

use crate::board::{Board, Player};
use crate::constants::MAX_ROLLOUT_PLIES;
use crate::position::Position;

/// Pick a uniformly random legal move for `player`.
pub fn random_move(board: &Board, player: Player, rng: &mut Rng) -> Option<Position> {
    let moves = board.valid_moves(player);
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.usize(..moves.len())])
    }
}

/// Play random moves from `board` with `to_move` on turn until the game ends.
///
/// The board is left in its final state. Returns the side with more discs,
/// or `Player::None` for a draw.
pub fn playout(board: &mut Board, mut to_move: Player, rng: &mut Rng) -> Player {
    let mut passes = 0;
    let mut plies = 0;

    while passes < 2 && plies < MAX_ROLLOUT_PLIES {
        match random_move(board, to_move, rng) {
            Some(p) => {
                if let Err(e) = board.make_move(p, to_move) {
                    error!("playout stopped: {e}");
                    break;
                }
                passes = 0;
            }
            None => passes += 1,
        }
        to_move = to_move.opponent();
        plies += 1;
    }

    board.leader()
}

/// Reward of a finished game for `player`: 1 for a win, 0.5 for a draw, 0 for a loss.
#[inline]
pub fn reward(winner: Player, player: Player) -> f64 {
    if winner == player {
        1.0
    } else if winner == Player::None {
        0.5
    } else {
        0.0
    }
}
