//! Reversi-Engine: computer players for Reversi (Othello) on any rectangular board.
//!
//! The crate provides the capture rules, a game ledger with undo/redo, and
//! several strategies behind one [`player::AiPlayer`] type: random and
//! positional-table movers, a one-ply greedy player, alpha-beta minimax, and
//! Monte Carlo Tree Search with random playouts.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, evaluation weights, and search parameters
//! - [`position`] - Coordinates and their `"d3"` text form
//! - [`board`] - Board state, legality, and disc flipping
//! - [`game`] - Side to move, game status, undo/redo
//! - [`eval`] - Static evaluation (discs, mobility, positional weights)
//! - [`difficulty`] - Difficulty levels and their search parameters
//! - [`greedy`] - One-ply greedy and positional-table move choice
//! - [`alphabeta`] - Minimax with alpha-beta pruning
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`playout`] - Random game simulation for the tree search
//! - [`player`] - Strategy selection behind a single player type
//! - [`arena`] - Computer-vs-computer games and matches
//! - [`protocol`] - Text protocol for driving the engine
//!
//! ## Example
//!
//! ```
//! use reversi_engine::board::Player;
//! use reversi_engine::difficulty::Difficulty;
//! use reversi_engine::game::GameState;
//! use reversi_engine::player::{AiPlayer, StrategyKind};
//! use reversi_engine::position::parse_coord;
//!
//! // Create a new game and play d3 for Black
//! let mut game = GameState::standard();
//! game.make_move(parse_coord("d3").unwrap()).unwrap();
//!
//! // Ask the computer for White's reply
//! let mut ai = AiPlayer::with_seed(StrategyKind::MonteCarlo, Player::White, Difficulty::Easy, 7);
//! let reply = ai.get_best_move(game.board(), game.current_player()).unwrap();
//! game.make_move(reply).unwrap();
//! println!("{}", game.board());
//! ```

pub mod alphabeta;
pub mod arena;
pub mod board;
pub mod constants;
pub mod difficulty;
pub mod eval;
pub mod game;
pub mod greedy;
pub mod mcts;
pub mod player;
pub mod playout;
pub mod position;
pub mod protocol;
