//! Computer players: one type, several strategies.
//!
//! An [`AiPlayer`] owns a seat (`player`), a difficulty, a strategy chosen at
//! construction, and its own random source. It holds no board state; every
//! query gets a fresh board and side to move, and the board is only ever
//! cloned, never modified.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use clap::ValueEnum;
use fastrand::Rng;

use crate::alphabeta;
use crate::board::{Board, Player};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::eval::Evaluator;
use crate::game::GameState;
use crate::greedy;
use crate::mcts;
use crate::playout::random_move;
use crate::position::Position;

/// Move-selection strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum StrategyKind {
    /// Uniformly random legal move.
    Random,
    /// Best one-ply evaluation.
    Greedy,
    /// Highest positional-table weight.
    Positional,
    /// Minimax with alpha-beta pruning.
    #[value(aliases = ["alphabeta", "minimax"])]
    AlphaBeta,
    /// Monte Carlo tree search.
    #[value(aliases = ["montecarlo", "mcts"])]
    MonteCarlo,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "Random AI",
            StrategyKind::Greedy => "Greedy AI",
            StrategyKind::Positional => "Positional AI",
            StrategyKind::AlphaBeta => "Alpha-Beta AI",
            StrategyKind::MonteCarlo => "Monte Carlo AI",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// A computer player.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    player: Player,
    difficulty: Difficulty,
    kind: StrategyKind,
    profile: Option<DifficultyProfile>,
    rng: Rng,
}

impl AiPlayer {
    /// Create a player with an entropy-seeded random source.
    pub fn create(kind: StrategyKind, player: Player, difficulty: Difficulty) -> Self {
        Self::with_rng(kind, player, difficulty, Rng::new())
    }

    /// Create a player whose random choices are fixed by `seed`.
    pub fn with_seed(kind: StrategyKind, player: Player, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(kind, player, difficulty, Rng::with_seed(seed))
    }

    pub fn with_rng(kind: StrategyKind, player: Player, difficulty: Difficulty, rng: Rng) -> Self {
        Self {
            player,
            difficulty,
            kind,
            profile: None,
            rng,
        }
    }

    /// Use explicit search parameters instead of the difficulty's defaults.
    ///
    /// The override lasts until the next [`set_difficulty`].
    ///
    /// [`set_difficulty`]: AiPlayer::set_difficulty
    pub fn with_profile(mut self, profile: DifficultyProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Change strength; takes effect on the next query and drops any profile override.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = None;
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Switch strategy, keeping the random source and any profile override.
    pub fn set_kind(&mut self, kind: StrategyKind) {
        self.kind = kind;
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Search parameters in effect for the next query.
    pub fn profile(&self) -> DifficultyProfile {
        self.profile.unwrap_or_else(|| self.difficulty.profile())
    }

    /// Best move for `player` on `board`, or `None` if `player` has no legal move.
    pub fn get_best_move(&mut self, board: &Board, player: Player) -> Option<Position> {
        let profile = self.profile();
        let deadline = profile.time_budget.map(|t| Instant::now() + t);
        match self.kind {
            StrategyKind::Random => random_move(board, player, &mut self.rng),
            StrategyKind::Greedy => {
                let eval = Evaluator::for_board(board);
                greedy::best_move(board, player, &eval).map(|(mv, _)| mv)
            }
            StrategyKind::Positional => {
                greedy::positional_move(board, player, &Evaluator::for_board(board))
            }
            StrategyKind::AlphaBeta => {
                let eval = Evaluator::for_board(board);
                alphabeta::search(board, player, profile.search_depth, deadline, &eval).best_move
            }
            StrategyKind::MonteCarlo => {
                mcts::tree_search(board, player, profile.iterations, deadline, &mut self.rng).best_move
            }
        }
    }

    /// Move suggestion for whoever is to move in `game`.
    pub fn suggest(&mut self, game: &GameState) -> Option<Position> {
        if game.is_game_finished() {
            return None;
        }
        self.get_best_move(game.board(), game.current_player())
    }
}
