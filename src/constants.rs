//! Constants for board geometry, evaluation weights, and search parameters.
//!
//! All tuning numbers for the engine live here so they can be adjusted in one
//! place. The per-difficulty tables are indexed by [`Difficulty`] in declaration
//! order (Easy, Medium, Hard, Expert).
//!
//! [`Difficulty`]: crate::difficulty::Difficulty

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width (standard Reversi is 8x8).
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height.
pub const DEFAULT_HEIGHT: usize = 8;

/// Smallest supported side length (room for the four starting discs).
pub const MIN_SIDE: usize = 2;

/// Largest supported side length. Columns are lettered `a`..`z`.
pub const MAX_SIDE: usize = 26;

/// Unit steps to the 8 neighbouring cells as (dx, dy).
/// Order: N, NE, E, SE, S, SW, W, NW
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Multiplier on the disc differential (own - opponent).
pub const DISC_WEIGHT: i32 = 2;

/// Multiplier on the mobility differential (own - opponent legal moves).
pub const MOBILITY_WEIGHT: i32 = 5;

/// Score offset for a finished game, large enough to dominate any heuristic sum.
pub const WIN_SCORE: i32 = 100_000;

/// Positional weight of a corner.
pub const CORNER_WEIGHT: i32 = 100;

/// Positional weight of an edge cell orthogonally next to a corner (C-square).
pub const C_SQUARE_WEIGHT: i32 = -20;

/// Positional weight of the cell diagonally next to a corner (X-square).
pub const X_SQUARE_WEIGHT: i32 = -50;

/// Positional weight of an edge cell two steps from a corner.
pub const EDGE_NEAR_WEIGHT: i32 = 10;

/// Positional weight of any other edge cell.
pub const EDGE_WEIGHT: i32 = 5;

/// Positional weight of the ring just inside the edge.
pub const INNER_RING_WEIGHT: i32 = -2;

/// Positional weight of interior cells.
pub const INTERIOR_WEIGHT: i32 = -1;

// =============================================================================
// Search Parameters
// =============================================================================

/// UCB1 exploration constant (sqrt 2).
pub const UCB_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Alpha-beta depth per difficulty tier.
pub const SEARCH_DEPTH: [u32; 4] = [2, 4, 6, 8];

/// MCTS iteration budget per difficulty tier.
pub const MCTS_ITERATIONS: [u32; 4] = [200, 1_000, 5_000, 20_000];

/// Wall-clock cap per difficulty tier, in milliseconds.
pub const TIME_BUDGET_MS: [u64; 4] = [250, 1_000, 3_000, 10_000];

/// Upper bound on moves in one random rollout (every move fills a cell, so
/// the board area is a hard ceiling; passes are counted separately).
pub const MAX_ROLLOUT_PLIES: usize = MAX_SIDE * MAX_SIDE * 2;

// =============================================================================
// Protocol
// =============================================================================

/// Engine name reported by the text protocol.
pub const ENGINE_NAME: &str = "reversi-engine";

/// Protocol revision reported by `protocol_version`.
pub const PROTOCOL_VERSION: &str = "1";
