//! Difficulty levels and the search parameters they resolve to.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

use crate::constants::{MCTS_ITERATIONS, SEARCH_DEPTH, TIME_BUDGET_MS};

/// Named playing strength.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    #[inline]
    fn tier(self) -> usize {
        self as usize
    }

    /// Concrete search parameters for this level.
    pub fn profile(self) -> DifficultyProfile {
        DifficultyProfile::for_difficulty(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Search parameters shared by all strategies.
///
/// Each strategy reads only the fields it needs: alpha-beta uses
/// `search_depth`, Monte Carlo uses `iterations`, and both honour
/// `time_budget` when it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub search_depth: u32,
    pub iterations: u32,
    pub time_budget: Option<Duration>,
}

impl DifficultyProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let tier = difficulty.tier();
        Self {
            search_depth: SEARCH_DEPTH[tier],
            iterations: MCTS_ITERATIONS[tier],
            time_budget: Some(Duration::from_millis(TIME_BUDGET_MS[tier])),
        }
    }

    /// Same profile with no wall-clock cap, so results depend only on the
    /// inputs and the random seed.
    pub fn untimed(self) -> Self {
        Self {
            time_budget: None,
            ..self
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_grow_with_difficulty() {
        for pair in Difficulty::ALL.windows(2) {
            let (lo, hi) = (pair[0].profile(), pair[1].profile());
            assert!(lo.search_depth < hi.search_depth);
            assert!(lo.iterations < hi.iterations);
            assert!(lo.time_budget < hi.time_budget);
        }
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("EXPERT".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_untimed() {
        let p = Difficulty::Hard.profile().untimed();
        assert_eq!(p.time_budget, None);
        assert_eq!(p.search_depth, Difficulty::Hard.profile().search_depth);
    }
}
