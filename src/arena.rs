//! Computer-vs-computer games and match tallies.

use log::{debug, error, info};

use crate::board::{BoardError, Player};
use crate::game::{GameState, GameStatus};
use crate::player::AiPlayer;

/// Play `game` to the end with `black` and `white` choosing moves.
///
/// A side without a legal move passes. Returns the final status.
pub fn play_game(game: &mut GameState, black: &mut AiPlayer, white: &mut AiPlayer) -> GameStatus {
    while !game.is_game_finished() {
        let to_move = game.current_player();
        let ai = if to_move == Player::Black { &mut *black } else { &mut *white };
        match ai.get_best_move(game.board(), to_move) {
            Some(mv) => {
                if let Err(e) = game.make_move(mv) {
                    error!("{} played {mv}: {e}", ai.name());
                    break;
                }
            }
            None => {
                if game.skip_turn().is_err() {
                    break;
                }
            }
        }
    }
    game.game_status()
}

/// Win/loss/draw counts from the first player's point of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchStats {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score with draws counted as half a win.
    pub fn score(&self) -> f64 {
        if self.games() == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / self.games() as f64
    }
}

/// Play `games` games between `first` and `second`, swapping colours every game.
/// `first` takes Black in even-numbered games.
pub fn run_match(
    first: &mut AiPlayer,
    second: &mut AiPlayer,
    games: u32,
    width: usize,
    height: usize,
) -> Result<MatchStats, BoardError> {
    let mut stats = MatchStats::default();
    for i in 0..games {
        let mut game = GameState::new(width, height)?;
        let first_is_black = i % 2 == 0;
        let status = if first_is_black {
            play_game(&mut game, first, second)
        } else {
            play_game(&mut game, second, first)
        };
        let first_color = if first_is_black { Player::Black } else { Player::White };
        match game.winner() {
            Some(p) if p == first_color => stats.wins += 1,
            Some(_) => stats.losses += 1,
            None => stats.draws += 1,
        }
        let (b, w) = game.score();
        debug!("game {}: {status:?} ({b}-{w})", i + 1);
    }
    info!(
        "{} vs {}: +{} -{} ={}",
        first.name(),
        second.name(),
        stats.wins,
        stats.losses,
        stats.draws
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::player::StrategyKind;

    #[test]
    fn test_play_game_finishes() {
        let mut black = AiPlayer::with_seed(StrategyKind::Random, Player::Black, Difficulty::Easy, 1);
        let mut white = AiPlayer::with_seed(StrategyKind::Random, Player::White, Difficulty::Easy, 2);
        let mut game = GameState::standard();
        let status = play_game(&mut game, &mut black, &mut white);
        assert_ne!(status, GameStatus::Playing);
        assert!(game.board().is_terminal());
        let (b, w) = game.score();
        match status {
            GameStatus::BlackWin => assert!(b > w),
            GameStatus::WhiteWin => assert!(w > b),
            GameStatus::Draw => assert_eq!(b, w),
            GameStatus::Playing => unreachable!(),
        }
    }

    #[test]
    fn test_match_counts_every_game() {
        let mut a = AiPlayer::with_seed(StrategyKind::Random, Player::Black, Difficulty::Easy, 3);
        let mut b = AiPlayer::with_seed(StrategyKind::Random, Player::White, Difficulty::Easy, 4);
        let stats = run_match(&mut a, &mut b, 6, 6, 6).unwrap();
        assert_eq!(stats.games(), 6);
        assert!((0.0..=1.0).contains(&stats.score()));
    }

    #[test]
    fn test_match_rejects_bad_size() {
        let mut a = AiPlayer::with_seed(StrategyKind::Random, Player::Black, Difficulty::Easy, 3);
        let mut b = AiPlayer::with_seed(StrategyKind::Random, Player::White, Difficulty::Easy, 4);
        assert!(run_match(&mut a, &mut b, 2, 1, 8).is_err());
    }
}
