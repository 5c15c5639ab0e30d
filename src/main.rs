//! Reversi-Engine command line.
//!
//! ## Usage
//!
//! - `reversi-engine` - Play a demo game between two engines
//! - `reversi-engine protocol` - Read text-protocol commands on stdin
//! - `reversi-engine match` - Play a series of games and report the tally

use std::io;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use reversi_engine::arena::run_match;
use reversi_engine::board::Player;
use reversi_engine::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use reversi_engine::difficulty::{Difficulty, DifficultyProfile};
use reversi_engine::game::{GameState, GameStatus};
use reversi_engine::player::{AiPlayer, StrategyKind};
use reversi_engine::position::str_coord;
use reversi_engine::protocol::ProtocolEngine;

/// Reversi-Engine: greedy, alpha-beta and Monte Carlo Reversi players
#[derive(Parser)]
#[command(name = "reversi-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two engines and print every move
    Demo {
        #[arg(long, value_enum, default_value_t = StrategyKind::AlphaBeta)]
        black: StrategyKind,
        #[arg(long, value_enum, default_value_t = StrategyKind::MonteCarlo)]
        white: StrategyKind,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Run the text protocol on stdin/stdout
    Protocol {
        #[arg(long, value_enum, default_value_t = StrategyKind::AlphaBeta)]
        strategy: StrategyKind,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Play a series of games, alternating colours, and print the tally
    Match {
        /// Strategy reported as the first player
        #[arg(long, value_enum)]
        first: StrategyKind,
        /// Opponent strategy
        #[arg(long, value_enum)]
        second: StrategyKind,
        /// Number of games
        #[arg(short = 'n', long, default_value_t = 10)]
        games: u32,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Options shared by every subcommand that runs an engine.
#[derive(Args, Clone)]
struct EngineArgs {
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Board width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
    /// Seed for the engines' random choices
    #[arg(long)]
    seed: Option<u64>,
    /// Override alpha-beta search depth
    #[arg(long)]
    depth: Option<u32>,
    /// Override Monte Carlo iteration budget
    #[arg(long)]
    iterations: Option<u32>,
    /// Override the per-move time cap in milliseconds (0 = no cap)
    #[arg(long)]
    time_ms: Option<u64>,
}

impl EngineArgs {
    fn profile(&self) -> DifficultyProfile {
        let mut profile = self.difficulty.profile();
        if let Some(depth) = self.depth {
            profile.search_depth = depth;
        }
        if let Some(iterations) = self.iterations {
            profile.iterations = iterations;
        }
        if let Some(ms) = self.time_ms {
            profile.time_budget = (ms > 0).then(|| Duration::from_millis(ms));
        }
        profile
    }

    /// Build an engine; `index` keeps seeded engines from sharing a stream.
    fn player(&self, kind: StrategyKind, player: Player, index: u64) -> AiPlayer {
        let ai = match self.seed {
            Some(seed) => AiPlayer::with_seed(kind, player, self.difficulty, seed.wrapping_add(index)),
            None => AiPlayer::create(kind, player, self.difficulty),
        };
        ai.with_profile(self.profile())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => default_demo()?,
    };

    match command {
        Commands::Protocol { strategy, engine } => {
            let ai = engine.player(strategy, Player::White, 0);
            let mut protocol = ProtocolEngine::with_player(ai);
            protocol
                .run(io::stdin().lock(), io::stdout())
                .context("protocol session failed")?;
        }
        Commands::Match {
            first,
            second,
            games,
            engine,
        } => {
            let mut a = engine.player(first, Player::Black, 0);
            let mut b = engine.player(second, Player::White, 1);
            let stats = run_match(&mut a, &mut b, games, engine.width, engine.height)
                .context("invalid board size")?;
            println!(
                "{} vs {} ({} games, {}): +{} -{} ={} ({:.1}%)",
                a.name(),
                b.name(),
                stats.games(),
                engine.difficulty,
                stats.wins,
                stats.losses,
                stats.draws,
                stats.score() * 100.0
            );
        }
        Commands::Demo {
            black,
            white,
            engine,
        } => run_demo(black, white, &engine)?,
    }
    Ok(())
}

/// `demo` with every option at its default, used when no subcommand is given.
fn default_demo() -> Result<Commands> {
    let cli = Cli::try_parse_from(["reversi-engine", "demo"])?;
    cli.command.context("demo subcommand missing")
}

fn run_demo(black: StrategyKind, white: StrategyKind, engine: &EngineArgs) -> Result<()> {
    println!("Reversi-Engine: {black} (X) vs {white} (O), {}\n", engine.difficulty);

    let mut game = GameState::new(engine.width, engine.height).context("invalid board size")?;
    let mut black_ai = engine.player(black, Player::Black, 0);
    let mut white_ai = engine.player(white, Player::White, 1);

    println!("{}", game.board());
    while !game.is_game_finished() {
        let to_move = game.current_player();
        let ai = if to_move == Player::Black { &mut black_ai } else { &mut white_ai };
        match ai.get_best_move(game.board(), to_move) {
            Some(mv) => {
                let played = game
                    .make_move(mv)
                    .with_context(|| format!("{} chose {}", ai.name(), str_coord(mv)))?;
                println!(
                    "{to_move} plays {} (flips {})",
                    str_coord(mv),
                    played.pieces_flipped
                );
                println!("{}", game.board());
            }
            None => {
                if game.skip_turn().is_err() {
                    bail!("{to_move} has no move but cannot pass");
                }
                println!("{to_move} passes\n");
            }
        }
    }

    let (b, w) = game.score();
    let result = match game.game_status() {
        GameStatus::BlackWin => "Black wins",
        GameStatus::WhiteWin => "White wins",
        GameStatus::Draw => "Draw",
        GameStatus::Playing => "Unfinished",
    };
    println!("{result}: {b}-{w}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_matches_demo_defaults() {
        let Commands::Demo {
            black,
            white,
            engine,
        } = default_demo().unwrap()
        else {
            panic!("expected the demo subcommand");
        };
        assert_eq!(black, StrategyKind::AlphaBeta);
        assert_eq!(white, StrategyKind::MonteCarlo);
        assert_eq!(engine.difficulty, Difficulty::Medium);
        assert_eq!((engine.width, engine.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(engine.profile(), Difficulty::Medium.profile());
    }

    #[test]
    fn test_time_override_zero_disables_cap() {
        let cli = Cli::try_parse_from(["reversi-engine", "demo", "--time-ms", "0", "--depth", "3"]).unwrap();
        let Some(Commands::Demo { engine, .. }) = cli.command else {
            panic!("expected the demo subcommand");
        };
        let profile = engine.profile();
        assert_eq!(profile.time_budget, None);
        assert_eq!(profile.search_depth, 3);
    }
}
