//! Line-oriented text protocol for driving the engine from another program.
//!
//! The framing follows GTP: each request is an optional numeric id, a command
//! and its arguments; each response is `=id message` on success or
//! `?id message` on failure, followed by a blank line. Lines starting with `#`
//! are comments.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - engine identification
//! - `list_commands`, `known_command <cmd>` - introspection
//! - `quit` - end the session
//! - `newgame [width height]` - start a new game, optionally resizing the board
//! - `showboard` - print the board
//! - `play <coord>` - play a move for the side to move (`play pass` passes)
//! - `pass` - pass for a side with no legal move
//! - `genmove` - let the engine choose and play a move for the side to move
//! - `hint` - suggest a move without playing it
//! - `undo`, `redo` - step through the game ledger
//! - `valid_moves` - legal moves for the side to move
//! - `score`, `status` - disc counts and game status
//! - `difficulty <easy|medium|hard|expert>` - set engine strength
//! - `strategy <random|greedy|positional|alphabeta|montecarlo>` - set engine strategy
//!
//! ## Example
//!
//! ```ignore
//! use reversi_engine::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{BoardError, Player};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::difficulty::Difficulty;
use crate::game::{GameState, GameStatus};
use crate::player::{AiPlayer, StrategyKind};
use crate::position::{parse_coord, str_coord};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "difficulty",
    "genmove",
    "hint",
    "known_command",
    "list_commands",
    "name",
    "newgame",
    "pass",
    "play",
    "protocol_version",
    "quit",
    "redo",
    "score",
    "showboard",
    "status",
    "strategy",
    "undo",
    "valid_moves",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game
    game: GameState,
    /// Engine player used by `genmove` and `hint`
    ai: AiPlayer,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Standard 8x8 game with a medium alpha-beta engine.
    pub fn new() -> Self {
        Self::with_player(AiPlayer::create(
            StrategyKind::AlphaBeta,
            Player::White,
            Difficulty::Medium,
        ))
    }

    pub fn with_player(ai: AiPlayer) -> Self {
        Self {
            game: GameState::standard(),
            ai,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn status_text(&self) -> String {
        match self.game.game_status() {
            GameStatus::Playing => format!("playing, {} to move", self.game.current_player()),
            GameStatus::BlackWin => "black wins".to_string(),
            GameStatus::WhiteWin => "white wins".to_string(),
            GameStatus::Draw => "draw".to_string(),
        }
    }

    fn pass(&mut self) -> (bool, String) {
        match self.game.skip_turn() {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "newgame" => match args {
                [] => {
                    self.game.new_game();
                    (true, String::new())
                }
                [w, h] => {
                    let size = w
                        .parse::<usize>()
                        .ok()
                        .zip(h.parse::<usize>().ok())
                        .ok_or_else(|| BoardError::InvalidCoordinate(format!("{w} {h}")));
                    match size.and_then(|(w, h)| GameState::new(w, h)) {
                        Ok(game) => {
                            self.game = game;
                            (true, String::new())
                        }
                        Err(e) => (false, e.to_string()),
                    }
                }
                _ => (false, "expected no arguments or width and height".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "play" => {
                let Some(vertex) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if vertex.eq_ignore_ascii_case("pass") {
                    return self.pass();
                }
                let Some(p) = parse_coord(vertex) else {
                    return (false, BoardError::InvalidCoordinate(vertex.to_string()).to_string());
                };
                match self.game.make_move(p) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "pass" => self.pass(),

            "genmove" => {
                if self.game.is_game_finished() {
                    return (false, "game is over".to_string());
                }
                match self.ai.suggest(&self.game) {
                    Some(p) => match self.game.make_move(p) {
                        Ok(_) => (true, str_coord(p)),
                        Err(e) => (false, e.to_string()),
                    },
                    None => match self.game.skip_turn() {
                        Ok(()) => (true, "pass".to_string()),
                        Err(e) => (false, e.to_string()),
                    },
                }
            }

            "hint" => match self.ai.suggest(&self.game) {
                Some(p) => (true, str_coord(p)),
                None if self.game.is_game_finished() => (false, "game is over".to_string()),
                None => (true, "pass".to_string()),
            },

            "undo" => {
                if self.game.undo_move() {
                    (true, String::new())
                } else {
                    (false, "nothing to undo".to_string())
                }
            }

            "redo" => {
                if self.game.redo_move() {
                    (true, String::new())
                } else {
                    (false, "nothing to redo".to_string())
                }
            }

            "valid_moves" => {
                let moves: Vec<String> = self.game.valid_moves().into_iter().map(str_coord).collect();
                (true, moves.join(" "))
            }

            "score" => {
                let (black, white) = self.game.score();
                (true, format!("black {black} white {white}"))
            }

            "status" => (true, self.status_text()),

            "difficulty" => {
                let Some(arg) = args.first() else {
                    return (true, self.ai.difficulty().to_string());
                };
                match arg.parse::<Difficulty>() {
                    Ok(d) => {
                        self.ai.set_difficulty(d);
                        (true, String::new())
                    }
                    Err(e) => (false, e),
                }
            }

            "strategy" => {
                let Some(arg) = args.first() else {
                    return (true, self.ai.name().to_string());
                };
                match arg.parse::<StrategyKind>() {
                    Ok(kind) => {
                        self.ai.set_kind(kind);
                        (true, String::new())
                    }
                    Err(e) => (false, e),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
