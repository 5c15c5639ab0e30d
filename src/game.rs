//! Game flow on top of [`Board`]: side to move, game status, and undo/redo.
//!
//! All rules are delegated to the board. `GameState` only decides whose turn
//! it is, when the game is over, and keeps a ledger of every action so that
//! any number of undos followed by the same number of redos restores the
//! exact same board and side to move.

use log::debug;

use crate::board::{Board, BoardError, MoveError, Player};
use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::position::Position;

/// Outcome of the game so far. `Playing` is the only non-terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameStatus {
    /// Final status for a finished board, decided by disc count.
    pub fn from_board(board: &Board) -> Self {
        match board.leader() {
            Player::Black => GameStatus::BlackWin,
            Player::White => GameStatus::WhiteWin,
            Player::None => GameStatus::Draw,
        }
    }
}

/// A capturing move that was applied to the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub position: Position,
    pub player: Player,
    pub pieces_flipped: usize,
}

/// One entry of the game ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Move(Move),
    /// An explicit pass by a side with no legal move.
    Pass(Player),
}

#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    current: Player,
    status: GameStatus,
}

#[derive(Debug, Clone)]
struct Entry {
    turn: Turn,
    before: Snapshot,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Player,
    status: GameStatus,
    history: Vec<Entry>,
    redo: Vec<Turn>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_board(Board::default(), Player::Black)
    }
}

impl GameState {
    /// New game on a `width` x `height` board, Black to move.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::new(width, height)?, Player::Black))
    }

    /// Standard 8x8 game.
    pub fn standard() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap_or_default()
    }

    /// Start from an arbitrary position.
    ///
    /// If neither side can move the status is resolved immediately. A side to
    /// move without a legal move is left in place; call [`skip_turn`].
    ///
    /// `Player::None` is not a mover; Black moves instead.
    ///
    /// [`skip_turn`]: GameState::skip_turn
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let current = match to_move {
            Player::None => Player::Black,
            p => p,
        };
        let mut game = Self {
            board,
            current,
            status: GameStatus::Playing,
            history: Vec::new(),
            redo: Vec::new(),
        };
        if game.board.is_terminal() {
            game.status = GameStatus::from_board(&game.board);
        }
        game
    }

    /// Reset to the opening position on the same board size.
    pub fn new_game(&mut self) {
        self.board.initialize();
        self.current = Player::Black;
        self.status = GameStatus::Playing;
        self.history.clear();
        self.redo.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn game_status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_finished(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Winner of a finished game; `None` while playing or on a draw.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::BlackWin => Some(Player::Black),
            GameStatus::WhiteWin => Some(Player::White),
            GameStatus::Playing | GameStatus::Draw => None,
        }
    }

    /// Capturing moves played so far, oldest first. Passes are omitted.
    pub fn move_history(&self) -> Vec<Move> {
        self.history
            .iter()
            .filter_map(|e| match e.turn {
                Turn::Move(m) => Some(m),
                Turn::Pass(_) => None,
            })
            .collect()
    }

    /// Every recorded action, including explicit passes.
    pub fn ledger(&self) -> impl Iterator<Item = &Turn> {
        self.history.iter().map(|e| &e.turn)
    }

    pub fn black_count(&self) -> usize {
        self.board.count_pieces(Player::Black)
    }

    pub fn white_count(&self) -> usize {
        self.board.count_pieces(Player::White)
    }

    /// Disc counts as (black, white).
    pub fn score(&self) -> (usize, usize) {
        (self.black_count(), self.white_count())
    }

    /// Legal moves for the side to move (empty once the game is over).
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_game_finished() {
            return Vec::new();
        }
        self.board.valid_moves(self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Play `p` for the side to move. Clears the redo buffer on success.
    pub fn make_move(&mut self, p: Position) -> Result<Move, MoveError> {
        let mv = self.apply_move(p)?;
        self.redo.clear();
        Ok(mv)
    }

    /// Pass for a side that has no legal move.
    pub fn skip_turn(&mut self) -> Result<(), MoveError> {
        self.apply_pass()?;
        self.redo.clear();
        Ok(())
    }

    /// Take back the last action. Returns false if there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        self.board = entry.before.board;
        self.current = entry.before.current;
        self.status = entry.before.status;
        self.redo.push(entry.turn);
        true
    }

    /// Replay the last undone action. Returns false if there is nothing to redo.
    pub fn redo_move(&mut self) -> bool {
        let Some(turn) = self.redo.pop() else {
            return false;
        };
        let replayed = match turn {
            Turn::Move(m) => self.apply_move(m.position).map(|_| ()),
            Turn::Pass(_) => self.apply_pass(),
        };
        debug_assert!(replayed.is_ok(), "redo of {turn:?} failed");
        replayed.is_ok()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            current: self.current,
            status: self.status,
        }
    }

    fn apply_move(&mut self, p: Position) -> Result<Move, MoveError> {
        if self.is_game_finished() {
            return Err(MoveError::GameOver);
        }
        let before = self.snapshot();
        let player = self.current;
        let pieces_flipped = self.board.make_move(p, player)?;
        let mv = Move {
            position: p,
            player,
            pieces_flipped,
        };
        self.history.push(Entry {
            turn: Turn::Move(mv),
            before,
        });

        self.current = player.opponent();
        if !self.board.has_valid_move(self.current) {
            if self.board.has_valid_move(player) {
                debug!("{} has no legal move, turn passes back to {player}", self.current);
                self.current = player;
            } else {
                self.finish();
            }
        }
        Ok(mv)
    }

    fn apply_pass(&mut self) -> Result<(), MoveError> {
        if self.is_game_finished() {
            return Err(MoveError::GameOver);
        }
        if self.current == Player::None {
            return Err(MoveError::NoMover);
        }
        if self.board.has_valid_move(self.current) {
            return Err(MoveError::MustMove);
        }
        let before = self.snapshot();
        self.history.push(Entry {
            turn: Turn::Pass(self.current),
            before,
        });
        self.current = self.current.opponent();
        if !self.board.has_valid_move(self.current) {
            self.finish();
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.status = GameStatus::from_board(&self.board);
        debug!(
            "game over: {:?} (black {}, white {})",
            self.status,
            self.black_count(),
            self.white_count()
        );
    }
}
