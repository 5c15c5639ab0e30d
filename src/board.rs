//! Reversi board representation and the capture rules.
//!
//! The board is a dense row-major grid of [`Player`] cells. It is the single
//! source of truth for legality and flipping: every strategy simulates on a
//! clone and calls [`Board::make_move`] rather than re-implementing captures.
//!
//! A move at `p` captures in direction `d` when the cells `p+d, p+2d, ...`
//! hold a non-empty run of opponent discs closed off by one of the mover's
//! discs. A move is legal only if it captures in at least one direction.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, DIRECTIONS, MAX_SIDE, MIN_SIDE};
use crate::position::Position;

/// Cell contents, and the side to move.
///
/// `None` marks an empty cell and is never a mover.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Player {
    #[default]
    None,
    Black,
    White,
}

impl Player {
    /// The other side. `None` has no opponent and maps to itself.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
            Player::None => Player::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
            Player::None => "None",
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
            Player::None => '.',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a move was rejected. The board (or game) is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {0} is off the board")]
    OutOfBounds(Position),
    #[error("illegal move: {0} is not empty")]
    Occupied(Position),
    #[error("illegal move: {0} captures nothing")]
    NoCapture(Position),
    #[error("illegal move: no player to move")]
    NoMover,
    #[error("game is over")]
    GameOver,
    #[error("cannot pass while a legal move exists")]
    MustMove,
}

/// Errors building or parsing a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unsupported board size {width}x{height} (sides must be {min}..={max})", min = MIN_SIDE, max = MAX_SIDE)]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

/// A rectangular Reversi board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Player>,
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Self::empty(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        board.initialize();
        board
    }
}

impl Board {
    /// Create a board of the given size with the four starting discs placed.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&width) || !(MIN_SIDE..=MAX_SIDE).contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let mut board = Self::empty(width, height);
        board.initialize();
        Ok(board)
    }

    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Player::None; width * height],
        }
    }

    /// Reset to the standard opening cross around the centre.
    ///
    /// White holds the top-left and bottom-right centre cells, Black the other
    /// two. Odd sides put the cross just above/left of the middle.
    pub fn initialize(&mut self) {
        self.clear();
        let mx = (self.width / 2) as i32;
        let my = (self.height / 2) as i32;
        self.put(Position::new(mx - 1, my - 1), Player::White);
        self.put(Position::new(mx, my - 1), Player::Black);
        self.put(Position::new(mx - 1, my), Player::Black);
        self.put(Position::new(mx, my), Player::White);
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Player::None);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, p: Position) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn put(&mut self, p: Position, player: Player) {
        let i = self.idx(p);
        self.cells[i] = player;
    }

    #[inline]
    pub fn is_valid_position(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Cell contents; off-board positions read as `Player::None`.
    #[inline]
    pub fn get_cell(&self, p: Position) -> Player {
        if self.is_valid_position(p) {
            self.cells[self.idx(p)]
        } else {
            Player::None
        }
    }

    /// Overwrite a cell without applying any rules. Used to set up positions.
    pub fn set_cell(&mut self, p: Position, player: Player) -> Result<(), MoveError> {
        if !self.is_valid_position(p) {
            return Err(MoveError::OutOfBounds(p));
        }
        self.put(p, player);
        Ok(())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Length of the opponent run `player` would capture from `p` towards `dir`.
    fn capture_run(&self, p: Position, player: Player, dir: (i32, i32)) -> usize {
        let opp = player.opponent();
        let mut cur = p.step(dir);
        let mut run = 0;
        while self.get_cell(cur) == opp {
            run += 1;
            cur = cur.step(dir);
        }
        if run > 0 && self.get_cell(cur) == player {
            run
        } else {
            0
        }
    }

    /// Number of discs a move by `player` at `p` would flip, without playing it.
    ///
    /// Zero when the move is illegal for any reason.
    pub fn flips_at(&self, p: Position, player: Player) -> usize {
        if player == Player::None || self.get_cell(p) != Player::None || !self.is_valid_position(p) {
            return 0;
        }
        DIRECTIONS
            .iter()
            .map(|&d| self.capture_run(p, player, d))
            .sum()
    }

    /// True iff `p` is empty and placing `player` there captures something.
    pub fn is_valid_move(&self, p: Position, player: Player) -> bool {
        if player == Player::None || !self.is_valid_position(p) || self.get_cell(p) != Player::None {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&d| self.capture_run(p, player, d) > 0)
    }

    /// All legal moves for `player`, in row-major order.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.is_valid_move(p, player))
            .collect()
    }

    /// Whether `player` has at least one legal move. Stops at the first one.
    pub fn has_valid_move(&self, player: Player) -> bool {
        self.positions().any(|p| self.is_valid_move(p, player))
    }

    /// Number of legal moves for `player`.
    pub fn mobility(&self, player: Player) -> usize {
        self.positions()
            .filter(|&p| self.is_valid_move(p, player))
            .count()
    }

    /// Place a disc for `player` at `p` and flip every captured run.
    ///
    /// Returns the number of flipped discs. On error the board is untouched.
    pub fn make_move(&mut self, p: Position, player: Player) -> Result<usize, MoveError> {
        if player == Player::None {
            return Err(MoveError::NoMover);
        }
        if !self.is_valid_position(p) {
            return Err(MoveError::OutOfBounds(p));
        }
        if self.get_cell(p) != Player::None {
            return Err(MoveError::Occupied(p));
        }

        let runs = DIRECTIONS.map(|d| self.capture_run(p, player, d));
        let flipped: usize = runs.iter().sum();
        if flipped == 0 {
            return Err(MoveError::NoCapture(p));
        }

        self.put(p, player);
        for (&dir, &run) in DIRECTIONS.iter().zip(runs.iter()) {
            let mut cur = p;
            for _ in 0..run {
                cur = cur.step(dir);
                self.put(cur, player);
            }
        }
        Ok(flipped)
    }

    /// Number of discs belonging to `player` (or empty cells for `None`).
    pub fn count_pieces(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == player).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Player::None)
    }

    /// Neither side can move.
    pub fn is_terminal(&self) -> bool {
        !self.has_valid_move(Player::Black) && !self.has_valid_move(Player::White)
    }

    /// Side with more discs, or `Player::None` on equal counts.
    pub fn leader(&self) -> Player {
        let black = self.count_pieces(Player::Black);
        let white = self.count_pieces(Player::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Player::Black,
            std::cmp::Ordering::Less => Player::White,
            std::cmp::Ordering::Equal => Player::None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = self.cells[y * self.width + x].symbol();
                if x + 1 < self.width {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse a board drawn as rows of `X` (Black), `O` (White) and `.` (empty).
///
/// Whitespace inside a row is ignored and blank lines are skipped, so the
/// output of `Display` parses back to the same board.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Player>> = Vec::new();
        for line in s.lines() {
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    'X' | 'x' | 'B' | 'b' => Ok(Player::Black),
                    'O' | 'o' | 'W' | 'w' => Ok(Player::White),
                    '.' | '-' | '_' => Ok(Player::None),
                    other => Err(BoardError::InvalidLayout(format!("unexpected character {other:?}"))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(BoardError::InvalidLayout(format!(
                "row {} has {} cells, expected {width}",
                bad + 1,
                rows[bad].len()
            )));
        }
        if !(MIN_SIDE..=MAX_SIDE).contains(&width) || !(MIN_SIDE..=MAX_SIDE).contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::default();
        assert_eq!(board.get_cell(p(3, 3)), Player::White);
        assert_eq!(board.get_cell(p(4, 3)), Player::Black);
        assert_eq!(board.get_cell(p(3, 4)), Player::Black);
        assert_eq!(board.get_cell(p(4, 4)), Player::White);
        assert_eq!(board.count_pieces(Player::Black), 2);
        assert_eq!(board.count_pieces(Player::White), 2);
        assert_eq!(board.count_pieces(Player::None), 60);
    }

    #[test_case(0, 8; "zero width")]
    #[test_case(8, 1; "height too small")]
    #[test_case(27, 8; "width too large")]
    fn test_rejects_bad_dimensions(w: usize, h: usize) {
        assert_eq!(
            Board::new(w, h),
            Err(BoardError::InvalidDimensions { width: w, height: h })
        );
    }

    #[test_case(2, 2)]
    #[test_case(4, 6)]
    #[test_case(10, 10)]
    #[test_case(5, 7)]
    fn test_other_sizes_start_with_four_discs(w: usize, h: usize) {
        let board = Board::new(w, h).unwrap();
        assert_eq!(board.count_pieces(Player::Black), 2);
        assert_eq!(board.count_pieces(Player::White), 2);
    }

    #[test]
    fn test_is_valid_position() {
        let board = Board::new(6, 4).unwrap();
        assert!(board.is_valid_position(p(0, 0)));
        assert!(board.is_valid_position(p(5, 3)));
        assert!(!board.is_valid_position(p(6, 0)));
        assert!(!board.is_valid_position(p(0, 4)));
        assert!(!board.is_valid_position(p(-1, 0)));
        assert!(!board.is_valid_position(p(0, -1)));
    }

    #[test]
    fn test_opening_moves_for_black() {
        let board = Board::default();
        assert_eq!(
            board.valid_moves(Player::Black),
            vec![p(3, 2), p(2, 3), p(5, 4), p(4, 5)]
        );
        assert!(board.valid_moves(Player::None).is_empty());
    }

    #[test]
    fn test_make_move_flips_one() {
        let mut board = Board::default();
        assert_eq!(board.make_move(p(3, 2), Player::Black), Ok(1));
        assert_eq!(board.get_cell(p(3, 3)), Player::Black);
        assert_eq!(board.count_pieces(Player::Black), 4);
        assert_eq!(board.count_pieces(Player::White), 1);
    }

    #[test]
    fn test_make_move_errors_leave_board_unchanged() {
        let mut board = Board::default();
        let before = board.clone();
        assert_eq!(board.make_move(p(3, 3), Player::Black), Err(MoveError::Occupied(p(3, 3))));
        assert_eq!(board.make_move(p(0, 0), Player::Black), Err(MoveError::NoCapture(p(0, 0))));
        assert_eq!(board.make_move(p(8, 0), Player::Black), Err(MoveError::OutOfBounds(p(8, 0))));
        assert_eq!(board.make_move(p(3, 2), Player::None), Err(MoveError::NoMover));
        assert_eq!(board, before);
    }

    #[test]
    fn test_multi_direction_capture() {
        let mut board: Board = "
            X . X . X
            . O O O .
            X O . O X
            . O O O .
            X . X . X
        "
        .parse()
        .unwrap();
        assert_eq!(board.flips_at(p(2, 2), Player::Black), 8);
        assert_eq!(board.make_move(p(2, 2), Player::Black), Ok(8));
        assert_eq!(board.count_pieces(Player::White), 0);
        assert_eq!(board.count_pieces(Player::Black), 17);
    }

    #[test]
    fn test_run_must_be_closed() {
        // A run that ends at the edge or an empty cell captures nothing.
        let board: Board = "
            . O O X
            . O . .
            . . . .
            . . . .
        "
        .parse()
        .unwrap();
        assert!(board.is_valid_move(p(0, 0), Player::Black));
        assert_eq!(board.flips_at(p(0, 0), Player::Black), 2);
        assert!(!board.is_valid_move(p(1, 2), Player::Black));
        assert!(!board.is_valid_move(p(0, 1), Player::Black));
    }

    #[test]
    fn test_display_parses_back() {
        let mut board = Board::new(6, 6).unwrap();
        board.make_move(p(2, 1), Player::Black).unwrap();
        let text = board.to_string();
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = "X O .\nX O\n".parse::<Board>().unwrap_err();
        assert!(matches!(err, BoardError::InvalidLayout(_)));
        let err = "X O ?\nX O .\n".parse::<Board>().unwrap_err();
        assert!(matches!(err, BoardError::InvalidLayout(_)));
    }

    #[test]
    fn test_terminal_and_leader() {
        let board: Board = "
            X X
            X O
        "
        .parse()
        .unwrap();
        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.leader(), Player::Black);
    }

    #[test]
    fn test_set_cell_and_clear() {
        let mut board = Board::default();
        assert_eq!(board.set_cell(p(9, 9), Player::Black), Err(MoveError::OutOfBounds(p(9, 9))));
        board.set_cell(p(0, 0), Player::White).unwrap();
        assert_eq!(board.get_cell(p(0, 0)), Player::White);
        board.clear();
        assert_eq!(board.count_pieces(Player::None), 64);
        board.initialize();
        assert_eq!(board, Board::default());
    }
}
