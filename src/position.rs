//! Board coordinates and their text form.
//!
//! A [`Position`] is a plain `(x, y)` pair with `x` the column and `y` the row,
//! both 0-based from the top-left corner. It carries no ownership and no board
//! dimensions; bounds are checked by [`Board::is_valid_position`].
//!
//! The text form is the usual Reversi notation: a column letter followed by a
//! 1-based row number, so `(3, 2)` is written `"d3"`.
//!
//! [`Board::is_valid_position`]: crate::board::Board::is_valid_position

use std::fmt;

use crate::constants::MAX_SIDE;

/// A cell coordinate on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in direction `(dx, dy)`.
    #[inline]
    pub const fn step(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_coord(*self))
    }
}

/// Parse a coordinate string like `"d3"` or `"H8"`.
///
/// Returns `None` for anything that is not a letter followed by a positive
/// row number. Bounds against a particular board are not checked here.
pub fn parse_coord(s: &str) -> Option<Position> {
    let s = s.trim();
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_lowercase();
    if !col.is_ascii_lowercase() {
        return None;
    }
    let x = (col as u8 - b'a') as i32;
    if x as usize >= MAX_SIDE {
        return None;
    }
    let row: i32 = chars.as_str().parse().ok()?;
    if row < 1 {
        return None;
    }
    Some(Position::new(x, row - 1))
}

/// Convert a position to its text form (`"d3"`).
///
/// Off-board positions that have no letter fall back to `"(x,y)"`.
pub fn str_coord(p: Position) -> String {
    if (0..MAX_SIDE as i32).contains(&p.x) && p.y >= 0 {
        let col = (b'a' + p.x as u8) as char;
        format!("{col}{}", p.y + 1)
    } else {
        format!("({},{})", p.x, p.y)
    }
}
