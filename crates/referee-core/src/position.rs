//! Board coordinate representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate on the 8x8 board, 1-indexed in both axes.
///
/// `row` 1 is White's home rank, `row` 8 is Black's; `col` 1 is the a-file.
/// Positions are plain values: callers may construct coordinates outside
/// [1,8]x[1,8], and the engine treats any lookup at such a position as
/// "no piece" rather than faulting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    /// Creates a position from row and column.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Returns true if this position lies on the board.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 1 && self.row <= 8 && self.col >= 1 && self.col <= 8
    }

    /// Returns the position shifted by the given row and column deltas.
    ///
    /// The result may be off-board; callers filter with [`Position::is_on_board`].
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Self {
        Position::new(self.row + dr, self.col + dc)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0].to_ascii_lowercase() {
            c @ b'a'..=b'h' => (c - b'a') as i8 + 1,
            _ => return None,
        };
        let row = match bytes[1] {
            r @ b'1'..=b'8' => (r - b'0') as i8,
            _ => return None,
        };
        Some(Position::new(row, col))
    }

    /// Returns the algebraic notation for this square, if on-board.
    pub fn to_algebraic(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        let file = (b'a' + (self.col - 1) as u8) as char;
        Some(format!("{}{}", file, self.row))
    }

    // Home squares relevant to castling.
    pub const WHITE_KING_HOME: Position = Position::new(1, 5);
    pub const BLACK_KING_HOME: Position = Position::new(8, 5);
    pub const WHITE_ROOK_QUEENSIDE: Position = Position::new(1, 1);
    pub const WHITE_ROOK_KINGSIDE: Position = Position::new(1, 8);
    pub const BLACK_ROOK_QUEENSIDE: Position = Position::new(8, 1);
    pub const BLACK_ROOK_KINGSIDE: Position = Position::new(8, 8);
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "Position({})", s),
            None => write!(f, "Position({},{})", self.row, self.col),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "({},{})", self.row, self.col),
        }
    }
}
