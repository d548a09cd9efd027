//! Move representation.

use crate::{PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move: origin, destination, and an optional promotion kind.
///
/// Equality is structural over all three fields, so two promotions to
/// different kinds between the same squares are distinct moves. Castling is
/// encoded as the two-file king move; en passant as the diagonal pawn move
/// onto the empty square. Neither carries extra data here since the engine
/// recognizes both from board state and history.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without promotion.
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a pawn promotion move.
    #[inline]
    pub const fn promoting(from: Position, to: Position, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.promotion {
            Some(PieceKind::Queen) => "q",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Knight) => "n",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses a move from coordinate notation.
    ///
    /// Only square names and an optional promotion letter are understood;
    /// hosts translating richer notations do so before calling the engine.
    pub fn from_uci(s: &str) -> Option<Self> {
        // Byte-length guard plus byte slicing below: non-ASCII input must
        // bail here rather than hit a char-boundary panic.
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Position::from_algebraic(&s[0..2])?;
        let to = Position::from_algebraic(&s[2..4])?;
        let promotion = if s.len() == 5 {
            match s.as_bytes()[4].to_ascii_lowercase() {
                b'q' => Some(PieceKind::Queen),
                b'r' => Some(PieceKind::Rook),
                b'b' => Some(PieceKind::Bishop),
                b'n' => Some(PieceKind::Knight),
                _ => return None,
            }
        } else {
            None
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_uci() {
        let m = Move::new(Position::new(2, 5), Position::new(4, 5));
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::promoting(Position::new(7, 5), Position::new(8, 5), PieceKind::Queen);
        assert_eq!(promo.to_uci(), "e7e8q");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from, Position::new(2, 5));
        assert_eq!(m.to, Position::new(4, 5));
        assert_eq!(m.promotion, None);

        let promo = Move::from_uci("e7e8q").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(Move::from_uci("e7e8N").unwrap().promotion, Some(PieceKind::Knight));

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
        assert!(Move::from_uci("e2").is_none());
    }

    #[test]
    fn move_from_uci_rejects_non_ascii() {
        // Multi-byte input must come back as None, never a slice panic.
        assert!(Move::from_uci("e\u{e9}4e").is_none());
        assert!(Move::from_uci("é2e4").is_none());
        assert!(Move::from_uci("e2e4\u{265e}").is_none());
    }

    #[test]
    fn promotion_kinds_are_distinct_moves() {
        let from = Position::new(7, 1);
        let to = Position::new(8, 1);
        assert_ne!(
            Move::promoting(from, to, PieceKind::Queen),
            Move::promoting(from, to, PieceKind::Knight)
        );
        assert_ne!(Move::new(from, to), Move::promoting(from, to, PieceKind::Queen));
    }
}
