//! Mailbox board representation.

use crate::{Color, Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8x8 grid of optional pieces.
///
/// The board is a plain container with no knowledge of the rules: placement
/// is an unconditional overwrite and lookups never fail. Out-of-range
/// positions read as empty and writes to them are ignored; the engine never
/// produces such positions itself.
///
/// `Clone` yields an independent deep copy (pieces are `Copy`, the mapping
/// is owned), which the engine relies on for its self-check simulation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// Creates a board with the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Returns the piece at the given position, or `None` if the square is
    /// empty or off-board.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_on_board() {
            return None;
        }
        self.grid[(pos.row - 1) as usize][(pos.col - 1) as usize]
    }

    /// Places a piece (or clears a square) at the given position.
    ///
    /// Unconditional overwrite, no legality check. Off-board positions are
    /// ignored.
    #[inline]
    pub fn place(&mut self, pos: Position, piece: Option<Piece>) {
        if !pos.is_on_board() {
            return;
        }
        self.grid[(pos.row - 1) as usize][(pos.col - 1) as usize] = piece;
    }

    /// Clears the grid and populates the standard starting position.
    pub fn reset(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        self.grid = [[None; 8]; 8];
        for (i, &kind) in BACK_RANK.iter().enumerate() {
            let col = i as i8 + 1;
            self.place(Position::new(1, col), Some(Piece::white(kind)));
            self.place(Position::new(2, col), Some(Piece::white(PieceKind::Pawn)));
            self.place(Position::new(7, col), Some(Piece::black(PieceKind::Pawn)));
            self.place(Position::new(8, col), Some(Piece::black(kind)));
        }
    }

    /// Iterates over all occupied squares.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (1..=8).flat_map(move |row| {
            (1..=8).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get(pos).map(|piece| (pos, piece))
            })
        })
    }

    /// Iterates over all squares occupied by the given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the square holding the given color's king, if present.
    pub fn king_square(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.to_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8).rev() {
            write!(f, "{} ", row)?;
            for col in 1..=8 {
                match self.get(Position::new(row, col)) {
                    Some(piece) => write!(f, "{} ", piece.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_setup() {
        let board = Board::standard();
        assert_eq!(
            board.get(Position::new(1, 5)),
            Some(Piece::white(PieceKind::King))
        );
        assert_eq!(
            board.get(Position::new(8, 4)),
            Some(Piece::black(PieceKind::Queen))
        );
        assert_eq!(
            board.get(Position::new(1, 1)),
            Some(Piece::white(PieceKind::Rook))
        );
        for col in 1..=8 {
            assert_eq!(
                board.get(Position::new(2, col)),
                Some(Piece::white(PieceKind::Pawn))
            );
            assert_eq!(
                board.get(Position::new(7, col)),
                Some(Piece::black(PieceKind::Pawn))
            );
        }
        for row in 3..=6 {
            for col in 1..=8 {
                assert_eq!(board.get(Position::new(row, col)), None);
            }
        }
    }

    #[test]
    fn off_board_access() {
        let mut board = Board::standard();
        assert_eq!(board.get(Position::new(0, 5)), None);
        assert_eq!(board.get(Position::new(9, 9)), None);
        assert_eq!(board.get(Position::new(-1, 3)), None);

        // Off-board writes are ignored, board unchanged.
        let before = board.clone();
        board.place(Position::new(0, 0), Some(Piece::white(PieceKind::Queen)));
        assert_eq!(board, before);
    }

    #[test]
    fn place_overwrites() {
        let mut board = Board::empty();
        let e4 = Position::new(4, 5);
        board.place(e4, Some(Piece::white(PieceKind::Knight)));
        assert_eq!(board.get(e4), Some(Piece::white(PieceKind::Knight)));
        board.place(e4, Some(Piece::black(PieceKind::Queen)));
        assert_eq!(board.get(e4), Some(Piece::black(PieceKind::Queen)));
        board.place(e4, None);
        assert_eq!(board.get(e4), None);
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::standard();
        let mut copy = original.clone();
        copy.place(Position::new(4, 5), Some(Piece::black(PieceKind::Queen)));
        copy.place(Position::new(1, 5), None);

        for row in 1..=8 {
            for col in 1..=8 {
                let pos = Position::new(row, col);
                assert_eq!(original.get(pos), Board::standard().get(pos));
            }
        }
    }

    #[test]
    fn king_square() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::White), Some(Position::new(1, 5)));
        assert_eq!(board.king_square(Color::Black), Some(Position::new(8, 5)));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn pieces_of_counts() {
        let board = Board::standard();
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn serde_round_trip() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
