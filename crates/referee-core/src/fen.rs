//! FEN piece-placement parsing and serialization for [`Board`].
//!
//! Only the first FEN field is handled here. Side to move, castling rights,
//! and the en passant square are game state, not board state, and the clock
//! fields belong to draw rules the engine does not implement.

use crate::{Board, Piece, Position};
use thiserror::Error;

/// Errors that can occur when parsing a FEN piece-placement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 8 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid character '{0}' in rank {1}")]
    InvalidCharacter(char, i8),

    #[error("rank {0} has {1} squares, expected 8")]
    InvalidRankWidth(i8, u32),
}

impl Board {
    /// The piece-placement field of the standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses a FEN piece-placement string into a board.
    ///
    /// Ranks are listed 8 down to 1, separated by `/`; digits encode runs of
    /// empty squares.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (i, rank) in ranks.iter().enumerate() {
            let row = 8 - i as i8;
            let mut col: u32 = 1;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(FenError::InvalidCharacter(c, row));
                    }
                    col += run;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if col <= 8 {
                        board.place(Position::new(row, col as i8), Some(piece));
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidCharacter(c, row));
                }
            }
            // Either direction of mismatch reports the actual square count.
            if col != 9 {
                return Err(FenError::InvalidRankWidth(row, col - 1));
            }
        }

        Ok(board)
    }

    /// Returns the FEN piece-placement string for this board.
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for row in (1..=8).rev() {
            let mut empty_run = 0;
            for col in 1..=8 {
                match self.get(Position::new(row, col)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            out.push(char::from_digit(empty_run, 10).unwrap());
                            empty_run = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push(char::from_digit(empty_run, 10).unwrap());
            }
            if row > 1 {
                out.push('/');
            }
        }
        out
    }
}
