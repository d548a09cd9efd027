//! Core types for the chess referee.
//!
//! This crate provides the value types shared by the rules engine and any
//! hosting layer:
//! - [`Color`], [`PieceKind`], and [`Piece`] for piece representation
//! - [`Position`] for 1-indexed board coordinates
//! - [`Move`] for move representation (origin, destination, promotion)
//! - [`Board`], a mailbox 8x8 grid, with FEN piece-placement parsing

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod position;

pub use board::Board;
pub use color::Color;
pub use fen::FenError;
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use position::Position;
