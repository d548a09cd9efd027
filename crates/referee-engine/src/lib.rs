//! Chess rules engine.
//!
//! This crate is the authoritative arbiter of chess legality. It knows
//! nothing about networking, persistence, or users: a hosting layer holds a
//! [`Game`] per match, submits moves, and reads the resulting state.
//!
//! - [`movegen`] generates pseudo-legal moves per piece kind and answers
//!   attack queries against a [`Board`](referee_core::Board) snapshot.
//! - [`Game`] owns a board, tracks the side to move, castling rights, and
//!   the last move played, and turns pseudo-legal moves into legal ones by
//!   simulating each candidate on a scratch copy of the board.
//!
//! # Example
//!
//! ```
//! use referee_core::{Move, Position};
//! use referee_engine::Game;
//!
//! let mut game = Game::new();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//! game.make_move(Move::new(e2, e4)).unwrap();
//! assert_eq!(game.turn(), referee_core::Color::Black);
//! ```

mod game;
pub mod movegen;

pub use game::{CastlingRights, Game, MoveError};
pub use movegen::{is_square_attacked, piece_moves};
