//! Game orchestration: legality filtering, special moves, terminal states.

use crate::movegen::{is_square_attacked, piece_moves};
use referee_core::{Board, Color, Move, Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`Game::make_move`].
///
/// Every variant is recoverable: the game state is untouched and the caller
/// can report the rejection upstream and resubmit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {at}")]
    NoPiece { at: Position },

    #[error("it is not {piece}'s turn")]
    WrongTurn { piece: Color },

    #[error("illegal move {0}")]
    Illegal(Move),
}

/// Per-side castling availability.
///
/// A right disappears permanently once the corresponding king or rook home
/// square is vacated; [`Game::set_board`] restores all four. Stored as four
/// flags in a byte, with a single transition function so every mutation site
/// shares the home-square-to-right mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// All four rights available.
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// No rights available.
    pub const NONE: CastlingRights = CastlingRights(0);

    /// Returns true if the given side may still castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side may still castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Clears the rights lost when `square` is vacated.
    ///
    /// Leaving a king home square forfeits both of that side's rights;
    /// leaving a rook home corner forfeits that corner's right. Any other
    /// square changes nothing.
    pub fn vacate(&mut self, square: Position) {
        if square == Position::WHITE_KING_HOME {
            self.0 &= !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE);
        } else if square == Position::WHITE_ROOK_KINGSIDE {
            self.0 &= !Self::WHITE_KINGSIDE;
        } else if square == Position::WHITE_ROOK_QUEENSIDE {
            self.0 &= !Self::WHITE_QUEENSIDE;
        } else if square == Position::BLACK_KING_HOME {
            self.0 &= !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE);
        } else if square == Position::BLACK_ROOK_KINGSIDE {
            self.0 &= !Self::BLACK_KINGSIDE;
        } else if square == Position::BLACK_ROOK_QUEENSIDE {
            self.0 &= !Self::BLACK_QUEENSIDE;
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

/// A chess game: one owned board, the side to move, castling rights, and
/// the last move played (the single-slot history en passant needs).
///
/// The engine never locks a finished game. Checkmate and stalemate are
/// observable predicates; callers police match termination themselves.
///
/// Not internally synchronized: hosts embedding a `Game` in a concurrent
/// context must serialize access per instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    last_move: Option<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game at the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            turn: Color::White,
            castling: CastlingRights::ALL,
            last_move: None,
        }
    }

    /// Restores a game from previously captured state.
    ///
    /// Hosts that persist matches rebuild the game from the same four pieces
    /// of state the accessors expose.
    pub fn from_parts(
        board: Board,
        turn: Color,
        castling: CastlingRights,
        last_move: Option<Move>,
    ) -> Self {
        Game {
            board,
            turn,
            castling,
            last_move,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets the side to move.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// Returns the current castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the most recently executed move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Replaces the board wholesale.
    ///
    /// All derived state resets: castling rights come back in full and the
    /// last move is cleared. The side to move is left alone.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.castling = CastlingRights::ALL;
        self.last_move = None;
    }

    /// Returns the legal moves for the piece at `pos`, or `None` if the
    /// square is empty.
    ///
    /// Pseudo-legal moves are filtered by simulating each one on a scratch
    /// copy of the board and rejecting those that leave the mover's own king
    /// attacked. Kings gain eligible castling moves and pawns an eligible
    /// en passant move on top of that.
    pub fn legal_moves(&self, pos: Position) -> Option<Vec<Move>> {
        let piece = self.board.get(pos)?;

        let mut legal: Vec<Move> = piece_moves(&self.board, pos)
            .into_iter()
            .filter(|&m| !self.leaves_king_in_check(m, piece.color))
            .collect();

        if piece.kind == PieceKind::King {
            self.add_castling_moves(pos, piece.color, &mut legal);
        }
        if piece.kind == PieceKind::Pawn {
            if let Some(m) = self.en_passant_move(pos, piece.color) {
                legal.push(m);
            }
        }

        Some(legal)
    }

    /// Validates and executes a move.
    ///
    /// All state updates land together; a rejected move changes nothing.
    pub fn make_move(&mut self, m: Move) -> Result<(), MoveError> {
        let piece = self
            .board
            .get(m.from)
            .ok_or(MoveError::NoPiece { at: m.from })?;
        if piece.color != self.turn {
            return Err(MoveError::WrongTurn { piece: piece.color });
        }
        let is_legal = self
            .legal_moves(m.from)
            .is_some_and(|moves| moves.contains(&m));
        if !is_legal {
            return Err(MoveError::Illegal(m));
        }

        self.castling.vacate(m.from);
        apply_to_board(&mut self.board, m);
        self.last_move = Some(m);
        self.turn = self.turn.opposite();
        Ok(())
    }

    /// Returns true if the given side's king is attacked.
    ///
    /// False when the king is absent; a well-formed game always has one king
    /// per side, so this is a query result, not a fault.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.board.king_square(color) {
            Some(king) => is_square_attacked(&self.board, king, color.opposite()),
            None => false,
        }
    }

    /// Returns true if the given side is checkmated: in check with no legal
    /// move anywhere.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Returns true if the given side is stalemated: not in check but with
    /// no legal move anywhere.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    fn has_any_legal_move(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(pos, _)| {
            self.legal_moves(pos)
                .is_some_and(|moves| !moves.is_empty())
        })
    }

    /// Simulates `m` on an owned scratch copy of the board and reports
    /// whether the mover's king ends up attacked. The copy is dropped
    /// regardless of outcome; the live board is never touched.
    fn leaves_king_in_check(&self, m: Move, mover: Color) -> bool {
        let mut scratch = self.board.clone();
        apply_to_board(&mut scratch, m);
        match scratch.king_square(mover) {
            Some(king) => is_square_attacked(&scratch, king, mover.opposite()),
            None => false,
        }
    }

    /// Appends the eligible castling moves for a king standing on `king_pos`.
    ///
    /// Castling is encoded as the two-file king move; the rook hop happens
    /// at execution. Requirements per side: the right is intact, the king is
    /// on its home square and not in check, the rook still sits on its home
    /// corner, the squares between are empty, and the squares the king
    /// crosses are unattacked.
    fn add_castling_moves(&self, king_pos: Position, color: Color, moves: &mut Vec<Move>) {
        let row = color.home_rank();
        if king_pos != Position::new(row, 5) {
            return;
        }
        if !self.castling.kingside(color) && !self.castling.queenside(color) {
            return;
        }
        if self.is_in_check(color) {
            return;
        }
        let opponent = color.opposite();
        let rook = Piece::new(color, PieceKind::Rook);

        if self.castling.kingside(color)
            && self.board.get(Position::new(row, 8)) == Some(rook)
            && self.board.get(Position::new(row, 6)).is_none()
            && self.board.get(Position::new(row, 7)).is_none()
            && !is_square_attacked(&self.board, Position::new(row, 6), opponent)
            && !is_square_attacked(&self.board, Position::new(row, 7), opponent)
        {
            moves.push(Move::new(king_pos, Position::new(row, 7)));
        }

        if self.castling.queenside(color)
            && self.board.get(Position::new(row, 1)) == Some(rook)
            && self.board.get(Position::new(row, 2)).is_none()
            && self.board.get(Position::new(row, 3)).is_none()
            && self.board.get(Position::new(row, 4)).is_none()
            && !is_square_attacked(&self.board, Position::new(row, 4), opponent)
            && !is_square_attacked(&self.board, Position::new(row, 3), opponent)
        {
            moves.push(Move::new(king_pos, Position::new(row, 3)));
        }
    }

    /// Returns the eligible en passant capture for the pawn at `pawn_pos`,
    /// if the immediately preceding move set one up.
    fn en_passant_move(&self, pawn_pos: Position, color: Color) -> Option<Move> {
        let last = self.last_move?;

        // Structurally possible only from rank 5 (White) or rank 4 (Black).
        let capture_rank = match color {
            Color::White => 5,
            Color::Black => 4,
        };
        if pawn_pos.row != capture_rank {
            return None;
        }

        let moved = self.board.get(last.to)?;
        if moved.kind != PieceKind::Pawn || moved.color == color {
            return None;
        }
        if (last.from.row - last.to.row).abs() != 2 {
            return None;
        }
        if last.to.row != pawn_pos.row || (last.to.col - pawn_pos.col).abs() != 1 {
            return None;
        }

        let to = Position::new(pawn_pos.row + color.pawn_direction(), last.to.col);
        let m = Move::new(pawn_pos, to);
        if self.leaves_king_in_check(m, color) {
            return None;
        }
        Some(m)
    }
}

/// Applies a validated (or simulated) move directly to a board.
///
/// Handles the three board-level side effects: promotion replaces the pawn
/// with a fresh piece, an en passant capture (pawn moving diagonally onto an
/// empty square) removes the pawn behind the destination, and a two-file
/// king move hops the matching rook.
fn apply_to_board(board: &mut Board, m: Move) {
    let Some(piece) = board.get(m.from) else {
        return;
    };

    let is_en_passant = piece.kind == PieceKind::Pawn
        && m.from.col != m.to.col
        && board.get(m.to).is_none();

    board.place(m.from, None);
    let placed = match m.promotion {
        Some(kind) => Piece::new(piece.color, kind),
        None => piece,
    };
    board.place(m.to, Some(placed));

    if is_en_passant {
        board.place(Position::new(m.from.row, m.to.col), None);
    }

    if piece.kind == PieceKind::King {
        match m.to.col - m.from.col {
            2 => {
                let rook = board.get(Position::new(m.from.row, 8));
                board.place(Position::new(m.from.row, 6), rook);
                board.place(Position::new(m.from.row, 8), None);
            }
            -2 => {
                let rook = board.get(Position::new(m.from.row, 1));
                board.place(Position::new(m.from.row, 4), rook);
                board.place(Position::new(m.from.row, 1), None);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    #[test]
    fn new_game_state() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn legal_moves_on_empty_square_is_none() {
        let game = Game::new();
        assert_eq!(game.legal_moves(pos("e4")), None);
        assert_eq!(game.legal_moves(Position::new(0, 0)), None);
    }

    #[test]
    fn blocked_piece_has_empty_legal_set() {
        let game = Game::new();
        // The a1 rook is boxed in: occupied square, but zero moves.
        assert_eq!(game.legal_moves(pos("a1")), Some(vec![]));
    }

    #[test]
    fn make_move_flips_turn_and_records_last_move() {
        let mut game = Game::new();
        game.make_move(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.last_move(), Some(mv("e2e4")));
        assert_eq!(game.board().get(pos("e2")), None);
        assert_eq!(
            game.board().get(pos("e4")),
            Some(Piece::white(PieceKind::Pawn))
        );
    }

    #[test]
    fn rejects_empty_origin() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.make_move(mv("e4e5")),
            Err(MoveError::NoPiece { at: pos("e4") })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn rejects_wrong_turn() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.make_move(mv("e7e5")),
            Err(MoveError::WrongTurn {
                piece: Color::Black
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn rejects_illegal_move() {
        let mut game = Game::new();
        let before = game.clone();
        let m = mv("e2e5");
        assert_eq!(game.make_move(m), Err(MoveError::Illegal(m)));
        assert_eq!(game, before);
    }

    #[test]
    fn legal_moves_is_idempotent() {
        let game = Game::new();
        assert_eq!(game.legal_moves(pos("g1")), game.legal_moves(pos("g1")));
        assert_eq!(game.legal_moves(pos("e2")), game.legal_moves(pos("e2")));
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        let mut game = Game::new();
        let board = Board::from_placement("4k3/4r3/8/8/8/8/4R3/4K3").unwrap();
        game.set_board(board);

        // The e2 rook is pinned to the e-file: sideways moves vanish.
        let moves = game.legal_moves(pos("e2")).unwrap();
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.to.col == 5));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut game = Game::new();
        let board = Board::from_placement("4k3/8/8/8/8/8/r7/4K3").unwrap();
        game.set_board(board);

        let moves = game.legal_moves(pos("e1")).unwrap();
        // Rank 2 is covered by the rook.
        assert!(moves.iter().all(|m| m.to.row != 2 || m.to == pos("a2")));
        assert!(moves.contains(&mv("e1d1")));
    }

    #[test]
    fn set_board_resets_history_but_not_turn() {
        let mut game = Game::new();
        game.make_move(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);

        game.set_board(Board::standard());
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn from_parts_round_trip() {
        let mut game = Game::new();
        game.make_move(mv("e2e4")).unwrap();
        game.make_move(mv("e7e5")).unwrap();

        let restored = Game::from_parts(
            game.board().clone(),
            game.turn(),
            game.castling_rights(),
            game.last_move(),
        );
        assert_eq!(restored, game);
        assert_eq!(
            restored.legal_moves(pos("g1")),
            game.legal_moves(pos("g1"))
        );
    }

    #[test]
    fn vacate_maps_home_squares_to_rights() {
        let mut rights = CastlingRights::ALL;
        rights.vacate(pos("h1"));
        assert!(!rights.kingside(Color::White));
        assert!(rights.queenside(Color::White));
        assert!(rights.kingside(Color::Black));

        rights.vacate(pos("e8"));
        assert!(!rights.kingside(Color::Black));
        assert!(!rights.queenside(Color::Black));
        assert!(rights.queenside(Color::White));

        // Non-home squares change nothing.
        let mut rights = CastlingRights::ALL;
        rights.vacate(pos("e4"));
        assert_eq!(rights, CastlingRights::ALL);
    }

    #[test]
    fn rights_serde_round_trip() {
        let mut rights = CastlingRights::ALL;
        rights.vacate(pos("a1"));
        let json = serde_json::to_string(&rights).unwrap();
        let back: CastlingRights = serde_json::from_str(&json).unwrap();
        assert_eq!(rights, back);
        assert_eq!(
            serde_json::from_str::<CastlingRights>(
                &serde_json::to_string(&CastlingRights::NONE).unwrap()
            )
            .unwrap(),
            CastlingRights::NONE
        );
    }

    #[test]
    fn move_error_display() {
        assert_eq!(
            MoveError::NoPiece { at: pos("e4") }.to_string(),
            "no piece at e4"
        );
        assert_eq!(
            MoveError::WrongTurn {
                piece: Color::Black
            }
            .to_string(),
            "it is not Black's turn"
        );
        assert_eq!(
            MoveError::Illegal(mv("e2e5")).to_string(),
            "illegal move e2e5"
        );
    }

    #[test]
    fn check_detection() {
        let mut game = Game::new();
        let board = Board::from_placement("4k3/8/8/8/8/8/4q3/4K3").unwrap();
        game.set_board(board);
        assert!(game.is_in_check(Color::White));
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn absent_king_is_not_in_check() {
        let mut game = Game::new();
        game.set_board(Board::empty());
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_in_check(Color::Black));
    }
}
