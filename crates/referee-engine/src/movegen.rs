//! Pseudo-legal move generation.
//!
//! Everything here answers from the instantaneous board shape alone: moves
//! that expose the mover's own king, castling, and en passant are the
//! orchestrator's business since they depend on simulation or history.

use referee_core::{Board, Color, Move, PieceKind, Position};

/// Orthogonal ray directions (rook).
const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions (bishop).
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight ray directions (queen, king).
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The eight L-shaped knight offsets.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Generates the pseudo-legal moves for the piece at `from`.
///
/// Returns an empty vector if the square is empty or off-board. The result
/// ignores exposure-to-check and never contains castling or en passant.
pub fn piece_moves(board: &Board, from: Position) -> Vec<Move> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::King => step_moves(board, from, piece.color, &ALL_DIRECTIONS),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_JUMPS),
        PieceKind::Rook => sliding_moves(board, from, piece.color, &ORTHOGONAL),
        PieceKind::Bishop => sliding_moves(board, from, piece.color, &DIAGONAL),
        PieceKind::Queen => sliding_moves(board, from, piece.color, &ALL_DIRECTIONS),
        PieceKind::Pawn => pawn_moves(board, from, piece.color),
    }
}

/// Fixed-offset movers (king, knight): each offset yields a move when the
/// target is on-board and not friendly-occupied.
fn step_moves(board: &Board, from: Position, mover: Color, offsets: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dr, dc) in offsets {
        let to = from.offset(dr, dc);
        if !to.is_on_board() {
            continue;
        }
        match board.get(to) {
            Some(piece) if piece.color == mover => {}
            _ => moves.push(Move::new(from, to)),
        }
    }
    moves
}

/// Sliding movers (rook, bishop, queen): step along each ray until leaving
/// the board, hitting a friendly piece (stop, exclude), or hitting an enemy
/// piece (include the capture, then stop).
fn sliding_moves(board: &Board, from: Position, mover: Color, rays: &[(i8, i8)]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(dr, dc) in rays {
        let mut to = from.offset(dr, dc);
        while to.is_on_board() {
            match board.get(to) {
                None => moves.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color != mover {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
    moves
}

fn pawn_moves(board: &Board, from: Position, mover: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let dir = mover.pawn_direction();

    let one = from.offset(dir, 0);
    if one.is_on_board() && board.get(one).is_none() {
        push_pawn_move(&mut moves, from, one, mover);

        let two = from.offset(2 * dir, 0);
        if from.row == mover.pawn_start_rank() && board.get(two).is_none() {
            // The double push can never land on the promotion rank.
            moves.push(Move::new(from, two));
        }
    }

    for dc in [-1, 1] {
        let to = from.offset(dir, dc);
        if !to.is_on_board() {
            continue;
        }
        if let Some(piece) = board.get(to) {
            if piece.color != mover {
                push_pawn_move(&mut moves, from, to, mover);
            }
        }
    }

    moves
}

/// Pushes a pawn move, expanding it into the four promotion variants when it
/// lands on the promotion rank. A pawn reaching the last rank has no
/// non-promoting move.
fn push_pawn_move(moves: &mut Vec<Move>, from: Position, to: Position, mover: Color) {
    if to.row == mover.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Returns true if any piece of `by` attacks `square`.
///
/// Pawns are special-cased: a pawn attacks its two diagonal-forward squares
/// whether or not they are occupied, which matters when probing the empty
/// squares a castling king would cross. Every other kind attacks exactly
/// the squares its pseudo-legal moves reach.
pub fn is_square_attacked(board: &Board, square: Position, by: Color) -> bool {
    board.pieces_of(by).any(|(pos, piece)| {
        if piece.kind == PieceKind::Pawn {
            let dir = by.pawn_direction();
            pos.offset(dir, -1) == square || pos.offset(dir, 1) == square
        } else {
            piece_moves(board, pos).iter().any(|m| m.to == square)
        }
    })
}
