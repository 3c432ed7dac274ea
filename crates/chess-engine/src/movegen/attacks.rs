//! Movement geometry for every piece kind and attack detection.
//!
//! These predicates only look at the shape of a displacement and, for
//! sliders, whether the squares in between are empty. Whose turn it is,
//! what stands on the destination and king safety are decided elsewhere.

use crate::Board;
use chess_core::{Color, Piece, PieceKind, Square};

/// Row and column displacement from `from` to `to`.
#[inline]
fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// Walks unit steps along the line joining the two squares, so it is only
/// meaningful for straight or diagonal displacements.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    let step = (d_row.signum(), d_col.signum());
    let mut current = from.offset(step.0, step.1);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step.0, step.1);
    }
    true
}

/// Rook geometry: along a row or column with a clear path.
pub fn rook_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    from != to && (d_row == 0 || d_col == 0) && path_clear(board, from, to)
}

/// Bishop geometry: along a diagonal with a clear path.
pub fn bishop_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    d_row != 0 && d_row.abs() == d_col.abs() && path_clear(board, from, to)
}

/// Queen geometry: rook or bishop.
pub fn queen_reaches(board: &Board, from: Square, to: Square) -> bool {
    rook_reaches(board, from, to) || bishop_reaches(board, from, to)
}

/// Knight geometry: an L-shape. Knights jump, so nothing is in the way.
pub fn knight_reaches(from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}

/// King geometry for ordinary steps: Chebyshev distance of exactly one.
pub fn king_reaches(from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    from != to && d_row.abs() <= 1 && d_col.abs() <= 1
}

/// Pawn capture geometry: one square diagonally forward.
pub fn pawn_attacks(color: Color, from: Square, to: Square) -> bool {
    let (d_row, d_col) = deltas(from, to);
    d_row == color.pawn_direction() && d_col.abs() == 1
}

/// Returns true if `piece` standing on `from` attacks `to`.
///
/// Pawns attack diagonally only; kings attack adjacent squares only
/// (castling never captures).
pub fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from, to),
        PieceKind::Knight => knight_reaches(from, to),
        PieceKind::Bishop => bishop_reaches(board, from, to),
        PieceKind::Rook => rook_reaches(board, from, to),
        PieceKind::Queen => queen_reaches(board, from, to),
        PieceKind::King => king_reaches(from, to),
    }
}

/// Returns true if any piece of color `by` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks(board, piece, from, sq))
}

/// Returns true if `color`'s king is attacked by any opposing piece.
///
/// # Panics
///
/// Panics if `color` has no king on the board. Every legal move path keeps
/// both kings in place, so a missing king means a caller bypassed move
/// validation and any answer would be wrong.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let king = board
        .king_square(color)
        .unwrap_or_else(|| panic!("board invariant violated: no {} king\n{}", color, board));
    is_square_attacked(board, king, color.opposite())
}
