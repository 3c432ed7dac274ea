//! Move validation and generation.
//!
//! Legality is decided one (source, destination) pair at a time:
//! 1. the source must hold a piece of the side being asked about
//! 2. the destination must not hold a piece of that same side
//! 3. the piece's geometry must allow the displacement, including the
//!    special pawn and king moves
//! 4. applying the move to a scratch copy of the board must not leave the
//!    mover's king attacked
//!
//! Generation simply runs that check over every pair of squares.

pub mod attacks;
pub mod perft;

use crate::board::castling_rook_squares;
use crate::rules::PromotionPolicy;
use crate::Position;
use attacks::{attacks, is_king_attacked, path_clear};
use chess_core::{Color, Move, MoveFlag, Piece, PieceKind, Square};
use thiserror::Error;

pub use attacks::is_square_attacked;

/// Why a requested move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {0} belongs to the side not on move")]
    NotYourPiece(Square),

    #[error("{0} is occupied by the mover's own piece")]
    OwnPieceOnDestination(Square),

    #[error("{piece} cannot move from {from} to {to}")]
    Unreachable {
        piece: Piece,
        from: Square,
        to: Square,
    },

    #[error("castling from {0} is not allowed")]
    CastlingNotAllowed(Square),

    #[error("a pawn cannot promote to {0}")]
    InvalidPromotion(PieceKind),

    #[error("move would leave the {0} king in check")]
    KingInCheck(Color),
}

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list holds `m`.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Builds the legal move from `from` to `to` for the side to move.
///
/// `promotion` is the piece a pawn reaching the last rank turns into; it is
/// ignored for every other move.
pub fn legal_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Result<Move, IllegalMove> {
    legal_move_for(position, position.side_to_move, from, to, promotion)
}

/// Like [`legal_move`], but for an arbitrary side.
pub fn legal_move_for(
    position: &Position,
    side: Color,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Result<Move, IllegalMove> {
    let m = candidate(position, side, from, to, promotion)?;
    let scratch = position.board.with_move(m);
    if is_king_attacked(&scratch, side) {
        return Err(IllegalMove::KingInCheck(side));
    }
    Ok(m)
}

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position, policy: PromotionPolicy) -> MoveList {
    let mut moves = MoveList::new();
    let side = position.side_to_move;

    for (from, _) in position.board.pieces_of(side) {
        for to in Square::all() {
            let Ok(m) = legal_move_for(position, side, from, to, PieceKind::Queen) else {
                continue;
            };
            moves.push(m);
            if m.flag.is_promotion() {
                // The promoted piece's kind never changes whether our own king is safe
                for &kind in &policy.allowed()[1..] {
                    if let Some(flag) = MoveFlag::promotion(kind) {
                        moves.push(Move { flag, ..m });
                    }
                }
            }
        }
    }

    moves
}

/// Returns true if `side` has at least one legal move.
pub fn has_any_legal_move(position: &Position, side: Color) -> bool {
    position.board.pieces_of(side).any(|(from, _)| {
        Square::all()
            .any(|to| legal_move_for(position, side, from, to, PieceKind::Queen).is_ok())
    })
}

/// Returns true if `side`'s king is attacked in the position.
pub fn is_in_check(position: &Position, side: Color) -> bool {
    is_king_attacked(&position.board, side)
}

/// Makes a move on a copy of the position.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut next = position.clone();
    next.apply(m);
    next
}

/// Checks everything except the safety of the mover's own king.
fn candidate(
    position: &Position,
    side: Color,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Result<Move, IllegalMove> {
    let board = &position.board;
    let piece = board.get(from).ok_or(IllegalMove::EmptySquare(from))?;
    if piece.color != side {
        return Err(IllegalMove::NotYourPiece(from));
    }
    if board.get(to).is_some_and(|target| target.color == side) {
        return Err(IllegalMove::OwnPieceOnDestination(to));
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move(position, piece, from, to, promotion),
        PieceKind::King if from.row() == to.row() && from.col().abs_diff(to.col()) == 2 => {
            castling_move(position, piece, from, to)
        }
        _ if attacks(board, piece, from, to) => Ok(Move::normal(from, to, piece)),
        _ => Err(IllegalMove::Unreachable { piece, from, to }),
    }
}

fn pawn_move(
    position: &Position,
    piece: Piece,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Result<Move, IllegalMove> {
    let board = &position.board;
    let color = piece.color;
    let dir = color.pawn_direction();
    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    let flag = if d_col == 0 && d_row == dir && board.is_empty(to) {
        MoveFlag::Normal
    } else if d_col == 0
        && d_row == 2 * dir
        && from.row() == color.pawn_start_row()
        && board.is_empty(to)
        && from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid))
    {
        MoveFlag::DoublePush
    } else if d_col.abs() == 1 && d_row == dir && !board.is_empty(to) {
        MoveFlag::Normal
    } else if d_col.abs() == 1 && d_row == dir && en_passant_available(position, color, from, to)
    {
        MoveFlag::EnPassant
    } else {
        return Err(IllegalMove::Unreachable { piece, from, to });
    };

    let flag = if to.row() == color.promotion_row() {
        MoveFlag::promotion(promotion).ok_or(IllegalMove::InvalidPromotion(promotion))?
    } else {
        flag
    };

    Ok(Move::new(from, to, piece, flag))
}

/// En passant needs the opponent's very last move to be a double push that
/// landed right beside our pawn, on the file we are capturing towards.
fn en_passant_available(position: &Position, color: Color, from: Square, to: Square) -> bool {
    let their_pawn = Piece::new(color.opposite(), PieceKind::Pawn);
    from.row() == color.en_passant_row()
        && position.last_move().is_some_and(|last| {
            last.piece == their_pawn
                && last.is_double_push()
                && last.to.row() == from.row()
                && last.to.col() == to.col()
        })
}

fn castling_move(
    position: &Position,
    king: Piece,
    from: Square,
    to: Square,
) -> Result<Move, IllegalMove> {
    let board = &position.board;
    let color = king.color;
    let kingside = to.col() > from.col();
    let flag = if kingside {
        MoveFlag::CastleKingside
    } else {
        MoveFlag::CastleQueenside
    };
    let refused = IllegalMove::CastlingNotAllowed(from);

    let rights = position.castling_rights();
    let has_right = if kingside {
        rights.can_castle_kingside(color)
    } else {
        rights.can_castle_queenside(color)
    };
    if !has_right || from.row() != color.home_row() || from.col() != 4 {
        return Err(refused);
    }

    let (rook_from, _) = castling_rook_squares(color, flag);
    if board.get(rook_from) != Some(Piece::new(color, PieceKind::Rook))
        || !path_clear(board, from, rook_from)
        || is_king_attacked(board, color)
    {
        return Err(refused);
    }

    // Neither the square the king crosses nor the one it lands on may be attacked
    let step = if kingside { 1 } else { -1 };
    for distance in 1..=2 {
        let transit = from.offset(0, step * distance).ok_or(refused)?;
        let mut scratch = *board;
        scratch.take(from);
        scratch.set(transit, Some(king));
        if is_king_attacked(&scratch, color) {
            return Err(refused);
        }
    }

    Ok(Move::new(from, to, king, flag))
}
