//! Move representation.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture (no special action).
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion flag for the given kind, if a pawn may become one.
    pub const fn promotion(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A chess move as recorded in game history.
///
/// Besides the two squares, a move remembers which piece made it so that
/// later castling and en passant checks can be answered from history alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, flag: MoveFlag) -> Self {
        Move {
            from,
            to,
            piece,
            flag,
        }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, piece, MoveFlag::Normal)
    }

    /// Returns the color of the side that made this move.
    #[inline]
    pub const fn color(self) -> Color {
        self.piece.color
    }

    /// Returns true if a pawn advanced two rows with this move.
    #[inline]
    pub const fn is_double_push(self) -> bool {
        matches!(self.piece.kind, PieceKind::Pawn) && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.flag.promotion_piece() {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Placeholder entry for fixed-capacity move buffers; never a legal move.
    pub const NULL: Move = Move::new(
        Square::A8,
        Square::A8,
        Piece::new(Color::White, PieceKind::Pawn),
        MoveFlag::Normal,
    );
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.piece.to_fen_char(), self.to_uci())
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

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);

    #[test]
    fn move_uci() {
        let m = Move::new(sq("e2"), sq("e4"), WHITE_PAWN, MoveFlag::DoublePush);
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::new(sq("e7"), sq("e8"), WHITE_PAWN, MoveFlag::PromoteQueen);
        assert_eq!(promo.to_uci(), "e7e8q");

        let under = Move::new(sq("a2"), sq("a1"), WHITE_PAWN, MoveFlag::PromoteKnight);
        assert_eq!(under.to_uci(), "a2a1n");
    }

    #[test]
    fn double_push_detection() {
        assert!(Move::normal(sq("d7"), sq("d5"), Piece::new(Color::Black, PieceKind::Pawn))
            .is_double_push());
        assert!(!Move::normal(sq("d2"), sq("d3"), WHITE_PAWN).is_double_push());
        assert!(!Move::normal(
            sq("a1"),
            sq("a3"),
            Piece::new(Color::White, PieceKind::Rook)
        )
        .is_double_push());
    }

    #[test]
    fn move_flag_promotion_piece() {
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        assert_eq!(
            MoveFlag::PromoteKnight.promotion_piece(),
            Some(PieceKind::Knight)
        );
        assert_eq!(
            MoveFlag::PromoteQueen.promotion_piece(),
            Some(PieceKind::Queen)
        );
        for kind in PieceKind::PROMOTIONS {
            let flag = MoveFlag::promotion(kind).unwrap();
            assert!(flag.is_promotion());
            assert_eq!(flag.promotion_piece(), Some(kind));
        }
        assert_eq!(MoveFlag::promotion(PieceKind::King), None);
        assert_eq!(MoveFlag::promotion(PieceKind::Pawn), None);
    }

    #[test]
    fn move_flag_is_castling() {
        assert!(!MoveFlag::Normal.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::EnPassant.is_castling());
        assert!(!MoveFlag::PromoteQueen.is_castling());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::normal(sq("g1"), sq("f3"), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(format!("{:?}", m), "Move(N g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
