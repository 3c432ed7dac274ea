//! Standard chess rules implementation.

use super::{PromotionPolicy, RuleSet};
use crate::movegen::{self, IllegalMove};
use crate::{MoveList, Position};
use chess_core::{Color, Move, PieceKind, Square};

/// Standard chess rules.
///
/// - Standard piece movement
/// - Castling (kingside and queenside), answered from move history
/// - En passant, on the half-move right after the double push only
/// - Pawn promotion according to the configured [`PromotionPolicy`]
/// - Check, checkmate, and stalemate detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardChess {
    pub promotion: PromotionPolicy,
}

impl StandardChess {
    /// Creates the rule set with the given promotion policy.
    pub const fn new(promotion: PromotionPolicy) -> Self {
        StandardChess { promotion }
    }
}

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &Position) -> MoveList {
        movegen::generate_moves(position, self.promotion)
    }

    fn legal_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, IllegalMove> {
        let kind = self
            .promotion
            .resolve(promotion)
            .ok_or(IllegalMove::InvalidPromotion(promotion.unwrap_or(PieceKind::Pawn)))?;
        movegen::legal_move(position, from, to, kind)
    }

    fn apply(&self, position: &mut Position, m: Move) {
        position.apply(m);
    }

    fn has_any_legal_move(&self, position: &Position, side: Color) -> bool {
        movegen::has_any_legal_move(position, side)
    }

    fn is_in_check(&self, position: &Position, side: Color) -> bool {
        movegen::is_in_check(position, side)
    }
}
