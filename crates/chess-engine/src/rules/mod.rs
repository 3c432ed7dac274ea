//! Rule set abstraction and game status classification.
//!
//! This module provides the [`RuleSet`] trait. The [`Game`](crate::Game)
//! controller never decides legality itself; it asks the active rule set.

mod standard;

pub use standard::StandardChess;

use crate::{MoveList, Position};
use chess_core::{Color, Move, PieceKind, Square};

/// Classification of a position from the point of view of the side to move.
///
/// Always derived fresh from the position, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Play continues, side to move is not in check.
    InProgress,
    /// Side to move is in check but has a way out.
    Check,
    /// Side to move is in check with no legal move. The opponent wins.
    Checkmate,
    /// Side to move is not in check but has no legal move. Draw.
    Stalemate,
}

impl GameStatus {
    /// Returns true if the game is over.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    /// Derives the status from the two facts that determine it.
    pub const fn classify(in_check: bool, has_legal_move: bool) -> Self {
        match (in_check, has_legal_move) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::InProgress,
        }
    }

    /// Returns the result of a finished game, where `side_to_move` is the
    /// side the status was computed for.
    pub const fn result(self, side_to_move: Color) -> Option<GameResult> {
        match self {
            GameStatus::Checkmate => Some(match side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            }),
            GameStatus::Stalemate => Some(GameResult::Draw),
            GameStatus::InProgress | GameStatus::Check => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{}", text)
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Drawn by stalemate.
    Draw,
}

/// What a pawn turns into on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    /// Every promotion produces a queen; no choice is offered.
    #[default]
    AutoQueen,
    /// The mover picks queen, rook, bishop or knight (queen if unspecified).
    Choice,
}

impl PromotionPolicy {
    /// Returns the kinds a promoting pawn may become under this policy.
    pub fn allowed(self) -> &'static [PieceKind] {
        match self {
            PromotionPolicy::AutoQueen => &PieceKind::PROMOTIONS[..1],
            PromotionPolicy::Choice => &PieceKind::PROMOTIONS,
        }
    }

    /// Resolves a requested promotion piece, or `None` if it is not allowed.
    ///
    /// Under [`AutoQueen`](PromotionPolicy::AutoQueen) any request yields a
    /// queen.
    pub fn resolve(self, requested: Option<PieceKind>) -> Option<PieceKind> {
        match (self, requested) {
            (PromotionPolicy::AutoQueen, _) | (PromotionPolicy::Choice, None) => {
                Some(PieceKind::Queen)
            }
            (PromotionPolicy::Choice, Some(kind)) => {
                PieceKind::PROMOTIONS.contains(&kind).then_some(kind)
            }
        }
    }
}

/// Trait for implementing a chess rule set.
///
/// # Example
///
/// ```
/// use chess_engine::StandardChess;
/// use chess_engine::rules::{GameStatus, RuleSet};
///
/// let position = StandardChess::default().initial_position();
/// assert_eq!(StandardChess::default().status(&position), GameStatus::InProgress);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this rule set.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn generate_moves(&self, position: &Position) -> MoveList;

    /// Builds the legal move from `from` to `to` for the side to move,
    /// or explains why there is none.
    fn legal_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, crate::IllegalMove>;

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool {
        self.legal_move(position, m.from, m.to, m.flag.promotion_piece())
            .is_ok_and(|legal| legal == m)
    }

    /// Applies a move to the position in place.
    fn apply(&self, position: &mut Position, m: Move);

    /// Returns true if `side` has at least one legal move.
    fn has_any_legal_move(&self, position: &Position, side: Color) -> bool;

    /// Returns true if `side`'s king is attacked.
    fn is_in_check(&self, position: &Position, side: Color) -> bool;

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool {
        self.is_in_check(position, position.side_to_move)
    }

    /// Classifies the position for the side to move.
    fn status(&self, position: &Position) -> GameStatus {
        let side = position.side_to_move;
        GameStatus::classify(
            self.is_in_check(position, side),
            self.has_any_legal_move(position, side),
        )
    }
}
