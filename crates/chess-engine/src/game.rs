//! Turn orchestration on top of the rule set.
//!
//! The [`Game`] struct owns the single [`Position`] of a game. It is the
//! only writer: every change goes through [`Game::submit_move`] (or its
//! explaining twin [`Game::try_move`]) and [`Game::reset`].

use crate::movegen::IllegalMove;
use crate::rules::{GameResult, GameStatus, RuleSet, StandardChess};
use crate::{MoveList, Position};
use chess_core::{Color, FenError, Move, PieceKind, Square};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A coordinate was outside the 8×8 board.
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    /// The game has already ended.
    #[error("game has already ended in {0}")]
    GameAlreadyOver(GameStatus),
}

/// Answer to a [`Game::submit_move`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the move was played.
    pub accepted: bool,
    /// Status of the position after the request, for the side to move.
    pub status: GameStatus,
}

/// A chess game between two local players.
#[derive(Debug, Clone)]
pub struct Game<R: RuleSet = StandardChess> {
    rules: R,
    position: Position,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard rules and starting position.
    pub fn new() -> Self {
        Self::with_rules(StandardChess::default())
    }

    /// Creates a game with the standard rules from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(StandardChess::default(), Position::from_fen(fen)?))
    }
}

impl<R: RuleSet> Game<R> {
    /// Creates a new game from the rule set's initial position.
    pub fn with_rules(rules: R) -> Self {
        let position = rules.initial_position();
        Game { rules, position }
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(rules: R, position: Position) -> Self {
        Game { rules, position }
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the side whose turn it is.
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[Move] {
        self.position.history()
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        self.rules.generate_moves(&self.position)
    }

    /// Classifies the current position. Computed fresh on every call.
    pub fn current_status(&self) -> GameStatus {
        self.rules.status(&self.position)
    }

    /// Returns the game result if the game is over.
    pub fn result(&self) -> Option<GameResult> {
        self.current_status().result(self.position.side_to_move)
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.current_status().is_terminal()
    }

    /// Restores the standard starting position.
    pub fn reset(&mut self) {
        self.position = self.rules.initial_position();
        tracing::debug!("game reset");
    }

    /// Plays a move given as raw row/column coordinates.
    ///
    /// Malformed or illegal requests are rejected without touching the
    /// position. Promotions follow the rule set's default piece.
    pub fn submit_move(
        &mut self,
        src_row: usize,
        src_col: usize,
        dst_row: usize,
        dst_col: usize,
    ) -> MoveOutcome {
        let played = square(src_row, src_col)
            .and_then(|from| Ok((from, square(dst_row, dst_col)?)))
            .and_then(|(from, to)| self.try_move(from, to, None));

        match played {
            Ok(status) => MoveOutcome {
                accepted: true,
                status,
            },
            Err(e) => {
                tracing::debug!(
                    "rejected ({}, {}) -> ({}, {}): {}",
                    src_row,
                    src_col,
                    dst_row,
                    dst_col,
                    e
                );
                MoveOutcome {
                    accepted: false,
                    status: self.current_status(),
                }
            }
        }
    }

    /// Plays a move and returns the new status, or says why it was refused.
    pub fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<GameStatus, GameError> {
        // A legal move proves the game is still running, so the full status
        // scan is only needed to explain a refusal.
        let m = match self.rules.legal_move(&self.position, from, to, promotion) {
            Ok(m) => m,
            Err(e) => {
                let status = self.current_status();
                return Err(if status.is_terminal() {
                    GameError::GameAlreadyOver(status)
                } else {
                    GameError::IllegalMove(e)
                });
            }
        };
        self.rules.apply(&mut self.position, m);
        tracing::debug!("{} played {}", m.color(), m);

        let status = self.current_status();
        match status.result(self.position.side_to_move) {
            Some(GameResult::WhiteWins) => tracing::info!("checkmate, White wins"),
            Some(GameResult::BlackWins) => tracing::info!("checkmate, Black wins"),
            Some(GameResult::Draw) => tracing::info!("stalemate, the game is drawn"),
            None => {}
        }
        Ok(status)
    }
}

fn square(row: usize, col: usize) -> Result<Square, GameError> {
    Square::new(row, col).ok_or(GameError::OutOfBounds { row, col })
}
