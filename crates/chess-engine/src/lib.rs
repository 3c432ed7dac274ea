//! Chess rule engine over a plain 8×8 grid.
//!
//! This crate provides:
//! - [`Board`] - the 64 squares as a cheap `Copy` value
//! - [`Position`] - board, side to move and append-only move history
//! - [`movegen`] - movement geometry, legality and move enumeration
//! - [`RuleSet`] - the rules seam, implemented by [`StandardChess`]
//! - [`Game`] - the controller that alternates turns and reports status
//!
//! # Architecture
//!
//! Legality is decided by geometry first and king safety second: a
//! candidate move is applied to a scratch copy of the board and rejected if
//! it leaves the mover's king attacked. Castling and en passant are read
//! from the move history rather than from separate state flags.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! let outcome = game.submit_move(6, 4, 4, 4); // e2-e4
//! assert!(outcome.accepted);
//! assert_eq!(outcome.status, GameStatus::InProgress);
//!
//! // Black may not move a white piece
//! assert!(!game.submit_move(4, 4, 3, 4).accepted);
//! ```

mod board;
mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use board::Board;
pub use game::{Game, GameError, MoveOutcome};
pub use movegen::{generate_moves, is_in_check, make_move, IllegalMove, MoveList};
pub use position::{CastlingRights, Position};
pub use rules::{GameResult, GameStatus, PromotionPolicy, RuleSet, StandardChess};
