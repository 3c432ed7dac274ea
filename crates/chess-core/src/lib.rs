//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rule engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates in (row, col) form
//! - [`Move`] for move representation
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser, Placement};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::Square;
