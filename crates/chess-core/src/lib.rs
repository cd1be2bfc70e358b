//! Core types for chess rules.
//!
//! This crate provides the value types shared by the rules engine and by
//! notation codecs:
//! - [`Side`] for the two players
//! - [`Position`], [`File`], [`Rank`] and [`Direction`] for board coordinates
//! - [`PieceKind`] and [`Piece`] for piece representation
//! - [`Move`] and algebraic notation parsing

mod mov;
mod piece;
mod position;
mod side;

pub use mov::{CastlingType, Move, NormalMove, NotationError, PromotionMove};
pub use piece::{Piece, PieceId, PieceKind};
pub use position::{Direction, File, Position, Rank};
pub use side::Side;
