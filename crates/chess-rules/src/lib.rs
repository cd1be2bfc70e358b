//! Chess rules engine.
//!
//! Maintains a position, generates legal moves, makes and undoes moves
//! (castling, en passant and promotion included) and decides the game state.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Board, Side, State};
//!
//! let mut board = Board::standard();
//! board.make_move("e4").unwrap();
//! board.make_move("e5").unwrap();
//! assert_eq!(board.turn(), Side::White);
//! assert_eq!(board.state(), State::Clear);
//!
//! board.undo_last_move().unwrap();
//! assert_eq!(board.turn(), Side::Black);
//! ```

mod board;
pub mod config;
mod factory;
pub mod legality;
pub mod movegen;
pub mod movers;
pub mod resolver;
pub mod result;
pub mod rules;
pub mod squares;

pub use board::Board;
pub use config::{BoardConfig, ConfigError};
pub use factory::{BoardError, BoardFactory};
pub use movers::{MoveError, UndoError, ValidationError};
pub use resolver::ResolveError;
pub use result::{MoveKind, MoveResult};
pub use rules::{State, StateRule, StateType};
pub use squares::{Squares, SquaresError};

pub use chess_core::{
    CastlingType, Direction, File, Move, NormalMove, NotationError, Piece, PieceId, PieceKind,
    Position, PromotionMove, Rank, Side,
};
