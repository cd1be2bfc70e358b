//! Move execution and exact undo.
//!
//! Each mover validates everything before it touches the board, so a failed
//! `make` leaves the position unchanged. `undo` expects the board to be in
//! the state the matching `make` left it in.

mod castling;
mod en_passant;
mod normal;
mod promotion;

pub use castling::CastlingMover;
pub use en_passant::EnPassantMover;
pub use normal::NormalMover;
pub use promotion::PromotionMover;

pub(crate) use castling::plan as castling_plan;
pub(crate) use en_passant::{target as en_passant_target, validate as validate_en_passant};

use crate::resolver::ResolveError;
use crate::result::{MoveKind, PieceMove};
use crate::squares::{Squares, SquaresError};
use crate::Board;
use chess_core::{CastlingType, Move, NotationError, Piece, PieceKind, Position, Rank, Side};
use thiserror::Error;

/// A violated move precondition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no piece at {0}")]
    NoPiece(Position),

    #[error("piece at {at} belongs to {side}, but it is {turn}'s turn")]
    WrongSide { at: Position, side: Side, turn: Side },

    #[error("expected a {expected} at {at}, found a {found}")]
    PieceMismatch {
        at: Position,
        expected: PieceKind,
        found: PieceKind,
    },

    #[error("{piece} on {from} cannot move to {to}")]
    IllegalDestination {
        piece: PieceKind,
        from: Position,
        to: Position,
    },

    #[error("pawn move to {0} must name a promotion piece")]
    PromotionRequired(Position),

    #[error("cannot promote to {0}")]
    InvalidPromotionPiece(PieceKind),

    #[error("pawn on {0} is not one step from the last rank")]
    NotPromotionRank(Position),

    #[error("{0} has no king")]
    KingNotFound(Side),

    #[error("{0} king has already moved")]
    KingMoved(Side),

    #[error("{0} king is in check")]
    KingInCheck(Side),

    #[error("no rook to castle {0} with")]
    RookNotFound(CastlingType),

    #[error("rook for {0} has already moved")]
    RookMoved(CastlingType),

    #[error("{0} is obstructed")]
    CastlingObstructed(CastlingType),

    #[error("{0} passes through an attacked square")]
    CastlingThreatened(CastlingType),

    #[error("{0} does not fit on this board")]
    CastlingOffBoard(CastlingType),

    #[error("en passant onto {0} is not available")]
    EnPassantUnavailable(Position),

    #[error("en passant from {from} to {to} is not a valid capture")]
    EnPassantGeometry { from: Position, to: Position },

    #[error("en passant from {from} to {to} leaves the king in check")]
    EnPassantExposesKing { from: Position, to: Position },
}

/// Errors returned when making a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Squares(#[from] SquaresError),
}

/// Errors returned when undoing a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UndoError {
    #[error("expected {side} {kind} at {at}")]
    PieceNotFound {
        at: Position,
        kind: PieceKind,
        side: Side,
    },

    #[error("square {0} is occupied")]
    SquareOccupied(Position),

    #[error(transparent)]
    Squares(#[from] SquaresError),
}

/// Execution protocol of one move shape.
pub trait Mover {
    /// The input this mover accepts.
    type Input;
    /// The record it produces.
    type Output;

    /// Validates and applies `input` for the side to move.
    fn make(input: &Self::Input, board: &mut Board) -> Result<Self::Output, MoveError>;

    /// Reverts a move previously applied by [`Mover::make`].
    fn undo(output: &Self::Output, board: &mut Board) -> Result<(), UndoError>;
}

/// Routes `mv` to its mover.
///
/// A normal pawn move onto the en passant target square is an en passant
/// capture.
pub(crate) fn make(mv: &Move, board: &mut Board) -> Result<MoveKind, MoveError> {
    match mv {
        Move::Normal(m) => {
            if m.piece == PieceKind::Pawn && en_passant_target(board) == Some(m.to) {
                EnPassantMover::make(m, board).map(MoveKind::EnPassant)
            } else {
                NormalMover::make(m, board).map(MoveKind::Normal)
            }
        }
        Move::Promotion(m) => PromotionMover::make(m, board).map(MoveKind::Promotion),
        Move::Castling(c) => CastlingMover::make(c, board).map(MoveKind::Castling),
    }
}

/// Routes a recorded move to its undo routine.
pub(crate) fn undo(kind: &MoveKind, board: &mut Board) -> Result<(), UndoError> {
    match kind {
        MoveKind::Normal(r) => NormalMover::undo(r, board),
        MoveKind::Promotion(r) => PromotionMover::undo(r, board),
        MoveKind::EnPassant(r) => EnPassantMover::undo(r, board),
        MoveKind::Castling(r) => CastlingMover::undo(r, board),
    }
}

/// Fails unless `to` is a square of the board.
fn ensure_on_board(board: &Board, to: Position) -> Result<(), MoveError> {
    if board.squares().contains(to) {
        Ok(())
    } else {
        Err(SquaresError::InvalidPosition(to).into())
    }
}

/// Checks the occupant of `from` against the side to move and `kind`, and
/// that `to` is one of its legal destinations.
fn validate_source(
    board: &mut Board,
    from: Position,
    to: Position,
    kind: PieceKind,
) -> Result<Piece, MoveError> {
    let turn = board.turn();
    let piece = *board
        .squares()
        .find_by_position(from)?
        .ok_or(ValidationError::NoPiece(from))?;

    if piece.side() != turn {
        return Err(ValidationError::WrongSide {
            at: from,
            side: piece.side(),
            turn,
        }
        .into());
    }
    if piece.kind() != kind {
        return Err(ValidationError::PieceMismatch {
            at: from,
            expected: kind,
            found: piece.kind(),
        }
        .into());
    }
    if !board.legal_moves_from(from).contains(&to) {
        return Err(ValidationError::IllegalDestination {
            piece: kind,
            from,
            to,
        }
        .into());
    }
    Ok(piece)
}

/// The rank a pawn of `side` promotes on.
fn last_rank(board: &Board, side: Side) -> Option<Rank> {
    board
        .squares()
        .edge()
        .rank
        .map(|edge| side.opposite().back_rank(edge))
}

/// Moves the occupant of `from` to `to` and marks it moved.
fn relocate(
    squares: &mut Squares,
    from: Position,
    from_short: Position,
    to: Position,
) -> Result<PieceMove, SquaresError> {
    let piece = *squares
        .find_by_position(from)?
        .ok_or(SquaresError::EmptySquare(from))?;
    let captured = squares.move_piece(from, to)?;
    if let Some(moved) = squares.get_mut(to) {
        moved.set_moved(true);
    }
    Ok(PieceMove {
        side: piece.side(),
        from,
        from_short,
        to,
        captured,
        was_moved: piece.is_moved(),
    })
}

/// Returns the piece on `at` if it is a `kind` of `side`.
fn expect_piece(
    squares: &Squares,
    at: Position,
    kind: PieceKind,
    side: Side,
) -> Result<Piece, UndoError> {
    match squares.find_by_position(at)? {
        Some(piece) if piece.kind() == kind && piece.side() == side => Ok(*piece),
        _ => Err(UndoError::PieceNotFound { at, kind, side }),
    }
}

fn expect_empty(squares: &Squares, at: Position) -> Result<(), UndoError> {
    match squares.find_by_position(at)? {
        Some(_) => Err(UndoError::SquareOccupied(at)),
        None => Ok(()),
    }
}
