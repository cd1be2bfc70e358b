//! Source-square resolution for partially specified moves.
//!
//! Algebraic notation names a destination and only as much of the origin as
//! is needed to tell same-type pieces apart. [`resolve_from`] turns such a
//! hint into a full square; [`unresolve_from`] computes the minimal hint for
//! output.

use crate::Board;
use chess_core::{PieceKind, Position, Side};
use thiserror::Error;

/// Errors raised when a source square cannot be determined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no {side} {kind} matching '{hint}' can move to {to}")]
    NoSourceFound {
        kind: PieceKind,
        side: Side,
        hint: Position,
        to: Position,
    },

    #[error("{kind} move to {to} is ambiguous between {candidates:?}")]
    Ambiguous {
        kind: PieceKind,
        to: Position,
        candidates: Vec<Position>,
    },

    #[error("no piece at {0}")]
    NoPiece(Position),
}

/// Resolves the origin of a `kind` move of `side` to `to`.
///
/// A full `hint` is returned as is; validation of the occupant is left to the
/// mover. Otherwise every piece of the type whose legal moves contain `to`
/// and whose square matches the set coordinates of `hint` is a candidate,
/// and exactly one candidate must remain.
pub fn resolve_from(
    hint: Position,
    to: Position,
    kind: PieceKind,
    board: &mut Board,
    side: Side,
) -> Result<Position, ResolveError> {
    if hint.is_full() {
        return Ok(hint);
    }

    let origins: Vec<Position> = board
        .squares()
        .get_pieces(kind, side)
        .map(|(position, _)| position)
        .filter(|position| position.matches(hint))
        .collect();

    let candidates: Vec<Position> = origins
        .into_iter()
        .filter(|from| board.legal_moves_from(*from).contains(&to))
        .collect();

    match candidates.as_slice() {
        [] => Err(ResolveError::NoSourceFound {
            kind,
            side,
            hint,
            to,
        }),
        [from] => Ok(*from),
        _ => Err(ResolveError::Ambiguous {
            kind,
            to,
            candidates,
        }),
    }
}

/// Returns the shortest origin hint that still identifies the piece on
/// `from` moving to `to`.
///
/// Pawn captures always keep the origin file.
pub fn unresolve_from(from: Position, to: Position, board: &mut Board) -> Result<Position, ResolveError> {
    let piece = *board
        .squares()
        .get(from)
        .ok_or(ResolveError::NoPiece(from))?;

    let rivals: Vec<Position> = board
        .squares()
        .get_pieces(piece.kind(), piece.side())
        .map(|(position, _)| position)
        .filter(|position| *position != from)
        .collect();

    let mut contested = false;
    let mut same_file = false;
    let mut same_rank = false;
    for rival in rivals {
        if !board.legal_moves_from(rival).contains(&to) {
            continue;
        }
        contested = true;
        same_file |= rival.file == from.file;
        same_rank |= rival.rank == from.rank;
    }

    let mut short = Position::empty();
    if same_rank || (contested && !same_file) {
        short.file = from.file;
    }
    if same_file {
        short.rank = from.rank;
    }
    if piece.kind() == PieceKind::Pawn && from.file != to.file {
        short.file = from.file;
    }
    Ok(short)
}
