//! En passant captures.

use super::{expect_empty, expect_piece, relocate, MoveError, Mover, UndoError, ValidationError};
use crate::legality;
use crate::resolver;
use crate::result::{EnPassantResult, MoveKind};
use crate::Board;
use chess_core::{NormalMove, PieceKind, Position};

/// Executes en passant captures.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnPassantMover;

/// Returns the square passed over by the last move, if it was a two-step
/// pawn advance.
pub(crate) fn target(board: &Board) -> Option<Position> {
    let last = board.move_history().last()?;
    let MoveKind::Normal(result) = &last.kind else {
        return None;
    };
    if result.piece != PieceKind::Pawn {
        return None;
    }
    let movement = &result.movement;
    let (from_rank, to_rank) = (movement.from.rank?, movement.to.rank?);
    if to_rank.distance(from_rank).abs() != 2 {
        return None;
    }
    let passed = from_rank.offset(movement.side.pawn_direction())?;
    Some(Position::partial(movement.to.file, Some(passed)))
}

/// Checks an en passant capture from `from` onto `to` for the side to move
/// and returns the square of the pawn it captures.
pub(crate) fn validate(
    board: &mut Board,
    from: Position,
    to: Position,
) -> Result<Position, ValidationError> {
    if target(board) != Some(to) {
        return Err(ValidationError::EnPassantUnavailable(to));
    }

    let side = board.turn();
    let geometry = ValidationError::EnPassantGeometry { from, to };
    let (Some((from_file, from_rank)), Some((to_file, to_rank))) = (from.coords(), to.coords())
    else {
        return Err(geometry);
    };
    if from_rank.offset(side.pawn_direction()) != Some(to_rank)
        || to_file.distance(from_file).abs() != 1
    {
        return Err(geometry);
    }

    let squares = board.squares();
    let captured_at = Position::new(to_file, from_rank);
    let own_pawn = squares
        .get(from)
        .map_or(false, |p| p.kind() == PieceKind::Pawn && p.side() == side);
    let victim = squares
        .get(captured_at)
        .map_or(false, |p| p.kind() == PieceKind::Pawn && p.side() != side);
    if !own_pawn || !victim {
        return Err(geometry);
    }

    // Lift the victim onto the target square, then capture it there.
    let safe = board
        .squares_mut()
        .move_piece_temporarily(captured_at, to, |sq| {
            legality::keeps_king_safe(sq, from, to, side)
        })
        .unwrap_or(false);
    if !safe {
        return Err(ValidationError::EnPassantExposesKing { from, to });
    }
    Ok(captured_at)
}

impl Mover for EnPassantMover {
    type Input = NormalMove;
    type Output = EnPassantResult;

    fn make(input: &NormalMove, board: &mut Board) -> Result<EnPassantResult, MoveError> {
        let side = board.turn();
        let from = resolver::resolve_from(input.from, input.to, PieceKind::Pawn, board, side)?;
        let captured_at = validate(board, from, input.to)?;
        let from_short = resolver::unresolve_from(from, input.to, board)?;

        let squares = board.squares_mut();
        let mut movement = relocate(squares, from, from_short, input.to)?;
        movement.captured = squares.place_piece(None, captured_at)?;
        Ok(EnPassantResult {
            movement,
            captured_at,
        })
    }

    fn undo(output: &EnPassantResult, board: &mut Board) -> Result<(), UndoError> {
        let movement = &output.movement;
        let squares = board.squares_mut();
        expect_piece(squares, movement.to, PieceKind::Pawn, movement.side)?;
        expect_empty(squares, movement.from)?;
        expect_empty(squares, output.captured_at)?;

        squares.move_piece(movement.to, movement.from)?;
        squares.place_piece(movement.captured, output.captured_at)?;
        if let Some(piece) = squares.get_mut(movement.from) {
            piece.set_moved(movement.was_moved);
        }
        Ok(())
    }
}
