//! Pawn promotion.

use super::{
    ensure_on_board, expect_empty, last_rank, relocate, validate_source, MoveError, Mover,
    UndoError, ValidationError,
};
use crate::resolver;
use crate::result::PromotionResult;
use crate::Board;
use chess_core::{Piece, PieceKind, PromotionMove};

/// Executes [`PromotionMove`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromotionMover;

impl Mover for PromotionMover {
    type Input = PromotionMove;
    type Output = PromotionResult;

    fn make(input: &PromotionMove, board: &mut Board) -> Result<PromotionResult, MoveError> {
        if !PieceKind::PROMOTIONS.contains(&input.promoted) {
            return Err(ValidationError::InvalidPromotionPiece(input.promoted).into());
        }

        let side = board.turn();
        ensure_on_board(board, input.to)?;
        let from = resolver::resolve_from(input.from, input.to, PieceKind::Pawn, board, side)?;
        let pawn = validate_source(board, from, input.to, PieceKind::Pawn)?;

        let last = last_rank(board, side);
        let before_last = from.rank.and_then(|rank| rank.offset(side.pawn_direction()));
        if last.is_none() || before_last != last {
            return Err(ValidationError::NotPromotionRank(from).into());
        }

        let from_short = resolver::unresolve_from(from, input.to, board)?;
        let squares = board.squares_mut();
        let movement = relocate(squares, from, from_short, input.to)?;
        let promoted = Piece::new_moved(input.promoted, side);
        squares.place_piece(Some(promoted), input.to)?;

        Ok(PromotionResult {
            movement,
            pawn,
            promoted,
        })
    }

    fn undo(output: &PromotionResult, board: &mut Board) -> Result<(), UndoError> {
        let movement = &output.movement;
        let squares = board.squares_mut();
        match squares.find_by_position(movement.to)? {
            Some(piece) if piece.id() == output.promoted.id() => {}
            _ => {
                return Err(UndoError::PieceNotFound {
                    at: movement.to,
                    kind: output.promoted.kind(),
                    side: movement.side,
                })
            }
        }
        expect_empty(squares, movement.from)?;

        squares.place_piece(movement.captured, movement.to)?;
        squares.place_piece(Some(output.pawn), movement.from)?;
        Ok(())
    }
}
