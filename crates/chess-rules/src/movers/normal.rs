//! Plain moves and captures.

use super::{
    ensure_on_board, expect_empty, expect_piece, last_rank, relocate, validate_source, MoveError,
    Mover, UndoError, ValidationError,
};
use crate::resolver;
use crate::result::NormalResult;
use crate::Board;
use chess_core::{NormalMove, PieceKind};

/// Executes [`NormalMove`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalMover;

impl Mover for NormalMover {
    type Input = NormalMove;
    type Output = NormalResult;

    fn make(input: &NormalMove, board: &mut Board) -> Result<NormalResult, MoveError> {
        let side = board.turn();
        ensure_on_board(board, input.to)?;
        let from = resolver::resolve_from(input.from, input.to, input.piece, board, side)?;
        validate_source(board, from, input.to, input.piece)?;

        if input.piece == PieceKind::Pawn && input.to.rank == last_rank(board, side) {
            return Err(ValidationError::PromotionRequired(input.to).into());
        }

        let from_short = resolver::unresolve_from(from, input.to, board)?;
        let movement = relocate(board.squares_mut(), from, from_short, input.to)?;
        Ok(NormalResult {
            piece: input.piece,
            movement,
        })
    }

    fn undo(output: &NormalResult, board: &mut Board) -> Result<(), UndoError> {
        let movement = &output.movement;
        let squares = board.squares_mut();
        expect_piece(squares, movement.to, output.piece, movement.side)?;
        expect_empty(squares, movement.from)?;

        squares.move_piece(movement.to, movement.from)?;
        squares.place_piece(movement.captured, movement.to)?;
        if let Some(piece) = squares.get_mut(movement.from) {
            piece.set_moved(movement.was_moved);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveError;
    use chess_core::{Piece, Position, Side};

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn normal(s: &str) -> NormalMove {
        match s.parse().unwrap() {
            chess_core::Move::Normal(m) => m,
            other => panic!("not a normal move: {other}"),
        }
    }

    #[test]
    fn opening_pawn_push() {
        let mut board = Board::standard();
        let result = NormalMover::make(&normal("e4"), &mut board).unwrap();
        assert_eq!(result.movement.from, pos("e2"));
        assert_eq!(result.movement.to, pos("e4"));
        assert!(!result.movement.was_moved);
        assert_eq!(result.movement.captured, None);
        assert!(board.squares().get(pos("e4")).unwrap().is_moved());
        assert_eq!(board.squares().get(pos("e2")), None);
    }

    #[test]
    fn undo_restores_moved_flag_and_capture() {
        let mut board = crate::BoardFactory::standard()
            .create(
                Side::White,
                [
                    (pos("e1"), Piece::new(PieceKind::King, Side::White)),
                    (pos("d1"), Piece::new(PieceKind::Queen, Side::White)),
                    (pos("d7"), Piece::new(PieceKind::Pawn, Side::Black)),
                    (pos("e8"), Piece::new(PieceKind::King, Side::Black)),
                ],
            )
            .unwrap();
        let before = board.squares().clone();

        let result = NormalMover::make(&normal("Qxd7"), &mut board).unwrap();
        assert_eq!(
            result.movement.captured.map(|p| p.kind()),
            Some(PieceKind::Pawn)
        );
        NormalMover::undo(&result, &mut board).unwrap();
        assert_eq!(board.squares(), &before);
    }

    #[test]
    fn failed_make_leaves_board_untouched() {
        let mut board = Board::standard();
        let before = board.squares().clone();

        assert!(matches!(
            NormalMover::make(&normal("e5"), &mut board),
            Err(MoveError::Resolve(ResolveError::NoSourceFound { .. }))
        ));
        assert!(matches!(
            NormalMover::make(&normal("e2e5"), &mut board),
            Err(MoveError::Validation(ValidationError::IllegalDestination { .. }))
        ));
        assert!(matches!(
            NormalMover::make(&normal("Ne7e5"), &mut board),
            Err(MoveError::Validation(ValidationError::WrongSide { .. }))
        ));
        assert!(matches!(
            NormalMover::make(&normal("Be2e4"), &mut board),
            Err(MoveError::Validation(ValidationError::PieceMismatch { .. }))
        ));
        assert!(matches!(
            NormalMover::make(&normal("e3e4"), &mut board),
            Err(MoveError::Validation(ValidationError::NoPiece(_)))
        ));
        assert_eq!(board.squares(), &before);
    }

    #[test]
    fn off_board_destination() {
        let mut board = Board::standard();
        assert!(matches!(
            NormalMover::make(&normal("Nb1c9"), &mut board),
            Err(MoveError::Squares(_))
        ));
    }

    #[test]
    fn pawn_on_last_rank_requires_promotion() {
        let mut board = crate::BoardFactory::standard()
            .create(
                Side::White,
                [
                    (pos("a1"), Piece::new(PieceKind::King, Side::White)),
                    (pos("e7"), Piece::new_moved(PieceKind::Pawn, Side::White)),
                    (pos("h5"), Piece::new(PieceKind::King, Side::Black)),
                ],
            )
            .unwrap();
        assert_eq!(
            NormalMover::make(&normal("e8"), &mut board),
            Err(ValidationError::PromotionRequired(pos("e8")).into())
        );
        assert!(board.squares().get(pos("e7")).is_some());
    }

    #[test]
    fn undo_detects_misuse() {
        let mut board = Board::standard();
        let result = NormalMover::make(&normal("Nf3"), &mut board).unwrap();
        board.squares_mut().place_piece(None, pos("f3")).unwrap();
        assert!(matches!(
            NormalMover::undo(&result, &mut board),
            Err(UndoError::PieceNotFound { .. })
        ));
    }
}
