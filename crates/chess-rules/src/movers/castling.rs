//! Castling.

use super::{expect_piece, MoveError, Mover, UndoError, ValidationError};
use crate::legality;
use crate::movegen;
use crate::result::CastlingResult;
use crate::Board;
use chess_core::{CastlingType, Direction, File, Piece, PieceKind, Position, Side};

/// Executes castling.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastlingMover;

/// Squares and pieces involved in a castling move.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CastlingPlan {
    pub king: Piece,
    pub rook: Piece,
    pub king_from: Position,
    pub king_to: Position,
    pub rook_from: Position,
    pub rook_to: Position,
}

/// Checks whether `side` may castle and computes where everything goes.
///
/// The rook is the first own rook found scanning from the king towards the
/// board edge. With `live` unset only the moved flags are checked; the
/// obstruction, check and attacked-square tests apply to live moves.
pub(crate) fn plan(
    board: &Board,
    side: Side,
    castling: CastlingType,
    live: bool,
) -> Result<CastlingPlan, ValidationError> {
    let squares = board.squares();
    let (king_from, king) = squares
        .find_piece(PieceKind::King, side)
        .map(|(position, piece)| (position, *piece))
        .ok_or(ValidationError::KingNotFound(side))?;
    if king.is_moved() {
        return Err(ValidationError::KingMoved(side));
    }
    if live && legality::is_in_check(squares, side) {
        return Err(ValidationError::KingInCheck(side));
    }

    let mut obstructed = false;
    let mut found = None;
    for position in squares.iter_by_direction(king_from, Direction::new(castling.file_direction(), 0)) {
        match squares.get(position) {
            None => {}
            Some(piece) if piece.kind() == PieceKind::Rook && piece.side() == side => {
                found = Some((position, *piece));
                break;
            }
            Some(_) => obstructed = true,
        }
    }
    let (rook_from, rook) = found.ok_or(ValidationError::RookNotFound(castling))?;
    if rook.is_moved() {
        return Err(ValidationError::RookMoved(castling));
    }

    let (king_file, rook_file) = match castling {
        CastlingType::Short => (File::G, File::F),
        CastlingType::Long => (File::C, File::D),
    };
    let king_to = Position::partial(Some(king_file), king_from.rank);
    let rook_to = Position::partial(Some(rook_file), king_from.rank);
    if !squares.contains(king_to) || !squares.contains(rook_to) {
        return Err(ValidationError::CastlingOffBoard(castling));
    }

    if live {
        let foreign = |at: Position| {
            squares
                .get(at)
                .map_or(false, |p| p.id() != king.id() && p.id() != rook.id())
        };
        if obstructed || foreign(king_to) || foreign(rook_to) {
            return Err(ValidationError::CastlingObstructed(castling));
        }

        let opponent = side.opposite();
        let threatened = king_path(board, king_from, king_to)
            .into_iter()
            .any(|at| movegen::is_square_attacked(squares, at, opponent));
        if threatened {
            return Err(ValidationError::CastlingThreatened(castling));
        }
    }

    Ok(CastlingPlan {
        king,
        rook,
        king_from,
        king_to,
        rook_from,
        rook_to,
    })
}

/// Squares the king crosses, its destination included.
fn king_path(board: &Board, from: Position, to: Position) -> Vec<Position> {
    let (Some(from_file), Some(to_file)) = (from.file, to.file) else {
        return Vec::new();
    };
    let step = to_file.distance(from_file).signum();
    if step == 0 {
        return Vec::new();
    }

    let mut path = Vec::new();
    for at in board.squares().iter_by_direction(from, Direction::new(step, 0)) {
        path.push(at);
        if at == to {
            break;
        }
    }
    path
}

impl Mover for CastlingMover {
    type Input = CastlingType;
    type Output = CastlingResult;

    fn make(input: &CastlingType, board: &mut Board) -> Result<CastlingResult, MoveError> {
        let side = board.turn();
        let plan = plan(board, side, *input, true)?;

        let squares = board.squares_mut();
        let (mut king, mut rook) = (plan.king, plan.rook);
        king.set_moved(true);
        rook.set_moved(true);
        squares.place_piece(None, plan.king_from)?;
        squares.place_piece(None, plan.rook_from)?;
        squares.place_piece(Some(king), plan.king_to)?;
        squares.place_piece(Some(rook), plan.rook_to)?;

        Ok(CastlingResult {
            side,
            castling: *input,
            king_from: plan.king_from,
            king_to: plan.king_to,
            rook_from: plan.rook_from,
            rook_to: plan.rook_to,
        })
    }

    fn undo(output: &CastlingResult, board: &mut Board) -> Result<(), UndoError> {
        let squares = board.squares_mut();
        let mut king = expect_piece(squares, output.king_to, PieceKind::King, output.side)?;
        let mut rook = expect_piece(squares, output.rook_to, PieceKind::Rook, output.side)?;
        for origin in [output.king_from, output.rook_from] {
            if let Some(piece) = squares.find_by_position(origin)? {
                if piece.id() != king.id() && piece.id() != rook.id() {
                    return Err(UndoError::SquareOccupied(origin));
                }
            }
        }

        king.set_moved(false);
        rook.set_moved(false);
        squares.place_piece(None, output.king_to)?;
        squares.place_piece(None, output.rook_to)?;
        squares.place_piece(Some(king), output.king_from)?;
        squares.place_piece(Some(rook), output.rook_from)?;
        Ok(())
    }
}
