//! Piece geometry.
//!
//! Pseudo-legal destinations per piece type, ignoring whether the mover's own
//! king ends up attacked. Castling and en passant are produced elsewhere.

use crate::squares::Squares;
use chess_core::{Direction, Piece, PieceKind, Position, Side};

const KNIGHT_JUMPS: [Direction; 8] = [
    Direction::new(1, 2),
    Direction::new(2, 1),
    Direction::new(2, -1),
    Direction::new(1, -2),
    Direction::new(-1, -2),
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, 2),
];

/// Returns the pseudo-legal destinations of `piece` standing on `from`.
pub fn pseudo_moves(piece: &Piece, from: Position, squares: &Squares) -> Vec<Position> {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(piece, from, squares),
        PieceKind::Knight => step_moves(piece, from, squares, &KNIGHT_JUMPS),
        PieceKind::King => step_moves(piece, from, squares, &Direction::ALL),
        PieceKind::Bishop => ray_moves(piece, from, squares, &Direction::DIAGONAL),
        PieceKind::Rook => ray_moves(piece, from, squares, &Direction::ORTHOGONAL),
        PieceKind::Queen => ray_moves(piece, from, squares, &Direction::ALL),
    }
}

/// Returns the squares `piece` on `from` attacks.
///
/// Same as [`pseudo_moves`] except for pawns, which attack both forward
/// diagonals whether or not anything stands there, and never attack forward.
pub fn attacks(piece: &Piece, from: Position, squares: &Squares) -> Vec<Position> {
    match piece.kind() {
        PieceKind::Pawn => pawn_diagonals(piece.side(), from)
            .filter(|p| squares.contains(*p))
            .collect(),
        _ => pseudo_moves(piece, from, squares),
    }
}

/// Returns true if any piece of `by` attacks `target`.
pub fn is_square_attacked(squares: &Squares, target: Position, by: Side) -> bool {
    squares
        .get_all_pieces(by)
        .any(|(from, piece)| attacks(piece, from, squares).contains(&target))
}

fn pawn_diagonals(side: Side, from: Position) -> impl Iterator<Item = Position> {
    let forward = side.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |file| from.offset(Direction::new(file, forward)))
}

fn pawn_moves(piece: &Piece, from: Position, squares: &Squares) -> Vec<Position> {
    let mut moves = Vec::new();
    let forward = Direction::new(0, piece.side().pawn_direction());

    if let Some(one) = from.offset(forward).filter(|p| squares.contains(*p)) {
        if squares.get(one).is_none() {
            moves.push(one);
            if !piece.is_moved() {
                if let Some(two) = one.offset(forward).filter(|p| squares.contains(*p)) {
                    if squares.get(two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    moves.extend(pawn_diagonals(piece.side(), from).filter(|to| {
        squares
            .get(*to)
            .map_or(false, |target| target.is_opponent_of(piece))
    }));
    moves
}

fn step_moves(
    piece: &Piece,
    from: Position,
    squares: &Squares,
    steps: &[Direction],
) -> Vec<Position> {
    steps
        .iter()
        .filter_map(|step| from.offset(*step))
        .filter(|to| squares.contains(*to))
        .filter(|to| squares.get(*to).map_or(true, |target| target.is_opponent_of(piece)))
        .collect()
}

fn ray_moves(
    piece: &Piece,
    from: Position,
    squares: &Squares,
    directions: &[Direction],
) -> Vec<Position> {
    let mut moves = Vec::new();
    for direction in directions {
        for to in squares.iter_by_direction(from, *direction) {
            match squares.get(to) {
                None => moves.push(to),
                Some(target) => {
                    if target.is_opponent_of(piece) {
                        moves.push(to);
                    }
                    break;
                }
            }
        }
    }
    moves
}
