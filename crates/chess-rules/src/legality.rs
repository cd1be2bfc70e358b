//! Self-check exclusion.

use crate::movegen;
use crate::squares::Squares;
use chess_core::{PieceKind, Position, Side};

/// Returns true if the king of `side` is attacked.
///
/// A side without a king on the board is never in check.
pub fn is_in_check(squares: &Squares, side: Side) -> bool {
    squares
        .find_piece(PieceKind::King, side)
        .map_or(false, |(king, _)| {
            movegen::is_square_attacked(squares, king, side.opposite())
        })
}

/// Returns true if moving `from` to `to` keeps the own king of `side` safe.
///
/// The move is simulated and reverted; `squares` is unchanged afterwards.
pub fn keeps_king_safe(squares: &mut Squares, from: Position, to: Position, side: Side) -> bool {
    squares
        .move_piece_temporarily(from, to, |sq| !is_in_check(sq, side))
        .unwrap_or(false)
}

/// Returns the legal destinations of the piece on `from`, castling and
/// en passant excluded.
pub fn legal_destinations(squares: &mut Squares, from: Position) -> Vec<Position> {
    let Some(piece) = squares.get(from).copied() else {
        return Vec::new();
    };
    movegen::pseudo_moves(&piece, from, squares)
        .into_iter()
        .filter(|to| keeps_king_safe(squares, from, *to, piece.side()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn squares_with(pieces: &[(&str, PieceKind, Side)]) -> Squares {
        Squares::from_placement(
            Position::STANDARD_EDGE,
            pieces
                .iter()
                .map(|(s, kind, side)| (pos(s), Piece::new_moved(*kind, *side))),
        )
        .unwrap()
    }

    #[test]
    fn pinned_piece_may_only_move_along_the_pin() {
        let mut squares = squares_with(&[
            ("e1", PieceKind::King, Side::White),
            ("e2", PieceKind::Rook, Side::White),
            ("e8", PieceKind::Rook, Side::Black),
        ]);
        let before = squares.clone();
        let mut moves = legal_destinations(&mut squares, pos("e2"));
        moves.sort();
        let expected: Vec<_> = ["e3", "e4", "e5", "e6", "e7", "e8"]
            .iter()
            .map(|s| pos(s))
            .collect();
        assert_eq!(moves, expected);
        assert_eq!(squares, before);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut squares = squares_with(&[
            ("e1", PieceKind::King, Side::White),
            ("d8", PieceKind::Rook, Side::Black),
            ("f8", PieceKind::Rook, Side::Black),
        ]);
        assert_eq!(legal_destinations(&mut squares, pos("e1")), vec![pos("e2")]);
    }

    #[test]
    fn check_detection() {
        let squares = squares_with(&[
            ("e1", PieceKind::King, Side::White),
            ("b4", PieceKind::Bishop, Side::Black),
        ]);
        assert!(is_in_check(&squares, Side::White));
        assert!(!is_in_check(&squares, Side::Black));

        let squares = squares_with(&[
            ("e1", PieceKind::King, Side::White),
            ("d2", PieceKind::Pawn, Side::White),
            ("b4", PieceKind::Bishop, Side::Black),
        ]);
        assert!(!is_in_check(&squares, Side::White));
    }

    #[test]
    fn kingless_side_moves_freely() {
        let mut squares = squares_with(&[
            ("a1", PieceKind::Rook, Side::White),
            ("a8", PieceKind::Rook, Side::Black),
        ]);
        assert_eq!(legal_destinations(&mut squares, pos("a1")).len(), 14);
        assert!(legal_destinations(&mut squares, pos("c3")).is_empty());
    }
}
