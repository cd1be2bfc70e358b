//! Piece placement storage.
//!
//! [`Squares`] owns the grid of a board together with a reverse index from
//! [`PieceId`] to [`Position`]. Every mutation keeps the two in sync, so each
//! occupied square holds exactly one piece and each placed piece stands on
//! exactly one square.

use chess_core::{Direction, File, Piece, PieceId, PieceKind, Position, Rank, Side};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors raised by placement operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquaresError {
    #[error("position {0} is outside the board")]
    InvalidPosition(Position),

    #[error("no piece at {0}")]
    EmptySquare(Position),

    #[error("{0:?} is not a full square")]
    PartialPosition(Position),
}

/// The board grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares {
    edge: Position,
    files: usize,
    grid: Vec<Option<Piece>>,
    index: HashMap<PieceId, Position>,
}

impl Squares {
    /// Creates an empty grid whose top-right corner is `edge`.
    pub fn new(edge: Position) -> Result<Self, SquaresError> {
        let (file, rank) = edge.coords().ok_or(SquaresError::PartialPosition(edge))?;
        let files = file.get() as usize;
        let ranks = rank.get() as usize;
        Ok(Squares {
            edge,
            files,
            grid: vec![None; files * ranks],
            index: HashMap::new(),
        })
    }

    /// Creates a grid and places every piece of `placement` on it.
    pub fn from_placement<I>(edge: Position, placement: I) -> Result<Self, SquaresError>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut squares = Squares::new(edge)?;
        for (position, piece) in placement {
            squares.place_piece(Some(piece), position)?;
        }
        Ok(squares)
    }

    /// Returns the top-right corner of the board.
    #[inline]
    pub fn edge(&self) -> Position {
        self.edge
    }

    /// Returns true if `position` is a full position on this board.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.is_within(self.edge)
    }

    fn slot(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let (file, rank) = position.coords()?;
        Some((rank.get() as usize - 1) * self.files + (file.get() as usize - 1))
    }

    fn checked_slot(&self, position: Position) -> Result<usize, SquaresError> {
        self.slot(position)
            .ok_or(SquaresError::InvalidPosition(position))
    }

    /// Writes `piece` into `slot`, keeping the reverse index consistent.
    ///
    /// A piece that already stands elsewhere is lifted from its old square.
    /// Returns the displaced occupant, unless it is the piece being placed.
    fn put(&mut self, slot: usize, position: Position, piece: Option<Piece>) -> Option<Piece> {
        let incoming = piece.map(|p| p.id());
        if let Some(id) = incoming {
            if let Some(old) = self.index.get(&id).copied() {
                if old != position {
                    if let Some(old_slot) = self.slot(old) {
                        self.grid[old_slot] = None;
                    }
                }
            }
        }

        let displaced = std::mem::replace(&mut self.grid[slot], piece);
        if let Some(d) = displaced {
            if Some(d.id()) != incoming {
                self.index.remove(&d.id());
            }
        }
        if let Some(p) = piece {
            self.index.insert(p.id(), position);
        }

        displaced.filter(|d| Some(d.id()) != incoming)
    }

    /// Sets or clears a square, returning the piece that stood there.
    pub fn place_piece(
        &mut self,
        piece: Option<Piece>,
        position: Position,
    ) -> Result<Option<Piece>, SquaresError> {
        let slot = self.checked_slot(position)?;
        Ok(self.put(slot, position, piece))
    }

    /// Returns the occupant of `position`, failing if it is off the board.
    pub fn find_by_position(&self, position: Position) -> Result<Option<&Piece>, SquaresError> {
        let slot = self.checked_slot(position)?;
        Ok(self.grid[slot].as_ref())
    }

    /// Returns the occupant of `position`; off-board squares are empty.
    #[inline]
    pub fn get(&self, position: Position) -> Option<&Piece> {
        self.slot(position).and_then(|slot| self.grid[slot].as_ref())
    }

    /// Mutable access to the occupant of `position`.
    ///
    /// Only the moved flag of a [`Piece`] can be changed through it.
    #[inline]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Piece> {
        let slot = self.slot(position)?;
        self.grid[slot].as_mut()
    }

    /// Returns where the piece with `id` stands, or an empty position.
    pub fn get_by_piece(&self, id: PieceId) -> Position {
        self.index.get(&id).copied().unwrap_or_default()
    }

    /// Returns the first piece of the given type and side.
    pub fn find_piece(&self, kind: PieceKind, side: Side) -> Option<(Position, &Piece)> {
        self.get_pieces(kind, side).next()
    }

    /// Iterates over every square, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&Piece>)> + '_ {
        let files = self.files;
        self.grid.iter().enumerate().filter_map(move |(slot, piece)| {
            let file = File::new((slot % files) as u8 + 1)?;
            let rank = Rank::new((slot / files) as u8 + 1)?;
            Some((Position::new(file, rank), piece.as_ref()))
        })
    }

    /// Iterates over all pieces of `side`.
    pub fn get_all_pieces(&self, side: Side) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.iter()
            .filter_map(|(position, piece)| piece.map(|p| (position, p)))
            .filter(move |(_, p)| p.side() == side)
    }

    /// Iterates over the pieces of one type and side.
    pub fn get_pieces(
        &self,
        kind: PieceKind,
        side: Side,
    ) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.get_all_pieces(side)
            .filter(move |(_, p)| p.kind() == kind)
    }

    /// Relocates the occupant of `from` to `to`, returning the captured piece.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>, SquaresError> {
        let from_slot = self.checked_slot(from)?;
        let to_slot = self.checked_slot(to)?;
        let piece = self.grid[from_slot].ok_or(SquaresError::EmptySquare(from))?;
        if from_slot == to_slot {
            return Ok(None);
        }
        Ok(self.put(to_slot, to, Some(piece)))
    }

    /// Moves `from` to `to`, runs `f`, then restores both squares.
    ///
    /// The restore happens in a drop guard, so the placement is reverted on
    /// every exit path of `f`, unwinding included. `f` may nest further
    /// temporary moves; anything else it changes is not reverted.
    pub fn move_piece_temporarily<R, F>(
        &mut self,
        from: Position,
        to: Position,
        f: F,
    ) -> Result<R, SquaresError>
    where
        F: FnOnce(&mut Squares) -> R,
    {
        let guard = TemporaryMove::begin(self, from, to)?;
        Ok(f(&mut *guard.squares))
    }

    /// Iterates from `origin` (exclusive) in `direction` up to the board edge.
    pub fn iter_by_direction(
        &self,
        origin: Position,
        direction: Direction,
    ) -> impl Iterator<Item = Position> {
        let edge = self.edge;
        let start = if direction == Direction::new(0, 0) {
            None
        } else {
            origin.offset(direction)
        };
        std::iter::successors(start, move |p| p.offset(direction))
            .take_while(move |p| p.is_within(edge))
    }

    /// Iterates over rows, top rank first when `high_to_low` is set.
    pub fn iter_over_rows(
        &self,
        high_to_low: bool,
    ) -> Box<dyn Iterator<Item = (Rank, &[Option<Piece>])> + '_> {
        let rows = self
            .grid
            .chunks(self.files)
            .enumerate()
            .filter_map(|(i, row)| Some((Rank::new(i as u8 + 1)?, row)));
        if high_to_low {
            Box::new(rows.rev())
        } else {
            Box::new(rows)
        }
    }

    /// Returns the number of placed pieces.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no piece is placed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Scoped relocation undone on drop.
struct TemporaryMove<'a> {
    squares: &'a mut Squares,
    from: (usize, Position),
    to: (usize, Position),
    moving: Piece,
    captured: Option<Piece>,
}

impl<'a> TemporaryMove<'a> {
    fn begin(squares: &'a mut Squares, from: Position, to: Position) -> Result<Self, SquaresError> {
        let from_slot = squares.checked_slot(from)?;
        let to_slot = squares.checked_slot(to)?;
        let moving = squares.grid[from_slot].ok_or(SquaresError::EmptySquare(from))?;
        let captured = squares.move_piece(from, to)?;
        Ok(TemporaryMove {
            squares,
            from: (from_slot, from),
            to: (to_slot, to),
            moving,
            captured,
        })
    }
}

impl Drop for TemporaryMove<'_> {
    fn drop(&mut self) {
        let (to_slot, to) = self.to;
        let (from_slot, from) = self.from;
        if from_slot == to_slot {
            return;
        }
        self.squares.put(to_slot, to, self.captured);
        self.squares.put(from_slot, from, Some(self.moving));
    }
}

/// FEN-style placement field, top rank first.
impl fmt::Display for Squares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, row)) in self.iter_over_rows(true).enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece)?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn standard() -> Squares {
        Squares::new(Position::STANDARD_EDGE).unwrap()
    }

    fn assert_bijection(squares: &Squares) {
        let occupied: Vec<_> = squares
            .iter()
            .filter_map(|(p, piece)| piece.map(|piece| (p, piece.id())))
            .collect();
        assert_eq!(occupied.len(), squares.len());
        for (position, id) in occupied {
            assert_eq!(squares.get_by_piece(id), position);
        }
    }

    #[test]
    fn place_and_find() {
        let mut squares = standard();
        let rook = Piece::new(PieceKind::Rook, Side::White);
        assert_eq!(squares.place_piece(Some(rook), pos("a1")), Ok(None));
        assert_eq!(squares.find_by_position(pos("a1")), Ok(Some(&rook)));
        assert_eq!(squares.get_by_piece(rook.id()), pos("a1"));
        assert_eq!(
            squares.find_piece(PieceKind::Rook, Side::White),
            Some((pos("a1"), &rook))
        );
        assert_eq!(squares.find_piece(PieceKind::Rook, Side::Black), None);
        assert_bijection(&squares);
    }

    #[test]
    fn place_out_of_bounds() {
        let mut squares = standard();
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        assert_eq!(
            squares.place_piece(Some(pawn), pos("i1")),
            Err(SquaresError::InvalidPosition(pos("i1")))
        );
        assert_eq!(
            squares.find_by_position(pos("a9")),
            Err(SquaresError::InvalidPosition(pos("a9")))
        );
        assert_eq!(squares.get(pos("a9")), None);
        assert!(squares.is_empty());
    }

    #[test]
    fn partial_edge_is_rejected() {
        assert_eq!(
            Squares::new(pos("h")),
            Err(SquaresError::PartialPosition(pos("h")))
        );
    }

    #[test]
    fn replacing_a_piece_keeps_index_consistent() {
        let mut squares = standard();
        let knight = Piece::new(PieceKind::Knight, Side::White);
        let bishop = Piece::new(PieceKind::Bishop, Side::Black);
        squares.place_piece(Some(knight), pos("c3")).unwrap();
        let displaced = squares.place_piece(Some(bishop), pos("c3")).unwrap();
        assert_eq!(displaced, Some(knight));
        assert_eq!(squares.get_by_piece(knight.id()), Position::empty());

        // Placing an already placed piece elsewhere lifts it from its old square.
        squares.place_piece(Some(bishop), pos("d4")).unwrap();
        assert_eq!(squares.get(pos("c3")), None);
        assert_eq!(squares.len(), 1);
        assert_bijection(&squares);
    }

    #[test]
    fn move_piece_captures() {
        let mut squares = standard();
        let queen = Piece::new(PieceKind::Queen, Side::White);
        let pawn = Piece::new(PieceKind::Pawn, Side::Black);
        squares.place_piece(Some(queen), pos("d1")).unwrap();
        squares.place_piece(Some(pawn), pos("d7")).unwrap();

        assert_eq!(squares.move_piece(pos("d1"), pos("d7")), Ok(Some(pawn)));
        assert_eq!(squares.get(pos("d7")), Some(&queen));
        assert_eq!(squares.get(pos("d1")), None);
        assert_eq!(
            squares.move_piece(pos("d1"), pos("d2")),
            Err(SquaresError::EmptySquare(pos("d1")))
        );
        assert_bijection(&squares);
    }

    #[test]
    fn temporary_move_restores_placement() {
        let mut squares = standard();
        let rook = Piece::new(PieceKind::Rook, Side::White);
        let knight = Piece::new(PieceKind::Knight, Side::Black);
        squares.place_piece(Some(rook), pos("a1")).unwrap();
        squares.place_piece(Some(knight), pos("a5")).unwrap();
        let before = squares.clone();

        let seen = squares
            .move_piece_temporarily(pos("a1"), pos("a5"), |sq| {
                (sq.get(pos("a5")).copied(), sq.get(pos("a1")).copied(), sq.len())
            })
            .unwrap();
        assert_eq!(seen, (Some(rook), None, 1));
        assert_eq!(squares, before);
    }

    #[test]
    fn nested_temporary_moves_restore_placement() {
        let mut squares = standard();
        let white = Piece::new(PieceKind::Pawn, Side::White);
        let black = Piece::new(PieceKind::Pawn, Side::Black);
        squares.place_piece(Some(white), pos("e5")).unwrap();
        squares.place_piece(Some(black), pos("d5")).unwrap();
        let before = squares.clone();

        let placement = squares
            .move_piece_temporarily(pos("d5"), pos("d6"), |sq| {
                sq.move_piece_temporarily(pos("e5"), pos("d6"), |sq| sq.to_string())
                    .unwrap()
            })
            .unwrap();
        assert_eq!(placement, "8/8/3P4/8/8/8/8/8");
        assert_eq!(squares, before);
    }

    #[test]
    fn temporary_move_restores_after_panic() {
        let mut squares = standard();
        let king = Piece::new(PieceKind::King, Side::White);
        squares.place_piece(Some(king), pos("e1")).unwrap();
        let before = squares.clone();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            squares
                .move_piece_temporarily(pos("e1"), pos("e2"), |_| panic!("boom"))
                .ok();
        }));
        assert!(outcome.is_err());
        assert_eq!(squares, before);
    }

    #[test]
    fn temporary_move_from_empty_square_fails() {
        let mut squares = standard();
        assert_eq!(
            squares.move_piece_temporarily(pos("e1"), pos("e2"), |_| ()),
            Err(SquaresError::EmptySquare(pos("e1")))
        );
    }

    #[test]
    fn iter_by_direction_stops_at_edge() {
        let squares = standard();
        let ray: Vec<_> = squares
            .iter_by_direction(pos("e4"), Direction::TOP_RIGHT)
            .collect();
        assert_eq!(ray, vec![pos("f5"), pos("g6"), pos("h7")]);
        assert_eq!(squares.iter_by_direction(pos("h8"), Direction::TOP).count(), 0);
        assert_eq!(
            squares
                .iter_by_direction(pos("a1"), Direction::new(0, 0))
                .count(),
            0
        );
    }

    #[test]
    fn iter_by_direction_respects_small_boards() {
        let squares = Squares::new(pos("e5")).unwrap();
        let ray: Vec<_> = squares.iter_by_direction(pos("a1"), Direction::RIGHT).collect();
        assert_eq!(ray, vec![pos("b1"), pos("c1"), pos("d1"), pos("e1")]);
    }

    #[test]
    fn rows_and_display() {
        let mut squares = standard();
        squares
            .place_piece(Some(Piece::new(PieceKind::King, Side::White)), pos("e1"))
            .unwrap();
        squares
            .place_piece(Some(Piece::new(PieceKind::King, Side::Black)), pos("e8"))
            .unwrap();
        let ranks: Vec<u8> = squares.iter_over_rows(true).map(|(r, _)| r.get()).collect();
        assert_eq!(ranks, vec![8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(squares.iter_over_rows(false).next().map(|(r, _)| r), Some(Rank::R1));
        assert_eq!(squares.to_string(), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn rows_on_a_small_board() {
        let squares = Squares::new(pos("c5")).unwrap();
        let down: Vec<u8> = squares.iter_over_rows(true).map(|(r, _)| r.get()).collect();
        let mut up: Vec<u8> = squares.iter_over_rows(false).map(|(r, _)| r.get()).collect();
        assert_eq!(down, vec![5, 4, 3, 2, 1]);
        up.reverse();
        assert_eq!(up, down);
        assert!(squares.iter_over_rows(true).all(|(_, row)| row.len() == 3));
    }

    #[test]
    fn pieces_by_side_and_kind() {
        let mut squares = standard();
        for s in ["a2", "b2", "c2"] {
            squares
                .place_piece(Some(Piece::new(PieceKind::Pawn, Side::White)), pos(s))
                .unwrap();
        }
        squares
            .place_piece(Some(Piece::new(PieceKind::Pawn, Side::Black)), pos("a7"))
            .unwrap();
        assert_eq!(squares.get_all_pieces(Side::White).count(), 3);
        assert_eq!(squares.get_pieces(PieceKind::Pawn, Side::Black).count(), 1);
        assert_eq!(squares.get_pieces(PieceKind::Rook, Side::White).count(), 0);
    }
}
