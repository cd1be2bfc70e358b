//! Chess piece representation.

use crate::Side;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Piece types a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the algebraic notation letter. Pawns have none.
    pub const fn notation(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Parses an algebraic notation letter; `None` selects a pawn.
    pub const fn from_notation(notation: Option<char>) -> Option<Self> {
        match notation {
            None => Some(PieceKind::Pawn),
            Some('N') => Some(PieceKind::Knight),
            Some('B') => Some(PieceKind::Bishop),
            Some('R') => Some(PieceKind::Rook),
            Some('Q') => Some(PieceKind::Queen),
            Some('K') => Some(PieceKind::King),
            Some(_) => None,
        }
    }

    /// Material weight used by metric reporting. The king is priceless.
    pub const fn weight(self) -> u8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => u8::MAX,
        }
    }

    /// Returns the placement character (uppercase for White).
    pub const fn to_char(self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// Parses a placement character into a piece type and side.
    pub const fn from_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Process-unique identity of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u32);

impl PieceId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        PieceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A concrete piece: its type, owner and whether it has moved.
///
/// Every call to [`Piece::new`] yields a piece with a fresh [`PieceId`], so two
/// pawns of the same side are still distinguishable after they swap squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    side: Side,
    moved: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece {
            id: PieceId::next(),
            kind,
            side,
            moved: false,
        }
    }

    /// Creates a piece already marked as moved.
    pub fn new_moved(kind: PieceKind, side: Side) -> Self {
        Piece {
            moved: true,
            ..Piece::new(kind, side)
        }
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub const fn is_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    /// Returns true if `other` belongs to the opposing side.
    #[inline]
    pub fn is_opponent_of(&self, other: &Piece) -> bool {
        self.side != other.side
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.to_char(self.side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_notation() {
        assert_eq!(PieceKind::Pawn.notation(), None);
        assert_eq!(PieceKind::Knight.notation(), Some('N'));
        assert_eq!(PieceKind::from_notation(None), Some(PieceKind::Pawn));
        assert_eq!(PieceKind::from_notation(Some('Q')), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_notation(Some('Z')), None);
    }

    #[test]
    fn piece_to_char() {
        assert_eq!(PieceKind::Pawn.to_char(Side::White), 'P');
        assert_eq!(PieceKind::Pawn.to_char(Side::Black), 'p');
        assert_eq!(PieceKind::King.to_char(Side::White), 'K');
        assert_eq!(PieceKind::Knight.to_char(Side::Black), 'n');
    }

    #[test]
    fn piece_from_char() {
        assert_eq!(
            PieceKind::from_char('P'),
            Some((PieceKind::Pawn, Side::White))
        );
        assert_eq!(
            PieceKind::from_char('k'),
            Some((PieceKind::King, Side::Black))
        );
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn weights() {
        assert_eq!(PieceKind::Pawn.weight(), 1);
        assert_eq!(PieceKind::Bishop.weight(), PieceKind::Knight.weight());
        assert_eq!(PieceKind::Queen.weight(), 9);
        assert_eq!(PieceKind::King.weight(), u8::MAX);
    }

    #[test]
    fn pieces_get_distinct_ids() {
        let a = Piece::new(PieceKind::Pawn, Side::White);
        let b = Piece::new(PieceKind::Pawn, Side::White);
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert!(!a.is_moved());
        assert!(Piece::new_moved(PieceKind::Rook, Side::Black).is_moved());
    }

    #[test]
    fn set_moved_keeps_identity() {
        let mut rook = Piece::new(PieceKind::Rook, Side::White);
        let id = rook.id();
        rook.set_moved(true);
        assert!(rook.is_moved());
        assert_eq!(rook.id(), id);
        assert_eq!(rook.to_string(), "R");
    }
}
