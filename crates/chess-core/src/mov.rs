//! Move input representation and algebraic notation parsing.
//!
//! Three shapes are recognised, tried in this order:
//! - normal moves: `e4`, `Nf3`, `Rdf8`, `exd5`, `Qh4+`
//! - promotions: `e8=Q`, `dxe1=N#`
//! - castling: `O-O`, `O-O-O` (also written with `0` or `o`)
//!
//! En passant has no notation of its own; it is a normal pawn move onto the
//! en-passant target square.

use crate::{PieceKind, Position};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing move notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move notation")]
    Empty,

    #[error("unrecognised move notation: \"{0}\"")]
    Invalid(String),
}

/// Castling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingType {
    /// Kingside castling (O-O).
    Short,
    /// Queenside castling (O-O-O).
    Long,
}

impl CastlingType {
    /// Both castling types, short first.
    pub const ALL: [CastlingType; 2] = [CastlingType::Short, CastlingType::Long];

    /// File direction from the king towards its rook.
    #[inline]
    pub const fn file_direction(self) -> i8 {
        match self {
            CastlingType::Short => 1,
            CastlingType::Long => -1,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let is_o = |c: char| matches!(c, 'O' | '0' | 'o');
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [a, '-', b] if is_o(*a) && is_o(*b) => Some(CastlingType::Short),
            [a, '-', b, '-', c] if is_o(*a) && is_o(*b) && is_o(*c) => Some(CastlingType::Long),
            _ => None,
        }
    }
}

impl fmt::Display for CastlingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastlingType::Short => write!(f, "O-O"),
            CastlingType::Long => write!(f, "O-O-O"),
        }
    }
}

/// A move of a single piece, possibly with a partial source square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalMove {
    pub piece: PieceKind,
    pub from: Position,
    pub to: Position,
}

impl NormalMove {
    pub const fn new(piece: PieceKind, from: Position, to: Position) -> Self {
        NormalMove { piece, from, to }
    }
}

/// A pawn move onto the last rank, replacing the pawn with `promoted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromotionMove {
    pub from: Position,
    pub to: Position,
    pub promoted: PieceKind,
}

impl PromotionMove {
    pub const fn new(from: Position, to: Position, promoted: PieceKind) -> Self {
        PromotionMove { from, to, promoted }
    }
}

/// A move as entered by a player, before the board resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal(NormalMove),
    Promotion(PromotionMove),
    Castling(CastlingType),
}

impl Move {
    /// Parses algebraic notation. A trailing `+` or `#` is ignored.
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let trimmed = notation.trim();
        if trimmed.is_empty() {
            return Err(NotationError::Empty);
        }
        let body = trimmed
            .strip_suffix(|c: char| c == '+' || c == '#')
            .unwrap_or(trimmed);
        let invalid = || NotationError::Invalid(notation.to_string());

        if let Some(m) = parse_normal(body) {
            return Ok(Move::Normal(m));
        }
        if let Some(m) = parse_promotion(body) {
            return Ok(Move::Promotion(m));
        }
        CastlingType::parse(body)
            .map(Move::Castling)
            .ok_or_else(invalid)
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_notation(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Normal(m) => {
                if let Some(letter) = m.piece.notation() {
                    write!(f, "{}", letter)?;
                }
                write!(f, "{}{}", m.from, m.to)
            }
            Move::Promotion(m) => {
                let letter = m.promoted.notation().unwrap_or('?');
                write!(f, "{}{}={}", m.from, m.to, letter)
            }
            Move::Castling(c) => write!(f, "{}", c),
        }
    }
}

impl From<NormalMove> for Move {
    fn from(m: NormalMove) -> Self {
        Move::Normal(m)
    }
}

impl From<PromotionMove> for Move {
    fn from(m: PromotionMove) -> Self {
        Move::Promotion(m)
    }
}

impl From<CastlingType> for Move {
    fn from(c: CastlingType) -> Self {
        Move::Castling(c)
    }
}

fn parse_normal(s: &str) -> Option<NormalMove> {
    let (piece, rest) = match s.chars().next()? {
        c @ ('K' | 'Q' | 'B' | 'N' | 'R') => (PieceKind::from_notation(Some(c))?, &s[1..]),
        _ => (PieceKind::Pawn, s),
    };
    let (from, to) = parse_squares(rest)?;
    Some(NormalMove::new(piece, from, to))
}

fn parse_promotion(s: &str) -> Option<PromotionMove> {
    let (squares, promoted) = s.rsplit_once('=')?;
    let promoted = match promoted {
        "Q" | "R" | "B" | "N" => PieceKind::from_notation(promoted.chars().next())?,
        _ => return None,
    };
    let (from, to) = parse_squares(squares)?;
    Some(PromotionMove::new(from, to, promoted))
}

/// Splits `[from]x?<to>` into a partial source and a full destination.
fn parse_squares(s: &str) -> Option<(Position, Position)> {
    let to_start = s.rfind(|c: char| c.is_ascii_lowercase() && c != 'x')?;
    let to = Position::from_algebraic(&s[to_start..]).filter(|p| p.is_full())?;
    let prefix = &s[..to_start];
    let prefix = prefix.strip_suffix('x').unwrap_or(prefix);
    let from = Position::from_algebraic(prefix)?;
    Some((from, to))
}
