//! Board coordinates.
//!
//! Coordinates are 1-based so that a [`Position`] can describe boards of any
//! size up to 16x16. A position may be *partial* (only a file or only a rank
//! is known), which is how under-specified algebraic notation is represented.

use std::fmt;

/// A file (column), `a` through `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    pub const MIN: File = File(1);
    pub const MAX: File = File(16);

    pub const A: File = File(1);
    pub const B: File = File(2);
    pub const C: File = File(3);
    pub const D: File = File(4);
    pub const E: File = File(5);
    pub const F: File = File(6);
    pub const G: File = File(7);
    pub const H: File = File(8);

    /// Creates a file from its 1-based number.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(File(value))
        } else {
            None
        }
    }

    /// Returns the 1-based number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Creates a file from a lowercase letter (`'a'`-`'p'`).
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='p' => Some(File(c as u8 - b'a' + 1)),
            _ => None,
        }
    }

    /// Returns the letter of this file.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self.0 - 1) as char
    }

    /// Shifts the file by `delta`, returning `None` when leaving `a..p`.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let value = self.0 as i16 + delta as i16;
        if value < Self::MIN.0 as i16 || value > Self::MAX.0 as i16 {
            None
        } else {
            Some(File(value as u8))
        }
    }

    /// Returns the signed distance from `other` to `self`.
    #[inline]
    pub const fn distance(self, other: File) -> i8 {
        self.0 as i8 - other.0 as i8
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row), `1` through `16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const MIN: Rank = Rank(1);
    pub const MAX: Rank = Rank(16);

    pub const R1: Rank = Rank(1);
    pub const R2: Rank = Rank(2);
    pub const R3: Rank = Rank(3);
    pub const R4: Rank = Rank(4);
    pub const R5: Rank = Rank(5);
    pub const R6: Rank = Rank(6);
    pub const R7: Rank = Rank(7);
    pub const R8: Rank = Rank(8);

    /// Creates a rank from its 1-based number.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Rank(value))
        } else {
            None
        }
    }

    /// Returns the 1-based number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Parses a rank from its decimal form (`"1"`-`"16"`, no leading zero).
    pub fn from_digits(s: &str) -> Option<Self> {
        if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u8>().ok().and_then(Self::new)
    }

    /// Shifts the rank by `delta`, returning `None` when leaving `1..16`.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let value = self.0 as i16 + delta as i16;
        if value < Self::MIN.0 as i16 || value > Self::MAX.0 as i16 {
            None
        } else {
            Some(Rank(value as u8))
        }
    }

    /// Returns the signed distance from `other` to `self`.
    #[inline]
    pub const fn distance(self, other: Rank) -> i8 {
        self.0 as i8 - other.0 as i8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A step on the board used for ray iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub file: i8,
    pub rank: i8,
}

impl Direction {
    pub const TOP: Direction = Direction::new(0, 1);
    pub const BOTTOM: Direction = Direction::new(0, -1);
    pub const RIGHT: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(-1, 0);
    pub const TOP_RIGHT: Direction = Direction::new(1, 1);
    pub const TOP_LEFT: Direction = Direction::new(-1, 1);
    pub const BOTTOM_RIGHT: Direction = Direction::new(1, -1);
    pub const BOTTOM_LEFT: Direction = Direction::new(-1, -1);

    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::RIGHT,
        Direction::LEFT,
        Direction::TOP,
        Direction::BOTTOM,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::TOP_RIGHT,
        Direction::BOTTOM_LEFT,
        Direction::BOTTOM_RIGHT,
        Direction::TOP_LEFT,
    ];

    /// Queen and king directions.
    pub const ALL: [Direction; 8] = [
        Direction::RIGHT,
        Direction::LEFT,
        Direction::TOP,
        Direction::BOTTOM,
        Direction::TOP_RIGHT,
        Direction::BOTTOM_LEFT,
        Direction::BOTTOM_RIGHT,
        Direction::TOP_LEFT,
    ];

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Direction { file, rank }
    }
}

/// A square on the board, possibly only partially specified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}

impl Position {
    /// Top-right corner of the largest supported board.
    pub const MAX_EDGE: Position = Position::new(File::MAX, Rank::MAX);

    /// Top-right corner of the standard board.
    pub const STANDARD_EDGE: Position = Position::new(File::H, Rank::R8);

    /// Creates a full position.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Position {
            file: Some(file),
            rank: Some(rank),
        }
    }

    /// Creates a position with neither coordinate set.
    #[inline]
    pub const fn empty() -> Self {
        Position {
            file: None,
            rank: None,
        }
    }

    /// Creates a position from optional coordinates.
    #[inline]
    pub const fn partial(file: Option<File>, rank: Option<Rank>) -> Self {
        Position { file, rank }
    }

    /// Returns true when both coordinates are set.
    #[inline]
    pub const fn is_full(self) -> bool {
        self.file.is_some() && self.rank.is_some()
    }

    /// Returns true when neither coordinate is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.file.is_none() && self.rank.is_none()
    }

    /// Returns both coordinates of a full position.
    #[inline]
    pub const fn coords(self) -> Option<(File, Rank)> {
        match (self.file, self.rank) {
            (Some(file), Some(rank)) => Some((file, rank)),
            _ => None,
        }
    }

    /// Returns true if the position is full and lies on a board whose
    /// top-right corner is `edge`.
    pub fn is_within(self, edge: Position) -> bool {
        match (self.coords(), edge.coords()) {
            (Some((file, rank)), Some((edge_file, edge_rank))) => {
                file <= edge_file && rank <= edge_rank
            }
            _ => false,
        }
    }

    /// Steps a full position in `direction`.
    ///
    /// Only the global `a1..p16` bounds are checked here; use
    /// [`is_within`](Self::is_within) for a concrete board.
    pub fn offset(self, direction: Direction) -> Option<Position> {
        let (file, rank) = self.coords()?;
        Some(Position::new(
            file.offset(direction.file)?,
            rank.offset(direction.rank)?,
        ))
    }

    /// Returns true if every coordinate set on `hint` matches this position.
    pub fn matches(self, hint: Position) -> bool {
        hint.file.map_or(true, |f| self.file == Some(f))
            && hint.rank.map_or(true, |r| self.rank == Some(r))
    }

    /// Parses full (`"e4"`), partial (`"e"`, `"4"`) or empty (`""`) notation.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = match chars.clone().next() {
            Some(c) if c.is_ascii_lowercase() => {
                chars.next();
                Some(File::from_char(c)?)
            }
            _ => None,
        };
        let digits = chars.as_str();
        let rank = if digits.is_empty() {
            None
        } else {
            Some(Rank::from_digits(digits)?)
        };
        Some(Position { file, rank })
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Position(-)")
        } else {
            write!(f, "Position({})", self)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{}", file)?;
        }
        if let Some(rank) = self.rank {
            write!(f, "{}", rank)?;
        }
        Ok(())
    }
}
