//! Records of executed moves.
//!
//! A [`MoveResult`] holds everything needed to undo the move exactly and to
//! print it in standard algebraic notation.

use crate::rules::State;
use chess_core::{CastlingType, Move, NormalMove, Piece, PieceKind, Position, PromotionMove, Side};
use std::fmt;

/// Relocation of a single piece, shared by every non-castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMove {
    pub side: Side,
    /// Resolved origin square.
    pub from: Position,
    /// Minimal disambiguation of the origin for notation output.
    pub from_short: Position,
    pub to: Position,
    pub captured: Option<Piece>,
    /// The moved flag of the piece before the move.
    pub was_moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalResult {
    pub piece: PieceKind,
    pub movement: PieceMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionResult {
    pub movement: PieceMove,
    /// The pawn as it stood before the move.
    pub pawn: Piece,
    pub promoted: Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassantResult {
    pub movement: PieceMove,
    /// Where the captured pawn stood; not the destination square.
    pub captured_at: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingResult {
    pub side: Side,
    pub castling: CastlingType,
    pub king_from: Position,
    pub king_to: Position,
    pub rook_from: Position,
    pub rook_to: Position,
}

/// What a mover did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal(NormalResult),
    Promotion(PromotionResult),
    EnPassant(EnPassantResult),
    Castling(CastlingResult),
}

/// An executed move together with the state it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub kind: MoveKind,
    /// State of the opponent right after the move.
    pub state: State,
}

impl MoveResult {
    pub(crate) fn new(kind: MoveKind) -> Self {
        MoveResult {
            kind,
            state: State::Clear,
        }
    }

    /// The side that made the move.
    pub fn side(&self) -> Side {
        match &self.kind {
            MoveKind::Normal(r) => r.movement.side,
            MoveKind::Promotion(r) => r.movement.side,
            MoveKind::EnPassant(r) => r.movement.side,
            MoveKind::Castling(r) => r.side,
        }
    }

    /// The single-piece relocation, absent for castling.
    pub fn movement(&self) -> Option<&PieceMove> {
        match &self.kind {
            MoveKind::Normal(r) => Some(&r.movement),
            MoveKind::Promotion(r) => Some(&r.movement),
            MoveKind::EnPassant(r) => Some(&r.movement),
            MoveKind::Castling(_) => None,
        }
    }

    /// The captured piece, if any.
    pub fn captured_piece(&self) -> Option<Piece> {
        self.movement().and_then(|m| m.captured)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// True for every move that relocates a pawn.
    pub fn is_pawn_move(&self) -> bool {
        match &self.kind {
            MoveKind::Normal(r) => r.piece == PieceKind::Pawn,
            MoveKind::Promotion(_) | MoveKind::EnPassant(_) => true,
            MoveKind::Castling(_) => false,
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns a fully specified input move that replays this one.
    pub fn to_move(&self) -> Move {
        match &self.kind {
            MoveKind::Normal(r) => {
                Move::Normal(NormalMove::new(r.piece, r.movement.from, r.movement.to))
            }
            MoveKind::EnPassant(r) => Move::Normal(NormalMove::new(
                PieceKind::Pawn,
                r.movement.from,
                r.movement.to,
            )),
            MoveKind::Promotion(r) => Move::Promotion(PromotionMove::new(
                r.movement.from,
                r.movement.to,
                r.promoted.kind(),
            )),
            MoveKind::Castling(r) => Move::Castling(r.castling),
        }
    }
}

/// Standard algebraic notation, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O#`.
impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MoveKind::Castling(r) => write!(f, "{}", r.castling)?,
            MoveKind::Normal(r) => {
                if let Some(letter) = r.piece.notation() {
                    write!(f, "{}", letter)?;
                }
                write_movement(f, &r.movement)?;
            }
            MoveKind::EnPassant(r) => write_movement(f, &r.movement)?,
            MoveKind::Promotion(r) => {
                write_movement(f, &r.movement)?;
                if let Some(letter) = r.promoted.kind().notation() {
                    write!(f, "={}", letter)?;
                }
            }
        }
        match self.state {
            State::Check => write!(f, "+"),
            State::Checkmate => write!(f, "#"),
            _ => Ok(()),
        }
    }
}

fn write_movement(f: &mut fmt::Formatter<'_>, movement: &PieceMove) -> fmt::Result {
    write!(f, "{}", movement.from_short)?;
    if movement.captured.is_some() {
        write!(f, "x")?;
    }
    write!(f, "{}", movement.to)
}
