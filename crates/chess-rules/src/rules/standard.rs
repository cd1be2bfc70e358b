//! Built-in state rules.

use super::{State, StateRule};
use crate::Board;
use chess_core::{PieceKind, Side};

/// In check with no legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkmate;

impl StateRule for Checkmate {
    fn name(&self) -> &'static str {
        "checkmate"
    }

    fn evaluate(&self, board: &mut Board) -> Option<State> {
        let side = board.turn();
        (board.is_in_check(side) && board.moves(side).is_empty()).then_some(State::Checkmate)
    }
}

/// Not in check, but no legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stalemate;

impl StateRule for Stalemate {
    fn name(&self) -> &'static str {
        "stalemate"
    }

    fn evaluate(&self, board: &mut Board) -> Option<State> {
        let side = board.turn();
        (!board.is_in_check(side) && board.moves(side).is_empty()).then_some(State::Stalemate)
    }
}

/// The king of the side to move is attacked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Check;

impl StateRule for Check {
    fn name(&self) -> &'static str {
        "check"
    }

    fn evaluate(&self, board: &mut Board) -> Option<State> {
        let side = board.turn();
        board.is_in_check(side).then_some(State::Check)
    }
}

/// `limit` consecutive moves without a pawn move or a capture.
#[derive(Debug, Clone, Copy)]
pub struct FiftyMoves {
    limit: usize,
}

impl FiftyMoves {
    pub const fn new(limit: usize) -> Self {
        FiftyMoves { limit }
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for FiftyMoves {
    fn default() -> Self {
        FiftyMoves::new(super::DEFAULT_FIFTY_MOVE_LIMIT)
    }
}

impl StateRule for FiftyMoves {
    fn name(&self) -> &'static str {
        "fifty_moves"
    }

    fn evaluate(&self, board: &mut Board) -> Option<State> {
        (board.halfmove_clock() >= self.limit).then_some(State::FiftyMoves)
    }
}

/// Neither side can possibly mate: bare kings, or a single minor piece left.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsufficientMaterial;

impl StateRule for InsufficientMaterial {
    fn name(&self) -> &'static str {
        "insufficient_material"
    }

    fn evaluate(&self, board: &mut Board) -> Option<State> {
        let squares = board.squares();
        let mut material = Side::ALL.iter().flat_map(|side| {
            squares
                .get_all_pieces(*side)
                .map(|(_, piece)| piece.kind())
                .filter(|kind| *kind != PieceKind::King)
        });

        let insufficient = match (material.next(), material.next()) {
            (None, _) => true,
            (Some(PieceKind::Knight | PieceKind::Bishop), None) => true,
            _ => false,
        };
        insufficient.then_some(State::InsufficientMaterial)
    }
}
