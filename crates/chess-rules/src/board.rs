//! The board orchestrator.
//!
//! [`Board`] ties the placement, the side to move, the move history and the
//! state rule chain together. Legal moves and the [`State`] are computed on
//! demand and cached until the next successful make or undo.

use crate::legality;
use crate::movegen;
use crate::movers::{self, MoveError, UndoError};
use crate::result::MoveResult;
use crate::rules::{State, StateRule};
use crate::squares::Squares;
use crate::BoardFactory;
use chess_core::{CastlingType, Move, Piece, PieceKind, Position, Side};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A chess position with history.
///
/// # Example
///
/// ```
/// use chess_rules::{Board, Side, State};
///
/// let mut board = Board::standard();
/// for notation in ["f3", "e5", "g4", "Qh4"] {
///     board.make_move(notation).unwrap();
/// }
/// assert_eq!(board.state(), State::Checkmate);
/// assert_eq!(board.turn(), Side::White);
/// assert_eq!(board.move_history().last().unwrap().to_string(), "Qh4#");
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    squares: Squares,
    turn: Side,
    history: Vec<MoveResult>,
    captured: Vec<Piece>,
    rules: Vec<Arc<dyn StateRule>>,
    moves_cache: [Option<Vec<Position>>; 2],
    state_cache: Option<State>,
}

impl Board {
    /// Creates a board from a placement, the side to move and a rule chain.
    pub fn new(squares: Squares, turn: Side, rules: Vec<Arc<dyn StateRule>>) -> Self {
        Board {
            squares,
            turn,
            history: Vec::new(),
            captured: Vec::new(),
            rules,
            moves_cache: [None, None],
            state_cache: None,
        }
    }

    /// The standard starting position with the default rule chain.
    pub fn standard() -> Self {
        BoardFactory::standard()
            .create_filled()
            .expect("standard layout fits the standard board")
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn squares(&self) -> &Squares {
        &self.squares
    }

    #[inline]
    pub(crate) fn squares_mut(&mut self) -> &mut Squares {
        &mut self.squares
    }

    /// Moves made so far, oldest first.
    #[inline]
    pub fn move_history(&self) -> &[MoveResult] {
        &self.history
    }

    /// Pieces captured so far, in capture order.
    #[inline]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    #[inline]
    pub fn rules(&self) -> &[Arc<dyn StateRule>] {
        &self.rules
    }

    /// Returns the legal destinations of `piece`, or nothing if it is not on
    /// the board.
    pub fn legal_moves(&mut self, piece: &Piece) -> Vec<Position> {
        let from = self.squares.get_by_piece(piece.id());
        if from.is_empty() {
            return Vec::new();
        }
        self.legal_moves_from(from)
    }

    /// Returns the legal destinations of the piece on `from`.
    ///
    /// En passant is included for pawns of the side to move. Castling is not
    /// a destination of the king; see [`Board::castling_ability`].
    pub fn legal_moves_from(&mut self, from: Position) -> Vec<Position> {
        let Some(piece) = self.squares.get(from).copied() else {
            return Vec::new();
        };
        let mut moves = legality::legal_destinations(&mut self.squares, from);

        if piece.kind() == PieceKind::Pawn && piece.side() == self.turn {
            if let Some(target) = self.en_passant_target() {
                if movers::validate_en_passant(self, from, target).is_ok() {
                    moves.push(target);
                }
            }
        }
        moves
    }

    /// Returns every square some piece of `side` can legally move to.
    pub fn moves(&mut self, side: Side) -> &[Position] {
        let index = side.index();
        if self.moves_cache[index].is_none() {
            let origins: Vec<Position> = self
                .squares
                .get_all_pieces(side)
                .map(|(position, _)| position)
                .collect();
            let mut all = BTreeSet::new();
            for from in origins {
                all.extend(self.legal_moves_from(from));
            }
            self.moves_cache[index] = Some(all.into_iter().collect());
        }
        self.moves_cache[index].as_deref().unwrap_or(&[])
    }

    /// Returns the state of the side to move.
    pub fn state(&mut self) -> State {
        if let Some(state) = self.state_cache {
            return state;
        }

        let rules = self.rules.clone();
        let state = rules
            .iter()
            .find_map(|rule| {
                let state = rule.evaluate(self)?;
                trace!(rule = rule.name(), %state, "state rule matched");
                Some(state)
            })
            .unwrap_or_default();
        self.state_cache = Some(state);
        state
    }

    /// Returns true if the king of `side` is attacked.
    pub fn is_in_check(&self, side: Side) -> bool {
        legality::is_in_check(&self.squares, side)
    }

    /// Returns true if any piece of `by` attacks `position`.
    pub fn is_square_attacked(&self, position: Position, by: Side) -> bool {
        movegen::is_square_attacked(&self.squares, position, by)
    }

    /// The square a pawn may currently capture en passant onto.
    pub fn en_passant_target(&self) -> Option<Position> {
        movers::en_passant_target(self)
    }

    /// Returns whether `side` may castle.
    ///
    /// The practical ability is the one a move would be validated against and
    /// only the side to move has it. The theoretical ability only looks at
    /// whether king and rook are still unmoved.
    pub fn castling_ability(&self, side: Side, castling: CastlingType, practical: bool) -> bool {
        if practical && side != self.turn {
            return false;
        }
        movers::castling_plan(self, side, castling, practical).is_ok()
    }

    /// Number of moves since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|result| !result.is_pawn_move() && !result.is_capture())
            .count()
    }

    /// Parses and makes a move given in algebraic notation.
    ///
    /// Returns `Ok(None)` without touching the board once the game is over.
    pub fn make_move(&mut self, notation: &str) -> Result<Option<MoveResult>, MoveError> {
        let mv = Move::from_notation(notation)?;
        self.make(&mv)
    }

    /// Makes a move for the side to move.
    pub fn make(&mut self, mv: &Move) -> Result<Option<MoveResult>, MoveError> {
        let state = self.state();
        if state.is_terminal() {
            debug!(%state, input = %mv, "game is over, move ignored");
            return Ok(None);
        }

        let kind = movers::make(mv, self)?;
        let mut result = MoveResult::new(kind);
        if let Some(piece) = result.captured_piece() {
            self.captured.push(piece);
        }
        self.history.push(result);
        self.turn = !self.turn;
        self.invalidate();

        result.state = self.state();
        if let Some(last) = self.history.last_mut() {
            last.state = result.state;
        }
        debug!(
            side = %result.side(),
            notation = %result,
            state = %result.state,
            "move made"
        );
        Ok(Some(result))
    }

    /// Undoes the last move. Returns `Ok(None)` when there is nothing to undo.
    ///
    /// Undo is only exact when the board was not modified by other means
    /// since the move was made.
    pub fn undo_last_move(&mut self) -> Result<Option<MoveResult>, UndoError> {
        let Some(last) = self.history.pop() else {
            return Ok(None);
        };

        if let Err(error) = movers::undo(&last.kind, self) {
            warn!(notation = %last, %error, "undo failed");
            self.history.push(last);
            self.invalidate();
            return Err(error);
        }

        if last.is_capture() {
            self.captured.pop();
        }
        self.turn = !self.turn;
        self.invalidate();
        debug!(side = %last.side(), notation = %last, "move undone");
        Ok(Some(last))
    }

    fn invalidate(&mut self) {
        trace!("board caches invalidated");
        self.moves_cache = [None, None];
        self.state_cache = None;
    }
}
