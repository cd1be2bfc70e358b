//! Game-state evaluation.
//!
//! A [`Board`] owns an ordered chain of [`StateRule`]s. The first rule that
//! matches the side to move decides the [`State`]; when none matches the
//! board is [`State::Clear`].

mod standard;

pub use standard::{Check, Checkmate, FiftyMoves, InsufficientMaterial, Stalemate};

use crate::Board;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// History entries the fifty-move rule counts by default.
pub const DEFAULT_FIFTY_MOVE_LIMIT: usize = 50;

/// Coarse classification of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateType {
    /// Nothing noteworthy.
    Clear,
    /// The side to move is threatened but can still play.
    Threat,
    /// The game is drawn by rule, but moves are still accepted.
    Draw,
    /// The game is over; no further moves are accepted.
    Terminal,
}

/// State of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    Clear,
    Check,
    Checkmate,
    Stalemate,
    FiftyMoves,
    InsufficientMaterial,
}

impl State {
    /// Returns the classification of this state.
    pub const fn state_type(self) -> StateType {
        match self {
            State::Clear => StateType::Clear,
            State::Check => StateType::Threat,
            State::Checkmate | State::Stalemate | State::InsufficientMaterial => {
                StateType::Terminal
            }
            State::FiftyMoves => StateType::Draw,
        }
    }

    /// Returns true if no further moves may be made.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self.state_type(), StateType::Terminal)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Clear => "clear",
            State::Check => "check",
            State::Checkmate => "checkmate",
            State::Stalemate => "stalemate",
            State::FiftyMoves => "fifty moves",
            State::InsufficientMaterial => "insufficient material",
        };
        write!(f, "{}", name)
    }
}

/// A predicate over the board deciding its [`State`].
///
/// Rules are evaluated for the side to move. They take the board mutably
/// because legal-move generation simulates moves and fills the board's
/// caches; a rule must leave the position itself unchanged.
///
/// # Example
///
/// ```
/// use chess_rules::rules::{State, StateRule};
/// use chess_rules::{Board, BoardFactory, PieceKind, Side};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct NoPawns;
///
/// impl StateRule for NoPawns {
///     fn name(&self) -> &'static str {
///         "no_pawns"
///     }
///
///     fn evaluate(&self, board: &mut Board) -> Option<State> {
///         let pawns: usize = Side::ALL
///             .iter()
///             .map(|side| board.squares().get_pieces(PieceKind::Pawn, *side).count())
///             .sum();
///         (pawns == 0).then_some(State::InsufficientMaterial)
///     }
/// }
///
/// let factory = BoardFactory::standard().with_rules(vec![Arc::new(NoPawns)]);
/// let mut board = factory.create_filled().unwrap();
/// assert_eq!(board.state(), State::Clear);
/// ```
pub trait StateRule: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns the state this rule detects, or `None` if it does not apply.
    fn evaluate(&self, board: &mut Board) -> Option<State>;
}

/// The built-in rules, addressable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardRule {
    Checkmate,
    Stalemate,
    Check,
    FiftyMoves,
    InsufficientMaterial,
}

impl StandardRule {
    /// The default chain, in evaluation order.
    pub const DEFAULT_CHAIN: [StandardRule; 4] = [
        StandardRule::Checkmate,
        StandardRule::Stalemate,
        StandardRule::Check,
        StandardRule::FiftyMoves,
    ];

    /// Instantiates the rule.
    pub fn build(self, fifty_move_limit: usize) -> Arc<dyn StateRule> {
        match self {
            StandardRule::Checkmate => Arc::new(Checkmate),
            StandardRule::Stalemate => Arc::new(Stalemate),
            StandardRule::Check => Arc::new(Check),
            StandardRule::FiftyMoves => Arc::new(FiftyMoves::new(fifty_move_limit)),
            StandardRule::InsufficientMaterial => Arc::new(InsufficientMaterial),
        }
    }
}

/// Builds the default rule chain.
pub fn standard_rules() -> Vec<Arc<dyn StateRule>> {
    StandardRule::DEFAULT_CHAIN
        .iter()
        .map(|rule| rule.build(DEFAULT_FIFTY_MOVE_LIMIT))
        .collect()
}
