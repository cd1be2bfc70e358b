//! Board construction.

use crate::config::{BoardConfig, ConfigError};
use crate::movers::MoveError;
use crate::rules::{standard_rules, StateRule};
use crate::squares::{Squares, SquaresError};
use crate::Board;
use chess_core::{File, Piece, PieceKind, Position, Side};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("move {index} ({notation}): {source}")]
    Replay {
        index: usize,
        notation: String,
        #[source]
        source: MoveError,
    },

    #[error("move {index} ({notation}) was played after the game ended")]
    GameOver { index: usize, notation: String },

    #[error(transparent)]
    Squares(#[from] SquaresError),
}

/// Builds boards sharing a size, back-rank layout and rule chain.
#[derive(Clone)]
pub struct BoardFactory {
    edge: Position,
    first_row: Vec<PieceKind>,
    rules: Vec<Arc<dyn StateRule>>,
}

impl BoardFactory {
    /// The standard back rank, queen side first.
    pub const STANDARD_FIRST_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// An 8x8 factory with the standard layout and rule chain.
    pub fn standard() -> Self {
        BoardFactory {
            edge: Position::STANDARD_EDGE,
            first_row: Self::STANDARD_FIRST_ROW.to_vec(),
            rules: standard_rules(),
        }
    }

    /// Builds a factory from a validated configuration.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        Ok(BoardFactory {
            edge: config.edge_position()?,
            first_row: config.first_row_kinds()?,
            rules: config.state_rules(),
        })
    }

    pub fn with_edge(mut self, edge: Position) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_first_row(mut self, first_row: Vec<PieceKind>) -> Self {
        self.first_row = first_row;
        self
    }

    pub fn with_rules(mut self, rules: Vec<Arc<dyn StateRule>>) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn edge(&self) -> Position {
        self.edge
    }

    #[inline]
    pub fn first_row(&self) -> &[PieceKind] {
        &self.first_row
    }

    /// Creates a board with `placement` and `turn` to move.
    pub fn create<I>(&self, turn: Side, placement: I) -> Result<Board, SquaresError>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let squares = Squares::from_placement(self.edge, placement)?;
        Ok(Board::new(squares, turn, self.rules.clone()))
    }

    /// Creates the starting position: back rows on the outer ranks and pawns
    /// in front of them, White to move.
    pub fn create_filled(&self) -> Result<Board, SquaresError> {
        let top = self
            .edge
            .rank
            .ok_or(SquaresError::PartialPosition(self.edge))?;
        let mut placement = Vec::with_capacity(self.first_row.len() * 4);

        for side in Side::ALL {
            let back = side.back_rank(top);
            let front = back
                .offset(side.pawn_direction())
                .ok_or(SquaresError::InvalidPosition(Position::partial(None, Some(back))))?;
            for (i, kind) in self.first_row.iter().enumerate() {
                let file = u8::try_from(i + 1)
                    .ok()
                    .and_then(File::new)
                    .ok_or(SquaresError::InvalidPosition(Position::partial(None, Some(back))))?;
                placement.push((Position::new(file, back), Piece::new(*kind, side)));
                placement.push((
                    Position::new(file, front),
                    Piece::new(PieceKind::Pawn, side),
                ));
            }
        }
        self.create(Side::White, placement)
    }

    /// Creates the starting position and replays `moves` on it.
    pub fn create_from_moves<I, S>(&self, moves: I) -> Result<Board, BoardError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = self.create_filled()?;
        for (index, notation) in moves.into_iter().enumerate() {
            let notation = notation.as_ref();
            match board.make_move(notation) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err(BoardError::GameOver {
                        index,
                        notation: notation.to_string(),
                    })
                }
                Err(source) => {
                    return Err(BoardError::Replay {
                        index,
                        notation: notation.to_string(),
                        source,
                    })
                }
            }
        }
        debug!(
            moves = board.move_history().len(),
            turn = %board.turn(),
            "board replayed"
        );
        Ok(board)
    }
}

impl Default for BoardFactory {
    fn default() -> Self {
        BoardFactory::standard()
    }
}

impl fmt::Debug for BoardFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<_> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("BoardFactory")
            .field("edge", &self.edge)
            .field("first_row", &self.first_row)
            .field("rules", &rules)
            .finish()
    }
}
