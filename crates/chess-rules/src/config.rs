//! Board configuration loaded from TOML.
//!
//! ```toml
//! edge = "h8"
//! first_row = "RNBQKBNR"
//! rules = ["checkmate", "stalemate", "check", "fifty_moves"]
//! fifty_move_limit = 50
//! ```

use crate::rules::{StandardRule, StateRule, DEFAULT_FIFTY_MOVE_LIMIT};
use chess_core::{PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The edge is not a full square between a1 and p16.
    #[error("invalid board edge: {0:?}")]
    InvalidEdge(String),
    /// The first row names an unknown piece or does not fit the board.
    #[error("invalid first row: {0:?}")]
    InvalidFirstRow(String),
}

/// Board size, starting layout and state rule chain.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Top-right square of the board. Defaults to "h8".
    #[serde(default = "default_edge")]
    pub edge: String,
    /// Back-rank layout from the a-file on, one piece letter per square.
    /// Defaults to "RNBQKBNR".
    #[serde(default = "default_first_row")]
    pub first_row: String,
    /// State rules in evaluation order.
    #[serde(default = "default_rules")]
    pub rules: Vec<StandardRule>,
    /// Quiet moves after which the fifty-move rule applies. Defaults to 50.
    #[serde(default = "default_fifty_move_limit")]
    pub fifty_move_limit: usize,
}

fn default_edge() -> String {
    "h8".to_string()
}

fn default_first_row() -> String {
    "RNBQKBNR".to_string()
}

fn default_rules() -> Vec<StandardRule> {
    StandardRule::DEFAULT_CHAIN.to_vec()
}

fn default_fifty_move_limit() -> usize {
    DEFAULT_FIFTY_MOVE_LIMIT
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            edge: default_edge(),
            first_row: default_first_row(),
            rules: default_rules(),
            fifty_move_limit: default_fifty_move_limit(),
        }
    }
}

impl BoardConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), edge = %config.edge, "loaded board config");
        Ok(config)
    }

    /// Parses [`BoardConfig::edge`].
    pub fn edge_position(&self) -> Result<Position, ConfigError> {
        Position::from_algebraic(&self.edge)
            .filter(|edge| edge.is_full())
            .ok_or_else(|| ConfigError::InvalidEdge(self.edge.clone()))
    }

    /// Parses [`BoardConfig::first_row`] and checks it fits the edge.
    pub fn first_row_kinds(&self) -> Result<Vec<PieceKind>, ConfigError> {
        let invalid = || ConfigError::InvalidFirstRow(self.first_row.clone());
        let kinds = self
            .first_row
            .chars()
            .map(|c| PieceKind::from_char(c).map(|(kind, _)| kind))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        let files = self
            .edge_position()?
            .file
            .map_or(0, |file| file.get() as usize);
        if kinds.is_empty() || kinds.len() > files {
            return Err(invalid());
        }
        Ok(kinds)
    }

    /// Instantiates the configured rule chain.
    pub fn state_rules(&self) -> Vec<Arc<dyn StateRule>> {
        self.rules
            .iter()
            .map(|rule| rule.build(self.fifty_move_limit))
            .collect()
    }
}
