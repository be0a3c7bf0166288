use std::fmt;

use crate::constants::{MAX_SIZE, MIN_SIZE};
use crate::position::Legality;

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width outside [`MIN_SIZE`, `MAX_SIZE`]
    Width(u8),
    /// Height outside [`MIN_SIZE`, `MAX_SIZE`]
    Height(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Width(w) => {
                write!(f, "width {w} out of range [{MIN_SIZE}, {MAX_SIZE}]")
            }
            ConfigError::Height(h) => {
                write!(f, "height {h} out of range [{MIN_SIZE}, {MAX_SIZE}]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A text coordinate that could not be turned into a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexError {
    /// Not of the form `<letter><number>` or `pass`
    Malformed(String),
    /// Well formed but outside the current board
    OffBoard(String),
}

impl fmt::Display for VertexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexError::Malformed(s) => write!(f, "invalid vertex '{s}'"),
            VertexError::OffBoard(s) => write!(f, "vertex '{s}' is off the board"),
        }
    }
}

impl std::error::Error for VertexError {}

/// Failure to rebuild a position from a move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    Config(ConfigError),
    /// The record at `index` was rejected.
    Rejected { index: usize, legality: Legality },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Config(e) => write!(f, "bad configuration: {e}"),
            ReplayError::Rejected { index, legality } => {
                write!(f, "move {} rejected: {legality}", index + 1)
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Config(e) => Some(e),
            ReplayError::Rejected { .. } => None,
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        ReplayError::Config(e)
    }
}
