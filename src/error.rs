//! Error types for the tactician crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the tactician crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("invalid move: position {position} is out of range (board has {cells} cells)")]
    MoveOutOfRange { position: usize, cells: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error(
        "invalid geometry: board size {size} with {win_length} in a row (need 1 <= win_length <= size)"
    )]
    InvalidGeometry { size: usize, win_length: usize },

    #[error("wrong board length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation} '{}': {source}", path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {format} Q-table in '{}': {source}", path.display())]
    MalformedQTable {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("invalid opponent '{input}'. Expected one of: {expected}")]
    ParseOpponent { input: String, expected: String },

    #[error("invalid player '{input}' (expected 'X' or 'O')")]
    ParsePlayer { input: String },
}

impl Error {
    /// Whether this error belongs to the persistence family (load/save failures).
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::MalformedQTable { .. } | Error::SerializationContext { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
