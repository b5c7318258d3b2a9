//! Error types for the gridmark crate

use thiserror::Error;

use crate::board::{Coord, Player};

/// Main error type for the gridmark crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board geometry: side {side}, win length {win_length} (need 1 <= win length <= side <= {max_side})")]
    InvalidGeometry {
        side: usize,
        win_length: usize,
        max_side: usize,
    },

    #[error("coordinate {coord} is out of bounds for a {side}x{side} board")]
    OutOfBounds { coord: Coord, side: usize },

    #[error("row {row} has {got} cells, expected {expected} in '{context}'")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at row {row}, column {col} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        col: usize,
        context: String,
    },

    #[error("invalid player '{input}' (expected 'X' or 'O')")]
    InvalidPlayer { input: String },

    #[error("invalid coordinate '{input}' (expected 'row col')")]
    InvalidCoordinate { input: String },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("game already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Player, got: Player },

    #[error("seat {player} is not controlled by the {controller}")]
    WrongSeat {
        player: Player,
        controller: &'static str,
    },

    #[error("decision was computed at ply {decided_at} but the board is at ply {current}")]
    StaleDecision { decided_at: usize, current: usize },

    #[error("search already completed; start a new one")]
    SearchFinished,

    #[error("internal search invariant violated: {message}")]
    SearchInvariant { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
