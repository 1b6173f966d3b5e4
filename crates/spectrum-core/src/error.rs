//! Error types for the game engine.

use thiserror::Error;

use crate::session::Step;

/// Result type for round controller operations.
pub type GameResult<T> = Result<T, GameError>;

/// Result type for question repository loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for result export and archiving.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised by a user action the current session cannot accept.
///
/// None of these leave the session modified: a rejected action is a no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The action belongs to a different step.
    #[error("not available during {actual} (needs {expected})")]
    WrongStep {
        /// Step the action requires.
        expected: Step,
        /// Step the session is in.
        actual: Step,
    },

    /// Player slot outside 0..2.
    #[error("invalid player slot {0}, expected 0 or 1")]
    InvalidPlayerSlot(usize),

    /// A player name is empty.
    #[error("player {0} has no name")]
    MissingPlayerName(usize),

    /// Both players have the same name.
    #[error("both players are called '{0}'")]
    DuplicatePlayer(String),

    /// The category is not in the repository.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Play cannot start without a category.
    #[error("no categories selected")]
    NoCategoriesSelected,

    /// Guesser points outside {0, 2, 3, 4}.
    #[error("invalid guesser points {0}, use 0, 2, 3 or 4")]
    InvalidPoints(u8),

    /// Save requested before the guesser's points were chosen.
    #[error("guesser points not chosen yet")]
    NoPendingPoints,

    /// No question is on the table.
    #[error("no current question")]
    NoCurrentQuestion,
}

/// Errors that prevent the question repository from loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the question table.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A row could not be parsed.
    #[error("malformed question table: {0}")]
    Csv(#[from] csv::Error),

    /// A required field is blank.
    #[error("question {id}: empty {field}")]
    EmptyField {
        /// Id of the offending question.
        id: u32,
        /// Name of the blank column.
        field: &'static str,
    },

    /// Two rows share an id.
    #[error("duplicate question id {0}")]
    DuplicateId(u32),

    /// The table has no questions.
    #[error("question table is empty")]
    Empty,
}

/// Errors raised while serializing or archiving results.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Results could not be written as a table.
    #[error("failed to write results table: {0}")]
    Csv(#[from] csv::Error),

    /// The archive store rejected the operation.
    #[error("archive store error: {0}")]
    Store(String),

    /// I/O failure while writing.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
