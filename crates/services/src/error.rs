//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SettingsError, SummaryError};

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    EmptyQuestionSet,
    /// The current question was already resolved; callers treat this as a no-op.
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("session already completed")]
    Completed,
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Errors emitted by question sources. Never shown to players: the provider
/// swaps in the fallback set instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question source returned no results (response code {0})")]
    NoResults(u8),
    #[error("question source returned {actual} of {expected} questions")]
    ShortResponse { expected: usize, actual: usize },
    #[error("could not decode question text: {0}")]
    Decode(String),
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
}

/// Errors emitted while reading configuration from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
