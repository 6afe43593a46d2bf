//! Error types for quiz operations.

use std::path::PathBuf;
use thiserror::Error;

use super::PlayerId;

/// Errors raised by the question bank, configuration and session.
///
/// Every variant is recoverable: the session is left unchanged and can
/// always be reset to a clean state.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to read question file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question JSON from {origin}")]
    ParseJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed question #{index} in {origin}: {reason}")]
    MalformedQuestion {
        origin: String,
        index: usize,
        reason: String,
    },

    #[error("not enough questions: need {needed}, pool has {available}")]
    InsufficientQuestions { needed: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot {action} while {state}")]
    IllegalTransition {
        action: &'static str,
        state: String,
    },

    #[error("answer {index} is out of range for {player} ({available} answers)")]
    InvalidAnswer {
        player: PlayerId,
        index: usize,
        available: usize,
    },

    #[error("question pool is not loaded yet")]
    PoolNotReady,
}

impl QuizError {
    /// True for failures that come from loading a question source.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            QuizError::ReadFile { .. }
                | QuizError::ParseJson { .. }
                | QuizError::MalformedQuestion { .. }
        )
    }
}

/// Shorthand result type used across the crate.
pub type QuizResult<T> = Result<T, QuizError>;
