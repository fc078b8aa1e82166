//! Error types for phraselink operations.

use thiserror::Error;

/// Errors that can occur while parsing, addressing or linking a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An opening `<` or `&` was never terminated.
    #[error("unterminated {delimiter:?} starting at byte {offset}")]
    Parse { offset: usize, delimiter: char },

    #[error("word ordinal {ordinal} is below the first word ({base}) of {chapter}")]
    WordTooLow {
        chapter: String,
        ordinal: i64,
        base: i64,
    },

    #[error("word ordinal {ordinal} is past the last word of {chapter}")]
    WordTooHigh { chapter: String, ordinal: i64 },

    /// The word found at an ordinal is not the one the directive expects.
    #[error("word {ordinal} of {chapter} is {found:?}, expected {expected:?}")]
    Consistency {
        chapter: String,
        ordinal: i64,
        expected: String,
        found: String,
    },

    #[error("malformed markup at entity {position}: {reason}")]
    Structural { position: usize, reason: String },

    #[error("document changed (generation {current}) after iterator creation (generation {created})")]
    StaleIterator { created: u64, current: u64 },

    #[error("invalid link directive: {0}")]
    InvalidDirective(String),

    #[error("link destination {0} does not exist")]
    MissingDestination(String),

    #[error("{marker:?} not found in {document}")]
    MarkerNotFound { marker: String, document: String },

    #[error("invalid chapter identifier: {0}")]
    InvalidChapterId(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error only invalidates one directive rather than the whole file.
    pub fn is_directive_local(&self) -> bool {
        matches!(
            self,
            Error::Consistency { .. } | Error::MissingDestination(_)
        )
    }
}
