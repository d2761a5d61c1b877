use thiserror::Error;

/// Failures that escape to the caller.
///
/// The resolution and dispatch engines never produce these: a missing item or
/// a capability mismatch degrades to a no-op (plus an optional report). Only
/// context detection and configuration I/O are fatal.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No form context was supplied")]
    MissingContext,

    #[error("Unrecognized form context: {0}")]
    UnrecognizedContext(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
