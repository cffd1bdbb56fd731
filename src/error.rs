//! Error types for tasklog

use thiserror::Error;

/// Everything that can go wrong while handling a command.
///
/// `Parse` and `Validation` errors are always recovered at the command boundary and turned
/// into a response string, so the interactive loop keeps running. `Storage` errors are the
/// only ones carrying an underlying cause.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed command text: missing marker, bad token count, unparseable date or index
    #[error("{0}")]
    Parse(String),

    /// Syntactically fine but semantically invalid: out-of-range index, empty list...
    #[error("{0}")]
    Validation(String),

    /// File read/write failure
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
