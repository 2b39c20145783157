//! Error types for disktemp

use std::io;
use thiserror::Error;

/// Result type alias for disktemp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum Error {
    /// The external tool could not be started
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external tool exited with a status we do not tolerate
    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    /// The external tool was killed by a signal
    #[error("{program} was terminated by a signal")]
    Terminated { program: String },

    /// The device lister wrote to its error stream
    #[error("{program} returned an error: {stderr}")]
    UnexpectedStderr { program: String, stderr: String },

    /// The external tool did not finish before the deadline
    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A lookup task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

/// Non-fatal failures while reading a temperature out of tool output.
///
/// These never abort a run: the affected channel is reported with a `null` value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// No line carried the expected keyword
    #[error("Temperature information not found for {0}")]
    LineNotFound(String),

    /// The keyword line was present but held no usable number
    #[error("Temperature value not found for {0}")]
    ValueNotFound(String),
}
