//! Error types for fork-join dispatch and reduction

use std::fmt;

/// Result type alias for fork-join operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during dispatch and reduction
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid configuration (bad flag, worker count out of bounds)
    InvalidConfig(String),

    /// Buffer allocation failed for the given number of bytes
    Allocation(usize),

    /// A worker thread could not be started
    Spawn(String),

    /// A worker panicked before reaching the join barrier
    WorkerPanicked(String),

    /// Combined parallel result disagrees with the sequential baseline
    SumMismatch {
        /// Sequential single-pass result
        expected: u64,
        /// Combined per-worker result
        actual: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Allocation(bytes) => {
                write!(f, "Failed to allocate buffer of {} bytes", bytes)
            }
            Error::Spawn(msg) => write!(f, "Failed to start worker: {}", msg),
            Error::WorkerPanicked(msg) => write!(f, "Worker panicked: {}", msg),
            Error::SumMismatch { expected, actual } => write!(
                f,
                "Combined sum {} does not match sequential sum {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for Error {}
