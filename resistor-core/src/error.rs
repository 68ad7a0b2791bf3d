//! Error type shared by every stage of a run.

use thiserror::Error;

/// Result type alias using [`SolverError`].
pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// Run parameters rejected before anything is allocated
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The potential field could not be obtained
    #[error("Allocation error: cannot allocate {cells} grid cells: {reason}")]
    Allocation { cells: usize, reason: String },

    /// A reporter failed to write its output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub fn config(msg: impl Into<String>) -> Self {
        SolverError::Configuration(msg.into())
    }
}
