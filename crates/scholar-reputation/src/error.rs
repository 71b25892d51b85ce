//! Error types for reputation aggregation

use thiserror::Error;

/// Errors that can occur while computing a reputation
///
/// Any single failed read fails the whole aggregation; there are no
/// partial results.
#[derive(Error, Debug)]
pub enum ReputationError {
    /// A persistence read failed
    #[error("Storage error: {0}")]
    Store(String),

    /// A blocking read task panicked or was cancelled
    #[error("Read task failed: {0}")]
    Task(String),
}
