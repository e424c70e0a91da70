//! # Worker Error Types
//!
//! The protocol itself carries no error replies - generation is pure and
//! deterministic, so a caller simply re-sends. What CAN fail is the worker
//! instance: a panicked or shut-down thread surfaces here as a
//! disconnected channel, and the caller's move is to replace the worker.

use thiserror::Error;

/// Errors that can occur talking to a generation worker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// The worker thread is gone; the instance must be replaced.
    #[error("worker disconnected: the instance is dead and must be replaced")]
    Disconnected,
}

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;
