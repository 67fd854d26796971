//! Error types for producer/consumer runs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix error: {0}")]
    Matrix(#[from] matrix::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("refused to insert a missing matrix")]
    MissingMatrix,

    #[error("buffer lock poisoned by a panicking worker")]
    Poisoned,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("worker {0} panicked")]
    WorkerPanicked(String),
}
