//! Error types for matrix operations.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("invalid matrix size {0}x{1}")]
    InvalidSize(usize, usize),

    #[error("expected {expected} elements, got {actual}")]
    ElementCount { expected: usize, actual: usize },
}
