//! Run configuration.

use std::fmt;

use crate::Error;

pub const DEFAULT_WORKERS: usize = 1;
pub const DEFAULT_BUFFER_SIZE: usize = 200;
pub const DEFAULT_MATRICES: usize = 1200;

/// How producers shape the matrices they generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixMode {
    /// Random dimensions in `1..=matrix::MAX_DIM`.
    #[default]
    Random,
    /// Square matrices of the given size.
    Sized(usize),
}

impl From<usize> for MatrixMode {
    /// `0` selects random dimensions, any other value a fixed square size.
    fn from(mode: usize) -> Self {
        match mode {
            0 => MatrixMode::Random,
            n => MatrixMode::Sized(n),
        }
    }
}

impl fmt::Display for MatrixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixMode::Random => write!(f, "0"),
            MatrixMode::Sized(n) => write!(f, "{}", n),
        }
    }
}

/// Parameters fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub producers: usize,
    pub consumers: usize,
    pub buffer_size: usize,
    pub matrices: usize,
    pub mode: MatrixMode,
}

impl RunConfig {
    /// Same number of producer and consumer threads.
    pub fn symmetric(workers: usize, buffer_size: usize, matrices: usize, mode: MatrixMode) -> Self {
        Self {
            producers: workers,
            consumers: workers,
            buffer_size,
            matrices,
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.producers == 0 || self.consumers == 0 {
            return Err(Error::InvalidConfig(format!(
                "need at least one producer and one consumer, got {} and {}",
                self.producers, self.consumers
            )));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig("buffer size must be at least 1".into()));
        }
        if self.matrices == 0 {
            return Err(Error::InvalidConfig("matrix count must be at least 1".into()));
        }
        if self.mode == MatrixMode::Sized(0) {
            return Err(Error::InvalidConfig("matrix size must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::symmetric(
            DEFAULT_WORKERS,
            DEFAULT_BUFFER_SIZE,
            DEFAULT_MATRICES,
            MatrixMode::Random,
        )
    }
}
