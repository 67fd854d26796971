//! Bounded-buffer producer/consumer matrix multiplication.
//!
//! `prodcons` runs a pool of producer threads that generate matrices into a
//! fixed-capacity FIFO buffer and a pool of consumer threads that withdraw
//! them, searching for compatible pairs to multiply.
//!
//! # Protocol
//!
//! - One mutex guards the buffer and the termination flag; two condition
//!   variables signal "not full" and "not empty".
//! - Producers stop once the shared production counter reaches the target.
//!   The producer that reaches it sets the termination flag and wakes all
//!   waiters.
//! - Consumers withdraw a first matrix, then candidates one at a time until
//!   `first.cols == candidate.rows`. A consumer that finds the buffer empty
//!   after termination drops whatever it holds and exits.
//! - Every worker keeps private [`WorkerStats`]; [`run`] aggregates them into
//!   a [`RunReport`] whose produced and consumed totals must match.
//!
//! # Example
//!
//! ```no_run
//! use prodcons::{MatrixMode, RunConfig, StdoutSink};
//!
//! fn main() -> Result<(), prodcons::Error> {
//!     let config = RunConfig::symmetric(2, 8, 100, MatrixMode::Random);
//!     let report = prodcons::run(&config, &config.mode, &StdoutSink)?;
//!
//!     assert!(report.is_reconciled());
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

mod buffer;
mod config;
mod context;
mod error;
mod run;
mod sink;
mod source;
mod stats;

pub mod consumer;
pub mod producer;

pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_MATRICES, DEFAULT_WORKERS, MatrixMode, RunConfig};
pub use context::{AbortOnPanic, BufferGuard, Context};
pub use error::Error;
pub use run::run;
pub use sink::{ResultSink, StdoutSink};
pub use source::MatrixSource;
pub use stats::{RunReport, WorkerStats};
