//! Consumer worker.
//!
//! A consumer withdraws a first matrix, then keeps withdrawing candidates one
//! at a time until one can be multiplied with it. Incompatible candidates are
//! dropped. The lock is released between withdrawals and the multiplication
//! runs unlocked, so consumers only serialize on the O(1) buffer access.

use matrix::Matrix;
use tracing::{debug, info, trace};

use crate::Error;
use crate::context::Context;
use crate::sink::ResultSink;
use crate::stats::WorkerStats;

/// Runs until the consumption target is reached, or until the buffer is
/// empty with production finished.
pub fn run(ctx: &Context, id: usize, sink: &dyn ResultSink) -> Result<WorkerStats, Error> {
    let _abort = ctx.abort_on_panic();
    let mut stats = WorkerStats::default();

    'pairs: while ctx.consumed() < ctx.target() {
        let Some(first) = withdraw(ctx, id, &mut stats)? else {
            break;
        };

        loop {
            let Some(candidate) = withdraw(ctx, id, &mut stats)? else {
                info!(
                    consumer = id,
                    rows = first.rows(),
                    cols = first.cols(),
                    "production ended before a partner was found, releasing first matrix"
                );
                break 'pairs;
            };

            match first.multiply(&candidate) {
                Ok(product) => {
                    stats.multiplications += 1;
                    debug!(
                        consumer = id,
                        multiplied = stats.multiplications,
                        "{}x{} X {}x{}",
                        first.rows(),
                        first.cols(),
                        candidate.rows(),
                        candidate.cols()
                    );
                    sink.emit(id, &first, &candidate, &product);
                    break;
                }
                Err(matrix::Error::DimensionMismatch(..)) => {
                    trace!(
                        consumer = id,
                        want_rows = first.cols(),
                        got_rows = candidate.rows(),
                        "discarding incompatible candidate"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    debug!(
        consumer = id,
        matrices = stats.matrices,
        multiplied = stats.multiplications,
        "consumer done"
    );
    Ok(stats)
}

/// Takes the next matrix out of the buffer, waiting for one if needed.
///
/// Returns `None` once the buffer is empty and production has finished.
fn withdraw(ctx: &Context, id: usize, stats: &mut WorkerStats) -> Result<Option<Matrix>, Error> {
    let mut guard = ctx.lock()?.wait_not_empty()?;
    if guard.is_empty() {
        debug!(consumer = id, "buffer drained and production finished");
        return Ok(None);
    }

    let matrix = guard.get();
    let consumed = guard.record_consumed();
    drop(guard);

    stats.record(&matrix);
    trace!(
        consumer = id,
        consumed,
        rows = matrix.rows(),
        cols = matrix.cols(),
        "consumed matrix"
    );
    Ok(Some(matrix))
}
