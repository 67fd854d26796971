//! Producer worker.

use tracing::{debug, warn};

use crate::Error;
use crate::context::Context;
use crate::source::MatrixSource;
use crate::stats::WorkerStats;

/// Inserts matrices from `source` until the run's target count is reached.
///
/// The matrix is generated before taking the lock. After every wait the
/// termination flag is checked again, since a sibling producer may have
/// reached the target meanwhile; in that case the fresh matrix is dropped
/// uncounted. The producer whose insertion reaches the target sets the flag
/// and wakes everyone.
pub fn run(ctx: &Context, id: usize, source: &dyn MatrixSource) -> Result<WorkerStats, Error> {
    let _abort = ctx.abort_on_panic();
    let mut stats = WorkerStats::default();

    while ctx.produced() < ctx.target() {
        let matrix = source.next_matrix();
        let shape = matrix.as_ref().map(|m| (m.rows(), m.cols(), m.sum()));

        let mut guard = ctx.lock()?.wait_not_full()?;
        if guard.is_finished() {
            debug!(producer = id, "target reached by a sibling, stopping");
            break;
        }

        if let Err(e) = guard.put(matrix) {
            warn!(producer = id, error = %e, "insertion rejected");
            continue;
        }

        let produced = guard.record_produced();
        if produced == ctx.target() {
            debug!(producer = id, produced, "production target reached");
            guard.finish();
        }
        drop(guard);

        if let Some((rows, cols, sum)) = shape {
            stats.matrices += 1;
            stats.element_sum += sum;
            debug!(producer = id, produced, rows, cols, "produced matrix");
        }
    }

    debug!(producer = id, matrices = stats.matrices, "producer done");
    Ok(stats)
}
