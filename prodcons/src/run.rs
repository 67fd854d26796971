//! Spawning and joining the worker pools.

use std::thread::{self, ScopedJoinHandle};

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::context::Context;
use crate::sink::ResultSink;
use crate::source::MatrixSource;
use crate::stats::{RunReport, WorkerStats};
use crate::{Error, consumer, producer};

/// Runs one complete producer/consumer session and returns the totals.
///
/// Producers and consumers are plain OS threads scoped to this call; they
/// borrow the shared [`Context`] and hand their statistics back on join.
pub fn run(
    config: &RunConfig,
    source: &dyn MatrixSource,
    sink: &dyn ResultSink,
) -> Result<RunReport, Error> {
    config.validate()?;
    let ctx = Context::new(config.buffer_size, config.matrices);

    info!(
        producers = config.producers,
        consumers = config.consumers,
        buffer_size = config.buffer_size,
        matrices = config.matrices,
        mode = %config.mode,
        "starting run"
    );

    let (producers, consumers) = thread::scope(|s| -> Result<_, Error> {
        let mut producers = Vec::with_capacity(config.producers);
        for id in 0..config.producers {
            let ctx = &ctx;
            let spawned = thread::Builder::new()
                .name(format!("producer-{}", id))
                .spawn_scoped(s, move || producer::run(ctx, id, source));
            producers.push(spawned.inspect_err(|_| ctx.abort())?);
        }

        let mut consumers = Vec::with_capacity(config.consumers);
        for id in 0..config.consumers {
            let ctx = &ctx;
            let spawned = thread::Builder::new()
                .name(format!("consumer-{}", id))
                .spawn_scoped(s, move || consumer::run(ctx, id, sink));
            consumers.push(spawned.inspect_err(|_| ctx.abort())?);
        }

        Ok((join_all(producers), join_all(consumers)))
    })?;

    let report = RunReport::aggregate(&producers?, &consumers?);

    let remaining = ctx.remaining();
    if remaining > 0 {
        warn!(remaining, "matrices left in the buffer at shutdown");
    }
    info!(
        produced = report.produced,
        consumed = report.consumed,
        multiplied = report.multiplied,
        "run finished"
    );
    Ok(report)
}

/// Joins every handle, even after a failure, and returns the first error.
fn join_all(
    handles: Vec<ScopedJoinHandle<'_, Result<WorkerStats, Error>>>,
) -> Result<Vec<WorkerStats>, Error> {
    let mut stats = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for handle in handles {
        let name = handle.thread().name().unwrap_or("worker").to_string();
        let result = match handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerPanicked(name)),
        };
        match result {
            Ok(s) => stats.push(s),
            Err(e) => {
                warn!(error = %e, "worker failed");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(stats),
    }
}
