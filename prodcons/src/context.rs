//! Shared run state: the buffer, its lock and condition variables, the
//! shared counters and the termination flag.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use matrix::Matrix;
use tracing::warn;

use crate::Error;
use crate::buffer::BoundedBuffer;

struct State {
    buffer: BoundedBuffer,
    finished: bool,
}

/// State shared by every producer and consumer of one run.
///
/// Workers borrow the context; nothing here is global. All buffer access
/// goes through [`Context::lock`], which hands out a [`BufferGuard`].
pub struct Context {
    state: Mutex<State>,
    not_full: Condvar,
    not_empty: Condvar,
    produced: AtomicUsize,
    consumed: AtomicUsize,
    target: usize,
}

impl Context {
    /// Creates the context for a run of `target` matrices through a buffer
    /// of `capacity` slots.
    pub fn new(capacity: usize, target: usize) -> Self {
        Self {
            state: Mutex::new(State {
                buffer: BoundedBuffer::new(capacity),
                finished: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            produced: AtomicUsize::new(0),
            consumed: AtomicUsize::new(0),
            target,
        }
    }

    pub fn lock(&self) -> Result<BufferGuard<'_>, Error> {
        let state = self.state.lock().map_err(|_| Error::Poisoned)?;
        Ok(BufferGuard { ctx: self, state })
    }

    /// Total number of matrices the producers must insert.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Matrices inserted so far across all producers.
    pub fn produced(&self) -> usize {
        self.produced.load(Ordering::SeqCst)
    }

    /// Matrices withdrawn so far across all consumers.
    pub fn consumed(&self) -> usize {
        self.consumed.load(Ordering::SeqCst)
    }

    /// Matrices still sitting in the buffer.
    pub fn remaining(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .buffer
            .len()
    }

    /// Ends the run early so nobody waits forever.
    pub(crate) fn abort(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.finished = true;
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Returns a value that aborts the run if dropped during a panic.
    ///
    /// Each worker holds one for its whole lifetime.
    pub fn abort_on_panic(&self) -> AbortOnPanic<'_> {
        AbortOnPanic(self)
    }
}

pub struct AbortOnPanic<'a>(&'a Context);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            warn!("worker panicked, waking all waiters");
            self.0.abort();
        }
    }
}

/// Exclusive access to the buffer.
///
/// Holding a `BufferGuard` means holding the context lock, so `put` and
/// `get` can never run unlocked.
pub struct BufferGuard<'a> {
    ctx: &'a Context,
    state: MutexGuard<'a, State>,
}

impl BufferGuard<'_> {
    /// Blocks while the buffer is full and the run is still going.
    pub fn wait_not_full(self) -> Result<Self, Error> {
        let BufferGuard { ctx, state } = self;
        let state = ctx
            .not_full
            .wait_while(state, |s| s.buffer.is_full() && !s.finished)
            .map_err(|_| Error::Poisoned)?;
        Ok(BufferGuard { ctx, state })
    }

    /// Blocks while the buffer is empty and the run is still going.
    ///
    /// On return the buffer is non-empty, or it is empty and the run has
    /// finished, in which case nothing more will ever arrive.
    pub fn wait_not_empty(self) -> Result<Self, Error> {
        let BufferGuard { ctx, state } = self;
        let state = ctx
            .not_empty
            .wait_while(state, |s| s.buffer.is_empty() && !s.finished)
            .map_err(|_| Error::Poisoned)?;
        Ok(BufferGuard { ctx, state })
    }

    /// Inserts `matrix` and wakes one waiting consumer.
    pub fn put(&mut self, matrix: Option<Matrix>) -> Result<(), Error> {
        self.state.buffer.put(matrix)?;
        self.ctx.not_empty.notify_one();
        Ok(())
    }

    /// Withdraws the oldest matrix and wakes one waiting producer.
    pub fn get(&mut self) -> Matrix {
        let matrix = self.state.buffer.get();
        self.ctx.not_full.notify_one();
        matrix
    }

    /// Counts one inserted matrix and returns the new total.
    pub fn record_produced(&mut self) -> usize {
        self.ctx.produced.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Counts one withdrawn matrix and returns the new total.
    pub fn record_consumed(&mut self) -> usize {
        self.ctx.consumed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Sets the termination flag and wakes every waiter.
    pub fn finish(&mut self) {
        self.state.finished = true;
        self.ctx.not_empty.notify_all();
        self.ctx.not_full.notify_all();
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    pub fn is_empty(&self) -> bool {
        self.state.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.state.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.state.buffer.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn unit() -> Matrix {
        Matrix::new(1, 1, vec![1]).unwrap()
    }

    #[test]
    fn test_finish_releases_waiting_consumer() {
        let ctx = Context::new(1, 1);

        thread::scope(|s| {
            let waiter = s.spawn(|| {
                let guard = ctx.lock().unwrap().wait_not_empty().unwrap();
                (guard.is_empty(), guard.is_finished())
            });

            thread::sleep(Duration::from_millis(50));
            ctx.lock().unwrap().finish();

            assert_eq!(waiter.join().unwrap(), (true, true));
        });
    }

    #[test]
    fn test_get_wakes_waiting_producer() {
        let ctx = Context::new(1, 2);
        ctx.lock().unwrap().put(Some(unit())).unwrap();

        thread::scope(|s| {
            let producer = s.spawn(|| {
                let mut guard = ctx.lock().unwrap().wait_not_full().unwrap();
                guard.put(Some(unit())).unwrap();
                guard.len()
            });

            thread::sleep(Duration::from_millis(50));
            let mut guard = ctx.lock().unwrap();
            guard.get();
            drop(guard);

            assert_eq!(producer.join().unwrap(), 1);
        });
    }

    #[test]
    fn test_abort_on_panic_marks_finished() {
        let ctx = Context::new(1, 1);

        thread::scope(|s| {
            let result = s
                .spawn(|| {
                    let _abort = ctx.abort_on_panic();
                    let mut guard = ctx.lock().unwrap();
                    guard.get();
                })
                .join();
            assert!(result.is_err());
        });

        assert!(matches!(ctx.lock(), Err(Error::Poisoned)));
        assert!(ctx.state.lock().unwrap_or_else(PoisonError::into_inner).finished);
    }
}
