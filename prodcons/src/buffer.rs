//! Fixed-capacity circular buffer of matrices.
//!
//! `BoundedBuffer` does no locking of its own. It lives inside the run
//! context's mutex and is only reachable through a held
//! [`BufferGuard`](crate::BufferGuard), which is what makes "put/get only
//! under the lock" a compile-time property.

use matrix::Matrix;
use tracing::debug;

use crate::Error;

/// Circular slot array with head and tail cursors.
///
/// Not part of the public API; callers go through `BufferGuard`:
///
/// ```compile_fail
/// let _ = prodcons::BoundedBuffer::new(1);
/// ```
pub struct BoundedBuffer {
    slots: Vec<Option<Matrix>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl BoundedBuffer {
    /// Creates an empty buffer. `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "bounded buffer capacity must be at least 1");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Stores `matrix` in the head slot.
    ///
    /// A missing matrix is refused without touching the buffer. Calling this
    /// on a full buffer is a synchronization bug and panics.
    pub fn put(&mut self, matrix: Option<Matrix>) -> Result<(), Error> {
        let Some(matrix) = matrix else {
            debug!("put called without a matrix, ignoring");
            return Err(Error::MissingMatrix);
        };
        assert!(
            !self.is_full(),
            "put on a full buffer ({} slots occupied)",
            self.count
        );

        debug_assert!(self.slots[self.head].is_none());
        self.slots[self.head] = Some(matrix);
        self.head = (self.head + 1) % self.slots.len();
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the oldest matrix.
    ///
    /// Calling this on an empty buffer is a synchronization bug and panics.
    pub fn get(&mut self) -> Matrix {
        assert!(self.count > 0, "get on an empty buffer");

        let Some(matrix) = self.slots[self.tail].take() else {
            panic!("slot {} empty with {} occupied", self.tail, self.count);
        };
        self.tail = (self.tail + 1) % self.slots.len();
        self.count -= 1;
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(value: i32) -> Matrix {
        Matrix::new(1, 1, vec![value]).unwrap()
    }

    fn first(m: &Matrix) -> i32 {
        m.elements()[0]
    }

    #[test]
    fn test_fifo_order() {
        let mut buffer = BoundedBuffer::new(3);
        buffer.put(Some(square(1))).unwrap();
        buffer.put(Some(square(2))).unwrap();
        buffer.put(Some(square(3))).unwrap();

        assert!(buffer.is_full());
        assert_eq!(first(&buffer.get()), 1);
        assert_eq!(first(&buffer.get()), 2);
        assert_eq!(first(&buffer.get()), 3);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_wraps_around() {
        let mut buffer = BoundedBuffer::new(2);
        for round in 0..5 {
            buffer.put(Some(square(round * 2))).unwrap();
            buffer.put(Some(square(round * 2 + 1))).unwrap();
            assert_eq!(buffer.len(), 2);
            assert_eq!(first(&buffer.get()), round * 2);
            assert_eq!(first(&buffer.get()), round * 2 + 1);
            assert_eq!(buffer.len(), 0);
        }
    }

    #[test]
    fn test_count_stays_in_bounds() {
        let mut buffer = BoundedBuffer::new(4);
        let mut next = 0;
        for step in 0..50 {
            if step % 3 == 2 && !buffer.is_empty() {
                buffer.get();
            } else if !buffer.is_full() {
                buffer.put(Some(square(next))).unwrap();
                next += 1;
            } else {
                buffer.get();
            }
            assert!(buffer.len() <= buffer.capacity());
            let occupied = buffer.slots.iter().filter(|s| s.is_some()).count();
            assert_eq!(occupied, buffer.len());
            let cap = buffer.capacity();
            if !buffer.is_full() {
                assert_eq!((buffer.head + cap - buffer.tail) % cap, buffer.len());
            }
        }
    }

    #[test]
    fn test_missing_matrix_rejected() {
        let mut buffer = BoundedBuffer::new(2);
        buffer.put(Some(square(5))).unwrap();

        assert!(matches!(buffer.put(None), Err(Error::MissingMatrix)));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.head, 1);
        assert_eq!(first(&buffer.get()), 5);
    }

    #[test]
    #[should_panic(expected = "get on an empty buffer")]
    fn test_get_on_empty_panics() {
        let mut buffer = BoundedBuffer::new(1);
        buffer.get();
    }

    #[test]
    #[should_panic(expected = "put on a full buffer")]
    fn test_put_on_full_panics() {
        let mut buffer = BoundedBuffer::new(1);
        buffer.put(Some(square(1))).unwrap();
        let _ = buffer.put(Some(square(2)));
    }
}
