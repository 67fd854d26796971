//! Where producers get their matrices from.

use matrix::Matrix;

use crate::config::MatrixMode;

/// Generates the matrices a producer inserts.
///
/// Shared by every producer thread of a run, so implementations must be
/// `Sync`. Returning `None` models a generator that failed to produce a
/// matrix; the buffer refuses it.
pub trait MatrixSource: Sync {
    fn next_matrix(&self) -> Option<Matrix>;
}

impl MatrixSource for MatrixMode {
    fn next_matrix(&self) -> Option<Matrix> {
        let mut rng = rand::thread_rng();
        match *self {
            MatrixMode::Random => Some(Matrix::random(&mut rng)),
            MatrixMode::Sized(n) => Matrix::sized(n, n, &mut rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_mode_is_square() {
        let m = MatrixMode::Sized(3).next_matrix().unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 3));
    }

    #[test]
    fn test_random_mode_bounds() {
        for _ in 0..50 {
            let m = MatrixMode::Random.next_matrix().unwrap();
            assert!(m.rows() <= matrix::MAX_DIM);
            assert!(m.cols() <= matrix::MAX_DIM);
        }
    }

    #[test]
    fn test_zero_size_yields_nothing() {
        assert!(MatrixMode::Sized(0).next_matrix().is_none());
    }
}
