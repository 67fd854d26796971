//! Matrix value type and arithmetic.

use std::fmt;

use rand::Rng;

use crate::Error;

/// Largest row or column count produced by [`Matrix::random`].
pub const MAX_DIM: usize = 4;

/// Largest element value produced by the random generators.
pub const MAX_VALUE: i32 = 10;

/// A dense, row-major matrix of `i32` elements.
///
/// A `Matrix` always has at least one row and one column. Ownership moves
/// through the pipeline: the producer that generated it, then the buffer,
/// then the consumer that withdrew it, which drops it once it is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    elements: Vec<i32>,
}

impl Matrix {
    /// Builds a matrix from row-major elements.
    pub fn new(rows: usize, cols: usize, elements: Vec<i32>) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize(rows, cols));
        }
        if elements.len() != rows * cols {
            return Err(Error::ElementCount {
                expected: rows * cols,
                actual: elements.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            elements,
        })
    }

    /// Generates a matrix with random dimensions in `1..=MAX_DIM` and
    /// random elements in `1..=MAX_VALUE`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let rows = rng.gen_range(1..=MAX_DIM);
        let cols = rng.gen_range(1..=MAX_DIM);
        Self::filled(rows, cols, rng)
    }

    /// Generates a `rows` x `cols` matrix with random elements.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn sized<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(Self::filled(rows, cols, rng))
    }

    fn filled<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let elements = (0..rows * cols)
            .map(|_| rng.gen_range(1..=MAX_VALUE))
            .collect();
        Self {
            rows,
            cols,
            elements,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn elements(&self) -> &[i32] {
        &self.elements
    }

    /// Returns `true` when `self x other` is defined.
    pub fn can_multiply(&self, other: &Matrix) -> bool {
        self.cols == other.rows
    }

    /// Computes `self x other`.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the column count of
    /// `self` differs from the row count of `other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, Error> {
        if !self.can_multiply(other) {
            return Err(Error::DimensionMismatch(self.rows, self.cols, other.rows, other.cols));
        }

        let mut elements = vec![0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                elements[i * other.cols + j] = sum;
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            elements,
        })
    }

    /// Sum of all elements.
    pub fn sum(&self) -> i64 {
        self.elements.iter().map(|&v| i64::from(v)).sum()
    }

    fn get(&self, row: usize, col: usize) -> i32 {
        self.elements[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.elements.chunks(self.cols) {
            write!(f, "|")?;
            for value in row {
                write!(f, "{:>5}", value)?;
            }
            writeln!(f, " |")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_multiply() {
        let a = Matrix::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Matrix::new(3, 2, vec![7, 8, 9, 10, 11, 12]).unwrap();

        let c = a.multiply(&b).unwrap();

        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 2);
        assert_eq!(c.elements(), &[58, 64, 139, 154]);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::new(2, 3, vec![1; 6]).unwrap();
        let b = Matrix::new(2, 3, vec![1; 6]).unwrap();

        assert!(!a.can_multiply(&b));
        assert_eq!(a.multiply(&b), Err(Error::DimensionMismatch(2, 3, 2, 3)));
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert_eq!(Matrix::new(0, 2, vec![]), Err(Error::InvalidSize(0, 2)));
        assert_eq!(
            Matrix::new(2, 2, vec![1, 2, 3]),
            Err(Error::ElementCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_sum() {
        let m = Matrix::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.sum(), 10);
    }

    #[test]
    fn test_random_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let m = Matrix::random(&mut rng);
            assert!((1..=MAX_DIM).contains(&m.rows()));
            assert!((1..=MAX_DIM).contains(&m.cols()));
            assert!(m.elements().iter().all(|v| (1..=MAX_VALUE).contains(v)));
        }
    }

    #[test]
    fn test_sized() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = Matrix::sized(3, 3, &mut rng).unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 3));
        assert_eq!(m.elements().len(), 9);

        assert!(Matrix::sized(0, 3, &mut rng).is_none());
        assert!(Matrix::sized(3, 0, &mut rng).is_none());
    }

    #[test]
    fn test_display() {
        let m = Matrix::new(2, 2, vec![1, 2, 30, 4]).unwrap();
        assert_eq!(m.to_string(), "|    1    2 |\n|   30    4 |\n");
    }
}
