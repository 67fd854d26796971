//! Small integer matrices.
//!
//! `matrix` provides the value type that flows through the pcmatrix
//! bounded buffer, together with the operations the workers rely on:
//! random generation, multiplication, element sums and text rendering.
//!
//! # Example
//!
//! ```
//! use matrix::Matrix;
//!
//! let a = Matrix::new(2, 2, vec![1, 2, 3, 4]).unwrap();
//! let b = Matrix::new(2, 1, vec![5, 6]).unwrap();
//!
//! let c = a.multiply(&b).unwrap();
//! assert_eq!(c.elements(), &[17, 39]);
//! assert_eq!(c.sum(), 56);
//! ```

mod error;
mod matrix;

pub use error::Error;
pub use matrix::{MAX_DIM, MAX_VALUE, Matrix};
