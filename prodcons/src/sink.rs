//! Where consumers report the products they computed.

use matrix::Matrix;

/// Receives every `a x b = product` triple a consumer computes.
pub trait ResultSink: Sync {
    fn emit(&self, consumer: usize, a: &Matrix, b: &Matrix, product: &Matrix);
}

/// Prints each multiplication to stdout.
///
/// The whole triple goes out in one `println!` so output from different
/// consumers does not interleave.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn emit(&self, consumer: usize, a: &Matrix, b: &Matrix, product: &Matrix) {
        println!("consumer {}:\n{}    X\n{}    =\n{}", consumer, a, b, product);
    }
}
