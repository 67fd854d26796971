//! Per-worker statistics and their aggregation.

use std::fmt;

use matrix::Matrix;

/// Counters kept privately by one worker and handed back when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Matrices produced (producers) or withdrawn (consumers).
    pub matrices: usize,
    /// Sum of every element of those matrices.
    pub element_sum: i64,
    /// Successful multiplications. Always zero for producers.
    pub multiplications: usize,
}

impl WorkerStats {
    pub fn record(&mut self, matrix: &Matrix) {
        self.matrices += 1;
        self.element_sum += matrix.sum();
    }
}

/// Totals across all workers of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub produced: usize,
    pub consumed: usize,
    pub produced_sum: i64,
    pub consumed_sum: i64,
    pub multiplied: usize,
}

impl RunReport {
    pub fn aggregate(producers: &[WorkerStats], consumers: &[WorkerStats]) -> Self {
        let mut report = RunReport::default();
        for stats in producers {
            report.produced += stats.matrices;
            report.produced_sum += stats.element_sum;
        }
        for stats in consumers {
            report.consumed += stats.matrices;
            report.consumed_sum += stats.element_sum;
            report.multiplied += stats.multiplications;
        }
        report
    }

    /// Every produced matrix was consumed exactly once.
    pub fn is_reconciled(&self) -> bool {
        self.produced == self.consumed && self.produced_sum == self.consumed_sum
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sum of Matrix elements --> Produced={} = Consumed={}",
            self.produced_sum, self.consumed_sum
        )?;
        write!(
            f,
            "Matrices produced={} consumed={} multiplied={}",
            self.produced, self.consumed, self.multiplied
        )
    }
}
