//! Parallel evaluation over many formal sums.
//!
//! Identity searches apply the same map to large batches of independent
//! sums. Batches above a size threshold are spread over rayon's thread
//! pool; smaller ones run sequentially.

use rayon::prelude::*;

/// Configuration for batch evaluation.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum batch size to enable parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 32,
        }
    }
}

impl ParallelConfig {
    /// Configuration that always runs sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }
}

/// Applies `f` to every input, preserving order.
pub fn mapped_parallel<T, U, F>(inputs: &[T], f: F, config: &ParallelConfig) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if inputs.len() < config.parallel_threshold {
        inputs.iter().map(f).collect()
    } else {
        inputs.par_iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::SimpleParam;
    use crate::sum::FormalSum;

    type Expr = FormalSum<SimpleParam<u32>>;

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs: Vec<Expr> = (0..100).map(|i| Expr::single(&i) * 2).collect();
        let double = |e: &Expr| e * 2;
        let forced = ParallelConfig {
            parallel_threshold: 1, // Force parallel path for testing
        };
        let par = mapped_parallel(&inputs, double, &forced);
        let seq = mapped_parallel(&inputs, double, &ParallelConfig::sequential());
        assert_eq!(par, seq);
        assert_eq!(par[7].coeff(&7), 4);
    }
}
