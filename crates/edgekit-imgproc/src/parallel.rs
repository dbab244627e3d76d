use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride cannot hold a row.
    #[error("row stride must be > 0 and hold {1} elements, got {0}")]
    InvalidRowStride(usize, usize),

    /// The buffer is not a whole number of rows.
    #[error("buffer length {0} is not a multiple of the row stride {1}")]
    SizeMismatch(usize, usize),
}

/// Controls how the rows of an operation are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionStrategy::Serial => write!(f, "serial"),
            ExecutionStrategy::ParallelRows => write!(f, "parallel rows"),
            ExecutionStrategy::Fixed(n) => write!(f, "fixed pool of {n} threads"),
        }
    }
}

/// Apply `op` to every row of a strided buffer.
///
/// The buffer is split into rows of `stride` elements, and `op` receives the
/// row index together with the first `row_len` elements of that row. Rows are
/// disjoint, so the parallel strategies need no synchronization.
///
/// # Arguments
///
/// * `dst` - The buffer to split, a whole number of rows long.
/// * `stride` - The number of elements between the start of two rows.
/// * `row_len` - The number of elements of each row handed to `op`.
/// * `strategy` - The execution strategy.
/// * `op` - The operation applied to each `(row index, row)` pair.
pub fn execute_rows<T, F>(
    dst: &mut [T],
    stride: usize,
    row_len: usize,
    strategy: ExecutionStrategy,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if stride == 0 || row_len > stride {
        return Err(ParallelError::InvalidRowStride(stride, row_len));
    }

    if dst.len() % stride != 0 {
        return Err(ParallelError::SizeMismatch(dst.len(), stride));
    }

    let run_parallel = |dst: &mut [T]| {
        dst.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| op(y, &mut row[..row_len]));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(stride)
                .enumerate()
                .for_each(|(y, row)| op(y, &mut row[..row_len]));
        }
        ExecutionStrategy::ParallelRows => run_parallel(dst),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| run_parallel(dst));
        }
    }

    Ok(())
}
