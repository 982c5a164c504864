use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::{debug_check_lengths, Kernel};
use crate::scop::matmul_scop_rows;

/// Parallelisation of the outer i loop.
///
/// Rows of C are handed to rayon workers; every worker owns its rows
/// exclusively and reads A and B through shared references. Within a row the
/// reference j/k order is kept.
#[derive(Debug)]
pub struct ParallelKernel {
    pool: Option<ThreadPool>,
}

impl ParallelKernel {
    /// Run on rayon's global pool.
    pub fn new() -> Self {
        ParallelKernel { pool: None }
    }

    /// Run on a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(KernelError::InvalidThreads(threads));
        }
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        debug!("parallel kernel using a dedicated pool of {} threads", threads);
        Ok(ParallelKernel { pool: Some(pool) })
    }

    /// Number of workers rows are spread across.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Default for ParallelKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Kernel<T> for ParallelKernel {
    fn name(&self) -> &str {
        "parallel"
    }

    fn multiply_into(&self, a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
        debug_check_lengths(a, b, c, m, k, n);
        if c.is_empty() {
            return;
        }

        match &self.pool {
            Some(pool) => pool.install(|| rows_in_parallel(a, b, c, k, n)),
            None => rows_in_parallel(a, b, c, k, n),
        }
    }
}

fn rows_in_parallel<T: Element>(a: &[T], b: &[T], c: &mut [T], k: usize, n: usize) {
    c.par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, c_row)| matmul_scop_rows(a, b, c_row, i, k, n));
}
