// CPU loop-nest variants.
//
// Every kernel here is a legal transformation of the reference nest in
// `crate::scop` and must produce bit-identical output.
pub mod interchange;
pub mod parallel;
pub mod tiled;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::Kernel;
use crate::scop::matmul_scop;

pub use interchange::InterchangedKernel;
pub use parallel::ParallelKernel;
pub use tiled::TiledKernel;

/// Runs the untransformed region.
///
/// This is the baseline every other kernel is checked against.
#[derive(Debug, Clone)]
pub struct ReferenceKernel;

impl ReferenceKernel {
    pub fn new() -> Self {
        ReferenceKernel
    }
}

impl Default for ReferenceKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Kernel<T> for ReferenceKernel {
    fn name(&self) -> &str {
        "reference"
    }

    fn multiply_into(&self, a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
        matmul_scop(a, b, c, m, k, n);
    }
}

/// Selector for the available kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelKind {
    #[default]
    Reference,
    Interchanged,
    Tiled,
    Parallel,
}

impl KernelKind {
    pub const ALL: [KernelKind; 4] = [
        KernelKind::Reference,
        KernelKind::Interchanged,
        KernelKind::Tiled,
        KernelKind::Parallel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KernelKind::Reference => "reference",
            KernelKind::Interchanged => "interchanged",
            KernelKind::Tiled => "tiled",
            KernelKind::Parallel => "parallel",
        }
    }

    /// Construct the selected kernel.
    ///
    /// `tile` is only used by `Tiled`; `threads` only by `Parallel`, where
    /// `None` means rayon's global pool.
    pub fn build<T: Element>(
        &self,
        tile: usize,
        threads: Option<usize>,
    ) -> Result<Box<dyn Kernel<T>>> {
        debug!("building {} kernel (tile={}, threads={:?})", self, tile, threads);
        let kernel: Box<dyn Kernel<T>> = match self {
            KernelKind::Reference => Box::new(ReferenceKernel::new()),
            KernelKind::Interchanged => Box::new(InterchangedKernel::new()),
            KernelKind::Tiled => Box::new(TiledKernel::new(tile)?),
            KernelKind::Parallel => match threads {
                Some(n) => Box::new(ParallelKernel::with_threads(n)?),
                None => Box::new(ParallelKernel::new()),
            },
        };
        Ok(kernel)
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        KernelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| KernelError::UnknownKernel(s.to_string()))
    }
}
