use log::{debug, info};

use crate::config::MatmulConfig;
use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::Kernel;
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::verify;

/// Edge length of the operands when nothing else is requested.
pub const DEFAULT_DIM: usize = 1024;

/// How the operands A and B are populated before a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// All zeros, like zero-initialised static storage.
    #[default]
    Zero,
    /// `flat_index % modulus` in both operands.
    Pattern { modulus: u32 },
    /// Seeded uniform values in `[-bound, bound]`, with `bound` clamped to the
    /// element type's maximum; A uses `seed`, B `seed + 1`.
    Random { seed: u64, bound: u32 },
}

impl InitPolicy {
    fn operands<T: Element>(&self, dim: usize) -> (Matrix<T>, Matrix<T>) {
        let shape = Shape::square(dim);
        match *self {
            InitPolicy::Zero => (Matrix::zeros(shape), Matrix::zeros(shape)),
            InitPolicy::Pattern { modulus } => {
                (Matrix::pattern(shape, modulus), Matrix::pattern(shape, modulus))
            }
            InitPolicy::Random { seed, bound } => (
                Matrix::random(shape, seed, bound),
                Matrix::random(shape, seed.wrapping_add(1), bound),
            ),
        }
    }
}

fn check_dim<T: Element>(dim: usize) -> Result<()> {
    let bytes = Shape::square(dim)
        .checked_numel()
        .and_then(|n| n.checked_mul(T::KIND.size_in_bytes()));
    match bytes {
        Some(b) if dim > 0 && b <= isize::MAX as usize => Ok(()),
        _ => Err(KernelError::InvalidDimension(dim)),
    }
}

/// Caller-owned operands and result of one multiplication.
///
/// A, B and C are square with the same edge length. `run` only ever writes C;
/// A and B change only through the explicit `a_mut` / `b_mut` accessors.
#[derive(Debug, Clone)]
pub struct Workspace<T: Element> {
    a: Matrix<T>,
    b: Matrix<T>,
    c: Matrix<T>,
}

impl<T: Element> Workspace<T> {
    /// Allocate `dim x dim` operands populated according to `init`.
    /// C starts zeroed.
    ///
    /// Fails with `InvalidDimension` for 0 and for any `dim` whose
    /// `dim x dim` matrix cannot be addressed.
    pub fn new(dim: usize, init: &InitPolicy) -> Result<Self> {
        check_dim::<T>(dim)?;
        let (a, b) = init.operands(dim);
        debug!("workspace {}x{} ({}) initialised with {:?}", dim, dim, T::KIND, init);
        Ok(Workspace {
            a,
            b,
            c: Matrix::square_zeros(dim),
        })
    }

    /// Wrap caller-supplied operands. Both must be square and the same size.
    pub fn with_operands(a: Matrix<T>, b: Matrix<T>) -> Result<Self> {
        for m in [&a, &b] {
            if !m.shape().is_square() {
                return Err(KernelError::NotSquare {
                    rows: m.rows(),
                    cols: m.cols(),
                });
            }
        }
        if a.rows() != b.rows() {
            return Err(KernelError::DimensionMismatch {
                m: a.rows(),
                k: a.cols(),
                k2: b.rows(),
                n: b.cols(),
            });
        }
        let c = Matrix::square_zeros(a.rows());
        Ok(Workspace { a, b, c })
    }

    pub fn dim(&self) -> usize {
        self.c.rows()
    }

    pub fn a(&self) -> &Matrix<T> {
        &self.a
    }

    pub fn b(&self) -> &Matrix<T> {
        &self.b
    }

    pub fn c(&self) -> &Matrix<T> {
        &self.c
    }

    pub fn a_mut(&mut self) -> &mut Matrix<T> {
        &mut self.a
    }

    pub fn b_mut(&mut self) -> &mut Matrix<T> {
        &mut self.b
    }

    /// Compute `C = A @ B` in place with `kernel`.
    pub fn run(&mut self, kernel: &dyn Kernel<T>) {
        let n = self.dim();
        kernel.multiply_into(
            self.a.as_slice(),
            self.b.as_slice(),
            self.c.as_mut_slice(),
            n,
            n,
            n,
        );
    }

    /// Check C against the definition of the product.
    pub fn verify(&self) -> Result<()> {
        verify::check_product(&self.a, &self.b, &self.c)
    }

    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        (self.a, self.b, self.c)
    }
}

/// Validate `config`, build its workspace and kernel, run once, and verify
/// the result if requested.
pub fn run_config<T: Element>(config: &MatmulConfig) -> Result<Workspace<T>> {
    config.validate()?;
    let kernel = config.kernel.build::<T>(config.tile, config.threads)?;
    let mut ws = Workspace::<T>::new(config.dim, &config.init)?;

    ws.run(kernel.as_ref());
    if config.verify {
        ws.verify()?;
        info!("{} kernel verified on {}x{}", kernel.name(), config.dim, config.dim);
    }
    Ok(ws)
}
