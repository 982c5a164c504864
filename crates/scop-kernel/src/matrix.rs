use std::fmt;
use std::ops::{Index, IndexMut};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::Kernel;
use crate::shape::Shape;

/// A dense integer matrix.
///
/// Holds contiguous, row-major data with an associated shape. Products are
/// computed by a [`Kernel`] passed in by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Element> Matrix<T> {
    /// Create a matrix from row-major data and a shape.
    pub fn new(data: Vec<T>, shape: Shape) -> Result<Self> {
        if data.len() != shape.numel() {
            return Err(KernelError::ShapeMismatch {
                expected: shape.numel(),
                got: data.len(),
            });
        }
        Ok(Matrix { data, shape })
    }

    /// Create a zero-filled matrix with the given shape.
    pub fn zeros(shape: Shape) -> Self {
        Matrix {
            data: vec![T::ZERO; shape.numel()],
            shape,
        }
    }

    /// Create a zero-filled `n x n` matrix.
    pub fn square_zeros(n: usize) -> Self {
        Self::zeros(Shape::square(n))
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(Shape::square(n), |row, col| {
            if row == col {
                T::ONE
            } else {
                T::ZERO
            }
        })
    }

    /// Build a matrix from a list of equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(KernelError::RaggedRows {
                    row: i,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            data,
            shape: Shape::new(rows.len(), cols),
        })
    }

    /// Create a matrix whose cell `[row][col]` is `f(row, col)`.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(shape.numel());
        for row in 0..shape.rows() {
            for col in 0..shape.cols() {
                data.push(f(row, col));
            }
        }
        Matrix { data, shape }
    }

    /// Fill with `flat_index % modulus`, a cheap deterministic pattern for
    /// benchmarks. A modulus of zero yields the zero matrix.
    pub fn pattern(shape: Shape, modulus: u32) -> Self {
        if modulus == 0 {
            return Self::zeros(shape);
        }
        let cols = shape.cols();
        Self::from_fn(shape, |row, col| {
            T::from_i64_wrapping(((row * cols + col) % modulus as usize) as i64)
        })
    }

    /// Fill with values drawn uniformly from `[-bound, bound]` using a seeded
    /// RNG, so the same seed always produces the same matrix.
    ///
    /// `bound` is clamped to `T::MAX`, so every value is representable.
    pub fn random(shape: Shape, seed: u64, bound: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bound = (bound as i64).min(T::MAX_I64);
        Self::from_fn(shape, |_, _| {
            T::from_i64_wrapping(rng.gen_range(-bound..=bound))
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Returns the element at `[row][col]`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    /// Returns row `row` as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        let cols = self.cols();
        &self.data[row * cols..(row + 1) * cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Matrix product `self @ other` computed by `kernel`.
    ///
    /// self is [m, k], other is [k, n], result is [m, n].
    pub fn matmul(&self, other: &Matrix<T>, kernel: &dyn Kernel<T>) -> Result<Matrix<T>> {
        let shape = Shape::matmul(&self.shape, &other.shape)?;
        let mut c = Matrix::zeros(shape);
        kernel.multiply_into(
            &self.data,
            &other.data,
            &mut c.data,
            self.rows(),
            self.cols(),
            other.cols(),
        );
        Ok(c)
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows() && col < self.cols(),
            "index [{}][{}] out of bounds for {}",
            row,
            col,
            self.shape
        );
        &self.data[self.shape.offset(row, col)]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows() && col < self.cols(),
            "index [{}][{}] out of bounds for {}",
            row,
            col,
            self.shape
        );
        let offset = self.shape.offset(row, col);
        &mut self.data[offset]
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for (j, v) in self.row(row).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
