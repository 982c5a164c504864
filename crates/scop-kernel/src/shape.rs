use crate::error::{KernelError, Result};
use std::fmt;

/// Row/column extent of a two-dimensional matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Create a new `rows x cols` shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Create an `n x n` shape.
    pub fn square(n: usize) -> Self {
        Shape { rows: n, cols: n }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of elements, or `None` if it does not fit in `usize`.
    pub fn checked_numel(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major contiguous strides: `[cols, 1]`.
    pub fn strides(&self) -> [usize; 2] {
        [self.cols, 1]
    }

    /// Flat offset of `[row][col]` in row-major storage.
    #[inline(always)]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Output shape of `a @ b`.
    ///
    /// `a` is `[m, k]`, `b` must be `[k, n]`, the result is `[m, n]`.
    pub fn matmul(a: &Shape, b: &Shape) -> Result<Shape> {
        if a.cols != b.rows {
            return Err(KernelError::DimensionMismatch {
                m: a.rows,
                k: a.cols,
                k2: b.rows,
                n: b.cols,
            });
        }
        Ok(Shape::new(a.rows, b.cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}
