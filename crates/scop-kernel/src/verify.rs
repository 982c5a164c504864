//! Checks that a computed product is the product.
//!
//! `check_product` is independent of every kernel: it recomputes each cell as
//! the dot product of a row of A and a column of B. `check_equivalence` runs a
//! candidate kernel next to the reference region and compares the outputs
//! cell by cell.

use log::debug;

use crate::cpu::ReferenceKernel;
use crate::element::Element;
use crate::error::{KernelError, Result};
use crate::kernel::Kernel;
use crate::matrix::Matrix;
use crate::shape::Shape;

/// First cell (in row-major order) where two matrices disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch<T: Element> {
    pub row: usize,
    pub col: usize,
    pub expected: T,
    pub got: T,
}

impl<T: Element> Mismatch<T> {
    fn into_error(self, kernel: &str) -> KernelError {
        KernelError::NotEquivalent {
            kernel: kernel.to_string(),
            row: self.row,
            col: self.col,
            expected: self.expected.to_string(),
            got: self.got.to_string(),
        }
    }
}

/// Row-major scan for the first differing cell.
///
/// Matrices of different shapes are reported as a [`KernelError::ShapesDiffer`].
pub fn first_mismatch<T: Element>(
    expected: &Matrix<T>,
    got: &Matrix<T>,
) -> Result<Option<Mismatch<T>>> {
    if expected.shape() != got.shape() {
        return Err(KernelError::ShapesDiffer {
            expected: expected.shape(),
            got: got.shape(),
        });
    }
    let cols = expected.cols();
    let found = expected
        .as_slice()
        .iter()
        .zip(got.as_slice())
        .position(|(e, g)| e != g)
        .map(|idx| Mismatch {
            row: idx / cols,
            col: idx % cols,
            expected: expected.as_slice()[idx],
            got: got.as_slice()[idx],
        });
    Ok(found)
}

/// Verify `c == a @ b` from the definition, without using any kernel.
pub fn check_product<T: Element>(a: &Matrix<T>, b: &Matrix<T>, c: &Matrix<T>) -> Result<()> {
    let shape = Shape::matmul(&a.shape(), &b.shape())?;
    if c.shape() != shape {
        return Err(KernelError::ShapesDiffer {
            expected: shape,
            got: c.shape(),
        });
    }

    for i in 0..shape.rows() {
        let a_row = a.row(i);
        for j in 0..shape.cols() {
            let expected = a_row
                .iter()
                .enumerate()
                .fold(T::ZERO, |acc, (p, &a_ip)| acc.mul_add(a_ip, b.get(p, j)));
            let got = c.get(i, j);
            if expected != got {
                return Err(Mismatch {
                    row: i,
                    col: j,
                    expected,
                    got,
                }
                .into_error("definition"));
            }
        }
    }
    Ok(())
}

/// Run `candidate` and the reference nest on the same operands and require
/// identical output. Returns the candidate's product on success.
pub fn check_equivalence<T: Element>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    candidate: &dyn Kernel<T>,
) -> Result<Matrix<T>> {
    let expected = a.matmul(b, &ReferenceKernel::new())?;
    let got = a.matmul(b, candidate)?;
    match first_mismatch(&expected, &got)? {
        Some(mismatch) => Err(mismatch.into_error(candidate.name())),
        None => {
            debug!("{} matches reference on {}", candidate.name(), got.shape());
            Ok(got)
        }
    }
}
