use std::fmt::Debug;

use crate::element::Element;

/// Trait for interchangeable matrix-multiply implementations.
///
/// Every implementation computes the same function; they differ only in loop
/// order, blocking, or parallel decomposition. A kernel has no failure mode:
/// callers validate shapes before dispatching.
pub trait Kernel<T: Element>: Send + Sync + Debug {
    /// Returns the name of this kernel (e.g., "reference", "tiled").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// - `a`: row-major data of shape [m, k]
    /// - `b`: row-major data of shape [k, n]
    /// - `c`: row-major data of shape [m, n], overwritten with the product
    ///
    /// For all i, j: `c[i][j] = sum over p of a[i][p] * b[p][j]`, with
    /// wrapping arithmetic. `a` and `b` are never modified.
    fn multiply_into(&self, a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize);
}

#[inline]
pub(crate) fn debug_check_lengths<T>(a: &[T], b: &[T], c: &[T], m: usize, k: usize, n: usize) {
    debug_assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    debug_assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    debug_assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);
}
