use crate::element::Element;
use crate::kernel::{debug_check_lengths, Kernel};

/// Loop interchange of the reference nest: i-k-j order.
///
/// The innermost loop walks a row of B and a row of C with stride 1 instead
/// of striding down a column of B. Each row of C is cleared before the k
/// loop, which is the zero-initialisation statement hoisted out of j.
#[derive(Debug, Clone, Default)]
pub struct InterchangedKernel;

impl InterchangedKernel {
    pub fn new() -> Self {
        InterchangedKernel
    }
}

impl<T: Element> Kernel<T> for InterchangedKernel {
    fn name(&self) -> &str {
        "interchanged"
    }

    fn multiply_into(&self, a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
        debug_check_lengths(a, b, c, m, k, n);

        for i in 0..m {
            let c_row = &mut c[i * n..(i + 1) * n];
            c_row.fill(T::ZERO);
            for p in 0..k {
                let a_ip = a[i * k + p];
                let b_row = &b[p * n..(p + 1) * n];
                for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                    *c_ij = c_ij.mul_add(a_ip, b_pj);
                }
            }
        }
    }
}
