//! The static control part (SCoP) of the multiplier.
//!
//! `matmul_scop` is the loop nest an external polyhedral tool is allowed to
//! reorder, tile, skew or parallelise. Rust has no `#pragma scop`, so the
//! region is delimited by a non-inlined function boundary instead; the
//! begin/end log records carry no semantics of their own.
//!
//! [`emit_c_source`] renders the same nest as annotated C for tools such as
//! Clan that only read C.

use std::fmt::Write;

use log::debug;

use crate::element::Element;
use crate::kernel::debug_check_lengths;

/// A statement inside a region, as a polyhedral extractor would number it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub name: &'static str,
    /// Number of loops enclosing the statement.
    pub depth: usize,
    pub iterators: &'static [&'static str],
    pub text: &'static str,
}

/// Metadata describing a delimited loop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub iterators: &'static [&'static str],
    pub statements: &'static [Statement],
}

/// `S1`: zero-initialisation of one output cell.
pub const INIT_STATEMENT: Statement = Statement {
    name: "S1",
    depth: 2,
    iterators: &["i", "j"],
    text: "C[i][j] = 0;",
};

/// `S2`: accumulation of one partial product.
pub const ACCUMULATE_STATEMENT: Statement = Statement {
    name: "S2",
    depth: 3,
    iterators: &["i", "j", "k"],
    text: "C[i][j] = C[i][j] + A[i][k] * B[k][j];",
};

/// The matrix-multiply region: zero-initialise C[i][j], then accumulate.
pub const MATMUL_REGION: Region = Region {
    name: "matmul",
    iterators: &["i", "j", "k"],
    statements: &[INIT_STATEMENT, ACCUMULATE_STATEMENT],
};

/// Reference nest: `C = A @ B` with i outer, j inner, k increasing.
///
/// Each output cell starts from zero and accumulates `a[i][p] * b[p][j]` in
/// order of `p`. Any transformation of this nest is legal as long as the
/// final contents of `c` match what this function produces.
#[inline(never)]
pub fn matmul_scop<T: Element>(a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
    debug_check_lengths(a, b, c, m, k, n);
    debug!("begin scop {} [{}x{}] @ [{}x{}]", MATMUL_REGION.name, m, k, k, n);

    for i in 0..m {
        for j in 0..n {
            let mut acc = T::ZERO;
            for p in 0..k {
                acc = acc.mul_add(a[i * k + p], b[p * n + j]);
            }
            c[i * n + j] = acc;
        }
    }

    debug!("end scop {}", MATMUL_REGION.name);
}

/// Computes the rows of C starting at `row_start` with the reference nest.
///
/// `c_rows` holds exactly those rows, `c_rows.len() / n` of them. Used by kernels that split the i loop.
pub(crate) fn matmul_scop_rows<T: Element>(
    a: &[T],
    b: &[T],
    c_rows: &mut [T],
    row_start: usize,
    k: usize,
    n: usize,
) {
    let n_rows = if n == 0 { 0 } else { c_rows.len() / n };
    for r in 0..n_rows {
        let i = row_start + r;
        for j in 0..n {
            let mut acc = T::ZERO;
            for p in 0..k {
                acc = acc.mul_add(a[i * k + p], b[p * n + j]);
            }
            c_rows[r * n + j] = acc;
        }
    }
}

/// Render the region as a standalone C translation unit with
/// `#pragma scop` / `#pragma endscop` markers around the nest.
///
/// The operands are `int` globals of `dim x dim`; `main` returns 0.
pub fn emit_c_source(dim: usize) -> String {
    let (init, accumulate) = (INIT_STATEMENT, ACCUMULATE_STATEMENT);

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "// {}.c", MATMUL_REGION.name);
    let _ = writeln!(out, "int A[{dim}][{dim}];");
    let _ = writeln!(out, "int B[{dim}][{dim}];");
    let _ = writeln!(out, "int C[{dim}][{dim}];");
    let _ = writeln!(out);
    let _ = writeln!(out, "int main() {{");
    let _ = writeln!(out, "  int i, j, k;");
    let _ = writeln!(out, "  #pragma scop");
    let _ = writeln!(out, "  for (i = 0; i < {dim}; i++) {{");
    let _ = writeln!(out, "    for (j = 0; j < {dim}; j++) {{");
    let _ = writeln!(out, "      {}", init.text);
    let _ = writeln!(out, "      for (k = 0; k < {dim}; k++)");
    let _ = writeln!(out, "        {}", accumulate.text);
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "  #pragma endscop");
    let _ = writeln!(out);
    let _ = writeln!(out, "  return 0;");
    let _ = writeln!(out, "}}");
    out
}
