//! Strided GEMM kernel behind `Matrix` products.
//!
//! Operands are described by a `Strided` view (row stride + column stride), so a
//! transposed operand costs nothing: swap the strides. The output is always a
//! dense row-major buffer.
//!
//! - default: a safe triple loop
//! - optional: `matrixmultiply::sgemm` via the `matrixmultiply` feature

/// Read-only strided view of a `rows x cols` matrix.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Strided<'a> {
    pub data: &'a [f32],
    pub rows: usize,
    pub cols: usize,
    /// Distance between consecutive rows.
    pub rs: usize,
    /// Distance between consecutive columns.
    pub cs: usize,
}

/// Overwrites `out` (row-major, `a.rows x b.cols`) with `a * b`.
///
/// Callers validate `a.cols == b.rows`; this only debug-asserts it.
#[inline]
pub(crate) fn gemm(a: Strided<'_>, b: Strided<'_>, out: &mut [f32]) {
    let (m, k, n) = (a.rows, a.cols, b.cols);
    debug_assert_eq!(k, b.rows);
    debug_assert_eq!(out.len(), m * n);

    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        out.fill(0.0);
        return;
    }

    #[cfg(feature = "matrixmultiply")]
    {
        // Strides are bounded by the slice lengths checked above.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.data.as_ptr(),
                a.rs as isize,
                a.cs as isize,
                b.data.as_ptr(),
                b.rs as isize,
                b.cs as isize,
                0.0,
                out.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a0 = i * a.rs;
        for j in 0..n {
            let b0 = j * b.cs;
            let mut acc = 0.0_f32;
            for p in 0..k {
                acc = a.data[a0 + p * a.cs].mul_add(b.data[p * b.rs + b0], acc);
            }
            out[i * n + j] = acc;
        }
    }
}
