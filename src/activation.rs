//! Logistic sigmoid.
//!
//! Every layer computes a pre-activation `z` and then applies the sigmoid
//! element-wise. Outputs saturate at the closest `f32` values strictly inside
//! `(0, 1)`, so no activation is ever exactly `0` or `1`.

use crate::Matrix;

/// Smallest value `sigmoid` returns.
pub const SIGMOID_MIN: f32 = f32::MIN_POSITIVE;
/// Largest value `sigmoid` returns: the largest `f32` below `1.0`.
pub const SIGMOID_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

/// `1 / (1 + e^-z)`, numerically stable for large `|z|`.
#[inline]
pub fn sigmoid(z: f32) -> f32 {
    // Only ever exponentiate a non-positive argument.
    let y = if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    };
    y.clamp(SIGMOID_MIN, SIGMOID_MAX)
}

/// Applies `sigmoid` to every entry of `z`, consuming it.
#[inline]
pub(crate) fn sigmoid_matrix(mut z: Matrix) -> Matrix {
    z.map_inplace(sigmoid);
    z
}
