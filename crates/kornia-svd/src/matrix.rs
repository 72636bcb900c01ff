//! Fixed-size row-major matrices used throughout the crate.
//!
//! Matrices are plain nested arrays, `m[row][col]`, the same layout kornia-3d uses for
//! rotations (`[[f64; 3]; 3]`). Everything here lives on the stack.

use crate::scalar::Real;

/// A row-major `M x N` matrix.
pub type MatMxN<T, const M: usize, const N: usize> = [[T; N]; M];

/// A row-major 2x2 matrix.
pub type Mat2<T> = [[T; 2]; 2];

/// A row-major 3x3 matrix.
pub type Mat3<T> = [[T; 3]; 3];

/// A 2-vector.
pub type Vec2<T> = [T; 2];

/// A 3-vector.
pub type Vec3<T> = [T; 3];

/// Returns the `N x N` identity matrix.
#[inline]
pub fn identity<T: Real, const N: usize>() -> [[T; N]; N] {
    let mut m = [[T::zero(); N]; N];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = T::one();
    }
    m
}

/// Returns the transpose of an `M x N` matrix.
#[inline]
pub fn transpose<T: Real, const M: usize, const N: usize>(a: &[[T; N]; M]) -> [[T; M]; N] {
    let mut t = [[T::zero(); M]; N];
    for (i, row) in a.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            t[j][i] = val;
        }
    }
    t
}

/// Computes the product `a * b` of an `M x K` and a `K x N` matrix.
#[inline]
pub fn matmul<T: Real, const M: usize, const K: usize, const N: usize>(
    a: &[[T; K]; M],
    b: &[[T; N]; K],
) -> [[T; N]; M] {
    let mut out = [[T::zero(); N]; M];
    for (out_row, a_row) in out.iter_mut().zip(a.iter()) {
        for (&a_ik, b_row) in a_row.iter().zip(b.iter()) {
            for (o, &b_kj) in out_row.iter_mut().zip(b_row.iter()) {
                *o = *o + a_ik * b_kj;
            }
        }
    }
    out
}

/// Builds a square matrix with `d` on the diagonal.
#[inline]
pub fn from_diagonal<T: Real, const N: usize>(d: &[T; N]) -> [[T; N]; N] {
    let mut m = [[T::zero(); N]; N];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = d[i];
    }
    m
}

/// Determinant of a 3x3 matrix.
#[inline]
pub fn determinant3<T: Real>(m: &Mat3<T>) -> T {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Power of two nearest below the largest absolute entry of `a`.
///
/// Returns one when `a` is zero or has an infinite entry. NaN entries are skipped, so they
/// still reach the solver.
pub(crate) fn power_of_two_scale<T: Real, const M: usize, const N: usize>(a: &[[T; N]; M]) -> T {
    let max = a
        .iter()
        .flatten()
        .fold(T::zero(), |acc, &val| acc.max(val.abs()));
    if max > T::zero() && max.is_finite() {
        max.log2().floor().exp2()
    } else {
        T::one()
    }
}

/// Divides every entry of `a` by `scale`.
#[inline]
pub(crate) fn div_scalar<T: Real, const M: usize, const N: usize>(
    a: &[[T; N]; M],
    scale: T,
) -> [[T; N]; M] {
    let mut out = *a;
    for val in out.iter_mut().flatten() {
        *val = *val / scale;
    }
    out
}

/// Swaps columns `i` and `k` of a matrix.
#[inline(always)]
pub(crate) fn swap_columns<T: Real, const M: usize, const N: usize>(
    a: &mut [[T; N]; M],
    i: usize,
    k: usize,
) {
    for row in a.iter_mut() {
        row.swap(i, k);
    }
}

/// Negates column `i` of a matrix.
#[inline(always)]
pub(crate) fn negate_column<T: Real, const M: usize, const N: usize>(
    a: &mut [[T; N]; M],
    i: usize,
) {
    for row in a.iter_mut() {
        row[i] = -row[i];
    }
}
