//! Reductions of a 3x3 matrix to structured forms with Givens rotations.
//!
//! Every reduction keeps `H_orig = U * H * V^T`: row rotations are accumulated into `U` as
//! column rotations, column rotations are accumulated into `V`.

use crate::givens::GivensRotation;
use crate::matrix::{identity, Mat3};
use crate::scalar::Real;

/// Chases the bulge of a 3x3 matrix back to upper bidiagonal form.
///
/// ```text
///  x x 0        x x 0
///  x x x   ->   0 x x
///  0 0 x        0 0 x
/// ```
///
/// The entry `(2, 0)` must already be zero. `U` and `V` are updated in place.
pub fn zero_chase<T: Real>(h: &mut Mat3<T>, u: &mut Mat3<T>, v: &mut Mat3<T>) {
    // x x +
    // 0 x x
    // 0 0 x
    let r1 = GivensRotation::from_values(h[0][0], h[1][0], 0, 1);

    // The column rotation is computed from the first two rows of H before r1 is applied.
    // The new row 0 is proportional to a * row0 + b * row1, which saves a square root.
    let mut r2 = GivensRotation::new(1, 2);
    if h[1][0] != T::zero() {
        r2.compute(
            h[0][0] * h[0][1] + h[1][0] * h[1][1],
            h[0][0] * h[0][2] + h[1][0] * h[1][2],
        );
    } else {
        r2.compute(h[0][1], h[0][2]);
    }

    r1.row_rotation(h);

    // x x 0
    // 0 x x
    // 0 + x
    r2.column_rotation(h);
    r2.column_rotation(v);

    // x x 0
    // 0 x x
    // 0 0 x
    let r3 = GivensRotation::from_values(h[1][1], h[2][1], 1, 2);
    r3.row_rotation(h);

    r1.column_rotation(u);
    r3.column_rotation(u);
}

/// Reduces a general 3x3 matrix to upper bidiagonal form.
///
/// Returns the orthogonal factors `(U, V)` such that `H_orig = U * H * V^T`, where `H` is the
/// bidiagonal matrix left in place.
pub fn make_upper_bidiag<T: Real>(h: &mut Mat3<T>) -> (Mat3<T>, Mat3<T>) {
    let mut u = identity();
    let mut v = identity();

    // x x x
    // x x x
    // 0 x x
    let r = GivensRotation::from_values(h[1][0], h[2][0], 1, 2);
    r.row_rotation(h);
    r.column_rotation(&mut u);

    zero_chase(h, &mut u, &mut v);
    (u, v)
}

/// Reduces a general 3x3 matrix to lambda shape.
///
/// ```text
///  x x x        x 0 0
///  x x x   ->   x x 0
///  x x x        x 0 x
/// ```
///
/// Returns `(U, V)` such that `H_orig = U * H * V^T`.
pub fn make_lambda_shape<T: Real>(h: &mut Mat3<T>) -> (Mat3<T>, Mat3<T>) {
    let mut u = identity();
    let mut v = identity();

    // x x 0
    // x x x
    // x x x
    let mut r1 = GivensRotation::from_values(h[0][1], h[0][2], 1, 2);
    r1.column_rotation(h);
    r1.column_rotation(&mut v);

    // x x 0
    // x x 0
    // x x x
    r1.compute_unconventional(h[1][2], h[2][2]);
    r1.row_rotation(h);
    r1.column_rotation(&mut u);

    // x x 0
    // x x 0
    // x 0 x
    let mut r2 = GivensRotation::from_values(h[2][0], h[2][1], 0, 1);
    r2.column_rotation(h);
    r2.column_rotation(&mut v);

    // x 0 0
    // x x 0
    // x 0 x
    r2.compute_unconventional(h[0][1], h[1][1]);
    r2.row_rotation(h);
    r2.column_rotation(&mut u);

    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{matmul, transpose};

    fn reconstruct(u: &Mat3<f64>, h: &Mat3<f64>, v: &Mat3<f64>) -> Mat3<f64> {
        matmul(&matmul(u, h), &transpose(v))
    }

    fn assert_close(a: &Mat3<f64>, b: &Mat3<f64>, eps: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (a[i][j] - b[i][j]).abs() < eps,
                    "mismatch at ({i}, {j}): {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_make_upper_bidiag() {
        let a: [[f64; 3]; 3] = [[2.0, -1.0, 3.0], [0.5, 4.0, -2.0], [1.5, 2.5, 1.0]];
        let mut h = a;
        let (u, v) = make_upper_bidiag(&mut h);

        for (i, j) in [(1, 0), (2, 0), (2, 1), (0, 2)] {
            assert!(h[i][j].abs() < 1e-12, "h[{i}][{j}] = {}", h[i][j]);
        }
        assert_close(&reconstruct(&u, &h, &v), &a, 1e-12);
        assert_close(&matmul(&transpose(&u), &u), &identity(), 1e-12);
        assert_close(&matmul(&transpose(&v), &v), &identity(), 1e-12);
    }

    #[test]
    fn test_make_upper_bidiag_keeps_bidiagonal_input() {
        let a = [[1.0, 1.0, 0.0], [0.0, 2.0, 1.0], [0.0, 0.0, 4.0]];
        let mut h = a;
        let (u, v) = make_upper_bidiag(&mut h);
        assert_eq!(h, a);
        assert_eq!(u, identity());
        assert_eq!(v, identity());
    }

    #[test]
    fn test_zero_chase_bulge() {
        // a bidiagonal matrix after an implicit shift step on columns (0, 1)
        let mut h: [[f64; 3]; 3] = [[2.0, 1.0, 0.0], [0.7, 3.0, 0.5], [0.0, 0.0, 1.5]];
        let a = h;
        let mut u = identity();
        let mut v = identity();
        zero_chase(&mut h, &mut u, &mut v);

        for (i, j) in [(1, 0), (2, 0), (2, 1), (0, 2)] {
            assert!(h[i][j].abs() < 1e-12, "h[{i}][{j}] = {}", h[i][j]);
        }
        assert_close(&reconstruct(&u, &h, &v), &a, 1e-12);
    }

    #[test]
    fn test_make_lambda_shape() {
        let a: [[f64; 3]; 3] = [[1.0, 2.0, 3.0], [-4.0, 5.0, 6.0], [7.0, 8.0, -9.0]];
        let mut h = a;
        let (u, v) = make_lambda_shape(&mut h);

        for (i, j) in [(0, 1), (0, 2), (1, 2), (2, 1)] {
            assert!(h[i][j].abs() < 1e-12, "h[{i}][{j}] = {}", h[i][j]);
        }
        assert_close(&reconstruct(&u, &h, &v), &a, 1e-12);
        assert_close(&matmul(&transpose(&u), &u), &identity(), 1e-12);
    }
}
