//! Closed-form polar decomposition and SVD of 2x2 matrices.
//!
//! Both are non-iterative. The SVD is obtained by first splitting `A = R * S` with `R` a
//! rotation and `S` symmetric, and then diagonalizing `S` with a single Jacobi rotation.
//! Because the polar factor is a proper rotation, the negative sign of a reflection always
//! ends up on the singular value of smaller magnitude.

use crate::givens::GivensRotation;
use crate::matrix::{div_scalar, power_of_two_scale, Mat2, Vec2};
use crate::scalar::Real;
use crate::types::{PolarSet, Svd2Set};

/// SVD of a 2x2 matrix with both orthogonal factors in Givens form.
///
/// `A = U * diag(sigma) * V^T` where `U = u.fill()` and `V = v.fill()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd2<T> {
    /// Left factor.
    pub u: GivensRotation<T>,
    /// Singular values, `sigma[0] >= |sigma[1]|`. The second one can be negative.
    pub sigma: Vec2<T>,
    /// Right factor.
    pub v: GivensRotation<T>,
}

impl<T: Real> Svd2<T> {
    /// Expands the Givens factors into dense matrices.
    pub fn to_set(&self) -> Svd2Set<T> {
        Svd2Set {
            u: self.u.fill(),
            sigma: self.sigma,
            v: self.v.fill(),
            iterations: 0,
        }
    }
}

/// Polar decomposition of a 2x2 matrix, `A = R * S`.
///
/// Returns the rotation `R` in Givens form on `(0, 1)` and the symmetric factor `S`. The whole
/// of `S` is stored rather than its triangular half.
///
/// `R` is the rotation closest to `A` in the Frobenius norm. The vector
/// `(A00 + A11, A10 - A01)` is proportional to `(cos, sin)` of that rotation, so no iteration
/// or tolerance is needed: its norm is only zero when `A` has no rotational part, in which case
/// `R` is the identity.
///
/// `A` is divided by a power of two close to its largest entry first, so the sums cannot
/// overflow for any finite input.
pub fn polar2<T: Real>(a: &Mat2<T>) -> (GivensRotation<T>, Mat2<T>) {
    let scale = power_of_two_scale(a);
    let (r, mut s) = polar2_unscaled(&div_scalar(a, scale));
    for val in s.iter_mut().flatten() {
        *val = *val * scale;
    }
    (r, s)
}

fn polar2_unscaled<T: Real>(a: &Mat2<T>) -> (GivensRotation<T>, Mat2<T>) {
    let x0 = a[0][0] + a[1][1];
    let x1 = a[1][0] - a[0][1];
    let denominator = x0.hypot(x1);

    let mut r = GivensRotation::new(0, 1);
    if denominator != T::zero() {
        // |x0|, |x1| <= denominator, so this cannot overflow
        r.c = x0 / denominator;
        r.s = -x1 / denominator;
    }

    let mut s = *a;
    r.row_rotation(&mut s);
    (r, s)
}

/// Polar decomposition of a 2x2 matrix with `R` expanded into a dense matrix.
pub fn polar2_full<T: Real>(a: &Mat2<T>) -> PolarSet<T, 2> {
    let (r, s) = polar2(a);
    PolarSet { r: r.fill(), s }
}

/// Singular value decomposition of a 2x2 matrix, `A = U * diag(sigma) * V^T`.
///
/// The singular values are sorted by decreasing value; the second one is negative when
/// `det(A) < 0`. `U` and `V` are proper rotations.
pub fn svd2<T: Real>(a: &Mat2<T>) -> Svd2<T> {
    let scale = power_of_two_scale(a);
    let mut svd = svd2_unscaled(&div_scalar(a, scale));
    svd.sigma[0] = svd.sigma[0] * scale;
    svd.sigma[1] = svd.sigma[1] * scale;
    svd
}

/// [`svd2`] without normalizing the magnitude of `A`.
///
/// Used on the deflated blocks of the 3x3 solver, whose input is already normalized.
pub(crate) fn svd2_unscaled<T: Real>(a: &Mat2<T>) -> Svd2<T> {
    let (mut u, s_sym) = polar2_unscaled(a);

    let x = s_sym[0][0];
    let y = s_sym[0][1];
    let z = s_sym[1][1];

    let mut sigma = [T::zero(); 2];
    let (cosine, sine) = if y.abs() < T::SYMMETRIC_OFF_DIAGONAL_EPS {
        sigma[0] = x;
        sigma[1] = z;
        (T::one(), T::zero())
    } else {
        let tau = T::HALF * (x - z);
        let w = tau.hypot(y);
        // w > |y| > 0, so the denominator is bounded away from zero on both branches
        let t = if tau > T::zero() {
            y / (tau + w)
        } else {
            y / (tau - w)
        };
        let cosine = (t * t + T::one()).sqrt().recip();
        let sine = -t * cosine;

        // Only the diagonal of V^T * S * V is needed.
        let c2 = cosine * cosine;
        let csy = T::TWO * cosine * sine * y;
        let s2 = sine * sine;
        sigma[0] = c2 * x - csy + s2 * z;
        sigma[1] = s2 * x + csy + c2 * z;
        (cosine, sine)
    };

    let mut v = GivensRotation::new(0, 1);
    if sigma[0] < sigma[1] {
        sigma.swap(0, 1);
        v.c = -sine;
        v.s = cosine;
    } else {
        v.c = cosine;
        v.s = sine;
    }
    u *= v;

    Svd2 { u, sigma, v }
}

/// Singular value decomposition of a 2x2 matrix with dense `U` and `V`.
pub fn svd2_full<T: Real>(a: &Mat2<T>) -> Svd2Set<T> {
    svd2(a).to_set()
}
