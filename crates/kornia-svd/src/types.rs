//! Dense result holders shared by the 2x2 and 3x3 solvers.

use crate::matrix::{matmul, transpose};
use crate::scalar::Real;

/// Helper struct to store the factors of `A = U * diag(sigma) * V^T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdSet<T, const N: usize> {
    pub(crate) u: [[T; N]; N],
    pub(crate) sigma: [T; N],
    pub(crate) v: [[T; N]; N],
    pub(crate) iterations: usize,
}

/// Singular value decomposition of a 2x2 matrix with dense factors.
pub type Svd2Set<T> = SvdSet<T, 2>;

/// Singular value decomposition of a 3x3 matrix.
pub type Svd3Set<T> = SvdSet<T, 3>;

impl<T: Real, const N: usize> SvdSet<T, N> {
    /// Get the left singular vectors matrix.
    #[inline]
    pub fn u(&self) -> &[[T; N]; N] {
        &self.u
    }

    /// Get the singular values, sorted by decreasing magnitude.
    ///
    /// Only the last entry can be negative.
    #[inline]
    pub fn sigma(&self) -> &[T; N] {
        &self.sigma
    }

    /// Get the right singular vectors matrix.
    #[inline]
    pub fn v(&self) -> &[[T; N]; N] {
        &self.v
    }

    /// Number of implicit shift QR sweeps performed. Always zero for 2x2 matrices.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Computes `U * diag(sigma) * V^T`.
    pub fn reconstruct(&self) -> [[T; N]; N] {
        let mut us = self.u;
        for row in us.iter_mut() {
            for (val, &s) in row.iter_mut().zip(self.sigma.iter()) {
                *val = *val * s;
            }
        }
        matmul(&us, &transpose(&self.v))
    }
}

/// Helper struct to store the factors of the polar decomposition `A = R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarSet<T, const N: usize> {
    pub(crate) r: [[T; N]; N],
    pub(crate) s: [[T; N]; N],
}

impl<T: Real, const N: usize> PolarSet<T, N> {
    /// Get the rotation closest to `A`.
    #[inline]
    pub fn r(&self) -> &[[T; N]; N] {
        &self.r
    }

    /// Get the symmetric factor, stored as a full matrix.
    #[inline]
    pub fn s(&self) -> &[[T; N]; N] {
        &self.s
    }
}
