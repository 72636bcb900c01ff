//! Polar decomposition of 3x3 matrices.
//!
//! `A = R * S` with `R` a proper rotation and `S` symmetric, both read off the SVD.

use crate::config::SvdConfig;
use crate::error::SvdError;
use crate::matrix::{matmul, transpose, Mat3};
use crate::scalar::Real;
use crate::svd3::svd3_with_config;
use crate::types::PolarSet;

/// Polar decomposition of a 3x3 matrix with the default [`SvdConfig`].
///
/// See [`polar3_with_config`].
pub fn polar3<T: Real>(a: &Mat3<T>) -> Result<PolarSet<T, 3>, SvdError> {
    polar3_with_config(a, &SvdConfig::default())
}

/// Polar decomposition of a 3x3 matrix, `A = R * S`.
///
/// Computed from the SVD as `R = U * V^T` and `S = V * diag(sigma) * V^T`. `R` is a proper
/// rotation even when `det(A) < 0`, in which case the reflection is carried by `S`.
///
/// # Errors
///
/// Returns [`SvdError::NoConvergence`] if the underlying SVD does not converge.
pub fn polar3_with_config<T: Real>(
    a: &Mat3<T>,
    config: &SvdConfig<T>,
) -> Result<PolarSet<T, 3>, SvdError> {
    let svd = svd3_with_config(a, config)?;
    let vt = transpose(svd.v());

    let r = matmul(svd.u(), &vt);

    let mut vs = *svd.v();
    for row in vs.iter_mut() {
        for (val, &sigma) in row.iter_mut().zip(svd.sigma().iter()) {
            *val = *val * sigma;
        }
    }
    let s = matmul(&vs, &vt);

    Ok(PolarSet { r, s })
}
