//! Decompositions of `glam` matrices.
//!
//! `glam` stores matrices column-major while the solvers work on row-major arrays, so each
//! call transposes on the way in and on the way out.

use glam::{DMat2, DMat3, DVec2, DVec3, Mat2, Mat3, Vec2, Vec3};

use crate::error::SvdError;
use crate::polar::polar3;
use crate::svd2::{polar2_full, svd2_full};
use crate::svd3::svd3;

/// Singular value decomposition with `glam` factors, `A = U * diag(sigma) * V^T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlamSvd<M, V> {
    /// Left singular vectors, one per column.
    pub u: M,
    /// Singular values sorted by decreasing magnitude, only the last one can be negative.
    pub sigma: V,
    /// Right singular vectors, one per column.
    pub v: M,
}

/// Polar decomposition with `glam` factors, `A = R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlamPolar<M> {
    /// Proper rotation.
    pub r: M,
    /// Symmetric factor.
    pub s: M,
}

/// Extension trait to decompose `glam` matrices.
pub trait SvdExt {
    /// Output of [`SvdExt::svd`]. Fallible for 3x3 matrices.
    type Svd;
    /// Output of [`SvdExt::polar`]. Fallible for 3x3 matrices.
    type Polar;

    /// Computes the singular value decomposition.
    fn svd(&self) -> Self::Svd;

    /// Computes the polar decomposition.
    fn polar(&self) -> Self::Polar;
}

macro_rules! impl_svd_ext_2 {
    ($mat:ty, $vec:ty) => {
        impl SvdExt for $mat {
            type Svd = GlamSvd<$mat, $vec>;
            type Polar = GlamPolar<$mat>;

            fn svd(&self) -> Self::Svd {
                let svd = svd2_full(&self.transpose().to_cols_array_2d());
                GlamSvd {
                    u: <$mat>::from_cols_array_2d(svd.u()).transpose(),
                    sigma: <$vec>::from_array(*svd.sigma()),
                    v: <$mat>::from_cols_array_2d(svd.v()).transpose(),
                }
            }

            fn polar(&self) -> Self::Polar {
                let p = polar2_full(&self.transpose().to_cols_array_2d());
                GlamPolar {
                    r: <$mat>::from_cols_array_2d(p.r()).transpose(),
                    s: <$mat>::from_cols_array_2d(p.s()).transpose(),
                }
            }
        }
    };
}

macro_rules! impl_svd_ext_3 {
    ($mat:ty, $vec:ty) => {
        impl SvdExt for $mat {
            type Svd = Result<GlamSvd<$mat, $vec>, SvdError>;
            type Polar = Result<GlamPolar<$mat>, SvdError>;

            fn svd(&self) -> Self::Svd {
                let svd = svd3(&self.transpose().to_cols_array_2d())?;
                Ok(GlamSvd {
                    u: <$mat>::from_cols_array_2d(svd.u()).transpose(),
                    sigma: <$vec>::from_array(*svd.sigma()),
                    v: <$mat>::from_cols_array_2d(svd.v()).transpose(),
                })
            }

            fn polar(&self) -> Self::Polar {
                let p = polar3(&self.transpose().to_cols_array_2d())?;
                Ok(GlamPolar {
                    r: <$mat>::from_cols_array_2d(p.r()).transpose(),
                    s: <$mat>::from_cols_array_2d(p.s()).transpose(),
                })
            }
        }
    };
}

impl_svd_ext_2!(Mat2, Vec2);
impl_svd_ext_2!(DMat2, DVec2);
impl_svd_ext_3!(Mat3, Vec3);
impl_svd_ext_3!(DMat3, DVec3);
