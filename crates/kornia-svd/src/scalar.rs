//! Floating point scalars the decompositions run on.

use num_traits::Float;
use std::fmt::Debug;

/// Floating point scalar the decompositions are generic over.
///
/// Implemented for `f32` and `f64`. The constants are precision dependent so that the
/// convergence test of the 3x3 solver scales with the machine epsilon of the type.
pub trait Real: Float + Debug + Send + Sync + 'static {
    /// Default convergence tolerance of the 3x3 shift iteration, `128 * epsilon`.
    const SVD3_TOLERANCE: Self;

    /// Magnitude below which the off-diagonal of a symmetric 2x2 block is treated as zero.
    const SYMMETRIC_OFF_DIAGONAL_EPS: Self;

    /// The constant `0.5`.
    const HALF: Self;

    /// The constant `2.0`.
    const TWO: Self;
}

macro_rules! impl_real {
    ($t:ty) => {
        impl Real for $t {
            const SVD3_TOLERANCE: Self = 128.0 * <$t>::EPSILON;
            const SYMMETRIC_OFF_DIAGONAL_EPS: Self = 1e-20;
            const HALF: Self = 0.5;
            const TWO: Self = 2.0;
        }
    };
}

impl_real!(f32);
impl_real!(f64);

/// Returns `magnitude` with the sign bit of `sign`, treating `-0.0` as negative.
#[inline(always)]
pub(crate) fn copysign<T: Real>(magnitude: T, sign: T) -> T {
    if sign.is_sign_negative() {
        -magnitude.abs()
    } else {
        magnitude.abs()
    }
}
