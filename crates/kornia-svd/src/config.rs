//! Convergence criteria of the 3x3 solver.

use crate::scalar::Real;

/// Default cap on the number of implicit shift QR sweeps of the 3x3 solver.
///
/// Wilkinson-shifted QR converges cubically, typical inputs need fewer than ten sweeps.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Convergence criteria of the 3x3 SVD.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvdConfig<T> {
    /// Relative tolerance on the bidiagonal entries.
    ///
    /// It is scaled by `max(0.5 * ||B||_F, 1)` before use, where `B` is the bidiagonal form of
    /// `A` divided by a power of two close to its largest entry.
    pub tolerance: T,
    /// Maximum number of implicit shift QR sweeps.
    pub max_iterations: usize,
}

impl<T: Real> Default for SvdConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::SVD3_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl<T: Real> SvdConfig<T> {
    /// Sets the relative tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
