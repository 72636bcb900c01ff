//! Errors reported by the iterative decompositions.

use thiserror::Error;

/// Error type for the iterative decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SvdError {
    /// The implicit shift QR iteration hit the iteration cap before any bidiagonal entry
    /// dropped below the tolerance.
    #[error("SVD did not converge after {iterations} implicit shift iterations")]
    NoConvergence {
        /// Number of sweeps performed before giving up.
        iterations: usize,
    },
}
