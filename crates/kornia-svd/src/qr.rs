//! QR factorization of small dense matrices by Givens elimination.
//!
//! Sub-diagonal entries are eliminated column by column, bottom to top within a column, each
//! with one row rotation on the adjacent pair `(i - 1, i)`. The rotations only touch rows that
//! are already zero left of the current column, so earlier columns stay eliminated.

use crate::givens::GivensRotation;
use crate::matrix::{identity, transpose, MatMxN};
use crate::scalar::Real;

/// Eliminates the sub-diagonal of `a` in place, leaving `R`, and applies every rotation to `q`.
///
/// On return `q` holds `G_k * ... * G_1 * q_in`, so starting from the identity it is `Q^T`.
///
/// # Arguments
///
/// * `a` - The `M x N` matrix to reduce. Overwritten with `R`.
/// * `q` - Any `M x L` companion matrix transformed alongside `a`.
pub fn simultaneous_givens_qr<T: Real, const M: usize, const N: usize, const L: usize>(
    a: &mut MatMxN<T, M, N>,
    q: &mut MatMxN<T, M, L>,
) {
    for j in 0..N {
        for i in (j + 1..M).rev() {
            let r = GivensRotation::from_values(a[i - 1][j], a[i][j], i - 1, i);
            r.row_rotation(a);
            r.row_rotation(q);
            // exactly zero rather than a rounding residue
            a[i][j] = T::zero();
        }
    }
}

/// Reduces `a` to upper triangular `R` in place, discarding the orthogonal factor.
pub fn inplace_givens_r<T: Real, const M: usize, const N: usize>(a: &mut MatMxN<T, M, N>) {
    for j in 0..N {
        for i in (j + 1..M).rev() {
            let r = GivensRotation::from_values(a[i - 1][j], a[i][j], i - 1, i);
            r.row_rotation(a);
            a[i][j] = T::zero();
        }
    }
}

/// Reduces `a` to `R` in place and returns `Q` such that `A_orig = Q * R`.
pub fn inplace_givens_qr<T: Real, const M: usize, const N: usize>(
    a: &mut MatMxN<T, M, N>,
) -> MatMxN<T, M, M> {
    let mut qt = identity();
    simultaneous_givens_qr(a, &mut qt);
    transpose(&qt)
}

/// Computes the QR factorization `A = Q * R` of an `M x N` matrix.
///
/// `Q` is `M x M` orthogonal and `R` is `M x N` upper triangular.
///
/// # Example
///
/// ```
/// use kornia_svd::qr::givens_qr;
///
/// let a = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
/// let (q, r) = givens_qr(&a);
/// assert_eq!(r[1][0], 0.0);
/// assert_eq!(r[2][1], 0.0);
/// # let _ = q;
/// ```
pub fn givens_qr<T: Real, const M: usize, const N: usize>(
    a: &MatMxN<T, M, N>,
) -> (MatMxN<T, M, M>, MatMxN<T, M, N>) {
    let mut r = *a;
    let q = inplace_givens_qr(&mut r);
    (q, r)
}
