//! Implicit-shift QR singular value decomposition of 3x3 matrices.
//!
//! The matrix is first reduced to upper bidiagonal form
//!
//! ```text
//!  alpha_1  beta_1   0
//!  0        alpha_2  beta_2
//!  0        0        alpha_3
//! ```
//!
//! and then swept with Wilkinson-shifted implicit QR steps until one of the five tracked entries
//! drops below the tolerance. At that point the problem deflates into a 2x2 block, solved in
//! closed form with the 2x2 solver of [`crate::svd2`], and a 1x1 block. A small fixed sorting network
//! finally orders the singular values by decreasing magnitude and moves a possible negative
//! sign onto the smallest one.
//!
//! # Example
//!
//! ```
//! use kornia_svd::svd3::svd3;
//!
//! let a: [[f64; 3]; 3] = [[1.0, 2.0, 0.5], [0.0, 3.0, -1.0], [4.0, 0.0, 2.0]];
//! let svd = svd3(&a).unwrap();
//!
//! let sigma = svd.sigma();
//! assert!(sigma[0] >= sigma[1].abs() && sigma[1].abs() >= sigma[2].abs());
//! ```

use crate::bidiag::{make_upper_bidiag, zero_chase};
use crate::config::SvdConfig;
use crate::error::SvdError;
use crate::givens::GivensRotation;
use crate::matrix::{div_scalar, negate_column, power_of_two_scale, swap_columns, Mat3, Vec3};
use crate::scalar::{copysign, Real};
use crate::svd2::svd2_unscaled;
use crate::types::Svd3Set;

/// The five entries of an upper bidiagonal 3x3 matrix.
#[derive(Debug, Clone, Copy)]
struct Bidiagonal<T> {
    alpha_1: T,
    beta_1: T,
    alpha_2: T,
    beta_2: T,
    alpha_3: T,
}

impl<T: Real> Bidiagonal<T> {
    fn from_matrix(b: &Mat3<T>) -> Self {
        Self {
            alpha_1: b[0][0],
            beta_1: b[0][1],
            alpha_2: b[1][1],
            beta_2: b[1][2],
            alpha_3: b[2][2],
        }
    }

    fn norm_squared(&self) -> T {
        self.alpha_1 * self.alpha_1
            + self.alpha_2 * self.alpha_2
            + self.alpha_3 * self.alpha_3
            + self.beta_1 * self.beta_1
            + self.beta_2 * self.beta_2
    }

    /// True while no entry can be neglected and another sweep is needed.
    fn is_coupled(&self, tol: T) -> bool {
        self.beta_2.abs() > tol
            && self.beta_1.abs() > tol
            && self.alpha_1.abs() > tol
            && self.alpha_2.abs() > tol
            && self.alpha_3.abs() > tol
    }

    /// Picks the deflation, testing the entries in order of ease of handling.
    fn deflation(&self, tol: T) -> Deflation {
        if self.beta_2.abs() <= tol {
            Deflation::LowerCoupling
        } else if self.beta_1.abs() <= tol {
            Deflation::UpperCoupling
        } else if self.alpha_2.abs() <= tol {
            Deflation::MiddleDiagonal
        } else if self.alpha_3.abs() <= tol {
            Deflation::LastDiagonal
        } else if self.alpha_1.abs() <= tol {
            Deflation::FirstDiagonal
        } else {
            Deflation::Undeflated
        }
    }
}

/// How the bidiagonal matrix splits once the shift iteration stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deflation {
    /// `beta_2 ~ 0`, splits into a top-left 2x2 block and `alpha_3`.
    LowerCoupling,
    /// `beta_1 ~ 0`, splits into `alpha_1` and a bottom-right 2x2 block.
    UpperCoupling,
    /// `alpha_2 ~ 0`, one row rotation decouples the last row.
    MiddleDiagonal,
    /// `alpha_3 ~ 0`, two column rotations decouple the last column.
    LastDiagonal,
    /// `alpha_1 ~ 0`, two row rotations decouple the first row.
    FirstDiagonal,
    /// No entry is below the tolerance. Only reachable with non-finite input.
    Undeflated,
}

/// The 2x2 sub-block solved after deflation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Block {
    /// Rows and columns `(0, 1)`.
    TopLeft,
    /// Rows and columns `(1, 2)`.
    BottomRight,
}

impl Block {
    fn offset(self) -> usize {
        match self {
            Block::TopLeft => 0,
            Block::BottomRight => 1,
        }
    }

    /// Index of the decoupled 1x1 block.
    fn other(self) -> usize {
        match self {
            Block::TopLeft => 2,
            Block::BottomRight => 0,
        }
    }
}

/// Wilkinson shift of the symmetric block
///
/// ```text
/// a1  b1
/// b1  a2
/// ```
///
/// `mu = a2 - sign(d) * b1^2 / (|d| + sqrt(d^2 + b1^2))` with `d = (a1 - a2) / 2`, which is the
/// eigenvalue closer to `a2` written without cancellation.
#[inline]
pub(crate) fn wilkinson_shift<T: Real>(a1: T, b1: T, a2: T) -> T {
    let d = T::HALF * (a1 - a2);
    let bs = b1 * b1;
    a2 - copysign(bs / (d.abs() + (d * d + bs).sqrt()), d)
}

/// Solves the 2x2 `block` of `b` in closed form and accumulates its rotations into `U`, `V`.
fn process<T: Real>(
    block: Block,
    b: &Mat3<T>,
    u: &mut Mat3<T>,
    sigma: &mut Vec3<T>,
    v: &mut Mat3<T>,
) {
    let t = block.offset();
    let other = block.other();
    sigma[other] = b[other][other];

    let sub = [[b[t][t], b[t][t + 1]], [b[t + 1][t], b[t + 1][t + 1]]];
    let svd = svd2_unscaled(&sub);
    sigma[t] = svd.sigma[0];
    sigma[t + 1] = svd.sigma[1];

    svd.u.offset(t).column_rotation(u);
    svd.v.offset(t).column_rotation(v);
}

/// Negates `sigma[i]` together with column `i` of `U`.
#[inline]
fn flip_sign<T: Real>(i: usize, u: &mut Mat3<T>, sigma: &mut Vec3<T>) {
    sigma[i] = -sigma[i];
    negate_column(u, i);
}

/// Swaps singular triplets `i` and `k`.
#[inline]
fn swap_triplets<T: Real>(i: usize, k: usize, u: &mut Mat3<T>, sigma: &mut Vec3<T>, v: &mut Mat3<T>) {
    sigma.swap(i, k);
    swap_columns(u, i, k);
    swap_columns(v, i, k);
}

/// Orderings reachable after solving the top-left block, where `sigma[0] >= |sigma[1]|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TopLeftOrder {
    /// `sigma[0] >= |sigma[1]| >= |sigma[2]|`
    Sorted,
    /// `sigma[0] >= |sigma[2]| > |sigma[1]|`
    SwapLast,
    /// `|sigma[2]| > sigma[0] >= |sigma[1]|`
    RotateLastToFront,
}

impl TopLeftOrder {
    fn classify<T: Real>(sigma: &Vec3<T>) -> Self {
        if sigma[1].abs() >= sigma[2].abs() {
            TopLeftOrder::Sorted
        } else if sigma[2].abs() > sigma[0] {
            TopLeftOrder::RotateLastToFront
        } else {
            TopLeftOrder::SwapLast
        }
    }
}

/// Orderings reachable after solving the bottom-right block, where `sigma[1] >= |sigma[2]|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BottomRightOrder {
    /// `|sigma[0]| >= sigma[1] >= |sigma[2]|`
    Sorted,
    /// `sigma[1] > |sigma[0]| >= |sigma[2]|`
    SwapFirst,
    /// `sigma[1] >= |sigma[2]| > |sigma[0]|`
    RotateFirstToBack,
}

impl BottomRightOrder {
    fn classify<T: Real>(sigma: &Vec3<T>) -> Self {
        if sigma[0].abs() >= sigma[1] {
            BottomRightOrder::Sorted
        } else if sigma[0].abs() < sigma[2].abs() {
            BottomRightOrder::RotateFirstToBack
        } else {
            BottomRightOrder::SwapFirst
        }
    }
}

/// Sorts the singular values after a top-left deflation.
fn sort0<T: Real>(u: &mut Mat3<T>, sigma: &mut Vec3<T>, v: &mut Mat3<T>) -> TopLeftOrder {
    let order = TopLeftOrder::classify(sigma);
    match order {
        TopLeftOrder::Sorted => {
            if sigma[1] < T::zero() {
                flip_sign(1, u, sigma);
                flip_sign(2, u, sigma);
            }
        }
        TopLeftOrder::SwapLast | TopLeftOrder::RotateLastToFront => {
            if sigma[2] < T::zero() {
                flip_sign(1, u, sigma);
                flip_sign(2, u, sigma);
            }
            swap_triplets(1, 2, u, sigma, v);

            if order == TopLeftOrder::RotateLastToFront {
                swap_triplets(0, 1, u, sigma, v);
            } else {
                // a single swap is a reflection of both factors, undo it
                negate_column(u, 2);
                negate_column(v, 2);
            }
        }
    }
    order
}

/// Sorts the singular values after a bottom-right deflation.
fn sort1<T: Real>(u: &mut Mat3<T>, sigma: &mut Vec3<T>, v: &mut Mat3<T>) -> BottomRightOrder {
    let order = BottomRightOrder::classify(sigma);
    match order {
        BottomRightOrder::Sorted => {
            if sigma[0] < T::zero() {
                flip_sign(0, u, sigma);
                flip_sign(2, u, sigma);
            }
        }
        BottomRightOrder::SwapFirst | BottomRightOrder::RotateFirstToBack => {
            swap_triplets(0, 1, u, sigma, v);

            if order == BottomRightOrder::RotateFirstToBack {
                swap_triplets(1, 2, u, sigma, v);
            } else {
                negate_column(u, 1);
                negate_column(v, 1);
            }

            if sigma[1] < T::zero() {
                flip_sign(1, u, sigma);
                flip_sign(2, u, sigma);
            }
        }
    }
    order
}

/// Solves the deflated `block` and normalizes the order and signs of the singular values.
fn solve_block<T: Real>(
    block: Block,
    b: &Mat3<T>,
    u: &mut Mat3<T>,
    sigma: &mut Vec3<T>,
    v: &mut Mat3<T>,
) {
    process(block, b, u, sigma, v);
    match block {
        Block::TopLeft => {
            sort0(u, sigma, v);
        }
        Block::BottomRight => {
            sort1(u, sigma, v);
        }
    }
}

/// Singular value decomposition of a 3x3 matrix with the default [`SvdConfig`].
///
/// See [`svd3_with_config`].
pub fn svd3<T: Real>(a: &Mat3<T>) -> Result<Svd3Set<T>, SvdError> {
    svd3_with_config(a, &SvdConfig::default())
}

/// Singular value decomposition of a 3x3 matrix, `A = U * diag(sigma) * V^T`.
///
/// `U` and `V` are proper rotations. The singular values are sorted by decreasing magnitude;
/// only `sigma[2]` can be negative, which happens exactly when `det(A) < 0`.
///
/// # Arguments
///
/// * `a` - The matrix to decompose.
/// * `config` - Tolerance and iteration cap of the implicit shift QR loop.
///
/// # Errors
///
/// Returns [`SvdError::NoConvergence`] if `config.max_iterations` sweeps were performed without
/// deflating the bidiagonal matrix.
///
/// Non-finite input is not rejected; the output then contains NaN.
///
/// `A` is first divided by a power of two close to its largest entry, so `config.tolerance`
/// is relative to the magnitude of `A` and finite input cannot overflow.
pub fn svd3_with_config<T: Real>(
    a: &Mat3<T>,
    config: &SvdConfig<T>,
) -> Result<Svd3Set<T>, SvdError> {
    // work on A / 2^k with entries of magnitude below two, so no square can overflow
    let scale = power_of_two_scale(a);
    let mut b = div_scalar(a, scale);
    let (mut u, mut v) = make_upper_bidiag(&mut b);

    let mut d = Bidiagonal::from_matrix(&b);
    let tol = config.tolerance * (T::HALF * d.norm_squared().sqrt()).max(T::one());

    // implicit shift QR until B^T * B is block diagonal
    let mut count = 0;
    while d.is_coupled(tol) {
        if count >= config.max_iterations {
            log::warn!("svd3 did not converge after {count} implicit shift iterations");
            return Err(SvdError::NoConvergence { iterations: count });
        }

        let mu = wilkinson_shift(
            d.alpha_2 * d.alpha_2 + d.beta_1 * d.beta_1,
            d.alpha_2 * d.beta_2,
            d.alpha_3 * d.alpha_3 + d.beta_2 * d.beta_2,
        );

        let r = GivensRotation::from_values(d.alpha_1 * d.alpha_1 - mu, d.alpha_1 * d.beta_1, 0, 1);
        r.column_rotation(&mut b);
        r.column_rotation(&mut v);
        zero_chase(&mut b, &mut u, &mut v);

        d = Bidiagonal::from_matrix(&b);
        count += 1;
    }

    let deflation = d.deflation(tol);
    log::trace!("svd3 deflated as {deflation:?} after {count} iterations");

    let mut sigma = [T::zero(); 3];
    match deflation {
        // x x 0
        // 0 x 0
        // 0 0 x
        Deflation::LowerCoupling => solve_block(Block::TopLeft, &b, &mut u, &mut sigma, &mut v),
        // x 0 0
        // 0 x x
        // 0 0 x
        Deflation::UpperCoupling => {
            solve_block(Block::BottomRight, &b, &mut u, &mut sigma, &mut v)
        }
        // x x 0        x x 0
        // 0 0 x   ->   0 0 0
        // 0 0 x        0 0 x
        Deflation::MiddleDiagonal => {
            let mut r1 = GivensRotation::new(1, 2);
            r1.compute_unconventional(b[1][2], b[2][2]);
            r1.row_rotation(&mut b);
            r1.column_rotation(&mut u);

            solve_block(Block::TopLeft, &b, &mut u, &mut sigma, &mut v);
        }
        // x x 0        x x +        x x 0
        // 0 x x   ->   0 x 0   ->   0 x 0
        // 0 0 0        0 0 0        0 0 0
        Deflation::LastDiagonal => {
            let r1 = GivensRotation::from_values(b[1][1], b[1][2], 1, 2);
            r1.column_rotation(&mut b);
            r1.column_rotation(&mut v);

            let r2 = GivensRotation::from_values(b[0][0], b[0][2], 0, 2);
            r2.column_rotation(&mut b);
            r2.column_rotation(&mut v);

            solve_block(Block::TopLeft, &b, &mut u, &mut sigma, &mut v);
        }
        // 0 x 0        0 0 +        0 0 0
        // 0 x x   ->   0 x x   ->   0 x x
        // 0 0 x        0 0 x        0 0 x
        Deflation::FirstDiagonal => {
            let mut r1 = GivensRotation::new(0, 1);
            r1.compute_unconventional(b[0][1], b[1][1]);
            r1.row_rotation(&mut b);
            r1.column_rotation(&mut u);

            let mut r2 = GivensRotation::new(0, 2);
            r2.compute_unconventional(b[0][2], b[2][2]);
            r2.row_rotation(&mut b);
            r2.column_rotation(&mut u);

            solve_block(Block::BottomRight, &b, &mut u, &mut sigma, &mut v);
        }
        Deflation::Undeflated => {
            sigma = [b[0][0], b[1][1], b[2][2]];
        }
    }

    for val in sigma.iter_mut() {
        *val = *val * scale;
    }

    Ok(Svd3Set {
        u,
        sigma,
        v,
        iterations: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{determinant3, from_diagonal, identity, matmul, transpose};

    /// Helper function to validate all critical SVD properties
    fn verify_svd_properties(a: &Mat3<f64>, svd: &Svd3Set<f64>, epsilon: f64) {
        let reconstruction = svd.reconstruct();
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (reconstruction[i][j] - a[i][j]).abs() < epsilon,
                    "Reconstruction failed: A != U*S*V.T\nA:\n{a:?}\nReconstruction:\n{reconstruction:?}"
                );
            }
        }

        let id: Mat3<f64> = identity();
        let utu = matmul(&transpose(svd.u()), svd.u());
        let vtv = matmul(&transpose(svd.v()), svd.v());
        for i in 0..3 {
            for j in 0..3 {
                assert!((utu[i][j] - id[i][j]).abs() < epsilon, "U is not orthogonal: {utu:?}");
                assert!((vtv[i][j] - id[i][j]).abs() < epsilon, "V is not orthogonal: {vtv:?}");
            }
        }
        assert!((determinant3(svd.u()) - 1.0).abs() < epsilon);
        assert!((determinant3(svd.v()) - 1.0).abs() < epsilon);

        let s = svd.sigma();
        assert!(
            s[0] >= s[1].abs() && s[1].abs() >= s[2].abs(),
            "Singular values are not sorted: {s:?}"
        );
        assert!(s[0] >= 0.0 && s[1] >= 0.0, "Only the last singular value may be negative: {s:?}");
    }

    fn deflation_of(a: &Mat3<f64>) -> Deflation {
        let mut b = div_scalar(a, power_of_two_scale(a));
        make_upper_bidiag(&mut b);
        let d = Bidiagonal::from_matrix(&b);
        let tol = f64::SVD3_TOLERANCE * (0.5 * d.norm_squared().sqrt()).max(1.0);
        assert!(!d.is_coupled(tol));
        d.deflation(tol)
    }

    #[test]
    fn test_wilkinson_shift() {
        // eigenvalues of [[4, 1], [1, 2]] are 3 +- sqrt(2), the one closer to 2 is 3 - sqrt(2)
        let mu = wilkinson_shift(4.0f64, 1.0, 2.0);
        assert!((mu - (3.0 - 2.0f64.sqrt())).abs() < 1e-14);

        // closer to a2 = 4 when a1 < a2
        let mu = wilkinson_shift(2.0f64, 1.0, 4.0);
        assert!((mu - (3.0 + 2.0f64.sqrt())).abs() < 1e-14);

        // no coupling
        assert_eq!(wilkinson_shift(5.0f64, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_svd3_diagonal_sorted() {
        let a = from_diagonal(&[3.0, 2.0, 1.0]);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert_eq!(*svd.sigma(), [3.0, 2.0, 1.0]);
        assert_eq!(*svd.u(), identity());
        assert_eq!(*svd.v(), identity());
        assert_eq!(svd.iterations(), 0);
    }

    #[test]
    fn test_svd3_zero() {
        let a = [[0.0; 3]; 3];
        let svd = svd3(&a).unwrap();
        assert_eq!(*svd.sigma(), [0.0; 3]);
        assert_eq!(*svd.u(), identity());
        assert_eq!(*svd.v(), identity());
    }

    #[test]
    fn test_svd3_identity() {
        let a: Mat3<f64> = identity();
        let svd = svd3(&a).unwrap();
        assert_eq!(*svd.sigma(), [1.0; 3]);
        assert_eq!(*svd.u(), identity());
        assert_eq!(*svd.v(), identity());
    }

    #[test]
    fn test_svd3_negative_entry_moves_sign_last() {
        let a = from_diagonal(&[3.0, -2.0, 1.0]);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert_eq!(*svd.sigma(), [3.0, 2.0, -1.0]);
        assert_eq!(*svd.v(), identity());
        assert_eq!(*svd.u(), from_diagonal(&[1.0, -1.0, -1.0]));
    }

    #[test]
    fn test_svd3_diagonal_unsorted() {
        let a = from_diagonal(&[2.0, 3.0, 1.0]);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert_eq!(*svd.sigma(), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_svd3_reflection_matrix() {
        let a = from_diagonal(&[1.0, -1.0, 1.0]);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert_eq!(*svd.sigma(), [1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_svd3_rotation_matrix() {
        let (c, s) = (std::f64::consts::FRAC_PI_4.cos(), std::f64::consts::FRAC_PI_4.sin());
        let a = [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]];
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        for s in svd.sigma() {
            assert!((s - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_svd3_general_full_rank() {
        let a = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert!(svd.iterations() > 0);
        // det(A) = -3
        assert!(svd.sigma()[2] < 0.0);
        let product: f64 = svd.sigma().iter().product();
        assert!((product + 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_svd3_singular_rank1() {
        let a = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]];
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert!((svd.sigma()[0] - 14.0).abs() < 1e-12);
        assert!(svd.sigma()[1].abs() < 1e-12);
        assert!(svd.sigma()[2].abs() < 1e-12);
    }

    #[test]
    fn test_svd3_singular_rank2() {
        let a = [[1.0, 4.0, 5.0], [2.0, 5.0, 7.0], [3.0, 6.0, 9.0]];
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert!(svd.sigma()[1] > 1e-6);
        assert!(svd.sigma()[2].abs() < 1e-12);
    }

    #[test]
    fn test_deflation_lower_coupling() {
        let a = [[1.0, 3.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 5.0]];
        assert_eq!(deflation_of(&a), Deflation::LowerCoupling);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert_eq!(svd.sigma()[0], 5.0);
    }

    #[test]
    fn test_deflation_upper_coupling() {
        let a = [[1.0, 0.0, 0.0], [0.0, 2.0, 1.0], [0.0, 0.0, 3.0]];
        assert_eq!(deflation_of(&a), Deflation::UpperCoupling);
        verify_svd_properties(&a, &svd3(&a).unwrap(), 1e-12);

        let a = [[-4.0, 0.0, 0.0], [0.0, 2.0, 1.0], [0.0, 0.0, 3.0]];
        assert_eq!(deflation_of(&a), Deflation::UpperCoupling);
        verify_svd_properties(&a, &svd3(&a).unwrap(), 1e-12);
    }

    #[test]
    fn test_deflation_middle_diagonal() {
        let a = [[1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]];
        assert_eq!(deflation_of(&a), Deflation::MiddleDiagonal);
        verify_svd_properties(&a, &svd3(&a).unwrap(), 1e-12);
    }

    #[test]
    fn test_deflation_last_diagonal() {
        let a = [[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 0.0]];
        assert_eq!(deflation_of(&a), Deflation::LastDiagonal);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert!(svd.sigma()[2].abs() < 1e-12);
    }

    #[test]
    fn test_deflation_first_diagonal() {
        let a = [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
        assert_eq!(deflation_of(&a), Deflation::FirstDiagonal);
        let svd = svd3(&a).unwrap();
        verify_svd_properties(&a, &svd, 1e-12);
        assert!(svd.sigma()[2].abs() < 1e-12);
    }

    #[test]
    fn test_sort0_orders() {
        let id: Mat3<f64> = identity();

        let mut sigma = [3.0, -2.0, 1.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort0(&mut u, &mut sigma, &mut v), TopLeftOrder::Sorted);
        assert_eq!(sigma, [3.0, 2.0, -1.0]);

        let mut sigma = [3.0, 1.0, -2.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort0(&mut u, &mut sigma, &mut v), TopLeftOrder::SwapLast);
        assert_eq!(sigma, [3.0, 2.0, -1.0]);
        assert_eq!(determinant3(&u), 1.0);
        assert_eq!(determinant3(&v), 1.0);

        let mut sigma = [3.0, 1.0, 4.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort0(&mut u, &mut sigma, &mut v), TopLeftOrder::RotateLastToFront);
        assert_eq!(sigma, [4.0, 3.0, 1.0]);
        assert_eq!(determinant3(&u), 1.0);
        assert_eq!(determinant3(&v), 1.0);
    }

    #[test]
    fn test_sort1_orders() {
        let id: Mat3<f64> = identity();

        let mut sigma = [-4.0, 2.0, 1.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort1(&mut u, &mut sigma, &mut v), BottomRightOrder::Sorted);
        assert_eq!(sigma, [4.0, 2.0, -1.0]);

        let mut sigma = [-2.0, 3.0, 1.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort1(&mut u, &mut sigma, &mut v), BottomRightOrder::SwapFirst);
        assert_eq!(sigma, [3.0, 2.0, -1.0]);
        assert_eq!(determinant3(&u), 1.0);
        assert_eq!(determinant3(&v), 1.0);

        let mut sigma = [0.5, 3.0, -1.0];
        let (mut u, mut v) = (id, id);
        assert_eq!(sort1(&mut u, &mut sigma, &mut v), BottomRightOrder::RotateFirstToBack);
        assert_eq!(sigma, [3.0, 1.0, -0.5]);
        assert_eq!(determinant3(&u), 1.0);
        assert_eq!(determinant3(&v), 1.0);
    }

    #[test]
    fn test_svd3_no_convergence() {
        let a = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let config = SvdConfig::default().with_max_iterations(0);
        assert_eq!(
            svd3_with_config(&a, &config),
            Err(SvdError::NoConvergence { iterations: 0 })
        );
    }

    #[test]
    fn test_svd3_nan_propagates() {
        let a = [[f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let svd = svd3(&a).unwrap();
        assert!(svd.sigma().iter().any(|s| s.is_nan()));
    }

    #[test]
    fn test_svd3_large_f32() {
        for scale in [1e19f32, 1e20, 1e35] {
            let a = [
                [1.0 * scale, 2.0 * scale, 0.5 * scale],
                [0.0, 3.0 * scale, -1.0 * scale],
                [4.0 * scale, 0.0, 2.0 * scale],
            ];
            let svd = svd3(&a).unwrap();
            let r = svd.reconstruct();
            for i in 0..3 {
                for j in 0..3 {
                    assert!((r[i][j] - a[i][j]).abs() <= 1e-4 * scale, "{r:?} vs {a:?}");
                }
            }
            assert!((determinant3(svd.u()) - 1.0).abs() < 1e-5);
            assert!((determinant3(svd.v()) - 1.0).abs() < 1e-5);
            let s = svd.sigma();
            assert!(s[0] >= s[1].abs() && s[1].abs() >= s[2].abs());
            assert!(s[2] != 0.0);
        }
    }

    #[test]
    fn test_svd3_small_f64() {
        let a: [[f64; 3]; 3] = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let reference = svd3(&a).unwrap();
        let tiny = a.map(|row| row.map(|x| x * 1e-200));
        let svd = svd3(&tiny).unwrap();
        for (s, r) in svd.sigma().iter().zip(reference.sigma().iter()) {
            assert!((s - r * 1e-200).abs() <= 1e-12 * 1e-200 * reference.sigma()[0]);
        }
        verify_svd_properties(&tiny, &svd, 1e-12);
    }

    #[test]
    fn test_svd3_f32() {
        let a = [[0.5f32, -1.0, 2.0], [3.0, 0.25, -0.5], [1.0, 1.0, 1.0]];
        let svd = svd3(&a).unwrap();
        let r = svd.reconstruct();
        for i in 0..3 {
            for j in 0..3 {
                assert!((r[i][j] - a[i][j]).abs() < 1e-4);
            }
        }
    }
}
