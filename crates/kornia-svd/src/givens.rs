//! Givens plane rotations.
//!
//! A [`GivensRotation`] acting on the index pair `(rowi, rowk)` is the matrix `G` that equals
//! the identity except for the block
//!
//! ```text
//! G[rowi][rowi] = c   G[rowi][rowk] = -s
//! G[rowk][rowi] = s   G[rowk][rowk] =  c
//! ```
//!
//! [`GivensRotation::row_rotation`] computes `G * A` and [`GivensRotation::column_rotation`]
//! computes `A * G^T`, touching only the two affected rows or columns. The rotation does not
//! hold on to the matrix; it is a small value type that is applied to whatever matrix is
//! passed in.

use std::ops::{Mul, MulAssign};

use crate::scalar::Real;

/// A plane rotation `(c, s)` acting on the index pair `(rowi, rowk)` with `rowi < rowk`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GivensRotation<T> {
    /// First index the rotation acts on.
    pub rowi: usize,
    /// Second index the rotation acts on.
    pub rowk: usize,
    /// Cosine of the rotation angle.
    pub c: T,
    /// Sine of the rotation angle.
    pub s: T,
}

impl<T: Real> GivensRotation<T> {
    /// Creates the identity rotation on `(rowi, rowk)`.
    pub fn new(rowi: usize, rowk: usize) -> Self {
        debug_assert!(rowi < rowk);
        Self {
            rowi,
            rowk,
            c: T::one(),
            s: T::zero(),
        }
    }

    /// Creates the rotation on `(rowi, rowk)` that maps `(a, b)` to `(*, 0)`.
    pub fn from_values(a: T, b: T, rowi: usize, rowk: usize) -> Self {
        let mut r = Self::new(rowi, rowk);
        r.compute(a, b);
        r
    }

    /// Computes `c` and `s` so that
    ///
    /// ```text
    /// ( c -s ) ( a )   ( * )
    /// ( s  c ) ( b ) = ( 0 )
    /// ```
    ///
    /// Falls back to the identity when `a = b = 0`. The norm is taken with `hypot`, so any
    /// finite pair gives a valid rotation without overflow or underflow.
    #[inline]
    pub fn compute(&mut self, a: T, b: T) {
        let d = a.hypot(b);
        self.c = T::one();
        self.s = T::zero();
        if d != T::zero() {
            self.c = a / d;
            self.s = -b / d;
        }
    }

    /// Computes `c` and `s` so that
    ///
    /// ```text
    /// ( c -s ) ( a )   ( 0 )
    /// ( s  c ) ( b ) = ( * )
    /// ```
    ///
    /// Falls back to the quarter turn `(c, s) = (0, 1)` when `a = b = 0`.
    #[inline]
    pub fn compute_unconventional(&mut self, a: T, b: T) {
        let d = a.hypot(b);
        self.c = T::zero();
        self.s = T::one();
        if d != T::zero() {
            self.s = a / d;
            self.c = b / d;
        }
    }

    /// Inverts the rotation.
    #[inline]
    pub fn transpose_in_place(&mut self) {
        self.s = -self.s;
    }

    /// Returns a copy acting on `(rowi + t, rowk + t)`.
    ///
    /// Used to lift a rotation computed on a 2x2 sub-block into the enclosing matrix.
    #[inline]
    pub fn offset(&self, t: usize) -> Self {
        Self {
            rowi: self.rowi + t,
            rowk: self.rowk + t,
            ..*self
        }
    }

    /// Materializes the rotation as the orthogonal factor `G^T`.
    ///
    /// This is the matrix obtained by applying [`Self::column_rotation`] to the identity, so a
    /// rotation used to accumulate `U` or `V` can be expanded directly into that factor.
    ///
    /// # Panics
    ///
    /// Panics if `rowk >= N`.
    pub fn fill<const N: usize>(&self) -> [[T; N]; N] {
        debug_assert!(self.rowk < N, "rotation index {} out of bounds for {N}x{N}", self.rowk);
        let mut m = [[T::zero(); N]; N];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = T::one();
        }
        m[self.rowi][self.rowi] = self.c;
        m[self.rowi][self.rowk] = self.s;
        m[self.rowk][self.rowi] = -self.s;
        m[self.rowk][self.rowk] = self.c;
        m
    }

    /// Applies the rotation from the left, `A <- G * A`.
    ///
    /// Only rows `rowi` and `rowk` of `A` change.
    ///
    /// # Panics
    ///
    /// Panics if `rowk >= M`.
    #[inline]
    pub fn row_rotation<const M: usize, const N: usize>(&self, a: &mut [[T; N]; M]) {
        debug_assert!(self.rowk < M, "row {} out of bounds for {M} rows", self.rowk);
        for j in 0..N {
            let tau1 = a[self.rowi][j];
            let tau2 = a[self.rowk][j];
            a[self.rowi][j] = self.c * tau1 - self.s * tau2;
            a[self.rowk][j] = self.s * tau1 + self.c * tau2;
        }
    }

    /// Applies the transposed rotation from the right, `A <- A * G^T`.
    ///
    /// Only columns `rowi` and `rowk` of `A` change.
    ///
    /// # Panics
    ///
    /// Panics if `rowk >= N`.
    #[inline]
    pub fn column_rotation<const M: usize, const N: usize>(&self, a: &mut [[T; N]; M]) {
        debug_assert!(self.rowk < N, "column {} out of bounds for {N} columns", self.rowk);
        for row in a.iter_mut() {
            let tau1 = row[self.rowi];
            let tau2 = row[self.rowk];
            row[self.rowi] = self.c * tau1 - self.s * tau2;
            row[self.rowk] = self.s * tau1 + self.c * tau2;
        }
    }
}

/// Composes two rotations on the same index pair, adding their angles.
impl<T: Real> MulAssign for GivensRotation<T> {
    fn mul_assign(&mut self, rhs: Self) {
        debug_assert!(self.rowi == rhs.rowi && self.rowk == rhs.rowk);
        let new_c = self.c * rhs.c - self.s * rhs.s;
        let new_s = self.s * rhs.c + self.c * rhs.s;
        self.c = new_c;
        self.s = new_s;
    }
}

impl<T: Real> Mul for GivensRotation<T> {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self {
        self *= rhs;
        self
    }
}
