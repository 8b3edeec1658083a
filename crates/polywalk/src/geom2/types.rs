//! Basic 2D types and tolerances used by the vertex walker.
//!
//! - `GeomCfg`: centralizes epsilons for determinant and feasibility checks.
//! - `Hs2`: closed half‑plane `n·x <= c` with helper predicates.
//! - `Affine2`: 2D affine map, used to move whole constraint sets rigidly.
//!
//! Code cross-refs: `walk::find_vertices`, `enumerate::enumerate_vertices`

use nalgebra::{Matrix2, Vector2};

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two lines with `|det [n1; n2]| <= eps_det` count as parallel.
    pub eps_det: f64,
    /// Slack for membership tests `n·x <= c + eps_feas`.
    pub eps_feas: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-6,
            eps_feas: 1e-6,
        }
    }
}

/// Closed half‑plane `n · x <= c` (no normalization required here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Build from a row `[a1, a2]` of `A` and the matching entry of `b`.
    #[inline]
    pub fn from_row(a: [f64; 2], b: f64) -> Self {
        Self::new(Vector2::new(a[0], a[1]), b)
    }

    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }

    /// Slack `c - n·p`; non-negative inside.
    #[inline]
    pub fn slack(&self, p: Vector2<f64>) -> f64 {
        self.c - self.n.dot(&p)
    }

    /// Rescale to a unit normal. None for zero or non-finite normals.
    #[inline]
    pub fn normalized(&self) -> Option<Hs2> {
        let norm = self.n.norm();
        if !norm.is_finite() || norm <= 0.0 || !self.c.is_finite() {
            return None;
        }
        Some(Hs2::new(self.n / norm, self.c / norm))
    }

    /// Image of the half-plane under an invertible affine map `f`:
    /// `{f(x) : n·x <= c} = {y : (M^{-T} n)·y <= c + (M^{-T} n)·t}`.
    pub fn push_forward(&self, f: &Affine2) -> Option<Hs2> {
        let minv = f.m.try_inverse()?;
        let n_new = minv.transpose() * self.n;
        let c_new = self.c + n_new.dot(&f.t);
        Some(Hs2::new(n_new, c_new))
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Rotation by `theta` (radians, counter-clockwise) followed by translation `t`.
    #[inline]
    pub fn rigid(theta: f64, t: Vector2<f64>) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            m: Matrix2::new(c, -s, s, c),
            t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }
}
