//! Feasibility mask of a constraint set sampled on a regular grid.

use nalgebra::Vector2;

use super::error::WalkError;
use super::types::Hs2;

/// Default sample counts along x and y.
pub const DEFAULT_NX: usize = 90;
pub const DEFAULT_NY: usize = 80;

/// Row-major mask: `mask[row * xs.len() + col]` is the sample `(xs[col], ys[row])`.
#[derive(Clone, Debug, PartialEq)]
pub struct FeasibilityGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub mask: Vec<bool>,
}

impl FeasibilityGrid {
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> bool {
        self.mask[row * self.xs.len() + col]
    }

    /// Number of feasible samples.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}

fn linspace(lo: f64, hi: f64, k: usize) -> Vec<f64> {
    let step = (hi - lo) / (k - 1) as f64;
    (0..k)
        .map(|i| if i + 1 == k { hi } else { lo + step * i as f64 })
        .collect()
}

/// Sample `nx × ny` points over `xlim × ylim` (inclusive) and mark those with
/// `c - n·p >= 0` for every constraint. No normalization, no slack.
pub fn feasibility_grid(
    constraints: &[Hs2],
    xlim: (f64, f64),
    ylim: (f64, f64),
    nx: usize,
    ny: usize,
) -> Result<FeasibilityGrid, WalkError> {
    if nx < 2 || ny < 2 {
        return Err(WalkError::degenerate(format!(
            "grid needs at least 2 samples per axis, got {nx}x{ny}"
        )));
    }
    let xs = linspace(xlim.0, xlim.1, nx);
    let ys = linspace(ylim.0, ylim.1, ny);
    let mut mask = Vec::with_capacity(nx * ny);
    for &y in &ys {
        for &x in &xs {
            let p = Vector2::new(x, y);
            mask.push(constraints.iter().all(|h| h.slack(p) >= 0.0));
        }
    }
    Ok(FeasibilityGrid { xs, ys, mask })
}
