use nalgebra::{matrix, Vector2};

use super::error::WalkError;
use super::types::Hs2;

/// Polar angle of `n` in degrees, in (-180, 180].
#[inline]
pub(crate) fn angle_deg(n: Vector2<f64>) -> f64 {
    n.y.atan2(n.x).to_degrees()
}

/// Wrap an angle difference in degrees to (-180, 180].
#[inline]
pub(crate) fn wrap_deg(d: f64) -> f64 {
    let w = (d + 180.0).rem_euclid(360.0) - 180.0;
    if w <= -180.0 {
        w + 360.0
    } else {
        w
    }
}

/// Normalize every constraint to a unit normal.
///
/// Errors on the first zero or non-finite normal, or when fewer than 3 remain.
pub(crate) fn normalize_all(hs: &[Hs2]) -> Result<Vec<Hs2>, WalkError> {
    let mut out = Vec::with_capacity(hs.len());
    for (i, h) in hs.iter().enumerate() {
        let unit = h.normalized().ok_or_else(|| {
            WalkError::degenerate(format!("constraint {i} has a zero or non-finite normal"))
        })?;
        out.push(unit);
    }
    if out.len() < 3 {
        return Err(WalkError::degenerate(format!(
            "need at least 3 constraints, got {}",
            out.len()
        )));
    }
    Ok(out)
}

/// Intersection of the boundary lines `n1·x = c1` and `n2·x = c2`.
/// None if `|det| <= eps_det` (parallel or nearly so).
pub(crate) fn line_intersection(h1: Hs2, h2: Hs2, eps_det: f64) -> Option<Vector2<f64>> {
    let a = matrix![h1.n.x, h1.n.y; h2.n.x, h2.n.y];
    let det = a.determinant();
    if det.abs() <= eps_det {
        return None;
    }
    let inv = a.try_inverse()?;
    Some(inv * Vector2::new(h1.c, h2.c))
}

/// True iff `c` lies strictly to the left of the directed line `a → b`.
#[inline]
pub fn ccw(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Andrew’s monotone chain convex hull (returns hull in CCW order).
pub(crate) fn convex_hull(points: &[Vector2<f64>], merge_eps: f64) -> Vec<Vector2<f64>> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| {
        match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
            o => o,
        }
    });
    pts.dedup_by(|a, b| (*a - *b).norm() < merge_eps);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Signed area of a closed ring (shoelace); positive for CCW order.
pub fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    let m = ring.len();
    if m < 3 {
        return 0.0;
    }
    let twice: f64 = (0..m)
        .map(|k| {
            let p = ring[k];
            let q = ring[(k + 1) % m];
            p.x * q.y - p.y * q.x
        })
        .sum();
    0.5 * twice
}
