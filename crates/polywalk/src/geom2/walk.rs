//! Half-plane vertex walker.
//!
//! Purpose
//! - Turn a bounded H-representation `Ax <= b` into the ordered boundary
//!   vertices of the polygon, without sorting, hulls, or an LP.
//!
//! Model
//! - Normalize every constraint to a unit normal.
//! - For the current constraint `i`, rank all other normals by signed angular
//!   difference (degrees, wrapped to (-180, 180]). The largest negative one is
//!   the previous edge, the smallest positive one is the next edge.
//! - Emit `prev ∩ i` and `i ∩ next` on the first step and `i ∩ next` on every
//!   later step, checking the triangle `(i ∩ next, next ∩ prev, prev ∩ i)`
//!   for orientation. Then move to `next`.
//!
//! Preconditions are not verified exhaustively: the region must be bounded,
//! non-empty and full-dimensional. Violations surface as `WalkError`s, never
//! as a truncated vertex list.
//!
//! Code cross-refs: `util::{line_intersection, ccw, normalize_all}`, `enumerate`

use nalgebra::Vector2;

use super::error::{Side, WalkError};
use super::types::{GeomCfg, Hs2};
use super::util::{angle_deg, ccw, line_intersection, normalize_all, signed_area, wrap_deg};

/// Output of the walk: boundary vertices in traversal order.
///
/// Invariants:
/// - `walk.len() == visited.len() + 1`.
/// - `walk[k]` and `walk[k + 1]` lie on the line of constraint `visited[k]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    walk: Vec<Vector2<f64>>,
    visited: Vec<usize>,
    /// Index of the first later point that returns to `walk[0]`: the point
    /// emitted on the step whose next constraint is `visited[0]`.
    cycle: Option<usize>,
}

impl Polygon {
    /// The emitted points, `n + 1` of them. When every constraint is a facet
    /// the last point repeats the first.
    #[inline]
    pub fn walk(&self) -> &[Vector2<f64>] {
        &self.walk
    }

    /// Constraint indices in the order the walk visited them.
    #[inline]
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// True if the walk returned to its starting vertex.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.cycle.is_some()
    }

    /// Distinct vertices as an implicit cycle: the walk up to (excluding) its
    /// first return to the starting vertex.
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.walk[..self.cycle.unwrap_or(self.walk.len())]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }

    pub fn into_vertices(mut self) -> Vec<Vector2<f64>> {
        if let Some(k) = self.cycle {
            self.walk.truncate(k);
        }
        self.walk
    }

    /// Sum of edge lengths around the cycle.
    pub fn perimeter(&self) -> f64 {
        let v = self.vertices();
        let m = v.len();
        (0..m).map(|k| (v[(k + 1) % m] - v[k]).norm()).sum()
    }

    /// Signed area; positive when the traversal is counter-clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.vertices())
    }
}

/// Indices `(prev, next)` of the angular neighbors of constraint `i`.
///
/// `prev` has the largest strictly negative angular difference to `hs[i]`,
/// `next` the smallest strictly positive one. Ties keep the lowest index.
/// `hs` must hold unit (or at least non-zero) normals.
pub fn angular_neighbors(hs: &[Hs2], i: usize) -> Result<(usize, usize), WalkError> {
    let ref_angle = angle_deg(hs[i].n);
    let mut prev: Option<(usize, f64)> = None;
    let mut next: Option<(usize, f64)> = None;
    for (j, h) in hs.iter().enumerate() {
        if j == i {
            continue;
        }
        let d = wrap_deg(angle_deg(h.n) - ref_angle);
        if d < 0.0 {
            if prev.is_none_or(|(_, best)| d > best) {
                prev = Some((j, d));
            }
        } else if d > 0.0 && next.is_none_or(|(_, best)| d < best) {
            next = Some((j, d));
        }
    }
    let (prev, _) = prev.ok_or(WalkError::NoNeighbor {
        constraint: i,
        side: Side::Previous,
    })?;
    let (next, _) = next.ok_or(WalkError::NoNeighbor {
        constraint: i,
        side: Side::Next,
    })?;
    Ok((prev, next))
}

/// Walk the boundary of `{x : n_k·x <= c_k for all k}` with default tolerances.
#[inline]
pub fn find_vertices(constraints: &[Hs2]) -> Result<Polygon, WalkError> {
    find_vertices_cfg(constraints, GeomCfg::default())
}

/// Parallel-array form: `normals[k]·x <= offsets[k]`.
pub fn find_vertices_from_arrays(
    normals: &[[f64; 2]],
    offsets: &[f64],
) -> Result<Polygon, WalkError> {
    if normals.len() != offsets.len() {
        return Err(WalkError::degenerate(format!(
            "{} normals but {} offsets",
            normals.len(),
            offsets.len()
        )));
    }
    let hs: Vec<Hs2> = normals
        .iter()
        .zip(offsets)
        .map(|(a, &b)| Hs2::from_row(*a, b))
        .collect();
    find_vertices(&hs)
}

/// Walk the boundary with explicit tolerances.
pub fn find_vertices_cfg(constraints: &[Hs2], cfg: GeomCfg) -> Result<Polygon, WalkError> {
    let hs = normalize_all(constraints)?;
    let n = hs.len();
    let mut walk: Vec<Vector2<f64>> = Vec::with_capacity(n + 1);
    let mut visited = Vec::with_capacity(n);
    let mut i = 0usize;
    let mut cycle = None;
    for step in 0..n {
        let (prev, next) = angular_neighbors(&hs, i)?;
        let pc = line_intersection(hs[prev], hs[i], cfg.eps_det).ok_or(WalkError::NoNeighbor {
            constraint: i,
            side: Side::Previous,
        })?;
        let pa = line_intersection(hs[i], hs[next], cfg.eps_det).ok_or(WalkError::NoNeighbor {
            constraint: i,
            side: Side::Next,
        })?;
        let pb = line_intersection(hs[next], hs[prev], cfg.eps_det);
        if step == 0 {
            walk.push(pc);
            walk.push(pa);
        } else {
            match pb {
                // prev and next are parallel: nothing to check against.
                None => walk.push(pa),
                Some(pb) if !ccw(pa, pb, pc) => walk.push(pa),
                Some(_) => return Err(WalkError::Orientation { step, constraint: i }),
            }
        }
        visited.push(i);
        // For distinct normal angles `next == visited[0]` makes `i` the start's
        // previous neighbor, so `i ∩ next` is `walk[0]`.
        if cycle.is_none() && next == visited[0] {
            cycle = Some(step + 1);
        }
        i = next;
    }
    Ok(Polygon {
        walk,
        visited,
        cycle,
    })
}
