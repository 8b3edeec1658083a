//! Brute-force vertex enumeration: every pairwise line intersection that is
//! feasible, ordered by a convex hull. `O(n³)`; meant as an independent
//! cross-check of the walker and for inputs with redundant constraints, which
//! the walker rejects.

use nalgebra::Vector2;

use super::error::WalkError;
use super::types::{GeomCfg, Hs2};
use super::util::{convex_hull, line_intersection, normalize_all};

/// Feasible vertices of `{x : n_k·x <= c_k}` in counter-clockwise order.
pub fn enumerate_vertices(constraints: &[Hs2], cfg: GeomCfg) -> Result<Vec<Vector2<f64>>, WalkError> {
    let hs = normalize_all(constraints)?;
    let mut candidates = Vec::new();
    for a in 0..hs.len() {
        for b in (a + 1)..hs.len() {
            let Some(p) = line_intersection(hs[a], hs[b], cfg.eps_det) else {
                continue;
            };
            if hs.iter().all(|h| h.satisfies_eps(p, cfg.eps_feas)) {
                candidates.push(p);
            }
        }
    }
    let hull = convex_hull(&candidates, cfg.eps_feas);
    if hull.len() < 3 {
        return Err(WalkError::degenerate(format!(
            "only {} feasible vertices (empty, unbounded, or flat region)",
            hull.len()
        )));
    }
    Ok(hull)
}
