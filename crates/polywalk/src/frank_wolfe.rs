//! Conditional-gradient (Frank-Wolfe) projection onto a polygon.
//!
//! Problem
//! - `min_x ½|x - target|²  s.t.  Ax <= b`, with `Ax <= b` a bounded polygon.
//!
//! Method
//! - Linearize at `x_k` (gradient `g = x_k - target`) and solve
//!   `min_s g·s` over the polygon. A linear objective over a bounded polygon
//!   attains its minimum at a vertex, so the oracle scans the walker's
//!   vertices instead of calling an LP solver.
//! - Step with exact line search along `d = s - x_k`:
//!   `γ = clamp(-g·d / |d|², 0, 1)`.
//! - Stop when the duality gap `g·(x_k - s)` falls to `eps_stop`.
//!
//! Code cross-refs: `geom2::find_vertices_cfg`

use nalgebra::Vector2;

use crate::geom2::{find_vertices_cfg, GeomCfg, Hs2, WalkError};

/// Solver settings.
#[derive(Clone, Copy, Debug)]
pub struct FwCfg {
    pub max_iter: usize,
    pub eps_stop: f64,
    pub geom: GeomCfg,
}

impl Default for FwCfg {
    fn default() -> Self {
        Self {
            max_iter: 100,
            eps_stop: 1e-6,
            geom: GeomCfg::default(),
        }
    }
}

/// Final iterate plus convergence record.
#[derive(Clone, Debug)]
pub struct FwResult {
    pub x: Vector2<f64>,
    /// Duality gap at `x` (upper bound on `f(x) - f*`).
    pub gap: f64,
    pub iterations: usize,
    pub converged: bool,
    /// Iterates `x_1, x_2, ...` (the start point is not included).
    pub history: Vec<Vector2<f64>>,
}

/// Linear minimization oracle: vertex minimizing `g·v` (first one on ties).
fn lmo(vertices: &[Vector2<f64>], g: Vector2<f64>) -> Vector2<f64> {
    let mut best = vertices[0];
    let mut best_val = g.dot(&best);
    for v in &vertices[1..] {
        let val = g.dot(v);
        if val < best_val {
            best = *v;
            best_val = val;
        }
    }
    best
}

/// Project `target` onto `{x : n_k·x <= c_k}` starting from `x0`.
///
/// The duality gap only bounds the error at feasible points, so an `x0`
/// violating any constraint by more than `eps_feas` is replaced by the
/// oracle vertex for `x0 - target`. Iterates then stay convex combinations
/// of vertices.
pub fn project(
    constraints: &[Hs2],
    target: Vector2<f64>,
    x0: Vector2<f64>,
    cfg: FwCfg,
) -> Result<FwResult, WalkError> {
    let poly = find_vertices_cfg(constraints, cfg.geom)?;
    let vertices = poly.vertices();
    tracing::debug!(vertices = vertices.len(), "frank_wolfe_start");

    let mut x = x0;
    if !constraints.iter().all(|h| {
        h.normalized()
            .is_some_and(|u| u.satisfies_eps(x0, cfg.geom.eps_feas))
    }) {
        x = lmo(vertices, x0 - target);
        tracing::debug!(x0 = ?(x0.x, x0.y), x = ?(x.x, x.y), "frank_wolfe_infeasible_start");
    }
    let mut history = Vec::new();
    for k in 0..cfg.max_iter {
        let g = x - target;
        let s = lmo(vertices, g);
        let gap = g.dot(&(x - s));
        tracing::trace!(iter = k, gap, x = ?(x.x, x.y), "frank_wolfe_iter");
        if gap <= cfg.eps_stop {
            return Ok(FwResult {
                x,
                gap,
                iterations: k,
                converged: true,
                history,
            });
        }
        let d = s - x;
        let dd = d.norm_squared();
        if dd == 0.0 {
            break;
        }
        let gamma = (-g.dot(&d) / dd).clamp(0.0, 1.0);
        x += d * gamma;
        history.push(x);
    }
    let g = x - target;
    let gap = g.dot(&(x - lmo(vertices, g)));
    tracing::debug!(gap, max_iter = cfg.max_iter, "frank_wolfe_not_converged");
    Ok(FwResult {
        x,
        gap,
        iterations: history.len(),
        converged: gap <= cfg.eps_stop,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn unit_square() -> Vec<Hs2> {
        vec![
            Hs2::new(vector![0.0, -1.0], 0.0),
            Hs2::new(vector![1.0, 0.0], 1.0),
            Hs2::new(vector![0.0, 1.0], 1.0),
            Hs2::new(vector![-1.0, 0.0], 0.0),
        ]
    }

    #[test]
    fn projects_outside_point_to_corner() {
        let res = project(
            &unit_square(),
            vector![2.0, 2.0],
            vector![1.0, 0.0],
            FwCfg::default(),
        )
        .unwrap();
        assert!(res.converged);
        assert!((res.x - vector![1.0, 1.0]).norm() < 1e-9);
        assert!(res.gap <= 1e-6);
    }

    #[test]
    fn projects_onto_edge() {
        let res = project(
            &unit_square(),
            vector![0.5, 3.0],
            vector![0.0, 0.0],
            FwCfg::default(),
        )
        .unwrap();
        assert!(res.converged);
        assert!((res.x - vector![0.5, 1.0]).norm() < 1e-6);
    }

    #[test]
    fn infeasible_start_is_replaced_by_a_vertex() {
        let hs = unit_square();
        let res = project(&hs, vector![2.0, 2.0], vector![3.0, 3.0], FwCfg::default()).unwrap();
        assert!(res.converged);
        assert!(hs.iter().all(|h| h.satisfies_eps(res.x, 1e-9)));
        assert!((res.x - vector![1.0, 1.0]).norm() < 1e-9);
        assert_eq!(res.history.first(), Some(&vector![1.0, 1.0]));
    }

    #[test]
    fn inside_target_converges_near_itself() {
        let cfg = FwCfg {
            max_iter: 5000,
            eps_stop: 1e-8,
            ..FwCfg::default()
        };
        let target = vector![0.3, 0.6];
        let res = project(&unit_square(), target, vector![0.0, 0.0], cfg).unwrap();
        // Gap bounds f(x) - f* = ½|x - target|².
        assert!(0.5 * (res.x - target).norm_squared() <= res.gap + 1e-12);
        assert!((res.x - target).norm() < 1e-3);
    }

    #[test]
    fn walker_errors_propagate() {
        let open = vec![
            Hs2::new(vector![1.0, 0.0], 1.0),
            Hs2::new(vector![-1.0, 0.0], 1.0),
            Hs2::new(vector![0.0, 1.0], 1.0),
        ];
        let err = project(&open, vector![0.0, 0.0], vector![0.0, 0.0], FwCfg::default());
        assert!(matches!(err, Err(WalkError::NoNeighbor { .. })));
    }
}
