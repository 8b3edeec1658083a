//! Random bounded constraint sets (circumscribed polygons + replay tokens).
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular
//!   jitter, and emit the tangent line of a circle at each angle.
//! - Every tangent touches the inscribed circle, so every constraint is a
//!   facet. The jitter is clamped so that any two consecutive angular gaps
//!   sum to less than π: the region is bounded and each facet's neighbors
//!   meet outside it, which the walker's orientation check requires.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `walk::find_vertices`, `types::Hs2`

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::Hs2;

/// Constraint count distribution (at least 5; fewer facets always leave some
/// pair of consecutive gaps at π or more).
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(5),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(5);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Circumscribed-polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct TangentCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n.
    /// Clamped to [0, 0.49] and further so that no two consecutive gaps reach π.
    pub angle_jitter_frac: f64,
    /// Inscribed circle radius.
    pub radius: f64,
    pub center: Vector2<f64>,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
    /// Shuffle the emitted constraints instead of keeping angular order.
    pub shuffle: bool,
}
impl Default for TangentCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(8),
            angle_jitter_frac: 0.3,
            radius: 1.0,
            center: Vector2::zeros(),
            random_phase: true,
            shuffle: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a bounded constraint set whose every half-plane is a facet.
pub fn draw_tangent_polygon(cfg: TangentCfg, tok: ReplayToken) -> Vec<Hs2> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj_cap = (0.95 * (n as f64 / 4.0 - 1.0)).min(0.49);
    let aj = cfg.angle_jitter_frac.clamp(0.0, aj_cap);
    let r = cfg.radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut hs: Vec<Hs2> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let normal = Vector2::new(th.cos(), th.sin());
            Hs2::new(normal, r + normal.dot(&cfg.center))
        })
        .collect();
    if cfg.shuffle {
        hs.shuffle(&mut rng);
    }
    hs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::find_vertices;

    #[test]
    fn reproducible_draw() {
        let cfg = TangentCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_tangent_polygon(cfg, tok);
        let b = draw_tangent_polygon(cfg, tok);
        assert_eq!(a, b);
        let c = draw_tangent_polygon(cfg, ReplayToken { seed: 42, index: 8 });
        assert_ne!(a, c);
    }

    #[test]
    fn draws_are_walkable_and_contain_center() {
        let cfg = TangentCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 20 },
            angle_jitter_frac: 0.49,
            center: Vector2::new(0.5, -2.0),
            ..TangentCfg::default()
        };
        for index in 0..50 {
            let hs = draw_tangent_polygon(cfg, ReplayToken { seed: 9, index });
            assert!(hs.iter().all(|h| h.slack(cfg.center) > 0.0));
            let poly = find_vertices(&hs).expect("tangent polygon walks");
            assert!(poly.is_closed());
            assert_eq!(poly.len(), hs.len());
        }
    }
}
