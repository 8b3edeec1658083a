//! 2D half-plane geometry: vertex walker and helpers around it.
//!
//! Purpose
//! - Compute the ordered vertices of a bounded polygon given as `Ax <= b`
//!   (`walk`), with a brute-force cross-check (`enumerate`), box clipping for
//!   open inputs (`bounds`), and grid rasterization (`raster`).
//! - Keep the API small and numerically explicit (eps-aware via `GeomCfg`).
//!
//! Conventions
//! - Half-planes are `n·x <= c`; inputs need not be normalized, every entry
//!   point normalizes internally.
//! - Errors are `WalkError`; no function returns a partial vertex list.
//!
//! Code cross-refs: `Hs2`, `Polygon`, `GeomCfg`, `WalkError`

pub mod bounds;
pub mod enumerate;
mod error;
pub mod rand;
pub mod raster;
mod types;
mod util;
pub mod walk;

pub use bounds::BoundingBox;
pub use enumerate::enumerate_vertices;
pub use error::{Side, WalkError};
pub use raster::{feasibility_grid, FeasibilityGrid};
pub use types::{Affine2, GeomCfg, Hs2};
pub use util::{ccw, signed_area};
pub use walk::{angular_neighbors, find_vertices, find_vertices_cfg, find_vertices_from_arrays, Polygon};
