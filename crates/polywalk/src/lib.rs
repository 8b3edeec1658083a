//! Vertices of convex polygons given by linear inequalities, plus a few tools
//! built on them.
//!
//! - `geom2`: half-plane types, the angular vertex walker, brute-force
//!   enumeration, bounding boxes, feasibility rasterization, random inputs.
//! - `frank_wolfe`: conditional-gradient projection onto a polygon.
//!
//! All routines are synchronous and allocation-light; inputs are small
//! (`n` in the tens) and every call is `O(n²)` or better except
//! `enumerate_vertices` (`O(n³)`).

pub mod frank_wolfe;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::frank_wolfe::{project, FwCfg, FwResult};
    pub use crate::geom2::rand::{draw_tangent_polygon, ReplayToken, TangentCfg, VertexCount};
    pub use crate::geom2::{
        enumerate_vertices, feasibility_grid, find_vertices, find_vertices_cfg,
        find_vertices_from_arrays, Affine2, BoundingBox, FeasibilityGrid, GeomCfg, Hs2, Polygon,
        Side, WalkError,
    };
    pub use nalgebra::Vector2 as Vec2;
}
