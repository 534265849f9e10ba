//! Planar geometry: rays, transformable polygons and polygon booleans.
//!
//! The library is synchronous and allocation-light; all state lives in the
//! values callers hold. `Polygon` caches its world-space data lazily and is
//! therefore `Send` but not `Sync`.
//!
//! API Policy
//! - `api` and `prelude` are the curated import surfaces.
//! - Module paths under `geom2` are stable enough for tests and benches but may
//!   move when the layout changes.

pub mod api;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, GeometryError, GeometryResult};
pub use nalgebra::Vector2 as Vec2;

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{draw_star, ReplayToken, StarCfg, VertexCount};
    pub use crate::geom2::{
        difference, intersect, sort_by_distance, union, xor, Aabb, BooleanOp, BooleanOperation,
        GeomCfg, GeometryError, GeometryResult, Polygon, Ray, RayCollision, Vec2Ext,
    };
    pub use nalgebra::Vector2 as Vec2;
}
