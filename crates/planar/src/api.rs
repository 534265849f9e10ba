//! Curated API surface.
//!
//! Queries callers are expected to use: `Polygon::absolute_vertices`,
//! `Polygon::bounding_box`, `Polygon::contains_point`,
//! `Ray::polygon_intersections`, `Polygon::polygon_intersections` and
//! `BooleanOperation::result`.

// vectors and boxes
pub use crate::geom2::{average, Aabb, Vec2Ext};
// rays
pub use crate::geom2::{sort_by_distance, Ray, RayCollision};
// polygons
pub use crate::geom2::{CacheState, CacheStates, Polygon};
// booleans
pub use crate::geom2::{difference, intersect, union, xor, BooleanOp, BooleanOperation};
// configuration and errors
pub use crate::geom2::{GeomCfg, GeometryError, GeometryResult};
// fixtures
pub use crate::geom2::rand::{
    draw_star, ReplayToken as StarReplay, StarCfg, VertexCount as StarVertexCount,
};
