//! 2D geometry: vectors, boxes, rays, polygons and polygon booleans.
//!
//! Purpose
//! - Ray/edge intersection and point-in-polygon queries on transformable
//!   polygons with lazily cached world-space data.
//! - Boolean operations between two simple polygons by boundary crawling.
//!
//! Conventions
//! - Angles are radians in `(-π, π]`; positive turns are counter-clockwise
//!   in a y-up frame. Nothing depends on which way y points on screen.
//! - Tolerances are explicit: module constants in `types` for ray math,
//!   `GeomCfg` for the crawl.
//!
//! Code cross-refs: `Polygon`, `Ray`, `Aabb`, `BooleanOperation`, `GeomCfg`

pub mod aabb;
pub mod boolean;
pub mod polygon;
pub mod rand;
pub mod ray;
mod types;
pub mod util;
pub mod vector;

pub use aabb::Aabb;
pub use boolean::{difference, intersect, union, xor, BooleanOp, BooleanOperation};
pub use polygon::{CacheState, CacheStates, Polygon};
pub use ray::{sort_by_distance, Ray, RayCollision};
pub use types::{
    GeomCfg, GeometryError, GeometryResult, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_LENIENCY,
    DEFAULT_PROBE_ANGLE, OPEN_RAY_REACH, PARALLEL_EPS, RAY_EPS, VERTICAL_EPS,
};
pub use vector::{average, Vec2Ext};

#[cfg(test)]
mod tests;
