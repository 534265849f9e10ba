//! Transformable polygons with lazily cached world-space data.
//!
//! A `Polygon` owns its local vertices and a transform (`position`, `scale`,
//! `rotation`, `flipped`). World-space data is derived on demand:
//! absolute vertices, the bounding box and the edge rays. Each lives in its
//! own `OnceCell`; every mutation clears all three so the next read rebuilds
//! from the current vertices and transform.
//!
//! Transform order per vertex: flip (`x *= -1`), rotate, scale, translate.
//!
//! Code cross-refs: `ray::Ray::polygon_intersections`, `boolean::BooleanOperation`

use std::cell::OnceCell;
use std::f64::consts::TAU;
use std::fmt;

use nalgebra::{Rotation2, Vector2};

use super::aabb::Aabb;
use super::ray::{Ray, RayCollision};
use super::types::{GeometryError, GeometryResult, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_PROBE_ANGLE};
use super::util::signed_area;

/// Whether a cached value reflects the current vertices and transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    Stale,
    Fresh,
}

/// Snapshot of the three derived caches of a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheStates {
    pub absolute_vertices: CacheState,
    pub bounding_box: CacheState,
    pub edge_rays: CacheState,
}

#[derive(Clone, Debug, Default)]
struct Cached<T>(OnceCell<T>);

impl<T> Cached<T> {
    #[inline]
    fn get_or_build(&self, build: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(build)
    }

    #[inline]
    fn clear(&mut self) {
        self.0.take();
    }

    #[inline]
    fn state(&self) -> CacheState {
        if self.0.get().is_some() {
            CacheState::Fresh
        } else {
            CacheState::Stale
        }
    }
}

/// Simple polygon in local coordinates plus a placement transform.
///
/// Invariants:
/// - Edge `i` runs from absolute vertex `i` to `i + 1` (wrapping); edge rays
///   are tagged with their index.
/// - With fewer than two vertices there are no edges and the bounding box is
///   the point box at `position`.
///
/// `Polygon` is `Send` but not `Sync` (caches fill through `&self`).
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Vector2<f64>>,
    position: Vector2<f64>,
    scale: f64,
    rotation: f64,
    flipped: bool,
    absolute: Cached<Vec<Vector2<f64>>>,
    bbox: Cached<Aabb>,
    edges: Cached<Vec<Ray>>,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

/// Local vertices as `polygon: <x,y>,<x,y>,...`.
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("polygon: ")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "<{},{}>", v.x, v.y)?;
        }
        Ok(())
    }
}

impl Polygon {
    /// Empty polygon at the origin with the identity transform.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            position: Vector2::zeros(),
            scale: 1.0,
            rotation: 0.0,
            flipped: false,
            absolute: Cached::default(),
            bbox: Cached::default(),
            edges: Cached::default(),
        }
    }

    pub fn from_vertices(vertices: Vec<Vector2<f64>>) -> Self {
        let mut p = Self::new();
        p.vertices = vertices;
        p
    }

    /// Axis-aligned rectangle centred on the local origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::from_vertices(vec![
            Vector2::new(-hw, -hh),
            Vector2::new(-hw, hh),
            Vector2::new(hw, hh),
            Vector2::new(hw, -hh),
        ])
    }

    #[inline]
    pub fn square(width: f64) -> Self {
        Self::rectangle(width, width)
    }

    /// Regular `segments`-gon inscribed in a circle, first vertex at angle 0.
    pub fn circle(radius: f64, segments: usize) -> Self {
        let segments = if segments == 0 {
            DEFAULT_CIRCLE_SEGMENTS
        } else {
            segments
        };
        let step = TAU / segments as f64;
        Self::from_vertices(
            (0..segments)
                .map(|i| {
                    let a = step * i as f64;
                    Vector2::new(a.cos() * radius, a.sin() * radius)
                })
                .collect(),
        )
    }

    // ----- local data and transform -----

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    pub fn set_vertices(&mut self, vertices: Vec<Vector2<f64>>) {
        self.vertices = vertices;
        self.invalidate();
    }

    #[inline]
    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2<f64>) -> &mut Self {
        self.position = position;
        self.invalidate();
        self
    }

    /// Move by `offset`.
    pub fn translate(&mut self, offset: Vector2<f64>) -> &mut Self {
        self.position += offset;
        self.invalidate();
        self
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self.invalidate();
        self
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) -> &mut Self {
        self.rotation = rotation;
        self.invalidate();
        self
    }

    #[inline]
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) -> &mut Self {
        self.flipped = flipped;
        self.invalidate();
        self
    }

    /// Rewrite the local vertices: rotate by `rotate`, scale by `scale`, then
    /// add `translate`. The placement transform is untouched.
    pub fn transform_points(&mut self, translate: Vector2<f64>, scale: f64, rotate: f64) {
        let rot = Rotation2::new(rotate);
        for v in &mut self.vertices {
            let turned = if rotate == 0.0 { *v } else { rot * *v };
            *v = turned * scale + translate;
        }
        self.invalidate();
    }

    /// Mirror the local vertices. `across_y` negates x, `across_x` negates y.
    pub fn flip_points(&mut self, across_y: bool, across_x: bool) {
        for v in &mut self.vertices {
            if across_y {
                v.x = -v.x;
            }
            if across_x {
                v.y = -v.y;
            }
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.absolute.clear();
        self.bbox.clear();
        self.edges.clear();
    }

    pub fn cache_state(&self) -> CacheStates {
        CacheStates {
            absolute_vertices: self.absolute.state(),
            bounding_box: self.bbox.state(),
            edge_rays: self.edges.state(),
        }
    }

    // ----- world-space data -----

    fn to_world(&self, local: Vector2<f64>) -> Vector2<f64> {
        let mut v = local;
        if self.flipped {
            v.x = -v.x;
        }
        if self.rotation != 0.0 {
            v = Rotation2::new(self.rotation) * v;
        }
        v * self.scale + self.position
    }

    fn inverse_scale(&self) -> GeometryResult<f64> {
        if self.scale == 0.0 {
            return Err(GeometryError::DivideByZero {
                context: "polygon scale is zero",
            });
        }
        Ok(1.0 / self.scale)
    }

    /// Local vertices under the placement transform.
    pub fn absolute_vertices(&self) -> &[Vector2<f64>] {
        self.absolute
            .get_or_build(|| self.vertices.iter().map(|&v| self.to_world(v)).collect())
    }

    /// Replace the local vertices so that the absolute vertices become `abs`
    /// under the current transform.
    pub fn set_absolute_vertices(&mut self, abs: &[Vector2<f64>]) -> GeometryResult<()> {
        let inv = self.inverse_scale()?;
        let unrotate = Rotation2::new(-self.rotation);
        self.vertices = abs
            .iter()
            .map(|&p| {
                let mut v = (p - self.position) * inv;
                if self.rotation != 0.0 {
                    v = unrotate * v;
                }
                if self.flipped {
                    v.x = -v.x;
                }
                v
            })
            .collect();
        self.invalidate();
        Ok(())
    }

    /// World point expressed in this polygon's local frame.
    pub fn world_point_to_local(&self, p: Vector2<f64>) -> GeometryResult<Vector2<f64>> {
        let mut v = (p - self.position) * self.inverse_scale()?;
        if self.rotation != 0.0 {
            v = Rotation2::new(-self.rotation) * v;
        }
        if self.flipped {
            v.x = -v.x;
        }
        Ok(v)
    }

    pub fn bounding_box(&self) -> Aabb {
        *self.bbox.get_or_build(|| {
            Aabb::around(self.absolute_vertices()).unwrap_or_else(|| Aabb::at_point(self.position))
        })
    }

    /// One finite ray per boundary edge of the absolute shape.
    pub fn edge_rays(&self) -> &[Ray] {
        self.edges.get_or_build(|| {
            let abs = self.absolute_vertices();
            let n = abs.len();
            if n < 2 {
                return Vec::new();
            }
            (0..n)
                .map(|i| Ray::from_points(abs[i], abs[(i + 1) % n]).with_edge(i))
                .collect()
        })
    }

    /// Shoelace area of the absolute shape; positive when counter-clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.absolute_vertices())
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    // ----- queries -----

    /// Shorthand for `contains_point_at(p, DEFAULT_PROBE_ANGLE)`.
    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.contains_point_at(p, DEFAULT_PROBE_ANGLE)
    }

    /// Even-odd test with an open probe ray cast from `p` at `probe_angle`.
    ///
    /// Avoid multiples of `π/2`: a probe running along an axis-aligned edge
    /// reports no crossing for it.
    pub fn contains_point_at(&self, p: Vector2<f64>, probe_angle: f64) -> bool {
        if !self.bounding_box().contains_point(p) {
            return false;
        }
        let probe = Ray::open(p, probe_angle);
        probe.polygon_intersections(self).len() % 2 == 1
    }

    /// Crossings of this polygon's edges with `other`'s edges. The collisions'
    /// `cast` is the own edge and `target` is `other`.
    pub fn polygon_intersections<'a>(&self, other: &'a Polygon) -> Vec<RayCollision<'a>> {
        if !Aabb::test_overlap(&self.bounding_box(), &other.bounding_box()) {
            return Vec::new();
        }
        self.edge_rays()
            .iter()
            .flat_map(|edge| edge.polygon_intersections(other))
            .collect()
    }
}
