//! Rays and segments as slope-intercept lines.
//!
//! A `Ray` is an origin, a direction angle in `(-π, π]` and a length (infinite
//! for open rays). The line form `y = slope·x + intercept` is cached and
//! rebuilt whenever the origin, angle or end point changes. Vertical rays keep
//! only the sign of their direction in `slope`.
//!
//! Rays built from polygon edges carry the edge index. The owning polygon is
//! not stored on the ray; collisions borrow it instead (`RayCollision::target`).
//!
//! Code cross-refs: `aabb::Aabb::intersects_ray`, `polygon::Polygon::edge_rays`

use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use nalgebra::Vector2;

use super::polygon::Polygon;
use super::types::{DEFAULT_LENIENCY, OPEN_RAY_REACH, PARALLEL_EPS, RAY_EPS, VERTICAL_EPS};
use super::util::{angle_diff, wrap_angle};
use super::vector::Vec2Ext;

/// Directed ray or segment.
///
/// Invariants:
/// - `angle ∈ (-π, π]`.
/// - `(slope, intercept, vertical)` match `(origin, angle)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vector2<f64>,
    angle: f64,
    length: f64,
    slope: f64,
    intercept: f64,
    vertical: bool,
    edge: Option<usize>,
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ray: <{},{}> angle:{} length:{}",
            self.origin.x, self.origin.y, self.angle, self.length
        )
    }
}

impl Ray {
    pub fn new(origin: Vector2<f64>, angle: f64, length: f64) -> Self {
        let mut ray = Self {
            origin,
            angle: 0.0,
            length,
            slope: 0.0,
            intercept: 0.0,
            vertical: false,
            edge: None,
        };
        ray.set_angle(angle);
        ray
    }

    /// Infinite ray.
    #[inline]
    pub fn open(origin: Vector2<f64>, angle: f64) -> Self {
        Self::new(origin, angle, f64::INFINITY)
    }

    /// Segment from `start` to `end`.
    #[inline]
    pub fn from_points(start: Vector2<f64>, end: Vector2<f64>) -> Self {
        Self::new(start, start.direction_to(&end), start.distance_to(&end))
    }

    #[inline]
    pub(crate) fn with_edge(mut self, edge: usize) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Index of the polygon edge this ray was built from, if any.
    #[inline]
    pub fn edge(&self) -> Option<usize> {
        self.edge
    }

    #[inline]
    pub fn origin(&self) -> Vector2<f64> {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector2<f64>) {
        self.origin = origin;
        self.recalculate();
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Point the ray at `angle`, wrapped into `(-π, π]`.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = wrap_angle(angle);
        self.recalculate();
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.length.is_infinite()
    }

    /// End point; open rays end `OPEN_RAY_REACH` away from the origin.
    pub fn end(&self) -> Vector2<f64> {
        let reach = if self.length.is_finite() {
            self.length
        } else {
            OPEN_RAY_REACH
        };
        self.origin + Vector2::<f64>::from_angle(self.angle, reach)
    }

    /// Re-aim and resize the ray so it ends at `end`.
    pub fn set_end(&mut self, end: Vector2<f64>) {
        self.length = self.origin.distance_to(&end);
        self.angle = self.origin.direction_to(&end);
        self.recalculate();
    }

    /// Slope of the line; `±∞` for vertical rays.
    pub fn slope(&self) -> f64 {
        if self.vertical {
            self.slope * f64::INFINITY
        } else {
            self.slope
        }
    }

    /// y-intercept of the line; `∓∞` for vertical rays.
    pub fn intercept(&self) -> f64 {
        if self.vertical {
            -self.slope * f64::INFINITY
        } else {
            self.intercept
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        !self.vertical && self.slope == 0.0
    }

    /// y on the line at `x`. Vertical rays answer `±∞` by side.
    pub fn y_at(&self, x: f64) -> f64 {
        if self.vertical {
            return if x >= self.origin.x {
                self.slope * f64::INFINITY
            } else {
                -self.slope * f64::INFINITY
            };
        }
        self.slope * x + self.intercept
    }

    /// x on the line at `y`. Horizontal rays answer their own origin x.
    pub fn x_at(&self, y: f64) -> f64 {
        if self.vertical {
            return self.origin.x;
        }
        if self.slope == 0.0 {
            return self.origin.x;
        }
        (y - self.intercept) / self.slope
    }

    fn recalculate(&mut self) {
        if (self.angle.abs() - FRAC_PI_2).abs() <= VERTICAL_EPS {
            // slope keeps the direction only
            self.slope = self.angle.signum();
            self.intercept = 0.0;
            self.vertical = true;
        } else {
            self.slope = self.angle.tan();
            self.intercept = self.origin.y - self.slope * self.origin.x;
            self.vertical = false;
        }
    }

    /// Shorthand for `contains_point_eps(p, DEFAULT_LENIENCY)`.
    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.contains_point_eps(p, DEFAULT_LENIENCY)
    }

    /// Whether `p` lies on the ray: within `length` of the origin and in the
    /// ray's direction up to `leniency` radians. The origin itself is on the ray.
    pub fn contains_point_eps(&self, p: Vector2<f64>, leniency: f64) -> bool {
        let dist = self.origin.distance_to(&p);
        if !(dist <= self.length + RAY_EPS) {
            return false;
        }
        if dist <= RAY_EPS {
            return true;
        }
        angle_diff(self.origin.direction_to(&p), self.angle).abs() <= leniency
    }

    /// Same or opposite direction.
    pub fn is_parallel(&self, other: &Ray) -> bool {
        let d = angle_diff(self.angle, other.angle).abs();
        d <= PARALLEL_EPS || PI - d <= PARALLEL_EPS
    }

    /// Crossing point of two rays, if both contain it.
    ///
    /// Parallel rays never cross (collinear overlap included). Rays whose
    /// origins are farther apart than their combined lengths are skipped
    /// without solving.
    pub fn intersection(&self, other: &Ray) -> Option<Vector2<f64>> {
        if self.is_parallel(other)
            || self.origin.distance_to(&other.origin) > self.length + other.length
        {
            return None;
        }
        if self.vertical {
            return self.intersect_vertical(other);
        }
        if other.vertical {
            return other.intersect_vertical(self);
        }
        let x = (other.intercept - self.intercept) / (self.slope - other.slope);
        let y = self.slope * x + self.intercept;
        self.accept(Vector2::new(x, y), other)
    }

    fn intersect_vertical(&self, other: &Ray) -> Option<Vector2<f64>> {
        if other.vertical {
            return None;
        }
        let x = self.origin.x;
        let y = if other.is_horizontal() {
            other.origin.y
        } else {
            other.y_at(x)
        };
        self.accept(Vector2::new(x, y), other)
    }

    #[inline]
    fn accept(&self, p: Vector2<f64>, other: &Ray) -> Option<Vector2<f64>> {
        (self.contains_point(p) && other.contains_point(p)).then_some(p)
    }

    /// All crossings of this ray with `polygon`'s edges, unsorted.
    pub fn polygon_intersections<'a>(&self, polygon: &'a Polygon) -> Vec<RayCollision<'a>> {
        if !polygon.bounding_box().intersects_ray(self) {
            return Vec::new();
        }
        polygon
            .edge_rays()
            .iter()
            .enumerate()
            .filter_map(|(i, edge)| {
                self.intersection(edge).map(|point| RayCollision {
                    point,
                    cast: *self,
                    target_ray: *edge,
                    target: polygon,
                    edge_index: i,
                })
            })
            .collect()
    }

    /// Crossings against every polygon in `polygons`, unsorted.
    pub fn cast<'a>(&self, polygons: &'a [Polygon]) -> Vec<RayCollision<'a>> {
        polygons
            .iter()
            .flat_map(|p| self.polygon_intersections(p))
            .collect()
    }
}

/// A ray/edge crossing.
#[derive(Clone, Copy, Debug)]
pub struct RayCollision<'a> {
    pub point: Vector2<f64>,
    /// The ray that was cast.
    pub cast: Ray,
    /// The polygon edge that was hit.
    pub target_ray: Ray,
    pub target: &'a Polygon,
    /// Index of the hit edge (edge `i` runs from vertex `i` to `i + 1`).
    pub edge_index: usize,
}

impl RayCollision<'_> {
    #[inline]
    pub fn distance_from_cast_origin(&self) -> f64 {
        self.cast.origin().distance_to(&self.point)
    }
}

/// Sort collisions by distance of their point from `from`, nearest first.
pub fn sort_by_distance(collisions: &mut [RayCollision<'_>], from: Vector2<f64>) {
    collisions.sort_by(|a, b| {
        a.point
            .distance_to(&from)
            .partial_cmp(&b.point.distance_to(&from))
            .unwrap_or(Ordering::Equal)
    });
}
