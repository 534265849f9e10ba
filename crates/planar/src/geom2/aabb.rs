//! Axis-aligned bounding boxes.
//!
//! Boxes are stored as `position` (the top-left corner, smallest x and y) plus
//! `size`. `top` is the smaller y, `bottom` the larger, matching screen-space
//! conventions; nothing here depends on which way y points.

use std::fmt;

use nalgebra::Vector2;

use super::ray::Ray;
use super::types::RAY_EPS;

/// Axis-aligned box `position .. position + size`.
///
/// Invariants (by convention, not enforced):
/// - `size.x >= 0`, `size.y >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub position: Vector2<f64>,
    pub size: Vector2<f64>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::at_point(Vector2::zeros())
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "box: l:{} r:{} t:{} b:{}",
            self.left(),
            self.right(),
            self.top(),
            self.bottom()
        )
    }
}

impl Aabb {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Box spanning the given sides.
    ///
    /// The stored size is rounded up so that `right()` and `bottom()` read
    /// back no smaller than the sides passed in.
    #[inline]
    pub fn from_sides(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self::new(left, top, covering_span(left, right), covering_span(top, bottom))
    }

    /// Zero-sized box at `p`.
    #[inline]
    pub fn at_point(p: Vector2<f64>) -> Self {
        Self {
            position: p,
            size: Vector2::zeros(),
        }
    }

    /// Tightest box around `points`, or `None` for an empty slice.
    pub fn around(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut l, mut r, mut t, mut b) = (first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            l = l.min(p.x);
            r = r.max(p.x);
            t = t.min(p.y);
            b = b.max(p.y);
        }
        Some(Self::from_sides(l, r, t, b))
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }
    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.size.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.size.y
    }
    #[inline]
    pub fn top_left(&self) -> Vector2<f64> {
        self.position
    }
    #[inline]
    pub fn bottom_right(&self) -> Vector2<f64> {
        self.position + self.size
    }
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }

    /// Inclusive on all four sides.
    #[inline]
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Smallest box covering both `self` and `other`.
    pub fn extended(&self, other: &Aabb) -> Aabb {
        let xs = [self.left(), self.right(), other.left(), other.right()];
        let ys = [self.top(), self.bottom(), other.top(), other.bottom()];
        let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Aabb::from_sides(min_x, max_x, min_y, max_y)
    }

    /// False iff one box lies entirely to one side of the other. Touching counts.
    #[inline]
    pub fn test_overlap(a: &Aabb, b: &Aabb) -> bool {
        !(b.left() > a.right()
            || b.right() < a.left()
            || b.top() > a.bottom()
            || b.bottom() < a.top())
    }

    /// Whether `ray` (open or finite) reaches this box.
    ///
    /// Used as a prune ahead of exact edge tests, so borderline cases answer
    /// `true`. Edge tests run left, right, top, bottom.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        if self.contains_point(origin) {
            return true;
        }
        let end = ray.end();
        let (top, bottom) = (self.top() - RAY_EPS, self.bottom() + RAY_EPS);
        let (left, right) = (self.left() - RAY_EPS, self.right() + RAY_EPS);
        if ray.is_vertical() {
            let (ymin, ymax) = (origin.y.min(end.y), origin.y.max(end.y));
            return origin.x >= left && origin.x <= right && ymin <= bottom && ymax >= top;
        }

        let xmin = origin.x.min(end.x) - RAY_EPS;
        let xmax = origin.x.max(end.x) + RAY_EPS;
        let in_reach = |x: f64| xmin <= x && x <= xmax;

        let y_left = ray.y_at(self.left());
        if y_left >= top && y_left <= bottom && in_reach(self.left()) {
            return true;
        }
        let y_right = ray.y_at(self.right());
        if y_right >= top && y_right <= bottom && in_reach(self.right()) {
            return true;
        }
        let x_top = ray.x_at(self.top());
        if x_top >= left && x_top <= right && in_reach(x_top) {
            return true;
        }
        let x_bottom = ray.x_at(self.bottom());
        x_bottom >= left && x_bottom <= right && in_reach(x_bottom)
    }
}

/// `hi - lo`, bumped by ulps until `lo + span >= hi`.
fn covering_span(lo: f64, hi: f64) -> f64 {
    let mut span = hi - lo;
    if !span.is_finite() || span < 0.0 {
        return span;
    }
    while lo + span < hi {
        span = f64::from_bits(span.to_bits() + 1);
    }
    span
}
