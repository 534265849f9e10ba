//! Vector algebra on `nalgebra::Vector2<f64>`.
//!
//! Addition, subtraction and scalar multiplication are nalgebra's operators;
//! this module adds the polar helpers and the tolerant comparisons the ray and
//! polygon code is written in terms of. Every operation returns a new vector.

use nalgebra::Vector2;

use super::types::{GeometryError, GeometryResult};

/// Polar and tolerance helpers for 2D vectors.
pub trait Vec2Ext: Sized {
    /// Vector pointing at `angle` with the given magnitude.
    fn from_angle(angle: f64, magnitude: f64) -> Self;
    /// Same direction, given magnitude. Zero vectors have no direction.
    fn scaled_to(&self, magnitude: f64) -> GeometryResult<Self>;
    /// Shorthand for `scaled_to(1.0)`.
    fn unit(&self) -> GeometryResult<Self> {
        self.scaled_to(1.0)
    }
    fn inverted(&self) -> Self;
    fn distance_to(&self, other: &Self) -> f64;
    /// `atan2(y, x)`.
    fn direction(&self) -> f64;
    /// Direction of the vector from `self` to `other`.
    fn direction_to(&self, other: &Self) -> f64;
    /// Per-component `|Δ| <= leniency`.
    fn approx_eq(&self, other: &Self, leniency: f64) -> bool;
}

impl Vec2Ext for Vector2<f64> {
    #[inline]
    fn from_angle(angle: f64, magnitude: f64) -> Self {
        Vector2::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    fn scaled_to(&self, magnitude: f64) -> GeometryResult<Self> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(GeometryError::DivideByZero {
                context: "cannot rescale a zero-length vector",
            });
        }
        Ok(*self * (magnitude / norm))
    }

    #[inline]
    fn inverted(&self) -> Self {
        -*self
    }

    #[inline]
    fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    #[inline]
    fn direction(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn direction_to(&self, other: &Self) -> f64 {
        (*other - *self).direction()
    }

    #[inline]
    fn approx_eq(&self, other: &Self, leniency: f64) -> bool {
        (self.x - other.x).abs() <= leniency && (self.y - other.y).abs() <= leniency
    }
}

/// Arithmetic mean of a point sequence. Empty input has no mean.
pub fn average(points: &[Vector2<f64>]) -> GeometryResult<Vector2<f64>> {
    if points.is_empty() {
        return Err(GeometryError::invalid("average of an empty point sequence"));
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    Ok(sum / points.len() as f64)
}
