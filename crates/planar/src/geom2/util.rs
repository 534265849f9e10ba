use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(a: f64) -> f64 {
    let x = (a + PI).rem_euclid(TAU) - PI;
    if x <= -PI {
        x + TAU
    } else {
        x
    }
}

/// Signed difference `a - b`, wrapped into `(-π, π]`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    wrap_angle(a - b)
}

/// z-component of `a × b`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed turn from direction `from` to direction `to`, in `(-π, π]`.
/// Positive is counter-clockwise.
#[inline]
pub fn turn_angle(from: Vector2<f64>, to: Vector2<f64>) -> f64 {
    cross(from, to).atan2(from.dot(&to))
}

/// Shoelace area; positive for counter-clockwise winding (y up).
pub fn signed_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += cross(points[i], points[j]);
    }
    area / 2.0
}

/// Distance from `p` to the closed segment `a..b`.
pub fn segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Drop repeated points (including the wrap-around pair) and points lying on
/// the straight line between their neighbours.
pub fn simplify_ring(points: &[Vector2<f64>], eps: f64) -> Vec<Vector2<f64>> {
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map_or(true, |q| (p - q).norm() > eps) {
            out.push(p);
        }
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= eps {
        out.pop();
    }
    // collinear sweep; repeat until stable since removals expose new triples
    let mut changed = true;
    while changed && out.len() > 3 {
        changed = false;
        let n = out.len();
        for i in 0..n {
            let prev = out[(i + n - 1) % n];
            let next = out[(i + 1) % n];
            if segment_distance(out[i], prev, next) <= eps {
                out.remove(i);
                changed = true;
                break;
            }
        }
    }
    out
}

/// Whether some vertex of the closed ring lies within `eps` of an edge it is
/// not an endpoint of (a pinch or a touching corner).
pub fn touches_itself(points: &[Vector2<f64>], eps: f64) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    (0..n).any(|i| {
        (0..n)
            .filter(|&j| j != i && (j + 1) % n != i)
            .any(|j| segment_distance(points[i], points[j], points[(j + 1) % n]) <= eps)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn wrap_angle_lands_in_half_open_range() {
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(4.0) - (4.0 - TAU)).abs() < 1e-12);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(7.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn turn_angle_sign() {
        let east = vector![1.0, 0.0];
        assert!((turn_angle(east, vector![0.0, 1.0]) - PI / 2.0).abs() < 1e-12);
        assert!((turn_angle(east, vector![0.0, -1.0]) + PI / 2.0).abs() < 1e-12);
        assert!(turn_angle(east, vector![2.0, 0.0]).abs() < 1e-12);
    }

    #[test]
    fn signed_area_winding() {
        let ccw = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        assert!((signed_area(&ccw) - 100.0).abs() < 1e-12);
        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&cw) + 100.0).abs() < 1e-12);
        assert_eq!(signed_area(&ccw[..2]), 0.0);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = vector![0.0, 0.0];
        let b = vector![10.0, 0.0];
        assert!((segment_distance(vector![5.0, 3.0], a, b) - 3.0).abs() < 1e-12);
        assert!((segment_distance(vector![13.0, 4.0], a, b) - 5.0).abs() < 1e-12);
        assert!((segment_distance(vector![1.0, 1.0], a, a) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn simplify_drops_duplicates_and_collinear_points() {
        let ring = [
            vector![0.0, 0.0],
            vector![5.0, 0.0],
            vector![5.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
            vector![0.0, 0.0],
        ];
        let out = simplify_ring(&ring, 1e-9);
        assert_eq!(out.len(), 4);
        assert!((signed_area(&out) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn touching_corners_are_detected() {
        let square = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        assert!(!touches_itself(&square, 1e-9));
        // two squares meeting at (10, 10), traced as one ring
        let bow = [
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![20.0, 10.0],
            vector![20.0, 20.0],
            vector![10.0, 20.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ];
        assert!(touches_itself(&bow, 1e-9));
    }
}
