//! Polygon boolean operations by boundary crawling.
//!
//! Both operands are copied into identity-transform rings with a fixed winding.
//! A walker then follows one ring's boundary, casting the rest of the current
//! edge against the other ring. At every junction (crossing, shared vertex or
//! edge end) it collects all continuations on both rings and keeps the one
//! selected by the operation's turning rule:
//!
//! - union: most clockwise turn (outer boundary of the merged shape);
//! - intersect and difference: most counter-clockwise turn.
//!
//! Difference walks the mask in reverse, so "keep left" traces the subject's
//! boundary outside the mask and the mask's boundary inside the subject.
//! Ties prefer the ring being walked; U-turns are never taken.
//!
//! Only one connected component is traced; when pieces of the result remain
//! off the traced ring the operation reports `NonSimpleResult` instead of a
//! partial polygon. The same goes for traced rings that touch themselves.
//! Operands are assumed simple (no self-intersections).
//!
//! Code cross-refs: `polygon::Polygon`, `ray::Ray::polygon_intersections`, `types::GeomCfg`

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;
use tracing::{debug, trace};

use super::polygon::Polygon;
use super::ray::Ray;
use super::types::{GeomCfg, GeometryError, GeometryResult};
use super::util::{segment_distance, signed_area, simplify_ring, touches_itself, turn_angle};

/// Two turn angles closer than this are a tie.
const TURN_TIE_EPS: f64 = 1e-9;

/// Supported boolean operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersect,
    Xor,
}

impl BooleanOp {
    pub const ALL: [BooleanOp; 4] = [Self::Union, Self::Difference, Self::Intersect, Self::Xor];

    pub fn name(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Difference => "difference",
            Self::Intersect => "intersect",
            Self::Xor => "xor",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BooleanOp {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeometryError::invalid(format!("unknown boolean operation `{s}`")))
    }
}

/// A boolean operation between a subject and a mask polygon.
///
/// The operands are borrowed and never modified; `result` returns a new
/// polygon with the identity transform whose vertices are in world space.
#[derive(Clone, Copy, Debug)]
pub struct BooleanOperation<'a> {
    subject: &'a Polygon,
    mask: &'a Polygon,
    op: BooleanOp,
    cfg: GeomCfg,
}

impl<'a> BooleanOperation<'a> {
    pub fn new(subject: &'a Polygon, mask: &'a Polygon, op: BooleanOp) -> Self {
        Self {
            subject,
            mask,
            op,
            cfg: GeomCfg::default(),
        }
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn op(&self) -> BooleanOp {
        self.op
    }

    #[inline]
    pub fn subject(&self) -> &'a Polygon {
        self.subject
    }

    #[inline]
    pub fn mask(&self) -> &'a Polygon {
        self.mask
    }

    /// Run the operation.
    ///
    /// Errors
    /// - `InvalidArgument` for operands with fewer than three distinct vertices
    ///   or zero area.
    /// - `NotImplemented` for `Xor`.
    /// - `DisjointOperands`, `EmptyResult`, `NonSimpleResult` when the result
    ///   is not one simple polygon.
    /// - `CrawlDidNotTerminate` when the walk exceeds `cfg.max_crawl_steps`.
    pub fn result(&self) -> GeometryResult<Polygon> {
        check_operand(self.subject, "subject")?;
        check_operand(self.mask, "mask")?;
        match self.op {
            BooleanOp::Union => self.union(),
            BooleanOp::Intersect => self.intersect(),
            BooleanOp::Difference => self.difference(),
            BooleanOp::Xor => Err(GeometryError::NotImplemented {
                operation: BooleanOp::Xor,
            }),
        }
    }

    fn union(&self) -> GeometryResult<Polygon> {
        let rings = self.rings(Winding::CounterClockwise, Winding::CounterClockwise)?;
        let (side, anchor) = rings.lowest_leftmost();
        // pretend we arrived heading down; the outer boundary leaves the
        // anchor along the most clockwise continuation
        let first = self
            .continuations(&rings, anchor, Vector2::new(0.0, -1.0), side, Turn::Clockwise)
            .ok_or_else(|| GeometryError::non_simple("no outgoing edge at the union anchor"))?;
        let trace = self.crawl(&rings, first, Turn::Clockwise)?;
        if trace.switched {
            return self.finish(&trace.points);
        }
        let container = rings.get(side);
        if self.covers(container, rings.get(side.other())) {
            debug!(op = %self.op, container = ?side, "one operand contains the other");
            self.finish(container.absolute_vertices())
        } else {
            Err(GeometryError::DisjointOperands)
        }
    }

    fn intersect(&self) -> GeometryResult<Polygon> {
        let rings = self.rings(Winding::CounterClockwise, Winding::CounterClockwise)?;
        let start = self
            .find_start(&rings, Side::Subject, Placement::Inside, &[])
            .or_else(|| self.find_start(&rings, Side::Mask, Placement::Inside, &[]));
        let Some(start) = start else {
            if self.boundary_only(&rings, Side::Subject) {
                debug!(op = %self.op, "coincident operands");
                return self.finish(rings.get(Side::Subject).absolute_vertices());
            }
            return Err(GeometryError::EmptyResult { operation: self.op });
        };
        let trace = self.crawl(&rings, start, Turn::CounterClockwise)?;
        self.single_component(&rings, &trace, Placement::Inside, Placement::Inside)?;
        self.finish(&trace.points)
    }

    fn difference(&self) -> GeometryResult<Polygon> {
        let rings = self.rings(Winding::CounterClockwise, Winding::Clockwise)?;
        let start = self
            .find_start(&rings, Side::Subject, Placement::Outside, &[])
            .or_else(|| self.find_start(&rings, Side::Mask, Placement::Inside, &[]));
        let Some(start) = start else {
            return Err(GeometryError::EmptyResult { operation: self.op });
        };
        let trace = self.crawl(&rings, start, Turn::CounterClockwise)?;
        if !trace.switched {
            let subject = rings.get(Side::Subject);
            let mask = rings.get(Side::Mask);
            let hole = start.side == Side::Mask
                || mask
                    .absolute_vertices()
                    .iter()
                    .any(|&p| placement(subject, p, &self.cfg) == Placement::Inside);
            if hole {
                return Err(GeometryError::non_simple(
                    "the mask lies inside the subject and would leave a hole",
                ));
            }
        }
        self.single_component(&rings, &trace, Placement::Outside, Placement::Inside)?;
        self.finish(&trace.points)
    }

    // ----- crawl engine -----

    fn rings(&self, subject: Winding, mask: Winding) -> GeometryResult<Rings> {
        Ok(Rings {
            subject: ring(self.subject, subject, self.cfg.eps_point)?,
            mask: ring(self.mask, mask, self.cfg.eps_point)?,
        })
    }

    /// Walk from `start` until the boundary closes.
    fn crawl(&self, rings: &Rings, start: Heading, turn: Turn) -> GeometryResult<Trace> {
        let tol = self.cfg.eps_point;
        let origin = start.from;
        let mut heading = start;
        let mut points = vec![origin];
        let mut switched = false;
        for step in 0..self.cfg.max_crawl_steps {
            let at = self.next_junction(rings, heading);
            if step > 0 && segment_distance(origin, heading.from, at) <= tol {
                debug!(
                    op = %self.op,
                    steps = step,
                    vertices = points.len(),
                    switched,
                    "crawl closed"
                );
                return Ok(Trace { points, switched });
            }
            trace!(step, x = at.x, y = at.y, side = ?heading.side, edge = heading.edge, "junction");
            points.push(at);
            let incoming = at - heading.from;
            let next = self
                .continuations(rings, at, incoming, heading.side, turn)
                .ok_or_else(|| {
                    GeometryError::non_simple(format!("dead end at ({}, {})", at.x, at.y))
                })?;
            switched |= next.side != heading.side;
            heading = next;
        }
        debug!(op = %self.op, steps = self.cfg.max_crawl_steps, "crawl hit the step cap");
        Err(GeometryError::CrawlDidNotTerminate {
            steps: self.cfg.max_crawl_steps,
        })
    }

    /// Nearest crossing with the other ring strictly ahead of `heading.from`,
    /// else the end of the current edge.
    fn next_junction(&self, rings: &Rings, heading: Heading) -> Vector2<f64> {
        let end = rings.edge_end(heading);
        let tol = self.cfg.eps_point;
        let from = heading.from;
        Ray::from_points(from, end)
            .polygon_intersections(rings.get(heading.side.other()))
            .into_iter()
            .map(|c| c.point)
            .filter(|p| (*p - from).norm() > tol)
            .min_by(|a, b| (*a - from).norm().total_cmp(&(*b - from).norm()))
            .unwrap_or(end)
    }

    /// Best continuation at `at` given the incoming direction.
    fn continuations(
        &self,
        rings: &Rings,
        at: Vector2<f64>,
        incoming: Vector2<f64>,
        current: Side,
        turn: Turn,
    ) -> Option<Heading> {
        let tol = self.cfg.eps_point;
        let mut best: Option<(f64, Heading)> = None;
        for side in [current, current.other()] {
            let verts = rings.get(side).absolute_vertices();
            let n = verts.len();
            for j in 0..n {
                let (a, b) = (verts[j], verts[(j + 1) % n]);
                if segment_distance(at, a, b) > tol {
                    continue;
                }
                let candidate = if (at - b).norm() <= tol {
                    Heading {
                        side,
                        edge: (j + 1) % n,
                        from: b,
                    }
                } else {
                    Heading {
                        side,
                        edge: j,
                        from: at,
                    }
                };
                let dir = rings.edge_end(candidate) - candidate.from;
                if dir.norm() <= tol {
                    continue;
                }
                let theta = turn_angle(incoming, dir);
                if theta.abs() > PI - TURN_TIE_EPS {
                    continue;
                }
                let score = match turn {
                    Turn::Clockwise => -theta,
                    Turn::CounterClockwise => theta,
                };
                if best.map_or(true, |(s, _)| score > s + TURN_TIE_EPS) {
                    best = Some((score, candidate));
                }
            }
        }
        best.map(|(_, h)| h)
    }

    /// Fails when a result piece of either ring is left off the traced ring.
    ///
    /// `subject`/`mask` are the placements that put a piece of that ring on
    /// the result boundary.
    fn single_component(
        &self,
        rings: &Rings,
        trace: &Trace,
        subject: Placement,
        mask: Placement,
    ) -> GeometryResult<()> {
        let missed = self
            .find_start(rings, Side::Subject, subject, &trace.points)
            .or_else(|| self.find_start(rings, Side::Mask, mask, &trace.points));
        match missed {
            Some(h) => {
                debug!(op = %self.op, side = ?h.side, edge = h.edge, "result piece off the traced ring");
                Err(GeometryError::non_simple("result has several components"))
            }
            None => Ok(()),
        }
    }

    /// First edge piece of `side`'s ring (split at crossings with the other
    /// ring) whose midpoint has the wanted placement relative to the other ring
    /// and is not on the closed ring `traced`.
    fn find_start(
        &self,
        rings: &Rings,
        side: Side,
        want: Placement,
        traced: &[Vector2<f64>],
    ) -> Option<Heading> {
        let tol = self.cfg.eps_point;
        let own = rings.get(side);
        let other = rings.get(side.other());
        let verts = own.absolute_vertices();
        let n = verts.len();
        for j in 0..n {
            for (p, q) in pieces(verts[j], verts[(j + 1) % n], other) {
                if (q - p).norm() <= tol {
                    continue;
                }
                let mid = (p + q) / 2.0;
                if placement(other, mid, &self.cfg) == want && !on_ring(traced, mid, tol) {
                    trace!(side = ?side, edge = j, x = mid.x, y = mid.y, "crawl start");
                    return Some(Heading {
                        side,
                        edge: j,
                        from: mid,
                    });
                }
            }
        }
        None
    }

    /// Every edge piece of `side` lies on the other ring's boundary.
    fn boundary_only(&self, rings: &Rings, side: Side) -> bool {
        let own = rings.get(side);
        let other = rings.get(side.other());
        let verts = own.absolute_vertices();
        let n = verts.len();
        (0..n).all(|j| {
            pieces(verts[j], verts[(j + 1) % n], other)
                .into_iter()
                .all(|(p, q)| placement(other, (p + q) / 2.0, &self.cfg) == Placement::Boundary)
        })
    }

    /// All of `inner`'s vertices lie inside or on `outer`.
    fn covers(&self, outer: &Polygon, inner: &Polygon) -> bool {
        inner
            .absolute_vertices()
            .iter()
            .all(|&p| placement(outer, p, &self.cfg) != Placement::Outside)
    }

    /// Clean up a traced ring and give it the subject's winding.
    fn finish(&self, points: &[Vector2<f64>]) -> GeometryResult<Polygon> {
        let mut out = simplify_ring(points, self.cfg.eps_point);
        if out.len() < 3 || signed_area(&out).abs() <= self.cfg.eps_point {
            return Err(GeometryError::EmptyResult { operation: self.op });
        }
        if touches_itself(&out, self.cfg.eps_point) {
            return Err(GeometryError::non_simple("the traced ring touches itself"));
        }
        let subject_ccw = signed_area(self.subject.absolute_vertices()) >= 0.0;
        if (signed_area(&out) >= 0.0) != subject_ccw {
            out.reverse();
        }
        Ok(Polygon::from_vertices(out))
    }
}

/// Shorthand for `BooleanOperation::new(subject, mask, BooleanOp::Union).result()`.
///
/// Operands that only meet at a point (corner to corner) give
/// `NonSimpleResult`: their outline would touch itself there.
pub fn union(subject: &Polygon, mask: &Polygon) -> GeometryResult<Polygon> {
    BooleanOperation::new(subject, mask, BooleanOp::Union).result()
}

pub fn intersect(subject: &Polygon, mask: &Polygon) -> GeometryResult<Polygon> {
    BooleanOperation::new(subject, mask, BooleanOp::Intersect).result()
}

pub fn difference(subject: &Polygon, mask: &Polygon) -> GeometryResult<Polygon> {
    BooleanOperation::new(subject, mask, BooleanOp::Difference).result()
}

/// Always `Err(NotImplemented)`: the symmetric difference of two overlapping
/// shapes is not a single simple polygon.
pub fn xor(subject: &Polygon, mask: &Polygon) -> GeometryResult<Polygon> {
    BooleanOperation::new(subject, mask, BooleanOp::Xor).result()
}

fn check_operand(p: &Polygon, role: &str) -> GeometryResult<()> {
    if p.vertices().len() < 3 {
        return Err(GeometryError::invalid(format!(
            "{role} has {} vertices, need at least 3",
            p.vertices().len()
        )));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Subject,
    Mask,
}

impl Side {
    #[inline]
    fn other(self) -> Self {
        match self {
            Self::Subject => Self::Mask,
            Self::Mask => Self::Subject,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Winding {
    CounterClockwise,
    Clockwise,
}

#[derive(Clone, Copy, Debug)]
enum Turn {
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Inside,
    Outside,
    Boundary,
}

/// Walker state: on edge `edge` of `side`'s ring, starting at `from`.
#[derive(Clone, Copy, Debug)]
struct Heading {
    side: Side,
    edge: usize,
    from: Vector2<f64>,
}

struct Trace {
    points: Vec<Vector2<f64>>,
    switched: bool,
}

struct Rings {
    subject: Polygon,
    mask: Polygon,
}

impl Rings {
    #[inline]
    fn get(&self, side: Side) -> &Polygon {
        match side {
            Side::Subject => &self.subject,
            Side::Mask => &self.mask,
        }
    }

    fn edge_end(&self, h: Heading) -> Vector2<f64> {
        let verts = self.get(h.side).absolute_vertices();
        verts[(h.edge + 1) % verts.len()]
    }

    /// Lowest of the leftmost vertices over both rings, with its ring.
    /// Subject wins exact ties.
    fn lowest_leftmost(&self) -> (Side, Vector2<f64>) {
        let mut best = (Side::Subject, self.subject.absolute_vertices()[0]);
        for side in [Side::Subject, Side::Mask] {
            for &p in self.get(side).absolute_vertices() {
                let (_, q) = best;
                if p.x < q.x || (p.x == q.x && p.y < q.y) {
                    best = (side, p);
                }
            }
        }
        best
    }
}

/// World-space copy of `p` with the requested winding and no repeated or
/// collinear vertices.
fn ring(p: &Polygon, winding: Winding, eps: f64) -> GeometryResult<Polygon> {
    let mut pts = simplify_ring(p.absolute_vertices(), eps);
    if pts.len() < 3 {
        return Err(GeometryError::invalid(
            "operand collapses to fewer than 3 distinct vertices",
        ));
    }
    let area = signed_area(&pts);
    if area == 0.0 {
        return Err(GeometryError::invalid("operand has zero area"));
    }
    let ccw = area > 0.0;
    match winding {
        Winding::CounterClockwise if !ccw => pts.reverse(),
        Winding::Clockwise if ccw => pts.reverse(),
        _ => {}
    }
    Ok(Polygon::from_vertices(pts))
}

/// Split segment `a..b` at its crossings with `other`, in walking order.
fn pieces(
    a: Vector2<f64>,
    b: Vector2<f64>,
    other: &Polygon,
) -> Vec<(Vector2<f64>, Vector2<f64>)> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let mut cuts: Vec<(f64, Vector2<f64>)> = Ray::from_points(a, b)
        .polygon_intersections(other)
        .into_iter()
        .map(|c| ((c.point - a).dot(&ab) / len2, c.point))
        .collect();
    cuts.sort_by(|x, y| x.0.total_cmp(&y.0));
    let mut stops = Vec::with_capacity(cuts.len() + 2);
    stops.push(a);
    stops.extend(cuts.into_iter().map(|(_, p)| p));
    stops.push(b);
    stops.windows(2).map(|w| (w[0], w[1])).collect()
}

/// `p` lies within `tol` of the closed ring through `points`.
fn on_ring(points: &[Vector2<f64>], p: Vector2<f64>, tol: f64) -> bool {
    let n = points.len();
    (0..n).any(|k| segment_distance(p, points[k], points[(k + 1) % n]) <= tol)
}

fn placement(ring: &Polygon, p: Vector2<f64>, cfg: &GeomCfg) -> Placement {
    let verts = ring.absolute_vertices();
    let n = verts.len();
    let on_boundary = (0..n).any(|j| segment_distance(p, verts[j], verts[(j + 1) % n]) <= cfg.eps_point);
    if on_boundary {
        Placement::Boundary
    } else if ring.contains_point_at(p, cfg.probe_angle) {
        Placement::Inside
    } else {
        Placement::Outside
    }
}
