//! Tolerances and the error type shared by the 2D geometry modules.
//!
//! - Module constants: fixed ray tolerances (vertical detection, parallel
//!   detection, angular leniency, probe angle, open-ray reach).
//! - `GeomCfg`: tolerances for the boolean crawl, passed explicitly.
//! - `GeometryError`: explicit failures for degenerate inputs and crawls.
//!
//! Code cross-refs: `ray::Ray`, `polygon::Polygon`, `boolean::BooleanOperation`

use std::fmt;

use super::boolean::BooleanOp;

/// An angle within this distance of `±π/2` is treated as a vertical ray.
pub const VERTICAL_EPS: f64 = 1e-7;

/// Two directions whose wrapped difference is within this of `0` or `π` are parallel.
pub const PARALLEL_EPS: f64 = 1e-12;

/// Distance slack for "point lies on this segment" checks in ray math.
pub const RAY_EPS: f64 = 1e-9;

/// Default angular leniency (radians) for `Ray::contains_point`.
pub const DEFAULT_LENIENCY: f64 = 0.01;

/// Default probe angle for point-in-polygon tests.
///
/// Anything that is not a multiple of `π/2` works; the small offset keeps the
/// probe from running along axis-aligned edges.
pub const DEFAULT_PROBE_ANGLE: f64 = 0.01;

/// Reach used as the end point of an open (infinite) ray.
pub const OPEN_RAY_REACH: f64 = 999_999.0;

/// Default segment count for `Polygon::circle`.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 12;

/// Boolean-operation configuration (tolerances and the crawl cap).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two points closer than this are the same junction.
    pub eps_point: f64,
    /// Upper bound on junctions visited by one crawl.
    pub max_crawl_steps: usize,
    /// Probe angle used by the crawl's point-in-polygon checks.
    pub probe_angle: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_point: 1e-6,
            max_crawl_steps: 1000,
            probe_angle: DEFAULT_PROBE_ANGLE,
        }
    }
}

/// Failures reported by the geometry modules.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A zero magnitude or zero scale had to be divided by.
    DivideByZero { context: &'static str },
    /// Input that the operation cannot work with (empty sequence, too few vertices).
    InvalidArgument { reason: String },
    /// Declared operation without an algorithm.
    NotImplemented { operation: BooleanOp },
    /// The crawl hit its step cap before closing the loop.
    CrawlDidNotTerminate { steps: usize },
    /// Union of two shapes that neither cross nor contain each other.
    DisjointOperands,
    /// The operation leaves no area.
    EmptyResult { operation: BooleanOp },
    /// The result exists but is not a single simple polygon.
    NonSimpleResult { reason: String },
}

impl GeometryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn non_simple(reason: impl Into<String>) -> Self {
        Self::NonSimpleResult {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivideByZero { context } => write!(f, "division by zero: {context}"),
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::NotImplemented { operation } => {
                write!(f, "boolean operation not implemented: {operation}")
            }
            Self::CrawlDidNotTerminate { steps } => {
                write!(f, "boundary crawl did not close after {steps} steps")
            }
            Self::DisjointOperands => write!(f, "operands neither overlap nor contain each other"),
            Self::EmptyResult { operation } => write!(f, "{operation} leaves an empty result"),
            Self::NonSimpleResult { reason } => write!(f, "result is not a simple polygon: {reason}"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
