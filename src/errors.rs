//! Validation and usage errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Problems found in raw polygon data handed to the engine.
///
/// None of these ever escape a boolean operation: fragments produced while
/// splitting that fail validation are dropped instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (RepeatedPoint) Two consecutive coords are identical
    #[error("(RepeatedPoint) Two consecutive coords are identical at: {0}")]
    RepeatedPoint(Point3<Real>),
    /// (TooFewPoints) A polygon has fewer than three distinct points
    #[error("(TooFewPoints) A polygon has fewer than 3 distinct points, first at: {0}")]
    TooFewPoints(Point3<Real>),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// (Degenerate) All points are collinear or the polygon has no area
    #[error("(Degenerate) Polygon has no area at: {0}")]
    Degenerate(Point3<Real>),
    /// A polygon was built without any vertex at all
    #[error("(Empty) Polygon has no vertices")]
    Empty,
    /// A face references a point that does not exist
    #[error("Face index {index} is out of range (points.len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Invalid use of the public API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BooleanError {
    /// Tolerances must be finite and strictly positive
    #[error("tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(Real),
    /// The split epsilon must not be looser than the geometric tolerance
    #[error("split epsilon {split} exceeds geometric tolerance {geometric}")]
    SplitExceedsGeometric { split: Real, geometric: Real },
    /// Unrecognised operation name
    #[error("unknown boolean operation `{0}` (expected union, difference or intersection)")]
    UnknownOperation(String),
}
