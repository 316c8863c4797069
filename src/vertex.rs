//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::{Real, Tolerance};
use nalgebra::{Point3, Vector3};

/// A vertex of a polygon, holding position and normal.
///
/// The normal is carried for shading by downstream consumers; boolean logic
/// only ever looks at `pos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non‑unit) normal; it will be **copied
    ///   verbatim**.
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, normal }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the barycentric linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Normals are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_normal)
    }

    /// Positions coincide within the geometric tolerance.
    pub fn coincides(&self, other: &Vertex, tolerance: &Tolerance) -> bool {
        approx_eq_point(&self.pos, &other.pos, tolerance)
    }

    /// `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.pos.iter().all(|c| c.is_finite())
    }
}

/// Epsilon equality of two points: the distance between them is below the
/// geometric tolerance.
#[inline]
pub fn approx_eq_point(a: &Point3<Real>, b: &Point3<Real>, tolerance: &Tolerance) -> bool {
    (a - b).norm_squared() < tolerance.squared()
}

/// Hashable key for a position, quantized to the geometric tolerance.
///
/// Two points within the tolerance of each other map to the same key unless
/// they straddle a quantization cell boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(i64, i64, i64);

impl PointKey {
    pub fn new(p: &Point3<Real>, tolerance: &Tolerance) -> Self {
        let scale = 1.0 / tolerance.geometric;
        PointKey(
            (p.x * scale).round() as i64,
            (p.y * scale).round() as i64,
            (p.z * scale).round() as i64,
        )
    }
}
