//! Struct and functions for working with planar `Polygon`s without holes

use crate::errors::ValidationError;
use crate::float_types::{
    Real, Tolerance,
    parry3d::bounding_volume::Aabb,
};
use crate::intersect::Edge;
use crate::plane::{Plane, newell_normal};
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::sync::OnceLock;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape, in winding order
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting and classification
    pub plane: Plane,

    /// Lazily‑computed axis‑aligned bounding box of the Polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

/// Where a point lies relative to a polygon's outline, assuming it is on the
/// polygon's plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Boundary,
    Outside,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from vertices, deriving its plane from the Newell
    /// normal of the outline through the first vertex.
    ///
    /// No validation is performed and no tolerance is involved; use
    /// [`Polygon::try_new`] for data coming from outside the engine.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = outline_plane(&vertices);
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Create a polygon with an already known plane.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Create a validated polygon.
    ///
    /// Consecutive coincident vertices (including last/first) are collapsed
    /// first. The result must keep at least three vertices, span a plane and
    /// enclose more than a sliver of area.
    ///
    /// ## Errors
    /// [`ValidationError::Empty`], [`ValidationError::InvalidCoordinate`],
    /// [`ValidationError::TooFewPoints`] or [`ValidationError::Degenerate`].
    pub fn try_new(
        vertices: Vec<Vertex>,
        metadata: Option<S>,
        tolerance: &Tolerance,
    ) -> Result<Self, ValidationError> {
        let first = vertices.first().ok_or(ValidationError::Empty)?.pos;
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }

        let vertices = dedup_cyclic(vertices, tolerance);
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints(first));
        }

        let plane =
            Plane::from_vertices(&vertices, tolerance).ok_or(ValidationError::Degenerate(first))?;
        let polygon = Polygon::with_plane(vertices, plane, metadata);
        if polygon.is_sliver(tolerance) {
            return Err(ValidationError::Degenerate(first));
        }
        Ok(polygon)
    }

    /// Check the stored outline without modifying it.
    ///
    /// ## Errors
    /// The first problem found, in the order: too few points, non-finite
    /// coordinate, repeated consecutive point, zero area.
    pub fn validate(&self, tolerance: &Tolerance) -> Result<(), ValidationError> {
        let Some(first) = self.vertices.first() else {
            return Err(ValidationError::Empty);
        };
        if self.vertices.len() < 3 {
            return Err(ValidationError::TooFewPoints(first.pos));
        }
        if let Some(bad) = self.vertices.iter().find(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }
        if let Some(edge) = self.edges().find(|e| e.start.coincides(&e.end, tolerance)) {
            return Err(ValidationError::RepeatedPoint(edge.start.pos));
        }
        if self.is_sliver(tolerance) {
            return Err(ValidationError::Degenerate(first.pos));
        }
        Ok(())
    }

    /// Axis aligned bounding box of this Polygon (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Unit normal of the polygon's plane.
    pub const fn normal(&self) -> Vector3<Real> {
        self.plane.normal
    }

    /// Iterate over the edges of the closed outline.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(a, b)| Edge::new(*a, *b))
    }

    /// Unsigned area of the outline.
    pub fn area(&self) -> Real {
        0.5 * newell_normal(&self.vertices).dot(&self.plane.normal).abs()
    }

    /// Area-weighted centroid; falls back to the vertex average for
    /// outlines without area.
    pub fn centroid(&self) -> Point3<Real> {
        let n = self.vertices.len();
        if n == 0 {
            return Point3::origin();
        }
        let average = Point3::from(
            self.vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
                / n as Real,
        );

        let origin = self.vertices[0].pos;
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;
        for pair in self.vertices[1..].windows(2) {
            let (b, c) = (pair[0].pos, pair[1].pos);
            let area = (b - origin).cross(&(c - origin)).dot(&self.plane.normal);
            weighted += (origin.coords + b.coords + c.coords) * (area / 3.0);
            total += area;
        }

        if total.abs() <= Real::EPSILON {
            average
        } else {
            Point3::from(weighted / total)
        }
    }

    /// `true` when the polygon is thinner than the geometric tolerance:
    /// its area is negligible relative to its extent.
    pub fn is_sliver(&self, tolerance: &Tolerance) -> bool {
        let bb = self.bounding_box();
        let diagonal = (bb.maxs - bb.mins).norm();
        self.area() <= tolerance.geometric * diagonal
    }

    /// Reverses winding order, flips vertex normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Flipped copy of this polygon.
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }

    /// Locate a point lying on this polygon's plane against its outline.
    ///
    /// Points within the geometric tolerance of an edge are on the
    /// boundary; otherwise a crossing-number test runs in the projection
    /// that drops the plane's dominant axis.
    pub fn locate_point(&self, point: &Point3<Real>, tolerance: &Tolerance) -> PointLocation {
        if self
            .edges()
            .any(|e| distance_to_segment(point, &e.start.pos, &e.end.pos) < tolerance.geometric)
        {
            return PointLocation::Boundary;
        }

        let (u, v) = projection_axes(self.plane.dominant_axis());
        let (px, py) = (point[u], point[v]);
        let mut inside = false;
        for edge in self.edges() {
            let (ax, ay) = (edge.start.pos[u], edge.start.pos[v]);
            let (bx, by) = (edge.end.pos[u], edge.end.pos[v]);
            if (ay > py) != (by > py) {
                let x_cross = (bx - ax) * (py - ay) / (by - ay) + ax;
                if px < x_cross {
                    inside = !inside;
                }
            }
        }

        if inside {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    /// `true` if the point is inside the outline or on its boundary.
    pub fn contains_point(&self, point: &Point3<Real>, tolerance: &Tolerance) -> bool {
        self.locate_point(point, tolerance) != PointLocation::Outside
    }

    /// Positions and normals in winding order.
    pub fn to_position_normal_lists(&self) -> (Vec<Point3<Real>>, Vec<Vector3<Real>>) {
        self.vertices.iter().map(|v| (v.pos, v.normal)).unzip()
    }

    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}

/// The two coordinate axes kept when dropping `axis`.
const fn projection_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Euclidean distance from `p` to the segment `a → b`.
pub fn distance_to_segment(p: &Point3<Real>, a: &Point3<Real>, b: &Point3<Real>) -> Real {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Drop vertices that coincide with their predecessor, including the
/// closing pair last → first.
fn dedup_cyclic(vertices: Vec<Vertex>, tolerance: &Tolerance) -> Vec<Vertex> {
    let mut out: Vec<Vertex> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if out.last().is_some_and(|last| last.coincides(&v, tolerance)) {
            continue;
        }
        out.push(v);
    }
    while out.len() > 1 && out[0].coincides(&out[out.len() - 1], tolerance) {
        out.pop();
    }
    out
}

/// Plane through the first vertex along the Newell normal, or +Z when the
/// outline encloses no area.
fn outline_plane(vertices: &[Vertex]) -> Plane {
    let normal = newell_normal(vertices);
    let anchor = vertices.first().map_or(Point3::origin(), |v| v.pos);
    if normal.norm_squared() > 0.0 {
        Plane::from_anchor(anchor, normal)
    } else {
        Plane::from_anchor(anchor, Vector3::z())
    }
}
