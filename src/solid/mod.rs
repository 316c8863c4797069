//! `Solid` struct and implementations of the `CSGOps` trait for `Solid`

use crate::boolean::{BooleanKind, boolean_op};
use crate::classify::{Classification, classify_polygon};
use crate::float_types::{
    Real, Tolerance,
    parry3d::bounding_volume::Aabb,
};
use crate::holes::{Boundary, resolve_holes};
use crate::polygon::Polygon;
use crate::traits::CSGOps;
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3, Vector3};
use std::{fmt::Debug, sync::OnceLock};
use tracing::{debug, warn};

#[cfg(feature = "hashmap")]
pub mod manifold;
pub mod shapes;

/// A closed (ideally) surface made of planar polygons.
///
/// Nothing enforces watertightness: open or slightly non-manifold input is
/// accepted and processed on a best-effort basis.
#[derive(Clone, Debug)]
pub struct Solid<S: Clone + Send + Sync + Debug> {
    /// Boundary polygons, unordered
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Build a Solid from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        Solid {
            polygons: polygons.to_vec(),
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Build a Solid from raw vertex loops supplied by a collaborator.
    ///
    /// Loops that do not form a valid polygon are dropped with a debug log
    /// instead of failing the whole solid.
    pub fn from_vertex_lists(
        loops: Vec<Vec<Vertex>>,
        metadata: Option<S>,
        tolerance: &Tolerance,
    ) -> Self {
        let total = loops.len();
        let polygons: Vec<Polygon<S>> = loops
            .into_iter()
            .filter_map(|vertices| {
                Polygon::try_new(vertices, metadata.clone(), tolerance)
                    .map_err(|err| debug!(%err, "dropping invalid input polygon"))
                    .ok()
            })
            .collect();
        if polygons.len() != total {
            debug!(kept = polygons.len(), total, "input polygons dropped");
        }
        Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Ordered `(positions, normals)` lists, one entry per polygon, for
    /// export and triangulation consumers.
    pub fn to_polygon_data(&self) -> Vec<(Vec<Point3<Real>>, Vec<Vector3<Real>>)> {
        self.polygons
            .iter()
            .map(Polygon::to_position_normal_lists)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the Solid.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Total area of all polygons.
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Enclosed volume by the divergence theorem over a fan of each polygon.
    /// Meaningful for closed, outward-oriented surfaces.
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .map(|poly| {
                let Some(first) = poly.vertices.first() else {
                    return 0.0;
                };
                let a = first.pos.coords;
                poly.vertices[1..]
                    .windows(2)
                    .map(|pair| a.dot(&pair[0].pos.coords.cross(&pair[1].pos.coords)))
                    .sum::<Real>()
            })
            .sum::<Real>()
            / 6.0
    }

    /// Classify a polygon against this solid.
    pub fn classify<T: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<T>,
        tolerance: &Tolerance,
    ) -> Classification {
        classify_polygon(polygon, &self.polygons, &self.bounding_box(), tolerance)
    }

    /// Polygons with their hole metadata attached.
    pub fn boundaries(&self, tolerance: &Tolerance) -> Vec<Boundary<S>> {
        resolve_holes(&self.polygons, tolerance)
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Solid<S> {
    fn default() -> Self {
        <Self as CSGOps>::new()
    }
}

impl<S: Clone + Send + Sync + Debug> CSGOps for Solid<S> {
    /// Returns a new empty Solid
    fn new() -> Self {
        Solid {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Return a new Solid representing union of the two Solids.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Solid<S>) -> Solid<S> {
        boolean_op(BooleanKind::Union, self, other, &Tolerance::default()).solid
    }

    /// Return a new Solid representing difference of the two Solids.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Solid<S>) -> Solid<S> {
        boolean_op(BooleanKind::Difference, self, other, &Tolerance::default()).solid
    }

    /// Return a new Solid representing intersection of the two Solids.
    ///
    /// ```text
    /// let c = a.intersection(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Solid<S>) -> Solid<S> {
        boolean_op(BooleanKind::Intersection, self, other, &Tolerance::default()).solid
    }

    /// Space in either solid but not in both: `(a − b) ∪ (b − a)`.
    fn xor(&self, other: &Solid<S>) -> Solid<S> {
        let a_sub_b = self.difference(other);
        let b_sub_a = other.difference(self);
        a_sub_b.union(&b_sub_a)
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the solid.
    fn transform(&self, mat: &Matrix4<Real>) -> Solid<S> {
        let normal_matrix = match mat.try_inverse() {
            Some(inv) => inv.transpose(),
            None => {
                warn!("transform matrix is singular, normals left untransformed");
                Matrix4::identity()
            },
        };

        let polygons = self
            .polygons
            .iter()
            .map(|poly| {
                let vertices = poly
                    .vertices
                    .iter()
                    .map(|v| {
                        let normal = normal_matrix.transform_vector(&v.normal);
                        let normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
                        Vertex::new(mat.transform_point(&v.pos), normal)
                    })
                    .collect();
                // re-derive the plane from the moved vertices
                Polygon::new(vertices, poly.metadata.clone())
            })
            .collect::<Vec<_>>();

        Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`](Aabb) indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.polygons.is_empty() {
                // trivial AABB at origin
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for poly in &self.polygons {
                let bb = poly.bounding_box();
                mins = mins.inf(&bb.mins);
                maxs = maxs.sup(&bb.maxs);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Solid (flip inside vs. outside)
    fn inverse(&self) -> Solid<S> {
        let mut solid = self.clone();
        for p in &mut solid.polygons {
            p.flip();
        }
        solid
    }
}
