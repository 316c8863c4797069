//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use polysolid::{CSGOps, Polygon, Real, Solid, Vertex};

/// Tolerance used when comparing measured areas and volumes.
pub const MEASURE_EPS: Real = 1e-9;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None)
}

/// Axis-aligned square in the plane `z`, from `(min, min)` to `(max, max)`,
/// wound counter-clockwise seen from +Z.
pub fn square(min: Real, max: Real, z: Real) -> Polygon<()> {
    make_polygon_3d(&[[min, min, z], [max, min, z], [max, max, z], [min, max, z]])
}

/// Box with its minimum corner at `(x, y, z)`.
pub fn cuboid_at(size: [Real; 3], x: Real, y: Real, z: Real) -> Solid<()> {
    Solid::cuboid(size[0], size[1], size[2], None).translate(x, y, z)
}

/// Volume of the overlap of two axis-aligned boxes given as `(min, size)`.
pub fn box_overlap_volume(a: ([Real; 3], [Real; 3]), b: ([Real; 3], [Real; 3])) -> Real {
    (0..3)
        .map(|i| {
            let lo = a.0[i].max(b.0[i]);
            let hi = (a.0[i] + a.1[i]).min(b.0[i] + b.1[i]);
            (hi - lo).max(0.0)
        })
        .product()
}

/// Every polygon normal points away from `center`: the surface is outward oriented.
pub fn faces_point_outward(solid: &Solid<()>, center: Point3<Real>) -> bool {
    solid
        .polygons
        .iter()
        .all(|p| p.plane.normal.dot(&(p.centroid() - center)) > 0.0)
}
