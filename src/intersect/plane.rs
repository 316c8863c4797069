//! Ray and segment intersection against a plane

use crate::float_types::{Real, Tolerance};
use crate::intersect::Ray;
use crate::plane::Plane;
use nalgebra::Point3;

/// Result of intersecting a ray (or its supporting line) with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneIntersection {
    /// The ray is parallel to the plane and off it.
    Parallel,
    /// The ray is parallel to the plane and embedded in it; `point` is the
    /// ray origin.
    On { point: Point3<Real> },
    /// The line crosses the plane at `origin + t * dir`. `t` may be negative:
    /// the caller decides whether points behind the origin count.
    NonParallel { point: Point3<Real>, t: Real },
}

impl PlaneIntersection {
    /// The intersection point, if any.
    pub fn point(&self) -> Option<Point3<Real>> {
        match *self {
            PlaneIntersection::Parallel => None,
            PlaneIntersection::On { point } | PlaneIntersection::NonParallel { point, .. } => {
                Some(point)
            },
        }
    }
}

impl Plane {
    /// Intersect the supporting line of `ray` with this plane.
    ///
    /// With `d = -n·anchor`, the crossing parameter is
    /// `t = -(n·origin + d) / (n·dir)`. The direction does not need to be
    /// normalized; `t` is expressed in units of `dir`.
    pub fn intersect_ray(&self, ray: &Ray, tolerance: &Tolerance) -> PlaneIntersection {
        let denom = self.normal.dot(&ray.dir);
        let dir_len = ray.dir.norm();
        if denom.abs() < tolerance.geometric * dir_len.max(1.0) {
            return if self.signed_distance(&ray.origin).abs() < tolerance.geometric {
                PlaneIntersection::On { point: ray.origin }
            } else {
                PlaneIntersection::Parallel
            };
        }

        let d = -self.w;
        let t = -(self.normal.dot(&ray.origin.coords) + d) / denom;
        PlaneIntersection::NonParallel {
            point: ray.origin + ray.dir * t,
            t,
        }
    }

    /// Intersect the segment `a → b` with this plane. Only crossings with
    /// `t ∈ [0, 1]` are reported as `NonParallel`.
    pub fn intersect_segment(
        &self,
        a: &Point3<Real>,
        b: &Point3<Real>,
        tolerance: &Tolerance,
    ) -> PlaneIntersection {
        let ray = Ray::new(*a, b - a);
        match self.intersect_ray(&ray, tolerance) {
            PlaneIntersection::NonParallel { t, .. } if !(0.0..=1.0).contains(&t) => {
                PlaneIntersection::Parallel
            },
            hit => hit,
        }
    }
}
