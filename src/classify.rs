//! Classification of a polygon against a solid by nearest ray hit
//!
//! A ray is cast from the polygon's centroid along its normal. The nearest
//! polygon of the other solid that the ray hits decides the label: whether
//! the hit lies on the polygon's own plane or in front of it, and whether
//! the hit polygon faces the same way or the opposite way.
//!
//! | hit side  | facing   | result     |
//! |-----------|----------|------------|
//! | on plane  | same     | `Same`     |
//! | on plane  | opposite | `Opposite` |
//! | in front  | same     | `Inside`   |
//! | in front  | opposite | `Outside`  |
//!
//! Anything else is `Unknown`. No hit at all means `Outside`.

use crate::float_types::{
    Real, Tolerance,
    parry3d::{
        bounding_volume::{Aabb, BoundingVolume},
        query::RayCast,
    },
};
use crate::intersect::{PlaneIntersection, Ray};
use crate::plane::Side;
use crate::polygon::Polygon;
use nalgebra::Point3;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use tracing::warn;

/// Label of a polygon relative to a reference solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Inside,
    Outside,
    /// Coincident with a boundary polygon facing the same way
    Same,
    /// Coincident with a boundary polygon facing the other way
    Opposite,
    /// The hit did not match any row of the table
    Unknown,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Inside => "inside",
            Classification::Outside => "outside",
            Classification::Same => "same",
            Classification::Opposite => "opposite",
            Classification::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Where the nearest hit lies relative to the classified polygon's plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSide {
    OnPlane,
    InFront,
}

/// Orientation of the hit polygon relative to the classified polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Same,
    Opposite,
}

/// The classification table. `None` stands for a test that could not be
/// decided within tolerance.
pub const fn resolve(side: Option<HitSide>, facing: Option<Facing>) -> Classification {
    match (side, facing) {
        (Some(HitSide::OnPlane), Some(Facing::Same)) => Classification::Same,
        (Some(HitSide::OnPlane), Some(Facing::Opposite)) => Classification::Opposite,
        (Some(HitSide::InFront), Some(Facing::Same)) => Classification::Inside,
        (Some(HitSide::InFront), Some(Facing::Opposite)) => Classification::Outside,
        _ => Classification::Unknown,
    }
}

/// A surviving ray hit on one of the candidate polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the hit polygon in the candidate slice
    pub index: usize,
    pub point: Point3<Real>,
    /// Distance from the ray origin to `point`
    pub distance: Real,
    /// Distance from the ray origin to the hit polygon's centroid, used to
    /// break ties between hits at the same distance
    pub centroid_distance: Real,
    pub side: HitSide,
}

/// Nearest valid hit of the ray cast from `polygon`'s centroid along its
/// normal against `candidates`.
pub fn nearest_hit<S, T>(
    polygon: &Polygon<S>,
    candidates: &[Polygon<T>],
    tolerance: &Tolerance,
) -> Option<RayHit>
where
    S: Clone + Send + Sync + Debug,
    T: Clone + Send + Sync + Debug,
{
    let origin = polygon.centroid();
    let dir = polygon.plane.normal;
    let ray = Ray::new(origin, dir);

    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| {
            candidate
                .bounding_box()
                .loosened(tolerance.geometric)
                .intersects_local_ray(&ray, Real::MAX)
        })
        .filter_map(|(index, candidate)| {
            let PlaneIntersection::NonParallel { point, .. } =
                candidate.plane.intersect_ray(&ray, tolerance)
            else {
                return None;
            };
            if !candidate.contains_point(&point, tolerance) {
                return None;
            }

            let side = match polygon.plane.classify(&point, tolerance) {
                Side::Back => return None,
                Side::On => {
                    // touching hits only count when the candidate faces along the ray axis
                    if 1.0 - candidate.plane.normal.dot(&dir).abs() > tolerance.geometric {
                        return None;
                    }
                    HitSide::OnPlane
                },
                Side::Front => HitSide::InFront,
            };

            Some(RayHit {
                index,
                point,
                distance: (point - origin).norm(),
                centroid_distance: (candidate.centroid() - origin).norm(),
                side,
            })
        })
        .min_by(|a, b| compare_hits(a, b, tolerance))
}

fn compare_hits(a: &RayHit, b: &RayHit, tolerance: &Tolerance) -> Ordering {
    if (a.distance - b.distance).abs() < tolerance.geometric {
        a.centroid_distance.total_cmp(&b.centroid_distance)
    } else {
        a.distance.total_cmp(&b.distance)
    }
}

/// Classify `polygon` against a solid given as its polygons and bounds.
pub fn classify_polygon<S, T>(
    polygon: &Polygon<S>,
    solid: &[Polygon<T>],
    solid_bounds: &Aabb,
    tolerance: &Tolerance,
) -> Classification
where
    S: Clone + Send + Sync + Debug,
    T: Clone + Send + Sync + Debug,
{
    if !polygon
        .bounding_box()
        .loosened(tolerance.geometric)
        .intersects(solid_bounds)
    {
        return Classification::Outside;
    }

    let Some(hit) = nearest_hit(polygon, solid, tolerance) else {
        return Classification::Outside;
    };

    let dot = solid[hit.index].plane.normal.dot(&polygon.plane.normal);
    let facing = if dot > tolerance.geometric {
        Some(Facing::Same)
    } else if dot < -tolerance.geometric {
        Some(Facing::Opposite)
    } else {
        None
    };

    let classification = resolve(Some(hit.side), facing);
    if classification == Classification::Unknown {
        warn!(
            centroid = ?polygon.centroid(),
            hit = ?hit.point,
            dot,
            "polygon classification is ambiguous"
        );
    }
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows() {
        use Classification::*;
        assert_eq!(resolve(Some(HitSide::OnPlane), Some(Facing::Same)), Same);
        assert_eq!(resolve(Some(HitSide::OnPlane), Some(Facing::Opposite)), Opposite);
        assert_eq!(resolve(Some(HitSide::InFront), Some(Facing::Same)), Inside);
        assert_eq!(resolve(Some(HitSide::InFront), Some(Facing::Opposite)), Outside);
        assert_eq!(resolve(Some(HitSide::InFront), None), Unknown);
        assert_eq!(resolve(None, Some(Facing::Same)), Unknown);
    }
}
