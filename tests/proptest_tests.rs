//! Property-based tests for boolean and predicate invariants using the `proptest` crate.

mod support;

use nalgebra::{Point3, Vector3};
use polysolid::intersect::{Edge, EdgeIntersection};
use polysolid::plane::Side;
use polysolid::{CSGOps, Plane, Tolerance, Vertex};
use proptest::prelude::*;
use support::{box_overlap_volume, cuboid_at, square};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Box extents that stay well above the tolerance.
fn arb_size() -> impl Strategy<Value = [f64; 3]> {
    (0.5f64..2.0, 0.5f64..2.0, 0.5f64..2.0).prop_map(|(x, y, z)| [x, y, z])
}

/// Offset of the second box relative to the first.
fn arb_offset() -> impl Strategy<Value = [f64; 3]> {
    (-1.5f64..1.5, -1.5f64..1.5, -1.5f64..1.5).prop_map(|(x, y, z)| [x, y, z])
}

/// Non-degenerate direction.
fn arb_normal() -> impl Strategy<Value = Vector3<f64>> {
    (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
        .prop_filter("normal must not vanish", |n| n.norm() > 0.1)
}

const VOLUME_TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. Points built on a plane classify ON, and pushed off it FRONT / BACK
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn plane_point_round_trip(
        normal in arb_normal(),
        w in -10.0f64..10.0,
        (u, v) in (-5.0f64..5.0, -5.0f64..5.0),
    ) {
        let tol = Tolerance::default();
        let plane = Plane::from_normal(normal, w);
        let n = plane.normal();
        let tangent = n.cross(&Vector3::x()).try_normalize(1e-3)
            .unwrap_or_else(|| n.cross(&Vector3::y()).normalize());
        let bitangent = n.cross(&tangent);
        let p = plane.anchor() + tangent * u + bitangent * v;

        prop_assert_eq!(plane.classify(&p, &tol), Side::On);
        prop_assert_eq!(plane.classify(&(p + n * 10.0 * tol.geometric), &tol), Side::Front);
        prop_assert_eq!(plane.classify(&(p - n * 10.0 * tol.geometric), &tol), Side::Back);
    }
}

// ---------------------------------------------------------------------------
// 2. Splitting never creates or loses area
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn split_preserves_area(normal in arb_normal(), w in -1.0f64..1.0) {
        let tol = Tolerance::default();
        let poly = square(-1.0, 1.0, 0.0);
        let plane = Plane::from_normal(normal, w);

        let total: f64 = plane
            .split_polygon(&poly, &tol)
            .into_polygons()
            .iter()
            .map(|p| p.area())
            .sum();
        // dropped slivers may take a negligible amount of area
        prop_assert!((total - poly.area()).abs() < 1e-6, "area {} != 4", total);
    }
}

// ---------------------------------------------------------------------------
// 3. Boolean volumes of overlapping boxes match the analytic overlap
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn box_boolean_volumes(
        size_a in arb_size(),
        size_b in arb_size(),
        offset in arb_offset(),
    ) {
        let a = cuboid_at(size_a, 0.0, 0.0, 0.0);
        let b = cuboid_at(size_b, offset[0], offset[1], offset[2]);

        let va = size_a.iter().product::<f64>();
        let vb = size_b.iter().product::<f64>();
        let overlap = box_overlap_volume(([0.0; 3], size_a), (offset, size_b));

        let inter = a.intersection(&b).volume();
        prop_assert!((inter - overlap).abs() < VOLUME_TOL,
            "intersection {} != {}", inter, overlap);

        let union = a.union(&b).volume();
        prop_assert!((union - (va + vb - overlap)).abs() < VOLUME_TOL,
            "union {} != {}", union, va + vb - overlap);

        let diff = a.difference(&b).volume();
        prop_assert!((diff - (va - overlap)).abs() < VOLUME_TOL,
            "difference {} != {}", diff, va - overlap);
    }
}

// ---------------------------------------------------------------------------
// 4. Translation never changes volume
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn translation_preserves_volume(size in arb_size(), offset in arb_offset()) {
        let a = cuboid_at(size, offset[0], offset[1], offset[2]);
        let expected = size.iter().product::<f64>();
        prop_assert!((a.volume() - expected).abs() < 1e-9);
        let bb = a.bounding_box();
        prop_assert!((bb.mins - Point3::new(offset[0], offset[1], offset[2])).norm() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// 5. Segments crossing at their midpoints intersect there, in either order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn crossing_segments_meet_at_midpoint(
        (cx, cy, cz) in (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0),
        d1 in arb_normal(),
        d2 in arb_normal(),
    ) {
        prop_assume!(d1.normalize().cross(&d2.normalize()).norm() > 0.1);
        let tol = Tolerance::default();
        let c = Point3::new(cx, cy, cz);
        let seg = |d: Vector3<f64>| {
            Edge::new(
                Vertex::new(c - d, Vector3::z()),
                Vertex::new(c + d, Vector3::z()),
            )
        };
        let (a, b) = (seg(d1), seg(d2));

        for hit in [a.intersect(&b, &tol), b.intersect(&a, &tol)] {
            match hit {
                EdgeIntersection::Intersecting { point, s, t } => {
                    prop_assert!((point - c).norm() < 1e-9);
                    prop_assert!((s - 0.5).abs() < 1e-9 && (t - 0.5).abs() < 1e-9);
                },
                other => prop_assert!(false, "expected intersection, got {:?}", other),
            }
        }
    }
}
