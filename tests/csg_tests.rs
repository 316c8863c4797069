mod support;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use polysolid::{
    BooleanKind, CSGOps, Plane, Solid, Tolerance, boolean_op, float_types::Real,
};
use support::{MEASURE_EPS, approx_eq, cuboid_at, faces_point_outward};

/// Two 2-unit cubes overlapping in a unit cube at `[1, 2]^3`.
fn overlapping_cubes() -> (Solid<()>, Solid<()>) {
    let a = Solid::cube(2.0, None);
    let b = Solid::cube(2.0, None).translate(1.0, 1.0, 1.0);
    (a, b)
}

// --------------------------------------------------------
//   Primitives
// --------------------------------------------------------

#[test]
fn cube_measurements() {
    let cube: Solid<()> = Solid::cube(2.0, None);
    assert_eq!(cube.polygons.len(), 6);
    assert!(approx_eq(cube.volume(), 8.0, MEASURE_EPS));
    assert!(approx_eq(cube.surface_area(), 24.0, MEASURE_EPS));
    assert!(faces_point_outward(&cube, Point3::new(1.0, 1.0, 1.0)));

    let bb = cube.bounding_box();
    assert_eq!(bb.mins, Point3::origin());
    assert_eq!(bb.maxs, Point3::new(2.0, 2.0, 2.0));
}

#[test]
fn polyhedron_rejects_bad_index() {
    let pts = &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let faces: &[&[usize]] = &[&[0, 1, 5]];
    let err = Solid::<()>::polyhedron(pts, faces, None, &Tolerance::default()).unwrap_err();
    assert_eq!(
        err,
        polysolid::ValidationError::IndexOutOfRange { index: 5, len: 3 }
    );
}

#[test]
fn polyhedron_validates_with_given_tolerance() {
    let s = 1e-4;
    let pts = &[[0.0, 0.0, 0.0], [s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]];
    let faces: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];

    let tiny = Solid::<()>::polyhedron(pts, faces, None, &Tolerance::default()).unwrap();
    assert!(approx_eq(tiny.volume(), s * s * s / 6.0, 1e-20));

    // at a coarse tolerance the whole tetrahedron collapses to a point
    let coarse = Tolerance::new(1e-3).unwrap();
    assert!(Solid::<()>::polyhedron(pts, faces, None, &coarse).is_err());
}

#[test]
fn from_vertex_lists_drops_invalid_loops() {
    let tol = Tolerance::default();
    let cube: Solid<()> = Solid::cube(1.0, None);
    let mut loops: Vec<_> = cube.polygons.iter().map(|p| p.vertices.clone()).collect();
    loops.push(cube.polygons[0].vertices[..2].to_vec());

    let solid: Solid<()> = Solid::from_vertex_lists(loops, None, &tol);
    assert_eq!(solid.polygons.len(), 6);
    assert!(approx_eq(solid.volume(), 1.0, MEASURE_EPS));
}

#[test]
fn polygon_data_export() {
    let cube: Solid<()> = Solid::cube(1.0, None);
    let data = cube.to_polygon_data();
    assert_eq!(data.len(), 6);
    for (positions, normals) in &data {
        assert_eq!(positions.len(), 4);
        assert_eq!(normals.len(), 4);
    }
}

// --------------------------------------------------------
//   Booleans
// --------------------------------------------------------

#[test]
fn difference_removes_half_of_a_bar() {
    // [0,2]x[0,1]x[0,1] minus [1,2]x[0,1]x[0,1]
    let a: Solid<()> = Solid::cuboid(2.0, 1.0, 1.0, None);
    let b: Solid<()> = Solid::cube(1.0, None).translate(1.0, 0.0, 0.0);

    let c = a.difference(&b);
    assert_eq!(c.polygons.len(), 6);
    assert!(approx_eq(c.surface_area(), 6.0, MEASURE_EPS));
    assert!(approx_eq(c.volume(), 1.0, MEASURE_EPS));
    assert!(faces_point_outward(&c, Point3::new(0.5, 0.5, 0.5)));

    let bb = c.bounding_box();
    assert!(approx_eq(bb.maxs.x, 1.0, MEASURE_EPS));
    assert!(approx_eq(bb.mins.x, 0.0, MEASURE_EPS));
}

#[cfg(feature = "hashmap")]
#[test]
fn difference_of_bar_is_manifold() {
    let tol = Tolerance::default();
    let a: Solid<()> = Solid::cuboid(2.0, 1.0, 1.0, None);
    let b: Solid<()> = Solid::cube(1.0, None).translate(1.0, 0.0, 0.0);
    assert!(a.is_manifold(&tol));
    assert!(a.difference(&b).is_manifold(&tol));
}

#[test]
fn overlapping_cube_volumes() {
    let (a, b) = overlapping_cubes();

    assert_relative_eq!(a.union(&b).volume(), 15.0, epsilon = MEASURE_EPS);
    assert_relative_eq!(a.intersection(&b).volume(), 1.0, epsilon = MEASURE_EPS);
    assert_relative_eq!(a.difference(&b).volume(), 7.0, epsilon = MEASURE_EPS);
    assert_relative_eq!(b.difference(&a).volume(), 7.0, epsilon = MEASURE_EPS);
}

#[test]
fn union_and_intersection_commute() {
    let (a, b) = overlapping_cubes();
    assert!(approx_eq(
        a.union(&b).volume(),
        b.union(&a).volume(),
        MEASURE_EPS
    ));
    assert!(approx_eq(
        a.intersection(&b).surface_area(),
        b.intersection(&a).surface_area(),
        MEASURE_EPS
    ));
}

#[test]
fn intersection_is_the_shared_cube() {
    let (a, b) = overlapping_cubes();
    let c = a.intersection(&b);
    assert!(approx_eq(c.surface_area(), 6.0, MEASURE_EPS));
    let bb = c.bounding_box();
    assert!((bb.mins - Point3::new(1.0, 1.0, 1.0)).norm() < MEASURE_EPS);
    assert!((bb.maxs - Point3::new(2.0, 2.0, 2.0)).norm() < MEASURE_EPS);
    assert!(faces_point_outward(&c, Point3::new(1.5, 1.5, 1.5)));
}

#[test]
fn xor_excludes_shared_volume() {
    let (a, b) = overlapping_cubes();
    let x = a.xor(&b);
    assert!(approx_eq(x.volume(), 14.0, MEASURE_EPS));
}

#[test]
fn union_with_itself_is_identity() {
    let a: Solid<()> = Solid::cube(1.0, None);
    let u = a.union(&a);
    assert_eq!(u.polygons.len(), 6);
    assert!(approx_eq(u.volume(), 1.0, MEASURE_EPS));

    let i = a.intersection(&a);
    assert_eq!(i.polygons.len(), 6);

    let d = a.difference(&a);
    assert!(d.is_empty());
}

#[test]
fn disjoint_operands() {
    let a: Solid<()> = Solid::cube(1.0, None);
    let b = cuboid_at([1.0, 1.0, 1.0], 5.0, 0.0, 0.0);

    let u = a.union(&b);
    assert_eq!(u.polygons.len(), 12);
    assert!(approx_eq(u.volume(), 2.0, MEASURE_EPS));
    assert!(a.intersection(&b).is_empty());
    assert_eq!(a.difference(&b).polygons.len(), 6);
}

#[test]
fn empty_operand_rules() {
    let tol = Tolerance::default();
    let cube: Solid<()> = Solid::cube(1.0, None);
    let empty: Solid<()> = Solid::new();

    let u = boolean_op(BooleanKind::Union, &cube, &empty, &tol).solid;
    assert_eq!(u.polygons.len(), 6);
    let u = boolean_op(BooleanKind::Union, &empty, &cube, &tol).solid;
    assert_eq!(u.polygons.len(), 6);

    assert!(boolean_op(BooleanKind::Intersection, &empty, &cube, &tol).solid.is_empty());
    assert!(boolean_op(BooleanKind::Difference, &empty, &cube, &tol).solid.is_empty());
    assert_eq!(
        boolean_op(BooleanKind::Difference, &cube, &empty, &tol)
            .solid
            .polygons
            .len(),
        6
    );
    assert!(boolean_op(BooleanKind::Union, &empty, &empty, &tol).solid.is_empty());
}

#[test]
fn diagnostics_report_cuts() {
    let tol = Tolerance::default();
    let (a, b) = overlapping_cubes();
    let result = boolean_op(BooleanKind::Union, &a, &b, &tol);
    assert!(result.diagnostics.cuts > 0);
    assert!(result.diagnostics.is_clean());
    assert_eq!(result.diagnostics.fragments_dropped, 0);
}

#[test]
fn explicit_tolerance() {
    let tol = Tolerance::new(1e-6).unwrap();
    let (a, b) = overlapping_cubes();
    let result = a.boolean(BooleanKind::Intersection, &b, &tol);
    assert!(approx_eq(result.solid.volume(), 1.0, MEASURE_EPS));
}

#[test]
fn operations_parse_from_names() {
    assert_eq!("union".parse::<BooleanKind>().unwrap(), BooleanKind::Union);
    assert_eq!(
        "Intersection".parse::<BooleanKind>().unwrap(),
        BooleanKind::Intersection
    );
    assert_eq!(BooleanKind::Difference.to_string(), "difference");
    assert!("merge".parse::<BooleanKind>().is_err());
}

#[test]
fn metadata_follows_fragments() {
    let a: Solid<&'static str> = Solid::cube(2.0, Some("a"));
    let b: Solid<&'static str> = Solid::cube(2.0, Some("b")).translate(1.0, 1.0, 1.0);

    let u = a.union(&b);
    assert_eq!(u.metadata, Some("a"));
    assert!(u.polygons.iter().any(|p| p.metadata == Some("a")));
    assert!(u.polygons.iter().any(|p| p.metadata == Some("b")));

    // subtracted faces keep their origin too
    let d = a.difference(&b);
    let inner: Vec<_> = d
        .polygons
        .iter()
        .filter(|p| p.metadata == Some("b"))
        .collect();
    assert!(!inner.is_empty());
    assert!(
        inner
            .iter()
            .all(|p| p.plane.normal.dot(&(p.centroid() - Point3::new(1.5, 1.5, 1.5))) < 0.0)
    );
}

// --------------------------------------------------------
//   Transformations
// --------------------------------------------------------

#[test]
fn translate_and_float() {
    let cube: Solid<()> = Solid::cube(1.0, None).translate(2.0, 3.0, -4.0);
    let bb = cube.bounding_box();
    assert_eq!(bb.mins, Point3::new(2.0, 3.0, -4.0));

    let floated = cube.float();
    assert!(approx_eq(floated.bounding_box().mins.z, 0.0, MEASURE_EPS));

    let centered = cube.center();
    let bb = centered.bounding_box();
    assert!((bb.mins.coords + bb.maxs.coords).norm() < MEASURE_EPS);
}

#[test]
fn rotate_and_scale() {
    let cube: Solid<()> = Solid::cube(1.0, None);
    let rotated = cube.rotate(0.0, 0.0, 90.0);
    assert!(approx_eq(rotated.volume(), 1.0, MEASURE_EPS));

    let scaled = cube.scale(2.0, 3.0, 4.0);
    assert!(approx_eq(scaled.volume(), 24.0, MEASURE_EPS));
}

#[test]
fn mirror_keeps_outward_faces() {
    let cube: Solid<()> = Solid::cube(1.0, None);
    let plane = Plane::from_normal(Vector3::x(), 0.0);
    let mirrored = cube.mirror(&plane);

    let bb = mirrored.bounding_box();
    assert!(approx_eq(bb.mins.x, -1.0, MEASURE_EPS));
    assert!(approx_eq(mirrored.volume(), 1.0, MEASURE_EPS));
    assert!(faces_point_outward(&mirrored, Point3::new(-0.5, 0.5, 0.5)));
}

#[test]
fn mirror_through_offset_plane() {
    let cube: Solid<()> = Solid::cube(1.0, None);
    // the plane z = 3 sends [0, 1] to [5, 6]
    let mirrored = cube.mirror(&Plane::from_normal(Vector3::z() * 2.0, 6.0));
    let bb = mirrored.bounding_box();
    assert!(approx_eq(bb.mins.z, 5.0, MEASURE_EPS));
    assert!(approx_eq(bb.maxs.z, 6.0, MEASURE_EPS));
    assert!(approx_eq(mirrored.volume(), 1.0, MEASURE_EPS));

    let degenerate = Plane {
        normal: Vector3::zeros(),
        w: 1.0,
    };
    assert_eq!(cube.mirror(&degenerate).polygons, cube.polygons);
}

#[test]
fn inverse_flips_volume() {
    let cube: Solid<()> = Solid::cube(1.0, None);
    let inv = cube.inverse();
    assert!(approx_eq(inv.volume(), -1.0, MEASURE_EPS));
    assert!(approx_eq(inv.inverse().volume(), 1.0, MEASURE_EPS));
}

#[test]
fn difference_after_transform() {
    let bar: Solid<()> = Solid::cuboid(4.0, 1.0, 1.0, None).rotate(0.0, 0.0, 90.0);
    // bar now spans x in [-1, 0] and y in [0, 4]
    let cutter = cuboid_at([3.0, 1.0, 3.0], -2.0, 1.5, -1.0);
    let cut = bar.difference(&cutter);
    let expected: Real = 4.0 - 1.0;
    assert!(approx_eq(cut.volume(), expected, 1e-7));
}

#[test]
fn difference_and_intersection_cover_the_minuend() {
    let (a, b) = overlapping_cubes();
    let parts = a.difference(&b).union(&a.intersection(&b));
    assert!(approx_eq(parts.volume(), a.volume(), MEASURE_EPS));
    assert!(approx_eq(
        a.difference(&b).volume() + a.intersection(&b).volume(),
        8.0,
        MEASURE_EPS
    ));
}
