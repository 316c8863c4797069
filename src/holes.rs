//! Reconstruct polygons-with-holes from flat lists of coplanar boundaries

use crate::float_types::Tolerance;
use crate::polygon::{PointLocation, Polygon};
use std::fmt::Debug;

/// A boundary together with the indices of the boundaries it directly
/// contains. Indices refer to the slice passed to [`resolve_holes`], which is
/// also the order of the returned boundaries.
#[derive(Debug, Clone)]
pub struct Boundary<S: Clone> {
    pub polygon: Polygon<S>,
    /// Immediate holes; empty when nothing is nested directly inside.
    pub holes: Vec<usize>,
    /// Index of the immediate container, if any.
    pub parent: Option<usize>,
    /// Nesting depth: 0 for outermost boundaries, 1 for their holes, and so on.
    pub depth: usize,
}

impl<S: Clone> Boundary<S> {
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }
}

/// Attach immediate-containment metadata to every boundary.
///
/// Boundaries are only compared with others lying on the same geometric
/// plane, in either orientation. A boundary `b` is inside `c` when `c` has
/// the larger area, no vertex of `b` is outside `c`, and at least one vertex
/// of `b` (or its centroid) is strictly inside. Among all containers the
/// smallest one is the immediate parent. Geometry is returned unchanged.
pub fn resolve_holes<S: Clone + Send + Sync + Debug>(
    polygons: &[Polygon<S>],
    tolerance: &Tolerance,
) -> Vec<Boundary<S>> {
    let areas: Vec<_> = polygons.iter().map(Polygon::area).collect();

    let parents: Vec<Option<usize>> = (0..polygons.len())
        .map(|i| {
            (0..polygons.len())
                .filter(|&j| j != i && areas[j] > areas[i])
                .filter(|&j| contains(&polygons[j], &polygons[i], tolerance))
                .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
        })
        .collect();

    let mut boundaries: Vec<Boundary<S>> = polygons
        .iter()
        .map(|polygon| Boundary {
            polygon: polygon.clone(),
            holes: Vec::new(),
            parent: None,
            depth: 0,
        })
        .collect();

    for (child, parent) in parents.iter().enumerate() {
        if let Some(parent) = *parent {
            boundaries[parent].holes.push(child);
            boundaries[child].parent = Some(parent);
        }
    }

    // containment by strictly larger area cannot form cycles
    for i in 0..boundaries.len() {
        let mut depth = 0;
        let mut cursor = parents[i];
        while let Some(p) = cursor {
            depth += 1;
            cursor = parents[p];
        }
        boundaries[i].depth = depth;
    }

    boundaries
}

/// `true` if `inner` lies within `outer`.
fn contains<S: Clone + Send + Sync + Debug>(
    outer: &Polygon<S>,
    inner: &Polygon<S>,
    tolerance: &Tolerance,
) -> bool {
    if outer.plane.coincident(&inner.plane, tolerance).is_none() {
        return false;
    }

    let mut strictly_inside = false;
    for v in &inner.vertices {
        match outer.locate_point(&v.pos, tolerance) {
            PointLocation::Outside => return false,
            PointLocation::Inside => strictly_inside = true,
            PointLocation::Boundary => {},
        }
    }
    strictly_inside || outer.locate_point(&inner.centroid(), tolerance) == PointLocation::Inside
}
