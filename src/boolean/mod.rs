//! Boolean operations on solids: split both operands against each other,
//! classify every fragment, then keep, flip or discard it by operation.
//!
//! Classification labels are relative to the *other* operand:
//!
//! | operation    | kept from A         | kept from B        |
//! |--------------|---------------------|--------------------|
//! | union        | outside, same       | outside            |
//! | intersection | inside, same        | inside             |
//! | difference   | outside, opposite   | inside, flipped    |

pub mod diagnostics;

pub use diagnostics::{Anomaly, Diagnostics, Operand};

use crate::classify::{Classification, classify_polygon};
use crate::errors::BooleanError;
use crate::float_types::{Tolerance, parry3d::bounding_volume::BoundingVolume};
use crate::holes::{Boundary, resolve_holes};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::split::{OverlapsCutter, SplitOutcome};
use crate::traits::CSGOps;
use core::str::FromStr;
use std::fmt::{self, Debug};
use std::sync::OnceLock;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The supported boolean operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanKind {
    Union,
    Difference,
    Intersection,
}

impl fmt::Display for BooleanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BooleanKind::Union => "union",
            BooleanKind::Difference => "difference",
            BooleanKind::Intersection => "intersection",
        };
        f.write_str(name)
    }
}

impl FromStr for BooleanKind {
    type Err = BooleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union" | "add" => Ok(BooleanKind::Union),
            "difference" | "subtract" => Ok(BooleanKind::Difference),
            "intersection" | "intersect" => Ok(BooleanKind::Intersection),
            _ => Err(BooleanError::UnknownOperation(s.to_string())),
        }
    }
}

/// What to do with a classified fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Keep,
    Flip,
    Discard,
}

const fn disposition(kind: BooleanKind, operand: Operand, class: Classification) -> Disposition {
    use BooleanKind::*;
    use Classification::*;
    match (kind, operand, class) {
        (Union, Operand::A, Outside | Same) => Disposition::Keep,
        (Union, Operand::B, Outside) => Disposition::Keep,
        (Intersection, Operand::A, Inside | Same) => Disposition::Keep,
        (Intersection, Operand::B, Inside) => Disposition::Keep,
        (Difference, Operand::A, Outside | Opposite) => Disposition::Keep,
        (Difference, Operand::B, Inside) => Disposition::Flip,
        _ => Disposition::Discard,
    }
}

/// Output of [`boolean_op`].
#[derive(Debug, Clone)]
pub struct BooleanResult<S: Clone + Send + Sync + Debug> {
    pub solid: Solid<S>,
    pub diagnostics: Diagnostics,
}

impl<S: Clone + Send + Sync + Debug> BooleanResult<S> {
    /// Result polygons with their hole metadata, computed on request.
    pub fn boundaries(&self, tolerance: &Tolerance) -> Vec<Boundary<S>> {
        resolve_holes(&self.solid.polygons, tolerance)
    }
}

/// Run a boolean operation between `a` and `b`.
///
/// Never fails: degenerate fragments are dropped and ambiguous
/// classifications fall back to `Outside`, both reported in
/// [`BooleanResult::diagnostics`]. The result carries `a`'s metadata.
#[instrument(skip_all, fields(kind = %kind, a = a.polygons.len(), b = b.polygons.len()))]
pub fn boolean_op<S: Clone + Send + Sync + Debug>(
    kind: BooleanKind,
    a: &Solid<S>,
    b: &Solid<S>,
    tolerance: &Tolerance,
) -> BooleanResult<S> {
    if let Some(solid) = trivial_result(kind, a, b, tolerance) {
        debug!(polygons = solid.polygons.len(), "trivial boolean result");
        return BooleanResult {
            solid,
            diagnostics: Diagnostics::default(),
        };
    }

    let mut diagnostics = Diagnostics::default();

    // both split passes finish before any classification starts
    let b_split = split_against(&b.polygons, a, tolerance, &mut diagnostics);
    let a_split = split_against(&a.polygons, b, tolerance, &mut diagnostics);
    debug!(
        a_fragments = a_split.len(),
        b_fragments = b_split.len(),
        cuts = diagnostics.cuts,
        rejected = diagnostics.cuts_rejected,
        "split passes done"
    );

    let a_classes = classify_all(&a_split, b, tolerance);
    let b_classes = classify_all(&b_split, a, tolerance);

    let mut polygons = Vec::with_capacity(a_split.len() + b_split.len());
    assemble(kind, Operand::A, a_split, &a_classes, &mut polygons, &mut diagnostics);
    assemble(kind, Operand::B, b_split, &b_classes, &mut polygons, &mut diagnostics);

    if !diagnostics.is_clean() {
        warn!(
            anomalies = diagnostics.anomalies.len(),
            "ambiguous fragments were treated as outside"
        );
    }
    debug!(polygons = polygons.len(), "boolean assembled");

    BooleanResult {
        solid: Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata: a.metadata.clone(),
        },
        diagnostics,
    }
}

/// Results that need no splitting: an empty operand, or operands whose
/// bounds do not even touch.
fn trivial_result<S: Clone + Send + Sync + Debug>(
    kind: BooleanKind,
    a: &Solid<S>,
    b: &Solid<S>,
    tolerance: &Tolerance,
) -> Option<Solid<S>> {
    let empty = || Solid {
        polygons: Vec::new(),
        bounding_box: OnceLock::new(),
        metadata: a.metadata.clone(),
    };

    let disjoint = a.is_empty()
        || b.is_empty()
        || !a
            .bounding_box()
            .loosened(tolerance.geometric)
            .intersects(&b.bounding_box());
    if !disjoint {
        return None;
    }

    Some(match kind {
        BooleanKind::Intersection => empty(),
        BooleanKind::Difference => a.clone(),
        BooleanKind::Union if a.is_empty() => b.clone(),
        BooleanKind::Union => {
            let mut polygons = a.polygons.clone();
            polygons.extend(b.polygons.iter().cloned());
            Solid {
                polygons,
                bounding_box: OnceLock::new(),
                metadata: a.metadata.clone(),
            }
        },
    })
}

/// Split `target` against the plane of every polygon of `cutters`.
///
/// Each cutter produces a fresh working list from the previous one, so no
/// list is modified while it is being walked.
fn split_against<S: Clone + Send + Sync + Debug>(
    target: &[Polygon<S>],
    cutters: &Solid<S>,
    tolerance: &Tolerance,
    diagnostics: &mut Diagnostics,
) -> Vec<Polygon<S>> {
    let cutter_bounds = cutters.bounding_box().loosened(tolerance.geometric);

    // avoid splitting obvious non‑intersecting faces
    let (mut working, passthru): (Vec<_>, Vec<_>) = target
        .iter()
        .cloned()
        .partition(|p| p.bounding_box().intersects(&cutter_bounds));

    for cutter in &cutters.polygons {
        let cutter_box = cutter.bounding_box().loosened(tolerance.geometric);
        let filter = OverlapsCutter::new(cutter);
        let mut next = Vec::with_capacity(working.len());

        for polygon in working {
            if !polygon.bounding_box().intersects(&cutter_box) {
                next.push(polygon);
                continue;
            }
            match cutter.plane.split_polygon_with(&polygon, tolerance, &filter) {
                SplitOutcome::Spanning { front, back, .. } => {
                    diagnostics.cuts += 1;
                    diagnostics.fragments_dropped +=
                        usize::from(front.is_none()) + usize::from(back.is_none());
                    next.extend(front);
                    next.extend(back);
                },
                SplitOutcome::Rejected(_) => {
                    diagnostics.cuts_rejected += 1;
                    next.push(polygon);
                },
                // untouched by this plane
                _ => next.push(polygon),
            }
        }
        working = next;
    }

    working.extend(passthru);
    working
}

/// Classify every fragment against `reference`.
#[cfg(not(feature = "parallel"))]
fn classify_all<S: Clone + Send + Sync + Debug>(
    fragments: &[Polygon<S>],
    reference: &Solid<S>,
    tolerance: &Tolerance,
) -> Vec<Classification> {
    let bounds = reference.bounding_box();
    fragments
        .iter()
        .map(|p| classify_polygon(p, &reference.polygons, &bounds, tolerance))
        .collect()
}

/// Parallel version of classifying every fragment against `reference`.
#[cfg(feature = "parallel")]
fn classify_all<S: Clone + Send + Sync + Debug>(
    fragments: &[Polygon<S>],
    reference: &Solid<S>,
    tolerance: &Tolerance,
) -> Vec<Classification> {
    let bounds = reference.bounding_box();
    fragments
        .par_iter()
        .map(|p| classify_polygon(p, &reference.polygons, &bounds, tolerance))
        .collect()
}

fn assemble<S: Clone + Send + Sync + Debug>(
    kind: BooleanKind,
    operand: Operand,
    fragments: Vec<Polygon<S>>,
    classes: &[Classification],
    out: &mut Vec<Polygon<S>>,
    diagnostics: &mut Diagnostics,
) {
    for (index, (mut polygon, &class)) in fragments.into_iter().zip(classes).enumerate() {
        let class = if class == Classification::Unknown {
            diagnostics.anomalies.push(Anomaly {
                operand,
                fragment: index,
                centroid: polygon.centroid(),
                fallback: Classification::Outside,
            });
            Classification::Outside
        } else {
            class
        };

        match disposition(kind, operand, class) {
            Disposition::Keep => out.push(polygon),
            Disposition::Flip => {
                polygon.flip();
                out.push(polygon);
            },
            Disposition::Discard => {},
        }
    }
}

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Run `kind` against `other` with an explicit tolerance, keeping the
    /// diagnostics.
    pub fn boolean(
        &self,
        kind: BooleanKind,
        other: &Solid<S>,
        tolerance: &Tolerance,
    ) -> BooleanResult<S> {
        boolean_op(kind, self, other, tolerance)
    }
}
