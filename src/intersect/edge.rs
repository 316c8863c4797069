//! Closest points and intersections between two finite segments

use crate::float_types::{Real, Tolerance};
use crate::vertex::{Vertex, approx_eq_point};
use nalgebra::Point3;

/// A polygon edge, stored ordered because winding matters to the polygon it
/// came from. Compare edges with [`Edge::same_segment`].
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

/// Result of [`Edge::intersect`]. `s` parametrizes the first edge and `t` the
/// second, both `0` at `start` and `1` at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeIntersection {
    /// Parallel lines or a degenerate segment; no closest points.
    Parallel,
    /// The supporting lines meet at `point`.
    Intersecting { point: Point3<Real>, s: Real, t: Real },
    /// Skew lines; `closest_a` lies on the first line, `closest_b` on the
    /// second.
    NonParallel {
        closest_a: Point3<Real>,
        closest_b: Point3<Real>,
        s: Real,
        t: Real,
    },
}

impl EdgeIntersection {
    /// `true` if the lines meet inside both segments (endpoints included).
    pub fn within_segments(&self, a: &Edge, b: &Edge, tolerance: &Tolerance) -> bool {
        match *self {
            EdgeIntersection::Intersecting { s, t, .. } => {
                in_unit_range(s, a.length(), tolerance) && in_unit_range(t, b.length(), tolerance)
            },
            _ => false,
        }
    }
}

fn in_unit_range(param: Real, length: Real, tolerance: &Tolerance) -> bool {
    let slack = if length > 0.0 { tolerance.geometric / length } else { 0.0 };
    param >= -slack && param <= 1.0 + slack
}

impl Edge {
    pub const fn new(start: Vertex, end: Vertex) -> Self {
        Edge { start, end }
    }

    pub fn length(&self) -> Real {
        (self.end.pos - self.start.pos).norm()
    }

    pub fn reversed(&self) -> Self {
        Edge::new(self.end, self.start)
    }

    pub fn midpoint(&self) -> Point3<Real> {
        nalgebra::center(&self.start.pos, &self.end.pos)
    }

    /// Same undirected segment within the geometric tolerance.
    pub fn same_segment(&self, other: &Edge, tolerance: &Tolerance) -> bool {
        (self.start.coincides(&other.start, tolerance) && self.end.coincides(&other.end, tolerance))
            || (self.start.coincides(&other.end, tolerance)
                && self.end.coincides(&other.start, tolerance))
    }

    /// Closest points between the supporting lines of `self` (`p1 → p2`) and
    /// `other` (`p3 → p4`).
    ///
    /// Solves the 2×2 system built from the dot products of
    /// `p13 = p1 - p3`, `p43 = p4 - p3` and `p21 = p2 - p1`. Segments sharing
    /// an endpoint always report that endpoint, collinear or not.
    pub fn intersect(&self, other: &Edge, tolerance: &Tolerance) -> EdgeIntersection {
        let (p1, p2) = (self.start.pos, self.end.pos);
        let (p3, p4) = (other.start.pos, other.end.pos);

        let p43 = p4 - p3;
        let p21 = p2 - p1;
        let d4343 = p43.norm_squared();
        let d2121 = p21.norm_squared();
        if d4343 < tolerance.squared() || d2121 < tolerance.squared() {
            return EdgeIntersection::Parallel;
        }

        for (point, s) in [(p1, 0.0), (p2, 1.0)] {
            for (candidate, t) in [(p3, 0.0), (p4, 1.0)] {
                if approx_eq_point(&point, &candidate, tolerance) {
                    return EdgeIntersection::Intersecting { point, s, t };
                }
            }
        }

        let p13 = p1 - p3;
        let d1343 = p13.dot(&p43);
        let d4321 = p43.dot(&p21);
        let d1321 = p13.dot(&p21);

        // relative to |p21|²|p43|² so the test reads as sin² of the angle
        let denom = d2121 * d4343 - d4321 * d4321;
        if denom.abs() < tolerance.geometric * d2121 * d4343 {
            return EdgeIntersection::Parallel;
        }

        let numer = d1343 * d4321 - d1321 * d4343;
        let s = numer / denom;
        let t = (d1343 + d4321 * s) / d4343;

        let closest_a = p1 + p21 * s;
        let closest_b = p3 + p43 * t;

        if approx_eq_point(&closest_a, &closest_b, tolerance) {
            EdgeIntersection::Intersecting {
                point: nalgebra::center(&closest_a, &closest_b),
                s,
                t,
            }
        } else {
            EdgeIntersection::NonParallel {
                closest_a,
                closest_b,
                s,
                t,
            }
        }
    }
}
