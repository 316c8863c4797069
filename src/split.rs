//! Splitting a polygon against a cutting plane

use crate::float_types::{Real, Tolerance};
use crate::intersect::{Edge, PlaneIntersection, Ray};
use crate::plane::{Plane, Side};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::Point3;
use std::fmt::Debug;
use tracing::trace;

/// What happened to a polygon offered to [`Plane::split_polygon`].
#[derive(Debug, Clone)]
pub enum SplitOutcome<S: Clone> {
    /// Every vertex lies on the plane.
    Coplanar(Polygon<S>),
    /// No vertex behind the plane.
    Front(Polygon<S>),
    /// No vertex in front of the plane.
    Back(Polygon<S>),
    /// The polygon straddled the plane and was cut. Either side may be `None`
    /// when its chain was degenerate. `cut` lists the points on the plane:
    /// crossings and vertices lying on it, in walk order.
    Spanning {
        front: Option<Polygon<S>>,
        back: Option<Polygon<S>>,
        cut: Vec<Point3<Real>>,
    },
    /// The polygon straddled the plane but the cut filter refused the cut.
    Rejected(Polygon<S>),
}

impl<S: Clone> SplitOutcome<S> {
    /// `true` when new fragments were produced.
    pub const fn is_cut(&self) -> bool {
        matches!(self, SplitOutcome::Spanning { .. })
    }

    /// All resulting polygons, front first.
    pub fn into_polygons(self) -> Vec<Polygon<S>> {
        match self {
            SplitOutcome::Coplanar(p)
            | SplitOutcome::Front(p)
            | SplitOutcome::Back(p)
            | SplitOutcome::Rejected(p) => vec![p],
            SplitOutcome::Spanning { front, back, .. } => front.into_iter().chain(back).collect(),
        }
    }
}

/// Gate deciding whether a spanning polygon is actually cut.
pub trait CutFilter<S: Clone> {
    /// `cut` holds the on-plane points computed for `polygon`.
    fn accept(&self, polygon: &Polygon<S>, cut: &[Point3<Real>], tolerance: &Tolerance) -> bool;
}

/// Accept every cut.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<S: Clone> CutFilter<S> for AcceptAll {
    fn accept(&self, _: &Polygon<S>, _: &[Point3<Real>], _: &Tolerance) -> bool {
        true
    }
}

/// Accept a cut only when the cut segment touches the cutting polygon
/// itself, not just the infinite extension of its plane.
#[derive(Debug, Clone, Copy)]
pub struct OverlapsCutter<'a, S: Clone> {
    pub cutter: &'a Polygon<S>,
}

impl<'a, S: Clone> OverlapsCutter<'a, S> {
    pub const fn new(cutter: &'a Polygon<S>) -> Self {
        OverlapsCutter { cutter }
    }
}

impl<S: Clone + Send + Sync + Debug, T: Clone> CutFilter<T> for OverlapsCutter<'_, S> {
    fn accept(&self, _: &Polygon<T>, cut: &[Point3<Real>], tolerance: &Tolerance) -> bool {
        let Some((a, b)) = extreme_pair(cut) else {
            return false;
        };
        if self.cutter.contains_point(&a, tolerance)
            || self.cutter.contains_point(&b, tolerance)
            || self.cutter.contains_point(&nalgebra::center(&a, &b), tolerance)
        {
            return true;
        }

        let segment = Edge::new(
            Vertex::new(a, self.cutter.plane.normal),
            Vertex::new(b, self.cutter.plane.normal),
        );
        self.cutter.edges().any(|edge| {
            segment
                .intersect(&edge, tolerance)
                .within_segments(&segment, &edge, tolerance)
        })
    }
}

/// The two points of `points` farthest apart, found with two sweeps.
fn extreme_pair(points: &[Point3<Real>]) -> Option<(Point3<Real>, Point3<Real>)> {
    let first = *points.first()?;
    let farthest_from = |origin: Point3<Real>| {
        points
            .iter()
            .copied()
            .max_by(|p, q| (p - origin).norm_squared().total_cmp(&(q - origin).norm_squared()))
            .unwrap_or(origin)
    };
    let a = farthest_from(first);
    let b = farthest_from(a);
    Some((a, b))
}

impl Plane {
    /// Split `polygon` by this plane, accepting every cut.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
        tolerance: &Tolerance,
    ) -> SplitOutcome<S> {
        self.split_polygon_with(polygon, tolerance, &AcceptAll)
    }

    /// Split `polygon` by this plane.
    ///
    /// Vertices are classified with the split epsilon. Front vertices go to
    /// the front chain, back vertices to the back chain, on-plane vertices
    /// to both. Each edge whose endpoints lie strictly on opposite sides
    /// contributes its crossing point to both chains. Chains that do not
    /// form a valid polygon with the parent's winding are dropped.
    pub fn split_polygon_with<S, F>(
        &self,
        polygon: &Polygon<S>,
        tolerance: &Tolerance,
        filter: &F,
    ) -> SplitOutcome<S>
    where
        S: Clone + Send + Sync + Debug,
        F: CutFilter<S> + ?Sized,
    {
        let sides: Vec<Side> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos, tolerance.split))
            .collect();

        let has_front = sides.contains(&Side::Front);
        let has_back = sides.contains(&Side::Back);
        match (has_front, has_back) {
            (false, false) => return SplitOutcome::Coplanar(polygon.clone()),
            (true, false) => return SplitOutcome::Front(polygon.clone()),
            (false, true) => return SplitOutcome::Back(polygon.clone()),
            (true, true) => {},
        }

        let n = polygon.vertices.len();
        let mut front = Vec::<Vertex>::with_capacity(n + 2);
        let mut back = Vec::<Vertex>::with_capacity(n + 2);
        let mut cut = Vec::new();

        for i in 0..n {
            // j is the vertex following i, we modulo by len to wrap around to the first vertex after the last
            let j = (i + 1) % n;
            let (vi, vj) = (&polygon.vertices[i], &polygon.vertices[j]);

            match sides[i] {
                Side::Front => front.push(*vi),
                Side::Back => back.push(*vi),
                Side::On => {
                    front.push(*vi);
                    back.push(*vi);
                    cut.push(vi.pos);
                },
            }

            if sides[i].opposes(sides[j]) {
                let crossing = vi.interpolate(vj, self.crossing_parameter(vi, vj, tolerance));
                front.push(crossing);
                back.push(crossing);
                cut.push(crossing.pos);
            }
        }

        if !filter.accept(polygon, &cut, tolerance) {
            trace!(cut_points = cut.len(), "cut rejected by filter");
            return SplitOutcome::Rejected(polygon.clone());
        }

        SplitOutcome::Spanning {
            front: fragment(front, polygon, tolerance),
            back: fragment(back, polygon, tolerance),
            cut,
        }
    }

    /// Parameter along `a → b` where the edge crosses this plane.
    fn crossing_parameter(&self, a: &Vertex, b: &Vertex, tolerance: &Tolerance) -> Real {
        let ray = Ray::new(a.pos, b.pos - a.pos);
        match self.intersect_ray(&ray, tolerance) {
            PlaneIntersection::NonParallel { t, .. } => t.clamp(0.0, 1.0),
            // nearly parallel to the plane but still straddling it by more
            // than the split epsilon: fall back to the distance ratio
            _ => {
                let da = self.signed_distance(&a.pos);
                let db = self.signed_distance(&b.pos);
                (da / (da - db)).clamp(0.0, 1.0)
            },
        }
    }
}

/// Turn a vertex chain into a fragment of `parent`, or drop it.
fn fragment<S: Clone + Send + Sync + Debug>(
    chain: Vec<Vertex>,
    parent: &Polygon<S>,
    tolerance: &Tolerance,
) -> Option<Polygon<S>> {
    if chain.len() < 3 {
        trace!(len = chain.len(), "dropping short chain");
        return None;
    }
    match Polygon::try_new(chain, parent.metadata.clone(), tolerance) {
        Ok(mut polygon) => {
            if polygon.plane.normal.dot(&parent.plane.normal) <= 0.0 {
                trace!("dropping fragment with inverted winding");
                return None;
            }
            // fragments stay exactly on the parent plane
            polygon.plane = parent.plane.clone();
            Some(polygon)
        },
        Err(err) => {
            trace!(%err, "dropping degenerate fragment");
            None
        },
    }
}
