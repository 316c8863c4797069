//! Oriented planes and signed half-space classification

use crate::float_types::{Real, Tolerance};
use crate::vertex::Vertex;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Side {
    Back = -1,
    On = 0,
    Front = 1,
}

impl Side {
    /// `+1`, `-1` or `0`
    pub const fn sign(self) -> i8 {
        self as i8
    }

    /// `true` for a strict `Front`/`Back` pair.
    pub const fn opposes(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Front, Side::Back) | (Side::Back, Side::Front)
        )
    }
}

/// An oriented plane in 3D, stored as unit normal `n` and offset `w` so that
/// points `p` on the plane satisfy `n·p = w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a normal and offset satisfying `normal·p = w`.
    /// Both are rescaled so the stored normal has unit length.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        if len == 0.0 {
            return Plane { normal: Vector3::z(), w };
        }
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Create a plane through `anchor` with the given normal direction.
    pub fn from_anchor(anchor: Point3<Real>, normal: Vector3<Real>) -> Self {
        let normal = normal.normalize();
        Plane {
            w: normal.dot(&anchor.coords),
            normal,
        }
    }

    /// Plane through three points, oriented by the right-hand rule
    /// `(b - a) × (c - a)`. `None` when the points are collinear within
    /// `tolerance`.
    pub fn from_points(
        a: &Point3<Real>,
        b: &Point3<Real>,
        c: &Point3<Real>,
        tolerance: &Tolerance,
    ) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        // |n| is twice the triangle area; compare the height against tolerance
        let base = (b - a).norm().max((c - a).norm());
        if len <= tolerance.geometric * base {
            return None;
        }
        let normal = n / len;
        Some(Plane {
            w: normal.dot(&a.coords),
            normal,
        })
    }

    /// Plane of a polygon outline.
    ///
    /// Uses the first three non-collinear vertices, then orients the result to
    /// agree with the Newell normal of the whole outline so reflex corners of
    /// concave outlines cannot invert it.
    pub fn from_vertices(vertices: &[Vertex], tolerance: &Tolerance) -> Option<Self> {
        let n = vertices.len();
        if n < 3 {
            return None;
        }

        let mut plane = None;
        'search: for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    if let Some(p) = Plane::from_points(
                        &vertices[i].pos,
                        &vertices[j].pos,
                        &vertices[k].pos,
                        tolerance,
                    ) {
                        plane = Some(p);
                        break 'search;
                    }
                }
            }
        }
        let mut plane = plane?;

        let newell = newell_normal(vertices);
        if plane.normal.dot(&newell) < 0.0 {
            plane.flip();
        }
        Some(plane)
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// The point of the plane closest to the origin.
    pub fn anchor(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point` from the plane; positive in front.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify `point` against the plane with the given epsilon.
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>, epsilon: Real) -> Side {
        let d = self.signed_distance(point);
        if d > epsilon {
            Side::Front
        } else if d < -epsilon {
            Side::Back
        } else {
            Side::On
        }
    }

    /// Classify `point` with the geometric tolerance.
    #[inline]
    pub fn classify(&self, point: &Point3<Real>, tolerance: &Tolerance) -> Side {
        self.orient_point(point, tolerance.geometric)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: &Point3<Real>) -> Point3<Real> {
        point - self.normal * self.signed_distance(point)
    }

    /// If both planes describe the same geometric plane (either orientation),
    /// returns `Some(true)` when they face the same way and `Some(false)`
    /// when opposed.
    pub fn coincident(&self, other: &Plane, tolerance: &Tolerance) -> Option<bool> {
        let dot = self.normal.dot(&other.normal);
        if (1.0 - dot.abs()) > tolerance.geometric {
            return None;
        }
        let same = dot > 0.0;
        let other_w = if same { other.w } else { -other.w };
        if (self.w - other_w).abs() > tolerance.geometric {
            return None;
        }
        Some(same)
    }

    /// Affine matrix reflecting points through the plane:
    /// `p' = p - 2 (n·p - w) n`. `None` when the normal has zero length.
    pub fn reflection(&self) -> Option<Matrix4<Real>> {
        let len = self.normal.norm();
        if len == 0.0 {
            return None;
        }
        let n = self.normal / len;
        let w = self.w / len;

        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(Matrix3::identity() - 2.0 * n * n.transpose()));
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&(2.0 * w * n));
        Some(m)
    }

    /// Index of the axis the normal is most aligned with, the one dropped when
    /// projecting the plane to 2D.
    pub fn dominant_axis(&self) -> usize {
        let a = self.normal.abs();
        if a.x >= a.y && a.x >= a.z {
            0
        } else if a.y >= a.z {
            1
        } else {
            2
        }
    }
}

/// Newell's method: the un-normalized area-weighted normal of an outline.
pub fn newell_normal(vertices: &[Vertex]) -> Vector3<Real> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .fold(Vector3::zeros(), |acc, (curr, next)| {
            acc + curr.pos.coords.cross(&next.pos.coords)
        })
}
