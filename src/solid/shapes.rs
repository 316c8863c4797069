//! Primitive solids

use crate::errors::ValidationError;
use crate::float_types::{Real, Tolerance};
use crate::polygon::Polygon;
use crate::solid::Solid;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::sync::OnceLock;

impl<S: Clone + Debug + Send + Sync> Solid<S> {
    /// Axis-aligned box spanning `(0, 0, 0)` to `(width, length, height)`.
    ///
    /// ```text
    ///     7-------6
    ///    /|      /|
    ///   4-------5 |
    ///   | |     | |
    ///   | 3-----|-2
    ///   |/      |/
    ///   0-------1
    /// ```
    /// Faces are wound counter-clockwise seen from outside.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Solid<S> {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        let faces: [([usize; 4], Vector3<Real>); 6] = [
            ([0, 3, 2, 1], -Vector3::z()), // Bottom face
            ([4, 5, 6, 7], Vector3::z()),  // Top face
            ([0, 1, 5, 4], -Vector3::y()), // Front face
            ([3, 7, 6, 2], Vector3::y()),  // Back face
            ([0, 4, 7, 3], -Vector3::x()), // Left face
            ([1, 2, 6, 5], Vector3::x()),  // Right face
        ];

        let polygons = faces
            .iter()
            .map(|(indices, normal)| {
                let vertices = indices
                    .iter()
                    .map(|&i| Vertex::new(corners[i], *normal))
                    .collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect();

        Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Cube with edge `width`, corner at the origin.
    pub fn cube(width: Real, metadata: Option<S>) -> Solid<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// Build a solid from indexed points and faces. Each face lists point
    /// indices in counter-clockwise order seen from outside; vertex normals
    /// are set to the face normal.
    ///
    /// ```
    /// # use polysolid::{Solid, Tolerance};
    /// let pts = &[
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ];
    /// let faces: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];
    /// let tetra = Solid::<()>::polyhedron(pts, faces, None, &Tolerance::default()).unwrap();
    /// assert!((tetra.volume() - 1.0 / 6.0).abs() < 1e-12);
    /// ```
    ///
    /// ## Errors
    /// [`ValidationError::IndexOutOfRange`] for a bad index, or the
    /// validation error of the first invalid face.
    pub fn polyhedron(
        points: &[[Real; 3]],
        faces: &[&[usize]],
        metadata: Option<S>,
        tolerance: &Tolerance,
    ) -> Result<Solid<S>, ValidationError> {
        let mut polygons = Vec::with_capacity(faces.len());

        for face in faces {
            let mut vertices = Vec::with_capacity(face.len());
            for &idx in face.iter() {
                let [x, y, z] = *points.get(idx).ok_or(ValidationError::IndexOutOfRange {
                    index: idx,
                    len: points.len(),
                })?;
                vertices.push(Vertex::new(Point3::new(x, y, z), Vector3::zeros()));
            }

            let mut polygon = Polygon::try_new(vertices, metadata.clone(), tolerance)?;
            let normal = polygon.plane.normal;
            for v in &mut polygon.vertices {
                v.normal = normal;
            }
            polygons.push(polygon);
        }

        Ok(Solid {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
        })
    }
}
