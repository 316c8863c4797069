use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::plane::Plane;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Boolean operations and rigid/affine transforms shared by solid types.
///
/// The booleans use the default tolerance; call [`crate::boolean_op`] to
/// pass one explicitly and get the diagnostics back.
pub trait CSGOps: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn xor(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    /// Same region with every face turned inside out.
    fn inverse(&self) -> Self;

    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Moves the bounding-box center to the origin.
    fn center(&self) -> Self {
        self.translate_vector(-self.bounding_box().center().coords)
    }

    /// Moves the solid along z so its lowest point sits at `z = 0`.
    ///
    /// ```
    /// # use polysolid::{CSGOps, Solid};
    /// let solid = Solid::<()>::cuboid(1.0, 1.0, 3.0, None).translate(2.0, 1.0, -2.0);
    /// assert_eq!(solid.float().bounding_box().mins.z, 0.0);
    /// ```
    fn float(&self) -> Self {
        self.translate_vector(-self.bounding_box().mins.z * Vector3::z())
    }

    /// Rotation in degrees about x, then y, then z.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rot = Rotation3::from_euler_angles(
            x_deg.to_radians(),
            y_deg.to_radians(),
            z_deg.to_radians(),
        );
        self.transform(&rot.to_homogeneous())
    }

    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        self.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
    }

    /// Reflect through `plane`. The reflection reverses orientation, so the
    /// result is inverted to keep faces pointing outward. A plane with a
    /// zero normal returns a clone.
    fn mirror(&self, plane: &Plane) -> Self {
        match plane.reflection() {
            Some(m) => self.transform(&m).inverse(),
            None => self.clone(),
        }
    }
}
