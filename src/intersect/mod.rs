//! Intersection primitives shared by the splitter and the classifier.
//!
//! - [`plane`]: ray/line against an oriented [`Plane`](crate::plane::Plane)
//! - [`edge`]: closest points between two finite segments

pub mod edge;
pub mod plane;

pub use edge::{Edge, EdgeIntersection};
pub use plane::PlaneIntersection;

pub use crate::float_types::parry3d::query::Ray;
