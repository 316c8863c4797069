//! Boolean operations (*union*, *difference*, *intersection*, *xor*) on
//! polyhedral solids given as sets of planar polygons.
//!
//! Both operands are split against each other's face planes, every
//! fragment is classified as inside, outside or coplanar with the other
//! solid by casting a ray along its normal, and the fragments each
//! operation needs are reassembled into the result. No tree is built and
//! no triangulation is required; polygons keep their original shape apart
//! from the cuts.
//!
//! ```
//! use polysolid::{CSGOps, Solid};
//!
//! let a = Solid::<()>::cuboid(2.0, 1.0, 1.0, None);
//! let b = Solid::<()>::cube(1.0, None).translate(1.0, 0.0, 0.0);
//! let c = a.difference(&b);
//! assert!((c.volume() - 1.0).abs() < 1e-9);
//! ```
//!
//! # Features
//! #### Default
//! - **hashmap**: enables use of hashbrown for `is_manifold` and edge counting
//!
//! #### Optional
//! - **parallel**: use rayon to classify fragments in parallel
//!
//! # Tolerance
//! Every geometric predicate takes a [`Tolerance`]. The process-wide default
//! is `1e-8`, overridable at build time with the `POLYSOLID_TOLERANCE`
//! environment variable or once at runtime with
//! [`float_types::set_default_tolerance`].

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod boolean;
pub mod classify;
pub mod errors;
pub mod float_types;
pub mod holes;
pub mod intersect;
pub mod plane;
pub mod polygon;
pub mod solid;
pub mod split;
pub mod traits;
pub mod vertex;

pub use boolean::{BooleanKind, BooleanResult, Diagnostics, boolean_op};
pub use classify::Classification;
pub use errors::{BooleanError, ValidationError};
pub use float_types::{Real, Tolerance};
pub use holes::{Boundary, resolve_holes};
pub use plane::Plane;
pub use polygon::Polygon;
pub use solid::Solid;
pub use traits::CSGOps;
pub use vertex::Vertex;
