// Re-export parry for the f64 build
pub use parry3d_f64 as parry3d;

// Our Real scalar type:
pub type Real = f64;

use crate::errors::BooleanError;
use core::str::FromStr;
use std::sync::OnceLock;

/// Default geometric tolerance used for plane, edge and ray tests.
pub const DEFAULT_GEOMETRIC_TOLERANCE: Real = 1e-8;

/// Default epsilon for per-vertex side tests while splitting.
/// Splitting needs finer precision than classification.
pub const DEFAULT_SPLIT_EPSILON: Real = 1e-10;

/// Ratio between the split epsilon and the geometric tolerance when only the
/// latter is given.
const SPLIT_RATIO: Real = DEFAULT_SPLIT_EPSILON / DEFAULT_GEOMETRIC_TOLERANCE;

/// Lazily-initialized default tolerance used by [`Tolerance::default`].
/// It can be overridden:
///  1) **Build-time**: set env var `POLYSOLID_TOLERANCE` (e.g. `POLYSOLID_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_default_tolerance`] once before running any boolean
static TOLERANCE_CELL: OnceLock<Tolerance> = OnceLock::new();

/// The single tolerance threaded through every primitive of one boolean
/// operation.
///
/// `geometric` governs coincidence in the plane, edge and ray intersectors and
/// in the classifier. `split` is the tighter epsilon used when deciding on
/// which side of a cutting plane each vertex lies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub geometric: Real,
    pub split: Real,
}

impl Tolerance {
    /// Build a tolerance from a geometric value; the split epsilon is derived
    /// from it with the default ratio.
    pub fn new(geometric: Real) -> Result<Self, BooleanError> {
        Self::with_split(geometric, geometric * SPLIT_RATIO)
    }

    /// Build a tolerance with an explicit split epsilon.
    ///
    /// ## Errors
    /// Both values must be finite and strictly positive, and `split` must not
    /// exceed `geometric`.
    pub fn with_split(geometric: Real, split: Real) -> Result<Self, BooleanError> {
        if !geometric.is_finite() || geometric <= 0.0 {
            return Err(BooleanError::InvalidTolerance(geometric));
        }
        if !split.is_finite() || split <= 0.0 {
            return Err(BooleanError::InvalidTolerance(split));
        }
        if split > geometric {
            return Err(BooleanError::SplitExceedsGeometric { split, geometric });
        }
        Ok(Tolerance { geometric, split })
    }

    /// `true` if `value` is zero within the geometric tolerance.
    #[inline]
    pub fn is_zero(&self, value: Real) -> bool {
        value.abs() < self.geometric
    }

    /// Squared geometric tolerance, for comparisons against squared lengths.
    #[inline]
    pub const fn squared(&self) -> Real {
        self.geometric * self.geometric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        *TOLERANCE_CELL.get_or_init(|| {
            // Compile-time env if provided
            if let Some(environment_variable) = option_env!("POLYSOLID_TOLERANCE") {
                if let Ok(value) = Real::from_str(environment_variable) {
                    if let Ok(tolerance) = Tolerance::new(value.max(Real::EPSILON)) {
                        return tolerance;
                    }
                }
            }
            Tolerance {
                geometric: DEFAULT_GEOMETRIC_TOLERANCE,
                split: DEFAULT_SPLIT_EPSILON,
            }
        })
    }
}

/// Set the process-wide default tolerance once (subsequent calls are ignored).
/// Call near program start: `polysolid::float_types::set_default_tolerance(tol);`
pub fn set_default_tolerance(tolerance: Tolerance) {
    let _ = TOLERANCE_CELL.set(tolerance);
}
