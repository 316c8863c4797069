//! Side channel for per-fragment problems met during a boolean operation

use crate::classify::Classification;
use crate::float_types::Real;
use nalgebra::Point3;
use std::fmt;

/// Which input a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    A,
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => f.write_str("A"),
            Operand::B => f.write_str("B"),
        }
    }
}

/// A fragment whose classification was ambiguous and was replaced by a
/// default.
#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    pub operand: Operand,
    /// Index of the fragment in its operand's split polygon list
    pub fragment: usize,
    pub centroid: Point3<Real>,
    /// Label actually used for assembly
    pub fallback: Classification,
}

/// Everything a boolean operation recovered from instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub anomalies: Vec<Anomaly>,
    /// Polygons actually cut by a plane
    pub cuts: usize,
    /// Cuts refused because the cut segment missed the cutting polygon
    pub cuts_rejected: usize,
    /// Degenerate fragment chains dropped while cutting
    pub fragments_dropped: usize,
}

impl Diagnostics {
    /// `true` when no fragment needed a fallback classification.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}
