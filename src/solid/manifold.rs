use crate::float_types::Tolerance;
use crate::solid::Solid;
use crate::vertex::PointKey;
use hashbrown::HashMap;
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Solid<S> {
    /// Count how many polygon edges share each undirected segment, keyed by
    /// tolerance-quantized endpoints.
    pub fn edge_counts(&self, tolerance: &Tolerance) -> HashMap<(PointKey, PointKey), u32> {
        let mut edge_counts: HashMap<(PointKey, PointKey), u32> = HashMap::new();
        for poly in &self.polygons {
            for edge in poly.edges() {
                let p0 = PointKey::new(&edge.start.pos, tolerance);
                let p1 = PointKey::new(&edge.end.pos, tolerance);
                if p0 == p1 {
                    continue;
                }
                // Order them so (p0, p1) and (p1, p0) become the same key
                let key = if p0 < p1 { (p0, p1) } else { (p1, p0) };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }
        edge_counts
    }

    /// Checks if the Solid is manifold
    ///
    /// ### Returns
    /// Returns `true` if every edge appears exactly 2 times
    ///
    /// ### Notes:
    /// - Edges are compared whole, so a T-junction left by splitting (an
    ///   edge of one polygon meeting two shorter edges of its neighbours)
    ///   reports the surface as non-manifold.
    pub fn is_manifold(&self, tolerance: &Tolerance) -> bool {
        let counts = self.edge_counts(tolerance);
        !counts.is_empty() && counts.values().all(|&count| count == 2)
    }
}
