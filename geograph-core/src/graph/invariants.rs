//! Structural checks for [`ProximityGraph`].
//!
//! The graph maintains two invariants that every mutation must preserve: the
//! stored edge count equals half the number of stored half-edges, and every
//! half-edge has a mirror of identical weight. These checks are cheap enough
//! for tests to run after every mutation.

use crate::error::{GraphError, Result};

use super::ProximityGraph;

impl ProximityGraph {
    /// Runs every structural check.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError::InvariantViolation`] found.
    pub fn validate(&self) -> Result<()> {
        self.check_edge_count()?;
        self.check_mirror_symmetry()
    }

    /// Verifies `edge_count == (Σ |links(v)|) / 2`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvariantViolation`] naming `edge_count` when the
    /// stored count disagrees with the adjacency lists or the half-edge total
    /// is odd.
    pub fn check_edge_count(&self) -> Result<()> {
        let half_edges: usize = self.adjacency.iter().map(Vec::len).sum();
        if half_edges % 2 != 0 || half_edges / 2 != self.edge_count {
            return Err(GraphError::InvariantViolation {
                invariant: "edge_count",
                message: format!(
                    "stored {} edges but adjacency holds {half_edges} half-edges",
                    self.edge_count
                ),
            });
        }
        Ok(())
    }

    /// Verifies that every half-edge `u → v` has a mirror `v → u` with an
    /// identical weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvariantViolation`] naming `mirror_symmetry` for
    /// the first unmatched or dangling half-edge.
    pub fn check_mirror_symmetry(&self) -> Result<()> {
        for (source, links) in self.adjacency.iter().enumerate() {
            for edge in links {
                let Some(back_links) = self.adjacency.get(edge.to()) else {
                    return Err(GraphError::InvariantViolation {
                        invariant: "mirror_symmetry",
                        message: format!(
                            "half-edge {source} -> {} targets a missing vertex",
                            edge.to()
                        ),
                    });
                };
                let forward = links.iter().filter(|other| other.to() == edge.to()).count();
                let mirrored = back_links
                    .iter()
                    .filter(|back| back.to() == source && back.weight() == edge.weight())
                    .count();
                if forward != mirrored {
                    return Err(GraphError::InvariantViolation {
                        invariant: "mirror_symmetry",
                        message: format!(
                            "half-edge {source} -> {} (weight {}) has {mirrored} mirrors for {forward} copies",
                            edge.to(),
                            edge.weight()
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
