//! Simplified backbone trace: one segment between the representative
//! atoms of each pair of adjacent, matching backbone residues.

use crate::structure::{Atom, Residue};

/// A line segment of the backbone trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSegment {
    /// Representative atom of the earlier residue.
    pub atom1: usize,
    /// Representative atom of the later residue.
    pub atom2: usize,
    /// Depth used for back-to-front ordering.
    pub z: f32,
}

/// Build trace segments, breaking the trace at chain changes and at gaps
/// of `max_gap` or more.
#[must_use]
pub fn build_trace(
    atoms: &[Atom],
    residues: &[Residue],
    max_gap: f32,
) -> Vec<TraceSegment> {
    residues
        .windows(2)
        .filter_map(|pair| {
            let kind = pair[0].backbone()?;
            if pair[1].backbone() != Some(kind) {
                return None;
            }
            let a = pair[0].atom_index(kind.representative())?;
            let b = pair[1].atom_index(kind.representative())?;
            let close = atoms[a].pos.distance(atoms[b].pos) < max_gap;
            (atoms[a].chain == atoms[b].chain && close).then_some(
                TraceSegment {
                    atom1: a,
                    atom2: b,
                    z: 0.0,
                },
            )
        })
        .collect()
}
