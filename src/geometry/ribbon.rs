//! Ribbon plates: one oriented quad per pair of adjacent backbone residues.
//!
//! Each residue with a complete backbone contributes a *crease*, two points
//! one unit either side of its representative atom, perpendicular to the
//! local chain direction. Consecutive creases are stitched into quads,
//! choosing the corner pairing with the shorter connecting edges so the
//! surface never twists through itself.

use glam::Vec3;

use crate::structure::{Atom, BackboneKind, Residue};

/// Two points straddling a backbone atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crease {
    /// The straddling points.
    pub points: [Vec3; 2],
    /// Representative atom the crease is centred on.
    pub atom: usize,
    /// Residue the crease belongs to.
    pub residue: usize,
    /// Backbone kind of the residue.
    pub kind: BackboneKind,
}

/// A quadrilateral of the ribbon surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonQuad {
    /// Corners in polygon order.
    pub corners: [Vec3; 4],
    /// Representative atoms of the two residues the quad spans.
    pub bond: (usize, usize),
    /// Chain index of the first residue.
    pub chain_index: Option<usize>,
    /// Depth used for back-to-front ordering.
    pub z: f32,
}

impl RibbonQuad {
    /// Total length of the two edges joining one crease to the next.
    #[must_use]
    pub fn connecting_length(&self) -> f32 {
        let [a, b, c, d] = self.corners;
        b.distance(c) + d.distance(a)
    }

    /// Largest corner depth.
    #[must_use]
    pub fn max_z(&self) -> f32 {
        self.corners.iter().map(|p| p.z).fold(f32::MIN, f32::max)
    }
}

/// Crease at `c` given its backbone neighbours `p` (previous) and `q`
/// (next). `None` when the three points are degenerate.
#[must_use]
pub fn flank(c: Vec3, p: Vec3, q: Vec3) -> Option<[Vec3; 2]> {
    let axis1 = p - q;
    let p_to_c = c - p;
    let axis2 = p_to_c - p_to_c.project_onto(axis1);
    let offset = axis1.cross(axis2).try_normalize()?;
    Some([c + offset, c - offset])
}

/// Join two creases, keeping or swapping the far corners so the
/// connecting edges are as short as possible.
#[must_use]
pub fn stitch(a: [Vec3; 2], b: [Vec3; 2]) -> [Vec3; 4] {
    let crossed = a[0].distance(b[1]) + a[1].distance(b[0]);
    let straight = a[0].distance(b[0]) + a[1].distance(b[1]);
    if crossed < straight {
        [a[0], a[1], b[0], b[1]]
    } else {
        [a[0], a[1], b[1], b[0]]
    }
}

fn neighbour(
    residues: &[Residue],
    i: Option<usize>,
    chain: &str,
    kind: BackboneKind,
) -> Option<usize> {
    let residue = residues.get(i?)?;
    if residue.backbone() != Some(kind) || residue.chain != chain {
        return None;
    }
    residue.atom_index(kind.representative())
}

/// One crease per residue that has a complete backbone and at least one
/// backbone neighbour in the same chain. Missing neighbours at chain
/// termini are replaced by the residue's own flanking backbone atoms.
#[must_use]
pub fn build_creases(atoms: &[Atom], residues: &[Residue]) -> Vec<Crease> {
    let mut creases = Vec::new();
    for (j, residue) in residues.iter().enumerate() {
        let Some(kind) = residue.backbone() else {
            continue;
        };
        let Some(center) = residue.atom_index(kind.representative()) else {
            continue;
        };
        let prev = neighbour(residues, j.checked_sub(1), &residue.chain, kind);
        let next = neighbour(residues, Some(j + 1), &residue.chain, kind);
        if prev.is_none() && next.is_none() {
            continue;
        }
        let (head, tail) = kind.terminal_flanks();
        let (Some(p), Some(q)) = (
            prev.or_else(|| residue.atom_index(head)),
            next.or_else(|| residue.atom_index(tail)),
        ) else {
            continue;
        };
        if let Some(points) = flank(atoms[center].pos, atoms[p].pos, atoms[q].pos)
        {
            creases.push(Crease {
                points,
                atom: center,
                residue: j,
                kind,
            });
        }
    }
    creases
}

/// Stitch consecutive creases of adjacent residues into ribbon quads,
/// skipping chain changes and gaps of `max_gap` or more.
#[must_use]
pub fn build_ribbons(
    atoms: &[Atom],
    residues: &[Residue],
    max_gap: f32,
) -> Vec<RibbonQuad> {
    let creases = build_creases(atoms, residues);
    creases
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            if b.residue != a.residue + 1 || a.kind != b.kind {
                return None;
            }
            if atoms[a.atom].chain != atoms[b.atom].chain {
                return None;
            }
            if a.points[0].distance(b.points[1]) >= max_gap {
                return None;
            }
            Some(RibbonQuad {
                corners: stitch(a.points, b.points),
                bond: (a.atom, b.atom),
                chain_index: atoms[a.atom].chain_index,
                z: 0.0,
            })
        })
        .collect()
}
