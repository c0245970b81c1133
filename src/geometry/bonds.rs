//! Distance-based bond inference.
//!
//! Candidate pairs come from the [`SpatialGrid`]; each is accepted when
//! the atoms are closer than the cutoff for their element class and they
//! are not mutually exclusive alternate conformers.

use super::grid::SpatialGrid;
use crate::options::StructureOptions;
use crate::structure::Atom;

/// Elements that bond within the organic cutoff.
const ORGANIC_ELEMENTS: [&str; 6] = ["C", "H", "O", "N", "P", "S"];

/// A covalent bond between two atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Lower atom index.
    pub atom1: usize,
    /// Higher atom index.
    pub atom2: usize,
    /// Chain index of the second atom (used to group bonds by chain).
    pub chain_index: Option<usize>,
    /// Depth used for back-to-front ordering.
    pub z: f32,
}

/// Element class of an atom pair, which selects the bond cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondClass {
    /// Either atom is a hydrogen.
    Hydrogen,
    /// Both atoms are among C, H, O, N, P, S.
    Organic,
    /// Any other pairing.
    Other,
}

impl BondClass {
    /// Classify a pair of element symbols.
    #[must_use]
    pub fn of(element1: &str, element2: &str) -> Self {
        if element1 == "H" || element2 == "H" {
            Self::Hydrogen
        } else if ORGANIC_ELEMENTS.contains(&element1)
            && ORGANIC_ELEMENTS.contains(&element2)
        {
            Self::Organic
        } else {
            Self::Other
        }
    }

    /// Maximum bond length for this class.
    #[must_use]
    pub fn cutoff(self, options: &StructureOptions) -> f32 {
        match self {
            Self::Hydrogen => options.hydrogen_cutoff,
            Self::Organic => options.organic_cutoff,
            Self::Other => options.other_cutoff,
        }
    }
}

/// Alternate conformers with different non-empty codes never coexist.
#[must_use]
pub fn compatible_alt(alt1: &str, alt2: &str) -> bool {
    alt1.is_empty() || alt2.is_empty() || alt1 == alt2
}

/// Whether two atoms are bonded under `options`.
#[must_use]
pub fn is_bonded(a: &Atom, b: &Atom, options: &StructureOptions) -> bool {
    if !compatible_alt(&a.alt, &b.alt) {
        return false;
    }
    let cutoff = BondClass::of(&a.element, &b.element).cutoff(options);
    a.pos.distance(b.pos) <= cutoff
}

/// Infer all bonded pairs `(i, j)` with `i < j`.
#[must_use]
pub fn bonded_pairs(
    atoms: &[Atom],
    options: &StructureOptions,
) -> Vec<(usize, usize)> {
    let positions: Vec<_> = atoms.iter().map(|a| a.pos).collect();
    let grid = SpatialGrid::new(
        &positions,
        options.grid_cell_size.max(options.max_cutoff()),
        options.grid_padding,
    );
    grid.close_pairs()
        .into_iter()
        .filter(|&(i, j)| is_bonded(&atoms[i], &atoms[j], options))
        .collect()
}

/// Build bond records for the inferred pairs.
pub(crate) fn infer_bonds(
    atoms: &[Atom],
    options: &StructureOptions,
) -> Vec<Bond> {
    bonded_pairs(atoms, options)
        .into_iter()
        .map(|(i, j)| Bond {
            atom1: i,
            atom2: j,
            chain_index: atoms[j].chain_index,
            z: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::structure::test_support::atom;

    fn pair(e1: &str, e2: &str, distance: f32) -> Vec<Atom> {
        vec![
            atom(0, e1, Vec3::ZERO),
            atom(1, e2, Vec3::new(distance, 0.0, 0.0)),
        ]
    }

    #[test]
    fn carbon_pair_uses_organic_cutoff() {
        let options = StructureOptions::default();
        assert_eq!(bonded_pairs(&pair("C", "C", 1.5), &options), vec![(0, 1)]);
        assert!(bonded_pairs(&pair("C", "C", 2.1), &options).is_empty());
    }

    #[test]
    fn hydrogen_uses_small_cutoff() {
        let options = StructureOptions::default();
        assert_eq!(bonded_pairs(&pair("H", "C", 1.1), &options), vec![(0, 1)]);
        assert!(bonded_pairs(&pair("H", "C", 1.3), &options).is_empty());
    }

    #[test]
    fn metals_use_large_cutoff() {
        let options = StructureOptions::default();
        assert_eq!(BondClass::of("FE", "N"), BondClass::Other);
        assert_eq!(bonded_pairs(&pair("FE", "N", 2.2), &options), vec![(0, 1)]);
        assert!(bonded_pairs(&pair("FE", "N", 2.5), &options).is_empty());
    }

    #[test]
    fn differing_alternate_locations_never_bond() {
        let options = StructureOptions::default();
        let mut atoms = pair("C", "C", 1.5);
        atoms[0].alt = "A".to_owned();
        atoms[1].alt = "B".to_owned();
        assert!(bonded_pairs(&atoms, &options).is_empty());

        atoms[1].alt = "A".to_owned();
        assert_eq!(bonded_pairs(&atoms, &options).len(), 1);

        atoms[1].alt = String::new();
        assert_eq!(bonded_pairs(&atoms, &options).len(), 1);
    }

    #[test]
    fn matches_brute_force_on_random_cloud() {
        let options = StructureOptions::default();
        let mut rng = StdRng::seed_from_u64(42);
        let elements = ["C", "N", "O", "H", "S", "FE"];
        let atoms: Vec<Atom> = (0..500)
            .map(|i| {
                let mut a = atom(
                    i,
                    elements[rng.random_range(0..elements.len())],
                    Vec3::new(
                        rng.random_range(0.0..15.0),
                        rng.random_range(0.0..15.0),
                        rng.random_range(0.0..15.0),
                    ),
                );
                if rng.random_bool(0.1) {
                    a.alt = if rng.random_bool(0.5) { "A" } else { "B" }.to_owned();
                }
                a
            })
            .collect();

        let mut expected = Vec::new();
        for i in 0..atoms.len() {
            for j in (i + 1)..atoms.len() {
                if is_bonded(&atoms[i], &atoms[j], &options) {
                    expected.push((i, j));
                }
            }
        }
        let mut found = bonded_pairs(&atoms, &options);
        found.sort_unstable();
        assert_eq!(found, expected);
    }
}
