//! In-memory structural model: atoms, residues and the geometry derived
//! from them (bonds, ribbon plates, backbone trace).
//!
//! Every cross-reference is an index into the owning collection: residues
//! list atom indices, bonds and ribbons name atom indices, atoms name their
//! residue index. Nothing holds a pointer into another entity, so a
//! `Structure` clones cleanly and positions can be transformed in place.

mod atom;
pub mod pdb;
mod residue;

pub use atom::{Atom, AtomRecord, ResidueClass};
use glam::{Affine3A, Vec3};
pub use residue::{BackboneKind, Residue};
use rustc_hash::FxHashMap;

use self::atom::resolve_element;
use crate::error::VantageError;
use crate::geometry::bonds::{infer_bonds, Bond};
use crate::geometry::ribbon::{build_ribbons, RibbonQuad};
use crate::geometry::trace::{build_trace, TraceSegment};
use crate::options::{Options, ResidueTables};

/// Depth offset added to bonds and trace segments so lines draw over the
/// atoms they join.
const LINE_DEPTH_OFFSET: f32 = 0.2;

/// Representative atoms farther apart than this never count as close
/// residues.
const CLOSE_RESIDUE_SCREEN: f32 = 17.0;

/// Any atom pair closer than this makes two residues neighbours.
const CLOSE_ATOM_DISTANCE: f32 = 4.0;

/// A biomolecule built from decoded atom records.
#[derive(Debug, Clone)]
pub struct Structure {
    pdb_id: String,
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    res_by_id: FxHashMap<String, usize>,
    bonds: Vec<Bond>,
    ribbons: Vec<RibbonQuad>,
    trace: Vec<TraceSegment>,
    max_length: f32,
    min_z: f32,
    max_z: f32,
}

fn make_atoms(records: Vec<AtomRecord>, tables: &ResidueTables) -> Vec<Atom> {
    let mut chains: Vec<String> = Vec::new();
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let chain_index = if tables.is_polymer(&record.res_type) {
                let found = chains.iter().position(|c| *c == record.chain);
                Some(found.unwrap_or_else(|| {
                    chains.push(record.chain.clone());
                    chains.len() - 1
                }))
            } else {
                None
            };
            let mut label = format!(
                "{} - {} - {}",
                record.res_num, record.res_type, record.name
            );
            if !record.chain.is_empty() {
                label = format!("{}:{label}", record.chain);
            }
            Atom {
                pos: record.position,
                element: resolve_element(&record.element, &record.name),
                name: record.name,
                res_type: record.res_type,
                res_num: record.res_num,
                chain: record.chain,
                alt: record.alt,
                label,
                chain_index,
                index,
                residue: 0,
                class: ResidueClass::Ligand,
                backbone_complete: false,
                is_backbone: false,
            }
        })
        .collect()
}

impl Structure {
    /// Build a structure from decoded atom records.
    ///
    /// Groups atoms into residues, classifies them, infers bonds and builds
    /// ribbon plates and the backbone trace.
    pub fn from_records(
        pdb_id: &str,
        records: Vec<AtomRecord>,
        options: &Options,
    ) -> Result<Self, VantageError> {
        if records.is_empty() {
            return Err(VantageError::EmptyStructure);
        }
        let mut atoms = make_atoms(records, &options.residues);
        let residues = residue::group_residues(&mut atoms, &options.residues);

        let mut res_by_id = FxHashMap::default();
        for (i, r) in residues.iter().enumerate() {
            let _ = res_by_id.entry(r.id.clone()).or_insert(i);
        }

        let bonds = infer_bonds(&atoms, &options.structure);
        let gap = options.structure.backbone_gap;
        let ribbons = build_ribbons(&atoms, &residues, gap);
        let trace = build_trace(&atoms, &residues, gap);

        let mut structure = Self {
            pdb_id: pdb_id.to_owned(),
            atoms,
            residues,
            res_by_id,
            bonds,
            ribbons,
            trace,
            max_length: 0.0,
            min_z: 0.0,
            max_z: 0.0,
        };
        structure.max_length = structure.calc_max_length();
        structure.refresh_depths();

        log::debug!(
            "structure {}: {} atoms, {} residues, {} bonds, {} ribbon quads, \
             {} trace segments",
            structure.pdb_id,
            structure.atoms.len(),
            structure.residues.len(),
            structure.bonds.len(),
            structure.ribbons.len(),
            structure.trace.len(),
        );
        Ok(structure)
    }

    /// Decode PDB text and build a structure from its first model.
    pub fn from_pdb(
        pdb_id: &str,
        text: &str,
        options: &Options,
    ) -> Result<Self, VantageError> {
        let records = pdb::parse_atom_records(text)?;
        Self::from_records(pdb_id, records, options)
    }

    // -- Read access --

    /// Identifier of the source entry.
    #[must_use]
    pub fn pdb_id(&self) -> &str {
        &self.pdb_id
    }

    /// All atoms, indexed by [`Atom::index`].
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Residues in file order.
    #[must_use]
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Inferred bonds.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Ribbon plates.
    #[must_use]
    pub fn ribbons(&self) -> &[RibbonQuad] {
        &self.ribbons
    }

    /// Backbone trace segments.
    #[must_use]
    pub fn trace(&self) -> &[TraceSegment] {
        &self.trace
    }

    /// Largest axis-aligned extent of the original coordinates.
    #[must_use]
    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    /// Smallest atom depth in the live frame.
    #[must_use]
    pub fn min_z(&self) -> f32 {
        self.min_z
    }

    /// Largest atom depth in the live frame.
    #[must_use]
    pub fn max_z(&self) -> f32 {
        self.max_z
    }

    // -- Residue lookup --

    /// Position of the residue with `id`, if any.
    #[must_use]
    pub fn residue_index(&self, id: &str) -> Option<usize> {
        self.res_by_id.get(id).copied()
    }

    /// Residue with `id`, if any.
    #[must_use]
    pub fn residue_by_id(&self, id: &str) -> Option<&Residue> {
        self.residue_index(id).map(|i| &self.residues[i])
    }

    /// Id of the residue before `id`, wrapping to the last residue.
    #[must_use]
    pub fn prev_residue_id(&self, id: &str) -> Option<&str> {
        let i = self.residue_index(id)?;
        let prev = if i == 0 { self.residues.len() - 1 } else { i - 1 };
        Some(&self.residues[prev].id)
    }

    /// Id of the residue after `id`, wrapping to the first residue.
    #[must_use]
    pub fn next_residue_id(&self, id: &str) -> Option<&str> {
        let i = self.residue_index(id)?;
        let next = if i + 1 >= self.residues.len() { 0 } else { i + 1 };
        Some(&self.residues[next].id)
    }

    /// Representative atom of a residue.
    #[must_use]
    pub fn representative_atom(&self, i_res: usize) -> Option<&Atom> {
        let residue = self.residues.get(i_res)?;
        self.atoms.get(residue.representative())
    }

    // -- Spatial queries --

    /// Offset that moves the centroid of all atoms to the origin.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        let sum: Vec3 = self.atoms.iter().map(|a| a.pos).sum();
        -sum / self.atoms.len().max(1) as f32
    }

    fn calc_max_length(&self) -> f32 {
        let Some(first) = self.atoms.first() else {
            return 0.0;
        };
        let (lo, hi) = self
            .atoms
            .iter()
            .fold((first.pos, first.pos), |(lo, hi), a| {
                (lo.min(a.pos), hi.max(a.pos))
            });
        (hi - lo).max_element()
    }

    /// Whether any atoms of residues `j` and `k` are in contact.
    #[must_use]
    pub fn are_close_residues(&self, j: usize, k: usize) -> bool {
        let (Some(res_j), Some(res_k)) = (self.residues.get(j), self.residues.get(k))
        else {
            return false;
        };
        let rep_j = self.atoms[res_j.representative()].pos;
        let rep_k = self.atoms[res_k.representative()].pos;
        if rep_j.distance(rep_k) > CLOSE_RESIDUE_SCREEN {
            return false;
        }
        res_j.atoms().iter().any(|&l| {
            res_k.atoms().iter().any(|&m| {
                self.atoms[l].pos.distance(self.atoms[m].pos) < CLOSE_ATOM_DISTANCE
            })
        })
    }

    /// First atom lying within `tolerance` of the origin on every axis,
    /// searching only residues whose representative atom is within
    /// `sqrt(screen_sq)` of the origin.
    #[must_use]
    pub fn atom_at_origin(&self, screen_sq: f32, tolerance: f32) -> Option<usize> {
        self.residues
            .iter()
            .filter(|r| {
                self.atoms[r.representative()].pos.length_squared() <= screen_sq
            })
            .flat_map(Residue::atoms)
            .copied()
            .find(|&i| self.atoms[i].pos.abs().max_element() < tolerance)
    }

    // -- Selection --

    /// Indices of selected residues in order.
    #[must_use]
    pub fn selected_residues(&self) -> Vec<usize> {
        self.residues
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn clear_selected(&mut self) {
        for residue in &mut self.residues {
            residue.set_selected(false);
        }
    }

    /// Returns `false` if `i_res` is out of range.
    pub(crate) fn set_selected(&mut self, i_res: usize, selected: bool) -> bool {
        let Some(residue) = self.residues.get_mut(i_res) else {
            return false;
        };
        residue.set_selected(selected);
        true
    }

    /// Select residue `i_res` and every residue in contact with it.
    pub(crate) fn select_neighbors(&mut self, i_res: usize) {
        if !self.set_selected(i_res, true) {
            return;
        }
        let neighbours: Vec<usize> = (0..self.residues.len())
            .filter(|&j| j != i_res && self.are_close_residues(j, i_res))
            .collect();
        for j in neighbours {
            self.residues[j].set_selected(true);
        }
    }

    // -- Transforms --

    /// Apply a rigid transform to every atom and ribbon corner, then
    /// recompute depth values.
    pub(crate) fn transform(&mut self, m: &Affine3A) {
        for atom in &mut self.atoms {
            atom.pos = m.transform_point3(atom.pos);
        }
        for quad in &mut self.ribbons {
            for corner in &mut quad.corners {
                *corner = m.transform_point3(*corner);
            }
        }
        self.refresh_depths();
    }

    fn refresh_depths(&mut self) {
        let atoms = &self.atoms;
        let line_z = |a: usize, b: usize| {
            atoms[a].z().max(atoms[b].z()) + LINE_DEPTH_OFFSET
        };
        for bond in &mut self.bonds {
            bond.z = line_z(bond.atom1, bond.atom2);
        }
        for segment in &mut self.trace {
            segment.z = line_z(segment.atom1, segment.atom2);
        }
        for quad in &mut self.ribbons {
            quad.z = quad.max_z();
        }
        let (min_z, max_z) = atoms
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), a| (lo.min(a.z()), hi.max(a.z())));
        self.min_z = min_z;
        self.max_z = max_z;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec3;

    use super::{Atom, AtomRecord, ResidueClass};

    /// Bare atom for geometry tests.
    pub(crate) fn atom(index: usize, element: &str, pos: Vec3) -> Atom {
        Atom {
            pos,
            name: element.to_owned(),
            element: element.to_owned(),
            res_type: "LIG".to_owned(),
            res_num: "1".to_owned(),
            chain: "A".to_owned(),
            alt: String::new(),
            label: String::new(),
            chain_index: None,
            index,
            residue: 0,
            class: ResidueClass::Ligand,
            backbone_complete: false,
            is_backbone: false,
        }
    }

    pub(crate) fn record(
        chain: &str,
        res_num: &str,
        res_type: &str,
        name: &str,
        pos: Vec3,
    ) -> AtomRecord {
        AtomRecord {
            position: pos,
            chain: chain.to_owned(),
            res_num: res_num.to_owned(),
            res_type: res_type.to_owned(),
            name: name.to_owned(),
            element: String::new(),
            alt: String::new(),
        }
    }

    /// Residue with N, CA, C, O arranged around `ca`.
    pub(crate) fn amino_acid(chain: &str, num: usize, ca: Vec3) -> Vec<AtomRecord> {
        let num = num.to_string();
        vec![
            record(chain, &num, "ALA", "N", ca + Vec3::new(-1.2, 0.6, 0.4)),
            record(chain, &num, "ALA", "CA", ca),
            record(chain, &num, "ALA", "C", ca + Vec3::new(1.2, 0.5, -0.4)),
            record(chain, &num, "ALA", "O", ca + Vec3::new(1.5, 1.6, -0.6)),
        ]
    }

    /// Alpha carbons of a gently zig-zagging chain, 3.8 apart in x.
    pub(crate) fn ca_position(k: usize) -> Vec3 {
        Vec3::new(3.8 * k as f32, if k % 2 == 0 { 0.0 } else { 1.2 }, 0.0)
    }

    /// A single-chain peptide with `n` complete residues.
    pub(crate) fn peptide(n: usize) -> Vec<AtomRecord> {
        (1..=n).flat_map(|k| amino_acid("A", k, ca_position(k))).collect()
    }
}
