use rustc_hash::FxHashMap;

use super::atom::{residue_id, Atom, ResidueClass};
use crate::options::ResidueTables;

/// Which backbone a residue carries, detected from its atom names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackboneKind {
    /// `CA`, `N` and `C` are all present.
    Protein,
    /// `C3'`, `C4'` and `C1'` are all present.
    NucleicAcid,
}

impl BackboneKind {
    /// Atom names that must all be present for a complete backbone.
    #[must_use]
    pub fn required_atoms(self) -> &'static [&'static str] {
        match self {
            Self::Protein => &["CA", "N", "C"],
            Self::NucleicAcid => &["C3'", "C4'", "C1'"],
        }
    }

    /// Atom names that make up the backbone chain of this kind.
    #[must_use]
    pub fn backbone_atoms(self) -> &'static [&'static str] {
        match self {
            Self::Protein => &["N", "CA", "C", "O"],
            Self::NucleicAcid => {
                &["P", "OP1", "OP2", "O5'", "C5'", "C4'", "C3'", "O3'"]
            }
        }
    }

    /// The atom that anchors ribbons, trace and view centering.
    #[must_use]
    pub fn representative(self) -> &'static str {
        match self {
            Self::Protein => "CA",
            Self::NucleicAcid => "C3'",
        }
    }

    /// Own atoms standing in for a missing previous / next neighbour at
    /// chain termini.
    #[must_use]
    pub fn terminal_flanks(self) -> (&'static str, &'static str) {
        match self {
            Self::Protein => ("N", "C"),
            Self::NucleicAcid => ("C5'", "O3'"),
        }
    }

    fn detect(by_name: &FxHashMap<String, usize>) -> Option<Self> {
        [Self::Protein, Self::NucleicAcid].into_iter().find(|kind| {
            kind.required_atoms()
                .iter()
                .all(|name| by_name.contains_key(*name))
        })
    }
}

/// A contiguous group of atoms sharing chain and sequence label.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// `chain:resnum` identifier.
    pub id: String,
    /// Chain identifier.
    pub chain: String,
    /// Sequence label.
    pub num: String,
    /// Residue type name.
    pub res_type: String,
    /// Classification from the residue-name tables.
    pub class: ResidueClass,
    atoms: Vec<usize>,
    by_name: FxHashMap<String, usize>,
    backbone: Option<BackboneKind>,
    representative: usize,
    selected: bool,
}

impl Residue {
    fn new(first: &Atom, tables: &ResidueTables) -> Self {
        let class = if tables.is_water(&first.res_type) {
            ResidueClass::Water
        } else if tables.is_protein(&first.res_type) {
            ResidueClass::Protein
        } else if tables.is_nucleic_acid(&first.res_type) {
            ResidueClass::NucleicAcid
        } else {
            ResidueClass::Ligand
        };
        Self {
            id: residue_id(&first.chain, &first.res_num),
            chain: first.chain.clone(),
            num: first.res_num.clone(),
            res_type: first.res_type.clone(),
            class,
            atoms: Vec::new(),
            by_name: FxHashMap::default(),
            backbone: None,
            representative: first.index,
            selected: false,
        }
    }

    /// Add an atom and recompute the backbone and representative atom.
    ///
    /// The first atom with a given name wins; alternate conformers later in
    /// the file stay members but are not addressable by name.
    pub(crate) fn push_atom(&mut self, name: &str, index: usize) {
        self.atoms.push(index);
        let _ = self.by_name.entry(name.to_owned()).or_insert(index);
        self.backbone = BackboneKind::detect(&self.by_name);
        self.representative = self
            .backbone
            .and_then(|kind| self.atom_index(kind.representative()))
            .unwrap_or(self.atoms[0]);
    }

    /// Member atom indices in file order.
    #[must_use]
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Index of the member atom called `name`.
    #[must_use]
    pub fn atom_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Complete backbone kind, if any.
    #[must_use]
    pub fn backbone(&self) -> Option<BackboneKind> {
        self.backbone
    }

    /// Whether the residue carries a complete backbone.
    #[must_use]
    pub fn is_backbone_complete(&self) -> bool {
        self.backbone.is_some()
    }

    /// Atom used for coarse distance queries and view centering.
    #[must_use]
    pub fn representative(&self) -> usize {
        self.representative
    }

    /// Whether the residue is part of the current selection.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Group atoms into residues in file order and write the derived
/// classification flags back onto every member atom.
pub(crate) fn group_residues(
    atoms: &mut [Atom],
    tables: &ResidueTables,
) -> Vec<Residue> {
    let mut residues: Vec<Residue> = Vec::new();
    let mut current_id = None;
    for atom in atoms.iter() {
        let id = residue_id(&atom.chain, &atom.res_num);
        if current_id.as_ref() != Some(&id) {
            residues.push(Residue::new(atom, tables));
            current_id = Some(id);
        }
        if let Some(residue) = residues.last_mut() {
            residue.push_atom(&atom.name, atom.index);
        }
    }

    for (i_res, residue) in residues.iter().enumerate() {
        let backbone_names =
            residue.backbone.map_or(&[][..], BackboneKind::backbone_atoms);
        for &i in &residue.atoms {
            let atom = &mut atoms[i];
            atom.residue = i_res;
            atom.class = residue.class;
            atom.backbone_complete = residue.backbone.is_some();
            atom.is_backbone = backbone_names.contains(&atom.name.as_str());
        }
    }
    residues
}
