use glam::Vec3;

/// A decoded atom record, one per ATOM/HETATM line in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Cartesian position.
    pub position: Vec3,
    /// Chain identifier (may be empty).
    pub chain: String,
    /// Residue sequence label including any insertion code.
    pub res_num: String,
    /// Residue type name, e.g. `ALA`.
    pub res_type: String,
    /// Atom name, e.g. `CA`.
    pub name: String,
    /// Element symbol (may be empty; derived from the name then).
    pub element: String,
    /// Alternate-location code (empty for full occupancy).
    pub alt: String,
}

/// Coarse residue classification derived from the residue-name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResidueClass {
    /// Amino acid.
    Protein,
    /// DNA or RNA nucleotide.
    NucleicAcid,
    /// Water molecule.
    Water,
    /// Anything else (ligands, ions, cofactors).
    #[default]
    Ligand,
}

impl ResidueClass {
    /// Protein or nucleic acid.
    #[must_use]
    pub fn is_polymer(self) -> bool {
        matches!(self, Self::Protein | Self::NucleicAcid)
    }
}

/// An atom of the structure.
///
/// `index` is the stable handle every other entity (residues, bonds,
/// ribbons, labels) uses to refer to this atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Position in the live (transformed) frame.
    pub pos: Vec3,
    /// Atom name, e.g. `CA`.
    pub name: String,
    /// Element symbol.
    pub element: String,
    /// Residue type name.
    pub res_type: String,
    /// Residue sequence label.
    pub res_num: String,
    /// Chain identifier.
    pub chain: String,
    /// Alternate-location code.
    pub alt: String,
    /// Human readable label, `A:12 - ALA - CA`.
    pub label: String,
    /// Index of the chain in first-seen order; `None` for non-polymers.
    pub chain_index: Option<usize>,
    /// Index into the structure's atom list.
    pub index: usize,
    /// Owning residue index.
    pub residue: usize,
    /// Classification of the owning residue.
    pub class: ResidueClass,
    /// Whether the owning residue has a complete backbone.
    pub backbone_complete: bool,
    /// Whether this atom is one of its residue's backbone atoms.
    pub is_backbone: bool,
}

impl Atom {
    /// Depth used for back-to-front ordering.
    #[must_use]
    pub fn z(&self) -> f32 {
        self.pos.z
    }

    /// Whether this atom is a hydrogen.
    #[must_use]
    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }

    /// Whether the owning residue is a protein or nucleic acid.
    #[must_use]
    pub fn is_polymer(&self) -> bool {
        self.class.is_polymer()
    }

    /// Whether the owning residue is water.
    #[must_use]
    pub fn is_water(&self) -> bool {
        self.class == ResidueClass::Water
    }

    /// Whether the owning residue is a ligand.
    #[must_use]
    pub fn is_ligand(&self) -> bool {
        self.class == ResidueClass::Ligand
    }
}

/// Remove the first run of digits from `text`.
pub(crate) fn strip_first_digits(text: &str) -> String {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return text.to_owned();
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |n| start + n);
    format!("{}{}", &text[..start], &text[end..])
}

/// Resolve the element symbol of a record, falling back to the first
/// letter of the atom name when the element column is blank.
pub(crate) fn resolve_element(element: &str, name: &str) -> String {
    let element = strip_first_digits(element.trim());
    if !element.is_empty() {
        return element;
    }
    strip_first_digits(name.trim())
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_default()
}

/// Residue id: `chain:resnum`, or just `resnum` without a chain.
pub(crate) fn residue_id(chain: &str, res_num: &str) -> String {
    if chain.is_empty() {
        res_num.to_owned()
    } else {
        format!("{chain}:{res_num}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_first_digit_run() {
        assert_eq!(strip_first_digits("1HB2"), "HB2");
        assert_eq!(strip_first_digits("C12"), "C");
        assert_eq!(strip_first_digits("CA"), "CA");
    }

    #[test]
    fn element_falls_back_to_name() {
        assert_eq!(resolve_element("", "1HB"), "H");
        assert_eq!(resolve_element(" ", "CA"), "C");
        assert_eq!(resolve_element("FE", "FE"), "FE");
        assert_eq!(resolve_element("", ""), "");
    }

    #[test]
    fn residue_id_includes_chain_when_present() {
        assert_eq!(residue_id("A", "12"), "A:12");
        assert_eq!(residue_id("", "12"), "12");
    }
}
