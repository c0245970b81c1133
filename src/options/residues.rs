use serde::{Deserialize, Serialize};

/// Residue-name lookup tables used to classify residues.
///
/// DNA and RNA tables share the bare single-letter names
/// (`A`, `T`, `G`, `C`) used by older PDB files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResidueTables {
    /// Amino acid residue names.
    pub protein: Vec<String>,
    /// Deoxyribonucleotide residue names.
    pub dna: Vec<String>,
    /// Ribonucleotide residue names.
    pub rna: Vec<String>,
    /// Water residue names.
    pub water: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|&s| s.to_owned()).collect()
}

fn contains(table: &[String], name: &str) -> bool {
    table.iter().any(|n| n == name)
}

impl ResidueTables {
    /// Whether `name` is an amino acid.
    #[must_use]
    pub fn is_protein(&self, name: &str) -> bool {
        contains(&self.protein, name)
    }

    /// Whether `name` is a DNA or RNA nucleotide.
    #[must_use]
    pub fn is_nucleic_acid(&self, name: &str) -> bool {
        contains(&self.dna, name) || contains(&self.rna, name)
    }

    /// Whether `name` belongs to any polymer table.
    #[must_use]
    pub fn is_polymer(&self, name: &str) -> bool {
        self.is_protein(name) || self.is_nucleic_acid(name)
    }

    /// Whether `name` is a water molecule.
    #[must_use]
    pub fn is_water(&self, name: &str) -> bool {
        contains(&self.water, name)
    }
}

impl Default for ResidueTables {
    fn default() -> Self {
        Self {
            protein: owned(&[
                "ALA", "CYS", "ASP", "GLU", "PHE", "GLY", "HIS", "ILE", "LYS",
                "LEU", "MET", "ASN", "PRO", "GLN", "ARG", "SER", "THR", "TRP",
                "VAL", "TYR",
            ]),
            dna: owned(&["DA", "DT", "DG", "DC", "A", "T", "G", "C"]),
            rna: owned(&["RA", "RU", "RC", "RG", "A", "T", "G", "C", "U"]),
            water: owned(&["HOH"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_classify() {
        let tables = ResidueTables::default();
        assert!(tables.is_protein("TRP"));
        assert!(!tables.is_protein("HOH"));
        assert!(tables.is_nucleic_acid("DA"));
        assert!(tables.is_nucleic_acid("U"));
        assert!(tables.is_polymer("GLY"));
        assert!(tables.is_water("HOH"));
        assert!(!tables.is_polymer("HEM"));
    }
}
