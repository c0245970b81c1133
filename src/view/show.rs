use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the polymer backbone is drawn. Exactly one mode is active at a time.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BackboneMode {
    /// Every backbone atom and bond.
    AllAtom,
    /// One segment per residue pair.
    Trace,
    /// Ribbon plates.
    Ribbon,
}

/// A single visibility flag, for generic get/set/toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFlag {
    /// Amino acid sidechains.
    Sidechain,
    /// Hydrogen atoms.
    Hydrogen,
    /// Water molecules.
    Water,
    /// Ligands and ions.
    Ligands,
    /// Backbone trace.
    Trace,
    /// All-atom backbone.
    AllAtom,
    /// Ribbon backbone.
    Ribbon,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[schemars(title = "Show", inline)]
#[serde(default)]
/// Per-element visibility flags carried by every view.
pub struct ShowOptions {
    /// Whether to draw sidechains.
    #[schemars(title = "Sidechains")]
    pub sidechain: bool,
    /// Whether to draw hydrogens.
    #[schemars(title = "Hydrogens")]
    pub hydrogen: bool,
    /// Whether to draw waters.
    #[schemars(title = "Waters")]
    pub water: bool,
    /// Whether to draw ligands.
    #[schemars(title = "Ligands")]
    pub ligands: bool,
    /// Backbone drawn as a trace.
    #[schemars(title = "Trace")]
    pub trace: bool,
    /// Backbone drawn atom by atom.
    #[schemars(title = "All Atom")]
    pub all_atom: bool,
    /// Backbone drawn as ribbons.
    #[schemars(title = "Ribbon")]
    pub ribbon: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            sidechain: true,
            hydrogen: false,
            water: false,
            ligands: true,
            trace: false,
            all_atom: false,
            ribbon: true,
        }
    }
}

impl ShowOptions {
    /// Current value of `flag`.
    #[must_use]
    pub fn get(&self, flag: ShowFlag) -> bool {
        match flag {
            ShowFlag::Sidechain => self.sidechain,
            ShowFlag::Hydrogen => self.hydrogen,
            ShowFlag::Water => self.water,
            ShowFlag::Ligands => self.ligands,
            ShowFlag::Trace => self.trace,
            ShowFlag::AllAtom => self.all_atom,
            ShowFlag::Ribbon => self.ribbon,
        }
    }

    /// Set `flag` to `value`.
    pub fn set(&mut self, flag: ShowFlag, value: bool) {
        let slot = match flag {
            ShowFlag::Sidechain => &mut self.sidechain,
            ShowFlag::Hydrogen => &mut self.hydrogen,
            ShowFlag::Water => &mut self.water,
            ShowFlag::Ligands => &mut self.ligands,
            ShowFlag::Trace => &mut self.trace,
            ShowFlag::AllAtom => &mut self.all_atom,
            ShowFlag::Ribbon => &mut self.ribbon,
        };
        *slot = value;
    }

    /// Flip `flag`.
    pub fn toggle(&mut self, flag: ShowFlag) {
        self.set(flag, !self.get(flag));
    }

    /// Active backbone mode, preferring ribbon, then trace, then all-atom
    /// when several flags are set.
    #[must_use]
    pub fn backbone_mode(&self) -> Option<BackboneMode> {
        if self.ribbon {
            Some(BackboneMode::Ribbon)
        } else if self.trace {
            Some(BackboneMode::Trace)
        } else if self.all_atom {
            Some(BackboneMode::AllAtom)
        } else {
            None
        }
    }

    /// Switch to `mode`, clearing the other backbone flags.
    pub fn set_backbone_mode(&mut self, mode: BackboneMode) {
        self.all_atom = mode == BackboneMode::AllAtom;
        self.trace = mode == BackboneMode::Trace;
        self.ribbon = mode == BackboneMode::Ribbon;
    }

    /// Fall back to ribbons if no backbone mode is selected.
    pub fn ensure_backbone_mode(&mut self) {
        if self.backbone_mode().is_none() {
            self.ribbon = true;
        }
    }

    /// Hide the atom-level detail that is expensive to redraw every frame.
    pub(crate) fn hide_detail(&mut self) {
        self.hydrogen = false;
        self.sidechain = false;
        self.water = false;
    }
}
