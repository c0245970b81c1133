use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Structure", inline)]
#[serde(default)]
/// Thresholds used while deriving bonds, ribbons and the backbone trace.
pub struct StructureOptions {
    /// Edge length of a spatial-grid cell. Must exceed every bond cutoff.
    #[schemars(title = "Grid Cell Size", range(min = 2.5, max = 10.0))]
    pub grid_cell_size: f32,
    /// Margin added around the bounding box before bucketing atoms.
    #[schemars(skip)]
    pub grid_padding: f32,
    /// Bond cutoff when either atom is a hydrogen.
    #[schemars(title = "Hydrogen Cutoff", range(min = 0.5, max = 2.0))]
    pub hydrogen_cutoff: f32,
    /// Bond cutoff when both atoms are among C, H, O, N, P, S.
    #[schemars(title = "Organic Cutoff", range(min = 1.0, max = 2.5))]
    pub organic_cutoff: f32,
    /// Bond cutoff for every other element pairing (metals, halogens).
    #[schemars(title = "Other Cutoff", range(min = 1.0, max = 3.0))]
    pub other_cutoff: f32,
    /// Representative-atom gap above which ribbons and trace are broken.
    #[schemars(title = "Backbone Gap", range(min = 4.0, max = 12.0))]
    pub backbone_gap: f32,
}

impl StructureOptions {
    /// Largest bond cutoff of the three element classes.
    #[must_use]
    pub fn max_cutoff(&self) -> f32 {
        self.hydrogen_cutoff
            .max(self.organic_cutoff)
            .max(self.other_cutoff)
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            grid_cell_size: 5.0,
            grid_padding: 0.05,
            hydrogen_cutoff: 1.2,
            organic_cutoff: 1.9,
            other_cutoff: 2.4,
            backbone_gap: 8.0,
        }
    }
}
