//! Centralized model and animation options with TOML preset support.
//!
//! All tunable thresholds (grid cell size, bond cutoffs, ribbon gap guard,
//! animation step budget, zoom floor) and the residue-name lookup tables
//! are consolidated here. Options serialize to/from TOML so a host can ship
//! presets next to its structure files.

mod animation;
mod camera;
mod residues;
mod structure;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use residues::ResidueTables;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use structure::StructureOptions;

use crate::error::VantageError;
use crate::view::ShowOptions;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Bond inference and backbone geometry thresholds.
    pub structure: StructureOptions,
    /// Residue-name classification tables.
    #[schemars(skip)]
    pub residues: ResidueTables,
    /// View-to-view animation parameters.
    pub animation: AnimationOptions,
    /// Camera limits.
    pub camera: CameraOptions,
    /// Visibility flags given to freshly created views.
    pub display: ShowOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VantageError> {
        toml::from_str(content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[animation]
steps = 10
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.animation.steps, 10);
        // Everything else should be default
        assert_eq!(opts.structure.grid_cell_size, 5.0);
        assert_eq!(opts.structure.organic_cutoff, 1.9);
        assert!(opts.residues.is_protein("ALA"));
        assert!(opts.display.ribbon);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[animation]\nsteps = \"many\"\n")
            .unwrap_err();
        assert!(matches!(err, VantageError::OptionsParse(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("structure"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("display"));

        // Lookup tables are data, not UI knobs
        assert!(!props.contains_key("residues"));
    }
}
