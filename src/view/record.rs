//! Persisted (JSON) form of a view.

use serde::{Deserialize, Deserializer, Serialize};

use super::show::ShowOptions;
use super::{Distance, Label};
use crate::error::VantageError;

/// Format version written into every record.
pub const VIEW_RECORD_VERSION: u32 = 2;

const fn record_version() -> u32 {
    VIEW_RECORD_VERSION
}

const fn no_atom() -> i64 {
    -1
}

/// Older records store an empty string when nothing is selected.
fn selected_list<'de, D>(deserializer: D) -> Result<Vec<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Selected {
        List(Vec<usize>),
        Text(String),
    }
    Ok(match Selected::deserialize(deserializer)? {
        Selected::List(list) => list,
        Selected::Text(text) => {
            if !text.is_empty() {
                log::warn!("ignoring non-list residue selection {text:?}");
            }
            Vec::new()
        }
    })
}

/// Near/far clip and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SlabRecord {
    /// Near clip depth.
    pub z_front: f32,
    /// Far clip depth.
    pub z_back: f32,
    /// Slab half-extent.
    pub zoom: f32,
}

/// Absolute camera pose as plain arrays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Slab parameters.
    #[serde(default)]
    pub slab: SlabRecord,
    /// Camera position.
    pub pos: [f32; 3],
    /// Point above the camera.
    pub up: [f32; 3],
    /// Point in front of the camera.
    #[serde(rename = "in")]
    pub forward: [f32; 3],
}

/// One saved view as exchanged with a persistence backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Format version.
    #[serde(default = "record_version")]
    pub version: u32,
    /// View id.
    pub view_id: String,
    /// Creator and timestamp.
    #[serde(default)]
    pub creator: String,
    /// Last-modified timestamp.
    #[serde(default)]
    pub time: String,
    /// Entry id.
    #[serde(default)]
    pub pdb_id: String,
    /// Display order.
    #[serde(default)]
    pub order: usize,
    /// Visibility flags.
    #[serde(default)]
    pub show: ShowOptions,
    /// Free-text annotation.
    #[serde(default)]
    pub text: String,
    /// Residue of interest.
    #[serde(default)]
    pub res_id: String,
    /// Centred atom, `-1` when unset.
    #[serde(default = "no_atom")]
    pub i_atom: i64,
    /// Atom labels.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Selected residue indices.
    #[serde(default, deserialize_with = "selected_list")]
    pub selected: Vec<usize>,
    /// Distance measurements.
    #[serde(default)]
    pub distances: Vec<Distance>,
    /// Absolute camera.
    pub camera: CameraRecord,
}

/// Serialize records as a pretty-printed JSON list.
pub fn records_to_json(records: &[ViewRecord]) -> Result<String, VantageError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| VantageError::ViewParse(e.to_string()))
}

/// Parse a JSON list of records.
pub fn records_from_json(text: &str) -> Result<Vec<ViewRecord>, VantageError> {
    serde_json::from_str(text).map_err(|e| VantageError::ViewParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"[{
        "view_id": "view:000007",
        "selected": "",
        "show": {"ribbon": false, "trace": false, "all_atom": false},
        "camera": {
            "slab": {"z_front": -5.0, "z_back": 5.0, "zoom": 20.0},
            "pos": [0, 0, 0], "up": [0, 1, 0], "in": [0, 0, 1]
        }
    }]"#;

    #[test]
    fn missing_fields_take_defaults() {
        let records = records_from_json(MINIMAL).unwrap();
        let record = &records[0];
        assert_eq!(record.version, VIEW_RECORD_VERSION);
        assert_eq!(record.i_atom, -1);
        assert!(record.selected.is_empty());
        assert!(record.labels.is_empty());
        assert_eq!(record.camera.forward, [0.0, 0.0, 1.0]);
        assert!(!record.show.ribbon);
    }

    #[test]
    fn forward_is_written_as_in() {
        let record = records_from_json(MINIMAL).unwrap().remove(0);
        let json = records_to_json(&[record]).unwrap();
        assert!(json.contains("\"in\""));
        assert!(json.contains("\"version\": 2"));
    }

    #[test]
    fn malformed_json_is_a_view_error() {
        let err = records_from_json("[{\"view_id\": 3}]").unwrap_err();
        assert!(matches!(err, VantageError::ViewParse(_)));
    }
}
