use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera limits.
pub struct CameraOptions {
    /// Smallest slab half-extent reachable by zooming in.
    #[schemars(title = "Minimum Zoom", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub zoom_min: f32,
    /// Atom radius used when testing slab visibility.
    #[schemars(skip)]
    pub atom_radius: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            zoom_min: 2.4,
            atom_radius: 0.3,
        }
    }
}
