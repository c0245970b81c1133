use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// View-to-view animation parameters.
pub struct AnimationOptions {
    /// Number of frame ticks used to reach a target view.
    #[schemars(title = "Steps", range(min = 1, max = 200))]
    pub steps: u32,
    /// Hide hydrogens, sidechains and waters while a large structure moves.
    #[schemars(title = "Suppress Detail While Moving")]
    pub suppress_detail: bool,
    /// Residue count above which a structure counts as large.
    #[schemars(skip)]
    pub detail_residue_threshold: usize,
    /// Slab depth above which a large structure shows too much detail.
    #[schemars(skip)]
    pub detail_depth_threshold: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            steps: 25,
            suppress_detail: true,
            detail_residue_threshold: 100,
            detail_depth_threshold: 15.0,
        }
    }
}
