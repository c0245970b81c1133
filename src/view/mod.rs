//! Named, orderable viewpoints.
//!
//! A [`View`] pairs two cameras, a *relative* one expressed against the
//! live (transformed) frame and an *absolute* one expressed against the
//! structure's original coordinates, with the annotation and visibility
//! state that make up a saved viewpoint. Views own all their data; cloning
//! one never shares lists with the original.

mod record;
mod show;

use serde::{Deserialize, Serialize};

pub use self::record::{
    records_from_json, records_to_json, CameraRecord, SlabRecord, ViewRecord,
    VIEW_RECORD_VERSION,
};
pub use self::show::{BackboneMode, ShowFlag, ShowOptions};
use crate::camera::Camera;

/// Id of the default view created for every structure. Persisted records
/// carrying it are skipped on import.
pub const DEFAULT_VIEW_ID: &str = "view:000000";

/// Text given to the default view.
pub const DEFAULT_VIEW_TEXT: &str = "Default view of PDB file";

/// A text label pinned to an atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Atom the label is attached to.
    pub i_atom: usize,
    /// Label text.
    pub text: String,
}

/// A distance measurement between two atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    /// First atom.
    pub i_atom1: usize,
    /// Second atom.
    pub i_atom2: usize,
    /// Depth of the nearer end, refreshed after every transform.
    #[serde(default)]
    pub z: f32,
}

/// A snapshot of everything needed to reproduce a viewpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Unique id.
    pub id: String,
    /// Entry the view was made for.
    pub pdb_id: String,
    /// Residue of interest.
    pub res_id: String,
    /// Atom the view is centred on.
    pub i_atom: Option<usize>,
    /// Position among the saved views.
    pub order: usize,
    /// Camera in the live frame.
    pub camera: Camera,
    /// Camera in the structure's original frame.
    pub abs_camera: Camera,
    /// Selected residue indices.
    pub selected: Vec<usize>,
    /// Atom labels.
    pub labels: Vec<Label>,
    /// Distance measurements.
    pub distances: Vec<Distance>,
    /// Free-text annotation.
    pub text: String,
    /// Creator and timestamp, e.g. `~ alice @2024-05-01`.
    pub creator: String,
    /// Time the view was last edited.
    pub time: String,
    /// Visibility flags.
    pub show: ShowOptions,
}

impl Default for View {
    fn default() -> Self {
        Self::new(ShowOptions::default())
    }
}

impl View {
    /// A fresh default view with the given visibility flags.
    #[must_use]
    pub fn new(show: ShowOptions) -> Self {
        Self {
            id: DEFAULT_VIEW_ID.to_owned(),
            pdb_id: String::new(),
            res_id: String::new(),
            i_atom: None,
            order: 1,
            camera: Camera::default(),
            abs_camera: Camera::default(),
            selected: Vec::new(),
            labels: Vec::new(),
            distances: Vec::new(),
            text: DEFAULT_VIEW_TEXT.to_owned(),
            creator: String::new(),
            time: String::new(),
            show,
        }
    }

    /// Copy everything except the id, order and cameras from `other`.
    pub fn copy_metadata_from(&mut self, other: &Self) {
        self.res_id.clone_from(&other.res_id);
        self.show = other.show;
        self.labels.clone_from(&other.labels);
        self.distances.clone_from(&other.distances);
        self.text.clone_from(&other.text);
        self.time.clone_from(&other.time);
        self.i_atom = other.i_atom;
        self.selected.clone_from(&other.selected);
    }

    /// Persisted form: absolute camera pose plus the relative camera's slab.
    #[must_use]
    pub fn to_record(&self) -> ViewRecord {
        ViewRecord {
            version: VIEW_RECORD_VERSION,
            view_id: self.id.clone(),
            creator: self.creator.clone(),
            time: self.time.clone(),
            pdb_id: self.pdb_id.clone(),
            order: self.order,
            show: self.show,
            text: self.text.clone(),
            res_id: self.res_id.clone(),
            i_atom: self.i_atom.map_or(-1, |i| i as i64),
            labels: self.labels.clone(),
            selected: self.selected.clone(),
            distances: self.distances.clone(),
            camera: CameraRecord {
                slab: SlabRecord {
                    z_front: self.camera.z_front,
                    z_back: self.camera.z_back,
                    zoom: self.camera.zoom,
                },
                pos: self.abs_camera.pos.to_array(),
                up: self.abs_camera.up.to_array(),
                forward: self.abs_camera.forward.to_array(),
            },
        }
    }

    /// Rebuild a view from its persisted form.
    ///
    /// Only the absolute camera pose is restored; the relative camera keeps
    /// the identity pose until the scene maps it into the live frame. A
    /// record selecting no backbone mode is shown as ribbons.
    #[must_use]
    pub fn from_record(record: ViewRecord) -> Self {
        let slab = record.camera.slab;
        let with_slab = |camera: Camera| Camera {
            zoom: slab.zoom,
            z_front: slab.z_front,
            z_back: slab.z_back,
            ..camera
        };
        let mut show = record.show;
        show.ensure_backbone_mode();
        Self {
            id: record.view_id,
            pdb_id: record.pdb_id,
            res_id: record.res_id,
            i_atom: usize::try_from(record.i_atom).ok(),
            order: record.order,
            camera: with_slab(Camera::default()),
            abs_camera: with_slab(Camera {
                pos: record.camera.pos.into(),
                up: record.camera.up.into(),
                forward: record.camera.forward.into(),
                ..Camera::default()
            }),
            selected: record.selected,
            labels: record.labels,
            distances: record.distances,
            text: record.text,
            creator: record.creator,
            time: record.time,
            show,
        }
    }
}
