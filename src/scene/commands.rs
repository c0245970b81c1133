//! Interactive operations on a scene: world rotation, zoom, navigation
//! between residues and saved views, annotations, selection and display
//! flags. Every mutating command marks the scene dirty.

use glam::Affine3A;

use super::Scene;
use crate::view::{BackboneMode, Distance, Label, ShowFlag};

/// Annotation given to freshly saved views.
pub const NEW_VIEW_TEXT: &str = "Click edit to change this text.";

/// Creator tag stored on a saved view, `~ user @time`, or
/// `~ [public] @time` for anonymous users.
#[must_use]
pub fn creator_tag(user: Option<&str>, time: &str) -> String {
    match user.filter(|u| !u.is_empty()) {
        Some(user) => format!("~ {user} @{time}"),
        None => format!("~ [public] @{time}"),
    }
}

impl Scene {
    // -- Camera --

    /// Rotate the world about the x axis, then the y axis (radians).
    pub fn rotate_xy(&mut self, x_angle: f32, y_angle: f32) {
        let m = Affine3A::from_rotation_x(x_angle)
            * Affine3A::from_rotation_y(y_angle);
        self.transform(&m);
    }

    /// Rotate the world about the viewing axis (radians).
    pub fn rotate_z(&mut self, z_angle: f32) {
        self.transform(&Affine3A::from_rotation_z(z_angle));
    }

    /// Change the zoom by `zoom_diff`, never going below the configured
    /// minimum.
    pub fn adjust_zoom(&mut self, zoom_diff: f32) {
        let zoom_min = self.options.camera.zoom_min;
        let camera = &mut self.current.camera;
        camera.zoom = (camera.zoom + zoom_diff).max(zoom_min);
        self.invalidate();
    }

    /// Whether depth `z` is inside the current camera's slab.
    #[must_use]
    pub fn is_visible_z(&self, z: f32) -> bool {
        self.current
            .camera
            .is_visible_z(z, self.options.camera.atom_radius)
    }

    /// Refresh the current view's absolute camera.
    pub fn calculate_current_abs_camera(&mut self) {
        let mut view = std::mem::take(&mut self.current);
        self.calculate_abs_camera(&mut view);
        self.current = view;
    }

    // -- Navigation --

    /// Animate to the saved view with `id`.
    pub fn set_target_view_by_id(&mut self, id: &str) -> bool {
        let Some(i) = self.saved_view_index(id) else {
            log::warn!("no saved view {id}");
            return false;
        };
        self.last_view = i;
        let mut view = self.saved[i].clone();
        self.restore_camera_from_abs_camera(&mut view);
        self.saved[i].camera = view.camera;
        self.set_target_view(&view);
        true
    }

    fn target_centred_on(&mut self, res_id: String, i_atom: usize) {
        let pos = self.structure.atoms()[i_atom].pos;
        let mut view = self.current.clone();
        view.res_id = res_id;
        view.i_atom = Some(i_atom);
        view.camera.transform(&Affine3A::from_translation(pos));
        self.set_target_view(&view);
    }

    /// Animate to centre the representative atom of residue `res_id`.
    pub fn set_target_view_by_res_id(&mut self, res_id: &str) -> bool {
        let Some(i_atom) = self
            .structure
            .residue_index(res_id)
            .and_then(|i| self.structure.representative_atom(i))
            .map(|atom| atom.index)
        else {
            return false;
        };
        self.target_centred_on(res_id.to_owned(), i_atom);
        true
    }

    /// Animate to centre atom `i_atom`.
    pub fn set_target_view_by_atom(&mut self, i_atom: usize) -> bool {
        let Some(atom) = self.structure.atoms().get(i_atom) else {
            return false;
        };
        let res_id = self.structure.residues()[atom.residue].id.clone();
        self.target_centred_on(res_id, i_atom);
        true
    }

    /// Residue the user is heading to: the target's while animating, the
    /// current view's otherwise.
    fn focus_res_id(&self) -> &str {
        self.target
            .as_ref()
            .map_or(&self.current.res_id, |target| &target.res_id)
    }

    /// Animate to the residue before the focused one (wrapping).
    pub fn set_target_prev_residue(&mut self) -> bool {
        let Some(res_id) = self
            .structure
            .prev_residue_id(self.focus_res_id())
            .map(str::to_owned)
        else {
            return false;
        };
        self.set_target_view_by_res_id(&res_id)
    }

    /// Animate to the residue after the focused one (wrapping).
    pub fn set_target_next_residue(&mut self) -> bool {
        let Some(res_id) = self
            .structure
            .next_residue_id(self.focus_res_id())
            .map(str::to_owned)
        else {
            return false;
        };
        self.set_target_view_by_res_id(&res_id)
    }

    /// Animate to the saved view before the last visited one (wrapping).
    /// Returns its id.
    pub fn set_target_prev_view(&mut self) -> Option<String> {
        let n = self.saved.len();
        let i = if self.last_view == 0 {
            n.checked_sub(1)?
        } else {
            self.last_view - 1
        };
        self.target_saved_view_at(i)
    }

    /// Animate to the saved view after the last visited one (wrapping).
    /// Returns its id.
    pub fn set_target_next_view(&mut self) -> Option<String> {
        let i = if self.last_view + 1 >= self.saved.len() {
            0
        } else {
            self.last_view + 1
        };
        self.target_saved_view_at(i)
    }

    fn target_saved_view_at(&mut self, i: usize) -> Option<String> {
        let id = self.saved.get(i)?.id.clone();
        self.set_target_view_by_id(&id).then_some(id)
    }

    // -- Saved views --

    /// Save a copy of the current view under `new_id`, right after the last
    /// visited view. Returns its position.
    pub fn save_current_view(
        &mut self,
        new_id: &str,
        user: Option<&str>,
        time: &str,
    ) -> Option<usize> {
        let mut view = self.current.clone();
        view.id = new_id.to_owned();
        view.text = NEW_VIEW_TEXT.to_owned();
        view.pdb_id = self.structure.pdb_id().to_owned();
        view.creator = creator_tag(user, time);
        view.time = time.to_owned();
        view.selected = self.structure.selected_residues();
        self.calculate_abs_camera(&mut view);
        self.insert_view(self.last_view + 1, view)
    }

    // -- Annotations --

    /// Pin a label to atom `i_atom`.
    pub fn make_label(&mut self, i_atom: usize, text: &str) -> bool {
        if i_atom >= self.structure.atoms().len() {
            return false;
        }
        self.current.labels.push(Label {
            i_atom,
            text: text.to_owned(),
        });
        self.invalidate();
        true
    }

    /// Remove the `i`-th label.
    pub fn delete_label(&mut self, i: usize) -> bool {
        if i >= self.current.labels.len() {
            return false;
        }
        let _ = self.current.labels.remove(i);
        self.invalidate();
        true
    }

    /// Measure the distance between two atoms.
    pub fn make_distance(&mut self, i_atom1: usize, i_atom2: usize) -> bool {
        let atoms = self.structure.atoms();
        let (Some(a), Some(b)) = (atoms.get(i_atom1), atoms.get(i_atom2)) else {
            return false;
        };
        let z = a.z().max(b.z());
        self.current.distances.push(Distance { i_atom1, i_atom2, z });
        self.invalidate();
        true
    }

    /// Remove the `i`-th distance measurement.
    pub fn delete_distance(&mut self, i: usize) -> bool {
        if i >= self.current.distances.len() {
            return false;
        }
        let _ = self.current.distances.remove(i);
        self.invalidate();
        true
    }

    // -- Selection --

    fn sync_selection(&mut self) {
        self.current.selected = self.structure.selected_residues();
        self.invalidate();
    }

    /// Deselect every residue.
    pub fn clear_selection(&mut self) {
        self.structure.clear_selected();
        self.sync_selection();
    }

    /// Select or deselect residue `i`.
    pub fn select_residue(&mut self, i: usize, selected: bool) -> bool {
        if !self.structure.set_selected(i, selected) {
            return false;
        }
        self.sync_selection();
        true
    }

    /// Select the current residue and every residue in contact with it.
    pub fn select_neighbors(&mut self) -> bool {
        let Some(i_res) = self.structure.residue_index(&self.current.res_id)
        else {
            return false;
        };
        self.structure.select_neighbors(i_res);
        self.sync_selection();
        true
    }

    // -- Display --

    /// Switch the current view's backbone representation.
    pub fn set_backbone_mode(&mut self, mode: BackboneMode) {
        self.current.show.set_backbone_mode(mode);
        self.invalidate();
    }

    /// Set a visibility flag on the current view.
    pub fn set_show_option(&mut self, flag: ShowFlag, value: bool) {
        self.current.show.set(flag, value);
        self.invalidate();
    }

    /// Visibility flag of the current view.
    #[must_use]
    pub fn show_option(&self, flag: ShowFlag) -> bool {
        self.current.show.get(flag)
    }

    /// Flip a visibility flag on the current view.
    pub fn toggle_show_option(&mut self, flag: ShowFlag) {
        self.current.show.toggle(flag);
        self.invalidate();
    }
}
