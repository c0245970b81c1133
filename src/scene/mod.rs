//! Authoritative scene: the structure, the live view, saved views and the
//! view-to-view animation.
//!
//! The scene never moves its current camera. Interactive rotations and
//! animation steps are applied to the *world* instead: atom positions,
//! every saved view's relative camera, the target camera and the origin
//! camera all receive the same rigid transform. The origin camera starts
//! as the identity pose, so it always records the accumulated world
//! transform and lets any view convert between its relative camera and its
//! frame-independent absolute camera.

mod animation;
mod commands;
mod persistence;

pub use animation::AnimationPhase;
pub use commands::{creator_tag, NEW_VIEW_TEXT};
use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;

use crate::camera::{camera_transform, Camera};
use crate::options::Options;
use crate::structure::Structure;
use crate::view::{ShowOptions, View, DEFAULT_VIEW_ID, DEFAULT_VIEW_TEXT};

/// Residue count above which a new structure starts with sidechains hidden.
const SIDECHAIN_RESIDUE_LIMIT: usize = 100;

/// A structure together with its views and animation state.
#[derive(Debug, Clone)]
pub struct Scene {
    structure: Structure,
    options: Options,
    current: View,
    target: Option<View>,
    origin: Camera,
    saved: Vec<View>,
    saved_index: FxHashMap<String, usize>,
    /// Remaining animation steps; `None` when idle.
    countdown: Option<u32>,
    last_view: usize,
    saved_show: Option<ShowOptions>,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Build a scene around `structure`, centring it at the origin and
    /// saving a default view at order 0.
    #[must_use]
    pub fn new(structure: Structure, options: Options) -> Self {
        let show = options.display;
        let mut scene = Self {
            structure,
            options,
            current: View::new(show),
            target: None,
            origin: Camera::default(),
            saved: Vec::new(),
            saved_index: FxHashMap::default(),
            countdown: None,
            last_view: 0,
            saved_show: None,
            generation: 0,
            rendered_generation: 0,
        };
        scene.make_default_view();
        log::info!(
            "scene for {}: {} residues, default zoom {:.1}",
            scene.structure.pdb_id(),
            scene.structure.residues().len(),
            scene.current.camera.zoom,
        );
        scene
    }

    fn make_default_view(&mut self) {
        self.translate(self.structure.center());

        let mut view = View::new(self.options.display);
        if let Some(first) = self.structure.residues().first() {
            view.res_id.clone_from(&first.id);
        }
        view.camera.z_front = self.structure.min_z();
        view.camera.z_back = self.structure.max_z();
        view.camera.zoom = (2.0 * self.structure.max_length()).abs();
        self.calculate_abs_camera(&mut view);
        if self.structure.residues().len() > SIDECHAIN_RESIDUE_LIMIT {
            view.show.sidechain = false;
        }
        self.current = view;

        let mut default_view = self.current.clone();
        default_view.id = DEFAULT_VIEW_ID.to_owned();
        default_view.order = 0;
        default_view.text = DEFAULT_VIEW_TEXT.to_owned();
        default_view.pdb_id = self.structure.pdb_id().to_owned();
        self.saved.clear();
        self.saved.push(default_view);
        self.reindex();
    }

    // -- Dirty tracking --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Force the scene dirty (e.g. when a host-side overlay changed).
    pub fn force_dirty(&mut self) {
        self.invalidate();
    }

    /// Mark current generation as rendered (call after redrawing).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Read access --

    /// The structure in the live frame.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Options the scene was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The live view.
    #[must_use]
    pub fn current_view(&self) -> &View {
        &self.current
    }

    /// View being animated toward, if any.
    #[must_use]
    pub fn target_view(&self) -> Option<&View> {
        self.target.as_ref()
    }

    /// Saved views in display order.
    #[must_use]
    pub fn saved_views(&self) -> &[View] {
        &self.saved
    }

    /// Position of the saved view with `id`.
    #[must_use]
    pub fn saved_view_index(&self, id: &str) -> Option<usize> {
        self.saved_index.get(id).copied()
    }

    /// Saved view with `id`.
    #[must_use]
    pub fn saved_view(&self, id: &str) -> Option<&View> {
        self.saved_view_index(id).map(|i| &self.saved[i])
    }

    /// Order of the saved view visited last.
    #[must_use]
    pub fn last_view_index(&self) -> usize {
        self.last_view
    }

    /// Identity camera carried through every world transform.
    #[must_use]
    pub fn origin_camera(&self) -> &Camera {
        &self.origin
    }

    // -- World transforms --

    /// Apply a rigid transform to the world: structure, saved and target
    /// cameras, the origin camera and distance depths.
    pub fn transform(&mut self, m: &Affine3A) {
        self.structure.transform(m);
        for view in &mut self.saved {
            view.camera.transform(m);
        }
        if let Some(target) = &mut self.target {
            target.camera.transform(m);
        }
        self.origin.transform(m);
        self.refresh_distance_depths();
        self.invalidate();
    }

    /// Translate the world by `d`.
    pub fn translate(&mut self, d: Vec3) {
        self.transform(&Affine3A::from_translation(d));
    }

    fn refresh_distance_depths(&mut self) {
        let atoms = self.structure.atoms();
        for distance in &mut self.current.distances {
            if let (Some(a), Some(b)) =
                (atoms.get(distance.i_atom1), atoms.get(distance.i_atom2))
            {
                distance.z = a.z().max(b.z());
            }
        }
    }

    // -- Absolute cameras --

    /// Express `view`'s relative camera in the structure's original frame.
    pub fn calculate_abs_camera(&self, view: &mut View) {
        let to_original = camera_transform(&Camera::default(), &self.origin, 1.0);
        view.abs_camera = view.camera.transformed(&to_original);
    }

    /// Map `view`'s absolute camera into the live frame.
    pub fn restore_camera_from_abs_camera(&self, view: &mut View) {
        let to_live = camera_transform(&self.origin, &Camera::default(), 1.0);
        view.camera = view.abs_camera.transformed(&to_live);
    }

    // -- Saved views --

    fn orders_are_contiguous(&self) -> bool {
        self.saved.iter().enumerate().all(|(i, v)| v.order == i)
            && self.saved_index.len() == self.saved.len()
    }

    /// Renumber saved views by position and rebuild the id index.
    fn reindex(&mut self) {
        self.saved_index.clear();
        for (i, view) in self.saved.iter_mut().enumerate() {
            view.order = i;
            let _ = self.saved_index.insert(view.id.clone(), i);
        }
        debug_assert!(self.orders_are_contiguous());
        if self.last_view >= self.saved.len() {
            self.last_view = self.saved.len().saturating_sub(1);
        }
    }

    /// Insert `view` at position `j` (clamped behind the default view).
    /// Returns the position used, or `None` if the id is already taken.
    pub fn insert_view(&mut self, j: usize, view: View) -> Option<usize> {
        if self.saved_index.contains_key(&view.id) {
            log::warn!("view {} already saved", view.id);
            return None;
        }
        let j = j.max(1).min(self.saved.len());
        self.saved.insert(j, view);
        self.last_view = j;
        self.reindex();
        self.invalidate();
        Some(j)
    }

    /// Append `view` to the saved views without renumbering.
    fn push_view(&mut self, view: View) -> bool {
        if self.saved_index.contains_key(&view.id) {
            log::warn!("skipping duplicate view {}", view.id);
            return false;
        }
        let _ = self.saved_index.insert(view.id.clone(), self.saved.len());
        self.saved.push(view);
        true
    }

    /// Remove the saved view with `id`. The default view cannot be removed.
    pub fn remove_saved_view(&mut self, id: &str) -> bool {
        let Some(i) = self.saved_view_index(id) else {
            return false;
        };
        if i == 0 {
            log::warn!("refusing to remove the default view");
            return false;
        }
        let _ = self.saved.remove(i);
        self.reindex();
        self.invalidate();
        true
    }

    /// Exchange the saved views at positions `i` and `j`. The default view
    /// stays at position 0.
    pub fn swap_views(&mut self, i: usize, j: usize) -> bool {
        let n = self.saved.len();
        if i == 0 || j == 0 || i >= n || j >= n {
            return false;
        }
        self.saved.swap(i, j);
        self.reindex();
        self.invalidate();
        true
    }

    /// Stable sort of the saved views by their stored order, then
    /// renumber. The default view is kept first.
    pub fn sort_views_by_order(&mut self) {
        self.saved
            .sort_by_key(|view| (view.id != DEFAULT_VIEW_ID, view.order));
        self.reindex();
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::structure::test_support::peptide;

    pub(super) fn scene(n_residues: usize) -> Scene {
        let options = Options::default();
        let structure =
            Structure::from_records("1abc", peptide(n_residues), &options).unwrap();
        Scene::new(structure, options)
    }

    pub(super) fn extra_view(id: &str) -> View {
        View {
            id: id.to_owned(),
            ..View::default()
        }
    }

    #[test]
    fn default_view_centres_structure() {
        let s = scene(5);
        assert!(s.structure().center().length() < 1e-4);
        assert_eq!(s.saved_views().len(), 1);

        let default = &s.saved_views()[0];
        assert_eq!(default.id, DEFAULT_VIEW_ID);
        assert_eq!(default.order, 0);
        assert_eq!(default.pdb_id, "1abc");
        assert_eq!(s.current_view().res_id, "A:1");
        assert!((s.current_view().camera.zoom - 2.0 * s.structure().max_length()).abs() < 1e-5);
        assert_eq!(s.current_view().camera.z_front, s.structure().min_z());
        assert!(s.current_view().show.sidechain);
    }

    #[test]
    fn large_structures_start_without_sidechains() {
        let s = scene(101);
        assert!(!s.current_view().show.sidechain);
    }

    #[test]
    fn abs_camera_is_in_original_frame() {
        let options = Options::default();
        let structure = Structure::from_records("x", peptide(4), &options).unwrap();
        let centroid = -structure.center();
        let mut s = Scene::new(structure, options);

        // Default view looks at the original centroid
        let default = s.saved_views()[0].clone();
        assert!(default.abs_camera.pos.abs_diff_eq(centroid, 1e-4));

        // A saved camera carried through world rotations keeps its
        // absolute pose
        s.rotate_xy(0.3, -0.8);
        s.translate(Vec3::new(2.0, -1.0, 4.0));
        let mut moved = s.saved_views()[0].clone();
        assert!(!moved.camera.approx_eq(&Camera::default(), 1e-3));
        s.calculate_abs_camera(&mut moved);
        assert!(moved.abs_camera.approx_eq(&default.abs_camera, 1e-4));

        // Restoring maps it back onto the live frame
        let mut restored = default.clone();
        s.restore_camera_from_abs_camera(&mut restored);
        assert!(restored.camera.approx_eq(&s.saved_views()[0].camera, 1e-4));
    }

    #[test]
    fn transform_moves_saved_cameras_and_origin() {
        let mut s = scene(3);
        s.rotate_z(FRAC_PI_2);
        let up = s.saved_views()[0].camera.up_dir();
        assert!(up.abs_diff_eq(-Vec3::X, 1e-5));
        assert!(s.origin_camera().up_dir().abs_diff_eq(-Vec3::X, 1e-5));
        // The current camera never moves
        assert_eq!(s.current_view().camera.up_dir(), Vec3::Y);
    }

    #[test]
    fn saved_view_orders_stay_contiguous() {
        let mut s = scene(3);
        assert_eq!(s.insert_view(5, extra_view("view:a")), Some(1));
        assert_eq!(s.insert_view(1, extra_view("view:b")), Some(1));
        assert_eq!(s.insert_view(0, extra_view("view:c")), Some(1));
        assert_eq!(s.insert_view(2, extra_view("view:a")), None);
        let ids: Vec<&str> = s.saved_views().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, [DEFAULT_VIEW_ID, "view:c", "view:b", "view:a"]);
        assert!(s.orders_are_contiguous());

        assert!(s.remove_saved_view("view:b"));
        assert!(!s.remove_saved_view("view:b"));
        assert!(!s.remove_saved_view(DEFAULT_VIEW_ID));
        assert_eq!(s.saved_view_index("view:a"), Some(2));
        assert!(s.orders_are_contiguous());
        assert!(s.last_view_index() < s.saved_views().len());
    }

    #[test]
    fn swap_keeps_default_first() {
        let mut s = scene(3);
        let _ = s.insert_view(1, extra_view("view:a"));
        let _ = s.insert_view(2, extra_view("view:b"));
        assert!(s.swap_views(1, 2));
        assert_eq!(s.saved_views()[1].id, "view:b");
        assert_eq!(s.saved_view("view:a").map(|v| v.order), Some(2));
        assert!(!s.swap_views(0, 1));
        assert!(!s.swap_views(1, 9));
    }

    #[test]
    fn dirty_tracking() {
        let mut s = scene(2);
        assert!(s.is_dirty());
        s.mark_rendered();
        assert!(!s.is_dirty());
        s.translate(Vec3::X);
        assert!(s.is_dirty());
        s.mark_rendered();
        s.force_dirty();
        assert!(s.is_dirty());
    }
}
