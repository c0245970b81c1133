//! Frame-by-frame animation toward a target view.
//!
//! Every tick recomputes the camera motion from the *remaining* pose
//! difference with the remaining step count as divisor, then applies it to
//! the world. Slab parameters (zoom, near and far clip) move by the same
//! fraction. When the countdown reaches zero the next tick settles: the
//! target's metadata is copied into the live view and the centred atom is
//! resolved.

use super::Scene;
use crate::camera::camera_transform;
use crate::view::View;

/// Squared distance from the origin beyond which a residue is never
/// searched for the centred atom.
const ORIGIN_SCREEN_SQ: f32 = 400.0;

/// Per-axis distance from the origin within which an atom counts as
/// centred.
const ORIGIN_TOLERANCE: f32 = 0.1;

/// Where the scene is in its view-to-view animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// No target view; ticks are no-ops.
    Idle,
    /// Moving toward the target; the value is the number of steps left.
    Animating(u32),
    /// Motion finished; the next tick reconciles metadata.
    Settling,
}

impl Scene {
    /// Current animation phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        match self.countdown {
            None => AnimationPhase::Idle,
            Some(0) => AnimationPhase::Settling,
            Some(n) => AnimationPhase::Animating(n),
        }
    }

    /// Whether a target view is still being approached or settled.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.countdown.is_some()
    }

    /// Start animating toward a private copy of `view`, replacing any
    /// target already in flight.
    pub fn set_target_view(&mut self, view: &View) {
        self.countdown = Some(self.options.animation.steps.max(1));
        self.target = Some(view.clone());
        self.hide_detail_for_move();
        self.invalidate();
    }

    /// Advance the animation by one frame. Returns the phase after the
    /// tick.
    pub fn tick(&mut self) -> AnimationPhase {
        match self.countdown {
            None => {}
            Some(0) => {
                self.settle();
                self.countdown = None;
            }
            Some(n) => {
                self.step(n);
                self.countdown = Some(n - 1);
            }
        }
        self.phase()
    }

    fn step(&mut self, n: u32) {
        let Some(target) = self.target.as_ref().map(|v| v.camera) else {
            return;
        };
        let n = n as f32;
        let m = camera_transform(&self.current.camera, &target, n);
        self.transform(&m);

        let camera = &mut self.current.camera;
        camera.zoom += (target.zoom - camera.zoom) / n;
        camera.z_front += (target.z_front - camera.z_front) / n;
        camera.z_back += (target.z_back - camera.z_back) / n;
    }

    fn settle(&mut self) {
        self.restore_detail_after_move();
        let Some(target) = self.target.take() else {
            return;
        };

        let camera = &mut self.current.camera;
        camera.zoom = target.camera.zoom;
        camera.z_front = target.camera.z_front;
        camera.z_back = target.camera.z_back;
        self.current.copy_metadata_from(&target);

        let n_atoms = self.structure.atoms().len();
        let i_atom = self
            .current
            .i_atom
            .filter(|&i| i < n_atoms)
            .or_else(|| self.find_atom_nearest_to_origin());
        self.current.i_atom = i_atom;
        let residue = i_atom.map_or(0, |i| self.structure.atoms()[i].residue);
        if let Some(res) = self.structure.residues().get(residue) {
            self.current.res_id.clone_from(&res.id);
        }

        self.structure.clear_selected();
        for &i in &self.current.selected {
            if !self.structure.set_selected(i, true) {
                log::warn!("view {} selects missing residue {i}", target.id);
            }
        }
        log::debug!(
            "settled on view {} centred on {}",
            target.id,
            self.current.res_id
        );
        self.invalidate();
    }

    /// Atom sitting at the world origin, if any, looking only at residues
    /// whose representative atom is nearby.
    #[must_use]
    pub fn find_atom_nearest_to_origin(&self) -> Option<usize> {
        self.structure.atom_at_origin(ORIGIN_SCREEN_SQ, ORIGIN_TOLERANCE)
    }

    // -- Detail suppression --

    /// Large structure viewed through a deep slab.
    #[must_use]
    pub fn is_too_much_atomic_detail(&self) -> bool {
        let animation = &self.options.animation;
        let camera = &self.current.camera;
        self.structure.residues().len() > animation.detail_residue_threshold
            && camera.z_back - camera.z_front > animation.detail_depth_threshold
    }

    fn hide_detail_for_move(&mut self) {
        if !self.options.animation.suppress_detail
            || self.saved_show.is_some()
            || !self.is_too_much_atomic_detail()
        {
            return;
        }
        self.saved_show = Some(self.current.show);
        self.current.show.hide_detail();
    }

    fn restore_detail_after_move(&mut self) {
        if let Some(show) = self.saved_show.take() {
            self.current.show = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Vec3};

    use super::super::tests::scene;
    use super::*;

    fn run(scene: &mut Scene) -> usize {
        let mut ticks = 0;
        while scene.tick() != AnimationPhase::Idle {
            ticks += 1;
        }
        ticks + 1
    }

    #[test]
    fn idle_ticks_are_noops() {
        let mut s = scene(3);
        s.mark_rendered();
        let before = s.structure().atoms()[0].pos;
        assert_eq!(s.tick(), AnimationPhase::Idle);
        assert_eq!(s.tick(), AnimationPhase::Idle);
        assert_eq!(s.structure().atoms()[0].pos, before);
        assert!(!s.is_dirty());
    }

    #[test]
    fn phases_follow_countdown() {
        let mut s = scene(3);
        let target = s.current_view().clone();
        s.set_target_view(&target);
        assert_eq!(s.phase(), AnimationPhase::Animating(25));
        for _ in 0..24 {
            assert!(matches!(s.tick(), AnimationPhase::Animating(_)));
        }
        assert_eq!(s.tick(), AnimationPhase::Settling);
        assert_eq!(s.tick(), AnimationPhase::Idle);
        assert!(s.target_view().is_none());
    }

    #[test]
    fn target_is_a_private_copy() {
        let mut s = scene(3);
        let mut target = s.current_view().clone();
        target.text = "before".to_owned();
        s.set_target_view(&target);
        target.text = "after".to_owned();
        let _ = run(&mut s);
        assert_eq!(s.current_view().text, "before");
        assert_ne!(target.text, s.current_view().text);
    }

    #[test]
    fn slab_converges_to_target() {
        let mut s = scene(3);
        let start = s.current_view().camera.zoom;
        let mut target = s.current_view().clone();
        target.camera.zoom = start + 50.0;
        target.camera.z_front = -20.0;
        target.camera.z_back = 30.0;
        s.set_target_view(&target);

        let _ = s.tick();
        assert!((s.current_view().camera.zoom - (start + 2.0)).abs() < 1e-4);

        assert_eq!(run(&mut s), 25);
        let camera = &s.current_view().camera;
        assert!((camera.zoom - (start + 50.0)).abs() < 1e-4);
        assert_eq!(camera.z_front, -20.0);
        assert_eq!(camera.z_back, 30.0);
    }

    #[test]
    fn targeting_an_atom_brings_it_to_origin() {
        let mut s = scene(6);
        let i_atom = s.structure().residues()[4].representative();
        assert!(s.set_target_view_by_atom(i_atom));
        let _ = run(&mut s);
        assert!(s.structure().atoms()[i_atom].pos.length() < 1e-3);
        assert_eq!(s.current_view().i_atom, Some(i_atom));
        assert_eq!(s.current_view().res_id, "A:5");
    }

    #[test]
    fn unset_atom_resolves_to_atom_at_origin() {
        let mut s = scene(6);
        let i_atom = s.structure().residues()[2].representative();
        let offset = -s.structure().atoms()[i_atom].pos;
        let mut target = s.current_view().clone();
        target.i_atom = None;
        target.camera.transform(&Affine3A::from_translation(-offset));
        s.set_target_view(&target);
        let _ = run(&mut s);
        assert_eq!(s.current_view().i_atom, Some(i_atom));
        assert_eq!(s.current_view().res_id, "A:3");
    }

    #[test]
    fn retargeting_mid_flight_restarts_countdown() {
        let mut s = scene(4);
        let start = s.origin_camera().pos.x;
        let mut first = s.current_view().clone();
        first.camera.transform(&Affine3A::from_translation(Vec3::X * 10.0));
        s.set_target_view(&first);
        for _ in 0..10 {
            let _ = s.tick();
        }
        let second = s.current_view().clone();
        s.set_target_view(&second);
        assert_eq!(s.phase(), AnimationPhase::Animating(25));
        let _ = run(&mut s);
        // The second target is the fixed current camera, so the partial
        // motion of the first leg is kept
        assert!((s.origin_camera().pos.x - (start - 4.0)).abs() < 1e-3);
    }

    #[test]
    fn detail_hidden_while_moving_large_structures() {
        let mut s = scene(120);
        s.current.show.hydrogen = true;
        s.current.camera.z_front = -20.0;
        s.current.camera.z_back = 20.0;
        let target = s.current.clone();
        s.set_target_view(&target);
        assert!(!s.current_view().show.hydrogen);
        assert!(!s.current_view().show.sidechain);
        let _ = run(&mut s);
        assert!(s.current_view().show.hydrogen);
        assert!(s.saved_show.is_none());
    }

    #[test]
    fn selection_applied_on_settle() {
        let mut s = scene(4);
        let mut target = s.current_view().clone();
        target.selected = vec![1, 3, 99];
        s.set_target_view(&target);
        let _ = run(&mut s);
        assert_eq!(s.structure().selected_residues(), vec![1, 3]);
    }
}
