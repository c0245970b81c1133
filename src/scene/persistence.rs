//! Bulk export and import of saved views.

use super::Scene;
use crate::view::{View, ViewRecord, DEFAULT_VIEW_ID};

impl Scene {
    /// Persisted records of every saved view except the default one.
    #[must_use]
    pub fn view_records(&self) -> Vec<ViewRecord> {
        self.saved
            .iter()
            .filter(|view| view.id != DEFAULT_VIEW_ID)
            .map(View::to_record)
            .collect()
    }

    /// Add views from persisted records, then sort all saved views by their
    /// stored order and renumber them. Records carrying the default view id
    /// or an id already saved are skipped. Returns the number of views
    /// added.
    pub fn load_view_records(
        &mut self,
        records: impl IntoIterator<Item = ViewRecord>,
    ) -> usize {
        let n_residues = self.structure.residues().len();
        let mut added = 0;
        for record in records {
            if record.view_id == DEFAULT_VIEW_ID {
                continue;
            }
            let mut view = View::from_record(record);
            self.restore_camera_from_abs_camera(&mut view);
            let before = view.selected.len();
            view.selected.retain(|&i| i < n_residues);
            if view.selected.len() != before {
                log::warn!(
                    "view {} selects {} missing residues",
                    view.id,
                    before - view.selected.len()
                );
            }
            if self.push_view(view) {
                added += 1;
            }
        }
        self.sort_views_by_order();
        log::info!("loaded {added} saved views");
        added
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{extra_view, scene};
    use super::*;
    use crate::view::{records_from_json, records_to_json};

    fn record(id: &str, order: usize) -> ViewRecord {
        let mut record = extra_view(id).to_record();
        record.order = order;
        record
    }

    #[test]
    fn export_skips_default_view() {
        let mut s = scene(3);
        assert!(s.view_records().is_empty());
        let _ = s.save_current_view("view:000001", Some("ann"), "t");
        let records = s.view_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].view_id, "view:000001");
        assert_eq!(records[0].order, 1);
        assert_eq!(records[0].creator, "~ ann @t");
        assert_eq!(records[0].time, "t");
    }

    #[test]
    fn import_sorts_and_renumbers() {
        let mut s = scene(3);
        let added = s.load_view_records(vec![
            record("view:c", 9),
            record(DEFAULT_VIEW_ID, 0),
            record("view:a", 2),
            record("view:b", 4),
            record("view:a", 3),
        ]);
        assert_eq!(added, 3);
        let ids: Vec<&str> = s.saved_views().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, [DEFAULT_VIEW_ID, "view:a", "view:b", "view:c"]);
        let orders: Vec<usize> = s.saved_views().iter().map(|v| v.order).collect();
        assert_eq!(orders, [0, 1, 2, 3]);
        assert_eq!(s.saved_view_index("view:c"), Some(3));
    }

    #[test]
    fn out_of_range_selection_is_dropped() {
        let mut s = scene(3);
        let mut r = record("view:x", 1);
        r.selected = vec![0, 2, 7];
        let _ = s.load_view_records([r]);
        assert_eq!(s.saved_view("view:x").unwrap().selected, vec![0, 2]);
    }

    #[test]
    fn imported_cameras_follow_the_live_frame() {
        let mut s = scene(4);
        s.rotate_xy(0.4, 1.1);
        let mut r = record("view:x", 1);
        r.camera.pos = [1.0, 2.0, 3.0];
        r.camera.up = [1.0, 3.0, 3.0];
        r.camera.forward = [1.0, 2.0, 4.0];
        let _ = s.load_view_records([r]);

        let mut view = s.saved_view("view:x").unwrap().clone();
        let stored = view.abs_camera;
        s.calculate_abs_camera(&mut view);
        assert!(view.abs_camera.approx_eq(&stored, 1e-4));
        assert!(!view.camera.pos.abs_diff_eq(stored.pos, 1e-3));
    }

    #[test]
    fn exported_views_reload_in_a_fresh_scene() {
        let mut s = scene(5);
        s.rotate_xy(0.6, -0.3);
        let _ = s.save_current_view("view:000001", None, "t");
        let saved_positions: Vec<_> =
            s.structure().atoms().iter().map(|a| a.pos).collect();
        let json = records_to_json(&s.view_records()).unwrap();

        let mut fresh = scene(5);
        assert_eq!(fresh.load_view_records(records_from_json(&json).unwrap()), 1);
        assert!(fresh.set_target_view_by_id("view:000001"));
        while fresh.tick() != super::super::AnimationPhase::Idle {}
        for (p, q) in fresh.structure().atoms().iter().zip(&saved_positions) {
            assert!(p.pos.abs_diff_eq(*q, 1e-3));
        }
    }
}
