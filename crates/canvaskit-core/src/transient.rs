//! Two-phase gestures: live drag/resize updates, one command at the end.
//!
//! Between `begin` and `commit` the tracked object is edited in the scene
//! directly, without touching history. `commit` compares the object with its
//! baseline and produces at most one command.

use crate::commands::{Command, MoveCommand, ResizeCommand};
use crate::config::{DEFAULT_DRAG_THRESHOLD, DEFAULT_MIN_RESIZE_EXTENT};
use crate::scene::Scene;
use crate::shapes::{DrawingObject, Geometry, ObjectId, ShapeSize};
use kurbo::Point;

/// Baselines for in-progress gestures, in the order they began.
#[derive(Debug, Clone)]
pub struct TransientTracker {
    baselines: Vec<(ObjectId, Geometry)>,
    drag_threshold: f64,
    min_extent: f64,
}

impl Default for TransientTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD, DEFAULT_MIN_RESIZE_EXTENT)
    }
}

impl TransientTracker {
    pub fn new(drag_threshold: f64, min_extent: f64) -> Self {
        Self {
            baselines: Vec::new(),
            drag_threshold,
            min_extent,
        }
    }

    /// Capture the object's geometry before a drag or resize. Restarting an
    /// active gesture keeps the original baseline.
    ///
    /// Returns false for objects without an id.
    pub fn begin(&mut self, obj: &DrawingObject) -> bool {
        let Some(id) = obj.id() else {
            log::warn!("Cannot track a gesture on a {} without an id", obj.kind());
            return false;
        };
        if !self.is_active(id) {
            self.baselines.push((id.clone(), obj.geometry()));
        }
        true
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.baseline(id).is_some()
    }

    pub fn baseline(&self, id: &str) -> Option<&Geometry> {
        self.baselines
            .iter()
            .find(|(tracked, _)| tracked == id)
            .map(|(_, geometry)| geometry)
    }

    /// Ids with a gesture in progress.
    pub fn active_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.baselines.iter().map(|(id, _)| id)
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    /// Move a tracked object live.
    pub fn drag_to(&self, id: &str, position: Point, scene: &mut Scene) -> bool {
        if !self.is_active(id) {
            return false;
        }
        match scene.find_by_id_mut(id) {
            Some(obj) => {
                obj.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Scale a tracked object live, relative to its baseline size.
    ///
    /// Extents never drop below the minimum. Circles scale by the larger
    /// factor; kinds without a resizable size are left alone.
    pub fn scale_to(&self, id: &str, scale_x: f64, scale_y: f64, scene: &mut Scene) -> bool {
        let Some(baseline) = self.baseline(id) else {
            return false;
        };
        let size = match baseline.size {
            ShapeSize::Dimensions { width, height } => ShapeSize::Dimensions {
                width: (width * scale_x).max(self.min_extent),
                height: (height * scale_y).max(self.min_extent),
            },
            ShapeSize::Radius(radius) => {
                ShapeSize::Radius((radius * scale_x.max(scale_y)).max(self.min_extent))
            }
            ShapeSize::Intrinsic => return false,
        };
        match scene.find_by_id_mut(id) {
            Some(obj) => {
                let position = obj.position();
                obj.apply_geometry(&Geometry::new(position, size));
                true
            }
            None => false,
        }
    }

    /// End a gesture and produce the command describing it.
    ///
    /// A size change yields a resize; otherwise a move of at least the drag
    /// threshold on either axis yields a move. Anything smaller is a click:
    /// the object is put back on its baseline and no command is produced.
    pub fn commit(&mut self, id: &str, scene: &mut Scene) -> Option<Box<dyn Command>> {
        let baseline = self.take(id)?;
        let Some(obj) = scene.find_by_id_mut(id) else {
            log::debug!("Gesture target {} vanished before commit", id);
            return None;
        };
        let current = obj.geometry();

        if current.size != baseline.size {
            log::debug!("Gesture on {} committed as resize", id);
            return Some(Box::new(ResizeCommand::for_id(id, baseline, current)));
        }

        let delta = current.position - baseline.position;
        if delta.x.abs() < self.drag_threshold && delta.y.abs() < self.drag_threshold {
            obj.apply_geometry(&baseline);
            return None;
        }
        log::debug!("Gesture on {} committed as move", id);
        Some(Box::new(MoveCommand::for_id(
            id,
            baseline.position,
            current.position,
        )))
    }

    /// Commit every active gesture, in the order they began.
    pub fn commit_all(&mut self, scene: &mut Scene) -> Vec<Box<dyn Command>> {
        let ids: Vec<ObjectId> = self.baselines.iter().map(|(id, _)| id.clone()).collect();
        ids.iter()
            .filter_map(|id| self.commit(id, scene))
            .collect()
    }

    /// Abandon a gesture, restoring the baseline. Never produces a command.
    pub fn cancel(&mut self, id: &str, scene: &mut Scene) -> bool {
        let Some(baseline) = self.take(id) else {
            return false;
        };
        if let Some(obj) = scene.find_by_id_mut(id) {
            obj.apply_geometry(&baseline);
        }
        true
    }

    /// Abandon every gesture.
    pub fn cancel_all(&mut self, scene: &mut Scene) {
        for (id, baseline) in self.baselines.drain(..) {
            if let Some(obj) = scene.find_by_id_mut(&id) {
                obj.apply_geometry(&baseline);
            }
        }
    }

    fn take(&mut self, id: &str) -> Option<Geometry> {
        let index = self.baselines.iter().position(|(tracked, _)| tracked == id)?;
        Some(self.baselines.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::EditContext;
    use crate::commands::test_support::Fixture;
    use crate::shapes::{Rectangle, Text};

    fn begin(tracker: &mut TransientTracker, fx: &Fixture, id: &str) {
        let obj = fx.scene.find_by_id(id).unwrap();
        assert!(tracker.begin(obj));
    }

    fn undo_with(command: &mut Box<dyn Command>, fx: &mut Fixture) {
        let mut ctx = EditContext::new(&mut fx.scene, &mut fx.clipboard, &mut fx.selection);
        command.undo(&mut ctx);
    }

    #[test]
    fn test_drag_commits_move() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");

        assert!(tracker.drag_to("rect-1", Point::new(30.0, 20.0), &mut fx.scene));
        assert!(tracker.drag_to("rect-1", Point::new(60.0, 40.0), &mut fx.scene));

        let mut command = tracker.commit("rect-1", &mut fx.scene).unwrap();
        assert_eq!(command.description(), "Move object");
        assert!(!tracker.is_active("rect-1"));

        undo_with(&mut command, &mut fx);
        assert_eq!(fx.scene.objects()[0].position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_sub_threshold_drag_is_click() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");

        tracker.drag_to("rect-1", Point::new(10.5, 10.9), &mut fx.scene);
        assert!(tracker.commit("rect-1", &mut fx.scene).is_none());
        assert_eq!(fx.scene.objects()[0].position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_threshold_on_one_axis_is_a_move() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");
        tracker.drag_to("rect-1", Point::new(10.0, 11.0), &mut fx.scene);
        assert!(tracker.commit("rect-1", &mut fx.scene).is_some());
    }

    #[test]
    fn test_scale_commits_resize() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");

        assert!(tracker.scale_to("rect-1", 2.0, 0.1, &mut fx.scene));
        assert_eq!(
            fx.scene.find_by_id("rect-1").unwrap().geometry().size,
            ShapeSize::Dimensions {
                width: 100.0,
                height: 5.0
            }
        );

        let mut command = tracker.commit("rect-1", &mut fx.scene).unwrap();
        assert_eq!(command.description(), "Resize object");
        undo_with(&mut command, &mut fx);
        assert_eq!(
            fx.scene.find_by_id("rect-1").unwrap().geometry().size,
            ShapeSize::Dimensions {
                width: 50.0,
                height: 30.0
            }
        );
    }

    #[test]
    fn test_circle_scales_by_larger_factor() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "circle-2");

        tracker.scale_to("circle-2", 0.5, 2.0, &mut fx.scene);
        assert_eq!(
            fx.scene.find_by_id("circle-2").unwrap().geometry().size,
            ShapeSize::Radius(50.0)
        );
        tracker.scale_to("circle-2", 0.01, 0.01, &mut fx.scene);
        assert_eq!(
            fx.scene.find_by_id("circle-2").unwrap().geometry().size,
            ShapeSize::Radius(5.0)
        );
    }

    #[test]
    fn test_scale_text_is_rejected() {
        let mut fx = Fixture::default();
        let id = fx.scene.add(Text::new(Point::new(0.0, 20.0), "hi").into()).unwrap();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, &id);
        assert!(!tracker.scale_to(&id, 2.0, 2.0, &mut fx.scene));
    }

    #[test]
    fn test_cancel_restores_baseline() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");
        tracker.drag_to("rect-1", Point::new(200.0, 200.0), &mut fx.scene);
        tracker.scale_to("rect-1", 3.0, 3.0, &mut fx.scene);

        assert!(tracker.cancel("rect-1", &mut fx.scene));
        assert_eq!(
            fx.scene.find_by_id("rect-1").unwrap().geometry(),
            Geometry::new(
                Point::new(10.0, 10.0),
                ShapeSize::Dimensions {
                    width: 50.0,
                    height: 30.0
                }
            )
        );
        assert!(!tracker.cancel("rect-1", &mut fx.scene));
    }

    #[test]
    fn test_untracked_object_is_ignored() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        assert!(!tracker.drag_to("rect-1", Point::ZERO, &mut fx.scene));
        assert!(tracker.commit("rect-1", &mut fx.scene).is_none());

        let _ = env_logger::builder().is_test(true).try_init();
        let orphan: DrawingObject = Rectangle::new(Point::ZERO, 1.0, 1.0).into();
        assert!(!tracker.begin(&orphan));
    }

    #[test]
    fn test_commit_all_in_begin_order() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "circle-2");
        begin(&mut tracker, &fx, "rect-1");

        tracker.drag_to("circle-2", Point::new(150.0, 150.0), &mut fx.scene);
        tracker.drag_to("rect-1", Point::new(60.0, 60.0), &mut fx.scene);

        let commands = tracker.commit_all(&mut fx.scene);
        assert_eq!(commands.len(), 2);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_rebegin_keeps_baseline() {
        let mut fx = Fixture::with_shapes();
        let mut tracker = TransientTracker::default();
        begin(&mut tracker, &fx, "rect-1");
        tracker.drag_to("rect-1", Point::new(40.0, 40.0), &mut fx.scene);
        begin(&mut tracker, &fx, "rect-1");
        assert_eq!(tracker.baseline("rect-1").unwrap().position, Point::new(10.0, 10.0));
        assert_eq!(tracker.active_ids().count(), 1);
    }
}
