//! Reversible edits.
//!
//! A command captures enough state at construction (or on its first run) to
//! reverse itself. Targets are re-resolved by id every time the command runs,
//! since the scene may have changed in between.

mod clipboard;
mod edit;

pub use clipboard::{CopyCommand, CutCommand, DuplicateCommand, PasteCommand};
pub use edit::{AddCommand, BatchCommand, DeleteCommand, MoveCommand, ResizeCommand};

use crate::clipboard::Clipboard;
use crate::scene::Scene;
use crate::selection::SelectionManager;
use crate::shapes::{DrawingObject, ObjectId, generate_object_id};

/// Size assumed for a command that owns no object snapshots.
pub const DEFAULT_COMMAND_SIZE: usize = 1024;

/// Everything a command may touch while running.
pub struct EditContext<'a> {
    pub scene: &'a mut Scene,
    pub clipboard: &'a mut Clipboard,
    pub selection: &'a mut SelectionManager,
}

impl<'a> EditContext<'a> {
    pub fn new(
        scene: &'a mut Scene,
        clipboard: &'a mut Clipboard,
        selection: &'a mut SelectionManager,
    ) -> Self {
        Self {
            scene,
            clipboard,
            selection,
        }
    }
}

/// A command that can be executed and undone.
pub trait Command {
    /// Apply the change. Also called on redo.
    fn execute(&mut self, ctx: &mut EditContext<'_>);

    /// Reverse the change.
    fn undo(&mut self, ctx: &mut EditContext<'_>);

    /// Short label for UI display.
    fn description(&self) -> String;

    /// Approximate bytes held by this command, for the history memory budget.
    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE
    }
}

/// Resolve a command target id, generating a fallback for objects that
/// have none. A fallback id matches nothing in the scene.
fn target_id(obj: &DrawingObject) -> ObjectId {
    match obj.id() {
        Some(id) => id.clone(),
        None => {
            let id = generate_object_id(obj.kind());
            log::warn!(
                "Command target {} has no id; using {} (the command will not find it)",
                obj.kind(),
                id
            );
            id
        }
    }
}

/// Rough in-memory footprint of owned object snapshots.
fn snapshot_size<'a>(objects: impl IntoIterator<Item = &'a DrawingObject>) -> usize {
    objects
        .into_iter()
        .map(|obj| {
            let heap = match obj {
                DrawingObject::Path(p) => p.points.len() * std::mem::size_of::<f64>(),
                DrawingObject::Line(l) => l.points.len() * std::mem::size_of::<f64>(),
                DrawingObject::Text(t) => t.text.len(),
                _ => 0,
            };
            std::mem::size_of::<DrawingObject>() + heap
        })
        .sum()
}

/// Remove the objects with the given ids, returning each with the index it
/// occupied. Missing ids are skipped.
fn remove_indexed(scene: &mut Scene, ids: &[ObjectId]) -> Vec<(usize, DrawingObject)> {
    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(index) = scene.index_of(id) else {
            log::debug!("Object {} not in scene; nothing to remove", id);
            continue;
        };
        if let Some(obj) = scene.remove(id) {
            removed.push((index, obj));
        }
    }
    removed
}

/// Put back objects taken out by [`remove_indexed`]. Reinserting in reverse
/// removal order restores every original index.
fn restore_indexed(scene: &mut Scene, removed: &[(usize, DrawingObject)]) {
    for (index, obj) in removed.iter().rev() {
        scene.insert_at(*index, obj.clone());
    }
}

/// Drop removed objects from the selection.
fn deselect<'a>(selection: &mut SelectionManager, objects: impl IntoIterator<Item = &'a DrawingObject>) {
    let gone: Vec<&ObjectId> = objects.into_iter().filter_map(|obj| obj.id()).collect();
    if gone.is_empty() {
        return;
    }
    selection.retain(|id| !gone.iter().any(|g| g.as_str() == id));
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::shapes::{Circle, Rectangle};
    use kurbo::Point;

    /// Owned pieces of an [`EditContext`].
    #[derive(Default)]
    pub struct Fixture {
        pub scene: Scene,
        pub clipboard: Clipboard,
        pub selection: SelectionManager,
    }

    impl Fixture {
        /// Scene with `rect-1` at (10,10,50,30) and `circle-2` at (100,100) r=25.
        pub fn with_shapes() -> Self {
            let mut fixture = Self::default();
            fixture
                .scene
                .add(Rectangle::new(Point::new(10.0, 10.0), 50.0, 30.0).into());
            fixture
                .scene
                .add(Circle::new(Point::new(100.0, 100.0), 25.0).into());
            fixture
        }

        pub fn ctx(&mut self) -> EditContext<'_> {
            EditContext::new(&mut self.scene, &mut self.clipboard, &mut self.selection)
        }

        pub fn ids(&self) -> Vec<ObjectId> {
            self.scene
                .objects()
                .iter()
                .filter_map(|obj| obj.id().cloned())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Path, Rectangle};
    use kurbo::Point;

    #[test]
    fn test_remove_and_restore_keep_indices() {
        let mut scene = Scene::new();
        for i in 0..5 {
            scene.add(Rectangle::new(Point::new(i as f64, 0.0), 1.0, 1.0).into());
        }
        let before: Vec<DrawingObject> = scene.objects().to_vec();

        let ids = vec!["rect-4".to_string(), "rect-2".to_string(), "rect-5".to_string()];
        let removed = remove_indexed(&mut scene, &ids);
        assert_eq!(removed.len(), 3);
        assert_eq!(scene.len(), 2);

        restore_indexed(&mut scene, &removed);
        assert_eq!(scene.objects(), before.as_slice());
    }

    #[test]
    fn test_target_id_fallback() {
        let _ = env_logger::builder().is_test(true).try_init();
        let obj: DrawingObject = Rectangle::new(Point::ZERO, 1.0, 1.0).into();
        let id = target_id(&obj);
        assert!(id.starts_with("rect-"));

        let named: DrawingObject = Rectangle::new(Point::ZERO, 1.0, 1.0).with_id("r").into();
        assert_eq!(target_id(&named), "r");
    }

    #[test]
    fn test_snapshot_size_grows_with_points() {
        let small: DrawingObject = Path::from_flat(Point::ZERO, vec![0.0, 0.0]).into();
        let large: DrawingObject = Path::from_flat(Point::ZERO, vec![0.0; 200]).into();
        assert!(snapshot_size([&large]) > snapshot_size([&small]));
        assert_eq!(snapshot_size(std::iter::empty()), 0);
    }
}
