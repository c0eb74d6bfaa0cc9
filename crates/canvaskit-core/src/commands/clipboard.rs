//! Clipboard commands: copy, cut, paste, duplicate.

use super::{
    Command, DEFAULT_COMMAND_SIZE, EditContext, deselect, remove_indexed, restore_indexed,
    snapshot_size,
};
use crate::config::DEFAULT_PASTE_OFFSET;
use crate::shapes::{DrawingObject, ObjectId};
use kurbo::Vec2;

/// Copy objects to the clipboard.
///
/// Undo does nothing: previous clipboard contents are not tracked.
#[derive(Debug, Clone)]
pub struct CopyCommand {
    ids: Vec<ObjectId>,
}

impl CopyCommand {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        Self { ids }
    }
}

impl Command for CopyCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        let objects = self.ids.iter().filter_map(|id| ctx.scene.find_by_id(id));
        ctx.clipboard.copy(objects);
    }

    fn undo(&mut self, _ctx: &mut EditContext<'_>) {}

    fn description(&self) -> String {
        format!("Copy {} object(s)", self.ids.len())
    }
}

/// Copy objects to the clipboard, then remove them.
#[derive(Debug, Clone)]
pub struct CutCommand {
    ids: Vec<ObjectId>,
    removed: Vec<(usize, DrawingObject)>,
}

impl CutCommand {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        Self {
            ids,
            removed: Vec::new(),
        }
    }
}

impl Command for CutCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        let objects = self.ids.iter().filter_map(|id| ctx.scene.find_by_id(id));
        ctx.clipboard.copy(objects);
        self.removed = remove_indexed(ctx.scene, &self.ids);
        deselect(ctx.selection, self.removed.iter().map(|(_, obj)| obj));
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        restore_indexed(ctx.scene, &self.removed);
        self.removed.clear();
    }

    fn description(&self) -> String {
        format!("Cut {} object(s)", self.ids.len())
    }

    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE + snapshot_size(self.removed.iter().map(|(_, obj)| obj))
    }
}

/// Add the clipboard contents to the scene.
///
/// The pasted objects are taken from the clipboard on the first run only;
/// redo re-adds the same objects with the same ids.
#[derive(Debug, Clone, Default)]
pub struct PasteCommand {
    pasted: Option<Vec<DrawingObject>>,
}

impl PasteCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects inserted by this command (empty before the first run).
    pub fn pasted(&self) -> &[DrawingObject] {
        self.pasted.as_deref().unwrap_or_default()
    }
}

impl Command for PasteCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        let pasted = self.pasted.get_or_insert_with(|| ctx.clipboard.paste());
        if pasted.is_empty() {
            log::debug!("Paste with empty clipboard");
        }
        for obj in pasted.iter() {
            ctx.scene.add(obj.clone());
        }
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        for obj in self.pasted() {
            if let Some(id) = obj.id() {
                ctx.scene.remove(id);
            }
        }
        deselect(ctx.selection, self.pasted());
    }

    fn description(&self) -> String {
        format!("Paste {} object(s)", self.pasted().len())
    }

    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE + snapshot_size(self.pasted())
    }
}

/// Clone objects in place with new ids, offset from the originals.
///
/// Duplicates are created on the first run; redo re-adds the same ones.
#[derive(Debug, Clone)]
pub struct DuplicateCommand {
    ids: Vec<ObjectId>,
    offset: Vec2,
    duplicates: Option<Vec<DrawingObject>>,
}

impl DuplicateCommand {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        Self::with_offset(ids, DEFAULT_PASTE_OFFSET)
    }

    pub fn with_offset(ids: Vec<ObjectId>, offset: f64) -> Self {
        Self {
            ids,
            offset: Vec2::new(offset, offset),
            duplicates: None,
        }
    }

    /// Objects inserted by this command (empty before the first run).
    pub fn duplicates(&self) -> &[DrawingObject] {
        self.duplicates.as_deref().unwrap_or_default()
    }
}

impl Command for DuplicateCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        let ids = &self.ids;
        let offset = self.offset;
        let duplicates = self.duplicates.get_or_insert_with(|| {
            ids.iter()
                .filter_map(|id| ctx.scene.find_by_id(id))
                .map(|obj| {
                    let mut copy = obj.clone();
                    copy.regenerate_id();
                    copy.translate(offset);
                    copy
                })
                .collect()
        });
        for obj in duplicates.iter() {
            ctx.scene.add(obj.clone());
        }
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        for obj in self.duplicates() {
            if let Some(id) = obj.id() {
                ctx.scene.remove(id);
            }
        }
        deselect(ctx.selection, self.duplicates());
    }

    fn description(&self) -> String {
        format!("Duplicate {} object(s)", self.ids.len())
    }

    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE + snapshot_size(self.duplicates())
    }
}
