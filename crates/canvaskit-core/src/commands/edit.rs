//! Scene edits: move, resize, add, delete and batches of those.

use super::{
    Command, DEFAULT_COMMAND_SIZE, EditContext, deselect, remove_indexed, restore_indexed,
    snapshot_size, target_id,
};
use crate::shapes::{DrawingObject, Geometry, ObjectId};
use kurbo::Point;

/// Set an object's anchor position.
#[derive(Debug, Clone)]
pub struct MoveCommand {
    target: ObjectId,
    old_position: Point,
    new_position: Point,
}

impl MoveCommand {
    pub fn new(obj: &DrawingObject, old_position: Point, new_position: Point) -> Self {
        Self::for_id(target_id(obj), old_position, new_position)
    }

    pub fn for_id(target: impl Into<ObjectId>, old_position: Point, new_position: Point) -> Self {
        Self {
            target: target.into(),
            old_position,
            new_position,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn apply(&self, ctx: &mut EditContext<'_>, position: Point) {
        match ctx.scene.find_by_id_mut(&self.target) {
            Some(obj) => obj.set_position(position),
            None => log::debug!("Move target {} not found", self.target),
        }
    }
}

impl Command for MoveCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        self.apply(ctx, self.new_position);
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        self.apply(ctx, self.old_position);
    }

    fn description(&self) -> String {
        "Move object".to_string()
    }
}

/// Set an object's size and position together.
///
/// Rectangles take width/height, circles take a radius; other kinds only
/// have their position restored.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    target: ObjectId,
    old_geometry: Geometry,
    new_geometry: Geometry,
}

impl ResizeCommand {
    pub fn new(obj: &DrawingObject, old_geometry: Geometry, new_geometry: Geometry) -> Self {
        Self::for_id(target_id(obj), old_geometry, new_geometry)
    }

    pub fn for_id(target: impl Into<ObjectId>, old_geometry: Geometry, new_geometry: Geometry) -> Self {
        Self {
            target: target.into(),
            old_geometry,
            new_geometry,
        }
    }

    fn apply(&self, ctx: &mut EditContext<'_>, geometry: &Geometry) {
        match ctx.scene.find_by_id_mut(&self.target) {
            Some(obj) => obj.apply_geometry(geometry),
            None => log::debug!("Resize target {} not found", self.target),
        }
    }
}

impl Command for ResizeCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        let geometry = self.new_geometry;
        self.apply(ctx, &geometry);
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        let geometry = self.old_geometry;
        self.apply(ctx, &geometry);
    }

    fn description(&self) -> String {
        "Resize object".to_string()
    }
}

/// Append an object to the scene.
///
/// The id assigned on the first run is kept, so redo re-adds the same object.
#[derive(Debug, Clone)]
pub struct AddCommand {
    object: DrawingObject,
}

impl AddCommand {
    pub fn new(object: DrawingObject) -> Self {
        Self { object }
    }

    /// The id of the added object, once executed (or if it came with one).
    pub fn object_id(&self) -> Option<&ObjectId> {
        self.object.id()
    }
}

impl Command for AddCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        if let Some(id) = ctx.scene.add(self.object.clone()) {
            self.object.set_id(id);
        }
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        let Some(id) = self.object.id() else {
            return;
        };
        ctx.scene.remove(id);
        deselect(ctx.selection, [&self.object]);
    }

    fn description(&self) -> String {
        format!("Add {} object", self.object.kind())
    }

    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE + snapshot_size([&self.object])
    }
}

/// Remove objects from the scene and the selection.
///
/// Undo puts each object back at the index it had.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    ids: Vec<ObjectId>,
    removed: Vec<(usize, DrawingObject)>,
}

impl DeleteCommand {
    pub fn new(ids: Vec<ObjectId>) -> Self {
        Self {
            ids,
            removed: Vec::new(),
        }
    }

    pub fn single(id: impl Into<ObjectId>) -> Self {
        Self::new(vec![id.into()])
    }
}

impl Command for DeleteCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        self.removed = remove_indexed(ctx.scene, &self.ids);
        deselect(ctx.selection, self.removed.iter().map(|(_, obj)| obj));
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        restore_indexed(ctx.scene, &self.removed);
        self.removed.clear();
    }

    fn description(&self) -> String {
        match self.removed.as_slice() {
            [(_, obj)] => format!("Delete {} object", obj.kind()),
            _ => format!("Delete {} object(s)", self.ids.len()),
        }
    }

    fn estimated_size(&self) -> usize {
        DEFAULT_COMMAND_SIZE + snapshot_size(self.removed.iter().map(|(_, obj)| obj))
    }
}

/// Several commands recorded as one history entry.
pub struct BatchCommand {
    commands: Vec<Box<dyn Command>>,
    description: String,
}

impl std::fmt::Debug for BatchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCommand")
            .field("commands", &self.commands.len())
            .field("description", &self.description)
            .finish()
    }
}

impl BatchCommand {
    pub fn new(description: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            commands,
            description: description.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for BatchCommand {
    fn execute(&mut self, ctx: &mut EditContext<'_>) {
        for command in &mut self.commands {
            command.execute(ctx);
        }
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) {
        for command in self.commands.iter_mut().rev() {
            command.undo(ctx);
        }
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn estimated_size(&self) -> usize {
        self.commands.iter().map(|c| c.estimated_size()).sum::<usize>().max(DEFAULT_COMMAND_SIZE)
    }
}
