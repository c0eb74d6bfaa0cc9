//! Editor: scene, selection, history and gestures wired together.

use crate::clipboard::{Clipboard, SharedClipboard};
use crate::commands::{
    AddCommand, BatchCommand, Command, CopyCommand, CutCommand, DeleteCommand, DuplicateCommand,
    EditContext, PasteCommand,
};
use crate::config::EditorConfig;
use crate::history::{CommandHistory, HistoryStatus};
use crate::input::{EditAction, Modifiers};
use crate::scene::Scene;
use crate::selection::{Containment, SelectionManager, SelectionMode, normalize_rect, update_selection};
use crate::shapes::{DrawingObject, ObjectId};
use crate::transient::TransientTracker;
use kurbo::{Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

/// Editing session over one scene.
///
/// Every change that should be undoable goes through [`Editor::execute`].
/// Live gesture updates (`drag_to`, `scale_to`) bypass history until the
/// gesture is committed.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    selection: SelectionManager,
    history: CommandHistory,
    transient: TransientTracker,
    clipboard: SharedClipboard,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with its own clipboard.
    pub fn new(config: EditorConfig) -> Self {
        let clipboard = Rc::new(RefCell::new(Clipboard::with_offset(config.paste_offset)));
        Self::with_clipboard(config, clipboard)
    }

    /// Create an editor sharing a clipboard with other editors.
    pub fn with_clipboard(config: EditorConfig, clipboard: SharedClipboard) -> Self {
        Self {
            scene: Scene::new(),
            selection: SelectionManager::new(),
            history: CommandHistory::new(config.history.clone()),
            transient: TransientTracker::new(config.drag_threshold, config.min_resize_extent),
            clipboard,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Mutable selection access, e.g. for registering listeners.
    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn clipboard(&self) -> &SharedClipboard {
        &self.clipboard
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Run `f` with the clipboard borrowed. Selection events raised meanwhile
    /// are delivered once the borrow is released, so listeners may read the
    /// clipboard.
    fn with_context<R>(
        &mut self,
        f: impl FnOnce(&mut CommandHistory, &mut EditContext<'_>) -> R,
    ) -> R {
        self.selection.defer_events();
        let result = {
            let mut clipboard = self.clipboard.borrow_mut();
            let mut ctx = EditContext::new(&mut self.scene, &mut clipboard, &mut self.selection);
            f(&mut self.history, &mut ctx)
        };
        self.selection.flush_events();
        result
    }

    /// Run a command and record it in history.
    pub fn execute(&mut self, command: Box<dyn Command>) {
        self.with_context(|history, ctx| history.execute(command, ctx));
    }

    /// Undo the last command. In-progress gestures are cancelled first and
    /// ids no longer in the scene are dropped from the selection.
    pub fn undo(&mut self) -> bool {
        self.transient.cancel_all(&mut self.scene);
        let undone = self.with_context(|history, ctx| history.undo(ctx));
        self.selection.prune_missing(&self.scene);
        undone
    }

    /// Redo the last undone command. See [`undo`](Self::undo).
    pub fn redo(&mut self) -> bool {
        self.transient.cancel_all(&mut self.scene);
        let redone = self.with_context(|history, ctx| history.redo(ctx));
        self.selection.prune_missing(&self.scene);
        redone
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    /// Add an object as an undoable step. Returns its id.
    pub fn add_object(&mut self, obj: DrawingObject) -> Option<ObjectId> {
        if obj.is_canvas() {
            log::warn!("Ignoring attempt to add the canvas sentinel");
            return None;
        }
        let before = self.scene.len();
        self.execute(Box::new(AddCommand::new(obj)));
        self.added_since(before).into_iter().next()
    }

    /// Ids of objects appended since the scene had `len` objects.
    fn added_since(&self, len: usize) -> Vec<ObjectId> {
        self.scene
            .objects()
            .get(len..)
            .unwrap_or_default()
            .iter()
            .filter_map(|obj| obj.id().cloned())
            .collect()
    }

    /// Selected ids in paint order.
    fn selected_ids(&self) -> Vec<ObjectId> {
        self.scene
            .objects()
            .iter()
            .filter_map(|obj| obj.id())
            .filter(|id| self.selection.is_selected(id))
            .cloned()
            .collect()
    }

    pub fn delete_selection(&mut self) -> bool {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return false;
        }
        self.execute(Box::new(DeleteCommand::new(ids)));
        true
    }

    pub fn copy_selection(&mut self) -> bool {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return false;
        }
        self.execute(Box::new(CopyCommand::new(ids)));
        true
    }

    pub fn cut_selection(&mut self) -> bool {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return false;
        }
        self.execute(Box::new(CutCommand::new(ids)));
        true
    }

    /// Paste the clipboard and select the pasted objects.
    pub fn paste(&mut self) -> bool {
        if self.clipboard.borrow().is_empty() {
            return false;
        }
        let before = self.scene.len();
        self.execute(Box::new(PasteCommand::new()));
        let pasted = self.added_since(before);
        self.selection.set_selection(pasted);
        true
    }

    /// Duplicate the selection and select the duplicates.
    pub fn duplicate_selection(&mut self) -> bool {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return false;
        }
        let before = self.scene.len();
        self.execute(Box::new(DuplicateCommand::with_offset(
            ids,
            self.config.paste_offset,
        )));
        let duplicates = self.added_since(before);
        self.selection.set_selection(duplicates);
        true
    }

    pub fn select_all(&mut self) {
        let ids = self
            .scene
            .objects()
            .iter()
            .filter_map(|obj| obj.id().cloned())
            .collect();
        self.selection.set_selection(ids);
    }

    /// Select by clicking. Returns the id of the object hit, if any.
    ///
    /// Clicking empty canvas clears the selection unless a modifier asks to
    /// add or subtract.
    pub fn click_select(&mut self, point: Point, modifiers: Modifiers) -> Option<ObjectId> {
        let mode = SelectionMode::from_modifiers(modifiers);
        let Some(hit) = self.scene.object_at(point).and_then(|obj| obj.id().cloned()) else {
            if mode == SelectionMode::Replace {
                self.selection.clear_selection();
            }
            return None;
        };
        let next = update_selection(self.selection.selected(), std::slice::from_ref(&hit), mode);
        self.selection.set_selection(next);
        Some(hit)
    }

    /// Select every object lying completely inside the dragged rectangle.
    ///
    /// A rectangle no larger than `marquee_min_size` in either dimension is
    /// treated as a click on empty canvas. Returns whether the marquee was
    /// applied.
    pub fn marquee_select(&mut self, start: Point, end: Point, modifiers: Modifiers) -> bool {
        let mode = SelectionMode::from_modifiers(modifiers);
        let rect = normalize_rect(start.x, start.y, end.x, end.y);
        let min = self.config.marquee_min_size;
        if rect.width() <= min || rect.height() <= min {
            if mode == SelectionMode::Replace {
                self.selection.clear_selection();
            }
            return false;
        }
        let hits: Vec<ObjectId> = self
            .scene
            .objects_in_rect(rect, Containment::Complete)
            .into_iter()
            .filter_map(|obj| obj.id().cloned())
            .collect();
        let next = update_selection(self.selection.selected(), &hits, mode);
        self.selection.set_selection(next);
        true
    }

    /// Perform the action bound to a key, if any. Returns the action taken.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<EditAction> {
        let action = EditAction::from_key(key, modifiers)?;
        match action {
            EditAction::Undo => {
                self.undo();
            }
            EditAction::Redo => {
                self.redo();
            }
            EditAction::Copy => {
                self.copy_selection();
            }
            EditAction::Cut => {
                self.cut_selection();
            }
            EditAction::Paste => {
                self.paste();
            }
            EditAction::Duplicate => {
                self.duplicate_selection();
            }
            EditAction::SelectAll => self.select_all(),
            EditAction::Delete => {
                self.delete_selection();
            }
            EditAction::ClearSelection => self.selection.clear_selection(),
        }
        Some(action)
    }

    /// Start dragging or resizing an object.
    pub fn begin_gesture(&mut self, id: &str) -> bool {
        match self.scene.find_by_id(id) {
            Some(obj) => self.transient.begin(obj),
            None => false,
        }
    }

    /// Move an object live during a gesture.
    pub fn drag_to(&mut self, id: &str, position: Point) -> bool {
        self.transient.drag_to(id, position, &mut self.scene)
    }

    /// Scale an object live during a gesture, relative to its size at
    /// [`begin_gesture`](Self::begin_gesture).
    pub fn scale_to(&mut self, id: &str, scale_x: f64, scale_y: f64) -> bool {
        self.transient.scale_to(id, scale_x, scale_y, &mut self.scene)
    }

    /// Finish one gesture. Returns whether a history entry was recorded.
    pub fn commit_gesture(&mut self, id: &str) -> bool {
        match self.transient.commit(id, &mut self.scene) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Finish every gesture as a single history entry.
    pub fn commit_all(&mut self) -> bool {
        let mut commands = self.transient.commit_all(&mut self.scene);
        let command: Box<dyn Command> = match commands.len() {
            0 => return false,
            1 => match commands.pop() {
                Some(command) => command,
                None => return false,
            },
            n => Box::new(BatchCommand::new(format!("Transform {} object(s)", n), commands)),
        };
        self.execute(command);
        true
    }

    /// Abandon a gesture, restoring the object.
    pub fn cancel_gesture(&mut self, id: &str) -> bool {
        self.transient.cancel(id, &mut self.scene)
    }

    pub fn selection_bounds(&self) -> Option<Rect> {
        self.selection.selection_bounds(&self.scene)
    }

    /// Independent copy of the scene for consumers that detect changes by
    /// comparing snapshots.
    pub fn snapshot(&self) -> Scene {
        self.scene.copy()
    }

    /// Start over with an empty scene, selection and history. The clipboard
    /// is kept.
    pub fn reset(&mut self) {
        self.transient.cancel_all(&mut self.scene);
        self.scene.clear();
        self.selection.clear_selection();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MoveCommand;
    use crate::config::HistoryConfig;
    use crate::shapes::{Circle, Rectangle};

    fn editor() -> Editor {
        let mut editor = Editor::default();
        editor.add_object(Rectangle::new(Point::new(10.0, 10.0), 50.0, 30.0).into());
        editor.add_object(Rectangle::new(Point::new(100.0, 50.0), 40.0, 60.0).into());
        editor.add_object(Circle::new(Point::new(200.0, 100.0), 25.0).into());
        editor
    }

    fn selected(editor: &Editor) -> Vec<&str> {
        editor.selection().selected().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_add_object_is_undoable() {
        let mut editor = Editor::default();
        let id = editor
            .add_object(Rectangle::new(Point::ZERO, 5.0, 5.0).into())
            .unwrap();
        assert_eq!(id, "rect-1");
        assert!(editor.undo());
        assert!(editor.scene().is_empty());
        assert!(editor.redo());
        assert!(editor.scene().find_by_id("rect-1").is_some());
        assert!(editor.add_object(DrawingObject::Canvas).is_none());
    }

    #[test]
    fn test_move_scenario() {
        let mut editor = editor();
        editor.execute(Box::new(MoveCommand::for_id(
            "rect-1",
            Point::new(10.0, 10.0),
            Point::new(60.0, 40.0),
        )));
        assert!((editor.scene().objects()[0].position().x - 60.0).abs() < f64::EPSILON);
        editor.undo();
        assert!((editor.scene().objects()[0].position().x - 10.0).abs() < f64::EPSILON);
        editor.redo();
        assert!((editor.scene().objects()[0].position().x - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_click_select_modes() {
        let mut editor = editor();
        assert_eq!(
            editor.click_select(Point::new(20.0, 20.0), Modifiers::NONE).as_deref(),
            Some("rect-1")
        );
        editor.click_select(Point::new(110.0, 60.0), Modifiers::CTRL);
        assert_eq!(selected(&editor), vec!["rect-1", "rect-2"]);

        editor.click_select(Point::new(20.0, 20.0), Modifiers::CTRL_SHIFT);
        assert_eq!(selected(&editor), vec!["rect-2"]);

        editor.click_select(Point::new(200.0, 100.0), Modifiers::NONE);
        assert_eq!(selected(&editor), vec!["circle-3"]);
    }

    #[test]
    fn test_click_empty_canvas() {
        let mut editor = editor();
        editor.select_all();
        assert!(editor.click_select(Point::new(500.0, 500.0), Modifiers::CTRL).is_none());
        assert_eq!(editor.selection().len(), 3);
        editor.click_select(Point::new(500.0, 500.0), Modifiers::NONE);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_marquee_select() {
        let mut editor = editor();
        // Dragged bottom-right to top-left.
        assert!(editor.marquee_select(Point::new(150.0, 120.0), Point::new(0.0, 0.0), Modifiers::NONE));
        assert_eq!(selected(&editor), vec!["rect-1", "rect-2"]);

        assert!(editor.marquee_select(Point::new(170.0, 70.0), Point::new(230.0, 130.0), Modifiers::CTRL));
        assert_eq!(selected(&editor), vec!["rect-1", "rect-2", "circle-3"]);
    }

    #[test]
    fn test_small_marquee_clears() {
        let mut editor = editor();
        editor.select_all();
        assert!(!editor.marquee_select(Point::new(0.0, 0.0), Point::new(100.0, 5.0), Modifiers::NONE));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_delete_and_undo_restores_order() {
        let mut editor = editor();
        editor.click_select(Point::new(110.0, 60.0), Modifiers::NONE);
        assert!(editor.delete_selection());
        assert!(editor.selection().is_empty());
        assert_eq!(editor.scene().len(), 2);

        editor.undo();
        assert_eq!(editor.scene().index_of("rect-2"), Some(1));
        assert!(!editor.delete_selection());
    }

    #[test]
    fn test_cut_paste_selects_pasted() {
        let mut editor = editor();
        editor.click_select(Point::new(20.0, 20.0), Modifiers::NONE);
        assert!(editor.cut_selection());
        assert!(editor.selection().is_empty());
        assert!(editor.scene().find_by_id("rect-1").is_none());

        assert!(editor.paste());
        assert_eq!(editor.selection().len(), 1);
        let pasted_id = editor.selection().selected()[0].clone();
        let pasted = editor.scene().find_by_id(&pasted_id).unwrap();
        assert_eq!(pasted.position(), Point::new(30.0, 30.0));

        // Undoing the paste drops it from the selection too.
        editor.undo();
        assert!(editor.selection().is_empty());
        editor.undo();
        assert_eq!(editor.scene().index_of("rect-1"), Some(0));
    }

    #[test]
    fn test_paste_with_empty_clipboard() {
        let mut editor = editor();
        assert!(!editor.paste());
        assert_eq!(editor.history_status().undo_count, 3);
    }

    #[test]
    fn test_duplicate_selects_duplicates() {
        let mut editor = editor();
        editor.select_all();
        assert!(editor.duplicate_selection());
        assert_eq!(editor.scene().len(), 6);
        assert_eq!(editor.selection().len(), 3);
        for id in editor.selection().selected() {
            assert!(editor.scene().index_of(id).unwrap() >= 3);
        }
        assert_eq!(
            editor.history_status().last_command.as_deref(),
            Some("Duplicate 3 object(s)")
        );
    }

    #[test]
    fn test_shared_clipboard_across_editors() {
        let clipboard = Clipboard::shared();
        let mut source = Editor::with_clipboard(EditorConfig::default(), Rc::clone(&clipboard));
        let mut target = Editor::with_clipboard(EditorConfig::default(), clipboard);

        source.add_object(Rectangle::new(Point::ZERO, 10.0, 10.0).into());
        source.select_all();
        source.copy_selection();

        assert!(target.paste());
        assert_eq!(target.scene().len(), 1);
        assert_eq!(target.scene().objects()[0].position(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_handle_key() {
        let mut editor = editor();
        assert_eq!(editor.handle_key("a", Modifiers::CTRL), Some(EditAction::SelectAll));
        assert_eq!(editor.selection().len(), 3);

        assert_eq!(editor.handle_key("Delete", Modifiers::NONE), Some(EditAction::Delete));
        assert!(editor.scene().is_empty());

        assert_eq!(editor.handle_key("z", Modifiers::CTRL), Some(EditAction::Undo));
        assert_eq!(editor.scene().len(), 3);

        assert_eq!(editor.handle_key("Z", Modifiers::CTRL_SHIFT), Some(EditAction::Redo));
        assert!(editor.scene().is_empty());

        assert_eq!(editor.handle_key("q", Modifiers::NONE), None);
    }

    #[test]
    fn test_gesture_commit_and_click() {
        let mut editor = editor();
        let undo_before = editor.history_status().undo_count;

        assert!(editor.begin_gesture("rect-1"));
        editor.drag_to("rect-1", Point::new(10.4, 10.2));
        assert!(!editor.commit_gesture("rect-1"));
        assert_eq!(editor.history_status().undo_count, undo_before);

        assert!(editor.begin_gesture("rect-1"));
        editor.drag_to("rect-1", Point::new(30.0, 30.0));
        editor.drag_to("rect-1", Point::new(60.0, 40.0));
        assert!(editor.commit_gesture("rect-1"));
        assert_eq!(editor.history_status().undo_count, undo_before + 1);

        editor.undo();
        assert_eq!(editor.scene().objects()[0].position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_commit_all_is_one_entry() {
        let mut editor = editor();
        let undo_before = editor.history_status().undo_count;
        editor.begin_gesture("rect-1");
        editor.begin_gesture("circle-3");
        editor.drag_to("rect-1", Point::new(0.0, 0.0));
        editor.scale_to("circle-3", 2.0, 2.0);

        assert!(editor.commit_all());
        assert_eq!(editor.history_status().undo_count, undo_before + 1);
        assert_eq!(
            editor.history_status().last_command.as_deref(),
            Some("Transform 2 object(s)")
        );

        editor.undo();
        assert_eq!(editor.scene().objects()[0].position(), Point::new(10.0, 10.0));
        assert_eq!(editor.scene().objects()[2].bounds().width(), 50.0);
        assert!(!editor.commit_all());
    }

    #[test]
    fn test_cancel_gesture() {
        let mut editor = editor();
        editor.begin_gesture("rect-2");
        editor.drag_to("rect-2", Point::new(300.0, 300.0));
        assert!(editor.cancel_gesture("rect-2"));
        assert_eq!(editor.scene().objects()[1].position(), Point::new(100.0, 50.0));
        assert!(!editor.begin_gesture("missing"));
    }

    #[test]
    fn test_selection_listener_sees_editor_changes() {
        let mut editor = editor();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        editor.selection_mut().add_listener(move |event| {
            sink.borrow_mut().push(event.selected.len());
            Ok(())
        });
        editor.select_all();
        editor.delete_selection();
        assert_eq!(*events.borrow(), vec![3, 0]);
    }

    #[test]
    fn test_listener_can_read_clipboard_during_edits() {
        let mut editor = editor();
        let clipboard = Rc::clone(editor.clipboard());
        let paste_enabled = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&paste_enabled);
        editor.selection_mut().add_listener(move |_| {
            sink.borrow_mut().push(!clipboard.borrow().is_empty());
            Ok(())
        });

        editor.select_all();
        assert!(editor.delete_selection());
        assert!(editor.selection().is_empty());

        editor.undo();
        editor.click_select(Point::new(20.0, 20.0), Modifiers::NONE);
        assert!(editor.cut_selection());

        // select_all, delete, click, cut; the cut event sees the filled clipboard.
        assert_eq!(*paste_enabled.borrow(), vec![false, false, false, true]);

        assert!(editor.paste());
        editor.undo();
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_selection_bounds_and_snapshot() {
        let mut editor = editor();
        assert!(editor.selection_bounds().is_none());
        editor.click_select(Point::new(20.0, 20.0), Modifiers::NONE);
        assert_eq!(editor.selection_bounds(), Some(Rect::new(10.0, 10.0, 60.0, 40.0)));

        let snapshot = editor.snapshot();
        editor.begin_gesture("rect-1");
        editor.drag_to("rect-1", Point::ZERO);
        assert_eq!(snapshot.objects()[0].position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig {
            history: HistoryConfig {
                max_history_size: 2,
                ..HistoryConfig::default()
            },
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        for i in 0..4 {
            editor.add_object(Rectangle::new(Point::new(i as f64, 0.0), 1.0, 1.0).into());
        }
        assert_eq!(editor.history_status().undo_count, 2);
    }

    #[test]
    fn test_reset() {
        let mut editor = editor();
        editor.select_all();
        editor.reset();
        assert!(editor.scene().is_empty());
        assert!(editor.selection().is_empty());
        assert!(!editor.history().can_undo());
    }
}
