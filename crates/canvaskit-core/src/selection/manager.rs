//! Selection state with change notifications.

use crate::error::ListenerError;
use crate::scene::Scene;
use crate::shapes::{DrawingObject, ObjectId};
use kurbo::Rect;
use serde::Serialize;

/// Payload delivered to selection listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionChangeEvent {
    /// The full selection after the change.
    pub selected: Vec<ObjectId>,
    /// Ids that entered the selection.
    pub added: Vec<ObjectId>,
    /// Ids that left the selection.
    pub removed: Vec<ObjectId>,
}

/// Handle returned by [`SelectionManager::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Selection change callback. An `Err` is logged and does not stop the
/// remaining listeners.
pub type SelectionListener = Box<dyn FnMut(&SelectionChangeEvent) -> Result<(), ListenerError>>;

/// Tracks which objects are selected, by id.
///
/// The manager never checks that members still exist in a scene; commands
/// that remove objects prune it through [`SelectionManager::retain`].
#[derive(Default)]
pub struct SelectionManager {
    /// Selected ids in insertion order.
    selected: Vec<ObjectId>,
    listeners: Vec<(ListenerId, SelectionListener)>,
    next_listener_id: u64,
    /// Events held back between `defer_events` and `flush_events`.
    deferred: Option<Vec<SelectionChangeEvent>>,
    disposed: bool,
}

impl std::fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .field("deferred", &self.deferred.as_ref().map(Vec::len))
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the selection. No-op if already selected.
    pub fn add_to_selection(&mut self, id: &str) {
        if self.is_selected(id) {
            return;
        }
        self.selected.push(id.to_string());
        self.notify_change(vec![id.to_string()], Vec::new());
    }

    /// Remove an object from the selection. No-op if not selected.
    pub fn remove_from_selection(&mut self, id: &str) {
        let Some(index) = self.selected.iter().position(|s| s == id) else {
            return;
        };
        let removed = self.selected.remove(index);
        self.notify_change(Vec::new(), vec![removed]);
    }

    /// Replace the selection with a single object, or with nothing.
    ///
    /// Always emits, reporting the whole previous selection as removed.
    pub fn select_single(&mut self, id: Option<&str>) {
        let previous = std::mem::take(&mut self.selected);
        let added: Vec<ObjectId> = id.map(|id| vec![id.to_string()]).unwrap_or_default();
        self.selected = added.clone();
        self.notify_change(added, previous);
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if self.is_selected(id) {
            self.remove_from_selection(id);
        } else {
            self.add_to_selection(id);
        }
    }

    /// Clear the selection. Emits only if something was selected.
    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let previous = std::mem::take(&mut self.selected);
        self.notify_change(Vec::new(), previous);
    }

    /// Replace the selection wholesale (e.g. with an `update_selection`
    /// result). Emits the diff, and only if membership changed.
    pub fn set_selection(&mut self, ids: Vec<ObjectId>) {
        let mut next: Vec<ObjectId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        let added: Vec<ObjectId> = next
            .iter()
            .filter(|id| !self.selected.contains(id))
            .cloned()
            .collect();
        let removed: Vec<ObjectId> = self
            .selected
            .iter()
            .filter(|id| !next.contains(id))
            .cloned()
            .collect();
        self.selected = next;
        if !added.is_empty() || !removed.is_empty() {
            self.notify_change(added, removed);
        }
    }

    /// Keep only members for which `keep` returns true. Emits if any were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let mut removed = Vec::new();
        self.selected.retain(|id| {
            let kept = keep(id.as_str());
            if !kept {
                removed.push(id.clone());
            }
            kept
        });
        if !removed.is_empty() {
            self.notify_change(Vec::new(), removed);
        }
    }

    /// Drop members that no longer exist in the scene.
    pub fn prune_missing(&mut self, scene: &Scene) {
        self.retain(|id| scene.find_by_id(id).is_some());
    }

    /// Selected ids in insertion order.
    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Resolve the selected ids against a scene, in selection order.
    /// Stale ids are skipped.
    pub fn selected_objects<'a>(&self, scene: &'a Scene) -> Vec<&'a DrawingObject> {
        self.selected
            .iter()
            .filter_map(|id| scene.find_by_id(id))
            .collect()
    }

    /// Bounding box of a single object.
    pub fn object_bounds(obj: &DrawingObject) -> Rect {
        obj.bounds()
    }

    /// Union of the bounds of every selected object found in `scene`.
    pub fn selection_bounds(&self, scene: &Scene) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for id in &self.selected {
            let Some(obj) = scene.find_by_id(id) else {
                log::debug!("Selected id {} is not in the scene; skipping for bounds", id);
                continue;
            };
            let bounds = Self::object_bounds(obj);
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Register a change listener. Ignored after [`dispose`](Self::dispose).
    pub fn add_listener(
        &mut self,
        listener: impl FnMut(&SelectionChangeEvent) -> Result<(), ListenerError> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        if self.disposed {
            log::warn!("Ignoring selection listener registered after dispose");
            return id;
        }
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Hold back change events until [`flush_events`](Self::flush_events).
    ///
    /// The editor defers while a command runs, so listeners never observe
    /// the editor mid-command.
    pub fn defer_events(&mut self) {
        if self.deferred.is_none() {
            self.deferred = Some(Vec::new());
        }
    }

    /// Deliver held-back events in order and resume immediate delivery.
    pub fn flush_events(&mut self) {
        let Some(events) = self.deferred.take() else {
            return;
        };
        for event in &events {
            self.deliver(event);
        }
    }

    fn notify_change(&mut self, added: Vec<ObjectId>, removed: Vec<ObjectId>) {
        if self.listeners.is_empty() {
            return;
        }
        let event = SelectionChangeEvent {
            selected: self.selected.clone(),
            added,
            removed,
        };
        if let Some(queue) = self.deferred.as_mut() {
            queue.push(event);
            return;
        }
        self.deliver(&event);
    }

    fn deliver(&mut self, event: &SelectionChangeEvent) {
        for (id, listener) in &mut self.listeners {
            if let Err(e) = listener(event) {
                log::warn!("Selection listener {:?} error: {}", id, e);
            }
        }
    }

    /// Clear the selection and drop every listener. Terminal: no further
    /// events are delivered.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.deferred = None;
        self.selected.clear();
        self.disposed = true;
    }
}
