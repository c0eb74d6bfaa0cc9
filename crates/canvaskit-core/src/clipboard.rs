//! Clipboard for copy/paste between scenes.

use crate::config::DEFAULT_PASTE_OFFSET;
use crate::shapes::DrawingObject;
use kurbo::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// A clipboard several editors can hold at once.
pub type SharedClipboard = Rc<RefCell<Clipboard>>;

/// Stored snapshot of copied objects.
///
/// Pasting never changes the stored snapshot, so repeated pastes all land at
/// the same offset from the originals.
#[derive(Debug, Clone)]
pub struct Clipboard {
    contents: Vec<DrawingObject>,
    offset: Vec2,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        Self::with_offset(DEFAULT_PASTE_OFFSET)
    }

    /// Create a clipboard that offsets pasted objects by `offset` on both axes.
    pub fn with_offset(offset: f64) -> Self {
        Self {
            contents: Vec::new(),
            offset: Vec2::new(offset, offset),
        }
    }

    /// Create a clipboard wrapped for sharing between editors.
    pub fn shared() -> SharedClipboard {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Replace the contents with copies of `objects`. The canvas sentinel
    /// is skipped.
    pub fn copy<'a>(&mut self, objects: impl IntoIterator<Item = &'a DrawingObject>) {
        self.contents = objects
            .into_iter()
            .filter(|obj| !obj.is_canvas())
            .cloned()
            .collect();
        log::debug!("Copied {} object(s) to clipboard", self.contents.len());
    }

    /// Fresh copies of the contents with new ids, offset from the originals.
    pub fn paste(&self) -> Vec<DrawingObject> {
        self.contents
            .iter()
            .map(|obj| {
                let mut pasted = obj.clone();
                pasted.regenerate_id();
                pasted.translate(self.offset);
                pasted
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// The stored snapshot.
    pub fn contents(&self) -> &[DrawingObject] {
        &self.contents
    }
}
