//! WebAssembly bindings for the CanvasKit editing core.
//!
//! Objects cross the JS boundary as plain objects shaped like
//! `{ type: "rect", id, x, y, width, height, fill, stroke, strokeWidth }`.

use canvaskit_core::{
    DrawingObject, Editor, EditorConfig, ListenerError, Modifiers, SelectionChangeEvent,
};
use kurbo::{Point, Rect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // A logger may already be installed by the host page
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("CanvasKit editor core loaded");
    }
}

/// Axis-aligned box in the `{x, y, width, height}` shape canvas code expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Build modifier state from DOM event flags.
pub fn modifiers(ctrl: bool, shift: bool, meta: bool) -> Modifiers {
    Modifiers {
        ctrl,
        shift,
        meta,
        alt: false,
    }
}

/// Serialize maps as plain JS objects rather than `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// An editor instance driven from JavaScript.
#[wasm_bindgen]
pub struct WebEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WebEditor {
    /// Create an editor, optionally from a JSON config such as
    /// `{"history":{"maxHistorySize":100},"pasteOffset":10}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => EditorConfig::default(),
        };
        Ok(WebEditor {
            editor: Editor::new(config),
        })
    }

    /// Add an object as an undoable step. Returns the assigned id.
    #[wasm_bindgen(js_name = addObject)]
    pub fn add_object(&mut self, object: JsValue) -> Result<Option<String>, JsValue> {
        let object: DrawingObject = serde_wasm_bindgen::from_value(object)?;
        Ok(self.editor.add_object(object))
    }

    /// All objects in paint order.
    pub fn objects(&self) -> Result<JsValue, JsValue> {
        to_js(self.editor.scene().objects())
    }

    /// Selected ids.
    pub fn selected(&self) -> Vec<String> {
        self.editor.selection().selected().to_vec()
    }

    #[wasm_bindgen(js_name = selectionBounds)]
    pub fn selection_bounds(&self) -> Result<JsValue, JsValue> {
        to_js(&self.editor.selection_bounds().map(Bounds::from))
    }

    /// Register `callback({selected, added, removed})` for selection changes.
    ///
    /// The callback runs as a microtask after the current `WebEditor` call
    /// returns, so it may call back into the editor.
    #[wasm_bindgen(js_name = onSelectionChange)]
    pub fn on_selection_change(&mut self, callback: js_sys::Function) {
        self.editor
            .selection_mut()
            .add_listener(move |event: &SelectionChangeEvent| {
                let value = to_js(event).map_err(|e| ListenerError::new(format!("{:?}", e)))?;
                let callback = callback.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                        log::warn!("Selection change callback failed: {:?}", e);
                    }
                });
                Ok(())
            });
    }

    /// Returns the id of the object hit, if any.
    #[wasm_bindgen(js_name = clickSelect)]
    pub fn click_select(&mut self, x: f64, y: f64, ctrl: bool, shift: bool, meta: bool) -> Option<String> {
        self.editor
            .click_select(Point::new(x, y), modifiers(ctrl, shift, meta))
    }

    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(js_name = marqueeSelect)]
    pub fn marquee_select(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        ctrl: bool,
        shift: bool,
        meta: bool,
    ) -> bool {
        self.editor.marquee_select(
            Point::new(x0, y0),
            Point::new(x1, y1),
            modifiers(ctrl, shift, meta),
        )
    }

    /// Returns true if the key was bound to an action (the caller should
    /// `preventDefault`).
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, meta: bool) -> bool {
        self.editor
            .handle_key(key, modifiers(ctrl, shift, meta))
            .is_some()
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: &str) -> bool {
        self.editor.begin_gesture(id)
    }

    #[wasm_bindgen(js_name = dragTo)]
    pub fn drag_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.editor.drag_to(id, Point::new(x, y))
    }

    #[wasm_bindgen(js_name = scaleTo)]
    pub fn scale_to(&mut self, id: &str, scale_x: f64, scale_y: f64) -> bool {
        self.editor.scale_to(id, scale_x, scale_y)
    }

    /// Commit every in-progress gesture as one undo step.
    #[wasm_bindgen(js_name = commitGestures)]
    pub fn commit_gestures(&mut self) -> bool {
        self.editor.commit_all()
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self, id: &str) -> bool {
        self.editor.cancel_gesture(id)
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// `{undoCount, redoCount, canUndo, canRedo, lastCommand}`
    #[wasm_bindgen(js_name = historyStatus)]
    pub fn history_status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.editor.history_status())
    }
}
