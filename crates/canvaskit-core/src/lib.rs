//! CanvasKit Core Library
//!
//! Scene, hit-testing, selection and undoable editing commands for 2D
//! canvas editors. Rendering and event plumbing live in the host.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod transient;

pub use clipboard::{Clipboard, SharedClipboard};
pub use commands::{Command, EditContext};
pub use config::{EditorConfig, HistoryConfig};
pub use editor::Editor;
pub use error::{ConfigError, ListenerError, SceneError};
pub use history::{CommandHistory, HistoryStatus};
pub use input::{EditAction, Modifiers, Shortcut, ShortcutRegistry};
pub use scene::Scene;
pub use selection::{Containment, SelectionChangeEvent, SelectionManager, SelectionMode};
pub use shapes::{DrawingObject, ObjectId, ShapeStyle};
pub use transient::TransientTracker;
