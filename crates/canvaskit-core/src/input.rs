//! Keyboard and modifier mapping for editing actions.

use crate::selection::SelectionMode;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

impl SelectionMode {
    /// Ctrl/Cmd+Shift subtracts, Ctrl/Cmd adds, anything else replaces.
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        match (modifiers.command(), modifiers.shift) {
            (true, true) => SelectionMode::Subtract,
            (true, false) => SelectionMode::Add,
            _ => SelectionMode::Replace,
        }
    }
}

/// Editing action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditAction {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    SelectAll,
    Delete,
    ClearSelection,
}

impl EditAction {
    /// Map a key press (DOM `KeyboardEvent.key` naming) to an action.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command() {
            let action = match key.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => EditAction::Redo,
                "z" => EditAction::Undo,
                "y" => EditAction::Redo,
                "c" => EditAction::Copy,
                "x" => EditAction::Cut,
                "v" => EditAction::Paste,
                "d" => EditAction::Duplicate,
                "a" => EditAction::SelectAll,
                _ => return None,
            };
            return Some(action);
        }
        match key {
            "Delete" | "Backspace" => Some(EditAction::Delete),
            "Escape" => Some(EditAction::ClearSelection),
            _ => None,
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: EditAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: EditAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, EditAction::Undo, "Undo"),
            Shortcut::new("Z", true, true, EditAction::Redo, "Redo"),
            Shortcut::new("Y", true, false, EditAction::Redo, "Redo"),
            Shortcut::new("C", true, false, EditAction::Copy, "Copy selection"),
            Shortcut::new("X", true, false, EditAction::Cut, "Cut selection"),
            Shortcut::new("V", true, false, EditAction::Paste, "Paste"),
            Shortcut::new("D", true, false, EditAction::Duplicate, "Duplicate selection"),
            Shortcut::new("A", true, false, EditAction::SelectAll, "Select all objects"),
            Shortcut::new("Delete", false, false, EditAction::Delete, "Delete selection"),
            Shortcut::new("Backspace", false, false, EditAction::Delete, "Delete selection"),
            Shortcut::new("Escape", false, false, EditAction::ClearSelection, "Clear selection"),
        ]
    }
}
