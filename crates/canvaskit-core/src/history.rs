//! Undo/redo history.

use crate::commands::{Command, EditContext};
use crate::config::HistoryConfig;
use serde::Serialize;
use std::collections::VecDeque;

/// Snapshot of the history for UI display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub undo_count: usize,
    pub redo_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Description of the command that undo would reverse.
    pub last_command: Option<String>,
}

/// Bounded undo and redo stacks.
///
/// The undo stack is capped by entry count and by the sum of the commands'
/// [`Command::estimated_size`]. The oldest entries are evicted first.
pub struct CommandHistory {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    config: HistoryConfig,
}

impl std::fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHistory")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl CommandHistory {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Run a command and record it. Clears the redo stack.
    pub fn execute(&mut self, mut command: Box<dyn Command>, ctx: &mut EditContext<'_>) {
        command.execute(ctx);
        log::debug!("Executed: {}", command.description());
        self.redo_stack.clear();
        self.undo_stack.push_back(command);

        while self.undo_stack.len() > self.config.max_history_size {
            self.undo_stack.pop_front();
        }
        self.enforce_memory_limit();
    }

    /// Undo the last command.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> bool {
        let Some(mut command) = self.undo_stack.pop_back() else {
            return false;
        };
        command.undo(ctx);
        log::debug!("Undid: {}", command.description());
        self.redo_stack.push(command);
        true
    }

    /// Redo the last undone command.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.execute(ctx);
        log::debug!("Redid: {}", command.description());
        self.undo_stack.push_back(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            last_command: self.undo_stack.back().map(|c| c.description()),
        }
    }

    /// Estimated bytes held by both stacks.
    pub fn estimated_usage(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|c| c.estimated_size())
            .sum()
    }

    /// When over budget, drop the oldest fifth of the undo stack (at least
    /// one entry) until back under it or out of entries.
    fn enforce_memory_limit(&mut self) {
        while self.estimated_usage() > self.config.max_memory_usage && !self.undo_stack.is_empty() {
            let count = (self.undo_stack.len() / 5).max(1);
            self.undo_stack.drain(..count);
            log::debug!(
                "History over memory budget; evicted {} oldest command(s)",
                count
            );
        }
    }
}
