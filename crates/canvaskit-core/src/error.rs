//! Error types.
//!
//! Mutators that UI events drive (scene insertion, selection changes,
//! undo/redo) never surface these to the caller: they log and no-op. The
//! fallible `try_*` and parsing entry points return them.

use thiserror::Error;

/// Rejected scene mutations.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("the canvas background sentinel cannot be added to a scene")]
    CanvasSentinel,
}

/// Invalid or unparsable editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure reported by a selection listener. Logged, never propagated.
#[derive(Debug, Error)]
#[error("selection listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
