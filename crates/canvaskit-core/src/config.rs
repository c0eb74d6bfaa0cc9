//! Editor configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default maximum number of undo entries.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;
/// Default approximate memory budget for history, in bytes.
pub const DEFAULT_MAX_MEMORY_USAGE: usize = 100 * 1024 * 1024;
/// Offset applied to pasted and duplicated objects.
pub const DEFAULT_PASTE_OFFSET: f64 = 20.0;
/// Movement (per axis) below which a drag counts as a click.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 1.0;
/// Marquee rectangles this small (in either dimension) count as a click.
pub const DEFAULT_MARQUEE_MIN_SIZE: f64 = 5.0;
/// Smallest width/height/radius a resize gesture may produce.
pub const DEFAULT_MIN_RESIZE_EXTENT: f64 = 5.0;

/// Bounds on the undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum undo stack length; the oldest entries are evicted first.
    pub max_history_size: usize,
    /// Approximate memory budget (sum of command size estimates).
    pub max_memory_usage: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_memory_usage: DEFAULT_MAX_MEMORY_USAGE,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == 0 {
            return Err(ConfigError::Invalid(
                "maxHistorySize must be at least 1".to_string(),
            ));
        }
        if self.max_memory_usage == 0 {
            return Err(ConfigError::Invalid(
                "maxMemoryUsage must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tunables for the editor facade and its gesture handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub history: HistoryConfig,
    pub paste_offset: f64,
    pub drag_threshold: f64,
    pub marquee_min_size: f64,
    pub min_resize_extent: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            paste_offset: DEFAULT_PASTE_OFFSET,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            marquee_min_size: DEFAULT_MARQUEE_MIN_SIZE,
            min_resize_extent: DEFAULT_MIN_RESIZE_EXTENT,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config; missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.history.validate()?;
        for (name, value) in [
            ("dragThreshold", self.drag_threshold),
            ("marqueeMinSize", self.marquee_min_size),
            ("minResizeExtent", self.min_resize_extent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.paste_offset.is_finite() {
            return Err(ConfigError::Invalid("pasteOffset must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history.max_history_size, 50);
        assert_eq!(config.history.max_memory_usage, 100 * 1024 * 1024);
        assert!((config.paste_offset - 20.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"history":{"maxHistorySize":10}}"#).unwrap();
        assert_eq!(config.history.max_history_size, 10);
        assert_eq!(config.history.max_memory_usage, DEFAULT_MAX_MEMORY_USAGE);
        assert!((config.marquee_min_size - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_zero_history() {
        let result = EditorConfig::from_json(r#"{"history":{"maxHistorySize":0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = EditorConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = EditorConfig {
            drag_threshold: -1.0,
            ..EditorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
