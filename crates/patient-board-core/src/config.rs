//! Board configuration.
//!
//! Resolved once at startup and handed to [`Board`](crate::board::Board);
//! nothing in the core reads the environment.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::SizingPolicy;

/// Prompt shown before a record is deleted.
pub const DEFAULT_DELETE_PROMPT: &str = "¿Está seguro de que desea eliminar este paciente?";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime settings for a board. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Load the demonstration record on startup
    pub seed_sample_data: bool,
    /// Delay before focusing the first field of a new row
    pub focus_delay_ms: u64,
    pub delete_prompt: String,
    pub sizing: SizingPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            focus_delay_ms: 100,
            delete_prompt: DEFAULT_DELETE_PROMPT.to_string(),
            sizing: SizingPolicy::default(),
        }
    }
}

impl BoardConfig {
    /// Parse from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert!(config.seed_sample_data);
        assert_eq!(config.focus_delay(), Duration::from_millis(100));
        assert_eq!(config.sizing.multiline_max_height_px, 400);
    }

    #[test]
    fn test_partial_json() {
        let config =
            BoardConfig::from_json_str(r#"{"seed_sample_data": false, "sizing": {"char_width_px": 10}}"#)
                .unwrap();
        assert!(!config.seed_sample_data);
        assert_eq!(config.focus_delay_ms, 100);
        assert_eq!(config.sizing.char_width_px, 10);
        assert_eq!(config.sizing.single_line_max_width_px, 300);
    }

    #[test]
    fn test_invalid_json() {
        let err = BoardConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
