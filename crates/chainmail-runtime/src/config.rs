#![forbid(unsafe_code)]

//! Editor tunables.
//!
//! [`EditorConfig`] gathers the few constants the editor behavior depends
//! on. Defaults reproduce the stock editor exactly; hosts can override them
//! from the environment or from a TOML/JSON file.
//!
//! # Loading
//!
//! ```toml
//! # chainmail-editor.toml
//! history_depth = 100
//! duplicate_offset = 0.25
//! primary_modifier = "super"
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::from_toml_file("chainmail-editor.toml")?;
//! let config = EditorConfig::from_env();
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `CHAINMAIL_HISTORY_DEPTH` | usize | 50 | Retained undo snapshots |
//! | `CHAINMAIL_DUPLICATE_OFFSET` | f64 | 0.3 | X offset of a duplicated ring |
//! | `CHAINMAIL_NEW_RING_HEIGHT` | f64 | 0.5 | Y position of an added ring |
//! | `CHAINMAIL_PRIMARY_MODIFIER` | string | "either" | `ctrl`, `super`, or `either` |

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keybinding::PrimaryModifier;
use crate::undo::DEFAULT_HISTORY_DEPTH;

/// Default X offset applied to duplicated rings.
pub const DEFAULT_DUPLICATE_OFFSET: f64 = 0.3;

/// Default height at which new rings appear.
pub const DEFAULT_NEW_RING_HEIGHT: f64 = 0.5;

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snapshots kept in the undo log, including the current one.
    pub history_depth: usize,

    /// Offset along X given to a duplicate so it does not hide its source.
    pub duplicate_offset: f64,

    /// Y position of rings created by `add_ring`.
    pub new_ring_height: f64,

    /// Modifier that turns `z`/`y` into undo/redo.
    pub primary_modifier: PrimaryModifier,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
            new_ring_height: DEFAULT_NEW_RING_HEIGHT,
            primary_modifier: PrimaryModifier::default(),
        }
    }
}

impl EditorConfig {
    /// Set the history depth.
    #[must_use]
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Set the primary modifier.
    #[must_use]
    pub fn with_primary_modifier(mut self, modifier: PrimaryModifier) -> Self {
        self.primary_modifier = modifier;
        self
    }

    /// Load config from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults; the result is
    /// [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("CHAINMAIL_HISTORY_DEPTH")
            && let Ok(depth) = val.trim().parse()
        {
            config.history_depth = depth;
        }
        if let Some(val) = lookup("CHAINMAIL_DUPLICATE_OFFSET")
            && let Ok(offset) = val.trim().parse()
        {
            config.duplicate_offset = offset;
        }
        if let Some(val) = lookup("CHAINMAIL_NEW_RING_HEIGHT")
            && let Ok(height) = val.trim().parse()
        {
            config.new_ring_height = height;
        }
        if let Some(val) = lookup("CHAINMAIL_PRIMARY_MODIFIER")
            && let Some(modifier) = PrimaryModifier::from_str_opt(&val)
        {
            config.primary_modifier = modifier;
        }

        config.validated()
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history_depth == 0 {
            errors.push("history_depth must be >= 1".into());
        }
        if !self.duplicate_offset.is_finite() {
            errors.push(format!(
                "duplicate_offset must be finite, got {}",
                self.duplicate_offset
            ));
        }
        if !self.new_ring_height.is_finite() {
            errors.push(format!(
                "new_ring_height must be finite, got {}",
                self.new_ring_height
            ));
        }

        errors
    }

    /// Return a config with out-of-range values replaced.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.history_depth = self.history_depth.max(1);
        if !self.duplicate_offset.is_finite() {
            self.duplicate_offset = DEFAULT_DUPLICATE_OFFSET;
        }
        if !self.new_ring_height.is_finite() {
            self.new_ring_height = DEFAULT_NEW_RING_HEIGHT;
        }
        self
    }

    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading an editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
