//! Configuration and settings management for Shelfplan
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Editor defaults (grid size, shelf form values, history depth)
//! - Share link preferences (base URL, whether boxes are included)
//! - Recently opened layouts

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of remembered layout files
pub const MAX_RECENT_LAYOUTS: usize = 10;

/// Editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid size for new layouts
    pub default_grid_size: usize,
    /// Smallest grid the editor will resize to
    pub min_grid_size: usize,
    /// Column count pre-filled in the shelf form
    pub default_columns: usize,
    /// Row count pre-filled in the shelf form
    pub default_rows: usize,
    /// Maximum undo depth
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_grid_size: 100,
            min_grid_size: 10,
            default_columns: 3,
            default_rows: 3,
            history_limit: 50,
        }
    }
}

impl EditorSettings {
    /// Clamp a requested grid size to the configured minimum
    pub fn clamp_grid_size(&self, size: usize) -> usize {
        size.max(self.min_grid_size)
    }
}

/// Share link preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Editor URL the layout query is appended to
    pub base_url: String,
    /// Include box tables in shared layouts
    pub include_boxes: bool,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            include_boxes: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recent layouts, most recent first
    pub recent_layouts: Vec<PathBuf>,
    /// Editor defaults
    pub editor: EditorSettings,
    /// Share link preferences
    pub share: ShareSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if editor.min_grid_size == 0 {
            return Err(SettingsError::invalid(
                "editor.min_grid_size",
                "must be at least 1",
            ));
        }

        if editor.default_grid_size < editor.min_grid_size {
            return Err(SettingsError::invalid(
                "editor.default_grid_size",
                format!("must be at least min_grid_size ({})", editor.min_grid_size),
            ));
        }

        if editor.default_columns == 0 {
            return Err(SettingsError::invalid(
                "editor.default_columns",
                "must be at least 1",
            ));
        }

        if editor.default_rows == 0 {
            return Err(SettingsError::invalid(
                "editor.default_rows",
                "must be at least 1",
            ));
        }

        if editor.history_limit == 0 {
            return Err(SettingsError::invalid(
                "editor.history_limit",
                "must be at least 1",
            ));
        }

        if self.share.base_url.trim().is_empty() {
            return Err(SettingsError::invalid("share.base_url", "must not be empty"));
        }

        Ok(())
    }

    /// Add layout to recent layouts list
    pub fn add_recent_layout(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_layouts.retain(|f| f != &path);

        // Add to front
        self.recent_layouts.insert(0, path);

        // Trim to max size
        self.recent_layouts.truncate(MAX_RECENT_LAYOUTS);
    }
}

enum Format {
    Json,
    Toml,
}

fn extension(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}
