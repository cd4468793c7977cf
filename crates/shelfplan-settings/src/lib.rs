//! Shelfplan Settings Crate
//!
//! Handles editor configuration and its persistence in the platform config
//! directory.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, EditorSettings, ShareSettings, MAX_RECENT_LAYOUTS};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
