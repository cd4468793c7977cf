//! Error types for the layout crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while exporting, importing or sharing a layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The document was rejected by the core (malformed shape, bad sizes).
    #[error(transparent)]
    Core(#[from] shelfplan_core::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A share link could not be decoded.
    #[error("Invalid share link: {0}")]
    Share(String),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
