//! # Shelfplan Layout
//!
//! The portable form of a shelf layout.
//!
//! - **Documents**: versioned JSON (`{ version, gridSize, items }`), exported
//!   with or without box tables
//! - **Validation**: imports are checked for shape and replayed onto a fresh
//!   occupancy map; anything inconsistent is a malformed document
//! - **Files**: pretty-printed JSON on disk
//! - **Share links**: the compact document percent-encoded into a URL query

pub mod document;
pub mod error;
pub mod share;

pub use document::{ExportMode, LayoutDocument, LayoutMetadata, ShelfData, LAYOUT_FORMAT_VERSION};
pub use error::{LayoutError, Result};
pub use share::{parse_share_url, share_url, SHARE_PARAM};
