//! # Shelfplan Editor
//!
//! Interactive editing on top of [`shelfplan_core::GridManager`]: the
//! current selection, the shelf form used for new shelves, an undo/redo
//! history of every accepted change and the box statistics shown beside the
//! grid.

pub mod commands;
pub mod editor_state;
pub mod stats;

pub use commands::{EditorCommand, Placement};
pub use editor_state::{EditorState, ShelfForm};
pub use stats::{BoxStatistics, VariantCount};
