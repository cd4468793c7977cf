//! # Shelfplan
//!
//! Warehouse shelf layout editor. Shelves are placed on a square grid and
//! every placement is checked against the grid bounds and the cells other
//! shelves already occupy.
//!
//! ## Architecture
//!
//! Shelfplan is organized as a workspace with multiple crates:
//!
//! 1. **shelfplan-core** - Cells, rotations, footprints, the occupancy map and
//!    the grid manager
//! 2. **shelfplan-layout** - Layout documents, file I/O and share links
//! 3. **shelfplan-editor** - Selection, shelf form, undo/redo and box statistics
//! 4. **shelfplan-settings** - User configuration and its persistence
//! 5. **shelfplan** - Command-line driver that integrates all crates

pub mod cli;

pub use shelfplan_core::{
    BoxTable, BoxVariant, Cell, DroppedCell, Error, GridManager, ItemId, OccupancyMap,
    PlacementError, Result, Rotation, Shelf, ShelfBox,
};
pub use shelfplan_editor::{BoxStatistics, EditorCommand, EditorState};
pub use shelfplan_layout::{
    parse_share_url, share_url, ExportMode, LayoutDocument, LayoutError, LayoutMetadata,
};
pub use shelfplan_settings::{Config, EditorSettings, SettingsPersistence, ShareSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays parseable
/// - RUST_LOG environment variable support, `info` by default
/// - JSON lines instead of human-readable text when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.compact())
            .try_init()?;
    }

    Ok(())
}
