//! Layout documents.
//!
//! A layout document is the portable form of a [`GridManager`]: grid size plus
//! every shelf's id, anchor, dimensions, rotation and optionally its boxes.
//! Importing replays each shelf's footprint onto a fresh map, so a document
//! exported from a valid state reproduces the same occupancy map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use shelfplan_core::{
    BoxTable, Cell, Error, GridManager, ItemId, Rotation, Shelf, ShelfBox, MAX_GRID_SIZE,
    MAX_SHELF_ROWS,
};

use crate::error::Result;

/// Layout document format version
pub const LAYOUT_FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    LAYOUT_FORMAT_VERSION
}

/// Whether exported shelves carry their box tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    #[default]
    WithBoxes,
    WithoutBoxes,
}

/// Complete layout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    pub grid_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LayoutMetadata>,
    #[serde(default)]
    pub items: Vec<ShelfData>,
}

/// Optional document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Serialized shelf
///
/// `rotation` stays a raw degree value here so that a bad angle is reported
/// as a malformed document rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfData {
    pub id: ItemId,
    pub anchor: Cell,
    pub columns: usize,
    pub rows: usize,
    #[serde(default)]
    pub rotation: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<Vec<Vec<Option<ShelfBox>>>>,
}

impl ShelfData {
    pub fn from_shelf(shelf: &Shelf, mode: ExportMode) -> Self {
        Self {
            id: shelf.id(),
            anchor: shelf.anchor(),
            columns: shelf.columns(),
            rows: shelf.rows(),
            rotation: shelf.rotation().degrees(),
            boxes: match mode {
                ExportMode::WithBoxes => Some(shelf.boxes().as_slots().to_vec()),
                ExportMode::WithoutBoxes => None,
            },
        }
    }

    fn to_shelf(&self) -> shelfplan_core::Result<Shelf> {
        let columns_ok = (1..=MAX_GRID_SIZE).contains(&self.columns);
        let rows_ok = (1..=MAX_SHELF_ROWS).contains(&self.rows);
        if !columns_ok || !rows_ok {
            return Err(Error::malformed(format!(
                "shelf {} is {}x{}; columns must be 1..={} and rows 1..={}",
                self.id, self.columns, self.rows, MAX_GRID_SIZE, MAX_SHELF_ROWS
            )));
        }
        let rotation = Rotation::from_degrees(self.rotation).ok_or_else(|| {
            Error::malformed(format!(
                "shelf {} rotation {} is not 0, 90, 180 or 270",
                self.id, self.rotation
            ))
        })?;
        let shelf = Shelf::new(self.id, self.anchor, self.columns, self.rows, rotation)
            .map_err(|e| Error::malformed(format!("shelf {}: {}", self.id, e)))?;
        match &self.boxes {
            Some(slots) => shelf.with_boxes(BoxTable::from_slots(slots.clone())),
            None => Ok(shelf),
        }
    }
}

impl LayoutDocument {
    /// An empty layout on a `grid_size x grid_size` grid
    pub fn new(grid_size: usize) -> Self {
        Self {
            version: LAYOUT_FORMAT_VERSION,
            grid_size,
            metadata: None,
            items: Vec::new(),
        }
    }

    /// Attach a name, stamping created/modified with the current time
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let now = Utc::now();
        self.metadata = Some(LayoutMetadata {
            name: name.into(),
            created: now,
            modified: now,
            description: String::new(),
        });
        self
    }

    /// Snapshot a manager's shelves in id order
    pub fn export(manager: &GridManager, mode: ExportMode) -> Self {
        Self {
            version: LAYOUT_FORMAT_VERSION,
            grid_size: manager.grid_size(),
            metadata: None,
            items: manager
                .shelves()
                .map(|shelf| ShelfData::from_shelf(shelf, mode))
                .collect(),
        }
    }

    /// Check version, sizes, rotations, id uniqueness and box table shapes.
    ///
    /// Footprint overlap is checked when the document is replayed in
    /// [`LayoutDocument::to_manager`].
    pub fn validate(&self) -> shelfplan_core::Result<()> {
        self.shelves().map(|_| ())
    }

    fn shelves(&self) -> shelfplan_core::Result<Vec<Shelf>> {
        if self.version == 0 || self.version > LAYOUT_FORMAT_VERSION {
            return Err(Error::malformed(format!(
                "unsupported layout version {}",
                self.version
            )));
        }
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(Error::malformed(format!(
                "grid size {} must be between 1 and {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| {
                if !seen.insert(item.id) {
                    return Err(Error::malformed(format!("duplicate shelf id {}", item.id)));
                }
                item.to_shelf()
            })
            .collect()
    }

    /// Replay the document onto a fresh manager of the document's grid size
    pub fn to_manager(&self) -> shelfplan_core::Result<GridManager> {
        let shelves = self.shelves()?;
        GridManager::from_shelves(self.grid_size, shelves)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document. Any shape problem, including JSON that
    /// does not match the schema, is a malformed document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self =
            serde_json::from_str(json).map_err(|e| Error::malformed(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!("Saved layout to {}", path.as_ref().display());
        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let document = Self::from_json(&content)?;
        tracing::info!(
            "Loaded layout with {} shelves from {}",
            document.items.len(),
            path.as_ref().display()
        );
        Ok(document)
    }

    /// Refresh the modified timestamp, if the document carries metadata
    pub fn touch(&mut self) {
        if let Some(metadata) = &mut self.metadata {
            metadata.modified = Utc::now();
        }
    }
}
