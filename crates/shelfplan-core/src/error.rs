//! Error handling for Shelfplan
//!
//! Every failure in the core is a rejected operation: the manager hands back
//! one of these values and leaves its state exactly as it was before the call.
//!
//! - Placement errors (footprint leaves the grid or hits another shelf)
//! - Lookup errors (unknown shelf id, box slot outside the shelf)
//! - Document errors (an imported layout failed its shape checks)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::types::{Cell, ItemId};
use thiserror::Error;

/// Placement error type
///
/// Raised when a footprint cannot be committed to the occupancy map.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// A footprint cell lies outside `[0, grid_size)` on either axis
    #[error("Cell {cell} is outside the grid")]
    OutOfBounds {
        /// The first offending cell.
        cell: Cell,
    },

    /// A footprint cell is already claimed by a different shelf
    #[error("Cell {cell} is already occupied by shelf {occupant}")]
    Overlap {
        /// The first offending cell.
        cell: Cell,
        /// The shelf currently holding the cell.
        occupant: ItemId,
    },
}

/// Main error type for Shelfplan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Placement rejected
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Operation referenced an unknown shelf
    #[error("Shelf {id} not found")]
    NotFound {
        /// The unknown shelf id.
        id: ItemId,
    },

    /// A restored shelf collides with a registered id
    #[error("Shelf id {id} is already registered")]
    DuplicateId {
        /// The colliding id.
        id: ItemId,
    },

    /// Box slot outside the shelf's columns x rows table
    #[error("Slot ({column}, {row}) is outside shelf {id} ({columns}x{rows})")]
    IndexOutOfRange {
        /// The shelf being addressed.
        id: ItemId,
        /// Requested local column.
        column: usize,
        /// Requested local row.
        row: usize,
        /// Column count of the shelf.
        columns: usize,
        /// Row count of the shelf.
        rows: usize,
    },

    /// An imported layout document failed its schema or shape checks
    #[error("Malformed layout document: {reason}")]
    MalformedDocument {
        /// What was wrong with the document.
        reason: String,
    },

    /// Grid size or shelf dimension outside `1..=max`
    #[error("Invalid size {size}: must be between 1 and {max}")]
    InvalidSize {
        /// The rejected size.
        size: usize,
        /// The largest accepted value.
        max: usize,
    },
}

impl Error {
    /// Create a malformed-document error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Check `size` against `1..=max`
    pub fn check_size(size: usize, max: usize) -> Result<usize> {
        if size == 0 || size > max {
            return Err(Self::InvalidSize { size, max });
        }
        Ok(size)
    }

    /// Returns the placement error if this is one.
    pub fn as_placement(&self) -> Option<PlacementError> {
        match self {
            Self::Placement(err) => Some(*err),
            _ => None,
        }
    }
}

/// Result type for Shelfplan operations
pub type Result<T> = std::result::Result<T, Error>;
