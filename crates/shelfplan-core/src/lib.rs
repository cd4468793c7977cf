//! # Shelfplan Core
//!
//! Grid occupancy and placement validation for warehouse shelf layouts.
//!
//! Shelves stand on a square grid. Each shelf covers a single line of cells
//! computed from its anchor, column count and rotation; the
//! [`GridManager`] keeps an occupancy map of those cells and guarantees that
//! no two shelves share a cell and that every mapped cell belongs to the
//! shelf whose footprint contains it.
//!
//! ## Usage
//!
//! ```rust
//! use shelfplan_core::{Cell, GridManager, Rotation};
//!
//! let mut grid = GridManager::new(10)?;
//! let id = grid.add(Cell::new(5, 5), 3, 2)?.id();
//! assert_eq!(
//!     grid.shelf(id).map(|s| s.occupied_cells().to_vec()),
//!     Some(vec![Cell::new(4, 5), Cell::new(5, 5), Cell::new(6, 5)])
//! );
//!
//! grid.rotate(id)?;
//! assert_eq!(grid.shelf(id).map(|s| s.rotation()), Some(Rotation::Deg90));
//! # Ok::<(), shelfplan_core::Error>(())
//! ```

pub mod boxes;
pub mod error;
pub mod footprint;
pub mod manager;
pub mod occupancy;
pub mod shelf;
pub mod types;

pub use boxes::{BoxTable, BoxVariant, ShelfBox};
pub use error::{Error, PlacementError, Result};
pub use footprint::{footprint_bounds, occupied_cells};
pub use manager::{DroppedCell, GridManager};
pub use occupancy::OccupancyMap;
pub use shelf::Shelf;
pub use types::{Cell, ItemId, Rotation, MAX_GRID_SIZE, MAX_SHELF_ROWS};
