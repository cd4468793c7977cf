//! Grid occupancy manager.
//!
//! Owns the shelves and the occupancy map and is the only code that writes to
//! either. Every mutating call validates first and commits second, so a
//! rejected call leaves the manager exactly as it found it.

use std::collections::BTreeMap;

use crate::boxes::ShelfBox;
use crate::error::{Error, PlacementError, Result};
use crate::footprint::occupied_cells;
use crate::occupancy::OccupancyMap;
use crate::shelf::Shelf;
use crate::types::{Cell, ItemId, Rotation};

/// A footprint cell that could not be mapped after a resize or import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedCell {
    pub id: ItemId,
    pub cell: Cell,
}

/// Shelves on a square grid plus the occupancy map that mirrors them.
#[derive(Debug, Clone)]
pub struct GridManager {
    grid_size: usize,
    shelves: BTreeMap<ItemId, Shelf>,
    occupancy: OccupancyMap,
    next_id: ItemId,
}

impl GridManager {
    /// Creates an empty manager with a `grid_size x grid_size` map.
    pub fn new(grid_size: usize) -> Result<Self> {
        Ok(Self {
            grid_size,
            shelves: BTreeMap::new(),
            occupancy: OccupancyMap::new(grid_size)?,
            next_id: 0,
        })
    }

    /// Rebuilds a manager from previously exported shelves.
    ///
    /// Footprint cells outside the grid are dropped, as they would be after a
    /// shrinking resize. Duplicate ids and overlapping in-bounds cells reject
    /// the whole set. The next id continues after the largest one seen.
    pub fn from_shelves(grid_size: usize, shelves: impl IntoIterator<Item = Shelf>) -> Result<Self> {
        let mut manager = Self::new(grid_size)?;
        for shelf in shelves {
            let id = shelf.id();
            if manager.shelves.contains_key(&id) {
                return Err(Error::malformed(format!("duplicate shelf id {}", id)));
            }
            for &cell in shelf.occupied_cells() {
                if !cell.in_bounds(grid_size) {
                    tracing::warn!(
                        "Shelf {} cell {} lies outside the {}x{} grid, dropped",
                        id,
                        cell,
                        grid_size,
                        grid_size
                    );
                    continue;
                }
                if !manager.occupancy.claim(cell, id) {
                    let occupant = manager.occupancy.owner(cell).unwrap_or(id);
                    return Err(Error::malformed(format!(
                        "shelf {} overlaps shelf {} at {}",
                        id, occupant, cell
                    )));
                }
            }
            manager.next_id = manager.next_id.max(id + 1);
            manager.shelves.insert(id, shelf);
        }
        tracing::debug!(
            "Loaded {} shelves onto a {}x{} grid",
            manager.shelves.len(),
            grid_size,
            grid_size
        );
        Ok(manager)
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Shelves in ascending id order.
    pub fn shelves(&self) -> impl Iterator<Item = &Shelf> {
        self.shelves.values()
    }

    pub fn shelf(&self, id: ItemId) -> Option<&Shelf> {
        self.shelves.get(&id)
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    /// The id the next `add` will hand out.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    /// Footprint for the given placement; see [`crate::footprint::occupied_cells`].
    pub fn occupied_cells(
        &self,
        anchor: Cell,
        columns: usize,
        rotation: Rotation,
    ) -> std::result::Result<Vec<Cell>, PlacementError> {
        occupied_cells(anchor, columns, rotation)
    }

    /// Checks a placement against the grid bounds and the current map.
    ///
    /// Bounds are checked over the whole footprint before overlaps, so a
    /// footprint that is both off-grid and colliding reports `OutOfBounds`.
    pub fn validate(
        &self,
        anchor: Cell,
        columns: usize,
        rotation: Rotation,
        ignore: Option<ItemId>,
    ) -> std::result::Result<Vec<Cell>, PlacementError> {
        let cells = occupied_cells(anchor, columns, rotation)?;
        if let Some(&cell) = cells.iter().find(|c| !c.in_bounds(self.grid_size)) {
            return Err(PlacementError::OutOfBounds { cell });
        }
        for &cell in &cells {
            if !self.occupancy.is_free_for(cell, ignore) {
                if let Some(occupant) = self.occupancy.owner(cell) {
                    return Err(PlacementError::Overlap { cell, occupant });
                }
            }
        }
        Ok(cells)
    }

    pub fn is_valid(
        &self,
        anchor: Cell,
        columns: usize,
        rotation: Rotation,
        ignore: Option<ItemId>,
    ) -> bool {
        self.validate(anchor, columns, rotation, ignore).is_ok()
    }

    /// Places a new shelf at 0° with an empty box table.
    pub fn add(&mut self, anchor: Cell, columns: usize, rows: usize) -> Result<&Shelf> {
        let id = self.next_id;
        let shelf = Shelf::new(id, anchor, columns, rows, Rotation::Deg0)?;
        let cells = self.validate(anchor, columns, Rotation::Deg0, None)?;
        self.next_id += 1;
        for &cell in &cells {
            self.occupancy.claim(cell, id);
        }
        tracing::debug!("Added shelf {} ({}x{}) at {}", id, columns, rows, anchor);
        Ok(&*self.shelves.entry(id).or_insert(shelf))
    }

    /// Moves a shelf to a new anchor, keeping its rotation.
    pub fn move_shelf(&mut self, id: ItemId, anchor: Cell) -> Result<&Shelf> {
        let rotation = self.get(id)?.rotation();
        self.place(id, anchor, rotation)
    }

    /// Turns a shelf a quarter turn about its anchor.
    ///
    /// Rotation only changes the footprint's axis and direction; `columns`
    /// and `rows` keep their values.
    pub fn rotate(&mut self, id: ItemId) -> Result<&Shelf> {
        let shelf = self.get(id)?;
        let (anchor, rotation) = (shelf.anchor(), shelf.rotation().next());
        self.place(id, anchor, rotation)
    }

    /// Sets anchor and rotation together, validated against the shelf's own
    /// current cells being free.
    pub fn place(&mut self, id: ItemId, anchor: Cell, rotation: Rotation) -> Result<&Shelf> {
        let columns = self.get(id)?.columns();
        let cells = self.validate(anchor, columns, rotation, Some(id))?;

        let old_cells = self.get(id)?.occupied_cells().to_vec();
        for cell in old_cells {
            self.occupancy.release(cell, id);
        }
        for &cell in &cells {
            self.occupancy.claim(cell, id);
        }

        let shelf = self.get_mut(id)?;
        shelf.set_placement(anchor, rotation, cells);
        tracing::debug!("Placed shelf {} at {} facing {}", id, anchor, rotation);
        Ok(&*shelf)
    }

    /// Removes a shelf and frees its cells, handing the shelf back.
    pub fn remove(&mut self, id: ItemId) -> Result<Shelf> {
        let shelf = self.shelves.remove(&id).ok_or(Error::NotFound { id })?;
        for &cell in shelf.occupied_cells() {
            self.occupancy.release(cell, id);
        }
        tracing::debug!("Removed shelf {}", id);
        Ok(shelf)
    }

    /// Re-registers a previously removed shelf under its original id.
    pub fn restore(&mut self, shelf: Shelf) -> Result<&Shelf> {
        let id = shelf.id();
        if self.shelves.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        let cells = self.validate(shelf.anchor(), shelf.columns(), shelf.rotation(), None)?;
        for &cell in &cells {
            self.occupancy.claim(cell, id);
        }
        self.next_id = self.next_id.max(id + 1);
        tracing::debug!("Restored shelf {}", id);
        Ok(&*self.shelves.entry(id).or_insert(shelf))
    }

    /// Rebuilds the occupancy map at `new_size x new_size`.
    ///
    /// Shelves keep their stored anchor, columns and rotation; only the map is
    /// rebuilt. Footprint cells outside the new bounds are left unmapped and
    /// come back if the grid grows again. Returns every cell left unmapped.
    pub fn resize(&mut self, new_size: usize) -> Result<Vec<DroppedCell>> {
        let mut occupancy = OccupancyMap::new(new_size)?;
        let mut dropped = Vec::new();
        for shelf in self.shelves.values() {
            for &cell in shelf.occupied_cells() {
                if !occupancy.claim(cell, shelf.id()) {
                    dropped.push(DroppedCell { id: shelf.id(), cell });
                }
            }
        }
        if !dropped.is_empty() {
            tracing::warn!(
                "Resize to {}x{} dropped {} shelf cells",
                new_size,
                new_size,
                dropped.len()
            );
        }
        self.grid_size = new_size;
        self.occupancy = occupancy;
        tracing::debug!("Resized grid to {}x{}", new_size, new_size);
        Ok(dropped)
    }

    /// Writes one box slot, returning what was there before.
    ///
    /// `column` and `row` are local to the shelf and ignore its rotation.
    pub fn set_box(
        &mut self,
        id: ItemId,
        column: usize,
        row: usize,
        value: Option<ShelfBox>,
    ) -> Result<Option<ShelfBox>> {
        let previous = self.get_mut(id)?.set_box(column, row, value)?;
        tracing::debug!(
            "Shelf {} slot ({}, {}) set to {:?}",
            id,
            column,
            row,
            value.map(|b| b.variant)
        );
        Ok(previous)
    }

    /// Whether every mapped cell belongs to a registered shelf whose footprint
    /// contains it.
    pub fn is_consistent(&self) -> bool {
        self.occupancy.size() == self.grid_size
            && self.occupancy.iter().all(|(cell, id)| {
                self.shelves
                    .get(&id)
                    .is_some_and(|s| s.occupied_cells().contains(&cell))
            })
    }

    fn get(&self, id: ItemId) -> Result<&Shelf> {
        self.shelves.get(&id).ok_or(Error::NotFound { id })
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut Shelf> {
        self.shelves.get_mut(&id).ok_or(Error::NotFound { id })
    }
}
