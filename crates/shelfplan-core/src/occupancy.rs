//! Occupancy map: which shelf, if any, owns each grid cell.

use crate::error::{Error, Result};
use crate::types::{Cell, ItemId, MAX_GRID_SIZE};

/// Square `size x size` table of cell owners, stored row-major by `z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    size: usize,
    owners: Vec<Option<ItemId>>,
}

impl OccupancyMap {
    /// An all-empty map. `size` must be in `1..=MAX_GRID_SIZE`.
    pub fn new(size: usize) -> Result<Self> {
        let size = Error::check_size(size, MAX_GRID_SIZE)?;
        let cells = size
            .checked_mul(size)
            .ok_or(Error::InvalidSize { size, max: MAX_GRID_SIZE })?;
        Ok(Self {
            size,
            owners: vec![None; cells],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        cell.in_bounds(self.size)
            .then(|| cell.z as usize * self.size + cell.x as usize)
    }

    /// Owner of `cell`; `None` for free or out-of-bounds cells.
    pub fn owner(&self, cell: Cell) -> Option<ItemId> {
        self.index(cell).and_then(|i| self.owners[i])
    }

    /// Whether `cell` is in bounds and not held by anyone other than `ignore`.
    pub fn is_free_for(&self, cell: Cell, ignore: Option<ItemId>) -> bool {
        match self.index(cell) {
            Some(i) => match self.owners[i] {
                None => true,
                Some(owner) => Some(owner) == ignore,
            },
            None => false,
        }
    }

    /// Mark `cell` as owned by `id`. Returns `false` without writing when the
    /// cell is out of bounds or held by another shelf.
    pub fn claim(&mut self, cell: Cell, id: ItemId) -> bool {
        let Some(i) = self.index(cell) else {
            return false;
        };
        match self.owners[i] {
            Some(owner) if owner != id => false,
            _ => {
                self.owners[i] = Some(id);
                true
            }
        }
    }

    /// Free `cell` if, and only if, `id` owns it.
    pub fn release(&mut self, cell: Cell, id: ItemId) -> bool {
        match self.index(cell) {
            Some(i) if self.owners[i] == Some(id) => {
                self.owners[i] = None;
                true
            }
            _ => false,
        }
    }

    /// Every claimed cell with its owner, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, ItemId)> + '_ {
        let size = self.size;
        self.owners.iter().enumerate().filter_map(move |(i, owner)| {
            owner.map(|id| (Cell::new((i % size) as i32, (i / size) as i32), id))
        })
    }

    /// Cells currently held by `id`, in row-major order.
    pub fn cells_of(&self, id: ItemId) -> Vec<Cell> {
        self.iter()
            .filter_map(|(cell, owner)| (owner == id).then_some(cell))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }

    /// Fraction of cells in use, `0.0` for an empty grid.
    pub fn utilization(&self) -> f64 {
        if self.owners.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 / self.owners.len() as f64
    }
}
