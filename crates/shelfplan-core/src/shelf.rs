//! Shelf model.

use crate::boxes::{BoxTable, ShelfBox};
use crate::error::{Error, Result};
use crate::footprint::occupied_cells;
use crate::types::{Cell, ItemId, Rotation, MAX_GRID_SIZE, MAX_SHELF_ROWS};

/// A rectangular shelf standing on the grid.
///
/// `columns` sets the footprint length on the floor, `rows` the number of
/// vertical levels. The footprint cells are derived from anchor, columns and
/// rotation and are recomputed whenever one of those changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    id: ItemId,
    anchor: Cell,
    columns: usize,
    rows: usize,
    rotation: Rotation,
    cells: Vec<Cell>,
    boxes: BoxTable,
}

impl Shelf {
    /// Build an unregistered shelf with an empty box table.
    ///
    /// Fails with `InvalidSize` for a dimension outside its limit and with
    /// `OutOfBounds` when the footprint cannot be represented at all.
    pub fn new(
        id: ItemId,
        anchor: Cell,
        columns: usize,
        rows: usize,
        rotation: Rotation,
    ) -> Result<Self> {
        Error::check_size(columns, MAX_GRID_SIZE)?;
        Error::check_size(rows, MAX_SHELF_ROWS)?;
        let cells = occupied_cells(anchor, columns, rotation)?;
        Ok(Self {
            id,
            anchor,
            columns,
            rows,
            rotation,
            cells,
            boxes: BoxTable::empty(columns, rows),
        })
    }

    /// Replace the box table. The table must be exactly `columns x rows`.
    pub fn with_boxes(mut self, boxes: BoxTable) -> Result<Self> {
        if !boxes.has_shape(self.columns, self.rows) {
            return Err(Error::malformed(format!(
                "shelf {} box table is not {}x{}",
                self.id, self.columns, self.rows
            )));
        }
        self.boxes = boxes;
        Ok(self)
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Footprint cells in local column order. These may extend past the grid
    /// after a shrinking resize.
    pub fn occupied_cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn boxes(&self) -> &BoxTable {
        &self.boxes
    }

    pub fn box_at(&self, column: usize, row: usize) -> Option<ShelfBox> {
        self.boxes.get(column, row)
    }

    /// Display label for shelf lists.
    pub fn label(&self) -> String {
        format!("Shelf {} ({}x{})", self.id, self.columns, self.rows)
    }

    /// `cells` must be the footprint of `anchor` and `rotation`, as returned
    /// by validation.
    pub(crate) fn set_placement(&mut self, anchor: Cell, rotation: Rotation, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.columns);
        self.anchor = anchor;
        self.rotation = rotation;
        self.cells = cells;
    }

    pub(crate) fn set_box(
        &mut self,
        column: usize,
        row: usize,
        value: Option<ShelfBox>,
    ) -> Result<Option<ShelfBox>> {
        let (id, columns, rows) = (self.id, self.columns, self.rows);
        let slot = self
            .boxes
            .slot_mut(column, row)
            .ok_or(Error::IndexOutOfRange {
                id,
                column,
                row,
                columns,
                rows,
            })?;
        Ok(std::mem::replace(slot, value))
    }
}
