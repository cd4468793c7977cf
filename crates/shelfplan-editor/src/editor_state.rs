//! Editor state manager for UI integration.
//! Owns the grid, the selection and the shelf form, and records every accepted
//! change for undo/redo.

use shelfplan_core::{
    BoxVariant, Cell, Error, GridManager, ItemId, Result, Shelf, ShelfBox, MAX_GRID_SIZE,
};
use shelfplan_layout::{ExportMode, LayoutDocument};
use shelfplan_settings::EditorSettings;

use crate::commands::*;
use crate::stats::BoxStatistics;

/// Dimensions used for the next shelf the user adds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfForm {
    pub columns: usize,
    pub rows: usize,
}

/// Editor state for UI integration
#[derive(Debug, Clone)]
pub struct EditorState {
    grid: GridManager,
    settings: EditorSettings,
    form: ShelfForm,
    selected: Option<ItemId>,
    is_modified: bool,
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
}

impl EditorState {
    /// Creates an empty layout at the configured default grid size.
    pub fn new(settings: EditorSettings) -> Result<Self> {
        let size = settings
            .clamp_grid_size(settings.default_grid_size)
            .min(MAX_GRID_SIZE);
        Ok(Self::with_grid(GridManager::new(size)?, settings))
    }

    /// Wraps an existing grid, e.g. one loaded from a layout document.
    pub fn with_grid(grid: GridManager, settings: EditorSettings) -> Self {
        let form = ShelfForm {
            columns: settings.default_columns.max(1),
            rows: settings.default_rows.max(1),
        };
        Self {
            grid,
            settings,
            form,
            selected: None,
            is_modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Imports a document and wraps the resulting grid.
    pub fn from_document(document: &LayoutDocument, settings: EditorSettings) -> Result<Self> {
        Ok(Self::with_grid(document.to_manager()?, settings))
    }

    pub fn grid(&self) -> &GridManager {
        &self.grid
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn form(&self) -> ShelfForm {
        self.form
    }

    /// Sets the form's column count, never below 1.
    pub fn set_form_columns(&mut self, columns: usize) {
        self.form.columns = columns.max(1);
    }

    /// Sets the form's row count, never below 1.
    pub fn set_form_rows(&mut self, rows: usize) {
        self.form.rows = rows.max(1);
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    /// Adds a shelf with the form's dimensions.
    pub fn add_shelf(&mut self, anchor: Cell) -> Result<ItemId> {
        let ShelfForm { columns, rows } = self.form;
        self.add_shelf_sized(anchor, columns, rows)
    }

    pub fn add_shelf_sized(&mut self, anchor: Cell, columns: usize, rows: usize) -> Result<ItemId> {
        let shelf = self.grid.add(anchor, columns, rows)?.clone();
        let id = shelf.id();
        self.record(EditorCommand::AddShelf(AddShelf { shelf }));
        Ok(id)
    }

    pub fn move_shelf(&mut self, id: ItemId, anchor: Cell) -> Result<&Shelf> {
        let from = self.placement(id)?;
        let to = Placement::of(self.grid.move_shelf(id, anchor)?);
        self.record(EditorCommand::PlaceShelf(PlaceShelf { id, from, to }));
        self.shelf(id)
    }

    pub fn rotate_shelf(&mut self, id: ItemId) -> Result<&Shelf> {
        let from = self.placement(id)?;
        let to = Placement::of(self.grid.rotate(id)?);
        self.record(EditorCommand::PlaceShelf(PlaceShelf { id, from, to }));
        self.shelf(id)
    }

    /// Removes a shelf, clearing the selection if it pointed at it.
    pub fn remove_shelf(&mut self, id: ItemId) -> Result<()> {
        let shelf = self.grid.remove(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.record(EditorCommand::RemoveShelf(RemoveShelf { shelf }));
        Ok(())
    }

    /// Resizes the grid, clamped between the configured minimum and
    /// [`MAX_GRID_SIZE`]. Returns the size actually applied.
    pub fn resize_grid(&mut self, size: usize) -> Result<usize> {
        let from = self.grid.grid_size();
        let to = self.settings.clamp_grid_size(size).min(MAX_GRID_SIZE);
        if to == from {
            return Ok(to);
        }
        let dropped = self.grid.resize(to)?;
        if !dropped.is_empty() {
            tracing::info!("{} shelf cells fall outside the {}x{} grid", dropped.len(), to, to);
        }
        self.record(EditorCommand::ResizeGrid(ResizeGrid { from, to }));
        Ok(to)
    }

    pub fn set_box(
        &mut self,
        id: ItemId,
        column: usize,
        row: usize,
        variant: Option<BoxVariant>,
    ) -> Result<()> {
        let new = variant.map(ShelfBox::new);
        let old = self.grid.set_box(id, column, row, new)?;
        if old != new {
            self.record(EditorCommand::SetBox(SetBox {
                id,
                column,
                row,
                old,
                new,
            }));
        }
        Ok(())
    }

    pub fn select(&mut self, id: ItemId) -> Result<()> {
        self.shelf(id)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_shelf(&self) -> Option<&Shelf> {
        self.selected.and_then(|id| self.grid.shelf(id))
    }

    /// The selected shelf alone when there is a selection, otherwise every shelf.
    pub fn visible_shelves(&self) -> Vec<&Shelf> {
        match self.selected_shelf() {
            Some(shelf) => vec![shelf],
            None => self.grid.shelves().collect(),
        }
    }

    pub fn statistics(&self) -> BoxStatistics {
        BoxStatistics::collect(self.grid.shelves())
    }

    pub fn export(&self, mode: ExportMode) -> LayoutDocument {
        LayoutDocument::export(&self.grid, mode)
    }

    /// Undo last change. Returns `false` when there is nothing to undo.
    ///
    /// If the grid no longer accepts the inverse step (for example a removed
    /// shelf's cells now lie outside a smaller grid) the command stays on the
    /// undo stack and the error is returned.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = cmd.undo(&mut self.grid) {
            tracing::warn!("Cannot undo {}: {}", cmd.name(), err);
            self.undo_stack.push(cmd);
            return Err(err);
        }
        tracing::debug!("Undid {}", cmd.name());
        self.after_history_step();
        self.redo_stack.push(cmd);
        Ok(true)
    }

    /// Redo last undo. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = cmd.apply(&mut self.grid) {
            tracing::warn!("Cannot redo {}: {}", cmd.name(), err);
            self.redo_stack.push(cmd);
            return Err(err);
        }
        tracing::debug!("Redid {}", cmd.name());
        self.after_history_step();
        self.undo_stack.push(cmd);
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name of the command the next undo would revert
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(EditorCommand::name)
    }

    /// Clear history stacks
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn record(&mut self, cmd: EditorCommand) {
        tracing::debug!("Recorded {}", cmd.name());
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.settings.history_limit {
            self.undo_stack.remove(0);
        }
        self.is_modified = true;
    }

    fn after_history_step(&mut self) {
        self.is_modified = true;
        if self.selected.is_some_and(|id| self.grid.shelf(id).is_none()) {
            self.selected = None;
        }
    }

    fn shelf(&self, id: ItemId) -> Result<&Shelf> {
        self.grid.shelf(id).ok_or(Error::NotFound { id })
    }

    fn placement(&self, id: ItemId) -> Result<Placement> {
        self.shelf(id).map(Placement::of)
    }
}
