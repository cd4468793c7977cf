use shelfplan_core::{Cell, GridManager, ItemId, Result, Rotation, Shelf, ShelfBox};

/// Anchor and rotation of a shelf at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub anchor: Cell,
    pub rotation: Rotation,
}

impl Placement {
    pub fn of(shelf: &Shelf) -> Self {
        Self {
            anchor: shelf.anchor(),
            rotation: shelf.rotation(),
        }
    }
}

/// A recorded editor mutation that can be replayed in either direction.
///
/// Commands are recorded after the manager has accepted the operation, and
/// replaying goes back through the manager so every step is re-validated.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    AddShelf(AddShelf),
    RemoveShelf(RemoveShelf),
    PlaceShelf(PlaceShelf),
    ResizeGrid(ResizeGrid),
    SetBox(SetBox),
}

#[derive(Debug, Clone)]
pub struct AddShelf {
    pub shelf: Shelf, // As placed, for redo
}

#[derive(Debug, Clone)]
pub struct RemoveShelf {
    pub shelf: Shelf, // As removed, for undo
}

/// Move or rotate
#[derive(Debug, Clone)]
pub struct PlaceShelf {
    pub id: ItemId,
    pub from: Placement,
    pub to: Placement,
}

#[derive(Debug, Clone)]
pub struct ResizeGrid {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone)]
pub struct SetBox {
    pub id: ItemId,
    pub column: usize,
    pub row: usize,
    pub old: Option<ShelfBox>,
    pub new: Option<ShelfBox>,
}

impl EditorCommand {
    pub fn name(&self) -> &str {
        match self {
            EditorCommand::AddShelf(_) => "Add Shelf",
            EditorCommand::RemoveShelf(_) => "Remove Shelf",
            EditorCommand::PlaceShelf(cmd) if cmd.from.rotation != cmd.to.rotation => {
                "Rotate Shelf"
            }
            EditorCommand::PlaceShelf(_) => "Move Shelf",
            EditorCommand::ResizeGrid(_) => "Resize Grid",
            EditorCommand::SetBox(_) => "Set Box",
        }
    }

    pub fn apply(&self, grid: &mut GridManager) -> Result<()> {
        match self {
            EditorCommand::AddShelf(cmd) => grid.restore(cmd.shelf.clone()).map(|_| ()),
            EditorCommand::RemoveShelf(cmd) => grid.remove(cmd.shelf.id()).map(|_| ()),
            EditorCommand::PlaceShelf(cmd) => grid
                .place(cmd.id, cmd.to.anchor, cmd.to.rotation)
                .map(|_| ()),
            EditorCommand::ResizeGrid(cmd) => grid.resize(cmd.to).map(|_| ()),
            EditorCommand::SetBox(cmd) => grid
                .set_box(cmd.id, cmd.column, cmd.row, cmd.new)
                .map(|_| ()),
        }
    }

    pub fn undo(&self, grid: &mut GridManager) -> Result<()> {
        match self {
            EditorCommand::AddShelf(cmd) => grid.remove(cmd.shelf.id()).map(|_| ()),
            EditorCommand::RemoveShelf(cmd) => grid.restore(cmd.shelf.clone()).map(|_| ()),
            EditorCommand::PlaceShelf(cmd) => grid
                .place(cmd.id, cmd.from.anchor, cmd.from.rotation)
                .map(|_| ()),
            EditorCommand::ResizeGrid(cmd) => grid.resize(cmd.from).map(|_| ()),
            EditorCommand::SetBox(cmd) => grid
                .set_box(cmd.id, cmd.column, cmd.row, cmd.old)
                .map(|_| ()),
        }
    }
}
