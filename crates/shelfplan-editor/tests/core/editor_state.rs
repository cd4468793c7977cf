use shelfplan_core::{BoxVariant, Cell, Error, PlacementError, MAX_GRID_SIZE};
use shelfplan_editor::{EditorState, ShelfForm};
use shelfplan_layout::ExportMode;
use shelfplan_settings::EditorSettings;

fn small_editor() -> EditorState {
    let settings = EditorSettings {
        default_grid_size: 10,
        ..EditorSettings::default()
    };
    EditorState::new(settings).unwrap()
}

#[test]
fn test_new_uses_settings() {
    let editor = small_editor();
    assert_eq!(editor.grid().grid_size(), 10);
    assert_eq!(editor.form(), ShelfForm { columns: 3, rows: 3 });
    assert!(!editor.is_modified());
    assert!(!editor.can_undo());
}

#[test]
fn test_new_clamps_default_grid_size() {
    let settings = EditorSettings {
        default_grid_size: 4,
        ..EditorSettings::default()
    };
    let editor = EditorState::new(settings).unwrap();
    assert_eq!(editor.grid().grid_size(), 10);
}

#[test]
fn test_add_shelf_uses_form_dimensions() {
    let mut editor = small_editor();
    editor.set_form_columns(4);
    editor.set_form_rows(2);

    let id = editor.add_shelf(Cell::new(5, 5)).unwrap();
    let shelf = editor.grid().shelf(id).unwrap();
    assert_eq!((shelf.columns(), shelf.rows()), (4, 2));
    assert_eq!(shelf.label(), "Shelf 0 (4x2)");
    assert!(editor.is_modified());
    assert_eq!(editor.undo_name(), Some("Add Shelf"));
}

#[test]
fn test_form_never_below_one() {
    let mut editor = small_editor();
    editor.set_form_columns(0);
    editor.set_form_rows(0);
    assert_eq!(editor.form(), ShelfForm { columns: 1, rows: 1 });
}

#[test]
fn test_rejected_add_records_nothing() {
    let mut editor = small_editor();
    editor.add_shelf(Cell::new(5, 5)).unwrap();
    editor.mark_saved();

    let err = editor.add_shelf(Cell::new(6, 5)).unwrap_err();
    assert_eq!(
        err.as_placement(),
        Some(PlacementError::Overlap {
            cell: Cell::new(5, 5),
            occupant: 0
        })
    );
    assert_eq!(editor.grid().len(), 1);
    assert!(!editor.is_modified());
    assert_eq!(editor.undo_name(), Some("Add Shelf"));
}

#[test]
fn test_remove_clears_selection() {
    let mut editor = small_editor();
    let a = editor.add_shelf(Cell::new(2, 2)).unwrap();
    let b = editor.add_shelf(Cell::new(2, 6)).unwrap();

    editor.select(a).unwrap();
    editor.remove_shelf(b).unwrap();
    assert_eq!(editor.selected_shelf().map(|s| s.id()), Some(a));

    editor.remove_shelf(a).unwrap();
    assert!(editor.selected_shelf().is_none());
    assert!(editor.grid().is_empty());
}

#[test]
fn test_select_unknown_shelf_fails() {
    let mut editor = small_editor();
    assert!(matches!(editor.select(7), Err(Error::NotFound { id: 7 })));
}

#[test]
fn test_visible_shelves_follow_selection() {
    let mut editor = small_editor();
    let a = editor.add_shelf(Cell::new(2, 2)).unwrap();
    editor.add_shelf(Cell::new(2, 6)).unwrap();

    assert_eq!(editor.visible_shelves().len(), 2);

    editor.select(a).unwrap();
    let visible: Vec<_> = editor.visible_shelves().iter().map(|s| s.id()).collect();
    assert_eq!(visible, vec![a]);

    editor.clear_selection();
    assert_eq!(editor.visible_shelves().len(), 2);
}

#[test]
fn test_resize_grid_is_clamped() {
    let mut editor = small_editor();
    assert_eq!(editor.resize_grid(20).unwrap(), 20);
    assert_eq!(editor.resize_grid(3).unwrap(), 10);
    assert_eq!(editor.grid().grid_size(), 10);
    assert_eq!(editor.undo_name(), Some("Resize Grid"));
}

#[test]
fn test_huge_grid_sizes_are_capped() {
    let mut editor = small_editor();
    assert_eq!(editor.resize_grid(100_000_000).unwrap(), MAX_GRID_SIZE);
    assert_eq!(editor.grid().grid_size(), MAX_GRID_SIZE);
    assert_eq!(editor.resize_grid(usize::MAX).unwrap(), MAX_GRID_SIZE);

    let settings = EditorSettings {
        default_grid_size: usize::MAX,
        ..EditorSettings::default()
    };
    let editor = EditorState::new(settings).unwrap();
    assert_eq!(editor.grid().grid_size(), MAX_GRID_SIZE);
}

#[test]
fn test_oversized_shelf_is_rejected() {
    let mut editor = small_editor();
    let err = editor
        .add_shelf_sized(Cell::new(5, 5), usize::MAX, 1)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSize { .. }));
    assert!(!editor.can_undo());
    assert!(editor.grid().is_empty());
}

#[test]
fn test_resize_to_same_size_records_nothing() {
    let mut editor = small_editor();
    assert_eq!(editor.resize_grid(10).unwrap(), 10);
    assert!(!editor.can_undo());
    assert!(!editor.is_modified());
}

#[test]
fn test_set_box_out_of_range() {
    let mut editor = small_editor();
    let id = editor.add_shelf(Cell::new(5, 5)).unwrap();

    let err = editor.set_box(id, 3, 0, Some(BoxVariant::A)).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { column: 3, row: 0, .. }));
}

#[test]
fn test_set_same_box_twice_records_once() {
    let mut editor = small_editor();
    let id = editor.add_shelf(Cell::new(5, 5)).unwrap();

    editor.set_box(id, 0, 0, Some(BoxVariant::C)).unwrap();
    editor.set_box(id, 0, 0, Some(BoxVariant::C)).unwrap();

    editor.undo().unwrap();
    assert_eq!(editor.grid().shelf(id).unwrap().box_at(0, 0), None);
    assert_eq!(editor.undo_name(), Some("Add Shelf"));
}

#[test]
fn test_export_respects_mode() {
    let mut editor = small_editor();
    let id = editor.add_shelf(Cell::new(5, 5)).unwrap();
    editor.set_box(id, 1, 1, Some(BoxVariant::Roll)).unwrap();

    let with = editor.export(ExportMode::WithBoxes);
    assert!(with.items[0].boxes.is_some());

    let without = editor.export(ExportMode::WithoutBoxes);
    assert!(without.items[0].boxes.is_none());
    assert_eq!(without.grid_size, 10);
}

#[test]
fn test_from_document_round_trip() {
    let mut editor = small_editor();
    editor.add_shelf(Cell::new(5, 5)).unwrap();
    editor.add_shelf(Cell::new(5, 7)).unwrap();

    let document = editor.export(ExportMode::WithBoxes);
    let reopened = EditorState::from_document(&document, EditorSettings::default()).unwrap();

    assert_eq!(reopened.grid().len(), 2);
    assert_eq!(reopened.grid().next_id(), 2);
    assert!(!reopened.is_modified());
    assert!(!reopened.can_undo());
}
