use shelfplan_core::{
    BoxVariant, Cell, Error, GridManager, PlacementError, Rotation, ShelfBox, MAX_GRID_SIZE,
    MAX_SHELF_ROWS,
};

fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
    list.iter().map(|&(x, z)| Cell::new(x, z)).collect()
}

#[test]
fn test_add_centres_footprint_on_anchor() {
    let mut grid = GridManager::new(10).unwrap();
    let shelf = grid.add(Cell::new(5, 5), 3, 3).unwrap();

    assert_eq!(shelf.id(), 0);
    assert_eq!(shelf.rotation(), Rotation::Deg0);
    assert_eq!(shelf.occupied_cells(), cells(&[(4, 5), (5, 5), (6, 5)]));
    assert_eq!(grid.occupancy().owner(Cell::new(6, 5)), Some(0));
    assert_eq!(grid.occupancy().occupied_count(), 3);
    assert!(grid.is_consistent());
}

#[test]
fn test_rotate_keeps_columns() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 2).unwrap().id();

    let shelf = grid.rotate(id).unwrap();
    assert_eq!(shelf.rotation(), Rotation::Deg90);
    assert_eq!(shelf.columns(), 3);
    assert_eq!(shelf.rows(), 2);
    assert_eq!(shelf.occupied_cells(), cells(&[(5, 4), (5, 5), (5, 6)]));

    assert_eq!(grid.occupancy().owner(Cell::new(4, 5)), None);
    assert_eq!(grid.occupancy().owner(Cell::new(5, 4)), Some(id));
    assert!(grid.is_consistent());
}

#[test]
fn test_rotate_full_turn_returns_to_start() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 4, 1).unwrap().id();
    let before = grid.occupancy().clone();

    for _ in 0..4 {
        grid.rotate(id).unwrap();
    }

    assert_eq!(grid.shelf(id).unwrap().rotation(), Rotation::Deg0);
    assert_eq!(grid.occupancy(), &before);
}

#[test]
fn test_add_overlap_rejected() {
    let mut grid = GridManager::new(10).unwrap();
    grid.add(Cell::new(5, 5), 3, 3).unwrap();

    let err = grid.add(Cell::new(5, 5), 1, 1).unwrap_err();
    assert_eq!(
        err,
        Error::Placement(PlacementError::Overlap {
            cell: Cell::new(5, 5),
            occupant: 0
        })
    );
    assert_eq!(grid.len(), 1);
    assert_eq!(grid.next_id(), 1);
}

#[test]
fn test_add_out_of_bounds_rejected() {
    let mut grid = GridManager::new(10).unwrap();
    let err = grid.add(Cell::new(9, 5), 3, 3).unwrap_err();

    assert_eq!(
        err.as_placement(),
        Some(PlacementError::OutOfBounds {
            cell: Cell::new(10, 5)
        })
    );
    assert!(grid.is_empty());
    assert_eq!(grid.occupancy().occupied_count(), 0);
}

#[test]
fn test_add_negative_cells_rejected() {
    let mut grid = GridManager::new(10).unwrap();
    let err = grid.add(Cell::new(0, 0), 3, 1).unwrap_err();
    assert_eq!(
        err.as_placement(),
        Some(PlacementError::OutOfBounds {
            cell: Cell::new(-1, 0)
        })
    );
}

#[test]
fn test_add_zero_dimensions_rejected() {
    let mut grid = GridManager::new(10).unwrap();
    assert_eq!(
        grid.add(Cell::new(5, 5), 0, 3).unwrap_err(),
        Error::InvalidSize {
            size: 0,
            max: MAX_GRID_SIZE
        }
    );
    assert_eq!(
        grid.add(Cell::new(5, 5), 3, 0).unwrap_err(),
        Error::InvalidSize {
            size: 0,
            max: MAX_SHELF_ROWS
        }
    );
}

#[test]
fn test_new_rejects_zero_grid() {
    assert!(matches!(
        GridManager::new(0),
        Err(Error::InvalidSize { size: 0, .. })
    ));
}

#[test]
fn test_move_commits_new_cells() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 3).unwrap().id();

    let shelf = grid.move_shelf(id, Cell::new(2, 8)).unwrap();
    assert_eq!(shelf.anchor(), Cell::new(2, 8));
    assert_eq!(shelf.occupied_cells(), cells(&[(1, 8), (2, 8), (3, 8)]));
    assert_eq!(grid.occupancy().cells_of(id), cells(&[(1, 8), (2, 8), (3, 8)]));
}

#[test]
fn test_move_may_overlap_own_footprint() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 3).unwrap().id();

    grid.move_shelf(id, Cell::new(6, 5)).unwrap();
    assert_eq!(grid.occupancy().cells_of(id), cells(&[(5, 5), (6, 5), (7, 5)]));
    assert!(grid.is_consistent());
}

#[test]
fn test_move_failure_rolls_back() {
    let mut grid = GridManager::new(10).unwrap();
    let a = grid.add(Cell::new(2, 2), 3, 3).unwrap().id();
    grid.add(Cell::new(6, 2), 3, 3).unwrap();
    let map_before = grid.occupancy().clone();

    let err = grid.move_shelf(a, Cell::new(4, 2)).unwrap_err();
    assert!(matches!(
        err,
        Error::Placement(PlacementError::Overlap { occupant: 1, .. })
    ));
    assert_eq!(grid.occupancy(), &map_before);
    assert_eq!(grid.shelf(a).unwrap().anchor(), Cell::new(2, 2));

    let err = grid.move_shelf(a, Cell::new(0, 2)).unwrap_err();
    assert!(matches!(
        err,
        Error::Placement(PlacementError::OutOfBounds { .. })
    ));
    assert_eq!(grid.occupancy(), &map_before);
}

#[test]
fn test_rotate_failure_leaves_shelf_unchanged() {
    let mut grid = GridManager::new(10).unwrap();
    let a = grid.add(Cell::new(5, 5), 3, 3).unwrap().id();
    grid.add(Cell::new(5, 6), 1, 1).unwrap();
    let before = grid.shelf(a).unwrap().clone();
    let map_before = grid.occupancy().clone();

    assert!(grid.rotate(a).is_err());
    assert_eq!(grid.shelf(a).unwrap(), &before);
    assert_eq!(grid.occupancy(), &map_before);
}

#[test]
fn test_unknown_ids_not_found() {
    let mut grid = GridManager::new(10).unwrap();
    assert_eq!(
        grid.move_shelf(7, Cell::new(1, 1)).unwrap_err(),
        Error::NotFound { id: 7 }
    );
    assert_eq!(grid.rotate(7).unwrap_err(), Error::NotFound { id: 7 });
    assert_eq!(grid.remove(7).unwrap_err(), Error::NotFound { id: 7 });
    assert_eq!(
        grid.set_box(7, 0, 0, None).unwrap_err(),
        Error::NotFound { id: 7 }
    );
}

#[test]
fn test_remove_frees_cells_and_ids_are_not_reused() {
    let mut grid = GridManager::new(10).unwrap();
    grid.add(Cell::new(1, 1), 1, 1).unwrap();
    let b = grid.add(Cell::new(3, 3), 3, 1).unwrap().id();
    grid.add(Cell::new(7, 7), 1, 1).unwrap();

    let removed = grid.remove(b).unwrap();
    assert_eq!(removed.id(), b);
    assert!(grid.occupancy().cells_of(b).is_empty());

    let next = grid.add(Cell::new(3, 3), 3, 1).unwrap().id();
    assert_eq!(next, 3);
}

#[test]
fn test_restore_reclaims_original_id() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(4, 4), 3, 1).unwrap().id();
    let shelf = grid.remove(id).unwrap();

    let restored = grid.restore(shelf.clone()).unwrap();
    assert_eq!(restored.id(), id);
    assert_eq!(grid.occupancy().cells_of(id).len(), 3);
    assert_eq!(
        grid.restore(shelf).unwrap_err(),
        Error::DuplicateId { id }
    );
}

#[test]
fn test_restore_rejected_when_cells_taken() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(4, 4), 3, 1).unwrap().id();
    let shelf = grid.remove(id).unwrap();
    grid.add(Cell::new(4, 4), 1, 1).unwrap();

    assert!(grid.restore(shelf).unwrap_err().as_placement().is_some());
    assert!(grid.shelf(id).is_none());
}

#[test]
fn test_is_valid_respects_ignore_id() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 1).unwrap().id();

    assert!(!grid.is_valid(Cell::new(5, 5), 3, Rotation::Deg90, None));
    assert!(grid.is_valid(Cell::new(5, 5), 3, Rotation::Deg90, Some(id)));
    assert!(!grid.is_valid(Cell::new(5, 9), 3, Rotation::Deg90, Some(id)));
}

#[test]
fn test_set_box_uses_local_indices() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 2).unwrap().id();
    grid.rotate(id).unwrap();

    let previous = grid
        .set_box(id, 2, 1, Some(ShelfBox::new(BoxVariant::C)))
        .unwrap();
    assert_eq!(previous, None);
    assert_eq!(
        grid.shelf(id).unwrap().box_at(2, 1),
        Some(ShelfBox::new(BoxVariant::C))
    );

    let previous = grid.set_box(id, 2, 1, None).unwrap();
    assert_eq!(previous.map(|b| b.variant), Some(BoxVariant::C));
}

#[test]
fn test_set_box_out_of_range() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 2).unwrap().id();
    let map_before = grid.occupancy().clone();

    let err = grid
        .set_box(id, 3, 0, Some(BoxVariant::A.into()))
        .unwrap_err();
    assert_eq!(
        err,
        Error::IndexOutOfRange {
            id,
            column: 3,
            row: 0,
            columns: 3,
            rows: 2
        }
    );
    assert!(grid.set_box(id, 0, 2, None).is_err());
    assert_eq!(grid.occupancy(), &map_before);
}

#[test]
fn test_label() {
    let mut grid = GridManager::new(10).unwrap();
    let shelf = grid.add(Cell::new(5, 5), 4, 2).unwrap();
    assert_eq!(shelf.label(), "Shelf 0 (4x2)");
}

#[test]
fn test_extreme_anchor_is_out_of_bounds() {
    let mut grid = GridManager::new(10).unwrap();
    for anchor in [
        Cell::new(i32::MAX, 5),
        Cell::new(i32::MIN, 5),
        Cell::new(5, i32::MAX),
        Cell::new(5, i32::MIN),
    ] {
        let err = grid.add(anchor, 3, 1).unwrap_err();
        assert!(
            matches!(err.as_placement(), Some(PlacementError::OutOfBounds { .. })),
            "{:?} -> {:?}",
            anchor,
            err
        );
    }
    assert!(grid.is_empty());
    assert_eq!(grid.next_id(), 0);
}

#[test]
fn test_extreme_move_and_rotate_leave_shelf_in_place() {
    let mut grid = GridManager::new(10).unwrap();
    let id = grid.add(Cell::new(5, 5), 3, 1).unwrap().id();
    let before = grid.occupancy().clone();

    let err = grid.move_shelf(id, Cell::new(i32::MAX, i32::MAX)).unwrap_err();
    assert!(matches!(
        err.as_placement(),
        Some(PlacementError::OutOfBounds { .. })
    ));
    let err = grid
        .place(id, Cell::new(i32::MIN, 0), Rotation::Deg180)
        .unwrap_err();
    assert!(matches!(
        err.as_placement(),
        Some(PlacementError::OutOfBounds { .. })
    ));

    assert_eq!(grid.occupancy(), &before);
    assert_eq!(grid.shelf(id).unwrap().anchor(), Cell::new(5, 5));
}

#[test]
fn test_overlong_shelf_is_rejected() {
    let mut grid = GridManager::new(10).unwrap();
    let columns = (1usize << 32) + 1;

    assert!(!grid.is_valid(Cell::new(5, 5), columns, Rotation::Deg0, None));
    assert!(matches!(
        grid.occupied_cells(Cell::new(5, 5), columns, Rotation::Deg0),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(matches!(
        grid.validate(Cell::new(5, 5), 11, Rotation::Deg0, None),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert_eq!(
        grid.add(Cell::new(5, 5), columns, 1).unwrap_err(),
        Error::InvalidSize {
            size: columns,
            max: MAX_GRID_SIZE
        }
    );
    assert_eq!(
        grid.add(Cell::new(5, 5), 3, usize::MAX).unwrap_err(),
        Error::InvalidSize {
            size: usize::MAX,
            max: MAX_SHELF_ROWS
        }
    );
    assert!(grid.is_empty());
}

#[test]
fn test_grid_size_limit() {
    assert!(GridManager::new(MAX_GRID_SIZE).is_ok());
    assert_eq!(
        GridManager::new(MAX_GRID_SIZE + 1).unwrap_err(),
        Error::InvalidSize {
            size: MAX_GRID_SIZE + 1,
            max: MAX_GRID_SIZE
        }
    );

    let mut grid = GridManager::new(10).unwrap();
    grid.add(Cell::new(5, 5), 3, 1).unwrap();
    assert!(grid.resize(100_000_000).is_err());
    assert_eq!(grid.grid_size(), 10);
    assert!(grid.is_consistent());
}
