//! Footprint geometry.
//!
//! A shelf covers a single line of cells on the floor, `columns` long, running
//! along the axis and direction picked by its rotation. The line is centred
//! on the anchor using floor division, so even lengths sit one cell further
//! towards the negative end at 0° (and the mirrored end at 180°). Renderers
//! compensate for that offset; the coordinates here are authoritative.

use crate::error::PlacementError;
use crate::types::{Cell, Rotation, MAX_GRID_SIZE};

/// Cells covered by a shelf of `columns` cells anchored at `anchor`.
///
/// Returns exactly `columns` cells in footprint order (local column 0 first).
/// Cells may fall outside any grid; bounds are the caller's concern.
///
/// A line longer than [`MAX_GRID_SIZE`], or one whose coordinates leave the
/// `i32` range, can never be placed and is rejected as `OutOfBounds`. The
/// reported cell is then an end of the line, saturated to `i32`.
pub fn occupied_cells(
    anchor: Cell,
    columns: usize,
    rotation: Rotation,
) -> Result<Vec<Cell>, PlacementError> {
    if columns > MAX_GRID_SIZE {
        // The line spans more than any grid, so one of its ends is off-grid.
        let first = saturate(line_point(anchor, columns, rotation, 0));
        let last = saturate(line_point(anchor, columns, rotation, columns - 1));
        let cell = if first.in_bounds(MAX_GRID_SIZE) { last } else { first };
        return Err(PlacementError::OutOfBounds { cell });
    }
    (0..columns)
        .map(|i| {
            let (x, z) = line_point(anchor, columns, rotation, i);
            match (i32::try_from(x), i32::try_from(z)) {
                (Ok(x), Ok(z)) => Ok(Cell::new(x, z)),
                _ => Err(PlacementError::OutOfBounds {
                    cell: saturate((x, z)),
                }),
            }
        })
        .collect()
}

/// Position of local column `i`, in `i64` so no anchor can overflow.
fn line_point(anchor: Cell, columns: usize, rotation: Rotation, i: usize) -> (i64, i64) {
    let (x, z) = (i64::from(anchor.x), i64::from(anchor.z));
    let i = i64::try_from(i).unwrap_or(i64::MAX);
    let half = i64::try_from(columns / 2).unwrap_or(i64::MAX);
    match rotation {
        Rotation::Deg0 => (x.saturating_add(i).saturating_sub(half), z),
        Rotation::Deg90 => (x, z.saturating_add(i).saturating_sub(half)),
        Rotation::Deg180 => (x.saturating_sub(i).saturating_add(half), z),
        Rotation::Deg270 => (x, z.saturating_sub(i).saturating_add(half)),
    }
}

fn saturate((x, z): (i64, i64)) -> Cell {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Cell::new(clamp(x), clamp(z))
}

/// Inclusive `(min, max)` corners of a footprint, or `None` for zero columns.
pub fn footprint_bounds(cells: &[Cell]) -> Option<(Cell, Cell)> {
    let first = cells.first()?;
    Some(cells.iter().fold((*first, *first), |(lo, hi), c| {
        (
            Cell::new(lo.x.min(c.x), lo.z.min(c.z)),
            Cell::new(hi.x.max(c.x), hi.z.max(c.z)),
        )
    }))
}
