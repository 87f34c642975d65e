//! Shared helpers for spangrid integration tests.
#![allow(dead_code)]

use spangrid::{BoundaryPolicy, Cell, Grid};

/// A grid with the same policy on all four edges.
pub fn grid_with_policy(rows: u32, cols: u32, policy: BoundaryPolicy) -> Grid {
    let mut grid = Grid::new(rows, cols).expect("valid dimensions");
    match policy {
        BoundaryPolicy::Fixed => grid.set_all_fixed(),
        BoundaryPolicy::Clipping => grid.set_all_clipping(),
        BoundaryPolicy::Grow => grid.set_all_grow(),
    }
    grid
}

/// A spanning cell carrying a marker value, so tests can tell instances
/// apart through the accessors.
pub fn marked_cell(row_span: u32, col_span: u32, marker: &str) -> Cell {
    Cell::new(row_span, col_span)
        .expect("valid spans")
        .with_value(serde_json::json!(marker))
        .expect("marker")
}

/// Count the non-default positions of the whole grid.
pub fn placed_positions(grid: &Grid) -> usize {
    let mut count = 0;
    for row in grid.row0()..=grid.row_end() {
        for col in grid.col0()..=grid.col_end() {
            if !grid.is_default(row, col).expect("in range") {
                count += 1;
            }
        }
    }
    count
}

/// Assert the full structural invariant set of a grid:
/// extent bookkeeping, anchor uniqueness, and span coverage.
pub fn assert_invariants(grid: &Grid) {
    let (row0, col0, row_end, col_end) = grid.extent();
    assert_eq!(row_end, row0 + i64::from(grid.row_number()) - 1);
    assert_eq!(col_end, col0 + i64::from(grid.col_number()) - 1);

    let mut covered = 0usize;
    for row in row0..=row_end {
        for col in col0..=col_end {
            let default = grid.is_default(row, col).expect("in range");
            let visible = grid.is_visible(row, col).expect("in range");
            if default {
                // Untouched positions hold the visible default sentinel.
                assert!(visible, "default position ({row}/{col}) must be visible");
                continue;
            }
            if !visible {
                continue;
            }
            // A visible non-default position is a cell anchor: its whole
            // rectangle must reference the same cell, lie in bounds, and
            // contain no other visible position.
            let anchor = grid.cell_at(row, col).expect("in range");
            let rows = i64::from(anchor.row_span());
            let cols = i64::from(anchor.col_span());
            assert!(row + rows - 1 <= row_end, "cell at ({row}/{col}) overruns rows");
            assert!(col + cols - 1 <= col_end, "cell at ({row}/{col}) overruns cols");
            for r in row..row + rows {
                for c in col..col + cols {
                    assert!(
                        !grid.is_default(r, c).expect("in range"),
                        "covered position ({r}/{c}) is default"
                    );
                    assert!(
                        std::ptr::eq(anchor, grid.cell_at(r, c).expect("in range")),
                        "covered position ({r}/{c}) references a different cell"
                    );
                    if (r, c) != (row, col) {
                        assert!(
                            !grid.is_visible(r, c).expect("in range"),
                            "non-anchor position ({r}/{c}) is visible"
                        );
                    }
                }
            }
            covered += usize::try_from(rows * cols).expect("positive spans");
        }
    }
    assert_eq!(
        covered,
        placed_positions(grid),
        "anchored rectangles must cover every placed position exactly once"
    );
}
