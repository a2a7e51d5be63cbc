//! Row/column/box constraint checks.

use crate::grid::{Grid, Position, BOX_SIZE, GRID_SIZE};

/// True iff `value` may be placed at `pos` without clashing with another
/// cell in the same row, column, or 3x3 box. The target cell itself is
/// excluded from the scan, so the check works whether the cell is empty or
/// about to be overwritten. Bounded work: at most 27 comparisons.
pub fn is_valid_placement(grid: &Grid, pos: Position, value: u8) -> bool {
    // Row
    for col in 0..GRID_SIZE {
        if col != pos.col && grid.get(Position::new(pos.row, col)) == Some(value) {
            return false;
        }
    }

    // Column
    for row in 0..GRID_SIZE {
        if row != pos.row && grid.get(Position::new(row, pos.col)) == Some(value) {
            return false;
        }
    }

    // Box
    let origin = pos.box_origin();
    for row in origin.row..origin.row + BOX_SIZE {
        for col in origin.col..origin.col + BOX_SIZE {
            if (row != pos.row || col != pos.col)
                && grid.get(Position::new(row, col)) == Some(value)
            {
                return false;
            }
        }
    }

    true
}

/// True iff every cell is filled and every row, column, and box is free of
/// duplicates. Short-circuits on the first violation. This is the
/// authoritative win condition: the game completes exactly when this holds
/// after a move.
pub fn is_grid_complete(grid: &Grid) -> bool {
    if Position::all().any(|p| grid.is_empty_cell(p)) {
        return false;
    }

    // Rows
    for row in 0..GRID_SIZE {
        let mut seen = [false; GRID_SIZE + 1];
        for col in 0..GRID_SIZE {
            if let Some(v) = grid.get(Position::new(row, col)) {
                if seen[v as usize] {
                    return false;
                }
                seen[v as usize] = true;
            }
        }
    }

    // Columns
    for col in 0..GRID_SIZE {
        let mut seen = [false; GRID_SIZE + 1];
        for row in 0..GRID_SIZE {
            if let Some(v) = grid.get(Position::new(row, col)) {
                if seen[v as usize] {
                    return false;
                }
                seen[v as usize] = true;
            }
        }
    }

    // Boxes
    for box_row in 0..BOX_SIZE {
        for box_col in 0..BOX_SIZE {
            let mut seen = [false; GRID_SIZE + 1];
            for row in 0..BOX_SIZE {
                for col in 0..BOX_SIZE {
                    let pos = Position::new(box_row * BOX_SIZE + row, box_col * BOX_SIZE + col);
                    if let Some(v) = grid.get(pos) {
                        if seen[v as usize] {
                            return false;
                        }
                        seen[v as usize] = true;
                    }
                }
            }
        }
    }

    true
}
