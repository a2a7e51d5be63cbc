//! Conflict detection for player moves.
//!
//! Unlike [`crate::rules::is_valid_placement`], which gates a placement
//! before it happens, conflict detection runs *after* a provisional move so
//! the UI can highlight every clashing cell instead of rejecting the input.

use crate::grid::{Grid, Position, BOX_SIZE, CELL_COUNT, GRID_SIZE};

/// Membership set over the 81 board cells, keyed by `Position::index()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictSet {
    cells: [bool; CELL_COUNT],
    len: usize,
}

impl Default for ConflictSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictSet {
    pub fn new() -> Self {
        Self {
            cells: [false; CELL_COUNT],
            len: 0,
        }
    }

    pub fn insert(&mut self, pos: Position) {
        if !self.cells[pos.index()] {
            self.cells[pos.index()] = true;
            self.len += 1;
        }
    }

    pub fn remove(&mut self, pos: Position) {
        if self.cells[pos.index()] {
            self.cells[pos.index()] = false;
            self.len -= 1;
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells[pos.index()]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.cells = [false; CELL_COUNT];
        self.len = 0;
    }

    /// Add every member of `other` to this set.
    pub fn extend(&mut self, other: &ConflictSet) {
        for pos in other.iter() {
            self.insert(pos);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&p| self.cells[p.index()])
    }
}

/// Find all cells clashing with `value` at `pos`, assuming the grid already
/// contains `value` there. Scans the row, column, and box; every matching
/// peer is returned together with the origin cell. When no peer matches the
/// result is empty -- the origin is never flagged on its own.
pub fn detect_conflicts(grid: &Grid, pos: Position, value: u8) -> ConflictSet {
    let mut conflicts = ConflictSet::new();

    // Row
    for col in 0..GRID_SIZE {
        if col != pos.col && grid.get(Position::new(pos.row, col)) == Some(value) {
            conflicts.insert(Position::new(pos.row, col));
            conflicts.insert(pos);
        }
    }

    // Column
    for row in 0..GRID_SIZE {
        if row != pos.row && grid.get(Position::new(row, pos.col)) == Some(value) {
            conflicts.insert(Position::new(row, pos.col));
            conflicts.insert(pos);
        }
    }

    // Box
    let origin = pos.box_origin();
    for row in origin.row..origin.row + BOX_SIZE {
        for col in origin.col..origin.col + BOX_SIZE {
            if (row != pos.row || col != pos.col)
                && grid.get(Position::new(row, col)) == Some(value)
            {
                conflicts.insert(Position::new(row, col));
                conflicts.insert(pos);
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_placement_yields_empty_set() {
        let mut grid = Grid::empty();
        grid.set(Position::new(4, 4), Some(7));

        let conflicts = detect_conflicts(&grid, Position::new(4, 4), 7);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn row_conflict_includes_origin_and_peer() {
        let mut grid = Grid::empty();
        grid.set(Position::new(2, 1), Some(3));
        grid.set(Position::new(2, 7), Some(3));

        let conflicts = detect_conflicts(&grid, Position::new(2, 7), 3);
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.contains(Position::new(2, 1)));
        assert!(conflicts.contains(Position::new(2, 7)));
    }

    #[test]
    fn collects_peers_across_all_axes() {
        let mut grid = Grid::empty();
        grid.set(Position::new(0, 4), Some(9)); // same row
        grid.set(Position::new(6, 0), Some(9)); // same column
        grid.set(Position::new(1, 1), Some(9)); // same box
        grid.set(Position::new(0, 0), Some(9)); // the move itself

        let conflicts = detect_conflicts(&grid, Position::new(0, 0), 9);
        assert_eq!(conflicts.len(), 4);
        assert!(conflicts.contains(Position::new(0, 0)));
        assert!(conflicts.contains(Position::new(0, 4)));
        assert!(conflicts.contains(Position::new(6, 0)));
        assert!(conflicts.contains(Position::new(1, 1)));
    }

    #[test]
    fn unrelated_cells_are_not_flagged() {
        let mut grid = Grid::empty();
        grid.set(Position::new(8, 8), Some(5));
        grid.set(Position::new(0, 0), Some(5));

        let conflicts = detect_conflicts(&grid, Position::new(0, 0), 5);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn set_insert_remove() {
        let mut set = ConflictSet::new();
        let pos = Position::new(3, 3);

        set.insert(pos);
        set.insert(pos); // duplicate insert is a no-op
        assert_eq!(set.len(), 1);
        assert!(set.contains(pos));

        set.remove(pos);
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
