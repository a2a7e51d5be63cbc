use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const GRID_SIZE: usize = 9;
/// Total number of cells.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Side length of a 3x3 box.
pub const BOX_SIZE: usize = 3;

/// A cell coordinate, `row` and `col` both in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        Self { row, col }
    }

    /// Row-major linear index in `0..81`.
    pub fn index(self) -> usize {
        self.row * GRID_SIZE + self.col
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self {
            row: index / GRID_SIZE,
            col: index % GRID_SIZE,
        }
    }

    /// Iterate all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }

    /// Top-left corner of the 3x3 box containing this position.
    pub fn box_origin(self) -> Position {
        Position {
            row: (self.row / BOX_SIZE) * BOX_SIZE,
            col: (self.col / BOX_SIZE) * BOX_SIZE,
        }
    }
}

/// A 9x9 board. Each cell holds a digit 1-9 or is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// A grid with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, value: Option<u8>) {
        debug_assert!(value.is_none_or(|v| (1..=9).contains(&v)));
        self.cells[pos.row][pos.col] = value;
    }

    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.cells[pos.row][pos.col].is_none()
    }

    pub fn empty_count(&self) -> usize {
        Position::all().filter(|&p| self.is_empty_cell(p)).count()
    }

    pub fn filled_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    /// 81-character representation, `.` for empty cells.
    pub fn to_string_compact(&self) -> String {
        let mut out = String::with_capacity(CELL_COUNT);
        for pos in Position::all() {
            match self.get(pos) {
                Some(v) => out.push((b'0' + v) as char),
                None => out.push('.'),
            }
        }
        out
    }

    /// Parse an 81-character string. `.`, `0`, and `_` mean empty.
    pub fn from_string(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELL_COUNT {
            return None;
        }

        let mut grid = Self::empty();
        for (i, c) in chars.into_iter().enumerate() {
            let value = match c {
                '.' | '0' | '_' => None,
                '1'..='9' => Some(c as u8 - b'0'),
                _ => return None,
            };
            grid.set(Position::from_index(i), value);
        }
        Some(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            if row % BOX_SIZE == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for col in 0..GRID_SIZE {
                if col % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[row][col] {
                    Some(v) => write!(f, "{} ", v)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+-------+-------+-------+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_81_empty_cells() {
        let grid = Grid::empty();
        assert_eq!(grid.empty_count(), CELL_COUNT);
        assert_eq!(grid.filled_count(), 0);
        assert!(Position::all().all(|p| grid.get(p).is_none()));
    }

    #[test]
    fn position_index_round_trip() {
        for pos in Position::all() {
            assert_eq!(Position::from_index(pos.index()), pos);
        }
        assert_eq!(Position::new(4, 7).index(), 43);
    }

    #[test]
    fn box_origin() {
        assert_eq!(Position::new(0, 0).box_origin(), Position::new(0, 0));
        assert_eq!(Position::new(4, 7).box_origin(), Position::new(3, 6));
        assert_eq!(Position::new(8, 2).box_origin(), Position::new(6, 0));
    }

    #[test]
    fn string_round_trip() {
        let s = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let grid = Grid::from_string(s).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert_eq!(
            grid.to_string_compact(),
            s.replace('0', ".")
        );
        assert_eq!(Grid::from_string(&grid.to_string_compact()).unwrap(), grid);
    }

    #[test]
    fn from_string_rejects_bad_input() {
        assert!(Grid::from_string("12345").is_none());
        let mut bad = "1".repeat(80);
        bad.push('x');
        assert!(Grid::from_string(&bad).is_none());
    }

    #[test]
    fn serde_round_trip() {
        let s = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let grid = Grid::from_string(s).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
