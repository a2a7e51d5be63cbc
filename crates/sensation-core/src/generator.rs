//! Puzzle generation via randomized backtracking plus cell removal.

use crate::difficulty::Difficulty;
use crate::grid::{Grid, Position};
use crate::rng::GameRng;
use crate::rules::is_valid_placement;

/// A generated board together with its recorded solution. Every filled cell
/// of `puzzle` equals the corresponding cell of `solution`; the caller
/// validates player moves against `solution` without re-solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

/// Sudoku puzzle generator. The shuffled digit order inside the solver is
/// the only source of variety; there is no separate seeding of random cells.
pub struct Generator {
    rng: GameRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: GameRng::new(),
        }
    }

    /// Reproducible generator for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: GameRng::with_seed(seed),
        }
    }

    /// Generate a puzzle and its solution for the given difficulty.
    pub fn generate(&mut self, difficulty: Difficulty) -> Puzzle {
        let solution = self.generate_solved();
        let puzzle = self.remove_cells(&solution, difficulty);
        Puzzle { puzzle, solution }
    }

    /// Produce a fully solved grid. Backtracking from an empty board always
    /// succeeds; should the solver ever fail at the top level the partially
    /// mutated grid is discarded and generation restarts from scratch.
    pub fn generate_solved(&mut self) -> Grid {
        loop {
            let mut grid = Grid::empty();
            if self.solve(&mut grid) {
                return grid;
            }
        }
    }

    /// Randomized backtracking solver. Fills `grid` in place and returns
    /// whether a full assignment was reached; on failure the grid is left as
    /// the caller passed it (every trial placement is undone).
    pub fn solve(&mut self, grid: &mut Grid) -> bool {
        let Some(pos) = first_empty(grid) else {
            return true;
        };

        let mut digits: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        self.rng.shuffle(&mut digits);

        for &digit in &digits {
            if is_valid_placement(grid, pos, digit) {
                grid.set(pos, Some(digit));
                if self.solve(grid) {
                    return true;
                }
                grid.set(pos, None); // backtrack
            }
        }

        false
    }

    /// Copy `solution` and clear a difficulty-dependent number of cells,
    /// chosen by shuffling all 81 positions once and emptying the first N.
    /// The trimmed puzzle is not checked for solution uniqueness; a player
    /// may find a valid completion other than the recorded solution.
    pub fn remove_cells(&mut self, solution: &Grid, difficulty: Difficulty) -> Grid {
        let mut puzzle = solution.clone();

        let mut positions: Vec<Position> = Position::all().collect();
        self.rng.shuffle(&mut positions);

        for pos in positions.into_iter().take(difficulty.cells_to_remove()) {
            puzzle.set(pos, None);
        }

        puzzle
    }
}

/// First empty cell in row-major order.
fn first_empty(grid: &Grid) -> Option<Position> {
    Position::all().find(|&p| grid.is_empty_cell(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_grid_complete;

    #[test]
    fn solved_grid_is_complete() {
        let mut generator = Generator::with_seed(42);
        let grid = generator.generate_solved();

        assert_eq!(grid.empty_count(), 0);
        assert!(is_grid_complete(&grid));
    }

    #[test]
    fn solution_cells_are_individually_valid() {
        let mut generator = Generator::with_seed(7);
        let grid = generator.generate_solved();

        for pos in Position::all() {
            let v = grid.get(pos).unwrap();
            assert!(is_valid_placement(&grid, pos, v));
        }
    }

    #[test]
    fn different_seeds_give_different_grids() {
        let a = Generator::with_seed(1).generate_solved();
        let b = Generator::with_seed(2).generate_solved();
        assert_ne!(a, b);
    }

    #[test]
    fn same_seed_reproduces_the_puzzle() {
        let a = Generator::with_seed(99).generate(Difficulty::Medium);
        let b = Generator::with_seed(99).generate(Difficulty::Medium);
        assert_eq!(a.puzzle, b.puzzle);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn removal_count_matches_difficulty_exactly() {
        for &difficulty in Difficulty::all_levels() {
            let mut generator = Generator::with_seed(5);
            let Puzzle { puzzle, .. } = generator.generate(difficulty);
            assert_eq!(puzzle.empty_count(), difficulty.cells_to_remove());
        }
    }

    #[test]
    fn puzzle_agrees_with_solution_on_filled_cells() {
        let mut generator = Generator::with_seed(11);
        let Puzzle { puzzle, solution } = generator.generate(Difficulty::Hard);

        assert!(is_grid_complete(&solution));
        for pos in Position::all() {
            if let Some(v) = puzzle.get(pos) {
                assert_eq!(solution.get(pos), Some(v));
            }
        }
    }

    #[test]
    fn solve_completes_a_partial_grid() {
        let s = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
        let mut grid = Grid::from_string(s).unwrap();

        let mut generator = Generator::with_seed(0);
        assert!(generator.solve(&mut grid));
        assert!(is_grid_complete(&grid));
        // Givens are untouched
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(8, 8)), Some(9));
    }

    #[test]
    fn solve_fails_on_contradiction_and_restores_the_grid() {
        // Row 0 already holds 1-8, and the column blocks the remaining 9,
        // so the first empty cell has no candidate at all.
        let mut grid = Grid::empty();
        for col in 1..9 {
            grid.set(Position::new(0, col), Some(col as u8));
        }
        grid.set(Position::new(5, 0), Some(9));
        let before = grid.clone();

        let mut generator = Generator::with_seed(0);
        assert!(!generator.solve(&mut grid));
        assert_eq!(grid, before);
    }
}
