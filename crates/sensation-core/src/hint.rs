//! Hint target selection.

use crate::grid::{Grid, Position};
use crate::rng::GameRng;

/// Pick a uniformly random empty cell, or `None` when the grid is full.
/// The selector only chooses *where*; revealing the solution value there,
/// and capping hints per game, are the caller's job.
pub fn random_empty_cell(grid: &Grid, rng: &mut GameRng) -> Option<Position> {
    let empty: Vec<Position> = Position::all().filter(|&p| grid.is_empty_cell(p)).collect();

    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.next_usize(empty.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    #[test]
    fn full_grid_yields_none() {
        let grid = Generator::with_seed(1).generate_solved();
        let mut rng = GameRng::with_seed(0);
        assert_eq!(random_empty_cell(&grid, &mut rng), None);
    }

    #[test]
    fn single_empty_cell_is_always_chosen() {
        let mut grid = Generator::with_seed(2).generate_solved();
        let hole = Position::new(3, 5);
        grid.set(hole, None);

        for seed in 0..20 {
            let mut rng = GameRng::with_seed(seed);
            assert_eq!(random_empty_cell(&grid, &mut rng), Some(hole));
        }
    }

    #[test]
    fn chosen_cell_is_empty() {
        let mut generator = Generator::with_seed(3);
        let puzzle = generator.generate(crate::Difficulty::Medium).puzzle;

        let mut rng = GameRng::with_seed(9);
        for _ in 0..50 {
            let pos = random_empty_cell(&puzzle, &mut rng).unwrap();
            assert!(puzzle.is_empty_cell(pos));
        }
    }
}
