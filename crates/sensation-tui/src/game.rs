use sensation_core::{
    calculate_score, detect_conflicts, format_time, is_grid_complete, random_empty_cell,
    ConflictSet, Difficulty, GameRng, Generator, Grid, Position,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// Maximum hints per game.
pub const MAX_HINTS: u32 = 3;

/// One game session: the player's working grid alongside the immutable
/// puzzle/solution pair, plus timer and counters. The engine validates and
/// scores; this type owns the state machine around it.
pub struct Game {
    /// Working grid the player mutates
    grid: Grid,
    /// The givens, used to lock cells
    puzzle: Grid,
    /// The recorded solution
    solution: Grid,
    difficulty: Difficulty,
    /// Cells currently flagged as conflicting or wrong
    flags: ConflictSet,
    /// Wrong digits entered (counted even when later corrected)
    errors: u32,
    hints_used: u32,
    /// Pencil marks, one digit bitmask per cell
    notes: [u16; 81],
    start_time: Instant,
    elapsed: Duration,
    paused: bool,
    completed: bool,
    rng: GameRng,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_generator(Generator::new(), difficulty)
    }

    /// Reproducible game for tests and the `--seed` flag.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::from_generator(Generator::with_seed(seed), difficulty)
    }

    fn from_generator(mut generator: Generator, difficulty: Difficulty) -> Self {
        let generated = generator.generate(difficulty);
        Self {
            grid: generated.puzzle.clone(),
            puzzle: generated.puzzle,
            solution: generated.solution,
            difficulty,
            flags: ConflictSet::new(),
            errors: 0,
            hints_used: 0,
            notes: [0; 81],
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            completed: false,
            rng: GameRng::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_given(&self, pos: Position) -> bool {
        self.puzzle.get(pos).is_some()
    }

    pub fn is_flagged(&self, pos: Position) -> bool {
        self.flags.contains(pos)
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> u32 {
        MAX_HINTS - self.hints_used
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Note digits for a cell, ascending.
    pub fn notes(&self, pos: Position) -> Vec<u8> {
        let mask = self.notes[pos.index()];
        (1..=9).filter(|d| mask & (1 << d) != 0).collect()
    }

    pub fn elapsed(&self) -> Duration {
        if self.paused || self.completed {
            self.elapsed
        } else {
            self.elapsed + self.start_time.elapsed()
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    pub fn elapsed_string(&self) -> String {
        format_time(self.elapsed_ms())
    }

    /// Score the session would earn if finalized now.
    pub fn final_score(&self) -> u32 {
        calculate_score(self.elapsed_ms(), self.errors, self.hints_used, self.difficulty)
    }

    pub fn toggle_pause(&mut self) {
        if self.completed {
            return;
        }
        if self.paused {
            self.start_time = Instant::now();
        } else {
            self.elapsed += self.start_time.elapsed();
        }
        self.paused = !self.paused;
    }

    /// Place a digit. The placement is provisional: conflicts are flagged
    /// for display, never rejected. Returns whether the digit matches the
    /// solution; rejected input (given cell, paused, finished game) also
    /// returns false.
    pub fn set_value(&mut self, pos: Position, digit: u8) -> bool {
        if self.completed || self.paused || self.is_given(pos) {
            return false;
        }

        self.grid.set(pos, Some(digit));
        self.notes[pos.index()] = 0;
        self.flags.remove(pos);
        self.flags.extend(&detect_conflicts(&self.grid, pos, digit));

        let is_correct = self.solution.get(pos) == Some(digit);
        if !is_correct {
            self.errors += 1;
        }

        self.check_completion();
        is_correct
    }

    /// Clear a player-entered cell.
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        if self.completed || self.paused || self.is_given(pos) {
            return false;
        }
        if self.grid.get(pos).is_none() && self.notes[pos.index()] == 0 {
            return false;
        }

        self.grid.set(pos, None);
        self.notes[pos.index()] = 0;
        self.flags.remove(pos);
        true
    }

    /// Toggle a pencil mark. Only meaningful on empty, non-given cells.
    pub fn toggle_note(&mut self, pos: Position, digit: u8) -> bool {
        if self.completed || self.paused || self.is_given(pos) {
            return false;
        }
        if self.grid.get(pos).is_some() {
            return false;
        }

        self.notes[pos.index()] ^= 1 << digit;
        true
    }

    /// Reveal one random empty cell from the solution. Capped at
    /// [`MAX_HINTS`] per game; the engine picks where, the solution says
    /// what. Returns the revealed position.
    pub fn hint(&mut self) -> Option<Position> {
        if self.completed || self.paused || self.hints_used >= MAX_HINTS {
            return None;
        }

        let pos = random_empty_cell(&self.grid, &mut self.rng)?;
        let value = self.solution.get(pos);
        self.grid.set(pos, value);
        self.notes[pos.index()] = 0;
        self.flags.remove(pos);
        self.hints_used += 1;

        self.check_completion();
        Some(pos)
    }

    /// Flag every filled cell that disagrees with the solution (the "check"
    /// action). Replaces the current flag set. Returns whether anything was
    /// flagged.
    pub fn check_errors(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.flags.clear();
        for pos in Position::all() {
            if let Some(v) = self.grid.get(pos) {
                if self.solution.get(pos) != Some(v) {
                    self.flags.insert(pos);
                }
            }
        }
        !self.flags.is_empty()
    }

    fn check_completion(&mut self) {
        if is_grid_complete(&self.grid) {
            self.completed = true;
            self.elapsed += self.start_time.elapsed();
        }
    }

    /// Serialize the session for saving. Pencil marks and the flag set are
    /// display state and are not persisted.
    pub fn serialize(&self) -> String {
        let state = SaveState {
            puzzle: self.puzzle.to_string_compact(),
            grid: self.grid.to_string_compact(),
            solution: self.solution.to_string_compact(),
            difficulty: self.difficulty,
            elapsed_ms: self.elapsed_ms(),
            errors: self.errors,
            hints_used: self.hints_used,
        };
        serde_json::to_string(&state).unwrap_or_default()
    }

    /// Restore a saved session. The restored game starts paused. The hint
    /// counter is clamped so a hand-edited file cannot push it past the cap.
    pub fn deserialize(json: &str) -> Option<Self> {
        let state: SaveState = serde_json::from_str(json).ok()?;

        let puzzle = Grid::from_string(&state.puzzle)?;
        let grid = Grid::from_string(&state.grid)?;
        let solution = Grid::from_string(&state.solution)?;

        Some(Self {
            grid,
            puzzle,
            solution,
            difficulty: state.difficulty,
            flags: ConflictSet::new(),
            errors: state.errors,
            hints_used: state.hints_used.min(MAX_HINTS),
            notes: [0; 81],
            start_time: Instant::now(),
            elapsed: Duration::from_millis(state.elapsed_ms),
            paused: true,
            completed: false,
            rng: GameRng::new(),
        })
    }

    /// Write the session to disk so it can be resumed later.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.serialize())
    }

    /// Resume a previously saved session. `None` when the file is missing
    /// or does not parse.
    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        Self::deserialize(&json)
    }
}

#[derive(Serialize, Deserialize)]
struct SaveState {
    puzzle: String,
    grid: String,
    solution: String,
    difficulty: Difficulty,
    elapsed_ms: u64,
    errors: u32,
    hints_used: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_empty(game: &Game) -> Position {
        Position::all()
            .find(|&p| game.grid().is_empty_cell(p))
            .unwrap()
    }

    fn solution_value(game: &Game, pos: Position) -> u8 {
        game.solution.get(pos).unwrap()
    }

    #[test]
    fn new_game_matches_difficulty() {
        let game = Game::with_seed(Difficulty::Easy, 1);
        assert_eq!(game.grid().empty_count(), 30);
        assert_eq!(game.hints_remaining(), MAX_HINTS);
        assert!(!game.is_completed());
    }

    #[test]
    fn given_cells_reject_input() {
        let mut game = Game::with_seed(Difficulty::Easy, 2);
        let given = Position::all()
            .find(|&p| game.is_given(p))
            .unwrap();
        assert!(!game.set_value(given, 1));
        assert!(!game.clear_cell(given));
    }

    #[test]
    fn correct_and_incorrect_moves() {
        let mut game = Game::with_seed(Difficulty::Easy, 3);
        let pos = first_empty(&game);
        let right = solution_value(&game, pos);
        let wrong = if right == 9 { 1 } else { right + 1 };

        assert!(!game.set_value(pos, wrong));
        assert_eq!(game.errors(), 1);

        assert!(game.set_value(pos, right));
        assert_eq!(game.errors(), 1); // corrections do not undo the count
    }

    #[test]
    fn wrong_value_flags_conflicts() {
        let mut game = Game::with_seed(Difficulty::Medium, 4);

        // Find an empty cell sharing its row with a given; placing that
        // given's digit guarantees a conflict.
        let (pos, row_value) = Position::all()
            .filter(|&p| game.grid().is_empty_cell(p))
            .find_map(|p| {
                (0..9)
                    .filter(|&c| c != p.col)
                    .filter_map(|c| game.grid().get(Position::new(p.row, c)))
                    .next()
                    .map(|v| (p, v))
            })
            .unwrap();

        game.set_value(pos, row_value);
        assert!(game.is_flagged(pos));
    }

    #[test]
    fn notes_toggle_and_clear_on_placement() {
        let mut game = Game::with_seed(Difficulty::Easy, 5);
        let pos = first_empty(&game);

        assert!(game.toggle_note(pos, 4));
        assert!(game.toggle_note(pos, 7));
        assert_eq!(game.notes(pos), vec![4, 7]);

        assert!(game.toggle_note(pos, 4));
        assert_eq!(game.notes(pos), vec![7]);

        game.set_value(pos, solution_value(&game, pos));
        assert!(game.notes(pos).is_empty());
    }

    #[test]
    fn hints_cap_at_three() {
        let mut game = Game::with_seed(Difficulty::Easy, 6);
        for _ in 0..MAX_HINTS {
            let pos = game.hint().unwrap();
            // A hint reveals the solution value
            assert_eq!(game.grid().get(pos), game.solution.get(pos));
        }
        assert_eq!(game.hints_remaining(), 0);
        assert!(game.hint().is_none());
    }

    #[test]
    fn pause_blocks_moves() {
        let mut game = Game::with_seed(Difficulty::Easy, 7);
        let pos = first_empty(&game);
        game.toggle_pause();
        assert!(!game.set_value(pos, 1));
        assert!(game.hint().is_none());
        game.toggle_pause();
        assert!(game.set_value(pos, solution_value(&game, pos)));
    }

    #[test]
    fn check_errors_flags_wrong_cells_only() {
        let mut game = Game::with_seed(Difficulty::Medium, 8);
        let pos = first_empty(&game);
        let wrong = if solution_value(&game, pos) == 9 { 1 } else { 9 };
        game.set_value(pos, wrong);

        assert!(game.check_errors());
        assert!(game.is_flagged(pos));
        let flagged: Vec<Position> = Position::all().filter(|&p| game.is_flagged(p)).collect();
        assert_eq!(flagged, vec![pos]);
    }

    #[test]
    fn completion_fires_on_the_final_move_only() {
        let mut game = Game::with_seed(Difficulty::Easy, 9);
        let empties: Vec<Position> = Position::all()
            .filter(|&p| game.grid().is_empty_cell(p))
            .collect();

        for (i, &pos) in empties.iter().enumerate() {
            assert!(!game.is_completed());
            game.set_value(pos, solution_value(&game, pos));
            if i + 1 < empties.len() {
                assert!(!game.is_completed());
            }
        }
        assert!(game.is_completed());
        assert_eq!(game.errors(), 0);

        // Finished games accept no further input
        assert!(!game.set_value(empties[0], 1));
    }

    #[test]
    fn save_restore_round_trip() {
        let mut game = Game::with_seed(Difficulty::Hard, 10);
        let pos = first_empty(&game);
        game.set_value(pos, solution_value(&game, pos));

        let json = game.serialize();
        let restored = Game::deserialize(&json).unwrap();

        assert!(restored.is_paused());
        assert_eq!(restored.difficulty(), Difficulty::Hard);
        assert_eq!(restored.grid(), game.grid());
        assert_eq!(restored.errors(), game.errors());
    }

    #[test]
    fn save_file_round_trip() {
        let path = std::env::temp_dir().join("sensation_save_test.json");
        let _ = std::fs::remove_file(&path);

        let mut game = Game::with_seed(Difficulty::Medium, 12);
        let pos = first_empty(&game);
        game.set_value(pos, solution_value(&game, pos));
        game.save_to(&path).unwrap();

        let restored = Game::load_from(&path).unwrap();
        assert!(restored.is_paused());
        assert_eq!(restored.grid(), game.grid());
        assert_eq!(restored.difficulty(), Difficulty::Medium);

        let _ = std::fs::remove_file(&path);
        assert!(Game::load_from(&path).is_none());
    }

    #[test]
    fn restore_clamps_the_hint_counter() {
        let game = Game::with_seed(Difficulty::Easy, 13);
        let mut state: serde_json::Value = serde_json::from_str(&game.serialize()).unwrap();
        state["hints_used"] = serde_json::Value::from(99u32);

        let restored = Game::deserialize(&state.to_string()).unwrap();
        assert_eq!(restored.hints_used(), MAX_HINTS);
        assert_eq!(restored.hints_remaining(), 0);
    }

    #[test]
    fn score_reflects_counters() {
        let mut game = Game::with_seed(Difficulty::Hard, 11);
        game.hint();
        let pos = first_empty(&game);
        let wrong = if solution_value(&game, pos) == 9 { 1 } else { 9 };
        game.set_value(pos, wrong);

        // base 3000 - 100 (hint) - 50 (error) - small time penalty
        let score = game.final_score();
        assert!(score <= 2850);
        assert!(score > 2800);
    }
}
