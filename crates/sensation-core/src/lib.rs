//! Sudoku puzzle engine.
//!
//! The engine is a set of plain-data types and, for the most part, pure
//! functions over caller-owned grids:
//!
//! - [`Grid`] and [`Position`] are the board primitives.
//! - [`rules`] holds the row/column/box constraint checks.
//! - [`Generator`] produces a [`Puzzle`] (board plus solution) via randomized
//!   backtracking followed by difficulty-dependent cell removal.
//! - [`detect_conflicts`] flags every cell that clashes with a placed value,
//!   for highlighting provisional invalid moves rather than rejecting them.
//! - [`scoring`] turns elapsed time and mistake/hint counters into a score.
//! - [`random_empty_cell`] picks a hint target.
//!
//! The engine holds no game-session state; timers, pause handling, and
//! persistence belong to the caller.

pub mod conflict;
pub mod difficulty;
pub mod generator;
pub mod grid;
pub mod hint;
pub mod rng;
pub mod rules;
pub mod scoring;

pub use conflict::{detect_conflicts, ConflictSet};
pub use difficulty::Difficulty;
pub use generator::{Generator, Puzzle};
pub use grid::{Grid, Position, CELL_COUNT, GRID_SIZE};
pub use hint::random_empty_cell;
pub use rng::GameRng;
pub use rules::{is_grid_complete, is_valid_placement};
pub use scoring::{calculate_score, format_time};
