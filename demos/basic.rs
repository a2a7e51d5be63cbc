//! Basic tour of the puzzle engine.

use sensation_core::{
    calculate_score, detect_conflicts, format_time, is_grid_complete, random_empty_cell,
    Difficulty, GameRng, Generator, Position,
};

fn main() {
    // Generate a puzzle
    println!("Generating a Medium difficulty puzzle...\n");
    let mut generator = Generator::new();
    let generated = generator.generate(Difficulty::Medium);

    println!("Puzzle:");
    println!("{}", generated.puzzle);
    println!("Empty cells: {}", generated.puzzle.empty_count());

    println!("\nRecorded solution:");
    println!("{}", generated.solution);
    println!(
        "Solution complete: {}",
        is_grid_complete(&generated.solution)
    );

    // Provoke a conflict: copy a given's digit into a neighboring cell
    let mut board = generated.puzzle.clone();
    let filled = Position::all()
        .find(|&p| board.get(p).is_some())
        .expect("puzzle has givens");
    let value = board.get(filled).unwrap();
    let peer = Position::new(filled.row, (filled.col + 1) % 9);

    if board.get(peer).is_none() {
        board.set(peer, Some(value));
        let conflicts = detect_conflicts(&board, peer, value);
        println!(
            "Placing {} at ({}, {}) flags {} cell(s)",
            value,
            peer.row,
            peer.col,
            conflicts.len()
        );
    }

    // Pick a hint target
    let mut rng = GameRng::new();
    if let Some(pos) = random_empty_cell(&generated.puzzle, &mut rng) {
        println!(
            "Hint would reveal ({}, {}) = {}",
            pos.row,
            pos.col,
            generated.solution.get(pos).unwrap()
        );
    }

    // Score a hypothetical finish: 7 minutes, 2 errors, 1 hint
    let score = calculate_score(7 * 60_000, 2, 1, Difficulty::Medium);
    println!(
        "\nFinishing in {} with 2 errors and 1 hint scores {}",
        format_time(7 * 60_000),
        score
    );
}
