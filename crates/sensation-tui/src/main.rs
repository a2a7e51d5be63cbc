mod app;
mod game;
mod render;
mod stats;
mod store;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use sensation_core::Difficulty;
use stats::ScoreBook;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::JsonFileStore;

/// Sudoku in the terminal: generated puzzles, conflicts highlighted as you
/// type, hints, scoring, and a local leaderboard.
#[derive(Parser)]
#[command(name = "sensation", version, about)]
struct Args {
    /// Difficulty of the first game (easy, medium, hard)
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for reproducible puzzle generation
    #[arg(long)]
    seed: Option<u64>,

    /// Player name prefilled on the completion screen
    #[arg(short, long, default_value = "Player")]
    player: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Resume the saved session if there is one; an explicit seed always
    // starts fresh.
    let save_path = save_path();
    let game = match args.seed {
        Some(seed) => Game::with_seed(args.difficulty, seed),
        None => Game::load_from(&save_path).unwrap_or_else(|| Game::new(args.difficulty)),
    };
    let book = ScoreBook::open(Arc::new(JsonFileStore::new()));
    let mut app = App::new(game, book, args.player);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    // Save an unfinished game on the way out; a finished one clears the file
    if app.game.is_completed() {
        let _ = std::fs::remove_file(&save_path);
    } else if let Err(e) = app.game.save_to(&save_path) {
        eprintln!("warning: could not save the game: {}", e);
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn save_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sensation_save.json")
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
