use crate::app::{App, MenuState, Screen};
use crate::game::MAX_HINTS;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use sensation_core::{format_time, Difficulty, Position};
use std::io;

const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen {
        Screen::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        Screen::Complete => render_complete_screen(stdout, app, term_width)?,
        Screen::Leaderboard => render_leaderboard_screen(stdout, app, term_width)?,
        Screen::Stats => render_stats_screen(stdout, app, term_width)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    _term_height: u16,
) -> io::Result<()> {
    let theme = app.theme();

    let total_width = GRID_WIDTH + 26; // grid + gap + info panel
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = 2;

    if app.game.is_paused() {
        render_pause_banner(stdout, &theme, start_x, start_y)?;
    } else {
        render_grid(stdout, app, &theme, start_x, start_y)?;
    }

    let info_x = start_x + GRID_WIDTH + 3;
    render_info_panel(stdout, app, &theme, info_x, start_y)?;

    let controls_y = start_y + GRID_HEIGHT + 1;
    render_controls(stdout, app, &theme, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        let msg_x = if term_width > msg.len() as u16 {
            (term_width - msg.len() as u16) / 2
        } else {
            0
        };
        execute!(
            stdout,
            MoveTo(msg_x, controls_y + 3),
            SetForegroundColor(theme.key),
            Print(msg)
        )?;
    }

    if app.menu == MenuState::NewGame {
        render_difficulty_menu(stdout, app, &theme, start_x + 10, start_y + 6)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, theme: &Theme, x: u16, y: u16) -> io::Result<()> {
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.box_border),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..9 {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..9 {
            let border_color = if col % 3 == 0 {
                theme.box_border
            } else {
                theme.border
            };
            execute!(stdout, SetForegroundColor(border_color), Print("|"))?;

            render_cell(stdout, app, theme, Position::new(row, col))?;
        }
        execute!(stdout, SetForegroundColor(theme.box_border), Print("|"))?;

        // Separator under this row
        execute!(stdout, MoveTo(x, cell_y + 1))?;
        let (sep_color, sep) = if (row + 1) % 3 == 0 {
            (theme.box_border, "+===+===+===+===+===+===+===+===+===+")
        } else {
            (theme.border, "+---+---+---+---+---+---+---+---+---+")
        };
        execute!(stdout, SetForegroundColor(sep_color), Print(sep))?;
    }

    Ok(())
}

fn render_cell(
    stdout: &mut io::Stdout,
    app: &App,
    theme: &Theme,
    pos: Position,
) -> io::Result<()> {
    let selected = app.cursor == pos;
    let bg = if selected { theme.selected_bg } else { theme.bg };

    let (text, color) = match app.game.grid().get(pos) {
        Some(v) => {
            let color = if app.game.is_flagged(pos) {
                theme.conflict
            } else if app.game.is_given(pos) {
                theme.given
            } else {
                theme.filled
            };
            (format!(" {} ", v), color)
        }
        None => {
            let notes = app.game.notes(pos);
            if notes.is_empty() {
                ("   ".to_string(), theme.fg)
            } else if notes.len() <= 3 {
                // Up to three pencil marks fit in the cell
                let mut s: String = notes.iter().map(|d| (b'0' + d) as char).collect();
                while s.len() < 3 {
                    s.push(' ');
                }
                (s, theme.note)
            } else {
                (format!("{}+ ", notes.len()), theme.note)
            }
        }
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(color),
        Print(text),
        SetBackgroundColor(theme.bg)
    )
}

fn render_pause_banner(
    stdout: &mut io::Stdout,
    theme: &Theme,
    x: u16,
    y: u16,
) -> io::Result<()> {
    // Board is hidden while paused
    let mid_y = y + GRID_HEIGHT / 2;
    execute!(
        stdout,
        MoveTo(x + 10, mid_y - 1),
        SetForegroundColor(theme.info),
        Print("== PAUSED =="),
        MoveTo(x + 5, mid_y + 1),
        Print("press space to resume")
    )
}

fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    theme: &Theme,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let game = &app.game;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("SUDOKU SENSATION"),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Difficulty  {}", game.difficulty())),
        MoveTo(x, y + 3),
        Print(format!("Time        {}", game.elapsed_string())),
        MoveTo(x, y + 4),
        Print(format!("Errors      {}", game.errors())),
        MoveTo(x, y + 5),
        Print(format!(
            "Hints       {}/{}",
            game.hints_remaining(),
            MAX_HINTS
        )),
    )?;

    if app.notes_mode {
        execute!(
            stdout,
            MoveTo(x, y + 7),
            SetForegroundColor(theme.key),
            Print("[notes mode]")
        )?;
    }

    Ok(())
}

fn render_controls(
    stdout: &mut io::Stdout,
    app: &App,
    theme: &Theme,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme_name = app.theme().name;
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("arrows move  1-9 place  0 clear  n notes  x hint  c check"),
        MoveTo(x, y + 1),
        Print(format!(
            "space pause  g new game  b scores  s stats  t theme ({})  q quit",
            theme_name
        ))
    )
}

fn render_difficulty_menu(
    stdout: &mut io::Stdout,
    app: &App,
    theme: &Theme,
    x: u16,
    y: u16,
) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("+--- New Game ---+")
    )?;

    for (i, difficulty) in Difficulty::all_levels().iter().enumerate() {
        let marker = if i == app.menu_selection { "> " } else { "  " };
        let color = if i == app.menu_selection {
            theme.key
        } else {
            theme.info
        };
        execute!(
            stdout,
            MoveTo(x, y + 1 + i as u16),
            SetForegroundColor(color),
            Print(format!("| {}{:<13}|", marker, difficulty.to_string()))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + Difficulty::all_levels().len() as u16),
        SetForegroundColor(theme.fg),
        Print("+----------------+")
    )
}

fn render_complete_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = app.theme();
    let game = &app.game;
    let x = term_width.saturating_sub(40) / 2;

    execute!(
        stdout,
        MoveTo(x, 3),
        SetForegroundColor(theme.success),
        Print("Puzzle complete, congratulations!"),
        MoveTo(x, 5),
        SetForegroundColor(theme.info),
        Print(format!("Difficulty  {}", game.difficulty())),
        MoveTo(x, 6),
        Print(format!("Time        {}", game.elapsed_string())),
        MoveTo(x, 7),
        Print(format!("Errors      {}", game.errors())),
        MoveTo(x, 8),
        Print(format!("Hints used  {}", game.hints_used())),
        MoveTo(x, 10),
        SetForegroundColor(theme.fg),
        Print(format!("Score: {}", game.final_score())),
        MoveTo(x, 12),
        SetForegroundColor(theme.info),
        Print(format!("Your name: {}_", app.name_input)),
        MoveTo(x, 14),
        SetForegroundColor(theme.key),
        Print("enter save score  esc skip")
    )
}

fn render_leaderboard_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
) -> io::Result<()> {
    let theme = app.theme();
    let x = term_width.saturating_sub(56) / 2;

    execute!(
        stdout,
        MoveTo(x, 2),
        SetForegroundColor(theme.fg),
        Print(format!(
            "HIGH SCORES - {}  (tab to switch)",
            app.leaderboard_difficulty
        )),
        MoveTo(x, 4),
        SetForegroundColor(theme.info),
        Print(format!(
            "{:<4}{:<20}{:>7}{:>8}{:>8}{:>8}",
            "#", "Player", "Score", "Time", "Errors", "Hints"
        ))
    )?;

    let entries = app.book.scores_for(app.leaderboard_difficulty);
    if entries.is_empty() {
        execute!(
            stdout,
            MoveTo(x, 6),
            SetForegroundColor(theme.info),
            Print("No scores yet for this difficulty.")
        )?;
    }

    for (i, entry) in entries.iter().take(15).enumerate() {
        let color = if i == 0 { theme.key } else { theme.fg };
        execute!(
            stdout,
            MoveTo(x, 6 + i as u16),
            SetForegroundColor(color),
            Print(format!(
                "{:<4}{:<20}{:>7}{:>8}{:>8}{:>8}",
                i + 1,
                entry.player_name,
                entry.score,
                format_time(entry.time_ms),
                entry.errors,
                entry.hints_used
            ))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, 23),
        SetForegroundColor(theme.key),
        Print("g new game  s stats  esc back  q quit")
    )
}

fn render_stats_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = app.theme();
    let stats = app.book.stats();
    let x = term_width.saturating_sub(48) / 2;

    execute!(
        stdout,
        MoveTo(x, 2),
        SetForegroundColor(theme.fg),
        Print("STATISTICS"),
        MoveTo(x, 4),
        SetForegroundColor(theme.info),
        Print(format!("Games played    {}", stats.games_played)),
        MoveTo(x, 5),
        Print(format!("Games won       {}", stats.games_won)),
        MoveTo(x, 6),
        Print(format!("Total errors    {}", stats.total_errors)),
        MoveTo(x, 7),
        Print(format!("Total hints     {}", stats.total_hints_used)),
        MoveTo(x, 8),
        Print(format!("Daily streak    {}", stats.current_streak)),
        MoveTo(x, 9),
        Print(format!("Longest streak  {}", stats.longest_streak)),
        MoveTo(x, 11),
        SetForegroundColor(theme.fg),
        Print(format!(
            "{:<12}{:>12}{:>12}",
            "Difficulty", "Best", "Average"
        ))
    )?;

    for (i, &difficulty) in Difficulty::all_levels().iter().enumerate() {
        let times = stats.times_for(difficulty);
        let best = times
            .best_ms
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        let avg = times
            .average_ms
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        execute!(
            stdout,
            MoveTo(x, 12 + i as u16),
            SetForegroundColor(theme.info),
            Print(format!("{:<12}{:>12}{:>12}", difficulty.to_string(), best, avg))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, 17),
        SetForegroundColor(theme.key),
        Print(format!(
            "b scores  esc back  q quit   [store: {}]",
            app.book.store_name()
        ))
    )
}
