use crate::game::Game;
use crate::stats::ScoreBook;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use sensation_core::{Difficulty, Position};

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Normal gameplay (covers the pause overlay too)
    Playing,
    /// Completion screen with name entry
    Complete,
    /// High-score table
    Leaderboard,
    /// Aggregate statistics
    Stats,
}

/// Modal menu state during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    /// Choosing a difficulty for a new game
    NewGame,
}

/// The main application state.
pub struct App {
    pub game: Game,
    pub cursor: Position,
    pub notes_mode: bool,
    pub menu: MenuState,
    pub menu_selection: usize,
    pub screen: Screen,
    pub book: ScoreBook,
    pub theme_index: usize,
    pub message: Option<String>,
    message_timer: u32,
    pub player_name: String,
    /// Name being typed on the completion screen
    pub name_input: String,
    pub leaderboard_difficulty: Difficulty,
    /// Guards against recording the same win twice
    score_recorded: bool,
}

impl App {
    pub fn new(game: Game, book: ScoreBook, player_name: String) -> Self {
        Self {
            game,
            cursor: Position::new(4, 4),
            notes_mode: false,
            menu: MenuState::None,
            menu_selection: 0,
            screen: Screen::Playing,
            book,
            theme_index: 0,
            message: None,
            message_timer: 0,
            player_name,
            name_input: String::new(),
            leaderboard_difficulty: Difficulty::Easy,
            score_recorded: false,
        }
    }

    pub fn theme(&self) -> Theme {
        let themes = Theme::all();
        themes[self.theme_index % themes.len()].clone()
    }

    fn show_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
        self.message_timer = 12; // ticks, roughly three seconds
    }

    /// Advance timers; called at the render tick rate.
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen == Screen::Playing && self.game.is_completed() {
            self.name_input = self.player_name.clone();
            self.screen = Screen::Complete;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            Screen::Playing => self.handle_playing_key(key),
            Screen::Complete => self.handle_complete_key(key),
            Screen::Leaderboard => self.handle_leaderboard_key(key),
            Screen::Stats => self.handle_stats_key(key),
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> AppAction {
        if self.menu != MenuState::None {
            return self.handle_menu_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(c @ '1'..='9') => {
                let digit = c as u8 - b'0';
                if self.game.is_paused() {
                    // Board is hidden while paused; input is ignored
                } else if self.notes_mode {
                    self.game.toggle_note(self.cursor, digit);
                } else if self.game.is_given(self.cursor) {
                    self.show_message("That cell is part of the puzzle");
                } else if !self.game.set_value(self.cursor, digit) && !self.game.is_completed() {
                    self.show_message("Not quite right...");
                }
            }
            KeyCode::Char('0') | KeyCode::Backspace | KeyCode::Delete => {
                self.game.clear_cell(self.cursor);
            }
            KeyCode::Char('n') => {
                self.notes_mode = !self.notes_mode;
                let state = if self.notes_mode { "on" } else { "off" };
                self.show_message(format!("Notes mode {}", state));
            }
            KeyCode::Char('x') => {
                if let Some(pos) = self.game.hint() {
                    self.cursor = pos;
                    self.show_message(format!(
                        "Hint used, {} remaining",
                        self.game.hints_remaining()
                    ));
                } else if !self.game.is_completed() {
                    self.show_message("No hints left");
                }
            }
            KeyCode::Char('c') => {
                if self.game.check_errors() {
                    self.show_message("Mistakes highlighted");
                } else {
                    self.show_message("No mistakes so far");
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => self.game.toggle_pause(),
            KeyCode::Char('t') => {
                self.theme_index = (self.theme_index + 1) % Theme::all().len();
                self.show_message(format!("Theme: {}", self.theme().name));
            }
            KeyCode::Char('g') => {
                self.menu = MenuState::NewGame;
                self.menu_selection = 0;
            }
            KeyCode::Char('b') => {
                self.leaderboard_difficulty = self.game.difficulty();
                self.screen = Screen::Leaderboard;
            }
            KeyCode::Char('s') => self.screen = Screen::Stats,
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        let levels = Difficulty::all_levels();
        match key.code {
            KeyCode::Esc => self.menu = MenuState::None,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selection = self.menu_selection.checked_sub(1).unwrap_or(levels.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selection = (self.menu_selection + 1) % levels.len();
            }
            KeyCode::Enter => {
                let difficulty = levels[self.menu_selection];
                self.start_new_game(difficulty);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_complete_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Enter => {
                if !self.score_recorded {
                    let name = if self.name_input.trim().is_empty() {
                        "Player"
                    } else {
                        self.name_input.trim()
                    };
                    self.player_name = name.to_string();
                    self.book.record_win(
                        name,
                        self.game.difficulty(),
                        self.game.elapsed_ms(),
                        self.game.errors(),
                        self.game.hints_used(),
                    );
                    self.score_recorded = true;
                }
                self.leaderboard_difficulty = self.game.difficulty();
                self.screen = Screen::Leaderboard;
            }
            KeyCode::Esc => {
                // Skip recording, straight to a new game menu
                self.screen = Screen::Playing;
                self.menu = MenuState::NewGame;
                self.menu_selection = 0;
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) if !c.is_control() && self.name_input.len() < 20 => {
                self.name_input.push(c);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_leaderboard_key(&mut self, key: KeyEvent) -> AppAction {
        let levels = Difficulty::all_levels();
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => self.leave_overlay(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                let i = levels
                    .iter()
                    .position(|&d| d == self.leaderboard_difficulty)
                    .unwrap_or(0);
                let next = if key.code == KeyCode::Left {
                    (i + levels.len() - 1) % levels.len()
                } else {
                    (i + 1) % levels.len()
                };
                self.leaderboard_difficulty = levels[next];
            }
            KeyCode::Char('g') => {
                self.screen = Screen::Playing;
                self.menu = MenuState::NewGame;
                self.menu_selection = 0;
            }
            KeyCode::Char('s') => self.screen = Screen::Stats,
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_stats_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => self.leave_overlay(),
            KeyCode::Char('b') => self.screen = Screen::Leaderboard,
            _ => {}
        }
        AppAction::Continue
    }

    /// Esc from an overlay returns to the game, unless the game is already
    /// finished, in which case the overlay is where the player lives now.
    fn leave_overlay(&mut self) {
        if !self.game.is_completed() {
            self.screen = Screen::Playing;
        }
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let row = (self.cursor.row as i32 + drow).rem_euclid(9) as usize;
        let col = (self.cursor.col as i32 + dcol).rem_euclid(9) as usize;
        self.cursor = Position::new(row, col);
    }

    pub fn start_new_game(&mut self, difficulty: Difficulty) {
        self.game = Game::new(difficulty);
        self.cursor = Position::new(4, 4);
        self.notes_mode = false;
        self.menu = MenuState::None;
        self.screen = Screen::Playing;
        self.score_recorded = false;
        self.show_message(format!("New {} game", difficulty));
    }
}
