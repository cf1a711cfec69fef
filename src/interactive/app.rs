//! TUI application state and logic
//!
//! The inspector is read-only: it browses puzzles by seed and steps through
//! the solver's best line on each board.

use crate::config::GeneratorConfig;
use crate::core::{Board, LetterCounts};
use crate::dictionary::WordList;
use crate::generator::{Puzzle, generate_puzzle};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'a> {
    pub dictionary: &'a WordList,
    pub config: &'a GeneratorConfig,
    pub seed_base: String,
    /// 0 is the base seed itself, `n` is `"{base}-{n}"`
    pub seed_index: usize,
    pub puzzle: Puzzle,
    /// Plays of the best line currently shown on the board
    pub step: usize,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(dictionary: &'a WordList, config: &'a GeneratorConfig, seed: &str) -> Self {
        let puzzle = generate_puzzle(seed, config, dictionary);
        let mut app = Self {
            dictionary,
            config,
            seed_base: seed.to_string(),
            seed_index: 0,
            puzzle,
            step: 0,
            messages: Vec::new(),
            should_quit: false,
        };
        app.announce();
        app
    }

    /// Seed phrase of the puzzle on screen
    #[must_use]
    pub fn current_seed(&self) -> String {
        if self.seed_index == 0 {
            self.seed_base.clone()
        } else {
            format!("{}-{}", self.seed_base, self.seed_index)
        }
    }

    pub fn next_puzzle(&mut self) {
        self.seed_index += 1;
        self.regenerate();
    }

    pub fn previous_puzzle(&mut self) {
        if self.seed_index == 0 {
            self.add_message("Already at the first seed", MessageStyle::Error);
            return;
        }
        self.seed_index -= 1;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.puzzle = generate_puzzle(&self.current_seed(), self.config, self.dictionary);
        self.step = 0;
        self.announce();
    }

    fn announce(&mut self) {
        let text = format!(
            "{}: {} board, estimate {}",
            self.puzzle.seed(),
            self.puzzle.archetype(),
            self.puzzle.estimate()
        );
        let style = if self.puzzle.is_fallback() {
            MessageStyle::Error
        } else {
            MessageStyle::Success
        };
        self.add_message(&text, style);
    }

    /// Show one more play of the best line
    pub fn step_forward(&mut self) {
        if self.step < self.puzzle.best_line().len() {
            self.step += 1;
            let play = &self.puzzle.best_line()[self.step - 1];
            let text = format!(
                "Turn {}: {} for {}",
                play.turn,
                play.word.to_uppercase(),
                play.score
            );
            self.add_message(&text, MessageStyle::Info);
        } else {
            self.add_message("End of the solver line", MessageStyle::Error);
        }
    }

    pub fn step_back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn reset_steps(&mut self) {
        self.step = 0;
    }

    /// Board with the first `step` plays locked in
    #[must_use]
    pub fn board_at_step(&self) -> Board {
        self.puzzle.best_line()[..self.step]
            .iter()
            .fold(self.puzzle.board().clone(), |board, play| play.apply_to(&board))
    }

    /// Cumulative score after the shown plays
    #[must_use]
    pub fn score_at_step(&self) -> u32 {
        self.puzzle.best_line()[..self.step].iter().map(|p| p.score).sum()
    }

    /// Letters not yet spent by the shown plays
    #[must_use]
    pub fn rack_at_step(&self) -> LetterCounts {
        let mut rack = *self.puzzle.pool().counts();
        for play in &self.puzzle.best_line()[..self.step] {
            for tile in &play.tiles {
                rack.remove(tile.letter as u8);
            }
        }
        rack
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('n') | KeyCode::Down => app.next_puzzle(),
                KeyCode::Char('p') | KeyCode::Up => app.previous_puzzle(),
                KeyCode::Right | KeyCode::Char(' ') => app.step_forward(),
                KeyCode::Left | KeyCode::Backspace => app.step_back(),
                KeyCode::Char('r') => app.reset_steps(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BeamConfig;

    fn quick_config() -> GeneratorConfig {
        GeneratorConfig {
            beam: BeamConfig::greedy(3),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn seeds_advance_and_rewind() {
        let dict = WordList::embedded();
        let config = quick_config();
        let mut app = App::new(&dict, &config, "tui");
        assert_eq!(app.current_seed(), "tui");

        app.next_puzzle();
        assert_eq!(app.current_seed(), "tui-1");
        assert_eq!(app.puzzle.seed(), "tui-1");

        app.previous_puzzle();
        app.previous_puzzle();
        assert_eq!(app.current_seed(), "tui");
        assert!(matches!(app.messages.last().unwrap().style, MessageStyle::Error));
    }

    #[test]
    fn stepping_replays_the_best_line() {
        let dict = WordList::embedded();
        let config = quick_config();
        let mut app = App::new(&dict, &config, "steps");
        let line_len = app.puzzle.best_line().len();

        assert_eq!(app.score_at_step(), 0);
        assert!(!app.board_at_step().has_locked_letters());

        for _ in 0..line_len + 2 {
            app.step_forward();
        }
        assert_eq!(app.step, line_len);
        assert_eq!(app.score_at_step(), app.puzzle.estimate());
        let spent = app.puzzle.pool().counts().total() - app.rack_at_step().total();
        let placed: usize = app.puzzle.best_line().iter().map(|p| p.tiles.len()).sum();
        assert_eq!(spent, placed);

        app.step_back();
        assert_eq!(app.step, line_len.saturating_sub(1));
        app.reset_steps();
        assert_eq!(app.step, 0);
    }

    #[test]
    fn message_log_is_bounded() {
        let dict = WordList::embedded();
        let config = quick_config();
        let mut app = App::new(&dict, &config, "log");
        for i in 0..10 {
            app.add_message(&format!("m{i}"), MessageStyle::Info);
        }
        assert_eq!(app.messages.len(), 5);
        assert_eq!(app.messages.last().unwrap().text, "m9");
    }
}
