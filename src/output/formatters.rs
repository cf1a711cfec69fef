//! Formatting utilities for terminal output

use crate::core::{Board, Bonus, Cell, letter_value};
use colored::{ColoredString, Colorize};

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Two-character plain text for a cell: letter, bonus label, or filler
#[must_use]
pub fn cell_text(cell: &Cell) -> String {
    match (cell.playable, cell.letter) {
        (false, _) => "  ".to_string(),
        (true, Some(letter)) => format!("{} ", letter.to_ascii_uppercase() as char),
        (true, None) => match cell.bonus {
            Bonus::None => "· ".to_string(),
            Bonus::Start => "★ ".to_string(),
            bonus => bonus.label().to_string(),
        },
    }
}

fn paint(cell: &Cell) -> ColoredString {
    let text = cell_text(cell);
    if cell.letter.is_some() {
        return text.black().on_bright_yellow().bold();
    }
    match cell.bonus {
        Bonus::TripleWord => text.white().on_red(),
        Bonus::DoubleWord => text.black().on_bright_magenta(),
        Bonus::TripleLetter => text.white().on_blue(),
        Bonus::DoubleLetter => text.black().on_bright_cyan(),
        Bonus::Start => text.black().on_bright_magenta().bold(),
        Bonus::None if cell.playable => text.bright_black().on_white(),
        Bonus::None => text.normal(),
    }
}

/// Board as colored lines, one per row
#[must_use]
pub fn board_lines(board: &Board) -> Vec<String> {
    board
        .rows()
        .map(|row| row.iter().map(|cell| paint(cell).to_string()).collect())
        .collect()
}

/// Letters with their point values, e.g. `A1 E1 Q10`
#[must_use]
pub fn tiles_with_values(letters: &str) -> String {
    letters
        .bytes()
        .map(|l| format!("{}{}", l.to_ascii_uppercase() as char, letter_value(l)))
        .collect::<Vec<_>>()
        .join(" ")
}
