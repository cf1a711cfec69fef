//! Board grid, cells, and bonus tiers

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `distance` cells along `direction`, `None` if it leaves the grid
    /// on the low side (callers still bound-check the high side)
    #[inline]
    #[must_use]
    pub fn offset(self, direction: Direction, distance: isize) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr * distance)?;
        let col = self.col.checked_add_signed(dc * distance)?;
        Some(Self { row, col })
    }

    /// Manhattan distance
    #[inline]
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Chebyshev (king-move) distance
    #[inline]
    #[must_use]
    pub const fn chebyshev(self, other: Self) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        if dr > dc { dr } else { dc }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Play direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const BOTH: [Self; 2] = [Self::Across, Self::Down];

    /// (row, col) step
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }
}

/// Bonus tag on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    Start,
}

impl Bonus {
    /// Multiplier tiers in placement priority order (highest value first)
    pub const TIERS: [Self; 4] = [
        Self::TripleWord,
        Self::DoubleWord,
        Self::TripleLetter,
        Self::DoubleLetter,
    ];

    #[must_use]
    pub const fn letter_multiplier(self) -> u32 {
        match self {
            Self::DoubleLetter => 2,
            Self::TripleLetter => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub const fn word_multiplier(self) -> u32 {
        match self {
            Self::DoubleWord => 2,
            Self::TripleWord => 3,
            _ => 1,
        }
    }

    /// Template character (`.` plain, `d` DL, `t` TL, `D` DW, `T` TW, `*` start)
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::None => '.',
            Self::DoubleLetter => 'd',
            Self::TripleLetter => 't',
            Self::DoubleWord => 'D',
            Self::TripleWord => 'T',
            Self::Start => '*',
        }
    }

    /// Short label used in rendering
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::DoubleLetter => "DL",
            Self::TripleLetter => "TL",
            Self::DoubleWord => "DW",
            Self::TripleWord => "TW",
            Self::Start => "ST",
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub playable: bool,
    pub bonus: Bonus,
    pub letter: Option<u8>,
    pub locked: bool,
}

impl Cell {
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Playable and holding no letter
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.playable && self.letter.is_none()
    }
}

/// Error building a board from a text template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template must be square and non-empty, got {rows} rows")]
    NotSquare { rows: usize },
    #[error("unknown template character {0:?}")]
    UnknownSymbol(char),
    #[error("template must contain exactly one start cell at the center")]
    StartNotCentered,
}

/// Square board of cells
///
/// Boards are cheap to clone (one `Vec` of small cells), and the solver
/// relies on that: every committed play produces a new board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Fully playable empty board with the start tag at the center
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell {
                    row,
                    col,
                    playable: true,
                    bonus: Bonus::None,
                    letter: None,
                    locked: false,
                });
            }
        }
        let mut board = Self { size, cells };
        let center = board.center();
        board.cell_mut(center).bonus = Bonus::Start;
        board
    }

    /// Build from rows of template characters
    ///
    /// `#` dead, `.` plain, `d` DL, `t` TL, `D` DW, `T` TW, `*` start.
    /// Templates carry no letters; plays lock them in.
    ///
    /// # Errors
    /// Returns `TemplateError` if the rows are not square, contain unknown
    /// characters, or the single start cell is not at the center.
    ///
    /// # Examples
    /// ```
    /// use wordtile::core::{Board, Bonus, Position};
    ///
    /// let board = Board::from_template(&["T.#", ".*.", "#.T"]).unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert_eq!(board.cell(Position::new(0, 0)).bonus, Bonus::TripleWord);
    /// assert!(!board.cell(Position::new(0, 2)).playable);
    /// ```
    pub fn from_template(rows: &[&str]) -> Result<Self, TemplateError> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.chars().count() != size) {
            return Err(TemplateError::NotSquare { rows: size });
        }

        let mut board = Self::new(size);
        board.cell_mut(board.center()).bonus = Bonus::None;
        let mut starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                let cell = board.cell_mut(pos);
                match symbol {
                    '#' => cell.playable = false,
                    '.' => {}
                    'd' => cell.bonus = Bonus::DoubleLetter,
                    't' => cell.bonus = Bonus::TripleLetter,
                    'D' => cell.bonus = Bonus::DoubleWord,
                    'T' => cell.bonus = Bonus::TripleWord,
                    '*' => {
                        cell.bonus = Bonus::Start;
                        starts.push(pos);
                    }
                    other => return Err(TemplateError::UnknownSymbol(other)),
                }
            }
        }

        if starts != [board.center()] {
            return Err(TemplateError::StartNotCentered);
        }
        Ok(board)
    }

    /// Test fixture: a copy with letters locked in along a line
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_letters(mut self, start: Position, direction: Direction, word: &str) -> Self {
        for (i, letter) in word.bytes().enumerate() {
            let pos = start
                .offset(direction, i as isize)
                .expect("fixture word stays on the board");
            let cell = self.cell_mut(pos);
            cell.letter = Some(letter.to_ascii_lowercase());
            cell.locked = true;
        }
        self
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// 180° rotation partner of a position
    #[inline]
    #[must_use]
    pub const fn mirror(&self, pos: Position) -> Position {
        Position::new(self.size - 1 - pos.row, self.size - 1 - pos.col)
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Cell at a position
    ///
    /// # Panics
    /// Panics if the position is outside the board.
    #[inline]
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row * self.size + pos.col]
    }

    #[inline]
    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row * self.size + pos.col]
    }

    /// Cell at a position, `None` when off the board
    #[inline]
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.in_bounds(pos).then(|| self.cell(pos))
    }

    /// Letter at a position, `None` when off the board or empty
    #[inline]
    #[must_use]
    pub fn letter_at(&self, pos: Position) -> Option<u8> {
        self.get(pos).and_then(|c| c.letter)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Row-major cells grouped into rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Orthogonal neighbours that are on the board
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::BOTH
            .into_iter()
            .flat_map(move |d| [pos.offset(d, -1), pos.offset(d, 1)])
            .flatten()
            .filter(|&p| self.in_bounds(p))
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.playable).count()
    }

    /// Check if any letter has been committed yet
    #[must_use]
    pub fn has_locked_letters(&self) -> bool {
        self.cells.iter().any(|c| c.locked)
    }

    /// Count cells carrying a bonus tag
    #[must_use]
    pub fn bonus_count(&self, bonus: Bonus) -> usize {
        self.cells.iter().filter(|c| c.bonus == bonus).count()
    }

    /// Check the 180° symmetry invariant of the playable mask
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.cells
            .iter()
            .all(|c| c.playable == self.cell(self.mirror(c.position())).playable)
    }

    /// Playable cells reachable from the center over orthogonal adjacency
    ///
    /// Returns a row-major mask; an unplayable center reaches nothing.
    #[must_use]
    pub fn flood_fill_from_center(&self) -> Vec<bool> {
        let mut seen = vec![false; self.size * self.size];
        let center = self.center();
        if !self.cell(center).playable {
            return seen;
        }

        let mut queue = VecDeque::from([center]);
        seen[center.row * self.size + center.col] = true;
        while let Some(pos) = queue.pop_front() {
            for next in self.neighbors(pos) {
                let idx = next.row * self.size + next.col;
                if !seen[idx] && self.cell(next).playable {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Number of playable cells reachable from the center
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.flood_fill_from_center().iter().filter(|&&r| r).count()
    }

    /// Text rendering in template characters, letters uppercased
    #[must_use]
    pub fn to_template(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| match (c.playable, c.letter) {
                        (false, _) => '#',
                        (true, Some(l)) => l.to_ascii_uppercase() as char,
                        (true, None) => c.bonus.symbol(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_template() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_has_single_center_start() {
        let board = Board::new(9);
        assert_eq!(board.center(), Position::new(4, 4));
        assert_eq!(board.bonus_count(Bonus::Start), 1);
        assert_eq!(board.cell(board.center()).bonus, Bonus::Start);
        assert_eq!(board.playable_count(), 81);
    }

    #[test]
    fn mirror_is_180_rotation() {
        let board = Board::new(9);
        assert_eq!(board.mirror(Position::new(0, 0)), Position::new(8, 8));
        assert_eq!(board.mirror(Position::new(1, 7)), Position::new(7, 1));
        assert_eq!(board.mirror(board.center()), board.center());
    }

    #[test]
    fn template_round_trips() {
        let rows = ["T.#", ".*.", "#.T"];
        let board = Board::from_template(&rows).unwrap();
        assert_eq!(board.to_template(), rows);
        assert!(board.is_symmetric());
    }

    #[test]
    fn template_rejects_bad_input() {
        assert!(matches!(
            Board::from_template(&["..", "."]),
            Err(TemplateError::NotSquare { .. })
        ));
        assert!(matches!(
            Board::from_template(&["...", ".*.", "..?"]),
            Err(TemplateError::UnknownSymbol('?'))
        ));
        assert!(matches!(
            Board::from_template(&["*..", "...", "..."]),
            Err(TemplateError::StartNotCentered)
        ));
    }

    #[test]
    fn flood_fill_stops_at_dead_cells() {
        // Right column is cut off by a dead column
        let board = Board::from_template(&["..#..", "..#..", "..*..", "..#..", "..#.."]).unwrap();
        // Center itself is playable, so both sides connect through row 2
        assert_eq!(board.reachable_count(), board.playable_count());

        let walled = Board::from_template(&[".#...", ".#...", "##*##", "...#.", "...#."]).unwrap();
        assert!(walled.reachable_count() < walled.playable_count());
    }

    #[test]
    fn neighbors_stay_on_board() {
        let board = Board::new(3);
        let corner: Vec<_> = board.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner.len(), 2);
        let middle: Vec<_> = board.neighbors(Position::new(1, 1)).collect();
        assert_eq!(middle.len(), 4);
    }

    #[test]
    fn with_letters_locks_cells() {
        let board = Board::new(5).with_letters(Position::new(2, 1), Direction::Across, "cat");
        assert_eq!(board.letter_at(Position::new(2, 2)), Some(b'a'));
        assert!(board.cell(Position::new(2, 3)).locked);
        assert!(board.has_locked_letters());
        assert_eq!(board.to_template()[2], ".CAT.");
    }
}
