// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements a concurrent Sudoku solving engine. It holds up to
//! nine independent 9x9 puzzles, arranged as a 3x3 board, and solves them
//! with exhaustive backtracking search. It supports the following key
//! features:
//!
//! * A fixed 9x9 [Grid] data model with immutable clue cells and candidate
//! tracking
//! * Parsing and printing grids
//! * Solving single puzzles using a perfect backtracking algorithm with
//! minimum-remaining-values cell ordering
//! * Solving a whole board of puzzles concurrently, one worker per puzzle,
//! while an external renderer polls consistent snapshots of each puzzle's
//! progress at its own cadence
//!
//! Rendering itself is out of the scope of this crate: a renderer is an
//! external collaborator that reads [Snapshot](set::Snapshot)s and
//! [SolveState](solver::SolveState)s and chooses colors and geometry on its
//! own.
//!
//! # Building grids
//!
//! A [Grid] is constructed from its initial clues. Cells that are filled at
//! construction time become immutable *clue cells*; everything else is blank
//! and may be written during search. Construction fails if two clues conflict
//! within one row, column, or 3x3 box, so an invalid puzzle never enters
//! search.
//!
//! See [Grid::parse] for the exact format of a grid code.
//!
//! ```
//! use sudoku_ninefold::Grid;
//!
//! let grid = Grid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//!
//! assert_eq!(5, grid.get(0, 0).unwrap());
//! assert!(grid.is_clue(0, 0).unwrap());
//! assert!(!grid.is_full());
//! println!("{}", grid);
//! ```
//!
//! Alternatively, [Grid::new] accepts an explicit clue mapping of
//! `(row, column, digit)` entries, which is the form an external grid source
//! (file reader, image recognition, manual entry) would supply.
//!
//! ```
//! use sudoku_ninefold::Grid;
//! use sudoku_ninefold::error::GridError;
//!
//! let grid = Grid::new(&[(0, 0, 5), (0, 1, 3), (4, 4, 7)]).unwrap();
//! assert_eq!(3, grid.get(0, 1).unwrap());
//!
//! // Conflicting clues are rejected before any search can start.
//! let conflicting = Grid::new(&[(0, 0, 5), (0, 1, 5)]);
//! assert_eq!(Err(GridError::InvalidClue), conflicting);
//! ```
//!
//! # Solving a single puzzle
//!
//! The [Solver](solver::Solver) trait describes structs which can solve a
//! grid in place. The provided implementation is
//! [BacktrackingSolver](solver::BacktrackingSolver), which always terminates
//! with [Outcome::Solved](solver::Outcome::Solved) if a solution exists and
//! [Outcome::Unsolvable](solver::Outcome::Unsolvable) otherwise. An
//! unsolvable puzzle is a normal result, not an error, and leaves the grid
//! exactly as it was before the attempt.
//!
//! ```
//! use sudoku_ninefold::Grid;
//! use sudoku_ninefold::solver::{BacktrackingSolver, Outcome, Solver};
//!
//! let mut grid = Grid::parse("\
//!      , , , ,8,1, , , ,\
//!      , ,2, , ,7,8, , ,\
//!      ,5,3, , , ,1,7, ,\
//!     3,7, , , , , , , ,\
//!     6, , , , , , , ,3,\
//!      , , , , , , ,2,4,\
//!      ,6,9, , , ,2,3, ,\
//!      , ,5,9, , ,4, , ,\
//!      , , ,6,5, , , , ").unwrap();
//!
//! assert_eq!(Outcome::Solved, BacktrackingSolver.solve(&mut grid));
//! assert!(grid.is_full());
//! assert!(grid.is_valid());
//!
//! // Clue cells are never touched by the solver.
//! assert_eq!(8, grid.get(0, 4).unwrap());
//! ```
//!
//! # Solving a whole board
//!
//! A [PuzzleSet](set::PuzzleSet) owns up to nine grids, indexed 0 to 8 in
//! row-major order of the 3x3 layout. [solve_all](set::PuzzleSet::solve_all)
//! starts one worker per occupied slot; the workers run independently and
//! publish their progress so that [snapshot](set::PuzzleSet::snapshot) always
//! observes a self-consistent intermediate state, never a torn write.
//!
//! ```
//! use sudoku_ninefold::Grid;
//! use sudoku_ninefold::set::PuzzleSet;
//! use sudoku_ninefold::solver::SolveState;
//!
//! let mut set = PuzzleSet::new();
//! set.put(0, Grid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap()).unwrap();
//!
//! set.solve_all().unwrap();
//! set.wait_all().unwrap();
//!
//! assert_eq!(SolveState::Solved, set.state(0).unwrap());
//! assert!(set.snapshot(0).unwrap().is_full);
//! ```
//!
//! # Note regarding performance
//!
//! Backtracking over nearly empty grids can touch a large search tree. It is
//! strongly recommended to use at least `opt-level = 2`, even in tests, for
//! a substantial performance improvement.

pub mod error;
pub mod set;
pub mod solver;
pub mod util;


use serde::{de, Deserialize, Deserializer, Serialize};

use std::fmt::{self, Display, Formatter};

use crate::error::{GridError, GridParseError, GridParseResult, GridResult};
use crate::util::DigitSet;

/// The width and height of a [Grid] in cells.
pub const SIZE: usize = 9;

/// The width and height of one 3x3 box of a [Grid] in cells.
pub const BLOCK_SIZE: usize = 3;

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * SIZE + column
}

/// A fixed 9x9 Sudoku grid. Cells contain digits from 1 to 9, where 0
/// represents a blank cell. Cells that are filled at construction time are
/// *clue cells* and immutable for the lifetime of the grid; attempting to
/// [set](Grid::set) or [clear](Grid::clear) them yields
/// [GridError::ImmutableCell].
///
/// Cells are stored in row-major order. A grid is *full* if no cell is blank
/// and *valid* if no digit repeats within any row, column, or 3x3 box; a
/// full, valid grid is solved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Grid {
    cells: Vec<u8>,
    clues: Vec<bool>
}

#[derive(Deserialize)]
struct RawGrid {
    cells: Vec<u8>,
    clues: Vec<bool>
}

/// Deserialization routes the raw data through the same checks a grid
/// constructor performs, so a grid that violates the construction
/// invariants (wrong cell count, digits outside `[0, 9]`, blank clue
/// cells, conflicting digits) can never enter search through this path
/// either.
impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Grid, D::Error>
    where
        D: Deserializer<'de>
    {
        let raw = RawGrid::deserialize(deserializer)?;

        if raw.cells.len() != SIZE * SIZE ||
                raw.clues.len() != SIZE * SIZE {
            return Err(de::Error::custom(
                "a grid requires exactly 81 cells and clue flags"));
        }

        if raw.cells.iter().any(|&cell| cell > 9) {
            return Err(de::Error::custom(
                "cell digits must be in the range [0, 9]"));
        }

        if raw.cells.iter().zip(raw.clues.iter())
                .any(|(&cell, &clue)| clue && cell == 0) {
            return Err(de::Error::custom("clue cells must hold a digit"));
        }

        let grid = Grid {
            cells: raw.cells,
            clues: raw.clues
        };

        if !grid.is_valid() {
            return Err(de::Error::custom(
                "grid contains conflicting digits"));
        }

        Ok(grid)
    }
}

fn to_char(cell: u8) -> char {
    if cell == 0 {
        ' '
    }
    else {
        (b'0' + cell) as char
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.cells[index(y, x)]), ' ', '║', true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let top_row = top_row();
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();
        let bottom_row = bottom_row();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row.as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row.as_str())?;
        Ok(())
    }
}

fn to_string(cell: &u8) -> String {
    if *cell == 0 {
        String::from("")
    }
    else {
        cell.to_string()
    }
}

fn check_coordinates(row: usize, column: usize) -> GridResult<()> {
    if row >= SIZE || column >= SIZE {
        Err(GridError::OutOfBounds)
    }
    else {
        Ok(())
    }
}

fn check_digit(digit: u8) -> GridResult<()> {
    if digit == 0 || digit > 9 {
        Err(GridError::InvalidNumber)
    }
    else {
        Ok(())
    }
}

fn no_duplicates(cells: impl Iterator<Item = u8>) -> bool {
    let mut seen = DigitSet::new();

    for digit in cells {
        if digit != 0 && !seen.insert(digit).unwrap() {
            return false;
        }
    }

    true
}

impl Grid {

    /// Creates a new grid in which every cell is blank. Such a grid has no
    /// clue cells, so the solver may write every cell.
    pub fn empty() -> Grid {
        Grid {
            cells: vec![0; SIZE * SIZE],
            clues: vec![false; SIZE * SIZE]
        }
    }

    /// Creates a new grid from the given clue mapping. Each entry has the
    /// form `(row, column, digit)`; all cells not mentioned are blank. The
    /// mentioned cells become clue cells, which are immutable for the
    /// lifetime of the grid. Listing the same cell twice with the same digit
    /// is permitted and has no further effect.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfBounds`: If a row or column is greater than or
    /// equal to 9.
    /// * `GridError::InvalidNumber`: If a digit is 0 or greater than 9.
    /// * `GridError::InvalidClue`: If two clues in the same row, column, or
    /// 3x3 box share a digit, or the same cell is given two different
    /// digits.
    pub fn new(clues: &[(usize, usize, u8)]) -> GridResult<Grid> {
        let mut grid = Grid::empty();

        for &(row, column, digit) in clues {
            check_coordinates(row, column)?;
            check_digit(digit)?;

            let index = index(row, column);

            if grid.cells[index] == digit {
                continue;
            }

            if grid.cells[index] != 0 {
                return Err(GridError::InvalidClue);
            }

            if !grid.candidates(row, column)?.contains(digit) {
                return Err(GridError::InvalidClue);
            }

            grid.cells[index] = digit;
            grid.clues[index] = true;
        }

        Ok(grid)
    }

    /// Parses a code encoding a grid. The code is a comma-separated list of
    /// exactly 81 entries, which are either empty or a digit from 1 to 9.
    /// The entries are assigned left-to-right, top-to-bottom, where each row
    /// is completed before the next one is started. Whitespace in the
    /// entries is ignored to allow for more intuitive formatting. All
    /// non-empty entries become clue cells.
    ///
    /// # Errors
    ///
    /// * `GridParseError::WrongNumberOfCells`: If the code does not contain
    /// exactly 81 entries.
    /// * `GridParseError::NumberFormatError`: If an entry is neither empty
    /// nor a number.
    /// * `GridParseError::InvalidNumber`: If an entry is 0 or greater
    /// than 9.
    /// * `GridParseError::ConflictingClues`: If two entries in the same row,
    /// column, or 3x3 box share a digit.
    pub fn parse(code: &str) -> GridParseResult<Grid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != SIZE * SIZE {
            return Err(GridParseError::WrongNumberOfCells);
        }

        let mut clues = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let digit = entry.parse::<u8>()?;

            if digit == 0 || digit > 9 {
                return Err(GridParseError::InvalidNumber);
            }

            clues.push((i / SIZE, i % SIZE, digit));
        }

        match Grid::new(&clues) {
            Ok(grid) => Ok(grid),
            Err(GridError::InvalidClue) =>
                Err(GridParseError::ConflictingClues),
            Err(_) => unreachable!("parse checked ranges before construction")
        }
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]. That is, a grid that is converted to a string and
    /// parsed again will contain the same digits, as is illustrated below.
    /// Note that all filled cells of the reparsed grid are clue cells,
    /// independent of their status in this grid.
    ///
    /// ```
    /// use sudoku_ninefold::Grid;
    ///
    /// let grid = Grid::new(&[(0, 0, 1), (8, 8, 9)]).unwrap();
    /// let reparsed = Grid::parse(&grid.to_parseable_string()).unwrap();
    /// assert_eq!(grid, reparsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the content of the cell in the given row and column. A result of
    /// 0 indicates that the cell is blank.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to 9. In that case,
    /// `GridError::OutOfBounds` is returned.
    pub fn get(&self, row: usize, column: usize) -> GridResult<u8> {
        check_coordinates(row, column)?;
        Ok(self.cells[index(row, column)])
    }

    /// Sets the content of the cell in the given row and column to the given
    /// digit. If the cell was not blank, the old digit is overwritten. Note
    /// that this method does *not* check that the digit is currently legal
    /// in that cell; that is the placement discipline of the
    /// [Solver](crate::solver::Solver), which only places candidates.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfBounds`: If `row` or `column` is greater than or
    /// equal to 9.
    /// * `GridError::InvalidNumber`: If `digit` is 0 or greater than 9.
    /// * `GridError::ImmutableCell`: If the cell is a clue cell.
    pub fn set(&mut self, row: usize, column: usize, digit: u8)
            -> GridResult<()> {
        check_coordinates(row, column)?;
        check_digit(digit)?;

        let index = index(row, column);

        if self.clues[index] {
            return Err(GridError::ImmutableCell);
        }

        self.cells[index] = digit;
        Ok(())
    }

    /// Clears the content of the cell in the given row and column, i.e.
    /// resets it to blank. If the cell is already blank, it is left that
    /// way.
    ///
    /// # Errors
    ///
    /// * `GridError::OutOfBounds`: If `row` or `column` is greater than or
    /// equal to 9.
    /// * `GridError::ImmutableCell`: If the cell is a clue cell.
    pub fn clear(&mut self, row: usize, column: usize) -> GridResult<()> {
        check_coordinates(row, column)?;

        let index = index(row, column);

        if self.clues[index] {
            return Err(GridError::ImmutableCell);
        }

        self.cells[index] = 0;
        Ok(())
    }

    /// Indicates whether the cell in the given row and column is a clue
    /// cell, i.e. was filled at construction time and is immutable.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to 9. In that case,
    /// `GridError::OutOfBounds` is returned.
    pub fn is_clue(&self, row: usize, column: usize) -> GridResult<bool> {
        check_coordinates(row, column)?;
        Ok(self.clues[index(row, column)])
    }

    /// Computes the set of digits which are not currently present in the
    /// given cell's row, column, or 3x3 box. For a blank cell, these are the
    /// digits that can legally be placed there in the current partial state;
    /// an empty result means the cell is unsolvable in that state.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is greater than or equal to 9. In that case,
    /// `GridError::OutOfBounds` is returned.
    pub fn candidates(&self, row: usize, column: usize)
            -> GridResult<DigitSet> {
        check_coordinates(row, column)?;

        let mut used = DigitSet::new();
        let block_row = row / BLOCK_SIZE * BLOCK_SIZE;
        let block_column = column / BLOCK_SIZE * BLOCK_SIZE;

        for i in 0..SIZE {
            let row_digit = self.cells[index(row, i)];
            let column_digit = self.cells[index(i, column)];
            let block_digit = self.cells[index(
                block_row + i / BLOCK_SIZE, block_column + i % BLOCK_SIZE)];

            for digit in [row_digit, column_digit, block_digit].iter() {
                if *digit != 0 {
                    used.insert(*digit).unwrap();
                }
            }
        }

        Ok(DigitSet::full() - used)
    }

    /// Indicates whether this grid is full, i.e. no cell is blank. A full
    /// grid which is also [valid](Grid::is_valid) is solved.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|&c| c == 0)
    }

    /// Indicates whether this grid is valid, i.e. no digit occurs more than
    /// once in any row, column, or 3x3 box. Blank cells are ignored, so a
    /// partially filled grid can be valid.
    pub fn is_valid(&self) -> bool {
        for i in 0..SIZE {
            let block_row = i / BLOCK_SIZE * BLOCK_SIZE;
            let block_column = i % BLOCK_SIZE * BLOCK_SIZE;

            let row_cells = (0..SIZE).map(|c| self.cells[index(i, c)]);
            let column_cells = (0..SIZE).map(|r| self.cells[index(r, i)]);
            let block_cells = (0..SIZE).map(|j| self.cells[index(
                block_row + j / BLOCK_SIZE, block_column + j % BLOCK_SIZE)]);

            if !no_duplicates(row_cells) || !no_duplicates(column_cells) ||
                    !no_duplicates(block_cells) {
                return false;
            }
        }

        true
    }

    /// Gets a copy of the cells in the given row, ordered by column. This is
    /// the read-only row access a renderer uses; it never exposes a
    /// reference into the live grid.
    ///
    /// # Errors
    ///
    /// If `row` is greater than or equal to 9. In that case,
    /// `GridError::OutOfBounds` is returned.
    pub fn row(&self, row: usize) -> GridResult<[u8; SIZE]> {
        check_coordinates(row, 0)?;

        let mut result = [0; SIZE];

        for column in 0..SIZE {
            result[column] = self.cells[index(row, column)];
        }

        Ok(result)
    }

    /// Counts the number of clue cells in this grid. While on average Sudoku
    /// with fewer clues are harder, this is *not* a reliable measure of
    /// difficulty.
    pub fn count_clues(&self) -> usize {
        self.clues.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_grid_is_blank_and_valid() {
        let grid = Grid::empty();

        assert!(!grid.is_full());
        assert!(grid.is_valid());
        assert_eq!(0, grid.count_clues());
        assert_eq!(0, grid.get(4, 4).unwrap());
    }

    #[test]
    fn new_sets_clues() {
        let grid = Grid::new(&[(0, 0, 5), (3, 7, 2), (8, 8, 9)]).unwrap();

        assert_eq!(5, grid.get(0, 0).unwrap());
        assert_eq!(2, grid.get(3, 7).unwrap());
        assert_eq!(9, grid.get(8, 8).unwrap());
        assert_eq!(0, grid.get(0, 1).unwrap());
        assert!(grid.is_clue(0, 0).unwrap());
        assert!(!grid.is_clue(0, 1).unwrap());
        assert_eq!(3, grid.count_clues());
    }

    #[test]
    fn new_rejects_out_of_bounds() {
        assert_eq!(Err(GridError::OutOfBounds), Grid::new(&[(9, 0, 1)]));
        assert_eq!(Err(GridError::OutOfBounds), Grid::new(&[(0, 9, 1)]));
    }

    #[test]
    fn new_rejects_invalid_digit() {
        assert_eq!(Err(GridError::InvalidNumber), Grid::new(&[(0, 0, 0)]));
        assert_eq!(Err(GridError::InvalidNumber), Grid::new(&[(0, 0, 10)]));
    }

    #[test]
    fn new_rejects_row_conflict() {
        assert_eq!(Err(GridError::InvalidClue),
            Grid::new(&[(0, 0, 5), (0, 1, 5)]));
    }

    #[test]
    fn new_rejects_column_conflict() {
        assert_eq!(Err(GridError::InvalidClue),
            Grid::new(&[(0, 3, 7), (8, 3, 7)]));
    }

    #[test]
    fn new_rejects_block_conflict() {
        // (0, 0) and (2, 2) share the top-left box, but neither a row nor a
        // column.
        assert_eq!(Err(GridError::InvalidClue),
            Grid::new(&[(0, 0, 4), (2, 2, 4)]));
    }

    #[test]
    fn new_rejects_contradicting_cell_entries() {
        assert_eq!(Err(GridError::InvalidClue),
            Grid::new(&[(0, 0, 4), (0, 0, 5)]));
    }

    #[test]
    fn new_accepts_repeated_cell_entry() {
        let grid = Grid::new(&[(0, 0, 4), (0, 0, 4)]).unwrap();

        assert_eq!(4, grid.get(0, 0).unwrap());
        assert_eq!(1, grid.count_clues());
    }

    #[test]
    fn parse_ok() {
        let grid = Grid::parse("\
            1, , , , , , , ,2,\
             , ,3, , , , , , ,\
             , , , , , , , , ,\
             , , , ,4, , , , ,\
             , , , , , , , , ,\
             , , , , , ,5, , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
            6, , , , , , , ,7").unwrap();

        assert_eq!(1, grid.get(0, 0).unwrap());
        assert_eq!(2, grid.get(0, 8).unwrap());
        assert_eq!(3, grid.get(1, 2).unwrap());
        assert_eq!(4, grid.get(3, 4).unwrap());
        assert_eq!(5, grid.get(5, 6).unwrap());
        assert_eq!(6, grid.get(8, 0).unwrap());
        assert_eq!(7, grid.get(8, 8).unwrap());
        assert_eq!(7, grid.count_clues());
        assert!(grid.is_clue(3, 4).unwrap());
    }

    #[test]
    fn parse_wrong_number_of_cells() {
        assert_eq!(Err(GridParseError::WrongNumberOfCells),
            Grid::parse("1,2,3"));
    }

    #[test]
    fn parse_number_format_error() {
        let mut code = "#".to_owned();
        code.push_str(&",".repeat(80));

        assert_eq!(Err(GridParseError::NumberFormatError),
            Grid::parse(&code));
    }

    #[test]
    fn parse_invalid_number() {
        let mut code = "0".to_owned();
        code.push_str(&",".repeat(80));

        assert_eq!(Err(GridParseError::InvalidNumber), Grid::parse(&code));
    }

    #[test]
    fn parse_conflicting_clues() {
        let mut code = "5,5".to_owned();
        code.push_str(&",".repeat(79));

        assert_eq!(Err(GridParseError::ConflictingClues),
            Grid::parse(&code));
    }

    #[test]
    fn to_parseable_string_round_trips() {
        let grid = Grid::new(&[(0, 0, 1), (1, 1, 2), (2, 2, 3)]).unwrap();
        let reparsed = Grid::parse(&grid.to_parseable_string()).unwrap();

        assert_eq!(grid, reparsed);
    }

    #[test]
    fn set_and_clear_blank_cell() {
        let mut grid = Grid::new(&[(0, 0, 1)]).unwrap();

        grid.set(0, 1, 2).unwrap();
        assert_eq!(2, grid.get(0, 1).unwrap());

        grid.clear(0, 1).unwrap();
        assert_eq!(0, grid.get(0, 1).unwrap());
    }

    #[test]
    fn set_rejects_clue_cell() {
        let mut grid = Grid::new(&[(0, 0, 1)]).unwrap();

        assert_eq!(Err(GridError::ImmutableCell), grid.set(0, 0, 2));
        assert_eq!(Err(GridError::ImmutableCell), grid.clear(0, 0));
        assert_eq!(1, grid.get(0, 0).unwrap());
    }

    #[test]
    fn set_rejects_out_of_bounds_and_invalid_digit() {
        let mut grid = Grid::empty();

        assert_eq!(Err(GridError::OutOfBounds), grid.set(9, 0, 1));
        assert_eq!(Err(GridError::InvalidNumber), grid.set(0, 0, 10));
    }

    #[test]
    fn candidates_exclude_row_column_and_block() {
        let grid = Grid::new(&[
            (0, 1, 1),
            (0, 8, 2),
            (5, 0, 3),
            (8, 0, 4),
            (1, 1, 5),
            (2, 2, 6)
        ]).unwrap();

        let candidates: Vec<u8> =
            grid.candidates(0, 0).unwrap().iter().collect();
        assert_eq!(vec![7, 8, 9], candidates);
    }

    #[test]
    fn candidates_single_remaining() {
        // The blank cell (0, 0) sees 1 through 8 in its row, column, and
        // box, leaving exactly 9.
        let grid = Grid::new(&[
            (0, 3, 1),
            (0, 5, 2),
            (3, 0, 3),
            (7, 0, 4),
            (1, 0, 5),
            (1, 1, 6),
            (2, 1, 7),
            (2, 2, 8)
        ]).unwrap();

        let candidates: Vec<u8> =
            grid.candidates(0, 0).unwrap().iter().collect();
        assert_eq!(vec![9], candidates);
    }

    #[test]
    fn candidates_all_for_unconstrained_cell() {
        let grid = Grid::empty();

        assert_eq!(DigitSet::full(), grid.candidates(4, 4).unwrap());
    }

    #[test]
    fn validity_detects_conflict_written_during_search() {
        let mut grid = Grid::new(&[(0, 0, 5)]).unwrap();
        assert!(grid.is_valid());

        // set does not check conflicts, so this creates an invalid state
        grid.set(0, 8, 5).unwrap();
        assert!(!grid.is_valid());

        grid.clear(0, 8).unwrap();
        assert!(grid.is_valid());
    }

    #[test]
    fn row_is_a_copy() {
        let grid = Grid::new(&[(2, 0, 9), (2, 8, 1)]).unwrap();
        let row = grid.row(2).unwrap();

        assert_eq!([9, 0, 0, 0, 0, 0, 0, 0, 1], row);
        assert_eq!(Err(GridError::OutOfBounds), grid.row(9));
    }

    #[test]
    fn display_contains_digits() {
        let grid = Grid::new(&[(0, 0, 5), (8, 8, 3)]).unwrap();
        let rendered = format!("{}", grid);

        assert!(rendered.contains('5'));
        assert!(rendered.contains('3'));
        assert!(rendered.contains('╔'));
    }

    #[test]
    fn serde_round_trip() {
        let grid = Grid::new(&[(0, 0, 5), (4, 4, 7)]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(grid, deserialized);
    }

    #[test]
    fn deserialize_rejects_wrong_cell_count() {
        let result =
            serde_json::from_str::<Grid>("{\"cells\":[5],\"clues\":[true]}");

        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_conflicting_clues() {
        let mut cells = vec![0u8; SIZE * SIZE];
        let mut clues = vec![false; SIZE * SIZE];
        cells[0] = 5;
        clues[0] = true;
        cells[8] = 5;
        clues[8] = true;
        let json = serde_json::json!({
            "cells": cells,
            "clues": clues
        }).to_string();

        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_blank_clue_cell() {
        let cells = vec![0u8; SIZE * SIZE];
        let mut clues = vec![false; SIZE * SIZE];
        clues[40] = true;
        let json = serde_json::json!({
            "cells": cells,
            "clues": clues
        }).to_string();

        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn deserialize_rejects_out_of_range_digit() {
        let mut cells = vec![0u8; SIZE * SIZE];
        let clues = vec![false; SIZE * SIZE];
        cells[13] = 10;
        let json = serde_json::json!({
            "cells": cells,
            "clues": clues
        }).to_string();

        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn deserialize_preserves_clue_mask() {
        let mut grid = Grid::new(&[(0, 0, 5), (4, 4, 7)]).unwrap();
        grid.set(8, 8, 3).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(grid, deserialized);
        assert!(deserialized.is_clue(0, 0).unwrap());
        assert!(!deserialized.is_clue(8, 8).unwrap());
        assert_eq!(3, deserialized.get(8, 8).unwrap());
    }
}
