//! This module contains some error and result definitions used in this crate.

use std::num::ParseIntError;

/// Errors that can occur when constructing or manipulating a
/// [Grid](../struct.Grid.html). Note that an unsolvable puzzle is *not* an
/// error, see [Outcome](../solver/enum.Outcome.html) for that.
#[derive(Debug, Eq, PartialEq)]
pub enum GridError {

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the 9x9 grid. This is the case if either of them is greater than or
    /// equal to 9.
    OutOfBounds,

    /// Indicates that some digit is invalid for a Sudoku grid. This is the
    /// case if it is less than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that the initial clues given to a grid constructor conflict
    /// with each other, that is, two clues in the same row, column, or 3x3
    /// box share a digit, or the same cell was given two different digits. A
    /// grid with such clues never enters search.
    InvalidClue,

    /// Indicates that it was attempted to write or clear a clue cell, i.e. a
    /// cell that was filled at construction time. Clue cells are immutable
    /// for the lifetime of the grid.
    ImmutableCell
}

/// Syntactic sugar for `Result<V, GridError>`.
pub type GridResult<V> = Result<V, GridError>;

/// An enumeration of the errors that may occur when parsing a `Grid`.
#[derive(Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal 81.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid digit (0 or more than
    /// 9).
    InvalidNumber,

    /// Indicates that two of the given clues conflict with each other, i.e.
    /// share a digit within one row, column, or 3x3 box.
    ConflictingClues
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;

impl From<ParseIntError> for GridParseError {
    fn from(_: ParseIntError) -> Self {
        GridParseError::NumberFormatError
    }
}

/// Errors that can occur when addressing slots of a
/// [PuzzleSet](../set/struct.PuzzleSet.html). These indicate misuse by the
/// orchestrating caller and never affect other slots.
#[derive(Debug, Eq, PartialEq)]
pub enum SetError {

    /// Indicates that a slot index outside the range `[0, 8]` was used.
    IndexOutOfRange,

    /// Indicates that an operation requiring an occupied slot was performed
    /// on an empty one.
    NoPuzzle
}

/// Syntactic sugar for `Result<V, SetError>`.
pub type SetResult<V> = Result<V, SetError>;
