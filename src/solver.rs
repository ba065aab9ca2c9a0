//! This module contains the logic for solving a single Sudoku grid.
//!
//! Most importantly, this module contains the definition of the [Solver]
//! trait and the [BacktrackingSolver] as a generally usable implementation.

use crate::{Grid, SIZE};
use crate::util::DigitSet;

/// An enumeration of the terminal outcomes of a solving attempt. Note that
/// an unsolvable puzzle is an expected, normal result of search and distinct
/// from the error conditions in the [error](crate::error) module, which
/// indicate malformed input or caller misuse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {

    /// Indicates that a full, valid assignment was found. The grid holds the
    /// solution.
    Solved,

    /// Indicates that the puzzle as given has no solution. The grid is left
    /// exactly as it was before the attempt.
    Unsolvable
}

/// An enumeration of the externally visible states of one solving attempt.
/// The state transitions one way, `NotStarted` to `InProgress` to one of the
/// terminal states, and a terminal state is never left.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolveState {

    /// Indicates that no solving attempt was started yet.
    NotStarted,

    /// Indicates that a solving attempt is currently running.
    InProgress,

    /// Indicates that the attempt terminated with [Outcome::Solved].
    Solved,

    /// Indicates that the attempt terminated with [Outcome::Unsolvable].
    Unsolvable
}

impl SolveState {

    /// Indicates whether this state is terminal, i.e. the attempt has
    /// finished and the state will never change again.
    pub fn is_terminal(self) -> bool {
        match self {
            SolveState::Solved | SolveState::Unsolvable => true,
            _ => false
        }
    }
}

impl From<Outcome> for SolveState {
    fn from(outcome: Outcome) -> SolveState {
        match outcome {
            Outcome::Solved => SolveState::Solved,
            Outcome::Unsolvable => SolveState::Unsolvable
        }
    }
}

/// A trait for structs which have the ability to solve Sudoku grids in
/// place. A solver may only write blank cells; clue cells are protected by
/// the [Grid] contract in addition to the solver's own discipline.
pub trait Solver {

    /// Solves, or attempts to solve, the given grid. On [Outcome::Solved]
    /// the grid is full and valid; on [Outcome::Unsolvable] it is restored
    /// to the exact state it had before the attempt.
    fn solve(&self, grid: &mut Grid) -> Outcome;
}

/// A perfect [Solver] which solves grids by recursively testing all
/// candidate digits for the most constrained blank cell. This means two
/// things:
///
/// * Its worst-case runtime is exponential, i.e. it may be slow if the grid
/// has many missing digits.
/// * It terminates with the correct [Outcome] for every grid.
///
/// In every step, the blank cell with the fewest
/// [candidates](Grid::candidates) is selected, ties broken by the lowest
/// row-major index. This minimum-remaining-values ordering prunes the search
/// tree far more aggressively than naive first-blank selection and also
/// determines which partial states an observer sees.
pub struct BacktrackingSolver;

fn select_cell(grid: &Grid) -> Option<(usize, usize, DigitSet)> {
    let mut best: Option<(usize, usize, DigitSet)> = None;

    for row in 0..SIZE {
        for column in 0..SIZE {
            if grid.get(row, column).unwrap() != 0 {
                continue;
            }

            let candidates = grid.candidates(row, column).unwrap();

            if candidates.is_empty() {
                // dead end
                return Some((row, column, candidates));
            }

            let better = match best {
                Some((_, _, best_candidates)) =>
                    candidates.len() < best_candidates.len(),
                None => true
            };

            if better {
                best = Some((row, column, candidates));
            }
        }
    }

    best
}

fn solve_rec(grid: &mut Grid, observer: &mut impl FnMut(&Grid)) -> Outcome {
    let (row, column, candidates) = match select_cell(grid) {
        Some(selection) => selection,
        None => return Outcome::Solved
    };

    for digit in candidates {
        grid.set(row, column, digit).unwrap();
        observer(grid);

        if let Outcome::Solved = solve_rec(grid, observer) {
            return Outcome::Solved;
        }

        grid.clear(row, column).unwrap();
        observer(grid);
    }

    Outcome::Unsolvable
}

impl BacktrackingSolver {

    /// Solves the given grid like [Solver::solve], additionally invoking the
    /// given observer after every placement and every undo. Since only
    /// legal candidates are ever placed, every observed state is itself
    /// [valid](Grid::is_valid). This is the hook through which a
    /// [PuzzleSet](crate::set::PuzzleSet) worker publishes its progress.
    pub fn solve_observed(&self, grid: &mut Grid,
            mut observer: impl FnMut(&Grid)) -> Outcome {
        solve_rec(grid, &mut observer)
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, grid: &mut Grid) -> Outcome {
        self.solve_observed(grid, |_| { })
    }
}
