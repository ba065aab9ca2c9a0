//! This module contains the [PuzzleSet], which owns up to nine independently
//! solvable grids arranged as a 3x3 board, coordinates their concurrent
//! solving, and hands out consistent [Snapshot]s to an external renderer.
//!
//! Each occupied slot is solved by its own worker thread, which exclusively
//! owns a private working copy of the grid for the lifetime of the attempt.
//! After every placement and undo, the worker publishes the current state
//! into a per-slot mutex; [PuzzleSet::snapshot] holds that mutex only for
//! the duration of a shallow copy. A snapshot therefore always reflects one
//! self-consistent search state and never a torn write, while the renderer's
//! polling cadence stays fully decoupled from solving progress.

use log::{debug, info};

use serde::{Deserialize, Serialize};

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::{Grid, SIZE};
use crate::error::{SetError, SetResult};
use crate::solver::{BacktrackingSolver, Outcome, SolveState};

/// The number of slots in a [PuzzleSet], i.e. the 3x3 layout positions.
pub const SLOT_COUNT: usize = 9;

/// A consistent, race-free copy of one slot's current state, taken by
/// [PuzzleSet::snapshot] for rendering. It is plain data and remains valid
/// regardless of any further solving progress.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {

    /// The cell digits at the time the snapshot was taken, indexed by row
    /// and then column. 0 represents a blank cell.
    pub rows: [[u8; SIZE]; SIZE],

    /// Indicates whether every cell was filled at the time the snapshot was
    /// taken.
    pub is_full: bool
}

struct SharedSlot {
    grid: Grid,
    state: SolveState
}

struct Slot {
    shared: Arc<Mutex<SharedSlot>>,
    worker: Option<JoinHandle<Outcome>>
}

impl Slot {
    fn new(grid: Grid) -> Slot {
        Slot {
            shared: Arc::new(Mutex::new(SharedSlot {
                grid,
                state: SolveState::NotStarted
            })),
            worker: None
        }
    }
}

fn run_worker(index: usize, shared: Arc<Mutex<SharedSlot>>) -> Outcome {
    let mut working = shared.lock().unwrap().grid.clone();
    let solver = BacktrackingSolver;

    let outcome = solver.solve_observed(&mut working, |grid| {
        shared.lock().unwrap().grid.clone_from(grid);
    });

    // On Unsolvable, backtracking has restored the working grid to the
    // original input, so the published grid is the unsolved puzzle.
    let mut locked = shared.lock().unwrap();
    locked.grid.clone_from(&working);
    locked.state = SolveState::from(outcome);
    info!("slot {} terminated with {:?}", index, outcome);

    outcome
}

/// A fixed-capacity collection of at most nine optional [Grid]s, indexed 0
/// to 8 corresponding to a position in a 3x3 layout (row-major). Solving is
/// requested per slot or for all occupied slots at once; each attempt runs
/// in its own worker thread to its terminal state, so one puzzle's search
/// never blocks another's, nor the observation of any slot's progress.
///
/// A slot that failed to solve keeps holding the original unsolved grid, so
/// "proven unsolvable" remains visible to the renderer alongside the
/// [SolveState] reported by [PuzzleSet::state].
pub struct PuzzleSet {
    slots: Vec<Option<Slot>>
}

fn check_index(index: usize) -> SetResult<()> {
    if index >= SLOT_COUNT {
        Err(SetError::IndexOutOfRange)
    }
    else {
        Ok(())
    }
}

impl PuzzleSet {

    /// Creates a new puzzle set in which every slot is empty.
    pub fn new() -> PuzzleSet {
        PuzzleSet {
            slots: (0..SLOT_COUNT).map(|_| None).collect()
        }
    }

    /// Assigns the given grid to the slot with the given index, overwriting
    /// any previous occupant. A worker still running on a replaced slot
    /// finishes against its detached state and is never observed again. The
    /// new occupant starts in [SolveState::NotStarted].
    ///
    /// # Errors
    ///
    /// If `index` is greater than or equal to [SLOT_COUNT]. In that case,
    /// `SetError::IndexOutOfRange` is returned.
    pub fn put(&mut self, index: usize, grid: Grid) -> SetResult<()> {
        check_index(index)?;
        self.slots[index] = Some(Slot::new(grid));
        Ok(())
    }

    /// Indicates whether the slot with the given index is occupied.
    ///
    /// # Errors
    ///
    /// If `index` is greater than or equal to [SLOT_COUNT]. In that case,
    /// `SetError::IndexOutOfRange` is returned.
    pub fn is_occupied(&self, index: usize) -> SetResult<bool> {
        check_index(index)?;
        Ok(self.slots[index].is_some())
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indicates whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a solving attempt for the grid in the slot with the given
    /// index in its own worker thread and returns immediately. The attempt
    /// runs to its terminal state without pausing; its progress can be
    /// observed through [PuzzleSet::snapshot] and [PuzzleSet::state], and
    /// its terminal outcome awaited with [PuzzleSet::wait].
    ///
    /// Since the state machine of an attempt is one-way, calling this method
    /// again once an attempt has started has no effect.
    ///
    /// # Errors
    ///
    /// * `SetError::IndexOutOfRange`: If `index` is greater than or equal to
    /// [SLOT_COUNT].
    /// * `SetError::NoPuzzle`: If the slot is empty.
    pub fn solve(&mut self, index: usize) -> SetResult<()> {
        check_index(index)?;

        let slot = self.slots[index].as_mut().ok_or(SetError::NoPuzzle)?;

        {
            let mut locked = slot.shared.lock().unwrap();

            if locked.state != SolveState::NotStarted {
                return Ok(());
            }

            locked.state = SolveState::InProgress;
        }

        debug!("starting solver worker for slot {}", index);

        let shared = Arc::clone(&slot.shared);
        slot.worker = Some(thread::spawn(move || run_worker(index, shared)));

        Ok(())
    }

    /// Starts a solving attempt for every occupied slot, as if by calling
    /// [PuzzleSet::solve] for each. The attempts run independently and
    /// concurrently; no slot's search is blocked by any other's. Empty slots
    /// are skipped.
    pub fn solve_all(&mut self) -> SetResult<()> {
        for index in 0..SLOT_COUNT {
            if self.slots[index].is_some() {
                self.solve(index)?;
            }
        }

        Ok(())
    }

    /// Takes a consistent snapshot of the current state of the slot with the
    /// given index. The per-slot lock is held only for the duration of the
    /// copy, so this never observes a grid in the middle of a placement and
    /// never blocks a solver for longer than one publication step.
    ///
    /// # Errors
    ///
    /// * `SetError::IndexOutOfRange`: If `index` is greater than or equal to
    /// [SLOT_COUNT].
    /// * `SetError::NoPuzzle`: If the slot is empty.
    pub fn snapshot(&self, index: usize) -> SetResult<Snapshot> {
        check_index(index)?;

        let slot = self.slots[index].as_ref().ok_or(SetError::NoPuzzle)?;
        let locked = slot.shared.lock().unwrap();
        let mut rows = [[0; SIZE]; SIZE];

        for (row, target) in rows.iter_mut().enumerate() {
            *target = locked.grid.row(row).unwrap();
        }

        Ok(Snapshot {
            rows,
            is_full: locked.grid.is_full()
        })
    }

    /// Gets the current [SolveState] of the slot with the given index. This
    /// is how a renderer distinguishes "still solving", "solved", and
    /// "proven unsolvable".
    ///
    /// # Errors
    ///
    /// * `SetError::IndexOutOfRange`: If `index` is greater than or equal to
    /// [SLOT_COUNT].
    /// * `SetError::NoPuzzle`: If the slot is empty.
    pub fn state(&self, index: usize) -> SetResult<SolveState> {
        check_index(index)?;

        let slot = self.slots[index].as_ref().ok_or(SetError::NoPuzzle)?;
        let locked = slot.shared.lock().unwrap();

        Ok(locked.state)
    }

    /// Blocks until the solving attempt of the slot with the given index has
    /// reached its terminal state, then returns that state. If no attempt
    /// was started, the current state ([SolveState::NotStarted]) is returned
    /// without blocking.
    ///
    /// # Errors
    ///
    /// * `SetError::IndexOutOfRange`: If `index` is greater than or equal to
    /// [SLOT_COUNT].
    /// * `SetError::NoPuzzle`: If the slot is empty.
    pub fn wait(&mut self, index: usize) -> SetResult<SolveState> {
        check_index(index)?;

        let slot = self.slots[index].as_mut().ok_or(SetError::NoPuzzle)?;

        if let Some(worker) = slot.worker.take() {
            worker.join().expect("solver worker panicked");
        }

        let locked = slot.shared.lock().unwrap();
        Ok(locked.state)
    }

    /// Blocks until every started solving attempt has reached its terminal
    /// state.
    pub fn wait_all(&mut self) -> SetResult<()> {
        for index in 0..SLOT_COUNT {
            if self.slots[index].is_some() {
                self.wait(index)?;
            }
        }

        Ok(())
    }
}

impl Default for PuzzleSet {
    fn default() -> PuzzleSet {
        PuzzleSet::new()
    }
}
