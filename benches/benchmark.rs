use criterion::{criterion_group, criterion_main, Criterion};

use sudoku_ninefold::Grid;
use sudoku_ninefold::set::PuzzleSet;
use sudoku_ninefold::solver::{BacktrackingSolver, Outcome, Solver};

use std::time::Duration;

const MEASUREMENT_TIME_SECS: u64 = 10;

// Explanation of benchmark classes:
//
// single solve: One backtracking run over a classic puzzle with 30 clues.
// sparse solve: One backtracking run over a puzzle with only 2 clues, which
//               exercises deep search trees.
// board solve:  Nine concurrent workers over nine derived puzzles, i.e. the
//               full PuzzleSet orchestration including snapshot publication.

const PUZZLE: &str = "\
     , , , ,8,1, , , ,\
     , ,2, , ,7,8, , ,\
     ,5,3, , , ,1,7, ,\
    3,7, , , , , , , ,\
    6, , , , , , , ,3,\
     , , , , , , ,2,4,\
     ,6,9, , , ,2,3, ,\
     , ,5,9, , ,4, , ,\
     , , ,6,5, , , , ";

const SOLVED: &str = "\
    5,3,4,6,7,8,9,1,2,\
    6,7,2,1,9,5,3,4,8,\
    1,9,8,3,4,2,5,6,7,\
    8,5,9,7,6,1,4,2,3,\
    4,2,6,8,5,3,7,9,1,\
    7,1,3,9,2,4,8,5,6,\
    9,6,1,5,3,7,2,8,4,\
    2,8,7,4,1,9,6,3,5,\
    3,4,5,2,8,6,1,7,9";

fn derived_puzzle(remainder: usize) -> Grid {
    let solution = Grid::parse(SOLVED).unwrap();
    let mut clues = Vec::new();

    for row in 0..9 {
        for column in 0..9 {
            if (row * 9 + column) % 9 != remainder {
                clues.push((row, column, solution.get(row, column).unwrap()));
            }
        }
    }

    Grid::new(&clues).unwrap()
}

fn solve_one(puzzle: &Grid) {
    let mut grid = puzzle.clone();
    assert_eq!(Outcome::Solved, BacktrackingSolver.solve(&mut grid));
}

fn solve_board(puzzles: &[Grid]) {
    let mut set = PuzzleSet::new();

    for (index, puzzle) in puzzles.iter().enumerate() {
        set.put(index, puzzle.clone()).unwrap();
    }

    set.solve_all().unwrap();
    set.wait_all().unwrap();
}

fn benchmark_single_solve(c: &mut Criterion) {
    let puzzle = Grid::parse(PUZZLE).unwrap();
    let mut group = c.benchmark_group("single solve");
    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.bench_function("classic puzzle", |b| b.iter(|| solve_one(&puzzle)));
    group.finish();
}

fn benchmark_sparse_solve(c: &mut Criterion) {
    let puzzle = Grid::new(&[(0, 0, 5), (4, 4, 7)]).unwrap();
    let mut group = c.benchmark_group("sparse solve");
    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.bench_function("2 clues", |b| b.iter(|| solve_one(&puzzle)));
    group.finish();
}

fn benchmark_board_solve(c: &mut Criterion) {
    let puzzles: Vec<Grid> = (0..9).map(derived_puzzle).collect();
    let mut group = c.benchmark_group("board solve");
    group.measurement_time(Duration::from_secs(MEASUREMENT_TIME_SECS));
    group.bench_function("9 concurrent workers",
        |b| b.iter(|| solve_board(&puzzles)));
    group.finish();
}

criterion_group!(benches,
    benchmark_single_solve,
    benchmark_sparse_solve,
    benchmark_board_solve);
criterion_main!(benches);
