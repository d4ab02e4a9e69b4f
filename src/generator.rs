//! Maze generation and false-path injection.
//!
//! This module carves perfect mazes with a randomized depth-first traversal and can afterwards
//! open extra walls to introduce cycles. Every random choice is drawn from a caller-supplied
//! [`Rng`], so a seeded source reproduces the same maze.

use color_eyre::eyre::{ensure, Result};
use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::grid::{Cell, Grid};

/// Cell from which every maze is carved.
pub const ROOT: Cell = Cell::new(1, 1);

/// Steps between lattice cells, leaving one wall cell in between.
const LATTICE_STEPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Output of the maze generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// Generated perfect maze.
    pub grid: Grid,
    /// Every cell opened by the carver, in the order it was opened, starting with [`ROOT`].
    pub carved: Vec<Cell>,
}

/// Generates a perfect maze of the given odd side length.
///
/// The carver keeps an explicit stack of lattice cells. For the cell on top of the stack it
/// shuffles the four directions and takes the first one leading to an unvisited interior lattice
/// cell two steps away, opening that cell and the wall between them before pushing it. When no
/// such direction exists the cell is popped. The result is a spanning tree over the lattice
/// rooted at [`ROOT`].
///
/// # Errors
///
/// This function returns an error if `size` is not an acceptable grid side length, see
/// [`Grid::new`].
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Generation> {
    let mut grid = Grid::new(size)?;
    let mut carved = vec![ROOT];
    let _ = grid.open(ROOT);

    let mut stack = vec![ROOT];
    let mut directions = LATTICE_STEPS;

    while let Some(&current) = stack.last() {
        directions.shuffle(rng);

        let step = directions.iter().find_map(|&(d_row, d_col)| {
            let next = current.offset(d_row, d_col)?;
            let wall = current.offset(d_row / 2, d_col / 2)?;
            (grid.contains(next) && !grid.is_border(next) && !grid.is_open(next))
                .then_some((wall, next))
        });

        if let Some((wall, next)) = step {
            let _ = grid.open(wall);
            let _ = grid.open(next);
            carved.push(wall);
            carved.push(next);
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    debug!(size, opened = carved.len(), "carved perfect maze");

    Ok(Generation { grid, carved })
}

/// Opens extra walls between pairs of open cells to create false paths.
///
/// Interior wall cells are visited in row-major order. A wall on an odd row and even column is a
/// candidate when its left and right neighbors are open; a wall on an even row and odd column is
/// a candidate when the cells above and below are open. Each candidate is opened independently
/// with the given probability. Walls opened during the pass are not reconsidered and no open
/// cell is ever closed. Returns the opened cells in order.
///
/// # Errors
///
/// This function returns an error if `probability` is not within `[0, 1]`.
pub fn add_false_paths<R: Rng + ?Sized>(
    grid: &mut Grid,
    probability: f64,
    rng: &mut R,
) -> Result<Vec<Cell>> {
    ensure!(
        (0.0..=1.0).contains(&probability),
        "false path probability must be within [0, 1], got {probability}"
    );

    let size = grid.size();
    let mut opened = Vec::new();

    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let cell = Cell::new(row, col);
            if grid.is_open(cell) || !separates_passages(grid, cell) {
                continue;
            }

            if rng.gen_bool(probability) {
                let _ = grid.open(cell);
                opened.push(cell);
            }
        }
    }

    debug!(probability, opened = opened.len(), "added false paths");

    Ok(opened)
}

/// Checks whether a wall cell sits between two open cells along the lattice.
fn separates_passages(grid: &Grid, cell: Cell) -> bool {
    let (pair_a, pair_b) = match (cell.row % 2, cell.col % 2) {
        (1, 0) => (cell.offset(0, -1), cell.offset(0, 1)),
        (0, 1) => (cell.offset(-1, 0), cell.offset(1, 0)),
        _ => return false,
    };

    pair_a.is_some_and(|side| grid.is_open(side)) && pair_b.is_some_and(|side| grid.is_open(side))
}
