//! Maze solving algorithms.
//!
//! This module contains the depth-first "classical" solver, which also reports the order in which
//! it discovered cells, the breadth-first shortest-path solver, and the bounded multi-path
//! sampler that stands in for exploring many routes at once.

use std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use crate::grid::{Cell, Grid, Path};

/// Search steps [`sample_paths`] may take before it settles for the routes found so far.
///
/// The number of simple routes grows exponentially with the loops false paths add, so the
/// enumeration is capped rather than left to run to completion.
pub const SAMPLE_STEP_BUDGET: usize = 1_000_000;

/// Output of the depth-first solver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exploration {
    /// Cells in the order they were first discovered, starting with the start cell.
    pub order: Vec<Cell>,
    /// Reconstructed route from start to end, or empty if the end was never reached.
    pub path: Path,
}

/// Solves the maze with a depth-first search.
///
/// The search keeps an explicit stack and a map from every discovered cell to the cell it was
/// discovered from. Popped cells push each open neighbor that has not been discovered yet, in the
/// fixed [`DIRECTIONS`](crate::grid::DIRECTIONS) order. The search stops once the end cell is
/// popped or the stack runs dry. Like [`shortest_path`], it returns an empty exploration when
/// either endpoint is a wall.
pub fn explore(grid: &Grid, start: Cell, end: Cell) -> Exploration {
    if !grid.is_open(start) || !grid.is_open(end) {
        warn!(%start, %end, "depth-first search endpoint is a wall");
        return Exploration::default();
    }

    let mut stack = vec![start];
    let mut came_from: HashMap<Cell, Option<Cell>> = HashMap::from([(start, None)]);
    let mut order = vec![start];
    let mut found = false;

    while let Some(current) = stack.pop() {
        if current == end {
            found = true;
            break;
        }

        for next in grid.open_neighbors(current) {
            if let Entry::Vacant(entry) = came_from.entry(next) {
                let _ = entry.insert(Some(current));
                stack.push(next);
                order.push(next);
            }
        }
    }

    let path = if found {
        reconstruct(&came_from, end)
    } else {
        warn!(%start, %end, "depth-first search found no route");
        Vec::new()
    };

    debug!(discovered = order.len(), length = path.len(), "depth-first search finished");

    Exploration { order, path }
}

/// Finds the shortest route between two cells with a breadth-first search.
///
/// Cells leave the queue in non-decreasing distance from the start, so the first time the end
/// cell is dequeued its parent chain is a shortest route. Returns an empty path when the end is
/// unreachable or when either endpoint is a wall.
pub fn shortest_path(grid: &Grid, start: Cell, end: Cell) -> Path {
    if !grid.is_open(start) || !grid.is_open(end) {
        warn!(%start, %end, "breadth-first search endpoint is a wall");
        return Vec::new();
    }

    let mut queue = VecDeque::from([start]);
    let mut parents: HashMap<Cell, Option<Cell>> = HashMap::from([(start, None)]);

    while let Some(current) = queue.pop_front() {
        if current == end {
            let path = reconstruct(&parents, end);
            debug!(length = path.len(), "breadth-first search finished");
            return path;
        }

        for next in grid.open_neighbors(current) {
            if let Entry::Vacant(entry) = parents.entry(next) {
                let _ = entry.insert(Some(current));
                queue.push_back(next);
            }
        }
    }

    warn!(%start, %end, "breadth-first search found no route");
    Vec::new()
}

/// Collects up to `max_paths` distinct simple routes from start to end.
///
/// This is an exhaustive depth-first enumeration with explicit backtracking: a cell joins the
/// visited set when the search descends into it and leaves it on the way back, so later branches
/// may reuse it. Enumeration stops as soon as `max_paths` routes are found, so the result is the
/// first routes in search order rather than the shortest or the most varied ones.
///
/// The search gives up after [`SAMPLE_STEP_BUDGET`] steps and returns whatever it found by then.
pub fn sample_paths(grid: &Grid, start: Cell, end: Cell, max_paths: usize) -> Vec<Path> {
    sample_paths_within(grid, start, end, max_paths, SAMPLE_STEP_BUDGET)
}

/// Runs the route enumeration of [`sample_paths`] for at most `budget` search steps.
fn sample_paths_within(
    grid: &Grid,
    start: Cell,
    end: Cell,
    max_paths: usize,
    budget: usize,
) -> Vec<Path> {
    let mut solutions = Vec::new();
    if max_paths == 0 || !grid.is_open(start) {
        return solutions;
    }

    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    // Each frame holds how many directions of the matching path cell were already tried.
    let mut frames = vec![0_usize];
    let mut steps = 0_usize;

    while let Some(tried) = frames.last_mut() {
        if steps >= budget {
            warn!(
                budget,
                found = solutions.len(),
                "route sampling ran out of search steps"
            );
            break;
        }
        steps += 1;

        let Some(&current) = path.last() else {
            break;
        };

        if current == end {
            solutions.push(path.clone());
            if solutions.len() >= max_paths {
                break;
            }
            backtrack(&mut frames, &mut path, &mut visited);
            continue;
        }

        let Some(next) = grid.neighbors(current).nth(*tried) else {
            backtrack(&mut frames, &mut path, &mut visited);
            continue;
        };
        *tried += 1;

        if grid.is_open(next) && visited.insert(next) {
            path.push(next);
            frames.push(0);
        }
    }

    debug!(requested = max_paths, found = solutions.len(), "sampled routes");

    solutions
}

/// Pops the innermost search frame together with its cell.
fn backtrack(frames: &mut Vec<usize>, path: &mut Path, visited: &mut HashSet<Cell>) {
    let _ = frames.pop();
    if let Some(cell) = path.pop() {
        let _ = visited.remove(&cell);
    }
}

/// Walks a predecessor map back from `end` and returns the route in start-to-end order.
fn reconstruct(came_from: &HashMap<Cell, Option<Cell>>, end: Cell) -> Path {
    let mut path = Vec::new();
    let mut current = Some(end);

    while let Some(cell) = current {
        path.push(cell);
        current = came_from.get(&cell).copied().flatten();
    }

    path.reverse();
    path
}
