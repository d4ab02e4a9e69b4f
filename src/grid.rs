//! Maze grid data and cell coordinates.
//!
//! This module contains the [`Grid`] struct and the [`Cell`] coordinate type shared by the
//! generator and the solvers, together with neighbor enumeration and a plain-text rendering of
//! the maze.

use std::{collections::HashSet, fmt};

use color_eyre::eyre::{ensure, Result};

/// Smallest side length a maze can be built with.
pub const MIN_SIZE: usize = 5;

/// Largest side length a maze can be built with.
///
/// Route sampling enumerates simple paths, whose count explodes on larger looped mazes, and the
/// terminal interface lays the maze out one cell per terminal column.
pub const MAX_SIZE: usize = 21;

/// Unit steps to the four grid neighbors, in the fixed order the solvers explore them.
///
/// The order is down, up, right, left.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Ordered sequence of cells, each adjacent to its predecessor.
pub type Path = Vec<Cell>;

/// Coordinate of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Cell {
    /// Builds a cell from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell displaced by `(d_row, d_col)`, or `None` if that would underflow.
    #[must_use]
    pub const fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(d_col) else {
            return None;
        };

        Some(Self { row, col })
    }

    /// Checks whether two cells differ by one in exactly one axis.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Square maze grid of open and wall cells.
///
/// This structure stores the maze as an explicit boolean grid in row-major order, where `true`
/// marks an open passage and `false` a wall. A fresh grid is all walls; the generator opens
/// cells and no operation in this crate ever opens a border cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Side length of the grid.
    size: usize,
    /// Open flags in row-major order.
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid of the given side length where every cell is a wall.
    ///
    /// # Errors
    ///
    /// This function returns an error if `size` is even or outside
    /// [`MIN_SIZE`]`..=`[`MAX_SIZE`], since the carving lattice needs an odd side length to leave
    /// a wall border on all four sides.
    pub fn new(size: usize) -> Result<Self> {
        ensure!(size % 2 == 1, "maze size must be odd, got {size}");
        ensure!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "maze size must be between {MIN_SIZE} and {MAX_SIZE}, got {size}"
        );

        Ok(Self {
            size,
            cells: vec![false; size * size],
        })
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Checks whether a cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Checks whether a cell lies on the outer border of the grid.
    #[must_use]
    pub const fn is_border(&self, cell: Cell) -> bool {
        cell.row == 0 || cell.col == 0 || cell.row == self.size - 1 || cell.col == self.size - 1
    }

    /// Checks whether a cell is an open passage. Cells outside the grid count as walls.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell)
            .and_then(|idx| self.cells.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Marks a cell as an open passage.
    ///
    /// Returns `true` if the cell was a wall before the call. Cells outside the grid are ignored
    /// and reported as unchanged.
    pub fn open(&mut self, cell: Cell) -> bool {
        match self.index(cell).and_then(|idx| self.cells.get_mut(idx)) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    /// Returns the in-bounds neighbors of a cell, in [`DIRECTIONS`] order, regardless of state.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(d_row, d_col)| cell.offset(d_row, d_col))
            .filter(move |next| self.contains(*next))
    }

    /// Returns the open neighbors of a cell, in [`DIRECTIONS`] order.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.neighbors(cell).filter(move |next| self.is_open(*next))
    }

    /// Returns every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Cell::new(row, col)))
    }

    /// Returns every open cell of the grid in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |cell| self.is_open(*cell))
    }

    /// Returns every wall cell of the grid in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |cell| !self.is_open(*cell))
    }

    /// Counts the unordered pairs of adjacent open cells.
    ///
    /// For a perfect maze this equals the number of open cells minus one.
    #[must_use]
    pub fn open_adjacencies(&self) -> usize {
        self.open_cells()
            .map(|cell| {
                [Cell::offset(cell, 1, 0), Cell::offset(cell, 0, 1)]
                    .into_iter()
                    .flatten()
                    .filter(|next| self.is_open(*next))
                    .count()
            })
            .sum()
    }

    /// Renders the maze as text with the given cells highlighted.
    ///
    /// Walls are drawn as `#`, passages as a space and highlighted cells as `*`. Rows are
    /// separated by newlines without a trailing one.
    #[must_use]
    pub fn render(&self, highlight: &[Cell]) -> String {
        let highlight: HashSet<Cell> = highlight.iter().copied().collect();

        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| {
                        let cell = Cell::new(row, col);
                        if highlight.contains(&cell) {
                            '*'
                        } else if self.is_open(cell) {
                            ' '
                        } else {
                            '#'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Maps a cell to its row-major index.
    const fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row * self.size + cell.col)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_all_walls() {
        let grid = Grid::new(5).expect("failed to create grid");

        assert_eq!(grid.size(), 5);
        assert_eq!(grid.open_cells().count(), 0);
        assert_eq!(grid.walls().count(), 25);
    }

    #[test]
    fn test_grid_new_rejects_even_size() {
        assert!(Grid::new(6).is_err());
    }

    #[test]
    fn test_grid_new_rejects_small_size() {
        assert!(Grid::new(3).is_err());
        assert!(Grid::new(1).is_err());
    }

    #[test]
    fn test_grid_new_rejects_large_size() {
        assert!(Grid::new(MAX_SIZE + 2).is_err());
        assert!(Grid::new(MAX_SIZE).is_ok());
    }

    #[test]
    fn test_open_reports_change() {
        let mut grid = Grid::new(5).expect("failed to create grid");
        let cell = Cell::new(1, 1);

        assert!(grid.open(cell));
        assert!(!grid.open(cell));
        assert!(grid.is_open(cell));
        assert!(!grid.open(Cell::new(9, 9)));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let grid = Grid::new(5).expect("failed to create grid");

        assert!(!grid.is_open(Cell::new(5, 0)));
        assert!(!grid.contains(Cell::new(0, 5)));
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(5).expect("failed to create grid");

        let inner: Vec<Cell> = grid.neighbors(Cell::new(2, 2)).collect();
        assert_eq!(
            inner,
            vec![
                Cell::new(3, 2),
                Cell::new(1, 2),
                Cell::new(2, 3),
                Cell::new(2, 1)
            ]
        );

        let corner: Vec<Cell> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_open_neighbors_skip_walls() {
        let mut grid = Grid::new(5).expect("failed to create grid");
        let _ = grid.open(Cell::new(1, 1));
        let _ = grid.open(Cell::new(1, 2));

        let open: Vec<Cell> = grid.open_neighbors(Cell::new(1, 1)).collect();
        assert_eq!(open, vec![Cell::new(1, 2)]);
    }

    #[test]
    fn test_is_border() {
        let grid = Grid::new(5).expect("failed to create grid");

        assert!(grid.is_border(Cell::new(0, 2)));
        assert!(grid.is_border(Cell::new(4, 4)));
        assert!(!grid.is_border(Cell::new(2, 2)));
    }

    #[test]
    fn test_cell_adjacency() {
        let cell = Cell::new(2, 2);

        assert!(cell.is_adjacent(Cell::new(2, 3)));
        assert!(cell.is_adjacent(Cell::new(1, 2)));
        assert!(!cell.is_adjacent(Cell::new(3, 3)));
        assert!(!cell.is_adjacent(cell));
    }

    #[test]
    fn test_cell_offset_underflow() {
        assert_eq!(Cell::new(0, 0).offset(-1, 0), None);
        assert_eq!(Cell::new(0, 0).offset(0, 1), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_open_adjacencies() {
        let mut grid = Grid::new(5).expect("failed to create grid");
        for cell in [Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3), Cell::new(2, 3)] {
            let _ = grid.open(cell);
        }

        assert_eq!(grid.open_adjacencies(), 3);
    }

    #[test]
    fn test_render_with_highlight() {
        let mut grid = Grid::new(5).expect("failed to create grid");
        let _ = grid.open(Cell::new(1, 1));
        let _ = grid.open(Cell::new(1, 2));

        let text = grid.render(&[Cell::new(1, 2)]);

        assert_eq!(text, "#####\n# *##\n#####\n#####\n#####");
        assert_eq!(grid.to_string().lines().nth(1), Some("#  ##"));
    }
}
