//! Grid model module.
//!
//! This module contains the [`Grid`] struct, the open/wall cell store every other component works
//! against, along with its textual layout format.

use std::{fmt, str::FromStr};

use crate::errors::ConfigError;

/// Symbol used for open cells in textual layouts.
pub(crate) const OPEN_SYMBOL: char = '.';

/// Symbol used for wall cells in textual layouts.
pub(crate) const WALL_SYMBOL: char = '#';

/// Rectangular grid of open and wall cells.
///
/// Cells are addressed as `(x, y)` with `x` the column and `y` the row. Cells on even coordinates
/// are the rooms of the maze; every other cell is a corridor or a wall between two rooms. A fresh
/// grid is entirely walled except for the origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    columns: usize,
    /// Number of rows.
    rows: usize,
    /// Cell states in row-major order, `true` meaning open.
    cells: Vec<bool>,
}

impl Grid {
    /// Builds an all-wall grid with only the origin open.
    ///
    /// This function is the single entry point for new grids. The origin is opened here because
    /// every carver starts on it, so a fresh grid already holds one finished room.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either dimension is zero
    /// - Either dimension is even
    /// - The cell count overflows `usize`
    pub fn new(columns: usize, rows: usize) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        if columns % 2 == 0 || rows % 2 == 0 {
            return Err(ConfigError::EvenDimension { columns, rows });
        }
        let Some(cell_count) = columns.checked_mul(rows) else {
            return Err(ConfigError::GridTooLarge { columns, rows });
        };

        let mut grid = Self {
            columns,
            rows,
            cells: vec![false; cell_count],
        };
        grid.set_open(0, 0);

        Ok(grid)
    }

    /// Returns the number of columns.
    ///
    /// This is the width of the grid, fixed at construction time.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns whether `(x, y)` lies inside the grid.
    ///
    /// This function never panics, which makes it the guard to use before calling the
    /// bounds-checked accessors with untrusted coordinates.
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    /// Returns whether the cell at `(x, y)` is open.
    ///
    /// This function is meant for coordinates already known to be inside the grid, such as the
    /// ones produced by the carvers or by [`Grid::rooms`]. Use [`Grid::get`] for anything else.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(self.index(x, y))
            .copied()
            .unwrap_or_default()
    }

    /// Opens the cell at `(x, y)`.
    ///
    /// This is the only way a cell ever changes state.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set_open(&mut self, x: usize, y: usize) {
        let index = self.index(x, y);
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = true;
        }
    }

    /// Returns the state of `(x, y)`, or `None` when it lies outside the grid.
    ///
    /// This function is the checked counterpart of [`Grid::is_open`]. Path queries use it to reject
    /// endpoints without risking a panic.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if self.contains(x, y) {
            self.cells.get(y * self.columns + x).copied()
        } else {
            None
        }
    }

    /// Iterates over the room cells, the ones on even coordinates, in row-major order.
    ///
    /// This function yields the cells carvers can stand on. The cells between two rooms are
    /// corridors, and the cells with both coordinates odd always stay walled.
    pub fn rooms(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .step_by(2)
            .flat_map(move |y| (0..self.columns).step_by(2).map(move |x| (x, y)))
    }

    /// Returns whether every room is open, the criterion for a finished maze.
    ///
    /// This function only looks at rooms. Carvers open a room together with the corridor leading
    /// to it, so once every room is open the maze is also connected.
    pub fn is_valid(&self) -> bool {
        self.rooms().all(|(x, y)| self.is_open(x, y))
    }

    /// Maps a coordinate to its row-major index, failing fast outside the grid.
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.columns,
            self.rows
        );

        y * self.columns + x
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.cells.chunks(self.columns).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for &open in row {
                let symbol = if open { OPEN_SYMBOL } else { WALL_SYMBOL };
                write!(f, "{symbol}")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ConfigError;

    /// Parses a layout of `.` (open) and `#` (wall) cells, one line per row.
    ///
    /// Surrounding whitespace is ignored. The layout is replayed onto a fresh grid through
    /// [`Grid::set_open`], so the same dimension rules as [`Grid::new`] apply.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = input.trim().lines().map(str::trim).collect();
        let expected = lines.first().map_or(0, |line| line.chars().count());

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ConfigError::RaggedRows {
                    row,
                    expected,
                    found,
                });
            }
        }

        let mut grid = Self::new(expected, lines.len())?;

        for (y, line) in lines.iter().enumerate() {
            for (x, symbol) in line.chars().enumerate() {
                match symbol {
                    OPEN_SYMBOL => grid.set_open(x, y),
                    WALL_SYMBOL if (x, y) == (0, 0) => return Err(ConfigError::ClosedOrigin),
                    WALL_SYMBOL => {}
                    _ => return Err(ConfigError::UnknownCell { x, y, symbol }),
                }
            }
        }

        Ok(grid)
    }
}
