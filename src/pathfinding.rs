//! Potential-field pathfinding module.
//!
//! This module labels every open cell with its distance from a query target (the potential field)
//! and reconstructs a shortest path from the source by walking steadily downhill.

use std::collections::VecDeque;

use clap::ValueEnum;

use crate::{errors::QueryError, grid::Grid};

/// Fill algorithm used to build a [`PotentialField`].
///
/// Both strategies produce identical fields; they only differ in cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FieldStrategy {
    /// Repeated full-grid relaxation scans until a fixed point is reached.
    ///
    /// Simple, but quadratic in the number of cells in the worst case.
    #[default]
    Relaxation,
    /// Queue-based breadth-first search from the target, linear in the number of cells.
    BreadthFirst,
}

impl FieldStrategy {
    /// Returns the name shown in the interface.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::Relaxation => "relaxation",
            Self::BreadthFirst => "breadth-first",
        }
    }

    /// Returns the other strategy.
    pub(crate) const fn toggled(self) -> Self {
        match self {
            Self::Relaxation => Self::BreadthFirst,
            Self::BreadthFirst => Self::Relaxation,
        }
    }
}

/// Label of a single cell in a [`PotentialField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Potential {
    /// The underlying cell is a wall.
    Blocked,
    /// The cell is open but has not been reached from the target.
    Unvisited,
    /// Minimum number of orthogonal steps from the target.
    Distance(u32),
}

/// Distance labels for every cell of a grid, measured from a single target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PotentialField {
    /// Number of columns of the labelled grid.
    columns: usize,
    /// Number of rows of the labelled grid.
    rows: usize,
    /// Labels in row-major order.
    cells: Vec<Potential>,
}

impl PotentialField {
    /// Labels walls as blocked, open cells as unvisited and the target as distance zero.
    fn seeded(grid: &Grid, target: (usize, usize)) -> Self {
        let columns = grid.columns();
        let rows = grid.rows();
        let mut cells: Vec<Potential> = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| (x, y)))
            .map(|(x, y)| {
                if grid.is_open(x, y) {
                    Potential::Unvisited
                } else {
                    Potential::Blocked
                }
            })
            .collect();

        if grid.get(target.0, target.1) == Some(true) {
            if let Some(cell) = cells.get_mut(target.1 * columns + target.0) {
                *cell = Potential::Distance(0);
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Builds the field by relaxing every labelled cell's neighbours until nothing changes.
    ///
    /// Each scan walks the grid in row-major order and offers `d + 1` to the open neighbours of
    /// every cell holding `d`, keeping the smaller value. The fixed point holds exact
    /// shortest-path distances.
    pub fn relaxation(grid: &Grid, target: (usize, usize)) -> Self {
        let mut field = Self::seeded(grid, target);
        let mut scans = 0_usize;

        loop {
            let mut changed = false;
            scans += 1;

            for y in 0..field.rows {
                for x in 0..field.columns {
                    let Some(Potential::Distance(distance)) = field.get(x, y) else {
                        continue;
                    };
                    let offered = next_distance(distance);

                    for (nx, ny) in neighbours(field.columns, field.rows, (x, y)) {
                        let Some(cell) = field.cells.get_mut(ny * field.columns + nx) else {
                            continue;
                        };
                        match *cell {
                            Potential::Unvisited => {
                                *cell = Potential::Distance(offered);
                                changed = true;
                            }
                            Potential::Distance(current) if offered < current => {
                                *cell = Potential::Distance(offered);
                                changed = true;
                            }
                            Potential::Blocked | Potential::Distance(_) => {}
                        }
                    }
                }
            }

            if !changed {
                break;
            }
        }

        tracing::debug!(scans, ?target, "relaxation reached a fixed point");

        field
    }

    /// Builds the field with a breadth-first search from the target.
    ///
    /// This function visits each open cell at most once, in order of increasing distance, and
    /// labels it the first time it is reached. The result is identical to
    /// [`PotentialField::relaxation`] at a fraction of the cost on large grids.
    pub fn breadth_first(grid: &Grid, target: (usize, usize)) -> Self {
        let mut field = Self::seeded(grid, target);
        let mut queue: VecDeque<_> = field
            .distance(target.0, target.1)
            .map(|distance| (target, distance))
            .into_iter()
            .collect();

        while let Some((position, distance)) = queue.pop_front() {
            for (nx, ny) in neighbours(field.columns, field.rows, position) {
                let Some(cell) = field.cells.get_mut(ny * field.columns + nx) else {
                    continue;
                };
                if *cell == Potential::Unvisited {
                    let offered = next_distance(distance);
                    *cell = Potential::Distance(offered);
                    queue.push_back(((nx, ny), offered));
                }
            }
        }

        field
    }

    /// Returns the number of columns.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the label at `(x, y)`, or `None` outside the field.
    ///
    /// This function exposes the raw label, so callers can tell walls apart from open cells that
    /// the target could not reach.
    pub fn get(&self, x: usize, y: usize) -> Option<Potential> {
        if x < self.columns && y < self.rows {
            self.cells.get(y * self.columns + x).copied()
        } else {
            None
        }
    }

    /// Returns the distance recorded at `(x, y)`, if the cell was reached.
    ///
    /// This is `None` for walls, unreached cells and coordinates outside the field alike.
    pub fn distance(&self, x: usize, y: usize) -> Option<u32> {
        match self.get(x, y) {
            Some(Potential::Distance(distance)) => Some(distance),
            _ => None,
        }
    }

    /// Iterates over every reached cell together with its distance, in row-major order.
    ///
    /// This function feeds the field overlay of the interface, which prints each distance modulo
    /// ten on its cell.
    pub fn distances(&self) -> impl Iterator<Item = ((usize, usize), u32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, potential)| match *potential {
                Potential::Distance(distance) => Some((
                    (index % self.columns, index / self.columns),
                    distance,
                )),
                Potential::Blocked | Potential::Unvisited => None,
            })
    }

    /// Walks downhill from `source` to the cell holding distance zero.
    ///
    /// At every step the first neighbour holding exactly one less, looking north, south, west and
    /// then east, is taken. Returns `None` when `source` was never reached.
    pub fn descend(&self, source: (usize, usize)) -> Option<Path> {
        let mut remaining = self.distance(source.0, source.1)?;
        let mut current = source;
        let mut cells = vec![source];

        while remaining != 0 {
            remaining -= 1;
            current = neighbours(self.columns, self.rows, current)
                .find(|&(x, y)| self.distance(x, y) == Some(remaining))?;
            cells.push(current);
        }

        Some(Path { cells })
    }
}

/// Distance offered to the neighbours of a cell holding `distance`.
const fn next_distance(distance: u32) -> u32 {
    distance.saturating_add(1)
}

/// Yields the in-bounds orthogonal neighbours of `(x, y)` in north, south, west, east order.
fn neighbours(
    columns: usize,
    rows: usize,
    (x, y): (usize, usize),
) -> impl Iterator<Item = (usize, usize)> {
    [
        y.checked_sub(1).map(|north| (x, north)),
        (y + 1 < rows).then_some((x, y + 1)),
        x.checked_sub(1).map(|west| (west, y)),
        (x + 1 < columns).then_some((x + 1, y)),
    ]
    .into_iter()
    .flatten()
}

/// Shortest path between two open cells.
///
/// The first cell is the query source and the last one the query target; consecutive cells are
/// orthogonal neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Cells from source to target.
    cells: Vec<(usize, usize)>,
}

impl Path {
    /// Returns the cells from source to target.
    ///
    /// This slice is never empty: a query whose source is its own target yields a single cell.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Returns the number of single-cell moves along the path.
    ///
    /// This equals the distance of the source in the field the path was descended on.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Returns whether the path passes through `(x, y)`.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&(x, y))
    }
}

/// A path together with the potential field it was descended on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Field measured from the query target.
    field: PotentialField,
    /// Path from the query source to the query target.
    path: Path,
}

impl Solution {
    /// Returns the potential field.
    pub const fn field(&self) -> &PotentialField {
        &self.field
    }

    /// Returns the path.
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the solution, returning the path.
    pub fn into_path(self) -> Path {
        self.path
    }
}

/// Answers shortest-path queries over a fixed grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathFinder {
    /// Fill algorithm used for the potential field.
    strategy: FieldStrategy,
}

impl PathFinder {
    /// Creates a path finder using `strategy` to build its fields.
    ///
    /// This function holds no grid; each query borrows the grid it runs against, so the same
    /// finder answers queries on any maze.
    pub const fn new(strategy: FieldStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the fill algorithm in use.
    pub const fn strategy(&self) -> FieldStrategy {
        self.strategy
    }

    /// Builds the potential field measured from `target`.
    ///
    /// This function validates both endpoints before any labelling work starts, then fills the
    /// field with the configured [`FieldStrategy`]. `source` is only checked, not used.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidEndpoint`] when `source` or `target` is a wall or lies
    /// outside the grid.
    pub fn field(
        &self,
        grid: &Grid,
        source: (usize, usize),
        target: (usize, usize),
    ) -> Result<PotentialField, QueryError> {
        for (x, y) in [source, target] {
            if grid.get(x, y) != Some(true) {
                tracing::warn!(x, y, "rejected path query endpoint");
                return Err(QueryError::InvalidEndpoint { x, y });
            }
        }

        Ok(match self.strategy {
            FieldStrategy::Relaxation => PotentialField::relaxation(grid, target),
            FieldStrategy::BreadthFirst => PotentialField::breadth_first(grid, target),
        })
    }

    /// Finds a shortest path from `source` to `target` and returns it with its field.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either endpoint is a wall or out of bounds ([`QueryError::InvalidEndpoint`])
    /// - The source cannot reach the target ([`QueryError::NoPath`])
    pub fn solve(
        &self,
        grid: &Grid,
        source: (usize, usize),
        target: (usize, usize),
    ) -> Result<Solution, QueryError> {
        let field = self.field(grid, source, target)?;
        let Some(path) = field.descend(source) else {
            tracing::warn!(?source, ?target, "no path between query endpoints");
            return Err(QueryError::NoPath {
                from: source,
                to: target,
            });
        };

        tracing::debug!(?source, ?target, steps = path.steps(), "found path");

        Ok(Solution { field, path })
    }

    /// Finds a shortest path from `source` to `target`.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either endpoint is a wall or out of bounds ([`QueryError::InvalidEndpoint`])
    /// - The source cannot reach the target ([`QueryError::NoPath`])
    pub fn find_path(
        &self,
        grid: &Grid,
        source: (usize, usize),
        target: (usize, usize),
    ) -> Result<Path, QueryError> {
        self.solve(grid, source, target).map(Solution::into_path)
    }
}
