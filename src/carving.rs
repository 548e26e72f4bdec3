//! Randomized multi-agent maze carving.
//!
//! Carvers wander the rooms of a [`Grid`] two cells at a time. Whenever one lands on a walled room
//! it opens that room together with the corridor it just crossed. Carvers keep moving through
//! territory that is already open, which is what keeps them from ever getting stuck, and it also
//! means independent carvers can close loops: the finished maze is connected but not necessarily
//! a tree.

use rand::{seq::IndexedRandom as _, Rng};

use crate::{errors::ConfigError, grid::Grid};

/// A single carving agent.
///
/// Carvers always sit on even coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carver {
    /// Current column.
    x: usize,
    /// Current row.
    y: usize,
}

impl Carver {
    /// Creates a carver at the origin.
    ///
    /// This function places the carver on `(0, 0)`, the one cell every fresh grid keeps open, so
    /// the carver never starts inside a wall.
    pub const fn new() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Returns the carver's position as `(x, y)`.
    ///
    /// This is always a room, so both coordinates are even. The interface uses it to draw the
    /// carvers while a maze is being animated.
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Lists the two-cell steps that keep the carver inside `grid`.
    ///
    /// The order is fixed (west, east, north, south) so that a seeded generator reproduces the
    /// same walk.
    fn candidate_steps(&self, grid: &Grid) -> Vec<(isize, isize)> {
        [
            (-2, 0, self.x > 0),
            (2, 0, self.x < grid.columns() - 1),
            (0, -2, self.y > 0),
            (0, 2, self.y < grid.rows() - 1),
        ]
        .into_iter()
        .filter_map(|(dx, dy, allowed)| allowed.then_some((dx, dy)))
        .collect()
    }

    /// Moves the carver one random step and carves if it lands on a wall.
    ///
    /// Returns whether a corridor was opened. A carver with nowhere to go, which only happens on
    /// a single-cell grid, stays where it is.
    fn advance<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> bool {
        let Some(&(dx, dy)) = self.candidate_steps(grid).choose(rng) else {
            return false;
        };
        let (Some(x), Some(y), Some(mid_x), Some(mid_y)) = (
            self.x.checked_add_signed(dx),
            self.y.checked_add_signed(dy),
            self.x.checked_add_signed(dx / 2),
            self.y.checked_add_signed(dy / 2),
        ) else {
            return false;
        };

        self.x = x;
        self.y = y;

        if grid.is_open(x, y) {
            return false;
        }

        grid.set_open(x, y);
        grid.set_open(mid_x, mid_y);
        tracing::trace!(x, y, mid_x, mid_y, "carved corridor");

        true
    }
}

/// Drives a set of carvers over a grid until it becomes a valid maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    /// The carving agents, all starting at the origin.
    carvers: Vec<Carver>,
    /// Number of ticks performed so far.
    ticks: u64,
}

impl MazeGenerator {
    /// Creates a generator with `carver_count` carvers at the origin.
    ///
    /// This function only sets up the carvers; the grid they work on is passed to every call of
    /// [`MazeGenerator::step`], which lets one generator drive any grid of any size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCarvers`] when `carver_count` is zero.
    pub fn new(carver_count: usize) -> Result<Self, ConfigError> {
        if carver_count == 0 {
            return Err(ConfigError::NoCarvers);
        }

        Ok(Self {
            carvers: vec![Carver::new(); carver_count],
            ticks: 0,
        })
    }

    /// Returns the carvers in creation order.
    ///
    /// This is also the order in which they move during a tick.
    pub fn carvers(&self) -> &[Carver] {
        &self.carvers
    }

    /// Returns the number of ticks performed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every carver once using the thread-local random generator.
    ///
    /// This function counts as one tick, whether or not any carver opened a new corridor. See
    /// [`MazeGenerator::step_with`] to supply the random generator yourself.
    pub fn step(&mut self, grid: &mut Grid) {
        self.step_with(grid, &mut rand::rng());
    }

    /// Advances every carver once using `rng`.
    ///
    /// Carvers move in creation order, so a seeded `rng` makes a tick reproducible.
    pub fn step_with<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        let carved = self
            .carvers
            .iter_mut()
            .map(|carver| carver.advance(grid, rng))
            .filter(|&carved| carved)
            .count();
        self.ticks += 1;

        tracing::trace!(tick = self.ticks, carved, "advanced carvers");
    }

    /// Returns whether `grid` has become a valid maze.
    ///
    /// This function checks the same criterion as [`Grid::is_valid`], and generation stops as soon
    /// as it holds.
    pub fn is_complete(grid: &Grid) -> bool {
        grid.is_valid()
    }

    /// Steps until `grid` is valid, returning the total tick count.
    ///
    /// Without a limit termination is probabilistic: it happens almost surely, but large grids
    /// with few carvers may take a long time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DidNotConverge`] once `max_ticks` ticks have been performed in total
    /// without the grid becoming valid.
    pub fn run(&mut self, grid: &mut Grid, max_ticks: Option<u64>) -> Result<u64, ConfigError> {
        self.run_with(grid, max_ticks, &mut rand::rng())
    }

    /// Same as [`MazeGenerator::run`], drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DidNotConverge`] once `max_ticks` ticks have been performed in total
    /// without the grid becoming valid.
    pub fn run_with<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        max_ticks: Option<u64>,
        rng: &mut R,
    ) -> Result<u64, ConfigError> {
        while !Self::is_complete(grid) {
            if max_ticks.is_some_and(|limit| self.ticks >= limit) {
                tracing::warn!(ticks = self.ticks, "maze generation hit its tick limit");
                return Err(ConfigError::DidNotConverge { ticks: self.ticks });
            }
            self.step_with(grid, rng);
        }

        tracing::info!(
            ticks = self.ticks,
            columns = grid.columns(),
            rows = grid.rows(),
            "maze generation complete"
        );

        Ok(self.ticks)
    }
}
