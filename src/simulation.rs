//! The simulation object tying a grid to its generator and path finder.

use rand::Rng;

use crate::{
    carving::{Carver, MazeGenerator},
    config::Config,
    errors::{ConfigError, QueryError},
    grid::Grid,
    pathfinding::{FieldStrategy, Path, PathFinder, Solution},
};

/// A maze under construction or ready for path queries.
///
/// The simulation exclusively owns its grid. Generation mutates it through [`Simulation::tick`]
/// and [`Simulation::run`]; queries only ever read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    /// The grid being carved.
    grid: Grid,
    /// The carvers working on the grid.
    generator: MazeGenerator,
    /// Query engine used once the maze is complete.
    finder: PathFinder,
}

impl Simulation {
    /// Builds a fresh simulation from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let simulation = Self {
            grid: Grid::new(config.columns, config.rows)?,
            generator: MazeGenerator::new(config.carver_count)?,
            finder: PathFinder::new(config.strategy),
        };
        tracing::info!(
            columns = config.columns,
            rows = config.rows,
            carvers = config.carver_count,
            strategy = config.strategy.repr(),
            "created simulation"
        );

        Ok(simulation)
    }

    /// Returns the grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the carvers.
    pub fn carvers(&self) -> &[Carver] {
        self.generator.carvers()
    }

    /// Returns the number of generation ticks performed so far.
    pub const fn ticks(&self) -> u64 {
        self.generator.ticks()
    }

    /// Returns the fill algorithm used by path queries.
    pub const fn strategy(&self) -> FieldStrategy {
        self.finder.strategy()
    }

    /// Switches the fill algorithm used by later path queries.
    pub fn set_strategy(&mut self, strategy: FieldStrategy) {
        self.finder = PathFinder::new(strategy);
    }

    /// Returns whether the maze is complete.
    pub fn is_complete(&self) -> bool {
        MazeGenerator::is_complete(&self.grid)
    }

    /// Advances every carver once.
    pub fn tick(&mut self) {
        self.generator.step(&mut self.grid);
    }

    /// Advances every carver once, drawing randomness from `rng`.
    pub fn tick_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generator.step_with(&mut self.grid, rng);
    }

    /// Ticks until the maze is complete, returning the total tick count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DidNotConverge`] when `max_ticks` is reached first.
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<u64, ConfigError> {
        self.generator.run(&mut self.grid, max_ticks)
    }

    /// Same as [`Simulation::run`], drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DidNotConverge`] when `max_ticks` is reached first.
    pub fn run_with<R: Rng + ?Sized>(
        &mut self,
        max_ticks: Option<u64>,
        rng: &mut R,
    ) -> Result<u64, ConfigError> {
        self.generator.run_with(&mut self.grid, max_ticks, rng)
    }

    /// Finds a shortest path and the field it was read from.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::solve`].
    pub fn solve(
        &self,
        source: (usize, usize),
        target: (usize, usize),
    ) -> Result<Solution, QueryError> {
        self.finder.solve(&self.grid, source, target)
    }

    /// Finds a shortest path from `source` to `target`.
    ///
    /// # Errors
    ///
    /// See [`PathFinder::find_path`].
    pub fn find_path(
        &self,
        source: (usize, usize),
        target: (usize, usize),
    ) -> Result<Path, QueryError> {
        self.finder.find_path(&self.grid, source, target)
    }
}
