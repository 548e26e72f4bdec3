//! Terminal maze carver.
//!
//! Mazes are carved on an odd-sized grid by a team of random walkers, then queried for shortest
//! paths by filling a potential field from the target and descending it from the source. The
//! library exposes the core on its own; the [`App`] type wraps it into a terminal interface.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod carving;
mod config;
mod driver;
mod errors;
mod events;
mod grid;
mod logging;
mod pathfinding;
mod simulation;
mod types;
mod ui;

pub use app::App;
pub use carving::{Carver, MazeGenerator};
pub use config::Config;
pub use errors::{ConfigError, QueryError};
pub use grid::Grid;
pub use logging::install as install_logging;
pub use pathfinding::{FieldStrategy, Path, PathFinder, Potential, PotentialField, Solution};
pub use simulation::Simulation;
