//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::{errors::ConfigError, pathfinding::FieldStrategy};

/// Default number of grid columns.
pub(crate) const DEFAULT_COLUMNS: usize = 51;

/// Default number of grid rows.
pub(crate) const DEFAULT_ROWS: usize = 21;

/// Default number of carvers.
pub(crate) const DEFAULT_CARVERS: usize = 2;

/// Default pause between animated generation ticks, in milliseconds.
pub(crate) const DEFAULT_TICK_DELAY_MS: u64 = 100;

/// Largest grid dimension, the widest span a terminal can address.
pub(crate) const MAX_DIMENSION: usize = 65_535;

/// Default directory for the diagnostic log file.
pub(crate) const DEFAULT_LOG_DIR: &str = "logs";

/// Startup configuration of the maze carver.
///
/// Everything the generator and the interface need is fixed here, before the first grid is built.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of grid columns; must be odd.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,
    /// Number of grid rows; must be odd.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
    /// Number of carvers wandering the grid at once.
    #[arg(long = "carvers", default_value_t = DEFAULT_CARVERS)]
    pub carver_count: usize,
    /// Milliseconds between animated generation ticks; 0 disables pacing.
    #[arg(long = "tick-delay", default_value_t = DEFAULT_TICK_DELAY_MS)]
    pub tick_delay_ms: u64,
    /// Draw every generation tick instead of jumping straight to the finished maze.
    #[arg(long)]
    pub animate: bool,
    /// Give up generating after this many ticks.
    #[arg(long)]
    pub max_ticks: Option<u64>,
    /// Algorithm used to build the potential field of a path query.
    #[arg(long, value_enum, default_value_t = FieldStrategy::Relaxation)]
    pub strategy: FieldStrategy,
    /// Directory the diagnostic log file is written to.
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            carver_count: DEFAULT_CARVERS,
            tick_delay_ms: DEFAULT_TICK_DELAY_MS,
            animate: false,
            max_ticks: None,
            strategy: FieldStrategy::default(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Config {
    /// Checks the values a grid and generator would otherwise reject later.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - Either grid dimension is zero or even
    /// - Either grid dimension exceeds 65535, the widest span a terminal can address
    /// - No carver is requested
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns % 2 == 0 || self.rows % 2 == 0 {
            return Err(ConfigError::EvenDimension {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.carver_count == 0 {
            return Err(ConfigError::NoCarvers);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = Config::try_parse_from(["mazecarver"]).expect("no flags should parse");

        assert_eq!(config, Config::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_parse_all_flags() {
        let config = Config::try_parse_from([
            "mazecarver",
            "--columns",
            "15",
            "--rows",
            "9",
            "--carvers",
            "4",
            "--tick-delay",
            "0",
            "--animate",
            "--max-ticks",
            "1000",
            "--strategy",
            "breadth-first",
            "--log-dir",
            "/tmp/mazecarver",
        ])
        .expect("all flags should parse");

        assert_eq!(config.columns, 15);
        assert_eq!(config.rows, 9);
        assert_eq!(config.carver_count, 4);
        assert_eq!(config.tick_delay_ms, 0);
        assert!(config.animate);
        assert_eq!(config.max_ticks, Some(1000));
        assert_eq!(config.strategy, FieldStrategy::BreadthFirst);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/mazecarver"));
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        let result = Config::try_parse_from(["mazecarver", "--strategy", "dijkstra"]);

        assert!(result.is_err(), "unknown strategies should be rejected");
    }

    #[test]
    fn test_validate_even_dimensions() {
        let config = Config {
            columns: 10,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EvenDimension {
                columns: 10,
                rows: DEFAULT_ROWS
            })
        );
    }

    #[test]
    fn test_validate_zero_dimensions() {
        let config = Config {
            rows: 0,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                columns: DEFAULT_COLUMNS,
                rows: 0
            })
        );
    }

    #[test]
    fn test_validate_oversized_dimensions() {
        let config = Config {
            columns: 70_001,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                columns: 70_001,
                rows: DEFAULT_ROWS
            })
        );

        let config = Config {
            columns: usize::MAX,
            rows: 3,
            ..Config::default()
        };
        assert!(
            config.validate().is_err(),
            "an overflowing cell count should be rejected before any grid is built"
        );
        assert!(
            crate::simulation::Simulation::new(&config).is_err(),
            "building a simulation should report the error instead of panicking"
        );
    }

    #[test]
    fn test_validate_largest_dimension() {
        let config = Config {
            columns: MAX_DIMENSION,
            rows: 1,
            ..Config::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_no_carvers() {
        let config = Config {
            carver_count: 0,
            ..Config::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::NoCarvers));
    }
}
