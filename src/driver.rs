//! Generation pacing for the interface.
//!
//! The core never sleeps; this driver decides when the next tick happens and whether the
//! intermediate states are shown at all.

use std::time::{Duration, Instant};

use crate::{config::Config, errors::ConfigError, simulation::Simulation};

/// Paces generation ticks for the in-game screen.
#[derive(Debug)]
pub(crate) struct GenerationDriver {
    /// Whether intermediate ticks are shown.
    animate: bool,
    /// Minimum time between two animated ticks.
    delay: Duration,
    /// Tick limit after which generation gives up.
    max_ticks: Option<u64>,
    /// Time of the last animated tick.
    last_update_time: Instant,
}

impl GenerationDriver {
    /// Creates a driver from the startup configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            animate: config.animate,
            delay: Duration::from_millis(config.tick_delay_ms),
            max_ticks: config.max_ticks,
            last_update_time: Instant::now(),
        }
    }

    /// Returns whether intermediate ticks are shown.
    pub(crate) const fn animate(&self) -> bool {
        self.animate
    }

    /// Enables or disables animated generation.
    pub(crate) const fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
    }

    /// Restarts the pacing clock.
    pub(crate) fn reset(&mut self) {
        self.last_update_time = Instant::now();
    }

    /// Returns how long the event loop may block before the next tick is due.
    pub(crate) fn poll_timeout(&self, idle: Duration) -> Duration {
        if self.animate {
            self.delay
                .saturating_sub(self.last_update_time.elapsed())
                .min(idle)
        } else {
            idle
        }
    }

    /// Advances `simulation` according to the pacing rules, returning whether it is complete.
    ///
    /// Without animation the maze is generated in one go. With animation a single tick is taken
    /// once the delay since the previous one has passed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DidNotConverge`] once the tick limit is reached.
    pub(crate) fn update(&mut self, simulation: &mut Simulation) -> Result<bool, ConfigError> {
        if simulation.is_complete() {
            return Ok(true);
        }

        if !self.animate {
            let _ = simulation.run(self.max_ticks)?;
            return Ok(true);
        }

        if self.last_update_time.elapsed() >= self.delay {
            self.last_update_time = Instant::now();

            if self
                .max_ticks
                .is_some_and(|limit| simulation.ticks() >= limit)
            {
                return Err(ConfigError::DidNotConverge {
                    ticks: simulation.ticks(),
                });
            }
            simulation.tick();
        }

        Ok(simulation.is_complete())
    }
}
