//! Core application state and logic for the maze carver.

use color_eyre::eyre::Result;
use ratatui::{layout::Rect, DefaultTerminal};

use crate::{
    config::Config,
    driver::GenerationDriver,
    errors::QueryError,
    events,
    pathfinding::Solution,
    simulation::Simulation,
    types::{MainMenuItem, Screen},
    ui,
};

/// The two most recently picked cells.
///
/// Picking a new cell pushes the previous pick back; picking the latest cell again changes
/// nothing. Queries run from the latest pick to the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    /// Most recently picked cell, the query source.
    pub(crate) latest: Option<(usize, usize)>,
    /// Pick before the latest one, the query target.
    pub(crate) previous: Option<(usize, usize)>,
}

impl Selection {
    /// Records a pick.
    pub(crate) fn pick(&mut self, cell: (usize, usize)) {
        if self.latest != Some(cell) {
            self.previous = self.latest;
            self.latest = Some(cell);
        }
    }

    /// Returns the query endpoints as `(source, target)` once two cells were picked.
    pub(crate) const fn endpoints(&self) -> Option<((usize, usize), (usize, usize))> {
        match (self.latest, self.previous) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }
}

/// Application state container for the maze carver.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the interface and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Startup configuration, updated in place by the options menu.
    pub(crate) config: Config,
    /// Maze being carved or queried.
    pub(crate) simulation: Simulation,
    /// Pacing of generation ticks.
    pub(crate) driver: GenerationDriver,
    /// Cells picked by the user.
    pub(crate) selection: Selection,
    /// Answer to the last successful query.
    pub(crate) solution: Option<Solution>,
    /// Whether the potential field of the last query is drawn over the maze.
    pub(crate) show_field: bool,
    /// Keyboard cursor position on the grid.
    pub(crate) cursor: (usize, usize),
    /// Terminal area the maze was drawn into during the last redraw.
    ///
    /// This is `None` when the terminal was too small to show the maze. Mouse positions are
    /// mapped to cells against this rectangle.
    pub(crate) maze_area: Option<Rect>,
    /// Message shown below the maze, usually the outcome of the last query.
    pub(crate) status: Option<String>,
}

impl App {
    /// Creates the application state for `config`, with a fresh, uncarved maze.
    ///
    /// # Errors
    ///
    /// Returns the configuration error reported by [`Simulation::new`].
    pub fn new(config: Config) -> Result<Self> {
        let simulation = Simulation::new(&config)?;
        let driver = GenerationDriver::new(&config);

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Generate),
            config,
            simulation,
            driver,
            selection: Selection::default(),
            solution: None,
            show_field: false,
            cursor: (0, 0),
            maze_area: None,
            status: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - [`crate::ConfigError::DidNotConverge`] when generation hits its tick limit
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(|err| std::io::Error::other(err.to_string()))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Throws the current maze away and starts carving a new one.
    ///
    /// # Errors
    ///
    /// Returns the configuration error reported by [`Simulation::new`].
    pub(crate) fn regenerate(&mut self) -> Result<()> {
        self.simulation = Simulation::new(&self.config)?;
        self.driver.reset();
        self.selection = Selection::default();
        self.solution = None;
        self.cursor = (0, 0);
        self.status = None;

        Ok(())
    }

    /// Lets the driver advance generation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::DidNotConverge`] when generation hits its tick limit.
    pub(crate) fn advance_generation(&mut self) -> Result<()> {
        let _ = self.driver.update(&mut self.simulation)?;

        Ok(())
    }

    /// Picks `cell` as the next query endpoint and answers the query once two cells are known.
    pub(crate) fn select_cell(&mut self, cell: (usize, usize)) {
        if !self.simulation.is_complete() {
            self.status = Some("the maze is still being carved".to_owned());
            return;
        }

        let (x, y) = cell;
        if self.simulation.grid().get(x, y) != Some(true) {
            self.status = Some(QueryError::InvalidEndpoint { x, y }.to_string());
            return;
        }

        self.cursor = cell;
        self.selection.pick(cell);
        self.refresh_solution();
    }

    /// Re-runs the query for the current selection.
    pub(crate) fn refresh_solution(&mut self) {
        let Some((source, target)) = self.selection.endpoints() else {
            self.solution = None;
            self.status = Some("pick a second cell".to_owned());
            return;
        };

        tracing::info!(?source, ?target, "path query");
        match self.simulation.solve(source, target) {
            Ok(solution) => {
                self.status = Some(format!(
                    "{} steps from {source:?} to {target:?}",
                    solution.path().steps()
                ));
                self.solution = Some(solution);
            }
            Err(err) => {
                self.status = Some(err.to_string());
                self.solution = None;
            }
        }
    }

    /// Moves the keyboard cursor, staying inside the grid.
    pub(crate) fn move_cursor(&mut self, dx: isize, dy: isize) {
        let grid = self.simulation.grid();
        let (x, y) = self.cursor;

        self.cursor = (
            x.saturating_add_signed(dx).min(grid.columns() - 1),
            y.saturating_add_signed(dy).min(grid.rows() - 1),
        );
    }

    /// Shows or hides the potential field overlay.
    pub(crate) const fn toggle_field(&mut self) {
        self.show_field = !self.show_field;
    }

    /// Switches between animated and instant generation.
    pub(crate) const fn toggle_animation(&mut self) {
        self.driver.set_animate(!self.driver.animate());
        self.config.animate = self.driver.animate();
    }

    /// Switches the potential field strategy, answering the current query again.
    pub(crate) fn toggle_strategy(&mut self) {
        self.config.strategy = self.config.strategy.toggled();
        self.simulation.set_strategy(self.config.strategy);

        if self.solution.is_some() {
            self.refresh_solution();
        }
    }
}
