//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    config::Config,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::OptionsMenu(item) => options_menu(frame, item, &app.config),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the active one.
fn render_entries(frame: &mut Frame, layout: &[Rect], entries: &[(String, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (area, (label, active)) in layout.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(label.as_str(), style).centered(), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Generate", "Options", and "Quit". It
/// highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    let entries = [
        ("Generate".to_owned(), item == MainMenuItem::Generate),
        ("Options".to_owned(), item == MainMenuItem::Options),
        ("Quit".to_owned(), item == MainMenuItem::Quit),
    ];

    render_entries(frame, &inner_layout, &entries);
}

/// Renders the options menu screen, showing the current value of each setting.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, config: &Config) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(3));

    let animation = if config.animate { "on" } else { "off" };
    let entries = [
        (
            format!("Animation: {animation}"),
            item == OptionsMenuItem::Animation,
        ),
        (
            format!("Strategy: {}", config.strategy.repr()),
            item == OptionsMenuItem::Strategy,
        ),
        ("Back".to_owned(), item == OptionsMenuItem::Back),
    ];

    render_entries(frame, &inner_layout, &entries);
}

/// Maps a terminal position to the grid cell drawn there.
///
/// The maze is drawn with one terminal cell per grid cell, starting at the top-left corner of
/// `area`. Positions outside `area` map to nothing.
pub(crate) fn cell_at(area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    if column < area.x
        || row < area.y
        || column - area.x >= area.width
        || row - area.y >= area.height
    {
        return None;
    }

    Some((usize::from(column - area.x), usize::from(row - area.y)))
}

/// Transforms grid coordinates into canvas coordinates.
///
/// Grid rows grow downwards while canvas rows grow upwards, so rows are flipped against `rows`,
/// the grid height.
///
/// # Errors
///
/// Returns an error if a coordinate does not fit into a terminal dimension.
pub(crate) fn transform_grid_to_screen_coords(
    grid_coords: &[(usize, usize)],
    rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let top = f64::from(u16::try_from(rows)?) - 1.0;

    grid_coords
        .iter()
        .map(|&(column, row)| {
            let screen_x = f64::from(u16::try_from(column)?);
            let screen_y = top - f64::from(u16::try_from(row)?);
            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Canvas bound for a grid dimension.
///
/// A canvas needs a non-empty range, so single-cell dimensions still span one unit.
fn canvas_bound(cells: u16) -> f64 {
    f64::from(cells.saturating_sub(1).max(1))
}

/// Renders the in-game screen.
///
/// While the maze is being carved, the walls and the carvers are drawn. Once it is complete, the
/// cursor, the picked endpoints and the path of the last query are drawn on top of the walls,
/// together with the potential field when the overlay is enabled.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.simulation.grid();
    let maze_columns = grid.columns();
    let maze_rows = grid.rows();
    let complete = app.simulation.is_complete();

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let maze_width = u16::try_from(maze_columns)?;
    let maze_height = u16::try_from(maze_rows)?;

    if maze_content_area.width < maze_width || maze_content_area.height < maze_height {
        app.maze_area = None;

        let notice = Line::styled(
            format!("terminal too small: the maze needs {maze_columns}x{maze_rows} cells"),
            Style::default().fg(Color::Red),
        )
        .centered();
        let notice_area = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(maze_content_area)
            .first()
            .copied()
            .ok_or_eyre("failed to get notice area from layout")?;

        frame.render_widget(notice, notice_area);
        render_tooltip(app, frame, tooltip_area);

        return Ok(());
    }

    let maze_area = Layout::vertical([Constraint::Length(maze_height)])
        .flex(Flex::Center)
        .split(maze_content_area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([Constraint::Length(maze_width)])
        .flex(Flex::Center)
        .split(maze_area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before closures
    let mut wall_coords = Vec::new();
    for y in 0..maze_rows {
        for x in 0..maze_columns {
            if !grid.is_open(x, y) {
                wall_coords.push((x, y));
            }
        }
    }
    let path_coords = app
        .solution
        .as_ref()
        .map(|solution| solution.path().cells().to_vec())
        .unwrap_or_default();
    let carver_coords: Vec<(usize, usize)> = if complete {
        Vec::new()
    } else {
        app.simulation
            .carvers()
            .iter()
            .map(|carver| carver.position())
            .collect()
    };
    let endpoint_coords: Vec<(usize, usize)> = [app.selection.latest, app.selection.previous]
        .into_iter()
        .flatten()
        .collect();
    let cursor_coords = if complete {
        vec![app.cursor]
    } else {
        Vec::new()
    };

    let mut field_coords = Vec::new();
    let mut field_labels = Vec::new();
    if app.show_field {
        if let Some(solution) = &app.solution {
            for ((x, y), distance) in solution.field().distances() {
                if solution.path().contains(x, y) || (x, y) == app.cursor {
                    continue;
                }
                if let Some(digit) = char::from_digit(distance % 10, 10) {
                    field_coords.push((x, y));
                    field_labels.push(digit.to_string());
                }
            }
        }
    }

    let wall_screen_coords = transform_grid_to_screen_coords(&wall_coords, maze_rows)?;
    let path_screen_coords = transform_grid_to_screen_coords(&path_coords, maze_rows)?;
    let carver_screen_coords = transform_grid_to_screen_coords(&carver_coords, maze_rows)?;
    let endpoint_screen_coords = transform_grid_to_screen_coords(&endpoint_coords, maze_rows)?;
    let cursor_screen_coords = transform_grid_to_screen_coords(&cursor_coords, maze_rows)?;
    let field_screen_coords = transform_grid_to_screen_coords(&field_coords, maze_rows)?;

    let maze = Canvas::default()
        .x_bounds([0.0, canvas_bound(maze_width)])
        .y_bounds([0.0, canvas_bound(maze_height)])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_screen_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &path_screen_coords,
                color: Color::Red,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &carver_screen_coords,
                color: Color::Yellow,
            });
            ctx.draw(&Points {
                coords: &endpoint_screen_coords,
                color: Color::Cyan,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &cursor_screen_coords,
                color: Color::White,
            });

            for (&(x, y), label) in field_screen_coords.iter().zip(&field_labels) {
                ctx.print(
                    x,
                    y,
                    Line::styled(label.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
        });

    frame.render_widget(maze, space);
    app.maze_area = Some(space);

    render_tooltip(app, frame, tooltip_area);

    Ok(())
}

/// Renders the key hints and the status line below the maze.
fn render_tooltip(app: &App, frame: &mut Frame, area: Rect) {
    let complete = app.simulation.is_complete();

    let hints = if complete {
        "(click/enter) pick / (arrows) move / (f) field / (r) regenerate / (h) return"
    } else {
        "(r) regenerate / (h) return to menu"
    };
    let status = match &app.status {
        Some(status) => status.clone(),
        None if complete => format!("maze complete after {} ticks", app.simulation.ticks()),
        None => format!("carving, tick {}", app.simulation.ticks()),
    };

    let tooltip_block = Block::bordered()
        .title(hints)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let inner_space = tooltip_block.inner(area);

    frame.render_widget(tooltip_block, area);
    frame.render_widget(Line::raw(status).centered(), inner_space);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    /// Creates a test app on a small maze.
    fn create_test_app() -> App {
        let config = Config {
            columns: 15,
            rows: 9,
            ..Config::default()
        };
        App::new(config).expect("config should be valid")
    }

    /// Creates a test app on the maze screen, with the maze already carved.
    fn create_carved_app() -> App {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        let _ = app
            .simulation
            .run(Some(1_000_000))
            .expect("small maze should converge");
        app
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Collects the whole screen into a single string.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::MainMenu(MainMenuItem::Generate);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Generate"), "main menu should list Generate");
        assert!(text.contains("Quit"), "main menu should list Quit");
    }

    #[test]
    fn test_draw_options_menu_shows_settings() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Strategy);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing options menu should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Animation: off"));
        assert!(text.contains("Strategy: relaxation"));
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_init_menu_item_count() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(3));
            assert_eq!(layout.len(), 3, "main menu should have 3 items");
            let layout = init_menu(frame, MenuType::OptionsMenu(3));
            assert_eq!(layout.len(), 3, "options menu should have 3 items");
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }

    #[test]
    fn test_main_menu_every_item_selected() {
        let mut terminal = create_test_terminal();

        for item in [
            MainMenuItem::Generate,
            MainMenuItem::Options,
            MainMenuItem::Quit,
        ] {
            let result = terminal.draw(|frame| {
                main_menu(frame, item);
            });

            assert!(result.is_ok(), "rendering main menu with {item:?} should succeed");
        }
    }

    #[test]
    fn test_in_game_draws_walls_cell_for_cell() {
        let mut app = create_carved_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("in-game should render successfully");
        });
        assert!(result.is_ok(), "rendering in-game should succeed");

        let area = app.maze_area.expect("the maze should fit the terminal");
        assert_eq!((area.width, area.height), (15, 9));

        let buffer = terminal.backend().buffer();
        let grid = app.simulation.grid();
        for y in 0..grid.rows() {
            for x in 0..grid.columns() {
                if (x, y) == app.cursor {
                    continue;
                }
                let column = area.x + u16::try_from(x).expect("column fits");
                let row = area.y + u16::try_from(y).expect("row fits");
                let cell = buffer.cell((column, row)).expect("cell is on screen");
                assert_eq!(
                    cell.symbol() == "\u{2588}",
                    !grid.is_open(x, y),
                    "cell ({x}, {y}) should be drawn as a wall exactly when it is one"
                );
            }
        }
    }

    #[test]
    fn test_in_game_draws_path_and_field() {
        let mut app = create_carved_app();
        let mut terminal = create_test_terminal();
        app.select_cell((0, 0));
        app.select_cell((14, 8));
        app.show_field = true;

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("in-game should render successfully");
        });
        assert!(result.is_ok(), "rendering in-game should succeed");

        let area = app.maze_area.expect("the maze should fit the terminal");
        let buffer = terminal.backend().buffer();
        let solution = app.solution.as_ref().expect("rooms should be connected");
        assert!(
            solution.path().steps() >= 2,
            "opposite corners are at least two steps apart"
        );
        let (x, y) = *solution
            .path()
            .cells()
            .get(1)
            .expect("path has a cell after the source");

        let column = area.x + u16::try_from(x).expect("column fits");
        let row = area.y + u16::try_from(y).expect("row fits");
        let cell = buffer.cell((column, row)).expect("cell is on screen");
        assert_eq!(cell.fg, Color::Red, "path cells should be drawn in red");
        assert_eq!(cell.symbol(), "\u{2588}", "path cells should be drawn as blocks");

        let has_label = buffer
            .content()
            .iter()
            .any(|cell| cell.fg == Color::DarkGray && cell.symbol() != " ");
        let off_path_open_cells = solution
            .field()
            .distances()
            .any(|((x, y), _)| !solution.path().contains(x, y));
        assert_eq!(
            has_label, off_path_open_cells,
            "field labels are drawn on every reachable cell off the path"
        );
    }

    #[test]
    fn test_in_game_draws_carvers_while_carving() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.simulation.tick();

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("in-game should render successfully");
        });
        assert!(result.is_ok(), "rendering in-game should succeed");

        let area = app.maze_area.expect("the maze should fit the terminal");
        let buffer = terminal.backend().buffer();
        for carver in app.simulation.carvers() {
            let (x, y) = carver.position();
            let column = area.x + u16::try_from(x).expect("column fits");
            let row = area.y + u16::try_from(y).expect("row fits");
            let cell = buffer.cell((column, row)).expect("cell is on screen");
            assert_eq!(cell.fg, Color::Yellow, "carvers should be drawn in yellow");
        }
        assert!(screen_text(&terminal).contains("carving, tick 1"));
    }

    #[test]
    fn test_in_game_terminal_too_small() {
        let config = Config {
            columns: 101,
            rows: 9,
            ..Config::default()
        };
        let mut app = App::new(config).expect("config should be valid");
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;
        app.maze_area = Some(Rect::new(0, 0, 1, 1));

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("in-game should render successfully");
        });

        assert!(result.is_ok(), "rendering in-game should succeed");
        assert_eq!(app.maze_area, None, "a hidden maze cannot be clicked");
        assert!(screen_text(&terminal).contains("terminal too small"));
    }

    #[test]
    fn test_cell_at() {
        let area = Rect::new(4, 2, 5, 3);

        assert_eq!(cell_at(area, 4, 2), Some((0, 0)));
        assert_eq!(cell_at(area, 8, 4), Some((4, 2)));
        assert_eq!(cell_at(area, 9, 4), None);
        assert_eq!(cell_at(area, 8, 5), None);
        assert_eq!(cell_at(area, 3, 2), None);
        assert_eq!(cell_at(area, 4, 1), None);
    }

    #[test]
    fn test_transform_grid_to_screen_coords() {
        let coords = transform_grid_to_screen_coords(&[(0, 0), (2, 4)], 5)
            .expect("coordinates should fit");

        assert_eq!(coords, vec![(0.0, 4.0), (2.0, 0.0)]);
    }

    #[test]
    fn test_canvas_bound() {
        assert!((canvas_bound(1) - 1.0).abs() < f64::EPSILON);
        assert!((canvas_bound(51) - 50.0).abs() < f64::EPSILON);
    }
}
