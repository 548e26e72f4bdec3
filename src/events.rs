//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    ui, App,
};

/// Longest time the event loop blocks waiting for input.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them to the appropriate
/// handler functions. While a maze is being carved, the poll timeout shrinks so the next tick is
/// not delayed by a quiet keyboard.
///
/// # Errors
///
/// - [`std::io::Error`] from the terminal backend
/// - [`crate::ConfigError`] from regenerating or advancing the maze
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if matches!(app.screen, Screen::InGame) {
        app.driver.poll_timeout(IDLE_POLL)
    } else {
        IDLE_POLL
    };

    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key.code)?,
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            _ => {}
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.advance_generation()?;
    }

    Ok(())
}

/// Dispatches a key press to its handler.
///
/// The vi-style keys drive the menus everywhere. The remaining keys only mean something on the
/// maze screen.
///
/// # Errors
///
/// Returns the configuration error raised while creating a new maze.
pub(crate) fn handle_key_event(app: &mut App, code: KeyCode) -> Result<()> {
    let in_game = matches!(app.screen, Screen::InGame);

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        KeyCode::Char('f') if in_game => app.toggle_field(),
        KeyCode::Char('r') if in_game => app.regenerate()?,
        KeyCode::Enter | KeyCode::Char(' ') if in_game => app.select_cell(app.cursor),
        KeyCode::Up if in_game => app.move_cursor(0, -1),
        KeyCode::Down if in_game => app.move_cursor(0, 1),
        KeyCode::Left if in_game => app.move_cursor(-1, 0),
        KeyCode::Right if in_game => app.move_cursor(1, 0),
        _ => {}
    }

    Ok(())
}

/// Picks the maze cell under a left click.
///
/// Clicks outside the maze, or while the maze is hidden, are ignored.
pub(crate) fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if !matches!(app.screen, Screen::InGame)
        || mouse.kind != MouseEventKind::Down(MouseButton::Left)
    {
        return;
    }

    if let Some(cell) = app
        .maze_area
        .and_then(|area| ui::cell_at(area, mouse.column, mouse.row))
    {
        app.select_cell(cell);
    }
}

/// Handles 'j' key press events for downward navigation.
pub(crate) const fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(item) => {
            app.screen = Screen::OptionsMenu(item.next());
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) const fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::OptionsMenu(item) => {
            app.screen = Screen::OptionsMenu(item.previous());
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items. Choosing
/// "Generate" always starts a fresh maze, and the two option toggles flip their setting without
/// leaving the menu.
///
/// # Errors
///
/// Returns the configuration error raised while creating the new maze.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.regenerate()?;
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Animation);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Animation) => app.toggle_animation(),
        Screen::OptionsMenu(OptionsMenuItem::Strategy) => app.toggle_strategy(),
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
pub(crate) const fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{crossterm::event::KeyModifiers, layout::Rect};

    use super::*;
    use crate::{config::Config, pathfinding::FieldStrategy};

    /// Creates an application on a small maze.
    fn create_test_app() -> App {
        let config = Config {
            columns: 9,
            rows: 7,
            ..Config::default()
        };
        App::new(config).expect("config should be valid")
    }

    /// Creates an application showing a fully carved maze.
    fn create_in_game_app() -> App {
        let mut app = create_test_app();
        handle_l_events(&mut app).expect("generate should succeed");
        app.advance_generation()
            .expect("instant generation should converge");
        app
    }

    /// Builds a left click at the given terminal position.
    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_k_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));

        handle_j_events(&mut app);
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_l_events(&mut app).expect("quitting should succeed");
        assert!(app.exit);
    }

    #[test]
    fn test_options_menu_toggles() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Options);

        handle_l_events(&mut app).expect("opening options should succeed");
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Animation));

        handle_l_events(&mut app).expect("toggling should succeed");
        assert!(app.config.animate);
        assert!(app.driver.animate());

        handle_j_events(&mut app);
        handle_l_events(&mut app).expect("toggling should succeed");
        assert_eq!(app.config.strategy, FieldStrategy::BreadthFirst);
        assert_eq!(app.simulation.strategy(), FieldStrategy::BreadthFirst);

        handle_h_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
    }

    #[test]
    fn test_generate_enters_game() {
        let app = create_in_game_app();

        assert_eq!(app.screen, Screen::InGame);
        assert!(app.simulation.is_complete());
    }

    #[test]
    fn test_in_game_keys() {
        let mut app = create_in_game_app();

        handle_key_event(&mut app, KeyCode::Right).expect("moving should succeed");
        handle_key_event(&mut app, KeyCode::Right).expect("moving should succeed");
        assert_eq!(app.cursor, (2, 0));

        handle_key_event(&mut app, KeyCode::Enter).expect("picking should succeed");
        handle_key_event(&mut app, KeyCode::Left).expect("moving should succeed");
        handle_key_event(&mut app, KeyCode::Left).expect("moving should succeed");
        handle_key_event(&mut app, KeyCode::Char(' ')).expect("picking should succeed");
        assert_eq!(app.selection.endpoints(), Some(((0, 0), (2, 0))));
        assert!(app.solution.is_some());

        handle_key_event(&mut app, KeyCode::Char('f')).expect("toggling should succeed");
        assert!(app.show_field);

        handle_key_event(&mut app, KeyCode::Char('r')).expect("regenerating should succeed");
        assert!(app.solution.is_none());

        handle_key_event(&mut app, KeyCode::Esc).expect("leaving should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_game_keys_ignored_in_menus() {
        let mut app = create_test_app();

        handle_key_event(&mut app, KeyCode::Char('f')).expect("ignoring should succeed");
        handle_key_event(&mut app, KeyCode::Down).expect("ignoring should succeed");

        assert!(!app.show_field);
        assert_eq!(app.cursor, (0, 0));
    }

    #[test]
    fn test_mouse_click_picks_cell() {
        let mut app = create_in_game_app();
        app.maze_area = Some(Rect::new(10, 5, 9, 7));

        handle_mouse_event(&mut app, left_click(10, 5));
        handle_mouse_event(&mut app, left_click(18, 11));

        assert_eq!(app.selection.endpoints(), Some(((8, 6), (0, 0))));
    }

    #[test]
    fn test_mouse_click_outside_maze_is_ignored() {
        let mut app = create_in_game_app();
        app.maze_area = Some(Rect::new(10, 5, 9, 7));

        handle_mouse_event(&mut app, left_click(9, 5));
        handle_mouse_event(&mut app, left_click(19, 5));

        assert_eq!(app.selection.latest, None);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_mouse_click_without_maze_area() {
        let mut app = create_in_game_app();
        app.maze_area = None;

        handle_mouse_event(&mut app, left_click(0, 0));

        assert_eq!(app.selection.latest, None);
    }
}
