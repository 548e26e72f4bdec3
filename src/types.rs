//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen. This is used to determine which
/// screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen.
    MainMenu(MainMenuItem),
    /// Options screen, where animation and the field strategy are toggled.
    OptionsMenu(OptionsMenuItem),
    /// Maze screen.
    ///
    /// This variant represents the screen where the maze is carved, then queried for paths.
    InGame,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Generate" menu option, carving a fresh maze.
    Generate,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. Selecting one of the first two
/// flips the setting in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Animated generation toggle.
    Animation,
    /// Potential field strategy toggle.
    Strategy,
    /// "Back" navigation option.
    Back,
}

impl OptionsMenuItem {
    /// Returns the item below this one, staying put at the bottom.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Animation => Self::Strategy,
            Self::Strategy | Self::Back => Self::Back,
        }
    }

    /// Returns the item above this one, staying put at the top.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Animation | Self::Strategy => Self::Animation,
            Self::Back => Self::Strategy,
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration, holding its number of items.
    MainMenu(u8),
    /// Options menu configuration, holding its number of items.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}
