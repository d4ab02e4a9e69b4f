//! Screen and menu enumerations for navigating the interface.

/// Screens the interface can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu with the given entry highlighted.
    MainMenu(MainMenuItem),
    /// Options menu with the given entry highlighted.
    OptionsMenu(OptionsMenuItem),
    /// Playback of the selected scene.
    ///
    /// The maze and the route sampling scenes are both drawn on this screen; which one depends on
    /// the scene currently selected in the application state.
    InScene,
    /// Scrollable list of scenes to choose from.
    SceneMenu,
}

/// Main menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// Starts playing the selected scene.
    Play,
    /// Opens the options menu.
    Options,
    /// Leaves the application.
    Quit,
}

impl MainMenuItem {
    /// Entry below this one; the last entry stays put.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Play => Self::Options,
            Self::Options | Self::Quit => Self::Quit,
        }
    }

    /// Entry above this one; the first entry stays put.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Quit => Self::Options,
            Self::Options | Self::Play => Self::Play,
        }
    }
}

/// Options menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Opens the scene list.
    Scene,
    /// Returns to the main menu.
    Back,
}

/// Generic menu type configuration.
///
/// The main and options menus share their layout and only differ in title and entry count,
/// which this enumeration carries.
pub(crate) enum MenuType {
    /// Main menu with the given number of entries.
    MainMenu(u8),
    /// Options menu with the given number of entries.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the title drawn on the menu border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of entries, used to size the menu container.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_menu_navigation() {
        assert_eq!(MainMenuItem::Play.next(), MainMenuItem::Options);
        assert_eq!(MainMenuItem::Options.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);

        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::Options);
        assert_eq!(MainMenuItem::Options.previous(), MainMenuItem::Play);
        assert_eq!(MainMenuItem::Play.previous(), MainMenuItem::Play);
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(3).repr(), "Main Menu");
        assert_eq!(MenuType::OptionsMenu(2).repr(), "Options Menu");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(3).value(), 3);
        assert_eq!(MenuType::OptionsMenu(2).value(), 2);
        assert_eq!(MenuType::OptionsMenu(0).value(), 0);
    }

    #[test]
    fn test_screen_debug() {
        assert_eq!(format!("{:?}", Screen::InScene), "InScene");
        assert_eq!(
            format!("{:?}", Screen::MainMenu(MainMenuItem::Play)),
            "MainMenu(Play)"
        );
    }
}
