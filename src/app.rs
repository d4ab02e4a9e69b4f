//! Core application state and main loop.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    animation::AnimationManager,
    config::Config,
    events,
    scene::{Scene, Stage},
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container.
///
/// This structure holds the state ratatui renders from and the key handlers write to: the
/// current screen, the selected scene, the algorithm output of the current seed and the playback
/// state of the scene being shown.
pub struct App {
    /// Application exit flag, set once the user asks to quit.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Configuration the stage is rebuilt from.
    pub(crate) config: Config,
    /// Algorithm output for the current seed.
    pub(crate) stage: Stage,
    /// Scene played when entering the scene screen.
    pub(crate) scene: Scene,
    /// Scene under the cursor in the scene menu.
    pub(crate) viewport_scene: Option<Scene>,
    /// Scrolling offset for the scene list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into
    /// [`Scene::ALL`] in the scene menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the scene list rendering area during the last redraw, in terminal cells.
    pub(crate) viewport_height: usize,
    /// Playback state of the scene being shown.
    pub(crate) animation_manager: AnimationManager,
}

impl App {
    /// Creates the application state for a configuration.
    ///
    /// The seed is taken from the configuration or drawn at random, and the stage for it is
    /// built right away so configuration problems surface before the terminal is taken over.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let seed = config.seed_or_random();
        let stage = Stage::build(&config, seed)?;
        info!(seed, "starting with seed");

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Play),
            animation_manager: AnimationManager::new(config.frame_delay()),
            config,
            stage,
            scene: Scene::Generation,
            viewport_scene: None,
            viewport_offset: 0,
            viewport_height: 0,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the current screen, then handles user input and advances the
    /// animation. The loop continues until the exit flag is set.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Rebuilds the stage with the next seed and restarts playback.
    ///
    /// # Errors
    ///
    /// This function returns an error if the stage cannot be built.
    pub(crate) fn regenerate(&mut self) -> Result<()> {
        let seed = self.stage.seed.wrapping_add(1);
        self.stage = Stage::build(&self.config, seed)?;
        self.animation_manager.clear();
        info!(seed, "regenerated stage");

        Ok(())
    }
}
