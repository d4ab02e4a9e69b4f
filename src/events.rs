//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::info;

use crate::{
    scene::Scene,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events with a timeout so the animation keeps advancing while
/// no key is pressed, and dispatches presses to the handler for each key.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InScene) {
        app.animation_manager.update();
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app)?,
        KeyCode::Char('k') => handle_k_events(app)?,
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char('r') => handle_r_events(app)?,
        _ => {}
    }

    Ok(())
}

/// Returns the position of a scene in the scene list.
fn scene_index(scene: Scene) -> Result<usize> {
    Scene::ALL
        .iter()
        .position(|candidate| *candidate == scene)
        .ok_or_eyre("scene is missing from the scene list")
}

/// Handles 'j' key press events for downward navigation.
///
/// In the scene menu the cursor moves to the next scene and the viewport scrolls by one entry
/// when the cursor leaves its bottom edge.
pub(crate) fn handle_j_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.next()),
        Screen::OptionsMenu(OptionsMenuItem::Scene) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::SceneMenu => {
            let index = scene_index(
                app.viewport_scene
                    .ok_or_eyre("failed to retrieve cursor-selected scene")?,
            )?;

            if let Some(next) = Scene::ALL.get(index + 1) {
                if index + 1 >= app.viewport_offset + app.viewport_height {
                    app.viewport_offset += 1;
                }
                app.viewport_scene = Some(*next);
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'k' key press events for upward navigation.
///
/// Like the 'j' handler, the scene menu scrolls when the cursor leaves the top edge of the
/// viewport.
pub(crate) fn handle_k_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.previous()),
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Scene);
        }
        Screen::SceneMenu => {
            let index = scene_index(
                app.viewport_scene
                    .ok_or_eyre("failed to retrieve cursor-selected scene")?,
            )?;

            if let Some(previous) = index.checked_sub(1).and_then(|idx| Scene::ALL.get(idx)) {
                if index == app.viewport_offset {
                    app.viewport_offset = app.viewport_offset.saturating_sub(1);
                }
                app.viewport_scene = Some(*previous);
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'l' key press events for selection and forward navigation.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Play) => {
            app.screen = Screen::InScene;
            app.animation_manager.clear();
            info!(scene = %app.scene, "playing scene");
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Scene);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Scene) => {
            app.screen = Screen::SceneMenu;
            app.viewport_scene = Scene::ALL.first().copied();
            app.viewport_offset = 0;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Play);
        }
        Screen::SceneMenu => {
            app.scene = app
                .viewport_scene
                .ok_or_eyre("failed to retrieve cursor-selected scene")?;
            info!(scene = %app.scene, "selected scene");
        }
        Screen::InScene => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// Leaving a scene drops its playback state so the next visit starts from the first frame.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InScene => {
            app.animation_manager.clear();
            app.screen = Screen::MainMenu(MainMenuItem::Play);
        }
        Screen::SceneMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Scene);
        }
        _ => {}
    }
}

/// Handles 'r' key press events, which rebuild the stage with the next seed while in a scene.
pub(crate) fn handle_r_events(app: &mut App) -> Result<()> {
    if matches!(app.screen, Screen::InScene) {
        app.regenerate()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    /// Builds an application with a fixed seed and a small maze.
    fn create_test_app() -> App {
        App::new(Config {
            size: 9,
            seed: Some(4),
            cities: 6,
            ..Config::default()
        })
        .expect("failed to create test app")
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j')).expect("key should be handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));

        handle_key(&mut app, KeyCode::Char('j')).expect("key should be handled");
        handle_key(&mut app, KeyCode::Char('j')).expect("key should be handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_key(&mut app, KeyCode::Char('k')).expect("key should be handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
    }

    #[test]
    fn test_quit_key() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('q')).expect("key should be handled");

        assert!(app.exit);
    }

    #[test]
    fn test_quit_menu_entry() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_l_events(&mut app).expect("selection should succeed");

        assert!(app.exit);
    }

    #[test]
    fn test_select_scene_from_menu() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Options);

        handle_l_events(&mut app).expect("selection should succeed");
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Scene));

        handle_l_events(&mut app).expect("selection should succeed");
        assert_eq!(app.screen, Screen::SceneMenu);
        assert_eq!(app.viewport_scene, Some(Scene::Generation));

        app.viewport_height = 10;
        handle_j_events(&mut app).expect("navigation should succeed");
        handle_j_events(&mut app).expect("navigation should succeed");
        handle_l_events(&mut app).expect("selection should succeed");
        assert_eq!(app.scene, Scene::Solution);

        handle_h_events(&mut app);
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Scene));
    }

    #[test]
    fn test_scene_menu_scrolls_viewport() {
        let mut app = create_test_app();
        app.screen = Screen::SceneMenu;
        app.viewport_scene = Some(Scene::Generation);
        app.viewport_height = 2;

        handle_j_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_offset, 0);

        handle_j_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_offset, 1);
        assert_eq!(app.viewport_scene, Some(Scene::Solution));

        handle_k_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_offset, 1);
        handle_k_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_offset, 0);
        assert_eq!(app.viewport_scene, Some(Scene::Generation));

        handle_k_events(&mut app).expect("navigation should succeed");
        assert_eq!(app.viewport_scene, Some(Scene::Generation));
    }

    #[test]
    fn test_scene_menu_stops_at_last_scene() {
        let mut app = create_test_app();
        app.screen = Screen::SceneMenu;
        app.viewport_scene = Some(Scene::Tour);
        app.viewport_height = 10;

        handle_j_events(&mut app).expect("navigation should succeed");

        assert_eq!(app.viewport_scene, Some(Scene::Tour));
    }

    #[test]
    fn test_scene_menu_without_cursor_fails() {
        let mut app = create_test_app();
        app.screen = Screen::SceneMenu;
        app.viewport_scene = None;

        assert!(handle_j_events(&mut app).is_err());
    }

    #[test]
    fn test_play_and_leave_scene() {
        let mut app = create_test_app();

        handle_l_events(&mut app).expect("selection should succeed");
        assert_eq!(app.screen, Screen::InScene);

        app.animation_manager.load(app.stage.animation_steps(app.scene));
        handle_h_events(&mut app);

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Play));
        assert!(app.animation_manager.steps.is_empty());
    }

    #[test]
    fn test_regenerate_only_in_scene() {
        let mut app = create_test_app();

        handle_r_events(&mut app).expect("key should be handled");
        assert_eq!(app.stage.seed, 4);

        app.screen = Screen::InScene;
        handle_r_events(&mut app).expect("key should be handled");
        assert_eq!(app.stage.seed, 5);
    }
}
