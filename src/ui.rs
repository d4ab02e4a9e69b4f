//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    animation,
    scene::{Scene, TourFrame},
    tour::{Tour, X_RANGE, Y_RANGE},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Colors the sampled routes are drawn in, cycled when there are more routes than colors.
const ROUTE_COLORS: [Color; 4] = [Color::Red, Color::LightRed, Color::Magenta, Color::Yellow];

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
        Screen::OptionsMenu(item) => options_menu(frame, item),
        Screen::InScene => in_scene(app, frame)?,
        Screen::SceneMenu => scene_menu(app, frame)?,
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
/// This function creates the centered, bordered container shared by both menus and returns one
/// row per entry for the caller to fill.
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
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
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

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders menu entries into the rows returned by [`init_menu`], highlighting the active one.
fn render_entries(frame: &mut Frame, rows: &[Rect], entries: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (row, (label, active)) in rows.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(*label, style).centered(), *row);
    }
}

/// Renders the main menu screen with its "Play", "Options" and "Quit" entries.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    render_entries(
        frame,
        &inner_layout,
        &[
            ("Play", item == MainMenuItem::Play),
            ("Options", item == MainMenuItem::Options),
            ("Quit", item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the options menu screen with its "Scene" and "Return" entries.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));

    render_entries(
        frame,
        &inner_layout,
        &[
            ("Scene", item == OptionsMenuItem::Scene),
            ("Return", item == OptionsMenuItem::Back),
        ],
    );
}

/// Renders the scene selection menu with a scrollable list of scenes.
///
/// The scene under the cursor is highlighted and the scene that plays next is marked with a dot.
///
/// # Errors
///
/// This function may return errors if the cursor-selected scene cannot be retrieved.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn scene_menu(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Min(1)]).split(space)[0];
    let block = Block::bordered()
        .title_top("Scene list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    app.viewport_height = inner_space.height.into();

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let rows = vec![Constraint::Max(1); inner_space.height.into()];
    let inner_selector = Layout::vertical(rows.clone()).split(inner_layout[0]);
    let inner_list = Layout::vertical(rows).split(inner_layout[1]);

    let viewport_scene = app
        .viewport_scene
        .ok_or_eyre("failed to retrieve cursor-selected scene")?;

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let visible = Scene::ALL
        .iter()
        .skip(app.viewport_offset)
        .take(inner_space.height.into());
    for ((scene, selector_area), entry_area) in
        visible.zip(inner_selector.iter()).zip(inner_list.iter())
    {
        let style = if *scene == viewport_scene {
            active_content_style
        } else {
            content_style
        };
        let marker = if *scene == app.scene { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), *selector_area);
        frame.render_widget(Line::styled(scene.title(), style), *entry_area);
    }

    Ok(())
}

/// Renders the scene screen: the animated canvas on top and a key tooltip at the bottom.
///
/// The scene's animation steps are recorded from the stage the first time the screen is drawn
/// after entering it or regenerating.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion.
pub(crate) fn in_scene(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    if app.animation_manager.steps.is_empty() {
        app.animation_manager
            .load(app.stage.animation_steps(app.scene));
    }

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Canvas and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    if app.scene == Scene::Tour {
        tour_canvas(app, frame, content_area)?;
    } else {
        maze_canvas(app, frame, content_area)?;
    }

    let tooltip_block = Block::bordered()
        .title(format!("{} / seed {}", app.scene.title(), app.stage.seed))
        .title_bottom("(h) return to menu / (r) next seed")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Draws the maze scenes, one canvas point per maze cell, centered in `area`.
///
/// The generation scene draws every cell not yet carved as a wall. The other scenes draw the
/// final maze with the highlighted cells, or for the quantum scene every sampled route revealed
/// up to the current frame.
fn maze_canvas(app: &App, frame: &mut Frame, area: Rect) -> Result<()> {
    let stage = &app.stage;
    let size = stage.grid.size();
    let side = u16::try_from(size)?;

    let rows = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(side),
        Constraint::Min(1),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(side),
        Constraint::Min(1),
    ])
    .split(rows)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before closures
    let highlighted = app.animation_manager.highlighted();
    let wall_coords = if app.scene == Scene::Generation {
        animation::transform_maze_to_screen_coords(
            stage.grid.cells().filter(|cell| !highlighted.contains(cell)),
            size,
        )?
    } else {
        animation::transform_maze_to_screen_coords(stage.grid.walls(), size)?
    };

    let mut overlays = Vec::new();
    match app.scene {
        Scene::Quantum => {
            let progress = app.animation_manager.current_index;
            for (path, color) in stage.samples.iter().zip(ROUTE_COLORS.iter().cycle()) {
                let coords = animation::transform_maze_to_screen_coords(
                    path.iter().take(progress).copied(),
                    size,
                )?;
                overlays.push((coords, *color));
            }
        }
        Scene::Classical | Scene::Solution => {
            let coords = animation::transform_maze_to_screen_coords(
                app.animation_manager.current_path.iter().copied(),
                size,
            )?;
            overlays.push((coords, Color::Red));
        }
        Scene::Generation | Scene::Tour => {}
    }

    let x_bound = f64::from(rounded_div::i32(space.width.into(), 2));
    let y_bound = f64::from(rounded_div::i32(space.height.into(), 2));

    let maze = Canvas::default()
        .x_bounds([-x_bound, x_bound])
        .y_bounds([-y_bound, y_bound])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
        });
    frame.render_widget(maze, space);

    for (coords, color) in &overlays {
        let solution = Canvas::default()
            .x_bounds([-x_bound, x_bound])
            .y_bounds([-y_bound, y_bound])
            .marker(Marker::Dot)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            });
        frame.render_widget(solution, space);
    }

    Ok(())
}

/// Builds the canvas segments of a route.
fn route_lines(tour: &Tour, route: &[usize], color: Color) -> Vec<CanvasLine> {
    route
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some((tour.cities().get(*from)?, tour.cities().get(*to)?)),
            _ => None,
        })
        .map(|(from, to)| CanvasLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
        })
        .collect()
}

/// Draws the route sampling scene for the current frame.
///
/// Classical candidates appear one per frame, then the best of them is held, and finally every
/// quantum candidate is drawn at once with the best of those on top.
fn tour_canvas(app: &App, frame: &mut Frame, area: Rect) -> Result<()> {
    let stage = &app.stage;
    let picture = TourFrame::at(
        app.animation_manager.current_index,
        stage.classical_routes.routes.len(),
    );

    let lines = match picture {
        TourFrame::Candidate(idx) => {
            let route = stage
                .classical_routes
                .routes
                .get(idx)
                .ok_or_eyre("failed to retrieve classical candidate route")?;
            route_lines(&stage.tour, route, Color::Red)
        }
        TourFrame::ClassicalBest => {
            let route = stage
                .classical_routes
                .best_route()
                .ok_or_eyre("failed to retrieve best classical route")?;
            route_lines(&stage.tour, route, Color::Green)
        }
        TourFrame::QuantumAll => {
            let best = stage
                .quantum_routes
                .best_route()
                .ok_or_eyre("failed to retrieve best quantum route")?;
            stage
                .quantum_routes
                .routes
                .iter()
                .flat_map(|route| route_lines(&stage.tour, route, Color::Blue))
                .chain(route_lines(&stage.tour, best, Color::Green))
                .collect()
        }
    };

    let start = stage
        .tour
        .cities()
        .first()
        .copied()
        .ok_or_eyre("failed to retrieve tour start")?;

    let canvas = Canvas::default()
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Color::Green),
        )
        .x_bounds([X_RANGE.0 - 0.5, X_RANGE.1 + 0.5])
        .y_bounds([Y_RANGE.0 - 0.5, Y_RANGE.1 + 0.5])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for line in &lines {
                ctx.draw(line);
            }
            ctx.draw(&Points {
                coords: stage.tour.cities(),
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &[start],
                color: Color::Yellow,
            });
        });
    frame.render_widget(canvas, area);

    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;

    /// Creates a test app with a fixed seed and a small maze.
    fn create_test_app() -> App {
        App::new(Config {
            size: 11,
            seed: Some(2),
            cities: 8,
            ..Config::default()
        })
        .expect("failed to create test app")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Draws the app once and reports whether rendering succeeded.
    fn draw_once(app: &mut App, terminal: &mut Terminal<TestBackend>) {
        let result = terminal.draw(|frame| {
            draw(app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing should succeed");
    }

    #[test]
    fn test_draw_menus() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        for screen in [
            Screen::MainMenu(MainMenuItem::Play),
            Screen::MainMenu(MainMenuItem::Options),
            Screen::MainMenu(MainMenuItem::Quit),
            Screen::OptionsMenu(OptionsMenuItem::Scene),
            Screen::OptionsMenu(OptionsMenuItem::Back),
        ] {
            app.screen = screen;
            draw_once(&mut app, &mut terminal);
        }
    }

    #[test]
    fn test_draw_scene_menu_sets_viewport_height() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::SceneMenu;
        app.viewport_scene = Some(Scene::Quantum);

        draw_once(&mut app, &mut terminal);

        assert!(app.viewport_height > 0);
    }

    #[test]
    fn test_scene_menu_without_cursor_fails() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.viewport_scene = None;

        let result = terminal.draw(|frame| {
            assert!(
                scene_menu(&mut app, frame).is_err(),
                "scene menu should fail without a cursor-selected scene"
            );
        });

        assert!(
            result.is_ok(),
            "terminal drawing should succeed even if scene_menu fails"
        );
    }

    #[test]
    fn test_draw_every_scene_through_playback() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InScene;

        for scene in Scene::ALL {
            app.scene = scene;
            app.animation_manager.clear();

            draw_once(&mut app, &mut terminal);
            assert!(!app.animation_manager.steps.is_empty(), "{scene} has steps");

            for _ in 0..app.animation_manager.steps.len() {
                app.animation_manager.advance();
                draw_once(&mut app, &mut terminal);
            }
        }
    }

    #[test]
    fn test_maze_scene_draws_walls() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InScene;
        app.scene = Scene::Solution;

        draw_once(&mut app, &mut terminal);

        let buffer = terminal.backend().buffer();
        assert!(
            buffer.content().iter().any(|cell| cell.symbol() == DOT),
            "walls should be drawn as dots"
        );
    }

    #[test]
    fn test_route_lines_follow_route() {
        let tour = Tour::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (0.0, 0.0)])
            .expect("valid tour");

        let lines = route_lines(&tour, &[0, 1, 2, 3], Color::Red);

        assert_eq!(lines.len(), 3);
        assert!(lines
            .first()
            .is_some_and(|line| line.x2 > 0.5 && line.y2 > 0.5));
    }
}
