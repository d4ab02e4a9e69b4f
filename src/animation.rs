//! Timed playback of recorded algorithm output.
//!
//! This module contains the animation steps a scene is converted into and the manager that plays
//! them back one frame at a time, along with the coordinate transformation the canvas rendering
//! relies on.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;

use crate::grid::Cell;

/// Animation step types for scene playback.
///
/// This enumeration represents a single frame of a scene. Cell steps edit the set of highlighted
/// cells, while ticks only advance the frame counter for scenes that derive their picture from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationStep {
    /// Highlights a cell.
    Add(Cell),
    /// Removes every highlight.
    Clear,
    /// Advances the frame counter without touching the highlights.
    Tick,
}

/// Animation state manager for scene playback.
///
/// This structure manages the animation state including timing, current step tracking, and the
/// highlighted cells being displayed during playback. When every step has been played, the
/// animation restarts from the beginning.
#[derive(Debug)]
pub(crate) struct AnimationManager {
    /// Steps recorded for the current scene.
    pub steps: Vec<AnimationStep>,
    /// Current step in the animation sequence.
    ///
    /// This field tracks the position in the [`steps`](AnimationManager::steps) vector, which is
    /// also the number of frames played so far.
    pub current_index: usize,
    /// Timestamp of the last animation frame update.
    pub last_update_time: Instant,
    /// Delay between two frames.
    pub frame_delay: Duration,
    /// Highlighted cells, in the order they were added.
    pub current_path: Vec<Cell>,
}

impl AnimationManager {
    /// Creates a new animation manager with no steps.
    pub(crate) fn new(frame_delay: Duration) -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
            frame_delay,
            current_path: Vec::new(),
        }
    }

    /// Replaces the recorded steps and restarts playback.
    pub(crate) fn load(&mut self, steps: Vec<AnimationStep>) {
        self.steps = steps;
        self.reset();
    }

    /// Resets the animation state to the beginning.
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.current_path.clear();
        self.last_update_time = Instant::now();
    }

    /// Clears all animation data and resets state.
    pub(crate) fn clear(&mut self) {
        self.steps.clear();
        self.reset();
    }

    /// Returns the highlighted cells as a set.
    pub(crate) fn highlighted(&self) -> HashSet<Cell> {
        self.current_path.iter().copied().collect()
    }

    /// Updates the animation state based on timing and current progress.
    ///
    /// This method plays the next step once the frame delay has passed since the previous one.
    /// After the last step it restarts the animation instead.
    pub(crate) fn update(&mut self) {
        if self.last_update_time.elapsed() >= self.frame_delay {
            self.last_update_time = Instant::now();
            self.advance();
        }
    }

    /// Plays the next step immediately, or restarts once every step has been played.
    pub(crate) fn advance(&mut self) {
        let Some(step) = self.steps.get(self.current_index).copied() else {
            self.reset();
            return;
        };

        match step {
            AnimationStep::Add(cell) => self.current_path.push(cell),
            AnimationStep::Clear => self.current_path.clear(),
            AnimationStep::Tick => {}
        }

        self.current_index += 1;
    }
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts cells to canvas coordinates centered on the maze using
/// `x = col - (n - 1) / 2` and `y = (n - 1) / 2 - row`, so rows grow downward on screen.
///
/// # Errors
///
/// This function may return errors if a coordinate does not fit the conversion to `f64`.
pub(crate) fn transform_maze_to_screen_coords<I>(cells: I, size: usize) -> Result<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = Cell>,
{
    let half = (f64::from(u16::try_from(size)?) - 1.) / 2.;

    cells
        .into_iter()
        .map(|cell| {
            let screen_x = f64::from(u16::try_from(cell.col)?) - half;
            let screen_y = half - f64::from(u16::try_from(cell.row)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a manager with the given steps and no frame delay.
    fn manager_with(steps: Vec<AnimationStep>) -> AnimationManager {
        let mut manager = AnimationManager::new(Duration::ZERO);
        manager.load(steps);
        manager
    }

    #[test]
    fn test_advance_applies_steps() {
        let first = Cell::new(1, 1);
        let second = Cell::new(1, 2);
        let mut manager = manager_with(vec![
            AnimationStep::Add(first),
            AnimationStep::Add(second),
            AnimationStep::Tick,
        ]);

        manager.advance();
        manager.advance();
        assert_eq!(manager.current_path, vec![first, second]);

        manager.advance();
        assert_eq!(manager.current_path, vec![first, second]);
        assert_eq!(manager.current_index, 3);
    }

    #[test]
    fn test_clear_step_empties_highlights() {
        let mut manager = manager_with(vec![
            AnimationStep::Add(Cell::new(1, 1)),
            AnimationStep::Clear,
        ]);

        manager.advance();
        manager.advance();

        assert!(manager.current_path.is_empty());
        assert!(manager.highlighted().is_empty());
    }

    #[test]
    fn test_advance_restarts_after_last_step() {
        let mut manager = manager_with(vec![AnimationStep::Add(Cell::new(1, 1))]);

        manager.advance();
        manager.advance();

        assert_eq!(manager.current_index, 0);
        assert!(manager.current_path.is_empty());
    }

    #[test]
    fn test_update_respects_frame_delay() {
        let mut manager = AnimationManager::new(Duration::from_secs(3600));
        manager.load(vec![AnimationStep::Add(Cell::new(1, 1))]);

        manager.update();

        assert_eq!(manager.current_index, 0);
    }

    #[test]
    fn test_update_without_delay() {
        let mut manager = manager_with(vec![AnimationStep::Add(Cell::new(1, 1))]);

        manager.update();

        assert_eq!(manager.current_index, 1);
    }

    #[test]
    fn test_clear_drops_steps() {
        let mut manager = manager_with(vec![AnimationStep::Tick]);

        manager.advance();
        manager.clear();

        assert!(manager.steps.is_empty());
        assert_eq!(manager.current_index, 0);
    }

    #[test]
    fn test_transform_maze_to_screen_coords() {
        let coords = transform_maze_to_screen_coords([Cell::new(0, 0), Cell::new(2, 4)], 5)
            .expect("failed to transform coordinates");

        assert_eq!(coords, vec![(-2.0, 2.0), (2.0, 0.0)]);
    }
}
