//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Result};

use crate::grid::{MAX_SIZE, MIN_SIZE};

/// Default delay between animation frames, in milliseconds.
pub const ANIMATION_FRAME_DELAY_MS: u64 = 200;

/// Runtime configuration of the maze scenes.
///
/// Every random choice of a run is derived from [`seed`](Config::seed), so passing the seed a
/// previous run logged reproduces its maze, solutions and tour.
#[derive(Clone, Debug, PartialEq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Side length of the maze; must be odd.
    #[arg(long, default_value_t = 21)]
    pub size: usize,
    /// Seed for every random choice; a random one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Chance of opening each wall that separates two passages after generation.
    #[arg(long, default_value_t = 0.15)]
    pub false_path_probability: f64,
    /// Number of routes the multi-path sampler collects.
    #[arg(long, default_value_t = 4)]
    pub max_paths: usize,
    /// Number of cities in the route sampling scene, start and end included.
    #[arg(long, default_value_t = 20)]
    pub cities: usize,
    /// Number of routes tried one at a time in the route sampling scene.
    #[arg(long, default_value_t = 5)]
    pub classical_routes: usize,
    /// Number of routes tried at once in the route sampling scene.
    #[arg(long, default_value_t = 30)]
    pub quantum_routes: usize,
    /// Delay between animation frames, in milliseconds.
    #[arg(long, default_value_t = ANIMATION_FRAME_DELAY_MS)]
    pub frame_delay_ms: u64,
    /// File to write log output to; logging is disabled without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Print the maze with its shortest route and exit instead of opening the interface.
    #[arg(long)]
    pub print: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 21,
            seed: None,
            false_path_probability: 0.15,
            max_paths: 4,
            cities: 20,
            classical_routes: 5,
            quantum_routes: 30,
            frame_delay_ms: ANIMATION_FRAME_DELAY_MS,
            log_file: None,
            print: false,
        }
    }
}

impl Config {
    /// Checks the configuration values before anything is generated.
    ///
    /// # Errors
    ///
    /// This function returns an error describing the first invalid value it finds.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.size % 2 == 1 && (MIN_SIZE..=MAX_SIZE).contains(&self.size),
            "--size must be an odd number between {MIN_SIZE} and {MAX_SIZE}, got {}",
            self.size
        );
        ensure!(
            (0.0..=1.0).contains(&self.false_path_probability),
            "--false-path-probability must be within [0, 1], got {}",
            self.false_path_probability
        );
        ensure!(self.max_paths > 0, "--max-paths must be at least 1");
        ensure!(
            self.cities >= 3,
            "--cities must be at least 3, got {}",
            self.cities
        );
        ensure!(
            self.classical_routes > 0 && self.quantum_routes > 0,
            "--classical-routes and --quantum-routes must be at least 1"
        );
        ensure!(self.frame_delay_ms > 0, "--frame-delay-ms must be at least 1");

        Ok(())
    }

    /// Returns the configured seed, or a freshly drawn one when none was given.
    #[must_use]
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Returns the animation frame delay as a [`Duration`].
    #[must_use]
    pub const fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
