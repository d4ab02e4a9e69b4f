//! Scene catalogue and the algorithm output the scenes play back.

use std::fmt;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use tracing::info;

use crate::{
    animation::AnimationStep,
    config::Config,
    generator::{self, ROOT},
    grid::{Cell, Grid, Path},
    solver::{self, Exploration},
    tour::{RouteSample, Tour},
};

/// Frames the tick-driven scenes hold their final pictures for.
pub(crate) const HOLD_FRAMES: usize = 5;

/// Scenes the interface can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scene {
    /// Carving of the perfect maze followed by the false paths.
    Generation,
    /// Depth-first discovery order followed by the route it found.
    Classical,
    /// Breadth-first shortest route.
    Solution,
    /// Several routes drawn side by side.
    Quantum,
    /// Route sampling one candidate at a time against many at once.
    Tour,
}

impl Scene {
    /// Every scene, in menu order.
    pub(crate) const ALL: [Self; 5] = [
        Self::Generation,
        Self::Classical,
        Self::Solution,
        Self::Quantum,
        Self::Tour,
    ];

    /// Returns the title shown for the scene.
    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Generation => "Maze generation",
            Self::Classical => "Classical search",
            Self::Solution => "Shortest route",
            Self::Quantum => "Quantum routes",
            Self::Tour => "Traveling salesperson",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.title())
    }
}

/// Algorithm output shared by every scene.
///
/// A stage is derived entirely from a configuration and a seed: one [`StdRng`] seeded once is
/// threaded through maze generation, false-path injection and tour sampling, in that order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Stage {
    /// Seed the stage was built from.
    pub seed: u64,
    /// Maze after false-path injection.
    pub grid: Grid,
    /// Cells opened while carving the perfect maze, in order.
    pub carved: Vec<Cell>,
    /// Walls opened as false paths, in order.
    pub false_paths: Vec<Cell>,
    /// Route start.
    pub start: Cell,
    /// Route end.
    pub end: Cell,
    /// Depth-first solver output.
    pub exploration: Exploration,
    /// Breadth-first shortest route.
    pub shortest: Path,
    /// Routes collected by the multi-path sampler.
    pub samples: Vec<Path>,
    /// Cities of the route sampling scene.
    pub tour: Tour,
    /// Routes tried one at a time.
    pub classical_routes: RouteSample,
    /// Routes tried at once.
    pub quantum_routes: RouteSample,
}

impl Stage {
    /// Builds every scene's data for the given seed.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration holds values the generator or the
    /// route sampler reject.
    pub(crate) fn build(config: &Config, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);

        let generator::Generation { mut grid, carved } = generator::generate(config.size, &mut rng)?;
        let false_paths =
            generator::add_false_paths(&mut grid, config.false_path_probability, &mut rng)?;

        let start = ROOT;
        let end = Cell::new(config.size - 2, config.size - 2);

        let exploration = solver::explore(&grid, start, end);
        let shortest = solver::shortest_path(&grid, start, end);
        let samples = solver::sample_paths(&grid, start, end, config.max_paths);

        let tour = Tour::random(config.cities, &mut rng)?;
        let classical_routes = tour.sample(config.classical_routes, &mut rng)?;
        let quantum_routes = tour.sample(config.quantum_routes, &mut rng)?;

        info!(
            seed,
            size = config.size,
            false_paths = false_paths.len(),
            shortest = shortest.len(),
            samples = samples.len(),
            "built stage"
        );

        Ok(Self {
            seed,
            grid,
            carved,
            false_paths,
            start,
            end,
            exploration,
            shortest,
            samples,
            tour,
            classical_routes,
            quantum_routes,
        })
    }

    /// Returns the longest sampled route length, which is how many frames it takes to reveal
    /// every sampled route.
    pub(crate) fn longest_sample(&self) -> usize {
        self.samples.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Converts the stage into the animation steps of a scene.
    ///
    /// Cell scenes add and clear highlights; the route scenes only tick and read their picture
    /// off the frame counter.
    pub(crate) fn animation_steps(&self, scene: Scene) -> Vec<AnimationStep> {
        match scene {
            Scene::Generation => self
                .carved
                .iter()
                .chain(&self.false_paths)
                .copied()
                .map(AnimationStep::Add)
                .collect(),
            Scene::Classical => self
                .exploration
                .order
                .iter()
                .copied()
                .map(AnimationStep::Add)
                .chain([AnimationStep::Clear])
                .chain(self.exploration.path.iter().copied().map(AnimationStep::Add))
                .collect(),
            Scene::Solution => self.shortest.iter().copied().map(AnimationStep::Add).collect(),
            Scene::Quantum => vec![AnimationStep::Tick; self.longest_sample() + HOLD_FRAMES],
            Scene::Tour => vec![
                AnimationStep::Tick;
                self.classical_routes.routes.len() + 2 * HOLD_FRAMES
            ],
        }
    }
}

/// Builds the stage for a configuration and renders it as a plain-text report.
///
/// The report starts with the seed, followed by the maze with its shortest route drawn as `*`
/// and a summary of every solver's output.
///
/// # Errors
///
/// This function returns an error if the configuration is invalid.
pub fn report(config: &Config) -> Result<String> {
    config.validate()?;
    let stage = Stage::build(config, config.seed_or_random())?;

    let best_distance = |sample: &RouteSample| {
        sample
            .best_route()
            .map_or(0.0, |route| stage.tour.route_distance(route))
    };

    Ok(format!(
        "seed: {}\n{}\nfalse paths: {}\nshortest route: {} cells\ndepth-first route: {} cells, \
         {} discovered\nsampled routes: {}\nbest route of {} tried one at a time: {:.2}\nbest \
         route of {} tried at once: {:.2}",
        stage.seed,
        stage.grid.render(&stage.shortest),
        stage.false_paths.len(),
        stage.shortest.len(),
        stage.exploration.path.len(),
        stage.exploration.order.len(),
        stage.samples.len(),
        stage.classical_routes.routes.len(),
        best_distance(&stage.classical_routes),
        stage.quantum_routes.routes.len(),
        best_distance(&stage.quantum_routes),
    ))
}

/// What the route sampling scene shows at a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TourFrame {
    /// A single classical candidate route, by index.
    Candidate(usize),
    /// The best classical route.
    ClassicalBest,
    /// Every quantum candidate route together with the best of them.
    QuantumAll,
}

impl TourFrame {
    /// Picks the picture for a frame: each classical candidate for one frame, then the best
    /// classical route and finally all quantum candidates, both held for [`HOLD_FRAMES`].
    pub(crate) const fn at(frame: usize, classical: usize) -> Self {
        if frame < classical {
            Self::Candidate(frame)
        } else if frame < classical + HOLD_FRAMES {
            Self::ClassicalBest
        } else {
            Self::QuantumAll
        }
    }
}
