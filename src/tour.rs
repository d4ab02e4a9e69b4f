//! Traveling-salesperson route sampling.
//!
//! A [`Tour`] is a set of cities that share a start and end point. Routes are sampled as random
//! permutations of the intermediate cities, and the shortest sample is reported as the "optimal"
//! one. This is a brute-force comparison over a handful of samples, not a solver.

use color_eyre::eyre::{ensure, Result};
use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

/// Position the tour starts and ends at.
pub const START_POINT: (f64, f64) = (-4.0, 0.0);

/// Horizontal range intermediate cities are spread over.
pub const X_RANGE: (f64, f64) = (-5.5, 5.5);

/// Vertical range intermediate cities are spread over.
pub const Y_RANGE: (f64, f64) = (-3.0, 3.0);

/// Visiting order over city indices, fixed at both ends.
pub type Route = Vec<usize>;

/// Candidate routes drawn from a tour together with the shortest one among them.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSample {
    /// Sampled routes, in the order they were drawn.
    pub routes: Vec<Route>,
    /// Index into [`routes`](RouteSample::routes) of the shortest route, first one on ties.
    pub best: usize,
}

impl RouteSample {
    /// Returns the shortest sampled route.
    #[must_use]
    pub fn best_route(&self) -> Option<&Route> {
        self.routes.get(self.best)
    }
}

/// Cities of a round trip.
///
/// The first and the last city are the same point. The duplicate lets every route be written
/// as a path from index 0 to the last index.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    /// City positions, start first and end last.
    cities: Vec<(f64, f64)>,
}

impl Tour {
    /// Builds a tour from explicit positions.
    ///
    /// # Errors
    ///
    /// This function returns an error if fewer than three positions are given, since a route
    /// needs at least one intermediate city.
    pub fn new(cities: Vec<(f64, f64)>) -> Result<Self> {
        ensure!(
            cities.len() >= 3,
            "a tour needs at least 3 cities, got {}",
            cities.len()
        );

        Ok(Self { cities })
    }

    /// Builds a tour of `count` cities with random intermediate positions.
    ///
    /// The start and end are both [`START_POINT`]; the `count - 2` cities in between are drawn
    /// uniformly from [`X_RANGE`] by [`Y_RANGE`].
    ///
    /// # Errors
    ///
    /// This function returns an error if `count` is below three.
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Self> {
        ensure!(count >= 3, "a tour needs at least 3 cities, got {count}");

        let mut cities = Vec::with_capacity(count);
        cities.push(START_POINT);
        cities.extend((0..count - 2).map(|_| {
            (
                rng.gen_range(X_RANGE.0..=X_RANGE.1),
                rng.gen_range(Y_RANGE.0..=Y_RANGE.1),
            )
        }));
        cities.push(START_POINT);

        Self::new(cities)
    }

    /// Returns the city positions.
    #[must_use]
    pub fn cities(&self) -> &[(f64, f64)] {
        &self.cities
    }

    /// Draws one route: the start, a shuffle of the intermediate cities, then the end.
    pub fn sample_route<R: Rng + ?Sized>(&self, rng: &mut R) -> Route {
        let last = self.cities.len() - 1;
        let mut route: Route = (1..last).collect();
        route.shuffle(rng);
        route.insert(0, 0);
        route.push(last);

        route
    }

    /// Sums the straight-line distances between consecutive cities of a route.
    ///
    /// Indices outside the tour are skipped.
    #[must_use]
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        route
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some((self.cities.get(*from)?, self.cities.get(*to)?)),
                _ => None,
            })
            .map(|(from, to)| (to.0 - from.0).hypot(to.1 - from.1))
            .sum()
    }

    /// Draws `count` routes and picks the shortest.
    ///
    /// # Errors
    ///
    /// This function returns an error if `count` is zero.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<RouteSample> {
        ensure!(count > 0, "at least one route must be sampled");

        let routes: Vec<Route> = (0..count).map(|_| self.sample_route(rng)).collect();
        let best = routes
            .iter()
            .map(|route| self.route_distance(route))
            .enumerate()
            .fold((0, f64::INFINITY), |(best, shortest), (idx, distance)| {
                if distance < shortest {
                    (idx, distance)
                } else {
                    (best, shortest)
                }
            })
            .0;

        debug!(count, best, "sampled tour routes");

        Ok(RouteSample { routes, best })
    }
}
