//! Maze generation and path-finding engine with an animated terminal front end.
//!
//! The engine carves perfect mazes with a randomized depth-first search, optionally opens extra
//! walls as false paths, and solves the result three ways: a depth-first search that records its
//! discovery order, a breadth-first search for the shortest route, and a sampler that collects
//! several distinct simple routes. A small route sampling experiment over random cities rounds out
//! the scenes the terminal interface plays back.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod config;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod solver;
pub mod tour;

mod animation;
mod app;
mod events;
mod scene;
mod types;
mod ui;

pub use app::App;
pub use scene::report;
