//! This crate contains the source code for the binary of the quantum maze scenes.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use quantum_maze::{config::Config, logging, report, App};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }

    if config.print {
        println!("{}", report(&config)?);
        return Ok(());
    }

    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
