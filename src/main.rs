//! This crate contains the source code for the binary of the maze carver.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazecarver::{install_logging, App, Config};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    config.validate()?;
    install_logging(&config.log_dir)?;

    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = app.run(&mut terminal);
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    if let Err(err) = &result {
        tracing::error!(%err, "application exited with an error");
    }

    result
}
