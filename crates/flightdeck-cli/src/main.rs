//! Flightdeck CLI Application
//!
//! Interactive terminal menus for the flightdeck airline scheduler, plus
//! `check` and `stats` reports for scripting.

mod args;
mod console;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use console::TerminalConsole;
use flightdeck_core::SessionBuilder;
use jiff::Timestamp;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = args.settings();
    let Args {
        database_file,
        no_color,
        command,
        ..
    } = args;

    let builder = SessionBuilder::new()
        .with_database_path(database_file)
        .with_settings(settings);
    let renderer = TerminalRenderer::new(!no_color);

    info!("Flightdeck started");

    match command {
        Some(Check { json }) => {
            let db = builder.open_database().context("Failed to open database")?;
            let report = db
                .integrity_report()
                .context("Failed to check for errors")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                renderer.report(&report.to_string())?;
            }
            Ok(())
        }
        Some(Stats { json }) => {
            let db = builder.open_database().context("Failed to open database")?;
            let statistics = db
                .statistics(Timestamp::now())
                .context("Failed to compute statistics")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&statistics)?);
            } else {
                renderer.report(&statistics.to_string())?;
            }
            Ok(())
        }
        None => {
            let mut session = builder.build().context("Failed to initialize session")?;
            let mut console = TerminalConsole::new(renderer);
            let end = session
                .run(&mut console)
                .context("Session ended without quitting")?;
            info!("Flightdeck finished: {end:?}");
            Ok(())
        }
    }
}
