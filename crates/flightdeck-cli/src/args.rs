use std::path::PathBuf;

use clap::{builder::TypedValueParser, Parser, Subcommand};
use flightdeck_core::{
    browser::MAX_PAGE_SIZE, paginator::DEFAULT_PAGE_SIZE, ScheduleRules, Settings, TimeOrdering,
};

/// Terminal menus for scheduling airline flights
///
/// Without a subcommand, flightdeck opens the interactive main menu for
/// browsing and editing flights, pilots, aircraft and destinations. Changes
/// are kept in a pending transaction until you save them.
#[derive(Parser)]
#[command(version, about, name = "flightdeck")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/flightdeck/flightdeck.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Flights shown per page in the flight browser
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u16).range(1..=MAX_PAGE_SIZE).map(usize::from))]
    pub page_size: usize,

    /// Accept flights whose arrival time equals their departure time
    #[arg(long)]
    pub allow_zero_duration: bool,

    /// Accept flights whose source and destination are the same
    #[arg(long)]
    pub allow_same_airport: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Non-interactive reports
#[derive(Subcommand)]
pub enum Commands {
    /// Check stored flights for inconsistencies
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show flight, pilot, destination and aircraft statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Session settings selected by the flags.
    pub fn settings(&self) -> Settings {
        let time_ordering = if self.allow_zero_duration {
            TimeOrdering::NonStrict
        } else {
            TimeOrdering::Strict
        };
        Settings {
            page_size: self.page_size,
            rules: ScheduleRules {
                time_ordering,
                allow_same_airport: self.allow_same_airport,
            },
        }
    }
}
