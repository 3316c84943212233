//! Core library for the Flightdeck airline scheduling application.
//!
//! This crate holds everything except the terminal: SQLite storage for
//! flights, pilots, aircraft and destinations; the composable flight filters
//! and paging behind the flight browser; the flight editor with its save-time
//! validation and pilot assignment reconciliation; the record screens; and
//! the integrity audit and statistics reports.
//!
//! # Console Architecture
//!
//! Interactive workflows never touch stdin or stdout. They run against the
//! [`console::Console`] trait through a [`prompt::Prompter`], which owns the
//! numbered-menu protocol and input validation:
//!
//! - **Terminal**: the CLI crate implements [`console::Console`] with styled
//!   output
//! - **Tests**: [`console::ScriptedConsole`] feeds fixed input lines and
//!   records the output
//!
//! # Quick Start
//!
//! ```rust
//! use flightdeck_core::{
//!     db::Database,
//!     filters::FilterSet,
//!     params::{NewAircraft, NewDestination},
//! };
//!
//! let mut db = Database::open_in_memory()?;
//! db.add_aircraft(&NewAircraft {
//!     name: "A320".to_string(),
//! })?;
//! let heathrow = db.add_destination(&NewDestination {
//!     name: "Heathrow".to_string(),
//!     code: "lhr".to_string(),
//!     latitude: 51.47,
//!     longitude: -0.45,
//! })?;
//! assert_eq!(heathrow.code, "LHR");
//!
//! let flights = db.search_flights(&FilterSet::default().build_query(), 5, 0)?;
//! assert!(flights.is_empty());
//! # Ok::<(), flightdeck_core::FlightdeckError>(())
//! ```

pub mod browser;
pub mod console;
pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod filters;
pub mod models;
pub mod paginator;
pub mod params;
pub mod prompt;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use browser::FlightBrowser;
pub use console::{Console, ScriptedConsole};
pub use db::Database;
pub use editor::{FlightEditor, ScheduleRules, TimeOrdering, ValidationError};
pub use error::{FlightdeckError, Result};
pub use filters::{FilterSet, FlightQuery, MembershipSet, TimeRange};
pub use models::{
    Aircraft, Destination, Flight, FlightListing, IntegrityReport, Pilot, Record, Statistics,
};
pub use paginator::Paginator;
pub use session::{Session, SessionBuilder, SessionEnd, Settings};
