//! Data models for flights and the records they refer to.
//!
//! Display implementations live in [`crate::display`]; the models here only
//! carry data and, for pilots, aircraft and destinations, the [`Record`]
//! contract that lets filters and screens treat the three kinds uniformly.
//!
//! # Examples
//!
//! ```rust
//! use flightdeck_core::models::{Aircraft, Record};
//!
//! let aircraft = Aircraft {
//!     id: 3,
//!     name: "Boeing 737".to_string(),
//! };
//! assert_eq!(aircraft.label(), "Boeing 737");
//! assert_eq!(Aircraft::HEADERS, &["ID", "Name"]);
//! ```

pub mod flight;
pub mod records;
pub mod reports;


pub use flight::{Assignment, Flight, FlightListing};
pub use records::{Aircraft, Destination, Pilot, Record};
pub use reports::{
    AircraftStatistics, DestinationStatistics, FlightStatistics, IntegrityReport,
    PilotStatistics, Ranked, Statistics,
};
