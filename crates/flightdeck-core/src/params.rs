//! Parameter structures for write operations.
//!
//! These are the inputs to [`crate::Database`] inserts and updates. They are
//! plain data: the record screens and the flight editor gather them at the
//! console, tests build them directly.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Parameters for adding a pilot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPilot {
    pub name: String,
    pub surname: String,
    pub date_joined: Date,
}

/// Parameters for adding an aircraft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAircraft {
    pub name: String,
}

/// Parameters for adding a destination.
///
/// The code is upper-cased on insert; codes longer than four characters and
/// coordinates outside their ranges are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDestination {
    pub name: String,
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A complete, validated flight schedule ready to be written.
///
/// Produced by [`crate::editor::FlightEditor::check`]; the database trusts it
/// and does not repeat the ordering checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightParams {
    pub source_id: u64,
    pub destination_id: u64,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    pub aircraft_id: u64,
}
