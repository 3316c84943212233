//! Flight model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored flight row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flight {
    pub id: u64,
    pub source_id: u64,
    pub destination_id: u64,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    pub aircraft_id: u64,
}

/// A flight joined with the names of everything it refers to, as shown in
/// the flight browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightListing {
    pub id: u64,
    pub departure_time: Timestamp,
    pub arrival_time: Timestamp,
    /// `None` when the referenced row is missing (only possible in databases
    /// written without foreign key enforcement)
    pub source: Option<String>,
    pub destination: Option<String>,
    pub aircraft: Option<String>,
    /// Assigned pilots as "name surname", ordered by pilot ID
    pub pilots: Vec<String>,
}

/// A pilot-to-flight link in `pilot_flights`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Assignment {
    pub pilot_id: u64,
    pub flight_id: u64,
}
