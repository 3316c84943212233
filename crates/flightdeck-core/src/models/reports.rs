//! Read-only reports over the whole database.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Assignment;

/// Result of the data integrity audit.
///
/// Foreign keys with cascading deletes keep a database written by this
/// application consistent, so every list is normally empty. Databases edited
/// by other tools, or written with foreign keys disabled, can still break
/// the invariants and this is where that shows up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Flights whose arrival is before their departure
    pub reversed_times: Vec<u64>,
    /// Flights referring to an aircraft that does not exist
    pub invalid_aircraft: Vec<u64>,
    /// Flights departing from a destination that does not exist
    pub invalid_sources: Vec<u64>,
    /// Flights arriving at a destination that does not exist
    pub invalid_destinations: Vec<u64>,
    /// Assignments to flights that do not exist
    pub invalid_flight_assignments: Vec<Assignment>,
    /// Assignments of pilots that do not exist
    pub invalid_pilot_assignments: Vec<Assignment>,
    /// Flights with no pilot assigned
    pub unpiloted_flights: Vec<u64>,
}

impl IntegrityReport {
    /// True when no check found anything.
    pub fn is_clean(&self) -> bool {
        self.reversed_times.is_empty()
            && self.invalid_aircraft.is_empty()
            && self.invalid_sources.is_empty()
            && self.invalid_destinations.is_empty()
            && self.invalid_flight_assignments.is_empty()
            && self.invalid_pilot_assignments.is_empty()
            && self.unpiloted_flights.is_empty()
    }
}

/// A record together with the number of flights it takes part in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ranked {
    pub id: u64,
    pub label: String,
    pub flights: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightStatistics {
    pub total: u64,
    /// Arrived before now
    pub completed: u64,
    /// Arriving after now
    pub to_complete: u64,
    /// Departed before now and arriving after now
    pub in_flight: u64,
    pub departed_last_24h: u64,
    pub departing_next_24h: u64,
    pub last_departure: Option<Timestamp>,
    pub last_arrival: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PilotStatistics {
    pub total: u64,
    /// Pilot with the most assignments of all time
    pub busiest: Option<Ranked>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DestinationStatistics {
    pub total: u64,
    /// Most frequent arrival destination of all time
    pub most_popular: Option<Ranked>,
    /// Most frequent arrival destination among flights departing in the
    /// next seven days
    pub most_popular_next_week: Option<Ranked>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AircraftStatistics {
    pub total: u64,
    pub most_used: Option<Ranked>,
}

/// Summary figures relative to a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    /// The instant the relative figures were computed against
    pub now: Timestamp,
    pub flights: FlightStatistics,
    pub pilots: PilotStatistics,
    pub destinations: DestinationStatistics,
    pub aircraft: AircraftStatistics,
}
