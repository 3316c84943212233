//! Save-time checks for a flight draft.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a draft cannot be saved. The editor shows the message and keeps
/// every field as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Some data hasn't been filled in")]
    Incomplete,
    #[error("No pilots assigned to flight")]
    NoPilots,
    #[error("Source and destination are the same airport")]
    SameAirport,
    /// Arrival before departure, or equal to it under [`TimeOrdering::Strict`]
    #[error("Arrival time is before departure time - no time travelling allowed")]
    TimeTravel,
}

/// How arrival must relate to departure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOrdering {
    /// Arrival strictly after departure
    #[default]
    Strict,
    /// Arrival no earlier than departure; zero-length flights pass
    NonStrict,
}

/// Policy knobs applied by [`crate::editor::FlightEditor::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRules {
    pub time_ordering: TimeOrdering,
    /// Permit flights whose source and destination are the same
    pub allow_same_airport: bool,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            time_ordering: TimeOrdering::Strict,
            allow_same_airport: false,
        }
    }
}
