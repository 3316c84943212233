//! Fixtures shared by the unit tests.

use jiff::{civil::date, Timestamp};

use crate::{
    db::Database,
    editor::PilotChanges,
    params::{FlightParams, NewAircraft, NewDestination, NewPilot},
};

/// In-memory database with destinations 1-3 (Heathrow, Schiphol, Changi),
/// aircraft 1-2 (A320, B777) and pilots 1-3 (Earhart, Yeager, Coleman).
pub(crate) fn seeded_db() -> Database {
    let mut db = Database::open_in_memory().expect("Failed to open database");

    for (name, code, latitude, longitude) in [
        ("Heathrow", "lhr", 51.47, -0.45),
        ("Schiphol", "AMS", 52.31, 4.76),
        ("Changi", "SIN", 1.36, 103.99),
    ] {
        db.add_destination(&NewDestination {
            name: name.to_string(),
            code: code.to_string(),
            latitude,
            longitude,
        })
        .expect("Failed to add destination");
    }

    for name in ["A320", "B777"] {
        db.add_aircraft(&NewAircraft {
            name: name.to_string(),
        })
        .expect("Failed to add aircraft");
    }

    for (name, surname) in [("Amelia", "Earhart"), ("Chuck", "Yeager"), ("Bessie", "Coleman")] {
        db.add_pilot(&NewPilot {
            name: name.to_string(),
            surname: surname.to_string(),
            date_joined: date(2020, 1, 1),
        })
        .expect("Failed to add pilot");
    }

    db
}

pub(crate) fn ts(millis: i64) -> Timestamp {
    Timestamp::from_millisecond(millis).expect("timestamp in range")
}

/// Inserts a flight the way the editor's save path does.
pub(crate) fn add_flight(
    db: &mut Database,
    source_id: u64,
    destination_id: u64,
    departure_ms: i64,
    arrival_ms: i64,
    aircraft_id: u64,
    pilots: &[u64],
) -> u64 {
    let params = FlightParams {
        source_id,
        destination_id,
        departure_time: ts(departure_ms),
        arrival_time: ts(arrival_ms),
        aircraft_id,
    };
    let changes = PilotChanges {
        added: pilots.iter().copied().collect(),
        removed: Default::default(),
    };
    db.save_flight(None, &params, &changes)
        .expect("Failed to save flight")
}
