use std::path::PathBuf;

use flightdeck_core::{
    editor::PilotChanges,
    params::{FlightParams, NewAircraft, NewDestination, NewPilot},
    Database,
};
use jiff::{civil::date, Timestamp};
use tempfile::TempDir;

/// Helper function to create a database file in a fresh temporary directory
pub fn create_test_db() -> (TempDir, PathBuf, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("flights.db");
    let db = Database::new(&db_path).expect("Failed to create test database");
    (temp_dir, db_path, db)
}

/// Adds destinations 1-2, aircraft 1 and pilots 1-`pilots`.
pub fn seed(db: &mut Database, pilots: usize) {
    for (name, code) in [("Heathrow", "LHR"), ("Schiphol", "AMS")] {
        db.add_destination(&NewDestination {
            name: name.to_string(),
            code: code.to_string(),
            latitude: 50.0,
            longitude: 0.0,
        })
        .expect("Failed to add destination");
    }
    db.add_aircraft(&NewAircraft {
        name: "A320".to_string(),
    })
    .expect("Failed to add aircraft");
    for i in 1..=pilots {
        db.add_pilot(&NewPilot {
            name: format!("Pilot{i}"),
            surname: "Test".to_string(),
            date_joined: date(2020, 1, 1),
        })
        .expect("Failed to add pilot");
    }
}

pub fn add_flight(db: &mut Database, departure_ms: i64, arrival_ms: i64, pilots: &[u64]) -> u64 {
    let params = FlightParams {
        source_id: 1,
        destination_id: 2,
        departure_time: Timestamp::from_millisecond(departure_ms).expect("valid timestamp"),
        arrival_time: Timestamp::from_millisecond(arrival_ms).expect("valid timestamp"),
        aircraft_id: 1,
    };
    let changes = PilotChanges {
        added: pilots.iter().copied().collect(),
        removed: Default::default(),
    };
    db.save_flight(None, &params, &changes)
        .expect("Failed to save flight")
}
