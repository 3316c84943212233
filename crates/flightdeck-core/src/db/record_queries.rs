//! Pilot, aircraft and destination operations.
//!
//! Reads are generic over [`Record`]; inserts and deletes are per kind since
//! each has its own columns and its own consequences for flights.

use log::info;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, FlightdeckError, Result},
    models::{records::date_to_millis, Aircraft, Destination, Pilot, Record},
    params::{NewAircraft, NewDestination, NewPilot},
};

const INSERT_PILOT_SQL: &str = "INSERT INTO pilots (name, surname, date_joined) VALUES (?1, ?2, ?3)";
const INSERT_AIRCRAFT_SQL: &str = "INSERT INTO aircraft (name) VALUES (?1)";
const INSERT_DESTINATION_SQL: &str = "INSERT INTO destinations (name, code, latitude, longitude) VALUES (?1, ?2, ?3, ?4)";
const SELECT_DESTINATIONS_BY_CODE_SQL: &str = "SELECT id, name, code, latitude, longitude FROM destinations WHERE code = ?1 ORDER BY id";
const SELECT_FLIGHTS_BY_AIRCRAFT_SQL: &str = "SELECT id FROM flights WHERE aircraft_id = ?1 ORDER BY id";
const SELECT_FLIGHTS_BY_DESTINATION_SQL: &str = "SELECT id FROM flights WHERE source_id = ?1 OR destination_id = ?1 ORDER BY id";
// Flights whose only assignment is this pilot.
const SELECT_SOLE_PILOT_FLIGHTS_SQL: &str = "SELECT flight_id FROM pilot_flights \
     WHERE flight_id IN (SELECT flight_id FROM pilot_flights WHERE pilot_id = ?1) \
     GROUP BY flight_id HAVING COUNT(*) = 1 ORDER BY flight_id";
const DELETE_PILOT_SQL: &str = "DELETE FROM pilots WHERE id = ?1";
const DELETE_AIRCRAFT_SQL: &str = "DELETE FROM aircraft WHERE id = ?1";
const DELETE_DESTINATION_SQL: &str = "DELETE FROM destinations WHERE id = ?1";
const DELETE_FLIGHT_SQL: &str = "DELETE FROM flights WHERE id = ?1";

/// Longest destination code accepted.
pub const MAX_CODE_LENGTH: usize = 4;

impl super::Database {
    /// Every record of one kind, by ascending ID.
    pub fn list_records<R: Record>(&self) -> Result<Vec<R>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", R::COLUMNS, R::TABLE);
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let records = stmt
            .query_map([], R::from_row)
            .db_context("Failed to query records")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch records")?;
        Ok(records)
    }

    pub fn get_record<R: Record>(&self, id: u64) -> Result<Option<R>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", R::COLUMNS, R::TABLE);
        self.connection
            .query_row(&sql, params![id as i64], R::from_row)
            .optional()
            .db_context("Failed to query record")
    }

    pub fn record_exists<R: Record>(&self, id: u64) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", R::TABLE);
        self.connection
            .query_row(&sql, params![id as i64], |row| row.get(0))
            .db_context("Failed to check record existence")
    }

    pub fn add_pilot(&mut self, pilot: &NewPilot) -> Result<Pilot> {
        let joined = date_to_millis(pilot.date_joined).map_err(|e| {
            FlightdeckError::invalid_input("date_joined").with_reason(e.to_string())
        })?;
        self.connection
            .execute(INSERT_PILOT_SQL, params![pilot.name, pilot.surname, joined])
            .db_context("Failed to insert pilot")?;
        let id = self.connection.last_insert_rowid() as u64;

        info!("Added pilot {id}: {} {}", pilot.name, pilot.surname);
        Ok(Pilot {
            id,
            name: pilot.name.clone(),
            surname: pilot.surname.clone(),
            date_joined: pilot.date_joined,
        })
    }

    pub fn add_aircraft(&mut self, aircraft: &NewAircraft) -> Result<Aircraft> {
        self.connection
            .execute(INSERT_AIRCRAFT_SQL, params![aircraft.name])
            .db_context("Failed to insert aircraft")?;
        let id = self.connection.last_insert_rowid() as u64;

        info!("Added aircraft {id}: {}", aircraft.name);
        Ok(Aircraft {
            id,
            name: aircraft.name.clone(),
        })
    }

    /// Adds a destination with its code upper-cased.
    pub fn add_destination(&mut self, destination: &NewDestination) -> Result<Destination> {
        // Upper-casing can lengthen a code, so the stored form is measured
        let code = destination.code.to_uppercase();
        if !(1..=MAX_CODE_LENGTH).contains(&code.chars().count()) {
            return Err(FlightdeckError::invalid_input("code")
                .with_reason("Code must be 1 - 4 characters"));
        }
        if !(-90.0..=90.0).contains(&destination.latitude) {
            return Err(FlightdeckError::invalid_input("latitude")
                .with_reason("Latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&destination.longitude) {
            return Err(FlightdeckError::invalid_input("longitude")
                .with_reason("Longitude must be between -180 and 180"));
        }

        self.connection
            .execute(
                INSERT_DESTINATION_SQL,
                params![
                    destination.name,
                    code,
                    destination.latitude,
                    destination.longitude
                ],
            )
            .db_context("Failed to insert destination")?;
        let id = self.connection.last_insert_rowid() as u64;

        info!("Added destination {id}: {} ({code})", destination.name);
        Ok(Destination {
            id,
            name: destination.name.clone(),
            code,
            latitude: destination.latitude,
            longitude: destination.longitude,
        })
    }

    /// Destinations whose code matches, ignoring case.
    pub fn find_destinations_by_code(&self, code: &str) -> Result<Vec<Destination>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_DESTINATIONS_BY_CODE_SQL)
            .db_context("Failed to prepare query")?;
        let found = stmt
            .query_map(params![code.trim().to_uppercase()], Destination::from_row)
            .db_context("Failed to query destinations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch destinations")?;
        Ok(found)
    }

    fn flight_ids(&self, sql: &str, id: u64) -> Result<Vec<u64>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;
        let ids = stmt
            .query_map(params![id as i64], |row| Ok(row.get::<_, i64>(0)? as u64))
            .db_context("Failed to query flights")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch flights")?;
        Ok(ids)
    }

    /// Flights flown by an aircraft; deleting the aircraft deletes them.
    pub fn flights_using_aircraft(&self, aircraft_id: u64) -> Result<Vec<u64>> {
        self.flight_ids(SELECT_FLIGHTS_BY_AIRCRAFT_SQL, aircraft_id)
    }

    /// Flights departing from or arriving at a destination; deleting the
    /// destination deletes them.
    pub fn flights_using_destination(&self, destination_id: u64) -> Result<Vec<u64>> {
        self.flight_ids(SELECT_FLIGHTS_BY_DESTINATION_SQL, destination_id)
    }

    /// Flights that would be left with no pilot if this pilot were deleted.
    pub fn flights_only_piloted_by(&self, pilot_id: u64) -> Result<Vec<u64>> {
        self.flight_ids(SELECT_SOLE_PILOT_FLIGHTS_SQL, pilot_id)
    }

    /// Deletes an aircraft and, through the foreign keys, its flights.
    pub fn delete_aircraft(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_AIRCRAFT_SQL, params![id as i64])
            .db_context("Failed to delete aircraft")?;
        if deleted > 0 {
            info!("Deleted aircraft {id}");
        }
        Ok(deleted > 0)
    }

    /// Deletes a destination and every flight from or to it.
    pub fn delete_destination(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_DESTINATION_SQL, params![id as i64])
            .db_context("Failed to delete destination")?;
        if deleted > 0 {
            info!("Deleted destination {id}");
        }
        Ok(deleted > 0)
    }

    /// Deletes a pilot together with the flights it was the only pilot of.
    ///
    /// Returns the IDs of the flights removed. Other flights simply lose the
    /// assignment.
    pub fn delete_pilot(&mut self, id: u64) -> Result<Vec<u64>> {
        let orphaned = self.flights_only_piloted_by(id)?;

        let sp = self
            .connection
            .savepoint()
            .db_context("Failed to begin savepoint")?;
        let deleted = sp
            .execute(DELETE_PILOT_SQL, params![id as i64])
            .db_context("Failed to delete pilot")?;
        if deleted == 0 {
            return Err(FlightdeckError::RecordNotFound {
                kind: Pilot::KIND,
                id,
            });
        }
        for flight_id in &orphaned {
            sp.execute(DELETE_FLIGHT_SQL, params![*flight_id as i64])
                .db_context("Failed to delete unpiloted flight")?;
        }
        sp.commit().db_context("Failed to release savepoint")?;

        info!("Deleted pilot {id} and flights {orphaned:?}");
        Ok(orphaned)
    }
}
