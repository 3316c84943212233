//! Flight CRUD operations, listing and pilot assignment reconciliation.

use std::collections::BTreeSet;

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, params_from_iter, types::Type, OptionalExtension, Row};

use crate::{
    editor::PilotChanges,
    error::{DatabaseResultExt, FlightdeckError, Result},
    filters::FlightQuery,
    models::{Flight, FlightListing},
    params::FlightParams,
};

const SELECT_FLIGHT_SQL: &str = "SELECT id, source_id, destination_id, departure_time, arrival_time, aircraft_id FROM flights WHERE id = ?1";
const INSERT_FLIGHT_SQL: &str = "INSERT INTO flights (source_id, destination_id, departure_time, arrival_time, aircraft_id) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_FLIGHT_SQL: &str = "UPDATE flights SET source_id = ?1, destination_id = ?2, departure_time = ?3, arrival_time = ?4, aircraft_id = ?5 WHERE id = ?6";
const DELETE_FLIGHT_SQL: &str = "DELETE FROM flights WHERE id = ?1";
const SELECT_FLIGHT_PILOT_IDS_SQL: &str = "SELECT pilot_id FROM pilot_flights WHERE flight_id = ?1";
const SELECT_FLIGHT_PILOT_NAMES_SQL: &str = "SELECT p.name, p.surname FROM pilot_flights pf JOIN pilots p ON p.id = pf.pilot_id WHERE pf.flight_id = ?1 ORDER BY p.id";
const INSERT_ASSIGNMENT_SQL: &str = "INSERT INTO pilot_flights (pilot_id, flight_id) VALUES (?1, ?2)";
const DELETE_ASSIGNMENT_SQL: &str = "DELETE FROM pilot_flights WHERE pilot_id = ?1 AND flight_id = ?2";

// Filters are written against bare `flights` columns, so they go in an inner
// query and the joins for display names wrap it. Equal departure times fall
// back to ascending ID in both queries so pages stay stable.
const FLIGHT_COLUMNS: &str =
    "id, source_id, destination_id, departure_time, arrival_time, aircraft_id";
const LISTING_JOINS: &str = "LEFT JOIN destinations s ON s.id = f.source_id \
     LEFT JOIN destinations d ON d.id = f.destination_id \
     LEFT JOIN aircraft a ON a.id = f.aircraft_id";

fn timestamp_at(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    let millis: i64 = row.get(index)?;
    Timestamp::from_millisecond(millis)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(e)))
}

impl super::Database {
    /// Helper function to construct a Flight from a database row
    fn build_flight_from_row(row: &Row<'_>) -> rusqlite::Result<Flight> {
        Ok(Flight {
            id: row.get::<_, i64>(0)? as u64,
            source_id: row.get::<_, i64>(1)? as u64,
            destination_id: row.get::<_, i64>(2)? as u64,
            departure_time: timestamp_at(row, 3)?,
            arrival_time: timestamp_at(row, 4)?,
            aircraft_id: row.get::<_, i64>(5)? as u64,
        })
    }

    /// Retrieves a flight by its ID.
    pub fn get_flight(&self, id: u64) -> Result<Option<Flight>> {
        self.connection
            .query_row(SELECT_FLIGHT_SQL, params![id as i64], Self::build_flight_from_row)
            .optional()
            .db_context("Failed to query flight")
    }

    /// IDs of the pilots currently assigned to a flight.
    pub fn flight_pilot_ids(&self, flight_id: u64) -> Result<BTreeSet<u64>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_FLIGHT_PILOT_IDS_SQL)
            .db_context("Failed to prepare query")?;
        let ids = stmt
            .query_map(params![flight_id as i64], |row| Ok(row.get::<_, i64>(0)? as u64))
            .db_context("Failed to query flight pilots")?
            .collect::<std::result::Result<BTreeSet<_>, _>>()
            .db_context("Failed to fetch flight pilots")?;
        Ok(ids)
    }

    fn flight_pilot_names(&self, flight_id: u64) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_FLIGHT_PILOT_NAMES_SQL)
            .db_context("Failed to prepare query")?;
        let names = stmt
            .query_map(params![flight_id as i64], |row| {
                Ok(format!("{} {}", row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .db_context("Failed to query pilot names")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch pilot names")?;
        Ok(names)
    }

    /// Lists flights matching `query`, joined with display names, bounded by
    /// `limit` and `offset`.
    pub fn search_flights(
        &self,
        query: &FlightQuery,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<FlightListing>> {
        let sql = format!(
            "SELECT f.id, f.departure_time, f.arrival_time, s.name, d.name, a.name \
             FROM (SELECT {FLIGHT_COLUMNS} FROM flights {where_clause} {order}, id LIMIT ? OFFSET ?) AS f \
             {LISTING_JOINS} {order}, f.id",
            where_clause = query.where_clause,
            order = query.order_clause,
        );
        debug!("Flight search: {sql} {:?} limit={limit} offset={offset}", query.params);

        let bound = query
            .params
            .iter()
            .copied()
            .chain([limit as i64, offset as i64]);

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare flight search")?;
        let mut listings = stmt
            .query_map(params_from_iter(bound), |row| {
                Ok(FlightListing {
                    id: row.get::<_, i64>(0)? as u64,
                    departure_time: timestamp_at(row, 1)?,
                    arrival_time: timestamp_at(row, 2)?,
                    source: row.get(3)?,
                    destination: row.get(4)?,
                    aircraft: row.get(5)?,
                    pilots: Vec::new(),
                })
            })
            .db_context("Failed to search flights")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch flights")?;

        for listing in &mut listings {
            listing.pilots = self.flight_pilot_names(listing.id)?;
        }
        Ok(listings)
    }

    /// Writes a flight and reconciles its pilot assignments in one savepoint.
    ///
    /// With `id` set the existing row is updated, otherwise a new row is
    /// inserted. Only the assignments named in `changes` are touched.
    /// Returns the flight's ID.
    pub fn save_flight(
        &mut self,
        id: Option<u64>,
        flight: &FlightParams,
        changes: &PilotChanges,
    ) -> Result<u64> {
        let sp = self
            .connection
            .savepoint()
            .db_context("Failed to begin savepoint")?;

        let flight_id = match id {
            None => {
                sp.execute(
                    INSERT_FLIGHT_SQL,
                    params![
                        flight.source_id as i64,
                        flight.destination_id as i64,
                        flight.departure_time.as_millisecond(),
                        flight.arrival_time.as_millisecond(),
                        flight.aircraft_id as i64,
                    ],
                )
                .db_context("Failed to insert flight")?;
                sp.last_insert_rowid() as u64
            }
            Some(id) => {
                let updated = sp
                    .execute(
                        UPDATE_FLIGHT_SQL,
                        params![
                            flight.source_id as i64,
                            flight.destination_id as i64,
                            flight.departure_time.as_millisecond(),
                            flight.arrival_time.as_millisecond(),
                            flight.aircraft_id as i64,
                            id as i64,
                        ],
                    )
                    .db_context("Failed to update flight")?;
                if updated == 0 {
                    return Err(FlightdeckError::FlightNotFound { id });
                }
                id
            }
        };

        for &pilot_id in &changes.added {
            sp.execute(INSERT_ASSIGNMENT_SQL, params![pilot_id as i64, flight_id as i64])
                .db_context("Failed to assign pilot")?;
        }
        for &pilot_id in &changes.removed {
            sp.execute(DELETE_ASSIGNMENT_SQL, params![pilot_id as i64, flight_id as i64])
                .db_context("Failed to unassign pilot")?;
        }

        sp.commit().db_context("Failed to release savepoint")?;

        info!(
            "Saved flight {flight_id} (pilots added {:?}, removed {:?})",
            changes.added, changes.removed
        );
        Ok(flight_id)
    }

    /// Deletes a flight; its pilot assignments go with it. Returns false if
    /// there was no such flight.
    pub fn delete_flight(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_FLIGHT_SQL, params![id as i64])
            .db_context("Failed to delete flight")?;
        if deleted > 0 {
            info!("Deleted flight {id}");
        }
        Ok(deleted > 0)
    }
}
