//! Integrity audit and summary statistics.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type, OptionalExtension, Params};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        AircraftStatistics, Assignment, DestinationStatistics, FlightStatistics, IntegrityReport,
        PilotStatistics, Ranked, Statistics,
    },
};

const REVERSED_TIMES_SQL: &str =
    "SELECT id FROM flights WHERE departure_time > arrival_time ORDER BY id";
const INVALID_AIRCRAFT_SQL: &str = "SELECT f.id FROM flights f LEFT JOIN aircraft a ON f.aircraft_id = a.id WHERE a.id IS NULL ORDER BY f.id";
const INVALID_SOURCES_SQL: &str = "SELECT f.id FROM flights f LEFT JOIN destinations d ON f.source_id = d.id WHERE d.id IS NULL ORDER BY f.id";
const INVALID_DESTINATIONS_SQL: &str = "SELECT f.id FROM flights f LEFT JOIN destinations d ON f.destination_id = d.id WHERE d.id IS NULL ORDER BY f.id";
const INVALID_FLIGHT_ASSIGNMENTS_SQL: &str = "SELECT pf.pilot_id, pf.flight_id FROM pilot_flights pf LEFT JOIN flights f ON pf.flight_id = f.id WHERE f.id IS NULL ORDER BY pf.pilot_id, pf.flight_id";
const INVALID_PILOT_ASSIGNMENTS_SQL: &str = "SELECT pf.pilot_id, pf.flight_id FROM pilot_flights pf LEFT JOIN pilots p ON pf.pilot_id = p.id WHERE p.id IS NULL ORDER BY pf.flight_id, pf.pilot_id";
const UNPILOTED_FLIGHTS_SQL: &str = "SELECT f.id FROM flights f LEFT JOIN pilot_flights pf ON f.id = pf.flight_id WHERE pf.pilot_id IS NULL ORDER BY f.id";

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

const LAST_DEPARTURE_SQL: &str = "SELECT MAX(departure_time) FROM flights";
const LAST_ARRIVAL_SQL: &str = "SELECT MAX(arrival_time) FROM flights";

// Ties go to the lowest ID. A dangling reference still ranks, labelled by ID.
const BUSIEST_PILOT_SQL: &str = "SELECT pf.pilot_id, p.name || ' ' || p.surname, COUNT(*) AS frequency \
     FROM pilot_flights pf LEFT JOIN pilots p ON p.id = pf.pilot_id \
     GROUP BY pf.pilot_id ORDER BY frequency DESC, pf.pilot_id LIMIT 1";
const POPULAR_DESTINATION_SQL: &str = "SELECT f.destination_id, d.name, COUNT(*) AS frequency \
     FROM flights f LEFT JOIN destinations d ON d.id = f.destination_id \
     GROUP BY f.destination_id ORDER BY frequency DESC, f.destination_id LIMIT 1";
const POPULAR_DESTINATION_BETWEEN_SQL: &str = "SELECT f.destination_id, d.name, COUNT(*) AS frequency \
     FROM flights f LEFT JOIN destinations d ON d.id = f.destination_id \
     WHERE f.departure_time > ?1 AND f.departure_time < ?2 \
     GROUP BY f.destination_id ORDER BY frequency DESC, f.destination_id LIMIT 1";
const MOST_USED_AIRCRAFT_SQL: &str = "SELECT f.aircraft_id, a.name, COUNT(*) AS frequency \
     FROM flights f LEFT JOIN aircraft a ON a.id = f.aircraft_id \
     GROUP BY f.aircraft_id ORDER BY frequency DESC, f.aircraft_id LIMIT 1";

impl super::Database {
    fn ids_for(&self, sql: &str) -> Result<Vec<u64>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare audit query")?;
        let ids = stmt
            .query_map([], |row| Ok(row.get::<_, i64>(0)? as u64))
            .db_context("Failed to run audit query")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch audit results")?;
        Ok(ids)
    }

    fn assignments_for(&self, sql: &str) -> Result<Vec<Assignment>> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare audit query")?;
        let assignments = stmt
            .query_map([], |row| {
                Ok(Assignment {
                    pilot_id: row.get::<_, i64>(0)? as u64,
                    flight_id: row.get::<_, i64>(1)? as u64,
                })
            })
            .db_context("Failed to run audit query")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch audit results")?;
        Ok(assignments)
    }

    /// Runs every consistency check over the stored data.
    pub fn integrity_report(&self) -> Result<IntegrityReport> {
        let report = IntegrityReport {
            reversed_times: self.ids_for(REVERSED_TIMES_SQL)?,
            invalid_aircraft: self.ids_for(INVALID_AIRCRAFT_SQL)?,
            invalid_sources: self.ids_for(INVALID_SOURCES_SQL)?,
            invalid_destinations: self.ids_for(INVALID_DESTINATIONS_SQL)?,
            invalid_flight_assignments: self.assignments_for(INVALID_FLIGHT_ASSIGNMENTS_SQL)?,
            invalid_pilot_assignments: self.assignments_for(INVALID_PILOT_ASSIGNMENTS_SQL)?,
            unpiloted_flights: self.ids_for(UNPILOTED_FLIGHTS_SQL)?,
        };
        debug!("Integrity report clean: {}", report.is_clean());
        Ok(report)
    }

    fn count<P: Params>(&self, table: &str, condition: &str, params: P) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table} {condition}");
        self.connection
            .query_row(&sql, params, |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .db_context("Failed to count rows")
    }

    fn latest(&self, sql: &str) -> Result<Option<Timestamp>> {
        let millis: Option<i64> = self
            .connection
            .query_row(sql, [], |row| row.get(0))
            .db_context("Failed to query latest time")?;
        millis
            .map(|ms| {
                Timestamp::from_millisecond(ms).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e))
                })
            })
            .transpose()
            .db_context("Failed to decode latest time")
    }

    fn ranked<P: Params>(&self, sql: &str, params: P) -> Result<Option<Ranked>> {
        self.connection
            .query_row(sql, params, |row| {
                let id = row.get::<_, i64>(0)? as u64;
                let label: Option<String> = row.get(1)?;
                Ok(Ranked {
                    id,
                    label: label.unwrap_or_else(|| format!("[ID {id}]")),
                    flights: row.get::<_, i64>(2)? as u64,
                })
            })
            .optional()
            .db_context("Failed to rank records")
    }

    /// Summary figures, with the time-relative ones computed against `now`.
    pub fn statistics(&self, now: Timestamp) -> Result<Statistics> {
        let now_ms = now.as_millisecond();
        let day = DAY_MS;
        let week = 7 * DAY_MS;

        let total = self.count("flights", "", [])?;
        let flights = if total == 0 {
            FlightStatistics::default()
        } else {
            FlightStatistics {
                total,
                completed: self.count("flights", "WHERE arrival_time < ?1", params![now_ms])?,
                to_complete: self.count("flights", "WHERE arrival_time > ?1", params![now_ms])?,
                in_flight: self.count(
                    "flights",
                    "WHERE departure_time < ?1 AND arrival_time > ?1",
                    params![now_ms],
                )?,
                departed_last_24h: self.count(
                    "flights",
                    "WHERE departure_time > ?1 AND departure_time < ?2",
                    params![now_ms - day, now_ms],
                )?,
                departing_next_24h: self.count(
                    "flights",
                    "WHERE departure_time > ?1 AND departure_time < ?2",
                    params![now_ms, now_ms + day],
                )?,
                last_departure: self.latest(LAST_DEPARTURE_SQL)?,
                last_arrival: self.latest(LAST_ARRIVAL_SQL)?,
            }
        };

        Ok(Statistics {
            now,
            flights,
            pilots: PilotStatistics {
                total: self.count("pilots", "", [])?,
                busiest: self.ranked(BUSIEST_PILOT_SQL, [])?,
            },
            destinations: DestinationStatistics {
                total: self.count("destinations", "", [])?,
                most_popular: self.ranked(POPULAR_DESTINATION_SQL, [])?,
                most_popular_next_week: self.ranked(
                    POPULAR_DESTINATION_BETWEEN_SQL,
                    params![now_ms, now_ms + week],
                )?,
            },
            aircraft: AircraftStatistics {
                total: self.count("aircraft", "", [])?,
                most_used: self.ranked(MOST_USED_AIRCRAFT_SQL, [])?,
            },
        })
    }
}
