//! Pilots, aircraft and destinations, and the [`Record`] contract they share.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use rusqlite::{types::Type, Row};
use serde::{Deserialize, Serialize};

use crate::display::DisplayDate;

/// A table that flights refer to by foreign key.
///
/// Each entity kind implements this once, so screens and filters that work
/// over "some kind of record" never branch on the kind themselves: listing,
/// existence checks, table rendering and filter predicates all go through
/// the trait.
pub trait Record: Sized {
    /// Singular display name of the kind, e.g. `"Pilot"`.
    const KIND: &'static str;

    /// Table holding the rows.
    const TABLE: &'static str;

    /// Column list selected by [`Record::from_row`], in order.
    const COLUMNS: &'static str;

    /// Table headers matching [`Record::cells`].
    const HEADERS: &'static [&'static str];

    /// Decodes a row selected with [`Record::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn id(&self) -> u64;

    /// Short human-readable name used in menus and flight listings.
    fn label(&self) -> String;

    /// One rendered table row.
    fn cells(&self) -> Vec<String>;

    /// SQL predicate restricting flights to those related to any of the
    /// given ids. `placeholders` is a ready `?, ?, ...` list.
    fn membership_predicate(column: &str, placeholders: &str) -> String {
        format!("{column} IN ({placeholders})")
    }
}

/// An airport flights depart from and arrive at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub id: u64,
    pub name: String,
    /// Short code, 1 to 4 characters, upper case
    pub code: String,
    /// Degrees, -90 to 90
    pub latitude: f64,
    /// Degrees, -180 to 180
    pub longitude: f64,
}

impl Record for Destination {
    const KIND: &'static str = "Destination";
    const TABLE: &'static str = "destinations";
    const COLUMNS: &'static str = "id, name, code, latitude, longitude";
    const HEADERS: &'static [&'static str] = &["ID", "Code", "Name", "Latitude", "Longitude"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            code: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
        })
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code.clone(),
            self.name.clone(),
            self.latitude.to_string(),
            self.longitude.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Aircraft {
    pub id: u64,
    pub name: String,
}

impl Record for Aircraft {
    const KIND: &'static str = "Aircraft";
    const TABLE: &'static str = "aircraft";
    const COLUMNS: &'static str = "id, name";
    const HEADERS: &'static [&'static str] = &["ID", "Name"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
        })
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pilot {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub date_joined: Date,
}

impl Record for Pilot {
    const KIND: &'static str = "Pilot";
    const TABLE: &'static str = "pilots";
    const COLUMNS: &'static str = "id, name, surname, date_joined";
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Surname", "Date Joined"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            surname: row.get(2)?,
            date_joined: date_from_millis(row.get(3)?).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
            })?,
        })
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.surname.clone(),
            DisplayDate(&self.date_joined).to_string(),
        ]
    }

    // Pilots are not a flight column; membership goes through the join table.
    fn membership_predicate(column: &str, placeholders: &str) -> String {
        format!(
            "{column} IN (SELECT flight_id FROM pilot_flights WHERE pilot_id IN ({placeholders}))"
        )
    }
}

/// Stored form of a calendar date: UTC midnight in epoch milliseconds.
pub(crate) fn date_to_millis(date: Date) -> Result<i64, jiff::Error> {
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp().as_millisecond())
}

pub(crate) fn date_from_millis(millis: i64) -> Result<Date, jiff::Error> {
    Ok(Timestamp::from_millisecond(millis)?
        .to_zoned(TimeZone::UTC)
        .date())
}
