//! Date and time formatting and parsing in the console formats.
//!
//! All times are shown and entered in UTC, the zone they are stored in.

use std::fmt;

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};

/// Console format for instants: `dd/mm/yyyy hh:mm`.
pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Console format for calendar dates: `dd/mm/yyyy`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A wrapper around `Timestamp` that formats it as `dd/mm/yyyy hh:mm` UTC.
///
/// # Examples
///
/// ```rust
/// use flightdeck_core::display::DisplayTime;
/// use jiff::Timestamp;
///
/// let ts = Timestamp::from_second(1_735_725_600).unwrap();
/// assert_eq!(DisplayTime(&ts).to_string(), "01/01/2025 10:00");
/// ```
pub struct DisplayTime<'a>(pub &'a Timestamp);

impl fmt::Display for DisplayTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::UTC).strftime(DATETIME_FORMAT)
        )
    }
}

/// A wrapper around a civil `Date` that formats it as `dd/mm/yyyy`.
pub struct DisplayDate<'a>(pub &'a Date);

impl fmt::Display for DisplayDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime(DATE_FORMAT))
    }
}

/// Parses `dd/mm/yyyy hh:mm` as a UTC instant.
pub fn parse_datetime(input: &str) -> Result<Timestamp, jiff::Error> {
    let civil = DateTime::strptime(DATETIME_FORMAT, input.trim())?;
    Ok(civil.to_zoned(TimeZone::UTC)?.timestamp())
}

/// Parses `dd/mm/yyyy` as a calendar date whose UTC midnight is a
/// representable instant, the form dates are stored in.
pub fn parse_date(input: &str) -> Result<Date, jiff::Error> {
    let date = Date::strptime(DATE_FORMAT, input.trim())?;
    date.to_zoned(TimeZone::UTC)?;
    Ok(date)
}
