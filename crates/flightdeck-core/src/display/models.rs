//! Table rendering for flights and records.

use std::collections::BTreeSet;

use super::{datetime::DisplayTime, table::Table};
use crate::models::{FlightListing, Record};

const FLIGHT_HEADERS: [&str; 7] = [
    "ID",
    "Departure Time",
    "Arrival Time",
    "Source",
    "Destination",
    "Aircraft",
    "Pilots",
];

const MISSING: &str = "[MISSING]";

/// Builds the flight browser table.
///
/// The first pilot is shown inline; each further pilot gets a continuation
/// row with every other cell blank.
pub fn flight_table(flights: &[FlightListing]) -> Table {
    let mut table = Table::new(FLIGHT_HEADERS);
    for flight in flights {
        let mut pilots = flight.pilots.iter();
        table.push_row(vec![
            flight.id.to_string(),
            DisplayTime(&flight.departure_time).to_string(),
            DisplayTime(&flight.arrival_time).to_string(),
            flight.source.clone().unwrap_or_else(|| MISSING.to_string()),
            flight.destination.clone().unwrap_or_else(|| MISSING.to_string()),
            flight.aircraft.clone().unwrap_or_else(|| MISSING.to_string()),
            pilots.next().cloned().unwrap_or_else(|| "[NO PILOTS]".to_string()),
        ]);
        for pilot in pilots {
            let mut row = vec![String::new(); FLIGHT_HEADERS.len() - 1];
            row.push(pilot.clone());
            table.push_row(row);
        }
    }
    table
}

/// Builds a table of records, with a trailing "Selected" column when a
/// selection is given.
pub fn record_table<R: Record>(records: &[R], selected: Option<&BTreeSet<u64>>) -> Table {
    let mut headers: Vec<&str> = R::HEADERS.to_vec();
    if selected.is_some() {
        headers.push("Selected");
    }

    let mut table = Table::new(headers);
    for record in records {
        let mut cells = record.cells();
        if let Some(selection) = selected {
            cells.push(selection.contains(&record.id()).to_string());
        }
        table.push_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Aircraft;

    fn listing(pilots: &[&str]) -> FlightListing {
        FlightListing {
            id: 42,
            departure_time: Timestamp::from_second(1_735_725_600).unwrap(),
            arrival_time: Timestamp::from_second(1_735_736_400).unwrap(),
            source: Some("Heathrow".to_string()),
            destination: Some("Schiphol".to_string()),
            aircraft: None,
            pilots: pilots.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_flight_table_puts_extra_pilots_on_continuation_rows() {
        let table = flight_table(&[listing(&["Amelia Earhart", "Chuck Yeager"])]);
        assert_eq!(table.len(), 2);

        let output = table.to_string();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("42"));
        assert!(lines[1].contains("01/01/2025 10:00"));
        assert!(lines[1].contains("01/01/2025 13:00"));
        assert!(lines[1].contains("[MISSING]"));
        assert!(lines[1].ends_with("Amelia Earhart"));
        assert_eq!(lines[2].trim(), "Chuck Yeager");
    }

    #[test]
    fn test_flight_table_marks_unpiloted_flights() {
        let table = flight_table(&[listing(&[])]);
        assert_eq!(table.len(), 1);
        assert!(table.to_string().contains("[NO PILOTS]"));
    }

    #[test]
    fn test_record_table_selection_column() {
        let aircraft = vec![
            Aircraft {
                id: 1,
                name: "A320".to_string(),
            },
            Aircraft {
                id: 2,
                name: "B777".to_string(),
            },
        ];
        let selected: BTreeSet<u64> = [2].into_iter().collect();

        let output = record_table(&aircraft, Some(&selected)).to_string();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "ID    Name    Selected");
        assert!(lines[1].ends_with("false"));
        assert!(lines[2].ends_with("true"));

        let plain = record_table(&aircraft, None).to_string();
        assert!(!plain.contains("Selected"));
    }
}
