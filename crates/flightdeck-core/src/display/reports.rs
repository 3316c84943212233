//! Display implementations for the audit and statistics reports.

use std::fmt;

use super::datetime::DisplayTime;
use crate::models::{Assignment, IntegrityReport, Ranked, Statistics};

fn write_ids(f: &mut fmt::Formatter<'_>, heading: &str, ok: &str, ids: &[u64]) -> fmt::Result {
    if ids.is_empty() {
        return writeln!(f, "{ok}");
    }
    writeln!(f, "{heading}")?;
    for id in ids {
        writeln!(f, "\t{id}")?;
    }
    Ok(())
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ids(
            f,
            "The following flight IDs have their arrival time set before their departure time:",
            "All arrival times occur after departure times",
            &self.reversed_times,
        )?;
        write_ids(
            f,
            "The following flight IDs have invalid aircraft IDs:",
            "All flights have valid aircraft IDs",
            &self.invalid_aircraft,
        )?;
        write_ids(
            f,
            "The following flight IDs have invalid departure location IDs:",
            "All flights have valid departure location IDs",
            &self.invalid_sources,
        )?;
        write_ids(
            f,
            "The following flight IDs have invalid destination IDs:",
            "All flights have valid destination IDs",
            &self.invalid_destinations,
        )?;

        if self.invalid_flight_assignments.is_empty() {
            writeln!(f, "All pilots have been assigned to flights with valid IDs")?;
        } else {
            writeln!(f, "The following pilot IDs have been assigned to invalid flight IDs:")?;
            for Assignment { pilot_id, flight_id } in &self.invalid_flight_assignments {
                writeln!(f, "\t{pilot_id} (Invalid flight: {flight_id})")?;
            }
        }

        if self.invalid_pilot_assignments.is_empty() {
            writeln!(f, "All flights have been assigned pilots with valid IDs")?;
        } else {
            writeln!(f, "The following flight IDs have been assigned invalid pilot IDs:")?;
            for Assignment { pilot_id, flight_id } in &self.invalid_pilot_assignments {
                writeln!(f, "\t{flight_id} (Invalid pilot: {pilot_id})")?;
            }
        }

        write_ids(
            f,
            "The following flight IDs have no pilots assigned to them:",
            "All flights have at least one pilot",
            &self.unpiloted_flights,
        )?;

        writeln!(f)?;
        writeln!(f, "Checks complete")
    }
}

impl fmt::Display for Ranked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} flight(s)", self.label, self.flights)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flights = &self.flights;
        writeln!(f, "Flights:")?;
        writeln!(f, "\tTotal Flights: {}", flights.total)?;
        if flights.total == 0 {
            writeln!(f, "\t[Remaining statistics omitted due to no flights]")?;
        } else {
            writeln!(f, "\tCompleted: {}", flights.completed)?;
            writeln!(f, "\tTo Complete: {}", flights.to_complete)?;
            writeln!(f, "\tIn Flight: {}", flights.in_flight)?;
            writeln!(f, "\tFlights departed in last 24h: {}", flights.departed_last_24h)?;
            writeln!(f, "\tFlights departing in next 24h: {}", flights.departing_next_24h)?;
            if let Some(last) = &flights.last_departure {
                writeln!(f, "\tLast scheduled flight departure: {}", DisplayTime(last))?;
            }
            if let Some(last) = &flights.last_arrival {
                writeln!(f, "\tLast scheduled flight arrival: {}", DisplayTime(last))?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Pilots:")?;
        writeln!(f, "\tTotal Pilots: {}", self.pilots.total)?;
        if let Some(busiest) = &self.pilots.busiest {
            writeln!(f, "\tPilot with most scheduled flights (all time): {busiest}")?;
        }
        writeln!(f)?;

        writeln!(f, "Destinations:")?;
        writeln!(f, "\tTotal Destinations: {}", self.destinations.total)?;
        if let Some(popular) = &self.destinations.most_popular {
            writeln!(f, "\tMost popular destination: {popular}")?;
        }
        if let Some(popular) = &self.destinations.most_popular_next_week {
            writeln!(f, "\tMost popular destination over next week: {popular}")?;
        }
        writeln!(f)?;

        writeln!(f, "Aircraft:")?;
        writeln!(f, "\tTotal Aircraft: {}", self.aircraft.total)?;
        if let Some(used) = &self.aircraft.most_used {
            writeln!(f, "\tMost popular aircraft: {used}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{
        AircraftStatistics, DestinationStatistics, FlightStatistics, PilotStatistics,
    };

    #[test]
    fn test_clean_report_lists_every_check() {
        let output = IntegrityReport::default().to_string();
        assert!(output.contains("All arrival times occur after departure times"));
        assert!(output.contains("All flights have at least one pilot"));
        assert!(output.ends_with("Checks complete\n"));
    }

    #[test]
    fn test_report_lists_offending_ids() {
        let report = IntegrityReport {
            unpiloted_flights: vec![4, 9],
            invalid_pilot_assignments: vec![Assignment {
                pilot_id: 77,
                flight_id: 4,
            }],
            ..Default::default()
        };
        let output = report.to_string();
        assert!(output.contains("no pilots assigned to them:\n\t4\n\t9\n"));
        assert!(output.contains("\t4 (Invalid pilot: 77)"));
    }

    #[test]
    fn test_statistics_without_flights_omits_details() {
        let stats = Statistics {
            now: Timestamp::UNIX_EPOCH,
            flights: FlightStatistics::default(),
            pilots: PilotStatistics {
                total: 2,
                busiest: None,
            },
            destinations: DestinationStatistics::default(),
            aircraft: AircraftStatistics {
                total: 1,
                most_used: Some(Ranked {
                    id: 1,
                    label: "A320".to_string(),
                    flights: 3,
                }),
            },
        };
        let output = stats.to_string();
        assert!(output.contains("[Remaining statistics omitted due to no flights]"));
        assert!(!output.contains("In Flight"));
        assert!(output.contains("Total Pilots: 2"));
        assert!(output.contains("Most popular aircraft: A320 - 3 flight(s)"));
    }
}
