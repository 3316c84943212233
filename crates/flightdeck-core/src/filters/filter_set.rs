//! The full set of flight browser criteria.

use log::debug;

use super::{MembershipSet, Predicate, TimeRange};
use crate::models::{Aircraft, Destination, Pilot};

/// The pieces of a flight listing query produced by [`FilterSet::build_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    /// Empty, or `WHERE` followed by the criteria joined with `AND`
    pub where_clause: String,
    /// Positional parameters for `where_clause`, in order
    pub params: Vec<i64>,
    /// `ORDER BY departure_time ASC` or `... DESC`
    pub order_clause: String,
}

/// Departure and arrival windows, route, crew and aircraft restrictions, and
/// the listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    pub departure: TimeRange,
    pub arrival: TimeRange,
    pub sources: MembershipSet<Destination>,
    pub destinations: MembershipSet<Destination>,
    pub pilots: MembershipSet<Pilot>,
    pub aircraft: MembershipSet<Aircraft>,
    /// Order by departure time ascending (earliest first) when true
    pub ascending: bool,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            departure: TimeRange::default(),
            arrival: TimeRange::default(),
            sources: MembershipSet::new("source_id"),
            destinations: MembershipSet::new("destination_id"),
            pilots: MembershipSet::new("id"),
            aircraft: MembershipSet::new("aircraft_id"),
            ascending: true,
        }
    }
}

impl FilterSet {
    /// Combines every criterion that restricts anything into one query.
    pub fn build_query(&self) -> FlightQuery {
        let predicates: Vec<Predicate> = [
            self.departure.render("departure_time"),
            self.arrival.render("arrival_time"),
            self.sources.render(),
            self.destinations.render(),
            self.pilots.render(),
            self.aircraft.render(),
        ]
        .into_iter()
        .flatten()
        .collect();

        let where_clause = if predicates.is_empty() {
            String::new()
        } else {
            let fragments: Vec<&str> = predicates.iter().map(|p| p.sql.as_str()).collect();
            format!("WHERE {}", fragments.join(" AND "))
        };
        let params = predicates.into_iter().flat_map(|p| p.params).collect();
        let order_clause = format!(
            "ORDER BY departure_time {}",
            if self.ascending { "ASC" } else { "DESC" }
        );

        debug!("Flight filter: {where_clause:?} {order_clause}");
        FlightQuery {
            where_clause,
            params,
            order_clause,
        }
    }

    /// Flips between earliest-first and latest-first.
    pub fn toggle_order(&mut self) {
        self.ascending = !self.ascending;
    }
}
