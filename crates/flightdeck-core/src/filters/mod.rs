//! Composable flight filters.
//!
//! A filter is built from criteria, each of which renders to an optional SQL
//! [`Predicate`] over the `flights` table:
//!
//! - [`TimeRange`] bounds a timestamp column from below, above, both or
//!   neither;
//! - [`MembershipSet`] restricts a foreign key (or, for pilots, the join
//!   table) to a chosen set of IDs, where the empty set means "any".
//!
//! [`FilterSet`] combines the six criteria the flight browser offers into a
//! single [`FlightQuery`].
//!
//! ```rust
//! use flightdeck_core::filters::FilterSet;
//!
//! let mut filters = FilterSet::default();
//! filters.pilots.insert(7);
//! filters.aircraft.insert(2);
//!
//! let query = filters.build_query();
//! assert_eq!(
//!     query.where_clause,
//!     "WHERE id IN (SELECT flight_id FROM pilot_flights WHERE pilot_id IN (?)) AND aircraft_id IN (?)"
//! );
//! assert_eq!(query.params, vec![7, 2]);
//! assert_eq!(query.order_clause, "ORDER BY departure_time ASC");
//! ```

pub mod filter_set;
pub mod membership;
pub mod time_range;

pub use filter_set::{FilterSet, FlightQuery};
pub use membership::MembershipSet;
pub use time_range::TimeRange;

/// A SQL boolean expression with positional `?` parameters.
///
/// Every value bound by the filters is an integer: record IDs, or
/// timestamps as milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<i64>,
}

impl Predicate {
    pub fn new(sql: impl Into<String>, params: Vec<i64>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// `?, ?, ?` with `count` placeholders.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
