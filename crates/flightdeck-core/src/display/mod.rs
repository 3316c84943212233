//! Display formatting for console output.
//!
//! Everything the console shows is built here: [`Table`] for record and
//! flight listings, the UTC date/time wrappers used in menus, and the
//! `Display` implementations of the audit and statistics reports.
//!
//! ## Module Organization
//!
//! - [`table`]: padded plain-text tables
//! - [`datetime`]: `dd/mm/yyyy hh:mm` formatting and parsing
//! - [`models`]: flight and record tables
//! - [`reports`]: `Display` for [`crate::models::IntegrityReport`] and
//!   [`crate::models::Statistics`]

pub mod datetime;
pub mod models;
pub mod reports;
pub mod table;

pub use datetime::{parse_date, parse_datetime, DisplayDate, DisplayTime};
pub use models::{flight_table, record_table};
pub use table::Table;
