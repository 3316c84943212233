//! Database operations and SQLite management.
//!
//! This module owns the single long-lived SQLite connection of a session and
//! provides specialized query interfaces for flights, records and reports.
//!
//! # Transactions
//!
//! An interactive session runs inside one open transaction
//! ([`Database::begin_session`]). Nothing reaches the file until the user
//! accepts the save gate ([`Database::commit`]); quitting without saving
//! rolls the whole session back. Individual multi-statement writes (saving a
//! flight with its pilot assignments, deleting a pilot with the flights left
//! without one) run in a SAVEPOINT nested in that transaction, so each is
//! all-or-nothing on its own.

use std::path::Path;

use log::{debug, info, warn};
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod flight_queries;
pub mod record_queries;
pub mod report_queries;
pub mod schema;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
    in_session: bool,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        let db = Self {
            connection,
            in_session: false,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens the session transaction. Changes made from now on stay pending
    /// until [`Database::commit`].
    pub fn begin_session(&mut self) -> Result<()> {
        if self.connection.is_autocommit() {
            self.connection
                .execute_batch("BEGIN")
                .db_context("Failed to begin session transaction")?;
        }
        self.in_session = true;
        debug!("Session transaction opened");
        Ok(())
    }

    /// Commits pending changes. Inside a session a fresh transaction is
    /// opened straight away.
    pub fn commit(&mut self) -> Result<()> {
        if !self.connection.is_autocommit() {
            self.connection
                .execute_batch("COMMIT")
                .db_context("Failed to commit changes")?;
            info!("Changes committed");
        }
        if self.in_session {
            self.connection
                .execute_batch("BEGIN")
                .db_context("Failed to begin session transaction")?;
        }
        Ok(())
    }

    /// Discards every change since the last commit and ends the session.
    pub fn rollback(&mut self) -> Result<()> {
        if !self.connection.is_autocommit() {
            self.connection
                .execute_batch("ROLLBACK")
                .db_context("Failed to roll back changes")?;
            warn!("Uncommitted changes discarded");
        }
        self.in_session = false;
        Ok(())
    }

    /// Commits pending changes and ends the session.
    pub fn finish(&mut self) -> Result<()> {
        self.in_session = false;
        self.commit()
    }
}
