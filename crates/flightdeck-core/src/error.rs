//! Error types for the flightdeck library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all flightdeck operations.
///
/// Input-format and referential mistakes made at the console never surface
/// here: the prompter re-asks locally. What remains are storage failures,
/// lookups that callers chose to treat as errors, and the console itself
/// going away.
#[derive(Error, Debug)]
pub enum FlightdeckError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Flight not found for the given ID
    #[error("Flight with ID {id} not found")]
    FlightNotFound { id: u64 },
    /// Pilot, aircraft or destination not found for the given ID
    #[error("{kind} with ID {id} not found")]
    RecordNotFound { kind: &'static str, id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Reading from or writing to the console failed
    #[error("Console error: {source}")]
    Console {
        #[from]
        source: std::io::Error,
    },
    /// The console reached end of input while a prompt was waiting
    #[error("Input closed before the session was finished")]
    InputClosed,
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> FlightdeckError {
        FlightdeckError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> FlightdeckError {
        FlightdeckError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FlightdeckError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FlightdeckError::database(message).with_source(e))
    }
}

/// Result type alias for flightdeck operations
pub type Result<T> = std::result::Result<T, FlightdeckError>;
