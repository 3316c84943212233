//! Builder for opening the database and configuring a [`Session`].

use std::path::{Path, PathBuf};

use log::info;

use super::{Session, Settings};
use crate::{
    db::Database,
    error::{FlightdeckError, Result},
};

/// Builder for creating and configuring Session instances.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    database_path: Option<PathBuf>,
    settings: Settings,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/flightdeck/flightdeck.db` or
    /// `~/.local/share/flightdeck/flightdeck.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The file the database will be opened from.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }

    /// Opens (creating if needed) the database without starting a session.
    ///
    /// # Errors
    ///
    /// Returns `FlightdeckError::FileSystem` if the parent directory cannot
    /// be created
    /// Returns `FlightdeckError::Database` if database initialization fails
    pub fn open_database(&self) -> Result<Database> {
        let db_path = self.database_path()?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| FlightdeckError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", db_path.display());
        Database::new(&db_path)
    }

    /// Builds the configured session.
    pub fn build(self) -> Result<Session> {
        let db = self.open_database()?;
        Ok(Session::new(db, self.settings))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("flightdeck")
            .place_data_file("flightdeck.db")
            .map_err(|e| FlightdeckError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_build_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/flights.db");

        let session = SessionBuilder::new()
            .with_database_path(Some(&path))
            .build()
            .expect("Failed to build session");

        assert!(path.exists());
        assert_eq!(session.settings(), &Settings::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let builder = SessionBuilder::new().with_database_path(Some("/tmp/elsewhere.db"));
        assert_eq!(
            builder.database_path().unwrap(),
            PathBuf::from("/tmp/elsewhere.db")
        );
    }

    #[test]
    fn test_none_path_keeps_default() {
        let builder = SessionBuilder::new().with_database_path(None::<&str>);
        assert!(builder.database_path.is_none());
    }
}
