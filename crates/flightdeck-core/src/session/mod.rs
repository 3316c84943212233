//! The interactive session: main menu, record screens and the save gate.
//!
//! A [`Session`] owns the [`Database`] for its whole lifetime and runs every
//! change inside one transaction. Changes become permanent only through the
//! save gate ([`save_gate`]) or "Save and Quit"; "Quit without Saving" and
//! any error that ends the session (including closed input) roll back
//! everything since the last save.
//!
//! # Examples
//!
//! ```rust
//! use flightdeck_core::{
//!     console::ScriptedConsole,
//!     db::Database,
//!     session::{Session, SessionEnd, Settings},
//! };
//!
//! let db = Database::open_in_memory().unwrap();
//! let mut session = Session::new(db, Settings::default());
//! let mut console = ScriptedConsole::new(["9", "1"]);
//!
//! assert_eq!(session.run(&mut console).unwrap(), SessionEnd::Discarded);
//! assert!(console.output().contains("Are you sure you want to quit without saving?"));
//! ```

use jiff::Timestamp;
use log::{error, info};

use crate::{
    browser::FlightBrowser,
    console::Console,
    db::Database,
    editor::ScheduleRules,
    error::Result,
    models::{Aircraft, Destination, Pilot},
    paginator::DEFAULT_PAGE_SIZE,
    prompt::Prompter,
};

pub mod builder;
pub mod records;


pub use builder::SessionBuilder;

/// User-adjustable behaviour for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Flights per browser page
    pub page_size: usize,
    pub rules: ScheduleRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            rules: ScheduleRules::default(),
        }
    }
}

/// How the main menu was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Pending changes committed
    Saved,
    /// Pending changes rolled back
    Discarded,
}

#[derive(Clone, Copy)]
enum MainAction {
    Flights,
    Pilots,
    Aircraft,
    Destinations,
    Lookup,
    Statistics,
    Check,
    SaveAndQuit,
    Quit,
}

/// Asks whether to commit pending changes and commits on Yes. Returns
/// whether a commit happened.
pub fn save_gate(db: &mut Database, prompter: &mut Prompter<'_>) -> Result<bool> {
    if prompter.confirm("Save changes?")? {
        db.commit()?;
        prompter.notice("Changes saved")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

pub struct Session {
    db: Database,
    settings: Settings,
}

impl Session {
    pub fn new(db: Database, settings: Settings) -> Self {
        Self { db, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs the main menu on `console` until the user quits.
    ///
    /// # Errors
    ///
    /// Returns `FlightdeckError::InputClosed` if input ends before the user
    /// quits, and storage or console failures as they happen. In every error
    /// case unsaved changes are rolled back first.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<SessionEnd> {
        self.db.begin_session()?;
        let mut prompter = Prompter::new(console);

        match self.main_menu(&mut prompter) {
            Ok(end) => {
                info!("Session ended: {end:?}");
                Ok(end)
            }
            Err(e) => {
                if let Err(rollback) = self.db.rollback() {
                    error!("Rollback after failed session also failed: {rollback}");
                }
                Err(e)
            }
        }
    }

    fn main_menu(&mut self, prompter: &mut Prompter<'_>) -> Result<SessionEnd> {
        loop {
            let action = prompter.menu(
                "Select option:",
                vec![
                    ("View/Modify Flights".to_string(), MainAction::Flights),
                    ("View/Modify Pilots".to_string(), MainAction::Pilots),
                    ("View/Modify Aircraft".to_string(), MainAction::Aircraft),
                    ("View/Modify Destinations".to_string(), MainAction::Destinations),
                    ("Lookup Destination By Code".to_string(), MainAction::Lookup),
                    ("Statistics".to_string(), MainAction::Statistics),
                    ("Check for Errors".to_string(), MainAction::Check),
                    ("Save and Quit".to_string(), MainAction::SaveAndQuit),
                    ("Quit without Saving".to_string(), MainAction::Quit),
                ],
            )?;

            match action {
                MainAction::Flights => {
                    FlightBrowser::new(self.settings.page_size, self.settings.rules)
                        .run(&mut self.db, prompter)?;
                }
                MainAction::Pilots => records::manage::<Pilot>(&mut self.db, prompter)?,
                MainAction::Aircraft => records::manage::<Aircraft>(&mut self.db, prompter)?,
                MainAction::Destinations => {
                    records::manage::<Destination>(&mut self.db, prompter)?;
                }
                MainAction::Lookup => records::lookup_destination(&self.db, prompter)?,
                MainAction::Statistics => {
                    let statistics = self.db.statistics(Timestamp::now())?;
                    write_report(prompter, &statistics.to_string())?;
                }
                MainAction::Check => {
                    let report = self.db.integrity_report()?;
                    write_report(prompter, &report.to_string())?;
                }
                MainAction::SaveAndQuit => {
                    self.db.finish()?;
                    prompter.notice("Changes saved")?;
                    return Ok(SessionEnd::Saved);
                }
                MainAction::Quit => {
                    if prompter.confirm("Are you sure you want to quit without saving?")? {
                        self.db.rollback()?;
                        return Ok(SessionEnd::Discarded);
                    }
                }
            }
        }
    }
}

fn write_report(prompter: &mut Prompter<'_>, report: &str) -> Result<()> {
    for line in report.lines() {
        prompter.line(line)?;
    }
    prompter.line("")
}
