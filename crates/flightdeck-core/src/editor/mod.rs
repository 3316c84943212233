//! Creating, changing and deleting a single flight.
//!
//! A [`FlightEditor`] holds a draft of the flight's fields and its pilot
//! selection next to an untouched snapshot of both as they were when the
//! editor opened. Saving writes the draft and reconciles the join table
//! against the snapshot ([`PilotChanges`]), so only pilots that were actually
//! added or removed are touched.
//!
//! # Examples
//!
//! ```rust
//! use flightdeck_core::editor::{FlightEditor, ScheduleRules, ValidationError};
//!
//! let mut editor = FlightEditor::new(ScheduleRules::default());
//! assert_eq!(editor.check(), Err(ValidationError::Incomplete));
//!
//! editor.toggle_pilot(3);
//! assert!(editor.has_pending_changes());
//! ```

use std::collections::BTreeSet;

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    db::Database,
    display::{record_table, DisplayTime},
    error::Result,
    models::{Aircraft, Destination, Pilot, Record},
    params::FlightParams,
    prompt::Prompter,
    session::save_gate,
};

pub mod reconcile;
pub mod validation;

#[cfg(test)]
mod tests;

pub use reconcile::PilotChanges;
pub use validation::{ScheduleRules, TimeOrdering, ValidationError};

/// The scalar fields of a flight, each unset until chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightDraft {
    pub source_id: Option<u64>,
    pub destination_id: Option<u64>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub aircraft_id: Option<u64>,
}

/// Result of [`FlightEditor::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written under this flight ID
    Saved(u64),
    /// Nothing written
    Rejected(ValidationError),
}

/// How an interactive editing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved(u64),
    Deleted(u64),
    Cancelled,
}

#[derive(Clone, Copy)]
enum EditorAction {
    Source,
    Destination,
    Departure,
    Arrival,
    Pilots,
    Aircraft,
    Delete,
    Save,
    Cancel,
}

#[derive(Clone, Copy)]
enum PilotAction {
    Toggle,
    Clear,
    Done,
}

/// Draft and snapshot of one flight.
#[derive(Debug, Clone)]
pub struct FlightEditor {
    flight_id: Option<u64>,
    original: FlightDraft,
    draft: FlightDraft,
    original_pilots: BTreeSet<u64>,
    pilots: BTreeSet<u64>,
    rules: ScheduleRules,
}

impl FlightEditor {
    /// An editor for a flight that does not exist yet.
    pub fn new(rules: ScheduleRules) -> Self {
        Self {
            flight_id: None,
            original: FlightDraft::default(),
            draft: FlightDraft::default(),
            original_pilots: BTreeSet::new(),
            pilots: BTreeSet::new(),
            rules,
        }
    }

    /// An editor pre-filled from a stored flight and its current pilots, or
    /// `None` if there is no flight with that ID.
    pub fn open(db: &Database, flight_id: u64, rules: ScheduleRules) -> Result<Option<Self>> {
        let Some(flight) = db.get_flight(flight_id)? else {
            return Ok(None);
        };
        let pilots = db.flight_pilot_ids(flight_id)?;
        let draft = FlightDraft {
            source_id: Some(flight.source_id),
            destination_id: Some(flight.destination_id),
            departure_time: Some(flight.departure_time),
            arrival_time: Some(flight.arrival_time),
            aircraft_id: Some(flight.aircraft_id),
        };

        debug!("Editing flight {flight_id} with pilots {pilots:?}");
        Ok(Some(Self {
            flight_id: Some(flight_id),
            original: draft,
            draft,
            original_pilots: pilots.clone(),
            pilots,
            rules,
        }))
    }

    /// The stored flight being edited; `None` until a new flight is saved.
    pub fn flight_id(&self) -> Option<u64> {
        self.flight_id
    }

    pub fn draft(&self) -> &FlightDraft {
        &self.draft
    }

    /// The working pilot selection.
    pub fn pilots(&self) -> &BTreeSet<u64> {
        &self.pilots
    }

    pub fn set_source(&mut self, id: u64) {
        self.draft.source_id = Some(id);
    }

    pub fn set_destination(&mut self, id: u64) {
        self.draft.destination_id = Some(id);
    }

    pub fn set_departure_time(&mut self, time: Timestamp) {
        self.draft.departure_time = Some(time);
    }

    pub fn set_arrival_time(&mut self, time: Timestamp) {
        self.draft.arrival_time = Some(time);
    }

    pub fn set_aircraft(&mut self, id: u64) {
        self.draft.aircraft_id = Some(id);
    }

    /// Selects an unselected pilot or deselects a selected one. Returns
    /// whether the pilot is selected afterwards.
    pub fn toggle_pilot(&mut self, id: u64) -> bool {
        if self.pilots.remove(&id) {
            false
        } else {
            self.pilots.insert(id);
            true
        }
    }

    pub fn clear_pilots(&mut self) {
        self.pilots.clear();
    }

    /// True when any field or the pilot selection differs from the snapshot.
    pub fn has_pending_changes(&self) -> bool {
        self.draft != self.original || self.pilots != self.original_pilots
    }

    /// Validates the draft, in order: every field set, at least one pilot,
    /// distinct airports (unless allowed), arrival after departure.
    pub fn check(&self) -> std::result::Result<FlightParams, ValidationError> {
        let FlightDraft {
            source_id: Some(source_id),
            destination_id: Some(destination_id),
            departure_time: Some(departure_time),
            arrival_time: Some(arrival_time),
            aircraft_id: Some(aircraft_id),
        } = self.draft
        else {
            return Err(ValidationError::Incomplete);
        };

        if self.pilots.is_empty() {
            return Err(ValidationError::NoPilots);
        }
        if source_id == destination_id && !self.rules.allow_same_airport {
            return Err(ValidationError::SameAirport);
        }
        let reversed = match self.rules.time_ordering {
            TimeOrdering::Strict => arrival_time <= departure_time,
            TimeOrdering::NonStrict => arrival_time < departure_time,
        };
        if reversed {
            return Err(ValidationError::TimeTravel);
        }

        Ok(FlightParams {
            source_id,
            destination_id,
            departure_time,
            arrival_time,
            aircraft_id,
        })
    }

    /// Join-table changes needed to go from the snapshot to the selection.
    pub fn pilot_changes(&self) -> PilotChanges {
        PilotChanges::reconcile(&self.original_pilots, &self.pilots)
    }

    /// Validates and writes the draft. On success the snapshot becomes the
    /// saved state.
    pub fn save(&mut self, db: &mut Database) -> Result<SaveOutcome> {
        let params = match self.check() {
            Ok(params) => params,
            Err(e) => {
                debug!("Flight draft rejected: {e}");
                return Ok(SaveOutcome::Rejected(e));
            }
        };

        let id = db.save_flight(self.flight_id, &params, &self.pilot_changes())?;
        self.flight_id = Some(id);
        self.original = self.draft;
        self.original_pilots = self.pilots.clone();
        Ok(SaveOutcome::Saved(id))
    }

    /// Deletes the stored flight. Returns false for a flight never saved.
    pub fn delete(&mut self, db: &mut Database) -> Result<bool> {
        match self.flight_id {
            Some(id) => db.delete_flight(id),
            None => Ok(false),
        }
    }

    /// Runs the editor menu until the flight is saved, deleted or the edit
    /// is cancelled.
    pub fn run(&mut self, db: &mut Database, prompter: &mut Prompter<'_>) -> Result<EditorOutcome> {
        loop {
            let options = self.menu_options(db)?;
            match prompter.menu("Select an option:", options)? {
                EditorAction::Source => {
                    if let Some(id) = pick_record::<Destination>(db, prompter, "Select source ID")? {
                        self.set_source(id);
                    }
                }
                EditorAction::Destination => {
                    if let Some(id) =
                        pick_record::<Destination>(db, prompter, "Select destination ID")?
                    {
                        self.set_destination(id);
                    }
                }
                EditorAction::Departure => self.set_departure_time(prompter.read_datetime()?),
                EditorAction::Arrival => self.set_arrival_time(prompter.read_datetime()?),
                EditorAction::Pilots => self.modify_pilots(db, prompter)?,
                EditorAction::Aircraft => {
                    if let Some(id) = pick_record::<Aircraft>(db, prompter, "Select aircraft ID")? {
                        self.set_aircraft(id);
                    }
                }
                EditorAction::Delete => match self.flight_id {
                    Some(id) => {
                        if self.delete(db)? {
                            info!("Flight {id} deleted from editor");
                        }
                        prompter.notice(&format!("Flight {id} deleted"))?;
                        save_gate(db, prompter)?;
                        return Ok(EditorOutcome::Deleted(id));
                    }
                    None => prompter.notice("This flight has not been saved yet")?,
                },
                EditorAction::Save => match self.save(db)? {
                    SaveOutcome::Saved(id) => {
                        prompter.notice(&format!("Flight {id} saved"))?;
                        save_gate(db, prompter)?;
                        return Ok(EditorOutcome::Saved(id));
                    }
                    SaveOutcome::Rejected(e) => prompter.notice(&e.to_string())?,
                },
                EditorAction::Cancel => {
                    if !self.has_pending_changes()
                        || prompter.confirm("Are you sure you don't want to save your changes?")?
                    {
                        return Ok(EditorOutcome::Cancelled);
                    }
                }
            }
        }
    }

    fn menu_options(&self, db: &Database) -> Result<Vec<(String, EditorAction)>> {
        let pilots = if self.pilots.is_empty() {
            "None".to_string()
        } else {
            let mut labels = Vec::with_capacity(self.pilots.len());
            for &id in &self.pilots {
                labels.push(label_of::<Pilot>(db, Some(id))?);
            }
            labels.join(", ")
        };

        Ok(vec![
            (
                format!("Change Source - {}", label_of::<Destination>(db, self.draft.source_id)?),
                EditorAction::Source,
            ),
            (
                format!(
                    "Change Destination - {}",
                    label_of::<Destination>(db, self.draft.destination_id)?
                ),
                EditorAction::Destination,
            ),
            (
                format!("Change Departure Time - {}", time_of(self.draft.departure_time)),
                EditorAction::Departure,
            ),
            (
                format!("Change Arrival Time - {}", time_of(self.draft.arrival_time)),
                EditorAction::Arrival,
            ),
            (format!("Change Pilots - {pilots}"), EditorAction::Pilots),
            (
                format!("Change Aircraft - {}", label_of::<Aircraft>(db, self.draft.aircraft_id)?),
                EditorAction::Aircraft,
            ),
            ("Delete Flight".to_string(), EditorAction::Delete),
            ("Save".to_string(), EditorAction::Save),
            ("Cancel".to_string(), EditorAction::Cancel),
        ])
    }

    fn modify_pilots(&mut self, db: &Database, prompter: &mut Prompter<'_>) -> Result<()> {
        let pilots = db.list_records::<Pilot>()?;
        if pilots.is_empty() {
            prompter.notice("No pilot records - add more from main menu")?;
            return Ok(());
        }
        let ids: Vec<u64> = pilots.iter().map(Record::id).collect();

        loop {
            prompter.table(&record_table(&pilots, Some(&self.pilots)))?;
            let action = prompter.menu(
                "Select an option:",
                vec![
                    ("Select/Deselect ID".to_string(), PilotAction::Toggle),
                    ("Deselect All".to_string(), PilotAction::Clear),
                    ("Done".to_string(), PilotAction::Done),
                ],
            )?;
            match action {
                PilotAction::Toggle => {
                    prompter.line("Select ID to select or deselect")?;
                    let id = prompter.read_id(&ids)?;
                    self.toggle_pilot(id);
                }
                PilotAction::Clear => self.clear_pilots(),
                PilotAction::Done => return Ok(()),
            }
        }
    }
}

/// Lists every `R` and reads one of their IDs. Returns `None` when there are
/// no records to choose from.
fn pick_record<R: Record>(
    db: &Database,
    prompter: &mut Prompter<'_>,
    prompt: &str,
) -> Result<Option<u64>> {
    let records = db.list_records::<R>()?;
    if records.is_empty() {
        prompter.notice(&format!(
            "No {} records - add more from main menu",
            R::KIND.to_lowercase()
        ))?;
        return Ok(None);
    }
    prompter.table(&record_table(&records, None))?;
    prompter.line(prompt)?;
    let ids: Vec<u64> = records.iter().map(Record::id).collect();
    Ok(Some(prompter.read_id(&ids)?))
}

fn label_of<R: Record>(db: &Database, id: Option<u64>) -> Result<String> {
    let Some(id) = id else {
        return Ok("None".to_string());
    };
    Ok(db
        .get_record::<R>(id)?
        .map_or_else(|| format!("[ID {id}]"), |record| record.label()))
}

fn time_of(time: Option<Timestamp>) -> String {
    time.map_or_else(|| "None".to_string(), |t| DisplayTime(&t).to_string())
}
