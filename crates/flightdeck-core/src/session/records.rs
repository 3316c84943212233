//! Add and remove screens for pilots, aircraft and destinations.

use log::debug;

use super::save_gate;
use crate::{
    db::{record_queries::MAX_CODE_LENGTH, Database},
    display::record_table,
    error::{FlightdeckError, Result},
    models::{Aircraft, Destination, Pilot, Record},
    params::{NewAircraft, NewDestination, NewPilot},
    prompt::Prompter,
};

/// A record kind with its own add form and deletion consequences.
pub trait RecordScreen: Record {
    /// Values gathered by the add form.
    type New;

    fn read_new(prompter: &mut Prompter<'_>) -> Result<Self::New>;

    fn insert(db: &mut Database, new: &Self::New) -> Result<Self>;

    /// Flights that deleting record `id` would take with it.
    fn doomed_flights(db: &Database, id: u64) -> Result<Vec<u64>>;

    fn delete(db: &mut Database, id: u64) -> Result<()>;
}

fn read_name(prompter: &mut Prompter<'_>, label: &str) -> Result<String> {
    prompter.read_text_bounded(label, 1..=usize::MAX, "Cannot be empty")
}

/// An upper-cased destination code, measured after upper-casing.
fn read_code(prompter: &mut Prompter<'_>) -> Result<String> {
    loop {
        let code = prompter.read_text("Enter code:")?.to_uppercase();
        if (1..=MAX_CODE_LENGTH).contains(&code.chars().count()) {
            return Ok(code);
        }
        prompter.line("Code must be 1 - 4 characters")?;
    }
}

impl RecordScreen for Pilot {
    type New = NewPilot;

    fn read_new(prompter: &mut Prompter<'_>) -> Result<NewPilot> {
        let name = read_name(prompter, "Enter name:")?;
        let surname = read_name(prompter, "Enter surname:")?;
        prompter.line("Enter date joined:")?;
        let date_joined = prompter.read_date()?;
        Ok(NewPilot {
            name,
            surname,
            date_joined,
        })
    }

    fn insert(db: &mut Database, new: &NewPilot) -> Result<Self> {
        db.add_pilot(new)
    }

    fn doomed_flights(db: &Database, id: u64) -> Result<Vec<u64>> {
        db.flights_only_piloted_by(id)
    }

    fn delete(db: &mut Database, id: u64) -> Result<()> {
        db.delete_pilot(id).map(|_| ())
    }
}

impl RecordScreen for Aircraft {
    type New = NewAircraft;

    fn read_new(prompter: &mut Prompter<'_>) -> Result<NewAircraft> {
        Ok(NewAircraft {
            name: read_name(prompter, "Enter name:")?,
        })
    }

    fn insert(db: &mut Database, new: &NewAircraft) -> Result<Self> {
        db.add_aircraft(new)
    }

    fn doomed_flights(db: &Database, id: u64) -> Result<Vec<u64>> {
        db.flights_using_aircraft(id)
    }

    fn delete(db: &mut Database, id: u64) -> Result<()> {
        db.delete_aircraft(id).map(|_| ())
    }
}

impl RecordScreen for Destination {
    type New = NewDestination;

    fn read_new(prompter: &mut Prompter<'_>) -> Result<NewDestination> {
        let name = read_name(prompter, "Enter name:")?;
        let code = read_code(prompter)?;
        prompter.line("Enter latitude")?;
        let latitude = prompter.read_float_in(-90.0..=90.0)?;
        prompter.line("Enter longitude")?;
        let longitude = prompter.read_float_in(-180.0..=180.0)?;
        Ok(NewDestination {
            name,
            code,
            latitude,
            longitude,
        })
    }

    fn insert(db: &mut Database, new: &NewDestination) -> Result<Self> {
        db.add_destination(new)
    }

    fn doomed_flights(db: &Database, id: u64) -> Result<Vec<u64>> {
        db.flights_using_destination(id)
    }

    fn delete(db: &mut Database, id: u64) -> Result<()> {
        db.delete_destination(id).map(|_| ())
    }
}

#[derive(Clone, Copy)]
enum RecordAction {
    Add,
    Remove,
    Done,
}

/// Lists every `R` and offers add and remove until the user is done, then
/// offers the save gate.
///
/// Removing a record that flights depend on names those flights and asks
/// for confirmation first; declining leaves everything untouched.
pub fn manage<R: RecordScreen>(db: &mut Database, prompter: &mut Prompter<'_>) -> Result<()> {
    let kind = R::KIND.to_lowercase();
    loop {
        let records = db.list_records::<R>()?;
        if records.is_empty() {
            prompter.line("[NO DATA]")?;
        } else {
            prompter.table(&record_table(&records, None))?;
        }
        prompter.line("")?;

        let action = prompter.menu(
            "Select an option:",
            vec![
                (format!("Add {}", R::KIND), RecordAction::Add),
                (format!("Remove {}", R::KIND), RecordAction::Remove),
                ("Done".to_string(), RecordAction::Done),
            ],
        )?;

        match action {
            RecordAction::Add => {
                let new = R::read_new(prompter)?;
                let record = match R::insert(db, &new) {
                    Ok(record) => record,
                    Err(FlightdeckError::InvalidInput { reason, .. }) => {
                        prompter.notice(&format!("{} not added: {reason}", R::KIND))?;
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                prompter.notice(&format!("Added {kind} {} [ID: {}]", record.label(), record.id()))?;
            }
            RecordAction::Remove => {
                if records.is_empty() {
                    prompter.notice(&format!("No {kind} records to remove"))?;
                    continue;
                }
                let ids: Vec<u64> = records.iter().map(Record::id).collect();
                prompter.line("Enter ID:")?;
                let id = prompter.read_id(&ids)?;

                let doomed = R::doomed_flights(db, id)?;
                if !doomed.is_empty() {
                    let listed: Vec<String> = doomed.iter().map(u64::to_string).collect();
                    prompter.notice(&format!(
                        "Deleting this {kind} will result in {} flight(s) (ID(s): {}) being deleted due to having no {kind}",
                        doomed.len(),
                        listed.join(", ")
                    ))?;
                    if !prompter.confirm("Are you sure you want to continue?")? {
                        debug!("Removal of {kind} {id} declined");
                        continue;
                    }
                }
                R::delete(db, id)?;
                prompter.notice(&format!("Removed {kind} {id}"))?;
            }
            RecordAction::Done => {
                save_gate(db, prompter)?;
                return Ok(());
            }
        }
    }
}

/// Case-insensitive exact lookup of destinations by code.
pub fn lookup_destination(db: &Database, prompter: &mut Prompter<'_>) -> Result<()> {
    let code = prompter.read_text("Enter destination code:")?;
    let found = db.find_destinations_by_code(&code)?;
    if found.is_empty() {
        return prompter.notice("No destination matches that code");
    }
    prompter.line("Destinations matching that code:")?;
    for destination in &found {
        prompter.line(&format!("\t{} [ID: {}]", destination.name, destination.id))?;
    }
    prompter.line("")
}
