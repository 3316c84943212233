use std::collections::BTreeSet;

use jiff::civil::date;

use super::*;
use crate::{
    console::ScriptedConsole,
    display::parse_datetime,
    filters::FilterSet,
    params::NewPilot,
    testing::{self, ts},
};

fn complete_editor(rules: ScheduleRules) -> FlightEditor {
    let mut editor = FlightEditor::new(rules);
    editor.set_source(1);
    editor.set_destination(2);
    editor.set_departure_time(ts(1_000));
    editor.set_arrival_time(ts(2_000));
    editor.set_aircraft(1);
    editor.toggle_pilot(1);
    editor
}

fn add_pilots(db: &mut Database, count: usize) {
    for i in 0..count {
        db.add_pilot(&NewPilot {
            name: format!("Extra{i}"),
            surname: "Pilot".to_string(),
            date_joined: date(2021, 6, 1),
        })
        .expect("Failed to add pilot");
    }
}

fn flight_count(db: &Database) -> usize {
    db.search_flights(&FilterSet::default().build_query(), 100, 0)
        .expect("Failed to search flights")
        .len()
}

#[test]
fn test_check_requires_every_field() {
    let rules = ScheduleRules::default();
    assert_eq!(FlightEditor::new(rules).check(), Err(ValidationError::Incomplete));

    let mut editor = complete_editor(rules);
    editor.draft.aircraft_id = None;
    assert_eq!(editor.check(), Err(ValidationError::Incomplete));
}

#[test]
fn test_check_incomplete_wins_over_no_pilots() {
    let mut editor = FlightEditor::new(ScheduleRules::default());
    editor.set_source(1);
    assert_eq!(editor.check(), Err(ValidationError::Incomplete));
}

#[test]
fn test_check_requires_pilots() {
    let mut editor = complete_editor(ScheduleRules::default());
    editor.clear_pilots();
    assert_eq!(editor.check(), Err(ValidationError::NoPilots));
}

#[test]
fn test_check_rejects_reversed_times() {
    let mut editor = complete_editor(ScheduleRules::default());
    editor.set_arrival_time(ts(500));
    assert_eq!(editor.check(), Err(ValidationError::TimeTravel));
}

#[test]
fn test_equal_times_depend_on_ordering_rule() {
    let mut strict = complete_editor(ScheduleRules::default());
    strict.set_arrival_time(ts(1_000));
    assert_eq!(strict.check(), Err(ValidationError::TimeTravel));

    let mut lenient = complete_editor(ScheduleRules {
        time_ordering: TimeOrdering::NonStrict,
        allow_same_airport: false,
    });
    lenient.set_arrival_time(ts(1_000));
    assert!(lenient.check().is_ok());
}

#[test]
fn test_same_airport_depends_on_rule() {
    let mut editor = complete_editor(ScheduleRules::default());
    editor.set_destination(1);
    assert_eq!(editor.check(), Err(ValidationError::SameAirport));

    let mut sightseeing = complete_editor(ScheduleRules {
        time_ordering: TimeOrdering::Strict,
        allow_same_airport: true,
    });
    sightseeing.set_destination(1);
    let params = sightseeing.check().unwrap();
    assert_eq!(params.source_id, params.destination_id);
}

#[test]
fn test_toggle_pilot() {
    let mut editor = FlightEditor::new(ScheduleRules::default());
    assert!(editor.toggle_pilot(4));
    assert!(!editor.toggle_pilot(4));
    assert!(editor.pilots().is_empty());
    assert!(!editor.has_pending_changes());
}

#[test]
fn test_open_missing_flight_is_none() {
    let db = testing::seeded_db();
    assert!(FlightEditor::open(&db, 42, ScheduleRules::default())
        .unwrap()
        .is_none());
}

#[test]
fn test_reconciliation_touches_only_changed_pilots() {
    let mut db = testing::seeded_db();
    add_pilots(&mut db, 1);
    let id = testing::add_flight(&mut db, 1, 2, 1_000, 2_000, 1, &[1, 2, 3]);

    let mut editor = FlightEditor::open(&db, id, ScheduleRules::default())
        .unwrap()
        .unwrap();
    editor.toggle_pilot(1);
    editor.toggle_pilot(4);

    let changes = editor.pilot_changes();
    assert_eq!(changes.added, BTreeSet::from([4]));
    assert_eq!(changes.removed, BTreeSet::from([1]));

    assert_eq!(editor.save(&mut db).unwrap(), SaveOutcome::Saved(id));
    assert_eq!(db.flight_pilot_ids(id).unwrap(), BTreeSet::from([2, 3, 4]));
    assert!(!editor.has_pending_changes());
}

#[test]
fn test_save_updates_existing_row() {
    let mut db = testing::seeded_db();
    let id = testing::add_flight(&mut db, 1, 2, 1_000, 2_000, 1, &[1]);

    let mut editor = FlightEditor::open(&db, id, ScheduleRules::default())
        .unwrap()
        .unwrap();
    editor.set_destination(3);
    editor.set_aircraft(2);
    assert_eq!(editor.save(&mut db).unwrap(), SaveOutcome::Saved(id));

    let flight = db.get_flight(id).unwrap().unwrap();
    assert_eq!(flight.destination_id, 3);
    assert_eq!(flight.aircraft_id, 2);
    assert_eq!(flight_count(&db), 1);
}

#[test]
fn test_rejected_save_writes_nothing() {
    let mut db = testing::seeded_db();
    let mut editor = complete_editor(ScheduleRules::default());
    editor.set_arrival_time(ts(10));

    assert_eq!(
        editor.save(&mut db).unwrap(),
        SaveOutcome::Rejected(ValidationError::TimeTravel)
    );
    assert_eq!(editor.flight_id(), None);
    assert_eq!(flight_count(&db), 0);
}

#[test]
fn test_reversed_times_scenario_keeps_editing_and_writes_nothing() {
    let mut db = testing::seeded_db();
    add_pilots(&mut db, 2);

    let mut console = ScriptedConsole::new([
        "1", "1", // source
        "2", "2", // destination
        "3", "01/01/2025 10:00", // departure
        "4", "01/01/2025 09:00", // arrival
        "6", "1", // aircraft
        "5", "1", "5", "3", // pilots
        "8", // save
        "9", "1", // cancel, confirm
    ]);
    let outcome = FlightEditor::new(ScheduleRules::default())
        .run(&mut db, &mut Prompter::new(&mut console))
        .unwrap();

    assert_eq!(outcome, EditorOutcome::Cancelled);
    assert!(console
        .output()
        .contains("Arrival time is before departure time - no time travelling allowed"));
    assert!(console.output().contains("Are you sure you don't want to save your changes?"));
    assert_eq!(console.remaining(), 0);
    assert_eq!(flight_count(&db), 0);
}

#[test]
fn test_run_creates_flight_and_offers_save_gate() {
    let mut db = testing::seeded_db();
    let mut console = ScriptedConsole::new([
        "1", "1", "2", "3", "3", "01/02/2025 08:00", "4", "01/02/2025 20:30", "6", "2", "5", "1",
        "2", "1", "1", "3", "8", "2",
    ]);

    let outcome = FlightEditor::new(ScheduleRules::default())
        .run(&mut db, &mut Prompter::new(&mut console))
        .unwrap();

    assert_eq!(outcome, EditorOutcome::Saved(1));
    assert!(console.output().contains("Flight 1 saved"));
    assert!(console.output().contains("Save changes?"));

    let flight = db.get_flight(1).unwrap().unwrap();
    assert_eq!(flight.source_id, 1);
    assert_eq!(flight.destination_id, 3);
    assert_eq!(flight.aircraft_id, 2);
    assert_eq!(flight.departure_time, parse_datetime("01/02/2025 08:00").unwrap());
    assert_eq!(db.flight_pilot_ids(1).unwrap(), BTreeSet::from([1, 2]));
}

#[test]
fn test_menu_shows_current_values() {
    let mut db = testing::seeded_db();
    let id = testing::add_flight(&mut db, 1, 2, 0, 3_600_000, 2, &[2, 3]);
    let mut console = ScriptedConsole::new(["9"]);

    let mut editor = FlightEditor::open(&db, id, ScheduleRules::default())
        .unwrap()
        .unwrap();
    let outcome = editor.run(&mut db, &mut Prompter::new(&mut console)).unwrap();

    assert_eq!(outcome, EditorOutcome::Cancelled);
    let output = console.output();
    assert!(output.contains("1. Change Source - Heathrow"));
    assert!(output.contains("2. Change Destination - Schiphol"));
    assert!(output.contains("3. Change Departure Time - 01/01/1970 00:00"));
    assert!(output.contains("4. Change Arrival Time - 01/01/1970 01:00"));
    assert!(output.contains("5. Change Pilots - Chuck Yeager, Bessie Coleman"));
    assert!(output.contains("6. Change Aircraft - B777"));
    assert!(!output.contains("Are you sure"));
}

#[test]
fn test_run_deletes_existing_flight() {
    let mut db = testing::seeded_db();
    let id = testing::add_flight(&mut db, 1, 2, 1_000, 2_000, 1, &[1]);
    let mut console = ScriptedConsole::new(["7", "2"]);

    let mut editor = FlightEditor::open(&db, id, ScheduleRules::default())
        .unwrap()
        .unwrap();
    let outcome = editor.run(&mut db, &mut Prompter::new(&mut console)).unwrap();

    assert_eq!(outcome, EditorOutcome::Deleted(id));
    assert!(db.get_flight(id).unwrap().is_none());
    assert!(db.flight_pilot_ids(id).unwrap().is_empty());
}

#[test]
fn test_delete_unsaved_flight_is_refused() {
    let mut db = testing::seeded_db();
    let mut console = ScriptedConsole::new(["7", "9"]);

    let outcome = FlightEditor::new(ScheduleRules::default())
        .run(&mut db, &mut Prompter::new(&mut console))
        .unwrap();

    assert_eq!(outcome, EditorOutcome::Cancelled);
    assert!(console.output().contains("This flight has not been saved yet"));
}

#[test]
fn test_declining_cancel_keeps_editing() {
    let mut db = testing::seeded_db();
    let mut console = ScriptedConsole::new(["6", "1", "9", "2", "9", "1"]);

    let mut editor = FlightEditor::new(ScheduleRules::default());
    let outcome = editor.run(&mut db, &mut Prompter::new(&mut console)).unwrap();

    assert_eq!(outcome, EditorOutcome::Cancelled);
    assert_eq!(editor.draft().aircraft_id, Some(1));
    assert_eq!(
        console
            .output()
            .matches("Are you sure you don't want to save your changes?")
            .count(),
        2
    );
}
