//! ID set criterion over pilots, aircraft or destinations.

use std::{collections::BTreeSet, fmt, marker::PhantomData};

use log::debug;

use super::{placeholders, Predicate};
use crate::{
    db::Database,
    display::record_table,
    error::Result,
    models::Record,
    prompt::Prompter,
};

/// Restricts flights to those related to any of a set of `R` records.
///
/// `column` is the flight column holding the foreign key (`source_id`,
/// `destination_id`, `aircraft_id`); for pilots it is the flight `id`, which
/// is matched against the join table. An empty set places no restriction.
pub struct MembershipSet<R: Record> {
    column: &'static str,
    ids: BTreeSet<u64>,
    kind: PhantomData<fn() -> R>,
}

#[derive(Clone, Copy)]
enum SelectionAction {
    Add,
    Remove,
    AllowAny,
    Done,
}

impl<R: Record> MembershipSet<R> {
    /// An unrestricted set over `column`.
    pub fn new(column: &'static str) -> Self {
        Self {
            column,
            ids: BTreeSet::new(),
            kind: PhantomData,
        }
    }

    pub fn ids(&self) -> &BTreeSet<u64> {
        &self.ids
    }

    /// True when the set matches any flight.
    pub fn is_any(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds an ID; returns false if it was already selected.
    pub fn insert(&mut self, id: u64) -> bool {
        self.ids.insert(id)
    }

    /// Removes an ID; returns false if it was not selected.
    pub fn remove(&mut self, id: u64) -> bool {
        self.ids.remove(&id)
    }

    /// Back to "any".
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Renders the membership test, or `None` for the empty set.
    pub fn render(&self) -> Option<Predicate> {
        if self.ids.is_empty() {
            return None;
        }
        let sql = R::membership_predicate(self.column, &placeholders(self.ids.len()));
        let params = self.ids.iter().map(|&id| id as i64).collect();
        Some(Predicate::new(sql, params))
    }

    /// Names of the selected records, or `Any`.
    pub fn describe(&self, db: &Database) -> Result<String> {
        if self.ids.is_empty() {
            return Ok("Any".to_string());
        }
        let mut labels = Vec::with_capacity(self.ids.len());
        for &id in &self.ids {
            let label = db
                .get_record::<R>(id)?
                .map_or_else(|| format!("[ID {id}]"), |record| record.label());
            labels.push(label);
        }
        Ok(labels.join(", "))
    }

    /// Add, remove or clear IDs until the user chooses Done or Allow Any.
    ///
    /// Only IDs present in the live table are accepted.
    pub fn modify(&mut self, db: &Database, prompter: &mut Prompter<'_>) -> Result<()> {
        let records = db.list_records::<R>()?;
        if records.is_empty() {
            prompter.notice(&format!(
                "No {} records - add more from main menu",
                R::KIND.to_lowercase()
            ))?;
            return Ok(());
        }
        let all_ids: Vec<u64> = records.iter().map(Record::id).collect();

        loop {
            prompter.table(&record_table(&records, Some(&self.ids)))?;

            let action = prompter.menu(
                "Add or Remove",
                vec![
                    ("Add".to_string(), SelectionAction::Add),
                    ("Remove".to_string(), SelectionAction::Remove),
                    ("Allow Any".to_string(), SelectionAction::AllowAny),
                    ("Done".to_string(), SelectionAction::Done),
                ],
            )?;

            match action {
                SelectionAction::Add => {
                    prompter.line("Select ID to add")?;
                    let id = prompter.read_id(&all_ids)?;
                    if !self.insert(id) {
                        prompter.notice("ID already selected")?;
                    }
                }
                SelectionAction::Remove => {
                    prompter.line("Select ID to remove")?;
                    let id = prompter.read_id(&all_ids)?;
                    if !self.remove(id) {
                        prompter.notice("ID not already selected")?;
                    }
                }
                SelectionAction::AllowAny => {
                    self.clear();
                    debug!("{} filter on {} cleared", R::KIND, self.column);
                    return Ok(());
                }
                SelectionAction::Done => return Ok(()),
            }
        }
    }
}

impl<R: Record> Clone for MembershipSet<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            ids: self.ids.clone(),
            kind: PhantomData,
        }
    }
}

impl<R: Record> PartialEq for MembershipSet<R> {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.ids == other.ids
    }
}

impl<R: Record> Eq for MembershipSet<R> {}

impl<R: Record> fmt::Debug for MembershipSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipSet")
            .field("kind", &R::KIND)
            .field("column", &self.column)
            .field("ids", &self.ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        console::ScriptedConsole,
        models::{Aircraft, Destination, Pilot},
        params::NewAircraft,
    };

    #[test]
    fn test_empty_set_renders_nothing() {
        let set = MembershipSet::<Aircraft>::new("aircraft_id");
        assert!(set.is_any());
        assert!(set.render().is_none());
    }

    #[test]
    fn test_foreign_key_kinds_render_in_list() {
        let mut set = MembershipSet::<Destination>::new("source_id");
        set.insert(5);
        set.insert(2);
        let predicate = set.render().unwrap();
        assert_eq!(predicate.sql, "source_id IN (?, ?)");
        assert_eq!(predicate.params, vec![2, 5]);
    }

    #[test]
    fn test_pilot_kind_renders_join_subquery() {
        let mut set = MembershipSet::<Pilot>::new("id");
        set.insert(7);
        let predicate = set.render().unwrap();
        assert_eq!(
            predicate.sql,
            "id IN (SELECT flight_id FROM pilot_flights WHERE pilot_id IN (?))"
        );
        assert_eq!(predicate.params, vec![7]);
    }

    #[test]
    fn test_insert_and_remove_report_changes() {
        let mut set = MembershipSet::<Aircraft>::new("aircraft_id");
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(!set.remove(2));
        assert!(set.remove(1));
        assert!(set.is_any());
    }

    fn db_with_aircraft(names: &[&str]) -> Database {
        let mut db = Database::open_in_memory().expect("Failed to open database");
        for name in names {
            db.add_aircraft(&NewAircraft {
                name: name.to_string(),
            })
            .expect("Failed to add aircraft");
        }
        db
    }

    #[test]
    fn test_modify_rejects_unknown_ids() {
        let db = db_with_aircraft(&["A320", "B777"]);
        let mut set = MembershipSet::<Aircraft>::new("aircraft_id");
        let mut console = ScriptedConsole::new(["1", "9", "2", "4"]);

        set.modify(&db, &mut Prompter::new(&mut console))
            .expect("modify should finish");

        assert_eq!(set.ids().iter().copied().collect::<Vec<_>>(), vec![2]);
        assert!(console.output().contains("Invalid ID"));
    }

    #[test]
    fn test_modify_allow_any_clears() {
        let db = db_with_aircraft(&["A320"]);
        let mut set = MembershipSet::<Aircraft>::new("aircraft_id");
        set.insert(1);
        let mut console = ScriptedConsole::new(["3"]);

        set.modify(&db, &mut Prompter::new(&mut console))
            .expect("modify should finish");

        assert!(set.is_any());
    }

    #[test]
    fn test_modify_reports_redundant_changes() {
        let db = db_with_aircraft(&["A320"]);
        let mut set = MembershipSet::<Aircraft>::new("aircraft_id");
        let mut console = ScriptedConsole::new(["1", "1", "1", "1", "2", "1", "2", "1", "4"]);

        set.modify(&db, &mut Prompter::new(&mut console))
            .expect("modify should finish");

        assert!(set.is_any());
        assert!(console.output().contains("ID already selected"));
        assert!(console.output().contains("ID not already selected"));
    }

    #[test]
    fn test_describe_uses_labels() {
        let db = db_with_aircraft(&["A320", "B777"]);
        let mut set = MembershipSet::<Aircraft>::new("aircraft_id");
        assert_eq!(set.describe(&db).unwrap(), "Any");

        set.insert(2);
        set.insert(1);
        set.insert(99);
        assert_eq!(set.describe(&db).unwrap(), "A320, B777, [ID 99]");
    }
}
