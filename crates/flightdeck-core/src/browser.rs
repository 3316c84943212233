//! The flight browser: filtered, paged listing with editing entry points.

use log::debug;

use crate::{
    db::Database,
    display::flight_table,
    editor::{FlightEditor, ScheduleRules},
    error::Result,
    filters::FilterSet,
    paginator::Paginator,
    prompt::Prompter,
};

/// Largest page size accepted at the console.
pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Clone, Copy)]
enum BrowserAction {
    Departure,
    Arrival,
    Sources,
    Destinations,
    Pilots,
    Aircraft,
    PreviousPage,
    NextPage,
    PageSize,
    Order,
    OpenFlight,
    AddFlight,
    Return,
}

/// Owns the current criteria and page position for one visit to the
/// flights screen.
#[derive(Debug, Clone)]
pub struct FlightBrowser {
    filters: FilterSet,
    paginator: Paginator,
    rules: ScheduleRules,
}

impl FlightBrowser {
    pub fn new(page_size: usize, rules: ScheduleRules) -> Self {
        Self {
            filters: FilterSet::default(),
            paginator: Paginator::new(page_size),
            rules,
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Shows the current page and menu until the user returns.
    ///
    /// The page is fetched again after every action; any change to the
    /// criteria or order sends the listing back to the first page.
    pub fn run(&mut self, db: &mut Database, prompter: &mut Prompter<'_>) -> Result<()> {
        loop {
            let flights = self.paginator.fetch(db, &self.filters.build_query())?;
            if flights.is_empty() {
                prompter.line("[NO DATA FOR CRITERIA]")?;
            } else {
                prompter.table(&flight_table(&flights))?;
            }
            prompter.line(&format!("Page {}", self.paginator.page() + 1))?;
            prompter.line("")?;

            let before = self.filters.clone();
            let options = self.menu_options(db)?;
            match prompter.menu("Select an option:", options)? {
                BrowserAction::Departure => self.filters.departure.modify(prompter)?,
                BrowserAction::Arrival => self.filters.arrival.modify(prompter)?,
                BrowserAction::Sources => self.filters.sources.modify(db, prompter)?,
                BrowserAction::Destinations => self.filters.destinations.modify(db, prompter)?,
                BrowserAction::Pilots => self.filters.pilots.modify(db, prompter)?,
                BrowserAction::Aircraft => self.filters.aircraft.modify(db, prompter)?,
                BrowserAction::PreviousPage => {
                    self.paginator.previous();
                }
                BrowserAction::NextPage => {
                    self.paginator.next();
                }
                BrowserAction::PageSize => {
                    prompter.line("Choose an amount of results to display:")?;
                    let size = prompter.read_number_in(1..=MAX_PAGE_SIZE)?;
                    self.paginator.set_page_size(size as usize);
                }
                BrowserAction::Order => self.filters.toggle_order(),
                BrowserAction::OpenFlight => {
                    prompter.line("Enter flight ID:")?;
                    let id = prompter.read_any_id()?;
                    match FlightEditor::open(db, id, self.rules)? {
                        Some(mut editor) => {
                            let outcome = editor.run(db, prompter)?;
                            debug!("Editor for flight {id} finished: {outcome:?}");
                        }
                        None => prompter.notice("Invalid flight ID")?,
                    }
                }
                BrowserAction::AddFlight => {
                    let outcome = FlightEditor::new(self.rules).run(db, prompter)?;
                    debug!("New flight editor finished: {outcome:?}");
                }
                BrowserAction::Return => return Ok(()),
            }

            if self.filters != before {
                debug!("Criteria changed, back to first page");
                self.paginator.reset();
            }
        }
    }

    fn menu_options(&self, db: &Database) -> Result<Vec<(String, BrowserAction)>> {
        let filters = &self.filters;
        let previous = if self.paginator.has_previous() {
            "Previous Page"
        } else {
            "No Previous Page"
        };
        let next = if self.paginator.has_next() {
            "Next Page"
        } else {
            "No Next Page"
        };
        let order = if filters.ascending {
            "Ascending"
        } else {
            "Descending"
        };

        Ok(vec![
            (
                format!("Change Departure Time Range - {}", filters.departure),
                BrowserAction::Departure,
            ),
            (
                format!("Change Arrival Time Range - {}", filters.arrival),
                BrowserAction::Arrival,
            ),
            (
                format!("Change Sources - {}", filters.sources.describe(db)?),
                BrowserAction::Sources,
            ),
            (
                format!("Change Destinations - {}", filters.destinations.describe(db)?),
                BrowserAction::Destinations,
            ),
            (
                format!("Change Pilots - {}", filters.pilots.describe(db)?),
                BrowserAction::Pilots,
            ),
            (
                format!("Change Aircraft - {}", filters.aircraft.describe(db)?),
                BrowserAction::Aircraft,
            ),
            (previous.to_string(), BrowserAction::PreviousPage),
            (next.to_string(), BrowserAction::NextPage),
            (
                format!("Change Results Per Page - {}", self.paginator.page_size()),
                BrowserAction::PageSize,
            ),
            (
                format!("Change Result Order - Departure Time {order}"),
                BrowserAction::Order,
            ),
            ("View/Modify/Delete Flight".to_string(), BrowserAction::OpenFlight),
            ("Add Flight".to_string(), BrowserAction::AddFlight),
            ("Return".to_string(), BrowserAction::Return),
        ])
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{console::ScriptedConsole, params::NewPilot, testing};

    const RETURN: &str = "13";

    fn browse(db: &mut Database, browser: &mut FlightBrowser, input: &[&str]) -> String {
        let mut console = ScriptedConsole::new(input.iter().copied());
        browser
            .run(db, &mut Prompter::new(&mut console))
            .expect("browser should return");
        assert_eq!(console.remaining(), 0);
        console.output().to_string()
    }

    fn db_with_flights(count: usize) -> Database {
        let mut db = testing::seeded_db();
        for i in 0..count {
            let departure = 86_400_000 + i as i64 * 3_600_000;
            testing::add_flight(&mut db, 1, 2, departure, departure + 1_800_000, 1, &[1]);
        }
        db
    }

    #[test]
    fn test_empty_listing() {
        let mut db = testing::seeded_db();
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        let output = browse(&mut db, &mut browser, &[RETURN]);

        assert!(output.contains("[NO DATA FOR CRITERIA]"));
        assert!(output.contains("Page 1"));
        assert!(output.contains("7. No Previous Page"));
        assert!(output.contains("8. No Next Page"));
        assert!(output.contains("Change Sources - Any"));
        assert!(output.contains("Change Result Order - Departure Time Ascending"));
    }

    #[test]
    fn test_next_page_then_order_change_resets() {
        let mut db = db_with_flights(6);
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        let output = browse(&mut db, &mut browser, &["8", "10", RETURN]);

        assert!(output.contains("Page 2"));
        assert!(output.contains("Change Result Order - Departure Time Descending"));
        assert_eq!(browser.paginator().page(), 0);
        assert!(!browser.filters().ascending);
    }

    #[test]
    fn test_page_navigation_keeps_filters() {
        let mut db = db_with_flights(6);
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        browser.filters_mut().aircraft.insert(1);

        browse(&mut db, &mut browser, &["8", RETURN]);
        assert_eq!(browser.paginator().page(), 1);
        assert!(browser.filters().aircraft.ids().contains(&1));
    }

    #[test]
    fn test_change_page_size() {
        let mut db = db_with_flights(3);
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        let output = browse(&mut db, &mut browser, &["9", "0", "two", "2", RETURN]);

        assert_eq!(browser.paginator().page_size(), 2);
        assert_eq!(output.matches("Invalid input").count(), 2);
        assert!(output.contains("Change Results Per Page - 2"));
        assert!(output.contains("8. Next Page"));
    }

    #[test]
    fn test_unknown_flight_id_is_reported() {
        let mut db = db_with_flights(1);
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        let output = browse(&mut db, &mut browser, &["11", "99", RETURN]);

        assert!(output.contains("Invalid flight ID"));
    }

    #[test]
    fn test_open_flight_and_delete_it() {
        let mut db = db_with_flights(2);
        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        browse(&mut db, &mut browser, &["11", "1", "7", "2", RETURN]);

        assert!(db.get_flight(1).unwrap().is_none());
        assert!(db.get_flight(2).unwrap().is_some());
    }

    #[test]
    fn test_pilot_filter_matches_join_rows() {
        let mut db = testing::seeded_db();
        for i in 4..=7 {
            db.add_pilot(&NewPilot {
                name: format!("Pilot{i}"),
                surname: "Test".to_string(),
                date_joined: date(2022, 3, 1),
            })
            .unwrap();
        }
        testing::add_flight(&mut db, 1, 2, 1_000, 2_000, 1, &[7]);
        testing::add_flight(&mut db, 1, 2, 3_000, 4_000, 1, &[1]);
        testing::add_flight(&mut db, 2, 1, 5_000, 6_000, 1, &[2, 7]);
        testing::add_flight(&mut db, 2, 1, 7_000, 8_000, 1, &[3]);

        let mut browser = FlightBrowser::new(5, ScheduleRules::default());
        browser.filters_mut().pilots.insert(7);
        let query = browser.filters().build_query();
        let ids: Vec<u64> = db
            .search_flights(&query, 10, 0)
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let output = browse(&mut db, &mut browser, &[RETURN]);
        assert!(output.contains("Change Pilots - Pilot7 Test"));
    }
}
