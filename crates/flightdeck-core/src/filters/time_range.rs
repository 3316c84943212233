//! Time window criterion.

use std::fmt;

use jiff::Timestamp;

use super::Predicate;
use crate::{display::DisplayTime, error::Result, prompt::Prompter};

/// Optional lower and upper bounds on a timestamp column.
///
/// Both bounds are exclusive. They are never reordered: a start later than
/// the end simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

#[derive(Clone, Copy)]
enum RangeAction {
    Start,
    End,
    Done,
}

impl TimeRange {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is set.
    pub fn is_any(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Renders the bounds against `column`, or `None` when unbounded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flightdeck_core::filters::TimeRange;
    /// use jiff::Timestamp;
    ///
    /// let start = Timestamp::from_millisecond(1_000).unwrap();
    /// let range = TimeRange::new(Some(start), None);
    /// let predicate = range.render("departure_time").unwrap();
    /// assert_eq!(predicate.sql, "departure_time > ?");
    /// assert_eq!(predicate.params, vec![1_000]);
    ///
    /// assert!(TimeRange::default().render("departure_time").is_none());
    /// ```
    pub fn render(&self, column: &str) -> Option<Predicate> {
        match (self.start, self.end) {
            (None, None) => None,
            (Some(start), None) => Some(Predicate::new(
                format!("{column} > ?"),
                vec![start.as_millisecond()],
            )),
            (None, Some(end)) => Some(Predicate::new(
                format!("{column} < ?"),
                vec![end.as_millisecond()],
            )),
            (Some(start), Some(end)) => Some(Predicate::new(
                format!("{column} > ? AND {column} < ?"),
                vec![start.as_millisecond(), end.as_millisecond()],
            )),
        }
    }

    /// Lets the user set or clear either bound until they choose Done.
    pub fn modify(&mut self, prompter: &mut Prompter<'_>) -> Result<()> {
        loop {
            let action = prompter.menu(
                "Select an option:",
                vec![
                    (format!("Change Start - {}", bound(self.start.as_ref())), RangeAction::Start),
                    (format!("Change End - {}", bound(self.end.as_ref())), RangeAction::End),
                    ("Done".to_string(), RangeAction::Done),
                ],
            )?;

            match action {
                RangeAction::Start => self.start = prompter.read_optional_datetime()?,
                RangeAction::End => self.end = prompter.read_optional_datetime()?,
                RangeAction::Done => return Ok(()),
            }
        }
    }
}

fn bound(ts: Option<&Timestamp>) -> String {
    ts.map_or_else(|| "Any".to_string(), |ts| DisplayTime(ts).to_string())
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start, &self.end) {
            (None, None) => write!(f, "Any"),
            (Some(start), None) => write!(f, "After {}", DisplayTime(start)),
            (None, Some(end)) => write!(f, "Before {}", DisplayTime(end)),
            (Some(start), Some(end)) => {
                write!(f, "From {} to {}", DisplayTime(start), DisplayTime(end))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millisecond(millis).unwrap()
    }

    #[test]
    fn test_render_unbounded_is_none() {
        assert!(TimeRange::default().render("arrival_time").is_none());
    }

    #[test]
    fn test_render_end_only() {
        let predicate = TimeRange::new(None, Some(ts(500)))
            .render("arrival_time")
            .unwrap();
        assert_eq!(predicate.sql, "arrival_time < ?");
        assert_eq!(predicate.params, vec![500]);
    }

    #[test]
    fn test_render_both_bounds_is_strict_on_both_sides() {
        let predicate = TimeRange::new(Some(ts(100)), Some(ts(900)))
            .render("departure_time")
            .unwrap();
        assert_eq!(predicate.sql, "departure_time > ? AND departure_time < ?");
        assert_eq!(predicate.params, vec![100, 900]);
    }

    #[test]
    fn test_render_never_swaps_reversed_bounds() {
        let predicate = TimeRange::new(Some(ts(900)), Some(ts(100)))
            .render("departure_time")
            .unwrap();
        assert_eq!(predicate.sql, "departure_time > ? AND departure_time < ?");
        assert_eq!(predicate.params, vec![900, 100]);
    }

    #[test]
    fn test_display_descriptions() {
        let start = crate::display::parse_datetime("01/01/2025 10:00").unwrap();
        let end = crate::display::parse_datetime("02/01/2025 10:00").unwrap();

        assert_eq!(TimeRange::default().to_string(), "Any");
        assert_eq!(
            TimeRange::new(Some(start), None).to_string(),
            "After 01/01/2025 10:00"
        );
        assert_eq!(
            TimeRange::new(None, Some(end)).to_string(),
            "Before 02/01/2025 10:00"
        );
        assert_eq!(
            TimeRange::new(Some(start), Some(end)).to_string(),
            "From 01/01/2025 10:00 to 02/01/2025 10:00"
        );
    }

    #[test]
    fn test_modify_sets_and_clears_bounds() {
        let mut range = TimeRange::new(Some(ts(0)), None);
        let mut console = ScriptedConsole::new([
            "1", "NONE", // clear start
            "2", "05/05/2025 12:30", // set end
            "3",
        ]);
        range
            .modify(&mut Prompter::new(&mut console))
            .expect("modify should finish");

        assert_eq!(range.start, None);
        assert_eq!(
            range.end,
            Some(crate::display::parse_datetime("05/05/2025 12:30").unwrap())
        );
    }

    #[test]
    fn test_modify_reprompts_malformed_dates() {
        let mut range = TimeRange::default();
        let mut console = ScriptedConsole::new(["1", "yesterday", "2025-01-01", "none", "3"]);
        range
            .modify(&mut Prompter::new(&mut console))
            .expect("modify should finish");

        assert!(range.is_any());
        assert_eq!(console.output().matches("Invalid input").count(), 2);
    }
}
