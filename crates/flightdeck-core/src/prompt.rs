//! Numbered menus and validated input on top of a [`Console`].
//!
//! Every reader here loops until it gets acceptable input: malformed or
//! out-of-range entries print `Invalid input` (unknown record IDs print
//! `Invalid ID`) and ask again. The only errors that escape are console
//! failures and [`FlightdeckError::InputClosed`].

use std::ops::RangeInclusive;

use jiff::{civil::Date, Timestamp};

use crate::{
    console::Console,
    display::{parse_date, parse_datetime, Table},
    error::{FlightdeckError, Result},
};

const PROMPT: &str = "> ";
const INVALID_INPUT: &str = "Invalid input";

/// Menu and input helper borrowing a console for the length of a workflow.
pub struct Prompter<'c> {
    console: &'c mut dyn Console,
}

#[derive(Clone, Copy)]
enum YesNo {
    Yes,
    No,
}

impl<'c> Prompter<'c> {
    pub fn new(console: &'c mut dyn Console) -> Self {
        Self { console }
    }

    pub fn heading(&mut self, text: &str) -> Result<()> {
        Ok(self.console.write_heading(text)?)
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        Ok(self.console.write_line(text)?)
    }

    /// Writes a notice followed by a blank line.
    pub fn notice(&mut self, text: &str) -> Result<()> {
        self.console.write_notice(text)?;
        Ok(self.console.write_line("")?)
    }

    /// Writes a table, one console line per row.
    pub fn table(&mut self, table: &Table) -> Result<()> {
        for row in table.to_string().lines() {
            self.console.write_line(row)?;
        }
        Ok(())
    }

    fn read(&mut self) -> Result<String> {
        match self.console.read_line(PROMPT)? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(FlightdeckError::InputClosed),
        }
    }

    /// Shows a numbered menu and returns the value paired with the chosen
    /// entry.
    pub fn menu<A: Copy>(&mut self, heading: &str, options: Vec<(String, A)>) -> Result<A> {
        self.heading(heading)?;
        for (i, (label, _)) in options.iter().enumerate() {
            self.line(&format!("{}. {label}", i + 1))?;
        }

        loop {
            let input = self.read()?;
            let choice = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i));
            match choice {
                Some((_, action)) => {
                    self.line("")?;
                    return Ok(*action);
                }
                None => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// Yes/No menu.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.menu(
            question,
            vec![("Yes".to_string(), YesNo::Yes), ("No".to_string(), YesNo::No)],
        )?;
        Ok(matches!(answer, YesNo::Yes))
    }

    /// Any integer.
    pub fn read_number(&mut self) -> Result<i64> {
        loop {
            match self.read()?.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// An integer within `range`.
    pub fn read_number_in(&mut self, range: RangeInclusive<i64>) -> Result<i64> {
        loop {
            match self.read()?.parse::<i64>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// A non-negative integer that may or may not name a record; the caller
    /// decides what an unknown ID means.
    pub fn read_any_id(&mut self) -> Result<u64> {
        loop {
            match self.read()?.parse::<u64>() {
                Ok(id) => return Ok(id),
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// One of `ids`.
    pub fn read_id(&mut self, ids: &[u64]) -> Result<u64> {
        loop {
            match self.read()?.parse::<u64>() {
                Ok(id) if ids.contains(&id) => return Ok(id),
                Ok(_) => self.line("Invalid ID")?,
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// A decimal number within `range`.
    pub fn read_float_in(&mut self, range: RangeInclusive<f64>) -> Result<f64> {
        loop {
            match self.read()?.parse::<f64>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// Free text after a label line.
    pub fn read_text(&mut self, label: &str) -> Result<String> {
        self.line(label)?;
        self.read()
    }

    /// Text whose length in characters lies within `length`.
    pub fn read_text_bounded(
        &mut self,
        label: &str,
        length: RangeInclusive<usize>,
        complaint: &str,
    ) -> Result<String> {
        self.line(label)?;
        loop {
            let text = self.read()?;
            if length.contains(&text.chars().count()) {
                return Ok(text);
            }
            self.line(complaint)?;
        }
    }

    /// A `dd/mm/yyyy hh:mm` instant.
    pub fn read_datetime(&mut self) -> Result<Timestamp> {
        loop {
            self.line("Enter the date and time in the format 'dd/mm/yyyy hh:mm'")?;
            match parse_datetime(&self.read()?) {
                Ok(ts) => return Ok(ts),
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// A `dd/mm/yyyy hh:mm` instant, or `none` (any case) for no value.
    pub fn read_optional_datetime(&mut self) -> Result<Option<Timestamp>> {
        loop {
            self.line("Enter either the date and time in the format 'dd/mm/yyyy hh:mm' or 'None'")?;
            let input = self.read()?;
            if input.eq_ignore_ascii_case("none") {
                return Ok(None);
            }
            match parse_datetime(&input) {
                Ok(ts) => return Ok(Some(ts)),
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }

    /// A `dd/mm/yyyy` date.
    pub fn read_date(&mut self) -> Result<Date> {
        loop {
            self.line("Enter the date in the format 'dd/mm/yyyy'")?;
            match parse_date(&self.read()?) {
                Ok(date) => return Ok(date),
                Err(_) => self.line(INVALID_INPUT)?,
            }
        }
    }
}
