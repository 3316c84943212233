//! The console seam between the menu workflows and a terminal.
//!
//! Workflows in this crate never touch stdin or stdout. They talk to a
//! [`Console`] through [`crate::prompt::Prompter`]; the CLI supplies a
//! terminal implementation and tests use [`ScriptedConsole`].

use std::{collections::VecDeque, io};

/// Line-oriented input and styled output.
pub trait Console {
    /// Shows `prompt` and reads one line without its line terminator.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// A menu or section heading.
    fn write_heading(&mut self, text: &str) -> io::Result<()>;

    /// Ordinary output.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// A message the user should not miss: rejected input, validation
    /// failures, cascade warnings.
    fn write_notice(&mut self, text: &str) -> io::Result<()>;
}

/// A console fed from a fixed list of input lines that records everything
/// written to it.
///
/// # Examples
///
/// ```rust
/// use flightdeck_core::{console::ScriptedConsole, prompt::Prompter};
///
/// let mut console = ScriptedConsole::new(["7", "2"]);
/// let choice = Prompter::new(&mut console)
///     .menu(
///         "Pick one:",
///         vec![("First".to_string(), 'a'), ("Second".to_string(), 'b')],
///     )
///     .unwrap();
///
/// assert_eq!(choice, 'b');
/// assert!(console.output().contains("2. Second"));
/// assert!(console.output().contains("Invalid input"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far, including echoed input.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let line = self.input.pop_front();
        if let Some(line) = &line {
            self.output.push_str(prompt);
            self.output.push_str(line);
            self.output.push('\n');
        }
        Ok(line)
    }

    fn write_heading(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn write_notice(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text)
    }
}
