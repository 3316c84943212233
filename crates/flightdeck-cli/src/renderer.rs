//! Terminal rendering for menus, notices and reports
//!
//! This module styles console output using termimad, with an optional
//! fallback to plain text.

use std::io::{self, Write};

use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);

        Self { rich_enabled, skin }
    }

    /// Menu headings, in blue when rich.
    pub fn heading(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            writeln!(out, "\x1b[34m{text}\x1b[0m")
        } else {
            writeln!(out, "{text}")
        }
    }

    /// Unstyled output. Tables and user-entered names go through here so
    /// nothing in them is read as markdown.
    pub fn line(&self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{text}")
    }

    /// Warnings and rejected input, bold yellow when rich.
    pub fn notice(&self, text: &str) -> io::Result<()> {
        if self.rich_enabled {
            self.skin.print_inline(&format!("**{}**", text.replace('*', "\\*")));
            writeln!(io::stdout().lock())
        } else {
            self.line(text)
        }
    }

    /// Multi-line report text; section titles (unindented lines ending in a
    /// colon) are shown as headings.
    pub fn report(&self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            if is_section_title(line) {
                self.heading(line)?;
            } else {
                self.line(line)?;
            }
        }
        Ok(())
    }
}

/// Unindented report lines ending in a colon open a section.
fn is_section_title(line: &str) -> bool {
    !line.starts_with('\t') && line.ends_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_rich_renderer() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_section_titles() {
        assert!(is_section_title("Flights:"));
        assert!(is_section_title(
            "The following flight IDs have no pilots assigned to them:"
        ));
        assert!(!is_section_title("\tTotal Flights: 3"));
        assert!(!is_section_title("Checks complete"));
    }
}
