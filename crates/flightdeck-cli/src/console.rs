//! Console backed by the process's stdin and stdout.

use std::io::{self, BufRead, Write};

use flightdeck_core::Console;

use crate::renderer::TerminalRenderer;

pub struct TerminalConsole {
    renderer: TerminalRenderer,
}

impl TerminalConsole {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut out = io::stdout().lock();
        write!(out, "{prompt}")?;
        out.flush()?;
        drop(out);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_heading(&mut self, text: &str) -> io::Result<()> {
        self.renderer.heading(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.renderer.line(text)
    }

    fn write_notice(&mut self, text: &str) -> io::Result<()> {
        self.renderer.notice(text)
    }
}
