//! Terminal output.

use std::io::{self, Write};

use super::UserInterface;

/// Writes to the process's stdout and stderr.
#[derive(Debug, Default)]
pub struct TerminalUI {
    quiet: bool,
}

impl TerminalUI {
    /// Create a terminal UI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress success and warning lines.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn status(&self, prefix: &str, msg: &str) {
        let _ = writeln!(io::stderr().lock(), "{}{}", prefix, msg);
    }
}

impl UserInterface for TerminalUI {
    fn content(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn message(&mut self, msg: &str) {
        let _ = writeln!(io::stdout().lock(), "{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if !self.quiet {
            self.status("", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if !self.quiet {
            self.status("warning: ", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        self.status("", msg);
    }
}
