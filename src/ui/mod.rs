//! Command output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] writing to stdout/stderr
//! - [`MockUI`] recording output for tests
//!
//! Template content and listings go to stdout; status lines go to stderr
//! so `bucket-loader get page.html > page.html` captures only the template.

pub mod mock;
pub mod terminal;

pub use mock::MockUI;
pub use terminal::TerminalUI;

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Write raw content to stdout, unmodified.
    fn content(&mut self, text: &str);

    /// Display a message line on stdout.
    fn message(&mut self, msg: &str);

    /// Display a success status line.
    fn success(&mut self, msg: &str);

    /// Display a warning status line.
    fn warning(&mut self, msg: &str);

    /// Display an error status line.
    fn error(&mut self, msg: &str);
}
