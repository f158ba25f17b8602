//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.

pub mod cache;
pub mod dispatcher;
pub mod get;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
