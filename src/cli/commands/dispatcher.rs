//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::cache::{CacheAction, CacheCommand};
use super::get::GetCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] carrying the process exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
///
/// Failures are reported as `Err` and exit with 1 in `main`.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: LoaderConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the resolved configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config.clone();

        match &cli.command {
            Commands::Get(args) => GetCommand::new(config, args.clone()).execute(ui),
            Commands::List(args) => {
                CacheCommand::new(config, CacheAction::List(args.clone())).execute(ui)
            }
            Commands::Clear(args) => {
                CacheCommand::new(config, CacheAction::Clear(args.clone())).execute(ui)
            }
            Commands::Stats => CacheCommand::new(config, CacheAction::Stats).execute(ui),
        }
    }
}
