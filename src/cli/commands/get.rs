//! Get command implementation.
//!
//! `bucket-loader get <name>` resolves a template exactly as an embedding
//! engine would and prints it.

use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::policy::StaticFallback;
use crate::resolver::{Origin, TemplateResolver};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the get command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Template name, relative to the template folder
    pub name: String,

    /// File to serve instead when the template does not exist
    #[arg(long)]
    pub fallback: Option<PathBuf>,
}

/// The get command implementation.
pub struct GetCommand {
    config: LoaderConfig,
    args: GetArgs,
}

impl GetCommand {
    /// Create a new get command.
    pub fn new(config: LoaderConfig, args: GetArgs) -> Self {
        Self { config, args }
    }

    fn build_resolver(&self) -> Result<TemplateResolver> {
        let resolver = TemplateResolver::from_config(&self.config)?;

        match &self.args.fallback {
            Some(path) => {
                let content = fs::read(path)?;
                Ok(resolver.with_not_found_policy(StaticFallback::new(content)))
            }
            None => Ok(resolver),
        }
    }
}

impl Command for GetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolver = self.build_resolver()?;
        let resolved = resolver.resolve(&self.args.name)?;

        ui.content(&resolved.content);

        match resolved.origin {
            Origin::Fallback => {
                ui.warning(&format!("{} not found, served fallback", resolved.path));
            }
            origin => {
                let how = if origin == Origin::Cache {
                    "cache hit"
                } else {
                    "fetched"
                };
                ui.success(&format!(
                    "{}: {} (up to date: {})",
                    how, resolved.path, resolved.up_to_date
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
