//! Cache command implementations.
//!
//! Provides `bucket-loader list`, `bucket-loader clear` and
//! `bucket-loader stats`. None of these need the remote store.

use anyhow::Result;
use clap::Args;
use std::time::Duration;

use crate::cache::{format_duration, DiskCache};
use crate::config::LoaderConfig;
use crate::path::LogicalPath;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Show detailed information
    #[arg(long)]
    pub verbose: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the clear command.
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    /// Only clear expired entries
    #[arg(long)]
    pub expired: bool,
}

/// Which cache operation to run.
#[derive(Debug, Clone)]
pub enum CacheAction {
    List(ListArgs),
    Clear(ClearArgs),
    Stats,
}

/// The cache command implementation.
pub struct CacheCommand {
    config: LoaderConfig,
    action: CacheAction,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(config: LoaderConfig, action: CacheAction) -> Self {
        Self { config, action }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let cache = DiskCache::new(&self.config.cache_path);

        match &self.action {
            CacheAction::List(args) => list_cache(&cache, args.verbose, args.json, ui)?,
            CacheAction::Clear(args) => clear_cache(&cache, args.expired, ui)?,
            CacheAction::Stats => show_stats(&cache, ui)?,
        }

        Ok(CommandResult::success())
    }
}

fn list_cache(cache: &DiskCache, verbose: bool, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let entries = cache.list()?;

    if json {
        let output = serde_json::to_string_pretty(&entries)?;
        ui.message(&output);
        return Ok(());
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(());
    }

    ui.message(&format!("{} cached entries:\n", entries.len()));

    let now = cache.now();
    for entry in entries {
        let status = if entry.is_expired(now) {
            "expired"
        } else {
            "fresh"
        };
        let remaining = entry.metadata.remaining_ttl(now);
        let ttl_str = if remaining > 0 {
            format_duration(Duration::from_secs(remaining as u64))
        } else {
            "expired".to_string()
        };

        if verbose {
            ui.message(&format!("  {}", entry.key));
            ui.message(&format!("    Status: {}", status));
            ui.message(&format!("    TTL: {}", ttl_str));
            ui.message(&format!("    Size: {} bytes", entry.metadata.size_bytes));
            ui.message(&format!("    Cached at: {}", entry.metadata.cached_at.to_rfc3339()));
            if let Ok(path) = LogicalPath::parse(&entry.key) {
                ui.message(&format!("    File: {}", cache.content_path(&path).display()));
            }
            ui.message("");
        } else {
            ui.message(&format!("  {} [{}] {}", entry.key, status, ttl_str));
        }
    }

    Ok(())
}

fn clear_cache(cache: &DiskCache, expired_only: bool, ui: &mut dyn UserInterface) -> Result<()> {
    if expired_only {
        let removed = cache.purge_expired()?;
        ui.success(&format!("Cleared {} expired entries", removed));
        return Ok(());
    }

    let count = cache.clear()?;
    tracing::info!("Cleared template cache at {}", cache.root().display());
    ui.success(&format!("Cleared {} cached entries", count));
    Ok(())
}

fn show_stats(cache: &DiskCache, ui: &mut dyn UserInterface) -> Result<()> {
    let stats = cache.stats()?;

    ui.message(&format!("Cache directory: {}", cache.root().display()));
    ui.message(&format!("Total entries: {}", stats.entries));
    ui.message(&format!("Fresh entries: {}", stats.entries - stats.expired));
    ui.message(&format!("Expired entries: {}", stats.expired));
    ui.message(&format!("Total size: {} bytes", stats.total_bytes));

    Ok(())
}
