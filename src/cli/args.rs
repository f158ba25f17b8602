//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use super::commands::cache::{ClearArgs, ListArgs};
use super::commands::get::GetArgs;
use crate::cache::parse_ttl;
use crate::config::ConfigOverrides;

/// bucket-loader - Cached template loading from remote object stores.
#[derive(Debug, Parser)]
#[command(name = "bucket-loader")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./bucket-loader.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store to fetch from: s3://bucket, an http(s) URL, or a directory
    #[arg(short, long, global = true)]
    pub bucket: Option<String>,

    /// Local cache directory
    #[arg(long, global = true)]
    pub cache_path: Option<PathBuf>,

    /// Folder templates live under
    #[arg(long, global = true)]
    pub folder: Option<String>,

    /// Cache lifetime (e.g. 15m, 1h, 900)
    #[arg(long, global = true, value_parser = parse_ttl_arg)]
    pub ttl: Option<Duration>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags that override file and environment configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bucket: self.bucket.clone(),
            cache_path: self.cache_path.clone(),
            template_folder: self.folder.clone(),
            ttl: self.ttl,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a template and print its content
    Get(GetArgs),

    /// List cached templates
    List(ListArgs),

    /// Clear the template cache
    Clear(ClearArgs),

    /// Show cache statistics
    Stats,
}

fn parse_ttl_arg(value: &str) -> Result<Duration, String> {
    parse_ttl(value).map_err(|e| e.to_string())
}
