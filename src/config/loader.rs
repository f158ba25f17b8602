//! Configuration file discovery and loading.
//!
//! Settings are layered, later layers overriding earlier ones:
//! 1. Built-in defaults
//! 2. Config file (`--config`, else `./bucket-loader.yml`, else
//!    `~/.config/bucket-loader/config.yml`)
//! 3. `BUCKET_LOADER_*` environment variables
//! 4. Command-line flags ([`ConfigOverrides`])

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::parse_ttl;
use crate::config::schema::LoaderConfig;
use crate::error::{LoaderError, Result};

/// Project-local config file name.
pub const CONFIG_FILE_NAME: &str = "bucket-loader.yml";

/// Environment variable names, in the order they are applied.
pub const ENV_BUCKET: &str = "BUCKET_LOADER_BUCKET";
pub const ENV_CACHE_PATH: &str = "BUCKET_LOADER_CACHE_PATH";
pub const ENV_TEMPLATE_FOLDER: &str = "BUCKET_LOADER_TEMPLATE_FOLDER";
pub const ENV_TTL: &str = "BUCKET_LOADER_TTL";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bucket: Option<String>,
    pub cache_path: Option<PathBuf>,
    pub template_folder: Option<String>,
    pub ttl: Option<Duration>,
}

/// Find the config file to use.
///
/// An explicit path is returned as-is (existence is checked on load).
pub fn find_config_file(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("bucket-loader").join("config.yml");
    if user.is_file() {
        Some(user)
    } else {
        None
    }
}

/// Parse a config file.
pub fn load_config_file(path: &Path) -> Result<LoaderConfig> {
    if !path.exists() {
        return Err(LoaderError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Ok(LoaderConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| LoaderError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `BUCKET_LOADER_*` variables looked up through `var`.
pub fn apply_env<F>(config: &mut LoaderConfig, var: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bucket) = var(ENV_BUCKET) {
        config.bucket = bucket;
    }
    if let Some(cache_path) = var(ENV_CACHE_PATH) {
        config.cache_path = PathBuf::from(cache_path);
    }
    if let Some(folder) = var(ENV_TEMPLATE_FOLDER) {
        config.template_folder = folder;
    }
    if let Some(ttl) = var(ENV_TTL) {
        config.ttl = parse_ttl(&ttl).map_err(|e| LoaderError::ConfigValidationError {
            message: format!("{}: {}", ENV_TTL, e),
        })?;
    }
    Ok(())
}

/// Apply command-line overrides.
pub fn apply_overrides(config: &mut LoaderConfig, overrides: &ConfigOverrides) {
    if let Some(bucket) = &overrides.bucket {
        config.bucket = bucket.clone();
    }
    if let Some(cache_path) = &overrides.cache_path {
        config.cache_path = cache_path.clone();
    }
    if let Some(folder) = &overrides.template_folder {
        config.template_folder = folder.clone();
    }
    if let Some(ttl) = overrides.ttl {
        config.ttl = ttl;
    }
}

/// Load the fully layered configuration.
pub fn load_config(
    explicit: Option<&Path>,
    cwd: &Path,
    overrides: &ConfigOverrides,
) -> Result<LoaderConfig> {
    let mut config = match find_config_file(explicit, cwd) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => LoaderConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    apply_overrides(&mut config, overrides);

    Ok(config)
}
