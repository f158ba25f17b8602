//! Loader configuration schema.
//!
//! ```yaml
//! bucket: s3://site-templates
//! cache_path: /var/cache/site/templates
//! template_folder: templates
//! ttl: 15m
//! timeout: 30s
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{default_cache_dir, format_duration, DEFAULT_TTL, MAX_TTL};
use crate::error::{LoaderError, Result};
use crate::path::{LogicalPath, DEFAULT_TEMPLATE_FOLDER};
use crate::store::DEFAULT_TIMEOUT;

/// Everything needed to build a [`TemplateResolver`](crate::TemplateResolver).
///
/// Immutable once the resolver is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Store identity: `s3://bucket`, an HTTP(S) base URL, or a directory.
    pub bucket: String,
    /// Local directory holding the template cache.
    pub cache_path: PathBuf,
    /// Folder templates live under, remotely and in the cache.
    pub template_folder: String,
    /// Lifetime of cached templates.
    #[serde(with = "duration_str")]
    pub ttl: Duration,
    /// Remote request timeout.
    #[serde(with = "duration_str")]
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            cache_path: default_cache_dir(),
            template_folder: DEFAULT_TEMPLATE_FOLDER.to_string(),
            ttl: DEFAULT_TTL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoaderConfig {
    /// Configuration for a bucket with every other setting defaulted.
    pub fn for_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    /// Check the values can produce a working resolver.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(LoaderError::ConfigValidationError {
                message: "bucket is required".to_string(),
            });
        }

        if self.ttl.is_zero() {
            return Err(LoaderError::ConfigValidationError {
                message: "ttl must be greater than zero".to_string(),
            });
        }

        if self.ttl > MAX_TTL {
            return Err(LoaderError::ConfigValidationError {
                message: format!("ttl must not exceed {}", format_duration(MAX_TTL)),
            });
        }

        if self.cache_path.as_os_str().is_empty() {
            return Err(LoaderError::ConfigValidationError {
                message: "cache_path must not be empty".to_string(),
            });
        }

        // A folder that fails to join with a plain name would fail every lookup.
        LogicalPath::join(&self.template_folder, "probe").map_err(|e| {
            LoaderError::ConfigValidationError {
                message: format!("template_folder: {}", e),
            }
        })?;

        Ok(())
    }
}

/// (De)serialize durations as TTL strings like "15m".
mod duration_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    use crate::cache::{format_duration, parse_ttl};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Raw::Text(text) => parse_ttl(&text).map_err(serde::de::Error::custom),
        }
    }
}
