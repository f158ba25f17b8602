//! Time-limited template cache.
//!
//! The resolver only sees the [`FreshCache`] trait. [`DiskCache`] is the
//! production implementation; [`MemoryCache`] keeps everything in process.

pub mod disk;
pub mod entry;
pub mod memory;
pub mod ttl;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::path::LogicalPath;

pub use disk::{CacheStats, DiskCache, META_DIR};
pub use entry::{CacheEntry, CacheMetadata};
pub use memory::MemoryCache;
pub use ttl::{format_duration, parse_ttl, DEFAULT_TTL, MAX_TTL};

/// A path-keyed byte store whose entries expire.
///
/// `get` after `set` returns the same bytes until `ttl` has elapsed and
/// `None` afterwards. `None` covers both "never set" and "expired".
/// Implementations must be safe to call from several threads at once.
pub trait FreshCache: Send + Sync {
    /// Look up unexpired content.
    fn get(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>>;

    /// Store content for `ttl`, replacing any existing entry.
    fn set(&self, path: &LogicalPath, content: &[u8], ttl: Duration) -> Result<()>;

    /// Drop every entry.
    fn clear_all(&self) -> Result<()>;
}

impl<T: FreshCache + ?Sized> FreshCache for Arc<T> {
    fn get(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        (**self).get(path)
    }

    fn set(&self, path: &LogicalPath, content: &[u8], ttl: Duration) -> Result<()> {
        (**self).set(path, content, ttl)
    }

    fn clear_all(&self) -> Result<()> {
        (**self).clear_all()
    }
}

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("bucket-loader")
        .join("templates")
}
