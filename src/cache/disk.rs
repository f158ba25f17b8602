//! On-disk TTL cache.
//!
//! Content is stored as raw bytes at `<root>/<logical path>` so a cached
//! template can be opened directly while debugging. Expiry bookkeeping
//! lives in JSON sidecars under `<root>/.meta/`, one per entry, named by a
//! hash of the logical path.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::entry::CacheEntry;
use super::ttl::expiry_after;
use super::FreshCache;
use crate::clock::{Clock, SystemClock};
use crate::path::LogicalPath;

/// Directory under the cache root holding metadata sidecars.
pub const META_DIR: &str = ".meta";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Summary of what the cache holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries with metadata.
    pub entries: usize,
    /// How many of those have expired.
    pub expired: usize,
    /// Total content size in bytes.
    pub total_bytes: u64,
}

/// Filesystem-backed [`FreshCache`].
pub struct DiskCache {
    /// Root directory for cache.
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl DiskCache {
    /// Create a cache rooted at `root`, using system time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit time source.
    pub fn with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the path an entry's content is stored at.
    pub fn content_path(&self, path: &LogicalPath) -> PathBuf {
        path.to_fs_path(&self.root)
    }

    /// Get the metadata file path for an entry.
    fn metadata_path(&self, path: &LogicalPath) -> PathBuf {
        let hash = Sha256::digest(path.as_str().as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.meta_dir().join(format!("{}.json", hash_str))
    }

    fn meta_dir(&self) -> PathBuf {
        self.root.join(META_DIR)
    }

    /// Load an entry's metadata, expired or not.
    pub fn load(&self, path: &LogicalPath) -> Result<Option<CacheEntry>> {
        let meta_path = self.metadata_path(path);

        let json = match fs::read_to_string(&meta_path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read metadata {:?}", meta_path))
            }
        };

        let entry: CacheEntry = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt cache metadata {:?}", meta_path))?;

        // Hash prefix collision: the sidecar belongs to another key.
        if entry.key != path.as_str() {
            return Ok(None);
        }

        Ok(Some(entry))
    }

    /// Remove a cached entry.
    pub fn remove(&self, path: &LogicalPath) -> Result<bool> {
        let removed_content = remove_if_exists(&self.content_path(path))?;
        let removed_meta = remove_if_exists(&self.metadata_path(path))?;
        Ok(removed_content || removed_meta)
    }

    /// List all cached entries, newest first.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        let meta_dir = self.meta_dir();
        let read_dir = match fs::read_dir(&meta_dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to list {:?}", meta_dir));
            }
        };

        let mut entries = Vec::new();

        for entry in read_dir {
            let path = entry?.path();

            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(json) = fs::read_to_string(&path) {
                    if let Ok(cache_entry) = serde_json::from_str::<CacheEntry>(&json) {
                        entries.push(cache_entry);
                    }
                }
            }
        }

        entries.sort_by(|a, b| b.metadata.cached_at.cmp(&a.metadata.cached_at));
        Ok(entries)
    }

    /// Clear all cached entries, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.list()?;
        let count = entries.len();

        for entry in entries {
            if let Ok(path) = LogicalPath::parse(&entry.key) {
                self.remove(&path)?;
            }
        }

        // Drop any sidecars that failed to parse along with the rest.
        match fs::remove_dir_all(self.meta_dir()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).context("Failed to remove cache metadata directory"),
        }

        Ok(count)
    }

    /// Remove only entries whose TTL has elapsed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut removed = 0;

        for entry in self.list()? {
            if !entry.is_expired(now) {
                continue;
            }
            if let Ok(path) = LogicalPath::parse(&entry.key) {
                if self.remove(&path)? {
                    removed += 1;
                }
            }
        }

        Ok(removed)
    }

    /// Entry count, expired count and total size.
    pub fn stats(&self) -> Result<CacheStats> {
        let now = self.clock.now();
        let entries = self.list()?;

        Ok(CacheStats {
            entries: entries.len(),
            expired: entries.iter().filter(|e| e.is_expired(now)).count(),
            total_bytes: entries.iter().map(|e| e.metadata.size_bytes).sum(),
        })
    }

    /// Current time according to this cache's clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

impl FreshCache for DiskCache {
    fn get(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        let entry = match self.load(path)? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        if entry.is_expired(self.clock.now()) {
            return Ok(None);
        }

        let content_path = self.content_path(path);
        match fs::read(&content_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read cached content from {:?}", content_path)),
        }
    }

    fn set(&self, path: &LogicalPath, content: &[u8], ttl: Duration) -> Result<()> {
        if path.segments().next() == Some(META_DIR) {
            bail!("'{}' collides with the cache metadata directory", path);
        }

        let now = self.clock.now();
        let entry = CacheEntry::new(path.as_str(), now, expiry_after(now, ttl)?)
            .with_size(content.len() as u64);

        write_atomic(&self.content_path(path), content)?;
        let json = serde_json::to_string_pretty(&entry)?;
        write_atomic(&self.metadata_path(path), json.as_bytes())?;

        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.clear().map(|_| ())
    }
}

/// Write via a sibling temp file and rename, so readers never see a
/// partially written file.
fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let parent = target
        .parent()
        .with_context(|| format!("Cache path {:?} has no parent", target))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create cache directory {:?}", parent))?;

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = parent.join(format!(
        ".{}.{}-{}.tmp",
        file_name,
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    fs::write(&temp, bytes).with_context(|| format!("Failed to write {:?}", temp))?;
    if let Err(e) = fs::rename(&temp, target) {
        let _ = fs::remove_file(&temp);
        return Err(e).with_context(|| format!("Failed to move cache file into {:?}", target));
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
    }
}
