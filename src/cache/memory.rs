//! In-process TTL cache.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::ttl::expiry_after;
use super::FreshCache;
use crate::clock::{Clock, SystemClock};
use crate::path::LogicalPath;

#[derive(Debug, Clone)]
struct Slot {
    content: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// Thread-safe [`FreshCache`] held entirely in memory.
///
/// Useful for embedding and tests; it also counts writes so callers can
/// check that a lookup did not repopulate the cache.
pub struct MemoryCache {
    slots: RwLock<HashMap<LogicalPath, Slot>>,
    clock: Arc<dyn Clock>,
    writes: AtomicUsize,
}

impl MemoryCache {
    /// Create an empty cache using system time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache with an explicit time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            clock,
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored entries, including expired ones not yet overwritten.
    pub fn len(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store raw bytes directly, bypassing the write counter.
    pub fn seed(&self, path: &LogicalPath, content: &[u8], ttl: Duration) -> Result<()> {
        let expires_at = expiry_after(self.clock.now(), ttl)?;
        self.slots
            .write()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))?
            .insert(
                path.clone(),
                Slot {
                    content: content.to_vec(),
                    expires_at,
                },
            );
        Ok(())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FreshCache for MemoryCache {
    fn get(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();
        let slots = self
            .slots
            .read()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))?;

        Ok(slots
            .get(path)
            .filter(|slot| now < slot.expires_at)
            .map(|slot| slot.content.clone()))
    }

    fn set(&self, path: &LogicalPath, content: &[u8], ttl: Duration) -> Result<()> {
        self.seed(path, content, ttl)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.slots
            .write()
            .map_err(|_| anyhow::anyhow!("memory cache lock poisoned"))?
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::clock::ManualClock;

    fn key(name: &str) -> LogicalPath {
        LogicalPath::join("templates", name).unwrap()
    }

    #[test]
    fn set_then_get() {
        let cache = MemoryCache::new();
        cache.set(&key("a.html"), b"hello", DEFAULT_TTL).unwrap();

        assert_eq!(cache.get(&key("a.html")).unwrap(), Some(b"hello".to_vec()));
        assert_eq!(cache.write_count(), 1);
    }

    #[test]
    fn expires_after_ttl() {
        let clock = Arc::new(ManualClock::default());
        let cache = MemoryCache::with_clock(clock.clone());
        cache.set(&key("a.html"), b"hello", DEFAULT_TTL).unwrap();

        clock.advance(chrono::Duration::minutes(15));
        assert!(cache.get(&key("a.html")).unwrap().is_none());
    }

    #[test]
    fn seed_does_not_count_as_write() {
        let cache = MemoryCache::new();
        cache.seed(&key("a.html"), b"x", DEFAULT_TTL).unwrap();

        assert_eq!(cache.write_count(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unrepresentable_ttl_fails_without_storing() {
        let cache = MemoryCache::new();
        let huge = crate::cache::parse_ttl("9999999999d").unwrap();

        assert!(cache.set(&key("a.html"), b"hello", huge).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.write_count(), 0);
    }

    #[test]
    fn clear_all_empties() {
        let cache = MemoryCache::new();
        cache.set(&key("a.html"), b"a", DEFAULT_TTL).unwrap();
        cache.set(&key("b.html"), b"b", DEFAULT_TTL).unwrap();

        cache.clear_all().unwrap();
        assert!(cache.is_empty());
    }
}
