//! In-process object store.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::RemoteStore;
use crate::path::LogicalPath;

/// A [`RemoteStore`] backed by a map, counting every `load`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<LogicalPath, Vec<u8>>>,
    loads: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put or replace an object.
    pub fn insert(&self, path: LogicalPath, content: impl Into<Vec<u8>>) {
        self.objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path, content.into());
    }

    /// Delete an object, returning whether it existed.
    pub fn remove(&self, path: &LogicalPath) -> bool {
        self.objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path)
            .is_some()
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl RemoteStore for MemoryStore {
    fn load(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let objects = self
            .objects
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(objects.get(path).cloned())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
