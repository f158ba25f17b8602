//! Local directory used as a remote store.
//!
//! Handy in development: point the loader at a checkout of the bucket's
//! contents instead of the bucket itself.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::RemoteStore;
use crate::path::LogicalPath;

/// Serves objects from files beneath a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RemoteStore for DirectoryStore {
    fn load(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        let file = path.to_fs_path(&self.root);

        if file.is_dir() {
            return Ok(None);
        }

        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", file)),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
