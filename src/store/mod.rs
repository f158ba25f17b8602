//! Remote object stores templates are fetched from.
//!
//! The resolver only sees the [`RemoteStore`] trait. [`open_store`] picks an
//! implementation from a bucket identity string:
//!
//! - `s3://name` - the bucket's public S3 endpoint ([`HttpStore`])
//! - `http://…` / `https://…` - any HTTP base URL ([`HttpStore`])
//! - `file://path` or a plain path - a local directory ([`DirectoryStore`])

pub mod dir;
pub mod http;
pub mod memory;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::path::LogicalPath;

pub use dir::DirectoryStore;
pub use http::{HttpStore, DEFAULT_TIMEOUT};
pub use memory::MemoryStore;

/// Source of raw template bytes.
pub trait RemoteStore: Send + Sync {
    /// Fetch the object at `path`.
    ///
    /// A missing object is `Ok(None)`; `Err` is reserved for transport
    /// failures.
    fn load(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>>;

    /// Human-readable identity of the store, for logs.
    fn describe(&self) -> String;
}

impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    fn load(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        (**self).load(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open the store named by a bucket identity string.
///
/// # Example
///
/// ```
/// use bucket_loader::store::{open_store, DEFAULT_TIMEOUT};
///
/// let store = open_store("s3://my-templates", DEFAULT_TIMEOUT).unwrap();
/// assert_eq!(store.describe(), "https://my-templates.s3.amazonaws.com/");
/// ```
pub fn open_store(bucket: &str, timeout: Duration) -> Result<Box<dyn RemoteStore>> {
    let bucket = bucket.trim();

    if let Some(name) = bucket.strip_prefix("s3://") {
        return Ok(Box::new(HttpStore::for_s3_bucket(
            name.trim_end_matches('/'),
            timeout,
        )?));
    }

    if bucket.starts_with("http://") || bucket.starts_with("https://") {
        return Ok(Box::new(HttpStore::with_timeout(bucket, timeout)?));
    }

    let dir = bucket.strip_prefix("file://").unwrap_or(bucket);
    if dir.is_empty() {
        anyhow::bail!("Store location is empty");
    }
    Ok(Box::new(DirectoryStore::new(dir)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_s3_bucket() {
        let store = open_store("s3://site-templates/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            store.describe(),
            "https://site-templates.s3.amazonaws.com/"
        );
    }

    #[test]
    fn opens_http_base() {
        let store = open_store("https://cdn.example.com/assets", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(store.describe(), "https://cdn.example.com/assets");
    }

    #[test]
    fn opens_directory() {
        let store = open_store("file:///srv/templates", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(store.describe(), "/srv/templates");

        let store = open_store("./local", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(store.describe(), "./local");
    }

    #[test]
    fn rejects_empty_location() {
        assert!(open_store("", DEFAULT_TIMEOUT).is_err());
        assert!(open_store("s3://", DEFAULT_TIMEOUT).is_err());
    }
}
