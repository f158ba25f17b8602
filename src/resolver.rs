//! Read-through template resolution.
//!
//! Lookup order for a template name:
//! 1. Fresh cache (served as up to date)
//! 2. Remote store (written back to the cache, served as not up to date)
//! 3. Not-found policy
//!
//! Failures of the cache or the store are logged and treated exactly like
//! absence; only [`LoaderError::TemplateNotFound`] and
//! [`LoaderError::Decoding`] reach the caller from a lookup.

use std::time::Duration;

use crate::cache::{DiskCache, FreshCache, DEFAULT_TTL};
use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use crate::path::{LogicalPath, DEFAULT_TEMPLATE_FOLDER};
use crate::policy::{NotFoundPolicy, RaiseNotFound};
use crate::store::{open_store, RemoteStore};

/// Where resolved content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Served from the fresh cache.
    Cache,
    /// Fetched from the remote store this call.
    Remote,
    /// Supplied by the not-found policy.
    Fallback,
}

/// A resolved template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// The logical path the name resolved to.
    pub path: LogicalPath,
    /// Decoded template text.
    pub content: String,
    /// Whether a previously compiled copy may be reused.
    pub up_to_date: bool,
    /// Where the content came from.
    pub origin: Origin,
}

impl ResolvedTemplate {
    /// Split into the `(content, up_to_date)` pair a template engine wants.
    pub fn into_parts(self) -> (String, bool) {
        (self.content, self.up_to_date)
    }
}

/// Resolves template names against a fresh cache and a remote store.
///
/// The resolver holds no mutable state of its own; share it across threads
/// behind an `Arc`.
///
/// # Example
///
/// ```
/// use bucket_loader::cache::MemoryCache;
/// use bucket_loader::store::MemoryStore;
/// use bucket_loader::{LogicalPath, TemplateResolver};
///
/// let store = MemoryStore::new();
/// store.insert(LogicalPath::join("templates", "a.html").unwrap(), "hello");
///
/// let resolver = TemplateResolver::new(MemoryCache::new(), store);
///
/// assert_eq!(resolver.resolve_source("a.html").unwrap(), ("hello".to_string(), false));
/// assert_eq!(resolver.resolve_source("a.html").unwrap(), ("hello".to_string(), true));
/// ```
pub struct TemplateResolver {
    cache: Box<dyn FreshCache>,
    store: Box<dyn RemoteStore>,
    policy: Box<dyn NotFoundPolicy>,
    template_folder: String,
    ttl: Duration,
}

impl TemplateResolver {
    /// Create a resolver with the default folder, TTL and policy.
    pub fn new(cache: impl FreshCache + 'static, store: impl RemoteStore + 'static) -> Self {
        Self::from_parts(Box::new(cache), Box::new(store))
    }

    /// Create a resolver from already boxed collaborators.
    pub fn from_parts(cache: Box<dyn FreshCache>, store: Box<dyn RemoteStore>) -> Self {
        Self {
            cache,
            store,
            policy: Box::new(RaiseNotFound),
            template_folder: DEFAULT_TEMPLATE_FOLDER.to_string(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Build a resolver with a [`DiskCache`] and the store named by the
    /// configured bucket.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        config.validate()?;

        let store = open_store(&config.bucket, config.timeout)?;
        let cache = DiskCache::new(&config.cache_path);

        Ok(Self::from_parts(Box::new(cache), store)
            .with_template_folder(config.template_folder.clone())
            .with_ttl(config.ttl))
    }

    /// Set the folder names are joined onto.
    pub fn with_template_folder(mut self, folder: impl Into<String>) -> Self {
        self.template_folder = folder.into();
        self
    }

    /// Set the lifetime of entries written to the cache.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the not-found policy.
    pub fn with_not_found_policy(mut self, policy: impl NotFoundPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Get the template folder.
    pub fn template_folder(&self) -> &str {
        &self.template_folder
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolve a template name to its content and freshness.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::InvalidTemplateName`] if the name escapes the folder
    /// - [`LoaderError::TemplateNotFound`] (or whatever the policy returns)
    ///   on a full miss
    /// - [`LoaderError::Decoding`] if the bytes are not UTF-8
    pub fn resolve(&self, name: &str) -> Result<ResolvedTemplate> {
        let path = LogicalPath::join(&self.template_folder, name)?;

        let (bytes, up_to_date, origin) = match self.lookup(&path) {
            Some((bytes, origin)) => (bytes, origin == Origin::Cache, origin),
            None => {
                tracing::debug!("{} not in cache or store, applying not-found policy", path);
                let substitute = self.policy.on_not_found(&path)?;
                (substitute.content, substitute.up_to_date, Origin::Fallback)
            }
        };

        let content = String::from_utf8(bytes).map_err(|source| LoaderError::Decoding {
            path: path.to_string(),
            source,
        })?;

        Ok(ResolvedTemplate {
            path,
            content,
            up_to_date,
            origin,
        })
    }

    /// Resolve a template name to the `(content, up_to_date)` pair.
    pub fn resolve_source(&self, name: &str) -> Result<(String, bool)> {
        self.resolve(name).map(ResolvedTemplate::into_parts)
    }

    /// Drop every cached template, regardless of TTL.
    pub fn invalidate_all(&self) -> Result<()> {
        self.cache.clear_all().map_err(LoaderError::Cache)?;
        tracing::info!("Template cache cleared");
        Ok(())
    }

    /// Cache first, then the store. `None` means absent from both.
    fn lookup(&self, path: &LogicalPath) -> Option<(Vec<u8>, Origin)> {
        match self.cache.get(path) {
            Ok(Some(bytes)) => {
                tracing::debug!("Cache hit for {}", path);
                return Some((bytes, Origin::Cache));
            }
            Ok(None) => tracing::debug!("Cache miss for {}", path),
            Err(e) => tracing::warn!("Cache lookup failed for {}: {:#}", path, e),
        }

        let bytes = match self.store.load(path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    "Failed to load {} from {}: {:#}",
                    path,
                    self.store.describe(),
                    e
                );
                return None;
            }
        };

        tracing::debug!("Fetched {} ({} bytes) from {}", path, bytes.len(), self.store.describe());

        if let Err(e) = self.cache.set(path, &bytes, self.ttl) {
            tracing::warn!("Failed to cache {}: {:#}", path, e);
        }

        Some((bytes, Origin::Remote))
    }
}

impl std::fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("store", &self.store.describe())
            .field("template_folder", &self.template_folder)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
