//! bucket-loader - Cached template loading from remote object stores.
//!
//! Templates are resolved by name against a local time-limited cache first
//! and a remote object store second. Every resolution reports whether the
//! content came from the cache, so a template engine can reuse a compiled
//! copy instead of recompiling.
//!
//! # Modules
//!
//! - [`cache`] - The [`FreshCache`](cache::FreshCache) trait and TTL caches
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Time sources for cache expiry
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`path`] - Logical template paths
//! - [`policy`] - Not-found policies
//! - [`resolver`] - The read-through [`TemplateResolver`]
//! - [`store`] - The [`RemoteStore`](store::RemoteStore) trait and clients
//! - [`ui`] - Command output
//!
//! # Example
//!
//! ```
//! use bucket_loader::cache::MemoryCache;
//! use bucket_loader::policy::StaticFallback;
//! use bucket_loader::store::MemoryStore;
//! use bucket_loader::{LogicalPath, TemplateResolver};
//!
//! let store = MemoryStore::new();
//! store.insert(LogicalPath::join("templates", "page.html").unwrap(), "<h1>Hi</h1>");
//!
//! let resolver = TemplateResolver::new(MemoryCache::new(), store)
//!     .with_not_found_policy(StaticFallback::new("<h1>Missing</h1>"));
//!
//! let (content, up_to_date) = resolver.resolve_source("page.html").unwrap();
//! assert_eq!(content, "<h1>Hi</h1>");
//! assert!(!up_to_date);
//!
//! let (content, _) = resolver.resolve_source("other.html").unwrap();
//! assert_eq!(content, "<h1>Missing</h1>");
//! ```

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod path;
pub mod policy;
pub mod resolver;
pub mod store;
pub mod ui;

pub use error::{LoaderError, Result};
pub use path::LogicalPath;
pub use resolver::{Origin, ResolvedTemplate, TemplateResolver};
