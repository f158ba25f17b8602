//! What to do when a template exists neither in the cache nor remotely.
//!
//! The resolver calls [`NotFoundPolicy::on_not_found`] once per full miss.
//! The policy either supplies substitute content or fails the resolution
//! with [`LoaderError::TemplateNotFound`]. Closures work as policies:
//!
//! ```
//! use bucket_loader::policy::{NotFoundPolicy, Substitute};
//! use bucket_loader::{LogicalPath, Result};
//!
//! let policy = |path: &LogicalPath| -> Result<Substitute> {
//!     Ok(Substitute::new(format!("<!-- {} is missing -->", path)))
//! };
//!
//! let path = LogicalPath::join("templates", "gone.html").unwrap();
//! let substitute = policy.on_not_found(&path).unwrap();
//! assert_eq!(substitute.content, b"<!-- templates/gone.html is missing -->");
//! assert!(!substitute.up_to_date);
//! ```

use crate::error::{LoaderError, Result};
use crate::path::LogicalPath;

/// Content served in place of a missing template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitute {
    /// Raw bytes, decoded as UTF-8 like any other template.
    pub content: Vec<u8>,
    /// Freshness reported to the caller. Defaults to `false`.
    pub up_to_date: bool,
}

impl Substitute {
    /// Substitute content reported as not up to date.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            up_to_date: false,
        }
    }

    /// Override the reported freshness.
    pub fn with_up_to_date(mut self, up_to_date: bool) -> Self {
        self.up_to_date = up_to_date;
        self
    }
}

/// Decides the outcome of a full miss.
pub trait NotFoundPolicy: Send + Sync {
    /// Produce substitute content for `path`, or fail.
    fn on_not_found(&self, path: &LogicalPath) -> Result<Substitute>;
}

impl<F> NotFoundPolicy for F
where
    F: Fn(&LogicalPath) -> Result<Substitute> + Send + Sync,
{
    fn on_not_found(&self, path: &LogicalPath) -> Result<Substitute> {
        self(path)
    }
}

/// Default policy: always fail with [`LoaderError::TemplateNotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseNotFound;

impl NotFoundPolicy for RaiseNotFound {
    fn on_not_found(&self, path: &LogicalPath) -> Result<Substitute> {
        Err(LoaderError::TemplateNotFound {
            path: path.to_string(),
        })
    }
}

/// Serve the same fallback content (e.g. an error page) for every miss.
#[derive(Debug, Clone)]
pub struct StaticFallback {
    substitute: Substitute,
}

impl StaticFallback {
    /// Fallback reported as not up to date.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            substitute: Substitute::new(content),
        }
    }

    /// Report the fallback as up to date, letting the caller reuse a
    /// previously compiled copy of it.
    pub fn up_to_date(mut self) -> Self {
        self.substitute.up_to_date = true;
        self
    }
}

impl NotFoundPolicy for StaticFallback {
    fn on_not_found(&self, path: &LogicalPath) -> Result<Substitute> {
        tracing::debug!("Serving fallback content for {}", path);
        Ok(self.substitute.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> LogicalPath {
        LogicalPath::join("templates", name).unwrap()
    }

    #[test]
    fn raise_reports_resolved_path() {
        let err = RaiseNotFound.on_not_found(&key("missing.html")).unwrap_err();

        match err {
            LoaderError::TemplateNotFound { path } => assert_eq!(path, "templates/missing.html"),
            other => panic!("expected TemplateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn static_fallback_substitutes() {
        let policy = StaticFallback::new("<h1>Not found</h1>");
        let substitute = policy.on_not_found(&key("missing.html")).unwrap();

        assert_eq!(substitute.content, b"<h1>Not found</h1>");
        assert!(!substitute.up_to_date);
    }

    #[test]
    fn static_fallback_can_be_up_to_date() {
        let policy = StaticFallback::new("x").up_to_date();
        assert!(policy.on_not_found(&key("a.html")).unwrap().up_to_date);
    }

    #[test]
    fn closure_policy_can_decline() {
        let policy = |path: &LogicalPath| -> Result<Substitute> {
            if path.as_str().ends_with(".html") {
                Ok(Substitute::new("fallback"))
            } else {
                Err(LoaderError::TemplateNotFound {
                    path: path.to_string(),
                })
            }
        };

        assert!(policy.on_not_found(&key("a.html")).is_ok());
        assert!(policy.on_not_found(&key("a.txt")).unwrap_err().is_not_found());
    }

    #[test]
    fn substitute_builder() {
        let substitute = Substitute::new("x").with_up_to_date(true);
        assert!(substitute.up_to_date);
    }
}
