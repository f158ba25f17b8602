//! Error types for template loading.
//!
//! This module defines [`LoaderError`], the error type returned by the
//! resolver and the configuration layer, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - "Not present" is never an error at the cache or store layer; those
//!   return `Ok(None)` and the resolver moves on to the next fallback
//! - Only [`LoaderError::TemplateNotFound`] and [`LoaderError::Decoding`]
//!   escape a resolution
//! - Collaborators (caches, stores) report their own failures as
//!   `anyhow::Error`, wrapped via [`LoaderError::Cache`] or
//!   [`LoaderError::Other`] when they do surface

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Core error type for template loading.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Template absent from cache and remote store, and the not-found
    /// policy declined to substitute.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// Stored bytes are not valid UTF-8.
    #[error("Template {path} is not valid UTF-8: {source}")]
    Decoding {
        path: String,
        #[source]
        source: FromUtf8Error,
    },

    /// Template name cannot be turned into a logical path.
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    /// Cache operation failed where the failure cannot be absorbed.
    #[error("Cache error: {0}")]
    Cache(anyhow::Error),

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoaderError {
    /// Whether this error means the template does not exist anywhere.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
