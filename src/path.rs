//! Logical template paths.
//!
//! A [`LogicalPath`] is the single key a template is known by: the cache
//! stores it under this key and the remote store is asked for this key.
//! It is always relative, `/`-separated, and free of `.`/`..` segments.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{LoaderError, Result};

/// Default folder templates live under, both remotely and in the cache.
pub const DEFAULT_TEMPLATE_FOLDER: &str = "templates";

/// A normalized, relative template key such as `templates/page.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Join a template folder and a caller-supplied template name.
    ///
    /// The folder may be empty. Backslashes are treated as separators and
    /// empty or `.` segments are dropped, so `pages//./a.html` and
    /// `pages/a.html` yield the same path.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidTemplateName`] if the name is empty,
    /// absolute, contains a `..` segment or a NUL byte, or if the folder
    /// itself fails the same checks.
    ///
    /// # Example
    ///
    /// ```
    /// use bucket_loader::LogicalPath;
    ///
    /// let path = LogicalPath::join("templates", "emails/welcome.html").unwrap();
    /// assert_eq!(path.as_str(), "templates/emails/welcome.html");
    ///
    /// assert!(LogicalPath::join("templates", "../secrets.txt").is_err());
    /// ```
    pub fn join(folder: &str, name: &str) -> Result<Self> {
        let mut segments = Vec::new();
        push_segments(&mut segments, folder, folder)?;
        let folder_len = segments.len();
        push_segments(&mut segments, name, name)?;

        if segments.len() == folder_len {
            return Err(invalid(name, "template name is empty"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Parse an already-joined key (e.g. read back from cache metadata).
    pub fn parse(key: &str) -> Result<Self> {
        Self::join("", key)
    }

    /// The path as a `/`-separated string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Resolve this path beneath a filesystem root.
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, raw: &'a str, name: &str) -> Result<()> {
    if raw.contains('\0') {
        return Err(invalid(name, "NUL bytes are not allowed"));
    }
    if raw.starts_with('/') || raw.starts_with('\\') || has_drive_prefix(raw) {
        return Err(invalid(name, "absolute paths are not allowed"));
    }

    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid(name, "parent directory segments are not allowed")),
            s => segments.push(s),
        }
    }
    Ok(())
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn invalid(name: &str, reason: &str) -> LoaderError {
    LoaderError::InvalidTemplateName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
