//! Cache entry and metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached template entry, as recorded in its metadata sidecar.
///
/// The content location is not recorded; it is always derived from the
/// cache root and `key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Logical path the entry is keyed by (e.g. "templates/page.html").
    pub key: String,
    /// Cache metadata for expiry checks.
    pub metadata: CacheMetadata,
}

/// Metadata for expiry checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// When this entry was cached.
    pub cached_at: DateTime<Utc>,
    /// When the cached entry expires.
    pub expires_at: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl CacheEntry {
    /// Create a new cache entry cached at `cached_at`.
    pub fn new(
        key: impl Into<String>,
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            metadata: CacheMetadata {
                cached_at,
                expires_at,
                size_bytes: 0,
            },
        }
    }

    /// Set size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.metadata.size_bytes = size;
        self
    }

    /// Whether the entry's TTL has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.metadata.expires_at
    }
}

impl CacheMetadata {
    /// Remaining TTL in seconds at `now`, floored at zero.
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at
            .signed_duration_since(now)
            .num_seconds()
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_067_200, 0).unwrap()
    }

    fn entry_for(ttl: Duration) -> CacheEntry {
        CacheEntry::new("templates/page.html", t0(), t0() + ttl)
    }

    #[test]
    fn cache_entry_creation() {
        let entry = entry_for(Duration::minutes(15));

        assert_eq!(entry.key, "templates/page.html");
        assert_eq!(entry.metadata.cached_at, t0());
        assert_eq!(entry.metadata.expires_at, t0() + Duration::minutes(15));
        assert!(!entry.is_expired(t0()));
    }

    #[test]
    fn entry_expires_once_ttl_elapses() {
        let entry = entry_for(Duration::minutes(15));

        assert!(!entry.is_expired(t0() + Duration::minutes(14)));
        assert!(entry.is_expired(t0() + Duration::minutes(15)));
        assert!(entry.is_expired(t0() + Duration::minutes(16)));
    }

    #[test]
    fn zero_ttl_is_expired_immediately() {
        assert!(entry_for(Duration::zero()).is_expired(t0()));
    }

    #[test]
    fn cache_entry_with_size() {
        let entry = entry_for(Duration::hours(1)).with_size(1024);
        assert_eq!(entry.metadata.size_bytes, 1024);
    }

    #[test]
    fn remaining_ttl_calculation() {
        let entry = entry_for(Duration::hours(1));

        let remaining = entry.metadata.remaining_ttl(t0() + Duration::minutes(10));
        assert_eq!(remaining, 50 * 60);
    }

    #[test]
    fn expired_entry_has_zero_remaining_ttl() {
        let entry = entry_for(Duration::minutes(1));
        assert_eq!(entry.metadata.remaining_ttl(t0() + Duration::hours(1)), 0);
    }

    #[test]
    fn sidecar_ignores_unknown_fields() {
        let json = r#"{
            "key": "templates/page.html",
            "content_path": "/elsewhere/page.html",
            "metadata": {
                "cached_at": "2024-01-01T00:00:00Z",
                "expires_at": "2024-01-01T00:15:00Z",
                "size_bytes": 5
            }
        }"#;

        let entry: CacheEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.key, "templates/page.html");
        assert_eq!(entry.metadata.size_bytes, 5);
    }
}
