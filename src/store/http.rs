//! HTTP object store client.
//!
//! Fetches objects from a bucket exposed over HTTP(S), such as an S3
//! bucket's virtual-hosted endpoint. Requests are unauthenticated.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use super::RemoteStore;
use crate::path::LogicalPath;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches template objects over HTTP/HTTPS.
pub struct HttpStore {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpStore {
    /// Create a store for a base URL with the default 30-second timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a store for a base URL with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid store URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Store URL '{}' cannot hold object paths", base_url);
        }

        let client = Client::builder()
            .user_agent(concat!("bucket-loader/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a store for an S3 bucket's public virtual-hosted endpoint.
    pub fn for_s3_bucket(bucket: &str, timeout: Duration) -> Result<Self> {
        if bucket.is_empty() || bucket.contains('/') {
            bail!("Invalid S3 bucket name '{}'", bucket);
        }
        Self::with_timeout(&format!("https://{}.s3.amazonaws.com/", bucket), timeout)
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the base URL objects are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the object URL for a logical path.
    pub fn object_url(&self, path: &LogicalPath) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Store URL '{}' cannot hold object paths", self.base_url))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }
}

impl RemoteStore for HttpStore {
    fn load(&self, path: &LogicalPath) -> Result<Option<Vec<u8>>> {
        let url = self.object_url(path)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        // S3 answers 403 rather than 404 for missing keys when the caller
        // may not list the bucket.
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", url))?;

        Ok(Some(bytes.to_vec()))
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn key(name: &str) -> LogicalPath {
        LogicalPath::join("templates", name).unwrap()
    }

    #[test]
    fn default_timeout_is_30_seconds() {
        let store = HttpStore::new("https://example.com/").unwrap();
        assert_eq!(store.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let store = HttpStore::with_timeout("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(store.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(HttpStore::new("not a url").is_err());
        assert!(HttpStore::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn s3_bucket_url() {
        let store = HttpStore::for_s3_bucket("my-bucket", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            store.base_url().as_str(),
            "https://my-bucket.s3.amazonaws.com/"
        );
        assert!(HttpStore::for_s3_bucket("", DEFAULT_TIMEOUT).is_err());
        assert!(HttpStore::for_s3_bucket("a/b", DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn object_url_appends_segments() {
        let store = HttpStore::new("https://example.com/site").unwrap();
        let url = store.object_url(&key("emails/welcome.html")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/site/templates/emails/welcome.html"
        );
    }

    #[test]
    fn object_url_handles_trailing_slash() {
        let store = HttpStore::new("https://example.com/site/").unwrap();
        let url = store.object_url(&key("a.html")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/site/templates/a.html");
    }

    #[test]
    fn object_url_percent_encodes() {
        let store = HttpStore::new("https://example.com/").unwrap();
        let url = store.object_url(&key("my page.html")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/templates/my%20page.html");
    }

    #[test]
    fn load_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/templates/a.html");
            then.status(200).body("hello");
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        let content = store.load(&key("a.html")).unwrap();

        assert_eq!(content, Some(b"hello".to_vec()));
        mock.assert();
    }

    #[test]
    fn load_empty_body_is_present() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/templates/empty.html");
            then.status(200).body("");
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        assert_eq!(store.load(&key("empty.html")).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn load_404_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/templates/missing.html");
            then.status(404).body("Not Found");
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        assert!(store.load(&key("missing.html")).unwrap().is_none());
    }

    #[test]
    fn load_403_is_absent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/templates/private.html");
            then.status(403).body("<Error><Code>AccessDenied</Code></Error>");
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        assert!(store.load(&key("private.html")).unwrap().is_none());
    }

    #[test]
    fn load_500_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/templates/a.html");
            then.status(500).body("Internal Server Error");
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        let err = store.load(&key("a.html")).unwrap_err().to_string();
        assert!(err.contains("500"), "Error should mention 500: {}", err);
    }

    #[test]
    fn load_returns_raw_bytes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/templates/bin.html");
            then.status(200).body(vec![0xffu8, 0x00, 0x41]);
        });

        let store = HttpStore::new(&server.base_url()).unwrap();
        assert_eq!(
            store.load(&key("bin.html")).unwrap(),
            Some(vec![0xff, 0x00, 0x41])
        );
    }
}
