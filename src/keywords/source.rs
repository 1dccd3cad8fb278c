//! Keyword source access: local file reads and conditional remote fetches.
//!
//! # Responsibilities
//! - Read the keyword document from its configured provenance
//! - Issue conditional fetches (ETag / Last-Modified) for remote sources
//! - Translate transport failures into recoverable reload errors
//!
//! # Design Decisions
//! - A "304 Not Modified" response is a successful no-op, never an error
//! - Every remote fetch carries a short timeout so a hung source cannot
//!   stall message processing
//! - The source descriptor is immutable for the process lifetime

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::KeywordConfig;

/// Recoverable reload failure. Callers keep the previous keyword set.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("keyword source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("keyword source parsed to zero keywords")]
    EmptyParseResult,
}

/// Cached validators from the last successful remote fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMeta {
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

impl CacheMeta {
    fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none()
    }
}

/// Result of one source read.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Fresh document text plus the validators to cache for next time.
    Fetched { body: String, cache: CacheMeta },
    /// The remote source confirmed the cached document is still current.
    NotModified,
}

/// The configured keyword provenance: a local file XOR a remote URL.
#[derive(Debug)]
pub enum KeywordSource {
    File { path: PathBuf },
    Remote { url: String, client: reqwest::Client },
}

impl KeywordSource {
    /// Build a file-backed source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Build a remote source with a per-fetch timeout.
    pub fn remote(url: impl Into<String>, fetch_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .unwrap_or_default();
        Self::Remote {
            url: url.into(),
            client,
        }
    }

    /// Build the source described by a validated keyword config.
    ///
    /// Returns `None` when the config names no source; validation rejects
    /// that before the store is constructed.
    pub fn from_config(config: &KeywordConfig) -> Option<Self> {
        match (&config.file, &config.url) {
            (Some(path), None) => Some(Self::file(path)),
            (None, Some(url)) => Some(Self::remote(url, config.fetch_timeout())),
            _ => None,
        }
    }

    /// Human-readable provenance label for logs and the admin API.
    pub fn describe(&self) -> String {
        match self {
            Self::File { path } => format!("file:{}", path.display()),
            Self::Remote { url, .. } => format!("url:{}", url),
        }
    }

    /// True for file-backed sources.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Read the keyword document, using `cache` validators for remote
    /// conditional fetches. Any failure is recoverable for the caller.
    pub async fn fetch(&self, cache: &CacheMeta) -> Result<FetchOutcome, ReloadError> {
        match self {
            Self::File { path } => fetch_file(path).await,
            Self::Remote { url, client } => fetch_remote(client, url, cache).await,
        }
    }

    /// Seed a missing local keyword file with the given document text.
    ///
    /// No-op for remote sources and for files that already exist.
    pub async fn seed_if_missing(&self, contents: &str) -> std::io::Result<bool> {
        let Self::File { path } = self else {
            return Ok(false);
        };
        if tokio::fs::try_exists(path).await? {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, contents).await?;
        Ok(true)
    }
}

async fn fetch_file(path: &Path) -> Result<FetchOutcome, ReloadError> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(FetchOutcome::Fetched {
            body,
            cache: CacheMeta::default(),
        }),
        Err(e) => Err(ReloadError::SourceUnavailable(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

async fn fetch_remote(
    client: &reqwest::Client,
    url: &str,
    cache: &CacheMeta,
) -> Result<FetchOutcome, ReloadError> {
    let mut request = client.get(url);
    if let Some(etag) = &cache.etag {
        request = request.header(reqwest::header::IF_NONE_MATCH, etag);
    }
    if let Some(last_modified) = &cache.last_modified {
        request = request.header(reqwest::header::IF_MODIFIED_SINCE, last_modified);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ReloadError::SourceUnavailable(e.to_string()))?;

    if response.status() == reqwest::StatusCode::NOT_MODIFIED {
        // Only meaningful when we actually sent validators.
        if !cache.is_empty() {
            return Ok(FetchOutcome::NotModified);
        }
        return Err(ReloadError::SourceUnavailable(
            "304 response without cached validators".to_string(),
        ));
    }

    if !response.status().is_success() {
        return Err(ReloadError::SourceUnavailable(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    let header_value = |name: reqwest::header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let new_cache = CacheMeta {
        etag: header_value(reqwest::header::ETAG),
        last_modified: header_value(reqwest::header::LAST_MODIFIED),
    };

    let body = response
        .text()
        .await
        .map_err(|e| ReloadError::SourceUnavailable(e.to_string()))?;

    Ok(FetchOutcome::Fetched {
        body,
        cache: new_cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_fetch_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kw.txt");
        tokio::fs::write(&path, "buy\nsell\n").await.unwrap();

        let source = KeywordSource::file(&path);
        match source.fetch(&CacheMeta::default()).await.unwrap() {
            FetchOutcome::Fetched { body, cache } => {
                assert_eq!(body, "buy\nsell\n");
                assert_eq!(cache, CacheMeta::default());
            }
            FetchOutcome::NotModified => panic!("file fetch cannot be not-modified"),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let source = KeywordSource::file(dir.path().join("absent.txt"));
        let err = source.fetch(&CacheMeta::default()).await.unwrap_err();
        assert!(matches!(err, ReloadError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_seed_creates_missing_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kw.txt");
        let source = KeywordSource::file(&path);

        assert!(source.seed_if_missing("buy\n").await.unwrap());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "buy\n");

        // Existing file is left alone.
        assert!(!source.seed_if_missing("other\n").await.unwrap());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "buy\n");
    }

    #[test]
    fn test_describe() {
        assert_eq!(KeywordSource::file("kw.txt").describe(), "file:kw.txt");
        let remote = KeywordSource::remote("https://example.com/kw.txt", Duration::from_secs(10));
        assert_eq!(remote.describe(), "url:https://example.com/kw.txt");
    }
}
