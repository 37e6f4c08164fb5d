use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use thiserror::Error;

use crate::config::AppConfig;

// The upstream rejects default library user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to write cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a successful [`ensure_fresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The cached file was within the max age; no network activity happened.
    Hit,
    /// The remote file was downloaded and the cache overwritten.
    Refreshed,
}

/// Whether a file modified at `modified` still counts as fresh at `now`.
///
/// A modification time in the future (clock skew) counts as fresh; a refresh
/// would gain nothing.
pub fn is_fresh(modified: SystemTime, now: SystemTime, max_age: Duration) -> bool {
    now.duration_since(modified)
        .map(|age| age <= max_age)
        .unwrap_or(true)
}

/// Make sure the cached draw file is usable, downloading it when stale.
///
/// Cache hit: the force flag is unset and the file's mtime is within the
/// configured max age. Otherwise one GET with a bounded timeout; any
/// transport error or non-2xx status leaves an existing cache file untouched
/// and surfaces as [`FetchError`].
pub async fn ensure_fresh(config: &AppConfig) -> Result<CacheStatus, FetchError> {
    if !config.force_refresh {
        let modified = std::fs::metadata(&config.cache_path)
            .and_then(|metadata| metadata.modified())
            .ok();
        if let Some(modified) = modified {
            if is_fresh(modified, SystemTime::now(), config.max_age()) {
                log::debug!(
                    "cache hit: {} is younger than {}h",
                    config.cache_path.display(),
                    config.cache_max_age_hours
                );
                return Ok(CacheStatus::Hit);
            }
        }
    }

    let url = &config.source_url;
    log::info!("refreshing draw history from {url}");

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        log::error!("draw history request failed with status {status}");
        return Err(FetchError::Status {
            url: url.clone(),
            status,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

    std::fs::write(&config.cache_path, &body).map_err(|source| FetchError::Io {
        path: config.cache_path.clone(),
        source,
    })?;

    log::info!(
        "saved {} bytes to {}",
        body.len(),
        config.cache_path.display()
    );
    Ok(CacheStatus::Refreshed)
}
