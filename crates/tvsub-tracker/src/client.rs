//! HTTP client for the tracker site: search pages and torrent downloads.

use std::io;
use std::path::Path;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, COOKIE};

use crate::config::TrackerClientConfig;
use crate::error::{ClientBuildError, TrackerError, TrackerResult};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Tracker site client.
///
/// Implements [`tvsub_core::ListingSourcePort`] for search pages and
/// [`tvsub_core::ArtifactFetcherPort`] for torrent downloads.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    cookie: Option<String>,
}

impl TrackerClient {
    /// Create a client with the given configuration.
    pub fn new(config: &TrackerClientConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            cookie: config.cookie.clone(),
        })
    }

    /// GET a search page with the session cookie and return its body.
    pub(crate) async fn get_listing(&self, url: &str, cookie: &str) -> TrackerResult<String> {
        let response = self
            .http
            .get(url)
            .header(COOKIE, cookie)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Download `url` to `destination`, returning the number of bytes
    /// written. A partially written file is removed on failure.
    pub(crate) async fn download(&self, url: &str, destination: &Path) -> TrackerResult<u64> {
        let mut request = self.http.get(url);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(TrackerError::EmptyBody {
                url: url.to_string(),
            });
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if let Err(e) = tokio::fs::write(destination, &body).await {
            remove_partial(destination).await;
            return Err(e.into());
        }

        tracing::debug!(url, path = %destination.display(), bytes = body.len(), "Downloaded artifact");
        Ok(body.len() as u64)
    }
}

async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial artifact"),
    }
}
