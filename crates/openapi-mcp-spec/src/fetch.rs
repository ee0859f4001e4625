//! Remote spec retrieval.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::error::SpecError;

/// Fixed timeout for a spec download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw response of a spec download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSpec {
    /// The `Content-Type` response header, if any.
    pub content_type: Option<String>,
    pub body: String,
}

/// Retrieves the bytes behind a spec URL.
///
/// Implementations perform exactly one attempt; a failure ends the load.
pub trait SpecFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Result<FetchedSpec, SpecError>;
}

/// Blocking HTTP GET via `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedSpec, SpecError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SpecError::Transport(format!("failed to build HTTP client: {}", e)))?;

        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| SpecError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpecError::Transport(format!(
                "request to {} returned HTTP {}",
                url, status
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.text().map_err(|e| {
            SpecError::Transport(format!("failed to read response from {}: {}", url, e))
        })?;

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            bytes = body.len(),
            "fetched spec"
        );

        Ok(FetchedSpec { content_type, body })
    }
}
