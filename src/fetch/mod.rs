//! Text retrieval for the word counter
//!
//! `HttpFetcher` downloads a page with a request timeout and retries transient
//! failures with exponential backoff. `FileFetcher` reads a local file.

use crate::config::FetchSettings;
use crate::error::{common, ErrorCode, ErrorExt, Result, SiftError};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Source of raw text for the word counter
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String>;
}

/// Whether `location` should be fetched over HTTP
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Pick the text source for `location`
pub fn source_for(location: &str, settings: &FetchSettings) -> Result<Box<dyn TextSource>> {
    if is_remote(location) {
        Ok(Box::new(HttpFetcher::new(settings)?))
    } else {
        Ok(Box::new(FileFetcher))
    }
}

/// HTTP client with retry logic
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| {
                SiftError::fetch_with_code(
                    ErrorCode::FETCH_CLIENT_BUILD,
                    "Failed to create HTTP client",
                    None,
                )
                .with_source(e)
            })?;

        Ok(Self {
            client,
            max_retries: settings.retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    /// Make a single GET request
    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(common::http_status(url, status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Calculate exponential backoff delay
    fn calculate_backoff(&self, retry_count: u32) -> Duration {
        let factor = 2u64.saturating_pow(retry_count.saturating_sub(1));
        Duration::from_millis(self.retry_delay_ms.saturating_mul(factor))
    }
}

#[async_trait]
impl TextSource for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        info!("Fetching {}", location);

        let mut retry_count = 0;
        loop {
            match self.fetch_once(location).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    if retry_count >= self.max_retries || !e.is_retryable() {
                        return Err(e);
                    }

                    retry_count += 1;
                    let delay = self.calculate_backoff(retry_count);
                    warn!(
                        "Fetch attempt {} of {} failed ({}), retrying in {:?}",
                        retry_count,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Reads text from the local filesystem
pub struct FileFetcher;

#[async_trait]
impl TextSource for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let path = PathBuf::from(location);
        info!("Reading {}", path.display());

        tokio::fs::read_to_string(&path).await.to_fetch_error(
            ErrorCode::FETCH_LOCAL_FILE,
            location,
            format!("cannot read {}", path.display()),
        )
    }
}
