//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - Single GET requests for pages and images
//! - Error classification (timeout, transport error, non-2xx status)
//!
//! Nothing is retried; a failed fetch is reported once and the caller moves on.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::{FetchError, FetchResult};
use reqwest::Client;
use std::time::Duration;

/// Thin wrapper around a configured HTTP client
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher from the crawler and user agent configuration
    ///
    /// # Example
    ///
    /// ```
    /// use zeiler_migrate::config::Config;
    /// use zeiler_migrate::crawler::Fetcher;
    ///
    /// let config = Config::default();
    /// let fetcher = Fetcher::new(&config.crawler, &config.user_agent).unwrap();
    /// ```
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, Duration::from_secs(crawler.timeout_secs))?;
        Ok(Self { client })
    }

    /// Fetches a URL and returns the raw response body
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - Body of a 2xx response
    /// * `Err(FetchError::Timeout)` - The request did not finish in time
    /// * `Err(FetchError::Status)` - The server answered with a non-2xx status
    /// * `Err(FetchError::Network)` - Any other transport failure
    pub async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(body.to_vec())
    }

    /// Fetches a URL and decodes the body as (lossy) UTF-8
    pub async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let body = self.fetch(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Builds an HTTP client with the configured identity and timeout
///
/// Redirects are followed with reqwest's default policy; the final response
/// is what gets extracted.
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}
