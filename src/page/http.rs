// src/page/http.rs
// =============================================================================
// This module downloads a single page over HTTP.
//
// Key functionality:
// - Makes one HTTP GET request with a fixed 10 second timeout
// - Only accepts HTML responses (Content-Type: text/html...)
// - Turns every failure into a typed FetchError instead of panicking
//
// The crawler never lets a FetchError stop the crawl. It stores the
// error's description as the page text and moves on (see crawl::engine).
//
// Rust concepts:
// - Traits: Fetch lets tests swap the network for an in-memory fake
// - thiserror: Derives Display for our error enum
// - async/await: reqwest is an async client
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// How long a single request may take before we give up on it
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A page that was downloaded successfully
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    /// HTTP status code (non-2xx pages are still returned)
    pub status: u16,
    /// The raw HTML body
    pub body: String,
}

/// Everything that can go wrong while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("not an HTML page (content type: {0})")]
    NotHtml(String),
    #[error("response has no content type")]
    MissingContentType,
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

// Anything that can turn a URL into a page
//
// The real implementation is HttpFetcher. Tests use a HashMap-backed fake.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Fetches pages with reqwest
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    // Builds the HTTP client used for the whole crawl
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    // pool_max_idle_per_host(0) means connections are not kept around
    // between requests: each fetch opens and closes its own.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, timeout })
    }

    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .ok_or(FetchError::MissingContentType)?
            .to_str()
            .map_err(|_| FetchError::MissingContentType)?
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchError::NotHtml(content_type));
        }

        // .text() decodes the body using the charset from the headers
        let body = response.text().await?;

        Ok(FetchedPage { status, body })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.get(url).await.map_err(|e| match e {
            FetchError::Request(err) if err.is_timeout() => FetchError::Timeout(self.timeout),
            other => other,
        })
    }
}

// Checks a Content-Type header value
//
// Examples:
//   "text/html" -> true
//   "text/html; charset=utf-8" -> true
//   "application/pdf" -> false
fn is_html(content_type: &str) -> bool {
    content_type.starts_with("text/html")
}
