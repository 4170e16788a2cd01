//! HTTP fetcher implementation
//!
//! This module handles all outbound HTTP requests, including:
//! - Building the HTTP client with the auditor's user agent
//! - Timed GET requests where each call carries its own deadline
//! - Capturing the status code and `X-Robots-Tag` header
//! - Error classification

use crate::config::UserAgentConfig;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// A response was received and its body fully read, whatever the status
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// `X-Robots-Tag` header value(s), comma-joined
        x_robots_tag: Option<String>,
        /// Page body content
        body: String,
        /// Time from request start to full body read
        elapsed: Duration,
    },

    /// No usable response (DNS, connect, TLS, timeout, malformed URL, body read)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the deadline expired
        timed_out: bool,
        /// Time spent until the failure
        elapsed: Duration,
    },
}

/// Builds an HTTP client with proper configuration
///
/// No client-wide timeout is set: every call passes its own deadline to
/// [`fetch_url`], so sibling fetches never share a cancellation scope.
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use seo_audit::config::UserAgentConfig;
/// use seo_audit::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, enforcing `timeout` over the whole request and body read
///
/// Non-2xx responses are still `Success`: the caller decides what a status
/// means. The deadline is applied with `tokio::time::timeout`, so expiry
/// drops only this request's future.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Deadline for headers and body together
///
/// # Returns
///
/// A FetchResult carrying either the response or the failure reason
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let started = Instant::now();

    let request = async {
        let response = client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let x_robots_tag = joined_header(response.headers(), "x-robots-tag");
        let body = response.text().await?;
        Ok::<_, reqwest::Error>((final_url, status_code, x_robots_tag, body))
    };

    match tokio::time::timeout(timeout, request).await {
        Ok(Ok((final_url, status_code, x_robots_tag, body))) => FetchResult::Success {
            final_url,
            status_code,
            x_robots_tag,
            body,
            elapsed: started.elapsed(),
        },
        Ok(Err(e)) => FetchResult::NetworkError {
            error: classify_error(&e),
            timed_out: e.is_timeout(),
            elapsed: started.elapsed(),
        },
        Err(_) => FetchResult::NetworkError {
            error: format!("Request timeout after {}ms", timeout.as_millis()),
            timed_out: true,
            elapsed: started.elapsed(),
        },
    }
}

/// Fetches a document that is only useful on a 2xx response
///
/// Used for robots.txt and sitemaps, where an error page body carries no
/// usable data. Every failure collapses to `None`.
pub async fn fetch_document(client: &Client, url: &str, timeout: Duration) -> Option<String> {
    match fetch_url(client, url, timeout).await {
        FetchResult::Success {
            status_code, body, ..
        } if (200..300).contains(&status_code) => Some(body),
        FetchResult::Success { status_code, .. } => {
            tracing::debug!("{} returned HTTP {}", url, status_code);
            None
        }
        FetchResult::NetworkError { error, .. } => {
            tracing::debug!("Failed to fetch {}: {}", url, error);
            None
        }
    }
}

/// Joins every value of a repeated header with `", "`
fn joined_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Turns a reqwest error into a short description
fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else if e.is_body() || e.is_decode() {
        format!("Failed to read body: {}", e)
    } else {
        e.to_string()
    }
}
