//! Page auditor
//!
//! Fetches one URL and turns the response into a [`PageMetrics`] record.
//! Every failure is absorbed into a degraded record, so callers always get
//! exactly one record per URL.

use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::parser::{extract_signals, SignalBundle};
use crate::robots::parse_robots;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audit result for one URL
///
/// `status == 0` marks a page that could not be fetched at all; in that case
/// every string is `None`, every count is zero and every flag is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    /// The exact URL requested
    pub url: String,
    pub status: u16,
    /// Request start to full body read, in milliseconds
    pub load_ms: u64,

    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub robots_meta: Option<String>,
    pub x_robots_tag: Option<String>,
    pub h1: Option<String>,
    pub html_lang: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,

    pub title_length: usize,
    pub description_length: usize,
    pub h1_count: usize,
    pub word_count: usize,
    pub images: usize,
    pub images_missing_alt: usize,
    pub schema_ld_count: usize,
    pub hreflang_count: usize,
    pub hreflangs: Vec<String>,

    pub indexable: bool,
    pub robots_noindex: bool,
    pub robots_nofollow: bool,
    pub robots_noarchive: bool,
    pub robots_nosnippet: bool,
}

impl PageMetrics {
    /// Builds the degraded record for a page that could not be fetched
    pub fn failed(url: &str, load_ms: u64) -> Self {
        Self {
            url: url.to_string(),
            load_ms,
            ..Self::default()
        }
    }

    /// Merges response data, extracted signals and the robots verdict
    pub fn from_response(
        url: &str,
        status: u16,
        load_ms: u64,
        x_robots_tag: Option<String>,
        signals: SignalBundle,
    ) -> Self {
        let directives = parse_robots(&[signals.robots_meta.as_deref(), x_robots_tag.as_deref()]);

        Self {
            url: url.to_string(),
            status,
            load_ms,
            title: signals.title,
            meta_description: signals.meta_description,
            canonical: signals.canonical,
            robots_meta: signals.robots_meta,
            x_robots_tag,
            h1: signals.h1,
            html_lang: signals.html_lang,
            og_title: signals.og_title,
            og_description: signals.og_description,
            og_image: signals.og_image,
            twitter_title: signals.twitter_title,
            twitter_description: signals.twitter_description,
            twitter_image: signals.twitter_image,
            title_length: signals.title_length,
            description_length: signals.description_length,
            h1_count: signals.h1_count,
            word_count: signals.word_count,
            images: signals.images,
            images_missing_alt: signals.images_missing_alt,
            schema_ld_count: signals.schema_ld_count,
            hreflang_count: signals.hreflang_count,
            hreflangs: signals.hreflangs,
            indexable: directives.indexable,
            robots_noindex: directives.noindex,
            robots_nofollow: directives.nofollow,
            robots_noarchive: directives.noarchive,
            robots_nosnippet: directives.nosnippet,
        }
    }

    /// Whether the fetch failed before any response arrived
    pub fn is_fetch_failure(&self) -> bool {
        self.status == 0
    }
}

/// Audits a single page
///
/// Extraction runs on any response body regardless of status code, so a 500
/// page with valid markup still reports its title. Never fails: network
/// errors, timeouts and malformed URLs produce [`PageMetrics::failed`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to audit
/// * `timeout` - Deadline for this page's request and body read
pub async fn audit_page(client: &Client, url: &str, timeout: Duration) -> PageMetrics {
    match fetch_url(client, url, timeout).await {
        FetchResult::Success {
            final_url,
            status_code,
            x_robots_tag,
            body,
            elapsed,
        } => {
            // Relative references resolve against the requested URL
            let signals = extract_signals(url, &body);
            tracing::debug!(
                "Audited {} (served from {}) -> HTTP {} in {}ms",
                url,
                final_url,
                status_code,
                elapsed.as_millis()
            );
            PageMetrics::from_response(url, status_code, millis(elapsed), x_robots_tag, signals)
        }
        FetchResult::NetworkError {
            error,
            timed_out,
            elapsed,
        } => {
            if timed_out {
                tracing::warn!("Timed out auditing {}: {}", url, error);
            } else {
                tracing::warn!("Failed to audit {}: {}", url, error);
            }
            PageMetrics::failed(url, millis(elapsed))
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
