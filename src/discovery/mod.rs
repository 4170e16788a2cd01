//! URL discovery
//!
//! Resolves the list of pages to audit for a domain:
//! 1. `Sitemap:` hints from `{domain}/robots.txt`
//! 2. The conventional `{domain}/sitemap_index.xml` and `{domain}/sitemap.xml`
//! 3. One level of sitemap-index expansion
//!
//! Every step is best-effort. An unreachable robots.txt or sitemap only
//! shortens the list; discovery itself cannot fail.

mod sitemap;

pub use sitemap::{classify_locs, extract_locs, SitemapKind};

use crate::config::DiscoveryConfig;
use crate::crawler::fetch_document;
use crate::robots::fetch_sitemap_hints;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// Ordered, de-duplicated set of same-origin page URLs with a size cap
struct UrlAccumulator<'a> {
    domain: &'a str,
    limit: usize,
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl<'a> UrlAccumulator<'a> {
    fn new(domain: &'a str, limit: usize) -> Self {
        Self {
            domain,
            limit,
            seen: HashSet::new(),
            urls: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.urls.len() >= self.limit
    }

    /// Adds locs that start with the domain prefix until the cap is reached
    fn extend(&mut self, locs: Vec<String>) {
        for loc in locs {
            if self.is_full() {
                break;
            }
            if !loc.starts_with(self.domain) {
                tracing::trace!("Skipping off-origin URL {}", loc);
                continue;
            }
            if self.seen.insert(loc.clone()) {
                self.urls.push(loc);
            }
        }
    }

    fn finish(self) -> Vec<String> {
        if self.urls.is_empty() {
            vec![format!("{}/", self.domain)]
        } else {
            self.urls
        }
    }
}

/// Discovers up to `limit` page URLs for `domain`
///
/// The result is never empty: when nothing is found it is `[domain + "/"]`.
/// URLs keep sitemap order, are unique, and all start with `domain`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `domain` - Normalized domain prefix, e.g. `https://example.com`
/// * `limit` - Maximum number of URLs to return (values below 1 act as 1)
/// * `config` - robots.txt and sitemap timeouts
pub async fn discover(
    client: &Client,
    domain: &str,
    limit: usize,
    config: &DiscoveryConfig,
) -> Vec<String> {
    let robots_timeout = Duration::from_millis(config.robots_timeout_ms);
    let sitemap_timeout = Duration::from_millis(config.sitemap_timeout_ms);

    let mut candidates = fetch_sitemap_hints(client, domain, robots_timeout).await;
    candidates.push(format!("{}/sitemap_index.xml", domain));
    candidates.push(format!("{}/sitemap.xml", domain));

    let mut fetched: HashSet<String> = HashSet::new();
    let mut accumulator = UrlAccumulator::new(domain, limit.max(1));

    for sitemap_url in candidates {
        if accumulator.is_full() {
            break;
        }
        if !fetched.insert(sitemap_url.clone()) {
            continue;
        }

        let Some(body) = fetch_document(client, &sitemap_url, sitemap_timeout).await else {
            continue;
        };

        match classify_locs(extract_locs(&body)) {
            SitemapKind::UrlSet(locs) => {
                tracing::debug!("Sitemap {} listed {} URL(s)", sitemap_url, locs.len());
                accumulator.extend(locs);
            }
            SitemapKind::Index(children) => {
                tracing::debug!(
                    "Sitemap index {} listed {} child sitemap(s)",
                    sitemap_url,
                    children.len()
                );
                for child in children {
                    if accumulator.is_full() {
                        break;
                    }
                    if !fetched.insert(child.clone()) {
                        continue;
                    }
                    if let Some(child_body) = fetch_document(client, &child, sitemap_timeout).await
                    {
                        accumulator.extend(extract_locs(&child_body));
                    }
                }
            }
        }
    }

    let urls = accumulator.finish();
    tracing::info!("Discovered {} URL(s) for {}", urls.len(), domain);
    urls
}
