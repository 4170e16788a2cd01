//! Robots.txt sitemap hints
//!
//! The body is tokenized with the robotstxt crate's parser (the same
//! line grammar Google uses), and only `Sitemap:` lines are kept.

use crate::crawler::fetch_document;
use reqwest::Client;
use robotstxt::{parse_robotstxt, RobotsParseHandler};
use std::time::Duration;

/// Parse callback collecting sitemap URLs in file order
#[derive(Debug, Default)]
struct SitemapCollector {
    sitemaps: Vec<String>,
}

impl RobotsParseHandler for SitemapCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}

    fn handle_allow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_disallow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_sitemap(&mut self, line_num: u32, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        tracing::trace!("robots.txt line {}: sitemap {}", line_num, value);
        self.sitemaps.push(value.to_string());
    }

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}

/// Extracts `Sitemap:` URLs from robots.txt content
///
/// Directive names are matched case-insensitively. Allow/Disallow groups are
/// ignored entirely.
///
/// # Examples
///
/// ```
/// use seo_audit::robots::sitemap_hints;
///
/// let hints = sitemap_hints("User-agent: *\nDisallow: /admin\nSITEMAP: https://example.com/s.xml\n");
/// assert_eq!(hints, vec!["https://example.com/s.xml".to_string()]);
/// ```
pub fn sitemap_hints(content: &str) -> Vec<String> {
    let mut collector = SitemapCollector::default();
    parse_robotstxt(content, &mut collector);
    collector.sitemaps
}

/// Fetches `{domain}/robots.txt` and returns its sitemap hints
///
/// Any failure (unreachable host, timeout, non-2xx status) yields an empty
/// list; discovery then relies on the conventional sitemap locations.
pub async fn fetch_sitemap_hints(client: &Client, domain: &str, timeout: Duration) -> Vec<String> {
    let robots_url = format!("{}/robots.txt", domain);

    match fetch_document(client, &robots_url, timeout).await {
        Some(body) => {
            let hints = sitemap_hints(&body);
            tracing::debug!("{} listed {} sitemap(s)", robots_url, hints.len());
            hints
        }
        None => {
            tracing::debug!("No usable robots.txt at {}", robots_url);
            Vec::new()
        }
    }
}
