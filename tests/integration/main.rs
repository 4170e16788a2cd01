//! Integration tests for the auditor
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! discovery, page audits, domain comparison and the HTTP endpoint
//! end-to-end.

mod audit_tests;
mod server_tests;

use seo_audit::config::{Config, UserAgentConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short discovery timeouts
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    config.discovery.robots_timeout_ms = 2_000;
    config.discovery.sitemap_timeout_ms = 2_000;
    config
}

/// Renders a urlset sitemap listing `urls`
pub fn urlset(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|url| format!("  <url><loc>{}</loc></url>\n", url))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

/// Renders a sitemap index listing `sitemaps`
pub fn sitemap_index(sitemaps: &[String]) -> String {
    let entries: String = sitemaps
        .iter()
        .map(|url| format!("  <sitemap><loc>{}</loc></sitemap>\n", url))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

/// Renders a small page with the given title and extra head markup
pub fn page_html(title: &str, head_extra: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><title>{}</title>{}</head>\
         <body><h1>Heading</h1><p>Some body text here</p></body></html>",
        title, head_extra
    )
}

/// Mounts `body` as the response for GET `route`
pub async fn mount_body(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts `/sitemap.xml` listing the given paths on `server`
pub async fn mount_sitemap(server: &MockServer, paths: &[&str]) -> Vec<String> {
    let urls: Vec<String> = paths
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(urlset(&urls))
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
    urls
}
