use serde::Deserialize;
use std::ops::RangeInclusive;

/// Allowed range for the number of URLs audited per request
pub const LIMIT_RANGE: RangeInclusive<usize> = 1..=500;

/// Allowed range for the per-page fetch timeout (milliseconds)
pub const TIMEOUT_RANGE_MS: RangeInclusive<u64> = 2_000..=15_000;

/// Allowed range for the batch size
pub const CONCURRENCY_RANGE: RangeInclusive<usize> = 1..=10;

/// Main configuration structure for seo-audit
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the endpoint listens on
    #[serde(rename = "bind-address")]
    pub bind_address: String,

    /// Domain audited when a request does not name one
    #[serde(rename = "default-domain")]
    pub default_domain: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            default_domain: "https://www.example.com".to_string(),
        }
    }
}

/// Defaults applied to audit requests that omit a parameter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Maximum URLs to discover and audit
    #[serde(rename = "default-limit")]
    pub default_limit: usize,

    /// Per-page fetch timeout (milliseconds)
    #[serde(rename = "default-timeout-ms")]
    pub default_timeout_ms: u64,

    /// Number of pages fetched per batch
    #[serde(rename = "default-concurrency")]
    pub default_concurrency: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_limit: 200,
            default_timeout_ms: 8_000,
            default_concurrency: 5,
        }
    }
}

/// Timeouts used while reading robots.txt and sitemaps
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    #[serde(rename = "robots-timeout-ms")]
    pub robots_timeout_ms: u64,

    #[serde(rename = "sitemap-timeout-ms")]
    pub sitemap_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            robots_timeout_ms: 5_000,
            sitemap_timeout_ms: 8_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SeoAudit".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/seo-audit-bot".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where one-shot runs write their markdown summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
