//! seo-audit: a site SEO auditor
//!
//! This crate discovers a domain's pages through robots.txt and sitemaps,
//! fetches each page with bounded concurrency and per-page timeouts, extracts
//! on-page SEO signals, and optionally diffs two domains page by page.

pub mod compare;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod robots;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for seo-audit operations
///
/// Discovery and per-page failures never reach this type; they are absorbed
/// into shorter URL lists and degraded page records. What remains here are
/// request-level problems such as a domain that cannot form a URL.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for seo-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use compare::{ComparisonRecord, FieldEquality};
pub use config::Config;
pub use crawler::{audit_page, run_batches, PageMetrics};
pub use discovery::discover;
pub use robots::{parse_robots, RobotsDirectives};
