//! Configuration module for seo-audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use seo_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-audit.toml")).unwrap();
//! println!("Default limit: {}", config.audit.default_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AuditConfig, Config, DiscoveryConfig, OutputConfig, ServerConfig, UserAgentConfig,
    CONCURRENCY_RANGE, LIMIT_RANGE, TIMEOUT_RANGE_MS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
