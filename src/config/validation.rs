use crate::config::types::{
    AuditConfig, Config, DiscoveryConfig, OutputConfig, ServerConfig, UserAgentConfig,
    CONCURRENCY_RANGE, LIMIT_RANGE, TIMEOUT_RANGE_MS,
};
use crate::url::normalize_domain;
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_audit_config(&config.audit)?;
    validate_discovery_config(&config.discovery)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address '{}' is not a socket address: {}",
            config.bind_address, e
        ))
    })?;

    normalize_domain(&config.default_domain).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid default_domain '{}': {}",
            config.default_domain, e
        ))
    })?;

    Ok(())
}

/// Validates that audit defaults fall inside the request clamp ranges
fn validate_audit_config(config: &AuditConfig) -> Result<(), ConfigError> {
    if !LIMIT_RANGE.contains(&config.default_limit) {
        return Err(ConfigError::Validation(format!(
            "default_limit must be between {} and {}, got {}",
            LIMIT_RANGE.start(),
            LIMIT_RANGE.end(),
            config.default_limit
        )));
    }

    if !TIMEOUT_RANGE_MS.contains(&config.default_timeout_ms) {
        return Err(ConfigError::Validation(format!(
            "default_timeout_ms must be between {} and {}, got {}ms",
            TIMEOUT_RANGE_MS.start(),
            TIMEOUT_RANGE_MS.end(),
            config.default_timeout_ms
        )));
    }

    if !CONCURRENCY_RANGE.contains(&config.default_concurrency) {
        return Err(ConfigError::Validation(format!(
            "default_concurrency must be between {} and {}, got {}",
            CONCURRENCY_RANGE.start(),
            CONCURRENCY_RANGE.end(),
            config.default_concurrency
        )));
    }

    Ok(())
}

/// Validates discovery timeouts
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.robots_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "robots_timeout_ms must be greater than 0".to_string(),
        ));
    }

    if config.sitemap_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "sitemap_timeout_ms must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.summary_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}
