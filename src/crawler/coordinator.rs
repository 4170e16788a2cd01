//! Audit coordinator - request-level orchestration
//!
//! This module turns one audit request into one response:
//! - Resolving raw request parameters against configured defaults and clamps
//! - Discovering URLs on the requested domain
//! - Auditing them in batches, or comparing them against a second domain
//! - Assembling the response payload

use crate::compare::{compare_domains, ComparisonRecord};
use crate::config::{Config, CONCURRENCY_RANGE, LIMIT_RANGE, TIMEOUT_RANGE_MS};
use crate::crawler::{audit_page, build_http_client, run_batches, PageMetrics};
use crate::discovery::discover;
use crate::url::normalize_domain;
use crate::AuditError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Audit parameters exactly as received, before defaults and clamping
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuditParams {
    pub domain: Option<String>,
    pub limit: Option<String>,
    pub timeout: Option<String>,
    pub concurrency: Option<String>,
    pub compare_domain: Option<String>,
}

/// A fully resolved audit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    /// Normalized domain prefix, e.g. `https://example.com`
    pub domain: String,
    /// Normalized prefix of the comparison domain, if comparing
    pub compare_domain: Option<String>,
    pub limit: usize,
    pub timeout: Duration,
    pub concurrency: usize,
}

impl AuditRequest {
    /// Resolves raw parameters against the configuration
    ///
    /// Missing or unparseable numbers take the configured default; every
    /// number is then clamped to its allowed range. A blank `compareDomain`
    /// counts as absent.
    ///
    /// # Returns
    ///
    /// * `Ok(AuditRequest)` - The resolved request
    /// * `Err(AuditError)` - A domain could not be turned into a URL
    pub fn resolve(params: &RawAuditParams, config: &Config) -> Result<Self, AuditError> {
        let domain = normalize_domain(
            params
                .domain
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(&config.server.default_domain),
        )?;

        let compare_domain = params
            .compare_domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(normalize_domain)
            .transpose()?;

        let limit = clamped(
            params.limit.as_deref(),
            config.audit.default_limit,
            LIMIT_RANGE,
        );
        let timeout_ms = clamped(
            params.timeout.as_deref(),
            config.audit.default_timeout_ms,
            TIMEOUT_RANGE_MS,
        );
        let concurrency = clamped(
            params.concurrency.as_deref(),
            config.audit.default_concurrency,
            CONCURRENCY_RANGE,
        );

        Ok(Self {
            domain,
            compare_domain,
            limit,
            timeout: Duration::from_millis(timeout_ms),
            concurrency,
        })
    }
}

/// Parses `raw` as an integer (falling back to `default`) and clamps it
fn clamped<T>(raw: Option<&str>, default: T, range: RangeInclusive<T>) -> T
where
    T: Copy + Ord + TryFrom<i64>,
{
    let value = match raw.map(|r| r.trim().parse::<i64>()) {
        Some(Ok(parsed)) if parsed < 0 => *range.start(),
        Some(Ok(parsed)) => T::try_from(parsed).unwrap_or(*range.end()),
        _ => default,
    };
    value.clamp(*range.start(), *range.end())
}

/// Results of an audit run: plain page audits or comparison pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditResults {
    Pages(Vec<PageMetrics>),
    Comparisons(Vec<ComparisonRecord>),
}

impl AuditResults {
    pub fn len(&self) -> usize {
        match self {
            AuditResults::Pages(pages) => pages.len(),
            AuditResults::Comparisons(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Successful response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub ok: bool,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_domain: Option<String>,
    pub count: usize,
    pub results: AuditResults,
    pub generated_at: DateTime<Utc>,
}

impl AuditResponse {
    fn new(domain: String, compare_domain: Option<String>, results: AuditResults) -> Self {
        Self {
            ok: true,
            domain,
            compare_domain,
            count: results.len(),
            results,
            generated_at: Utc::now(),
        }
    }
}

/// Runs audits with one shared HTTP client
///
/// Cloning is cheap; clones share the client's connection pool. No other
/// state survives between runs.
#[derive(Clone)]
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AuditError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// The configuration this coordinator was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves raw parameters and runs the audit
    pub async fn handle(&self, params: &RawAuditParams) -> Result<AuditResponse, AuditError> {
        let request = AuditRequest::resolve(params, &self.config)?;
        Ok(self.run(&request).await)
    }

    /// Runs one audit
    ///
    /// Discovery and page failures are absorbed along the way, so this
    /// always produces a response with one result per discovered URL.
    pub async fn run(&self, request: &AuditRequest) -> AuditResponse {
        let start_time = Instant::now();
        tracing::info!(
            "Starting audit of {} (limit {}, concurrency {}, timeout {}ms)",
            request.domain,
            request.limit,
            request.concurrency,
            request.timeout.as_millis()
        );

        let urls = discover(
            &self.client,
            &request.domain,
            request.limit,
            &self.config.discovery,
        )
        .await;

        let results = match &request.compare_domain {
            Some(compare_domain) => AuditResults::Comparisons(
                compare_domains(
                    &self.client,
                    &request.domain,
                    compare_domain,
                    &urls,
                    request.concurrency,
                    request.timeout,
                )
                .await,
            ),
            None => {
                let client = &self.client;
                let timeout = request.timeout;
                AuditResults::Pages(
                    run_batches(&urls, request.concurrency, move |url: String| async move {
                        audit_page(client, &url, timeout).await
                    })
                    .await,
                )
            }
        };

        tracing::info!(
            "Audit of {} completed: {} result(s) in {:?}",
            request.domain,
            results.len(),
            start_time.elapsed()
        );

        AuditResponse::new(
            request.domain.clone(),
            request.compare_domain.clone(),
            results,
        )
    }
}

/// Runs a single audit with a fresh coordinator
///
/// # Example
///
/// ```no_run
/// use seo_audit::config::Config;
/// use seo_audit::crawler::{run_audit, RawAuditParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = RawAuditParams {
///     domain: Some("example.com".to_string()),
///     ..RawAuditParams::default()
/// };
/// let response = run_audit(Config::default(), &params).await?;
/// println!("{} page(s) audited", response.count);
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(config: Config, params: &RawAuditParams) -> Result<AuditResponse, AuditError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.handle(params).await
}
