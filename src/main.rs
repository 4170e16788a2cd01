//! seo-audit main entry point
//!
//! This is the command-line interface for the seo-audit site auditor.

use clap::Parser;
use seo_audit::config::{load_config_with_hash, Config};
use seo_audit::crawler::{AuditRequest, Coordinator, RawAuditParams};
use seo_audit::output::{generate_markdown_summary, render_json};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// seo-audit: a site SEO auditor
///
/// seo-audit discovers a domain's pages through robots.txt and sitemaps,
/// audits each page's on-page SEO signals, and can diff two domains page by
/// page. Run it once from the command line or serve the audit endpoint.
#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(version)]
#[command(about = "A site SEO auditor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Serve the HTTP endpoint instead of running one audit
    #[arg(long, conflicts_with_all = ["dry_run", "summary"])]
    serve: bool,

    /// Validate config and show the resolved request without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Domain to audit (defaults to server.default-domain)
    #[arg(long)]
    domain: Option<String>,

    /// Second domain to compare page by page
    #[arg(long)]
    compare_domain: Option<String>,

    /// Maximum number of URLs to audit
    #[arg(long)]
    limit: Option<i64>,

    /// Per-page timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<i64>,

    /// Number of pages fetched at once
    #[arg(long)]
    concurrency: Option<i64>,

    /// Write a markdown summary to this path (overrides output.summary-path)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn audit_params(&self) -> RawAuditParams {
        RawAuditParams {
            domain: self.domain.clone(),
            limit: self.limit.map(|v| v.to_string()),
            timeout: self.timeout_ms.map(|v| v.to_string()),
            concurrency: self.concurrency.map(|v| v.to_string()),
            compare_domain: self.compare_domain.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_configuration(path)?,
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.serve {
        seo_audit::server::serve(config).await?;
    } else if cli.dry_run {
        handle_dry_run(&config, &cli.audit_params())?;
    } else {
        let summary_path = cli
            .summary
            .clone()
            .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));
        handle_audit(config, &cli.audit_params(), summary_path.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_audit=info,warn"),
            1 => EnvFilter::new("seo_audit=debug,info"),
            2 => EnvFilter::new("seo_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads and validates the configuration file
fn load_configuration(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --dry-run mode: validates config and shows what would be audited
fn handle_dry_run(
    config: &Config,
    params: &RawAuditParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = AuditRequest::resolve(params, config)?;

    println!("=== seo-audit Dry Run ===\n");

    println!("Request:");
    println!("  Domain: {}", request.domain);
    if let Some(compare_domain) = &request.compare_domain {
        println!("  Compare domain: {}", compare_domain);
    }
    println!("  Limit: {}", request.limit);
    println!("  Timeout: {}ms", request.timeout.as_millis());
    println!("  Concurrency: {}", request.concurrency);

    println!("\nDiscovery:");
    println!("  robots.txt timeout: {}ms", config.discovery.robots_timeout_ms);
    println!("  Sitemap timeout: {}ms", config.discovery.sitemap_timeout_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Runs one audit, prints the JSON report and optionally writes a summary
async fn handle_audit(
    config: Config,
    params: &RawAuditParams,
    summary_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::new(config)?;
    let response = coordinator.handle(params).await?;

    println!("{}", render_json(&response, true)?);

    if let Some(path) = summary_path {
        generate_markdown_summary(&response, path)?;
        tracing::info!("Summary written to: {}", path.display());
    }

    Ok(())
}
