//! Crawler module for page fetching and auditing
//!
//! This module contains the core audit pipeline, including:
//! - HTTP fetching with per-call timeouts
//! - HTML signal extraction
//! - Page auditing into [`PageMetrics`] records
//! - Chunked batch scheduling
//! - Overall audit coordination

mod auditor;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use auditor::{audit_page, PageMetrics};
pub use coordinator::{
    run_audit, AuditRequest, AuditResponse, AuditResults, Coordinator, RawAuditParams,
};
pub use fetcher::{build_http_client, fetch_document, fetch_url, FetchResult};
pub use parser::{collapse_whitespace, extract_signals, SignalBundle, HEAD_SCAN_LIMIT};
pub use scheduler::run_batches;
