//! Output module for audit reports and summaries
//!
//! This module handles:
//! - Serializing audit responses as JSON
//! - Computing aggregate statistics over audit results
//! - Generating markdown summaries of a run

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::AuditStatistics;

use crate::crawler::AuditResponse;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes an audit response with the same field names the endpoint uses
pub fn render_json(response: &AuditResponse, pretty: bool) -> OutputResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(json)
}
