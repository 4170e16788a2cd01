//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of an audit run,
//! including statistics and a per-page table.

use crate::compare::ComparisonRecord;
use crate::crawler::{collapse_whitespace, AuditResponse, AuditResults, PageMetrics};
use crate::output::stats::AuditStatistics;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary of an audit response
///
/// # Arguments
///
/// * `response` - The audit response
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(response: &AuditResponse, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(response);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit response as markdown
pub fn format_markdown_summary(response: &AuditResponse) -> String {
    let stats = AuditStatistics::from_results(&response.results);
    let mut md = String::new();

    md.push_str("# SEO Audit Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Domain**: {}\n", response.domain));
    if let Some(compare_domain) = &response.compare_domain {
        md.push_str(&format!("- **Compared With**: {}\n", compare_domain));
    }
    md.push_str(&format!(
        "- **Generated**: {}\n",
        response.generated_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Results**: {}\n\n", response.count));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Audited**: {}\n", stats.pages_audited));
    md.push_str(&format!("- **Fetch Failures**: {}\n", stats.fetch_failures));
    md.push_str(&format!(
        "- **Fetch Success Rate**: {:.2}%\n",
        stats.fetch_success_rate()
    ));
    md.push_str(&format!("- **Non-2xx Pages**: {}\n", stats.non_success));
    md.push_str(&format!(
        "- **Non-indexable Pages**: {}\n",
        stats.non_indexable
    ));
    md.push_str(&format!(
        "- **Average Load**: {:.0} ms\n\n",
        stats.average_load_ms
    ));

    md.push_str("## Missing Signals\n\n");
    md.push_str("| Signal | Pages |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Title | {} |\n", stats.missing_title));
    md.push_str(&format!(
        "| Meta Description | {} |\n",
        stats.missing_description
    ));
    md.push_str(&format!("| H1 | {} |\n", stats.missing_h1));
    md.push_str(&format!("| Canonical | {} |\n", stats.missing_canonical));
    md.push_str(&format!(
        "| Image Alt (images) | {} |\n\n",
        stats.images_missing_alt
    ));

    if let Some(differences) = &stats.field_differences {
        md.push_str("## Field Differences\n\n");
        md.push_str(&format!(
            "Pairs equal on every field: {}\n\n",
            stats.pairs_fully_equal.unwrap_or(0)
        ));
        if !differences.is_empty() {
            md.push_str("| Field | Differing Pairs |\n");
            md.push_str("|-------|-----------------|\n");
            for (field, count) in differences {
                md.push_str(&format!("| {} | {} |\n", field, count));
            }
            md.push('\n');
        }
    }

    match &response.results {
        AuditResults::Pages(pages) => push_page_table(&mut md, pages),
        AuditResults::Comparisons(pairs) => push_comparison_table(&mut md, pairs),
    }

    md
}

fn push_page_table(md: &mut String, pages: &[PageMetrics]) {
    if pages.is_empty() {
        return;
    }
    md.push_str("## Pages\n\n");
    md.push_str("| URL | Status | Load (ms) | Title | Indexable | Words |\n");
    md.push_str("|-----|--------|-----------|-------|-----------|-------|\n");
    for page in pages {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            page.url,
            page.status,
            page.load_ms,
            cell(page.title.as_deref()),
            if page.indexable { "yes" } else { "no" },
            page.word_count
        ));
    }
    md.push('\n');
}

fn push_comparison_table(md: &mut String, pairs: &[ComparisonRecord]) {
    if pairs.is_empty() {
        return;
    }
    md.push_str("## Page Pairs\n\n");
    md.push_str("| Base URL | Base Status | Compare Status | Differing Fields |\n");
    md.push_str("|----------|-------------|----------------|------------------|\n");
    for pair in pairs {
        let differing = pair.equal.differing();
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            pair.base.url,
            pair.base.status,
            pair.compare.status,
            if differing.is_empty() {
                "-".to_string()
            } else {
                differing.join(", ")
            }
        ));
    }
    md.push('\n');
}

/// Table cell text on one line with pipes escaped
fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) => collapse_whitespace(v).replace('|', "\\|"),
        None => "-".to_string(),
    }
}
