//! Statistics over audit results
//!
//! Page-level counts only consider pages that were actually fetched, so a
//! fetch failure is counted once as a failure and not again as "missing
//! title" or "not indexable".

use crate::compare::ComparisonRecord;
use crate::crawler::{AuditResults, PageMetrics};
use std::collections::BTreeMap;

/// Aggregate statistics for one audit run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditStatistics {
    /// Number of pages audited (base pages in comparator mode)
    pub pages_audited: usize,

    /// Pages with status 0
    pub fetch_failures: usize,

    /// Fetched pages whose status is outside 200-299
    pub non_success: usize,

    /// Fetched pages carrying a noindex directive
    pub non_indexable: usize,

    pub missing_title: usize,
    pub missing_description: usize,
    pub missing_h1: usize,
    pub missing_canonical: usize,

    /// Sum of images without an alt attribute
    pub images_missing_alt: usize,

    /// Mean load time over all pages, failures included
    pub average_load_ms: f64,

    /// Comparator mode only: number of pairs differing per field
    pub field_differences: Option<BTreeMap<&'static str, usize>>,

    /// Comparator mode only: number of pairs equal on every field
    pub pairs_fully_equal: Option<usize>,
}

impl AuditStatistics {
    /// Computes statistics for either kind of result list
    pub fn from_results(results: &AuditResults) -> Self {
        match results {
            AuditResults::Pages(pages) => Self::from_pages(pages.iter()),
            AuditResults::Comparisons(pairs) => Self::from_comparisons(pairs),
        }
    }

    /// Computes page-level statistics
    pub fn from_pages<'a>(pages: impl IntoIterator<Item = &'a PageMetrics>) -> Self {
        let mut stats = Self::default();
        let mut total_load_ms: u64 = 0;

        for page in pages {
            stats.pages_audited += 1;
            total_load_ms = total_load_ms.saturating_add(page.load_ms);

            if page.is_fetch_failure() {
                stats.fetch_failures += 1;
                continue;
            }

            if !(200..300).contains(&page.status) {
                stats.non_success += 1;
            }
            if !page.indexable {
                stats.non_indexable += 1;
            }
            if page.title.is_none() {
                stats.missing_title += 1;
            }
            if page.meta_description.is_none() {
                stats.missing_description += 1;
            }
            if page.h1.is_none() {
                stats.missing_h1 += 1;
            }
            if page.canonical.is_none() {
                stats.missing_canonical += 1;
            }
            stats.images_missing_alt += page.images_missing_alt;
        }

        if stats.pages_audited > 0 {
            stats.average_load_ms = total_load_ms as f64 / stats.pages_audited as f64;
        }

        stats
    }

    /// Computes statistics over the base side plus per-field difference counts
    pub fn from_comparisons(pairs: &[ComparisonRecord]) -> Self {
        let mut stats = Self::from_pages(pairs.iter().map(|pair| &pair.base));

        let mut differences = BTreeMap::new();
        let mut fully_equal = 0;
        for pair in pairs {
            let differing = pair.equal.differing();
            if differing.is_empty() {
                fully_equal += 1;
            }
            for field in differing {
                *differences.entry(field).or_insert(0) += 1;
            }
        }

        stats.field_differences = Some(differences);
        stats.pairs_fully_equal = Some(fully_equal);
        stats
    }

    /// Fraction of audited pages that were fetched, as a percentage
    pub fn fetch_success_rate(&self) -> f64 {
        if self.pages_audited == 0 {
            return 0.0;
        }
        let fetched = self.pages_audited - self.fetch_failures;
        (fetched as f64 / self.pages_audited as f64) * 100.0
    }
}
