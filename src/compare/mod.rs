//! Cross-domain comparison
//!
//! Audits the same paths on two origins (e.g. staging and production) and
//! reports, per page pair, which SEO signals are equivalent.

use crate::crawler::{audit_page, collapse_whitespace, run_batches, PageMetrics};
use crate::robots::normalize_directive_text;
use crate::url::{counterpart_url, normalize_url};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-signal equivalence of one page pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEquality {
    pub title: bool,
    pub description: bool,
    pub canonical: bool,
    pub robots: bool,
    pub og: bool,
    pub twitter: bool,
    pub h1: bool,
    pub lang: bool,
}

impl FieldEquality {
    /// Whether every compared signal matches
    pub fn all(&self) -> bool {
        self.title
            && self.description
            && self.canonical
            && self.robots
            && self.og
            && self.twitter
            && self.h1
            && self.lang
    }

    /// Names of the signals that differ, in field order
    pub fn differing(&self) -> Vec<&'static str> {
        [
            ("title", self.title),
            ("description", self.description),
            ("canonical", self.canonical),
            ("robots", self.robots),
            ("og", self.og),
            ("twitter", self.twitter),
            ("h1", self.h1),
            ("lang", self.lang),
        ]
        .into_iter()
        .filter(|(_, equal)| !equal)
        .map(|(name, _)| name)
        .collect()
    }
}

/// One audited page on each domain plus their equivalence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub base: PageMetrics,
    pub compare: PageMetrics,
    pub equal: FieldEquality,
}

impl ComparisonRecord {
    /// Pairs two audits and computes their field equivalence
    pub fn new(base: PageMetrics, compare: PageMetrics) -> Self {
        let equal = compare_pages(&base, &compare);
        Self {
            base,
            compare,
            equal,
        }
    }
}

/// Audits every URL on `base_domain` and its counterpart on `compare_domain`
///
/// Both sides run through the batch scheduler with the same chunk size, one
/// domain after the other, and are paired by index.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base_domain` - Normalized prefix the URLs were discovered on
/// * `compare_domain` - Normalized prefix to substitute
/// * `urls` - URLs discovered on the base domain
/// * `concurrency` - Chunk size for both runs
/// * `timeout` - Per-page fetch deadline
pub async fn compare_domains(
    client: &Client,
    base_domain: &str,
    compare_domain: &str,
    urls: &[String],
    concurrency: usize,
    timeout: Duration,
) -> Vec<ComparisonRecord> {
    let counterparts: Vec<String> = urls
        .iter()
        .map(|url| counterpart_url(url, base_domain, compare_domain))
        .collect();

    let worker = move |url: String| async move { audit_page(client, &url, timeout).await };

    tracing::info!("Auditing {} base page(s) on {}", urls.len(), base_domain);
    let base = run_batches(urls, concurrency, worker).await;

    tracing::info!(
        "Auditing {} counterpart page(s) on {}",
        counterparts.len(),
        compare_domain
    );
    let compare = run_batches(&counterparts, concurrency, worker).await;

    base.into_iter()
        .zip(compare)
        .map(|(base, compare)| ComparisonRecord::new(base, compare))
        .collect()
}

/// Computes field equivalence between two page audits
pub fn compare_pages(base: &PageMetrics, compare: &PageMetrics) -> FieldEquality {
    FieldEquality {
        title: text_equal(base.title.as_deref(), compare.title.as_deref()),
        description: text_equal(
            base.meta_description.as_deref(),
            compare.meta_description.as_deref(),
        ),
        canonical: url_equal(base.canonical.as_deref(), compare.canonical.as_deref()),
        robots: robots_equal(base, compare),
        og: text_equal(base.og_title.as_deref(), compare.og_title.as_deref())
            && text_equal(
                base.og_description.as_deref(),
                compare.og_description.as_deref(),
            )
            && url_equal(base.og_image.as_deref(), compare.og_image.as_deref()),
        twitter: text_equal(
            base.twitter_title.as_deref(),
            compare.twitter_title.as_deref(),
        ) && text_equal(
            base.twitter_description.as_deref(),
            compare.twitter_description.as_deref(),
        ) && url_equal(
            base.twitter_image.as_deref(),
            compare.twitter_image.as_deref(),
        ),
        h1: text_equal(base.h1.as_deref(), compare.h1.as_deref()),
        lang: lang_equal(base.html_lang.as_deref(), compare.html_lang.as_deref()),
    }
}

/// Case-sensitive equality after whitespace collapse and trim
///
/// # Examples
///
/// ```
/// use seo_audit::compare::text_equal;
///
/// assert!(text_equal(Some(" Home  page "), Some("Home page")));
/// assert!(!text_equal(Some("Home"), Some("home")));
/// assert!(text_equal(None, None));
/// ```
pub fn text_equal(a: Option<&str>, b: Option<&str>) -> bool {
    a.map(collapse_whitespace) == b.map(collapse_whitespace)
}

/// Text equality on lowercased language codes
pub fn lang_equal(a: Option<&str>, b: Option<&str>) -> bool {
    let normalize = |v: &str| collapse_whitespace(v).to_lowercase();
    a.map(normalize) == b.map(normalize)
}

/// URL equality on normalized form, falling back to text equality
///
/// # Examples
///
/// ```
/// use seo_audit::compare::url_equal;
///
/// assert!(url_equal(Some("https://example.com/tours/"), Some("https://EXAMPLE.com/tours")));
/// assert!(!url_equal(Some("/relative"), Some("/Relative")));
/// ```
pub fn url_equal(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (normalize_url(a), normalize_url(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => collapse_whitespace(a) == collapse_whitespace(b),
        },
        _ => false,
    }
}

/// All robots flags plus the normalized raw directive strings must match
fn robots_equal(base: &PageMetrics, compare: &PageMetrics) -> bool {
    base.indexable == compare.indexable
        && base.robots_noindex == compare.robots_noindex
        && base.robots_nofollow == compare.robots_nofollow
        && base.robots_noarchive == compare.robots_noarchive
        && base.robots_nosnippet == compare.robots_nosnippet
        && normalize_directive_text(base.robots_meta.as_deref())
            == normalize_directive_text(compare.robots_meta.as_deref())
        && normalize_directive_text(base.x_robots_tag.as_deref())
            == normalize_directive_text(compare.x_robots_tag.as_deref())
}
