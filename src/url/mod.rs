//! URL handling module for seo-audit
//!
//! This module provides domain normalization for incoming requests, origin
//! substitution for cross-domain comparison, and URL normalization used when
//! deciding whether two URL-valued signals are equivalent.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{counterpart_url, normalize_domain};
pub use normalize::normalize_url;

use url::Url;

/// Resolves a possibly-relative reference against a page URL
///
/// Resolution failure returns the reference unchanged rather than dropping
/// it, so a malformed `href` still shows up in the audit.
///
/// # Examples
///
/// ```
/// use seo_audit::url::resolve_against;
///
/// assert_eq!(
///     resolve_against("https://example.com/blog/post", "/img/a.png"),
///     "https://example.com/img/a.png"
/// );
/// assert_eq!(resolve_against("not a base", "/img/a.png"), "/img/a.png");
/// ```
pub fn resolve_against(page_url: &str, reference: &str) -> String {
    let reference = reference.trim();
    Url::parse(page_url)
        .and_then(|base| base.join(reference))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| reference.to_string())
}
