//! Robots directive parsing
//!
//! Combines the meta robots content and the `X-Robots-Tag` header into one
//! normalized directive set.

use serde::Serialize;

/// Directive set derived from every robots source of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RobotsDirectives {
    pub noindex: bool,
    pub nofollow: bool,
    pub noarchive: bool,
    pub nosnippet: bool,
    /// Always `!noindex`
    pub indexable: bool,
}

/// Parses robots directives from any number of optional sources
///
/// Sources are joined with commas and lowercased, then split into tokens on
/// commas, semicolons and whitespace. Only whole tokens count, so
/// `noindexer` does not imply `noindex`. The `none` directive implies both
/// `noindex` and `nofollow`.
///
/// # Examples
///
/// ```
/// use seo_audit::robots::parse_robots;
///
/// let directives = parse_robots(&[Some("noindex, nofollow"), None]);
/// assert!(directives.noindex && directives.nofollow);
/// assert!(!directives.indexable);
///
/// let directives = parse_robots(&[Some("noindexer")]);
/// assert!(!directives.noindex);
/// ```
pub fn parse_robots(sources: &[Option<&str>]) -> RobotsDirectives {
    let combined = sources
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(",")
        .to_lowercase();

    let mut directives = RobotsDirectives::default();

    for token in combined
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match token {
            "noindex" => directives.noindex = true,
            "nofollow" => directives.nofollow = true,
            "noarchive" => directives.noarchive = true,
            "nosnippet" => directives.nosnippet = true,
            "none" => {
                directives.noindex = true;
                directives.nofollow = true;
            }
            _ => tracing::trace!("Ignoring robots token: {}", token),
        }
    }

    directives.indexable = !directives.noindex;
    directives
}

/// Lowercases a directive string and collapses its whitespace
///
/// Used when comparing raw directive text between two pages, where
/// `"NOINDEX,  follow"` and `"noindex, follow"` are the same instruction.
pub fn normalize_directive_text(value: Option<&str>) -> Option<String> {
    value.map(|v| {
        v.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    })
}
