//! Robots handling module
//!
//! Two unrelated kinds of "robots" input feed the auditor:
//! - page-level directives from `<meta name="robots">` and the `X-Robots-Tag`
//!   header, which decide whether a page is indexable
//! - `robots.txt`, which is only read for its `Sitemap:` hints; allow and
//!   disallow rules are not enforced

mod directives;
mod txt;

pub use directives::{normalize_directive_text, parse_robots, RobotsDirectives};
pub use txt::{fetch_sitemap_hints, sitemap_hints};
