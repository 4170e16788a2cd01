//! Sitemap parsing
//!
//! Sitemaps and sitemap indexes share the `<loc>` element, so both are read
//! the same way and told apart afterwards by what their locs point at.

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::sync::LazyLock;

static XML_LOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.xml(\?.*)?$").expect("Failed to compile sitemap loc regex - this is a bug")
});

/// What a fetched sitemap document turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapKind {
    /// Locs are child sitemaps
    Index(Vec<String>),
    /// Locs are page URLs
    UrlSet(Vec<String>),
}

/// Extracts every `<loc>` value in document order
///
/// Namespace prefixes are ignored and CDATA is accepted. Parsing stops at the
/// first XML error, keeping whatever was read up to that point.
///
/// # Examples
///
/// ```
/// use seo_audit::discovery::extract_locs;
///
/// let xml = r#"<urlset><url><loc> https://example.com/a </loc></url></urlset>"#;
/// assert_eq!(extract_locs(xml), vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_locs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => {
                current = Some(String::new());
            }
            Ok(Event::Text(text)) => {
                if let Some(buffer) = current.as_mut() {
                    // Bare `&` and HTML-only entities are kept as written
                    match text.unescape() {
                        Ok(value) => buffer.push_str(&value),
                        Err(_) => buffer.push_str(&String::from_utf8_lossy(&text)),
                    }
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(buffer) = current.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => {
                if let Some(value) = current.take() {
                    let value = value.trim();
                    if !value.is_empty() {
                        locs.push(value.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(
                    "Stopped reading sitemap at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    locs
}

/// Classifies a list of locs
///
/// If any loc ends in `.xml` (optionally followed by a query string) the
/// whole document is treated as an index. A leaf sitemap that happens to
/// list an unrelated `.xml` resource is therefore misread as an index.
pub fn classify_locs(locs: Vec<String>) -> SitemapKind {
    if locs.iter().any(|loc| XML_LOC.is_match(loc)) {
        SitemapKind::Index(locs)
    } else {
        SitemapKind::UrlSet(locs)
    }
}
