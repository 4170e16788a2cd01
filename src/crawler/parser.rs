//! HTML signal extraction
//!
//! This module turns one page's raw HTML into the SEO signals the auditor
//! reports:
//! - Head-level tags: title, meta description, canonical, robots meta,
//!   Open Graph / Twitter tags, JSON-LD blocks, hreflang alternates
//! - Body-level signals: `<html lang>`, `<h1>` headings, images, word count
//!
//! Extraction is total: malformed or empty markup yields `None` and zero
//! counts, never an error.

use crate::url::resolve_against;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Head-level tags are only searched for in this many leading characters
pub const HEAD_SCAN_LIMIT: usize = 200_000;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Failed to parse title selector - this is a bug")
});

static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta[content]").expect("Failed to parse meta selector - this is a bug")
});

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[rel][href]").expect("Failed to parse link selector - this is a bug")
});

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type]").expect("Failed to parse script selector - this is a bug")
});

static HTML_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("html").expect("Failed to parse html selector - this is a bug")
});

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("Failed to parse h1 selector - this is a bug"));

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("Failed to parse img selector - this is a bug"));

static SCRIPT_STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("Failed to compile script/style regex - this is a bug")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("Failed to compile tag regex - this is a bug")
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Failed to compile word regex - this is a bug"));

/// SEO signals extracted from one HTML document
///
/// This is the part of a page audit that depends only on the markup; status,
/// timing and the robots verdict are added by the auditor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalBundle {
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub description_length: usize,
    pub canonical: Option<String>,
    pub robots_meta: Option<String>,
    pub h1: Option<String>,
    pub h1_count: usize,
    pub html_lang: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
    pub schema_ld_count: usize,
    pub hreflangs: Vec<String>,
    pub hreflang_count: usize,
    pub images: usize,
    pub images_missing_alt: usize,
    pub word_count: usize,
}

/// Extracts SEO signals from a page
///
/// # Arguments
///
/// * `page_url` - The URL the HTML was fetched from, used to resolve
///   relative canonical and image URLs
/// * `html` - The raw HTML content
///
/// # Example
///
/// ```
/// use seo_audit::crawler::extract_signals;
///
/// let html = r#"<html lang="en"><head><title>  Foo   Bar  </title>
/// <link rel="canonical" href="/home"></head><body><h1>Hi</h1></body></html>"#;
/// let signals = extract_signals("https://example.com/x", html);
/// assert_eq!(signals.title.as_deref(), Some("Foo   Bar"));
/// assert_eq!(signals.title_length, 7);
/// assert_eq!(signals.canonical.as_deref(), Some("https://example.com/home"));
/// ```
pub fn extract_signals(page_url: &str, html: &str) -> SignalBundle {
    let document = Html::parse_document(html);

    let head_slice = head_scan_slice(html);
    let truncated;
    let head_document = if head_slice.len() < html.len() {
        truncated = Html::parse_document(head_slice);
        &truncated
    } else {
        &document
    };

    let meta = collect_meta(head_document);
    let meta_value = |key: &str| meta.get(key).cloned();
    let resolve = |value: Option<String>| value.map(|v| resolve_against(page_url, &v));

    let title = extract_title(head_document);
    let meta_description = meta_value("description");
    let hreflangs = extract_hreflangs(head_document);
    let (images, images_missing_alt) = count_images(&document);
    let (h1, h1_count) = extract_h1(&document);

    SignalBundle {
        title_length: collapsed_length(title.as_deref()),
        description_length: collapsed_length(meta_description.as_deref()),
        title,
        meta_description,
        canonical: resolve(extract_canonical(head_document)),
        robots_meta: meta_value("robots"),
        h1,
        h1_count,
        html_lang: extract_html_lang(&document),
        og_title: meta_value("og:title"),
        og_description: meta_value("og:description"),
        og_image: resolve(meta_value("og:image")),
        twitter_title: meta_value("twitter:title"),
        twitter_description: meta_value("twitter:description"),
        twitter_image: resolve(meta_value("twitter:image")),
        schema_ld_count: count_json_ld(head_document),
        hreflang_count: hreflangs.len(),
        hreflangs,
        images,
        images_missing_alt,
        word_count: count_words(html),
    }
}

/// Collapses runs of whitespace to one space and trims
///
/// # Examples
///
/// ```
/// use seo_audit::crawler::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Foo \n\t Bar "), "Foo Bar");
/// ```
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the longest prefix holding at most [`HEAD_SCAN_LIMIT`] characters
fn head_scan_slice(html: &str) -> &str {
    match html.char_indices().nth(HEAD_SCAN_LIMIT) {
        Some((byte_index, _)) => &html[..byte_index],
        None => html,
    }
}

fn collapsed_length(value: Option<&str>) -> usize {
    value.map_or(0, |v| collapse_whitespace(v).chars().count())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn rel_tokens(element: &ElementRef) -> Vec<String> {
    element
        .value()
        .attr("rel")
        .map(|rel| rel.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .and_then(|element| non_empty(&element.text().collect::<String>()))
}

/// Maps lowercased `name` / `property` keys to their first non-empty content
///
/// Attributes are looked up by name, so `content` may come before or after
/// `name` on the tag.
fn collect_meta(document: &Html) -> HashMap<String, String> {
    let mut meta = HashMap::new();

    for element in document.select(&META_SELECTOR) {
        let attrs = element.value();
        let key = attrs.attr("name").or_else(|| attrs.attr("property"));
        let (Some(key), Some(content)) = (key, attrs.attr("content").and_then(non_empty)) else {
            continue;
        };
        meta.entry(key.trim().to_lowercase()).or_insert(content);
    }

    meta
}

fn extract_canonical(document: &Html) -> Option<String> {
    document
        .select(&LINK_SELECTOR)
        .find(|element| rel_tokens(element).iter().any(|t| t == "canonical"))
        .and_then(|element| element.value().attr("href"))
        .and_then(non_empty)
}

/// Collects hreflang values of `rel="alternate"` links, lowercased, first-seen order
fn extract_hreflangs(document: &Html) -> Vec<String> {
    let mut hreflangs: Vec<String> = Vec::new();

    for element in document.select(&LINK_SELECTOR) {
        if !rel_tokens(&element).iter().any(|t| t == "alternate") {
            continue;
        }
        let Some(lang) = element.value().attr("hreflang").and_then(non_empty) else {
            continue;
        };
        let lang = lang.to_lowercase();
        if !hreflangs.contains(&lang) {
            hreflangs.push(lang);
        }
    }

    hreflangs
}

fn count_json_ld(document: &Html) -> usize {
    document
        .select(&SCRIPT_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
        })
        .count()
}

fn extract_html_lang(document: &Html) -> Option<String> {
    document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("lang"))
        .and_then(non_empty)
}

/// Returns the first `<h1>` text (inner tags stripped) and the total count
fn extract_h1(document: &Html) -> (Option<String>, usize) {
    let mut headings = document.select(&H1_SELECTOR);
    let first = headings
        .next()
        .map(|element| element.text().collect::<String>());
    let count = first.as_ref().map_or(0, |_| 1 + headings.count());

    (first.as_deref().and_then(non_empty), count)
}

/// Counts `<img>` tags and those carrying no `alt` attribute at all
///
/// `alt=""` is a deliberate decorative-image marker and is not "missing".
fn count_images(document: &Html) -> (usize, usize) {
    document
        .select(&IMG_SELECTOR)
        .fold((0, 0), |(total, missing), element| {
            let has_alt = element.value().attr("alt").is_some();
            (total + 1, missing + usize::from(!has_alt))
        })
}

/// Counts `\w+` runs after removing script/style blocks and all tags
fn count_words(html: &str) -> usize {
    let without_code = SCRIPT_STYLE_BLOCK.replace_all(html, " ");
    let text = ANY_TAG.replace_all(&without_code, " ");
    WORD.find_iter(&text).count()
}
