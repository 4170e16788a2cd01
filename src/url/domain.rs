use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a user-supplied domain into the prefix every audited URL shares
///
/// A missing scheme is replaced with `https://`. The result has no trailing
/// slash, so `{domain}/robots.txt` and the same-origin prefix check both work
/// by plain string concatenation.
///
/// # Arguments
///
/// * `input` - The domain as given by the caller (e.g. `example.com`)
///
/// # Returns
///
/// * `Ok(String)` - The normalized domain prefix
/// * `Err(UrlError)` - The input cannot form an HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use seo_audit::url::normalize_domain;
///
/// assert_eq!(normalize_domain("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_domain("http://Example.com/").unwrap(), "http://example.com");
/// ```
pub fn normalize_domain(input: &str) -> UrlResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty domain".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Derives the URL on `compare_domain` that corresponds to `url` on `base_domain`
///
/// The base prefix is swapped for the compare prefix, keeping path and query.
/// URLs that do not carry the exact base prefix have their origin replaced
/// instead.
///
/// # Examples
///
/// ```
/// use seo_audit::url::counterpart_url;
///
/// assert_eq!(
///     counterpart_url(
///         "https://www.example.com/tours?page=2",
///         "https://www.example.com",
///         "https://staging.example.com",
///     ),
///     "https://staging.example.com/tours?page=2"
/// );
/// ```
pub fn counterpart_url(url: &str, base_domain: &str, compare_domain: &str) -> String {
    if let Some(rest) = url.strip_prefix(base_domain) {
        return format!("{}{}", compare_domain, rest);
    }

    match (Url::parse(url), Url::parse(compare_domain)) {
        (Ok(source), Ok(mut target)) => {
            target.set_path(source.path());
            target.set_query(source.query());
            target.to_string()
        }
        _ => format!("{}/", compare_domain),
    }
}
