// src/crawl/links.rs
// =============================================================================
// This module decides which links on a page belong to the site we crawl.
//
// Rules, in order:
// 1. Absolute http(s) links are kept only if their host[:port] is exactly
//    the local domain. No subdomains, no lower-casing.
// 2. Relative links starting with '#', 'mailto:' or 'tel:' are dropped.
// 3. One leading '/' is removed from the remaining relative links.
// 4. They become "https://" + domain + "/" + link. Always https, even when
//    the seed was http.
// 5. Any accepted link loses one trailing '/'.
//
// Rust concepts:
// - Option<String>: None means "rejected"
// - strip_prefix / strip_suffix: Return Option<&str> instead of panicking
// - BTreeSet: A sorted set, so results come out in a stable order
// =============================================================================

use std::collections::BTreeSet;

// Returns the network location (host and optional port) of an absolute URL
//
// This is the raw text between "://" and the first '/', '?' or '#'.
// It is NOT normalized, so "Example.com" and "example.com" differ.
//
// Examples:
//   "https://example.com/about" -> Some("example.com")
//   "http://localhost:8080?q=1" -> Some("localhost:8080")
//   "/about" -> None
pub fn netloc(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

// Checks the "^https?://.+$" shape: an http(s) scheme followed by at
// least one character on a single line. Like '$' in most regex engines,
// one trailing newline is allowed (and kept in the link).
fn is_absolute_http(href: &str) -> bool {
    let rest = href
        .strip_prefix("https://")
        .or_else(|| href.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let line = rest.strip_suffix('\n').unwrap_or(rest);
            !line.is_empty() && !line.contains('\n')
        }
        None => false,
    }
}

// Turns one raw href into a crawlable URL on the local domain
//
// Parameters:
//   local_domain: host[:port] of the seed URL
//   href: the href attribute exactly as it appeared in the page
//
// Returns: Some(url) if the link should be crawled, None otherwise
pub fn normalize_link(local_domain: &str, href: &str) -> Option<String> {
    let candidate = if is_absolute_http(href) {
        if netloc(href)? != local_domain {
            return None; // off-site
        }
        href.to_string()
    } else {
        if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("tel:") {
            return None;
        }
        let path = href.strip_prefix('/').unwrap_or(href);
        format!("https://{}/{}", local_domain, path)
    };

    Some(match candidate.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => candidate,
    })
}

// Normalizes every href found on a page
//
// Duplicates collapse into one entry. The caller still has to check the
// visited set; this function knows nothing about what was crawled.
pub fn domain_links<I, S>(local_domain: &str, hrefs: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    hrefs
        .into_iter()
        .filter_map(|href| normalize_link(local_domain, href.as_ref()))
        .collect()
}
