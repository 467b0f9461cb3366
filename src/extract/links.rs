//! Outbound link discovery
//!
//! Every fetched document has its anchor set harvested and resolved against
//! the page URL; the admission policy and the frontier's seen-check decide
//! what actually gets queued.

use scraper::{Html, Selector};
use url::Url;

/// Collects resolved, fetchable link targets from a document
///
/// Skipped outright: `javascript:`, `mailto:`, `tel:` and data URIs,
/// fragment-only anchors, download links, and anything that does not
/// resolve to http(s).
pub fn discover_links(document: &Html, base_url: &Url, anchor: &Selector) -> Vec<String> {
    let mut links = Vec::new();

    for element in document.select(anchor) {
        if element.value().attr("download").is_some() {
            continue;
        }
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_link(href, base_url) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, filtering unfetchable targets
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
