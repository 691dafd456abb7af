//! Link discovery for the crawl frontier
//!
//! Only same-origin document links are followed. Fragments are stripped so
//! `page#top` and `page` count as one URL.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Path extensions that never lead to an article
const SKIPPED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".gif", ".css", ".js"];

/// Finds crawlable links relative to a fixed site origin
#[derive(Debug, Clone)]
pub struct LinkDiscoverer {
    base: Url,
    anchors: Selector,
}

impl LinkDiscoverer {
    /// Creates a discoverer that keeps links on the origin of `base`
    pub fn new(base: Url) -> Self {
        Self {
            base,
            anchors: Selector::parse("a[href]").expect("hardcoded selector is valid"),
        }
    }

    /// Returns candidate URLs from all anchors in the document
    ///
    /// # Link Rules
    ///
    /// **Discarded:**
    /// - `javascript:`, `mailto:`, `tel:`, `data:` links, empty and fragment-only hrefs
    /// - Links to another origin (scheme, host or port differ)
    /// - Paths ending in `.pdf`, `.jpg`, `.png`, `.gif`, `.css`, `.js`
    /// - URLs already in `visited`
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use std::collections::HashSet;
    /// use url::Url;
    /// use zeiler_migrate::crawler::LinkDiscoverer;
    ///
    /// let base = Url::parse("https://www.zeiler.me/").unwrap();
    /// let html = Html::parse_document(
    ///     r#"<a href="/detlef/geschichte#oben">Geschichte</a><a href="https://other.org/">x</a>"#,
    /// );
    ///
    /// let links = LinkDiscoverer::new(base.clone()).discover(&html, &base, &HashSet::new());
    /// assert!(links.contains("https://www.zeiler.me/detlef/geschichte"));
    /// assert_eq!(links.len(), 1);
    /// ```
    pub fn discover(&self, document: &Html, page_url: &Url, visited: &HashSet<String>) -> HashSet<String> {
        let mut links = HashSet::new();

        for element in document.select(&self.anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Some(url) = resolve_link(href, page_url) else {
                continue;
            };

            if url.origin() != self.base.origin() {
                tracing::debug!("Skipping off-site link {}", url);
                continue;
            }

            if has_skipped_extension(&url) {
                tracing::debug!("Skipping asset link {}", url);
                continue;
            }

            let url = url.to_string();
            if visited.contains(&url) {
                continue;
            }

            links.insert(url);
        }

        links
    }
}

/// Resolves a link href to an absolute URL without fragment
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Empty and fragment-only hrefs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut url = page_url.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

fn has_skipped_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
