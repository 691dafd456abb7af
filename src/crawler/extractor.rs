//! Content extraction from parsed HTML
//!
//! This module turns a parsed page into:
//! - The page title (from the `<title>` tag)
//! - The plain text of the content region
//! - The images referenced on the page
//!
//! The content region is the first element matching one of the configured
//! selectors, or the document body when none matches. Navigation, header
//! and footer elements inside the region are skipped, for text and images
//! alike. Images outside the region are kept.

use crate::text::{collapse_whitespace, normalize_whitespace};
use crate::ConfigError;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Elements inside the region whose subtree contributes no text or images
const EXCLUDED_TAGS: &[&str] = &["nav", "header", "footer", "script", "style", "noscript"];

/// Classes marking navigation blocks
const EXCLUDED_CLASSES: &[&str] = &["nav", "navigation"];

/// Elements that start a new paragraph in the extracted text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// An image found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Absolute image URL
    pub url: String,

    /// Alt text, empty when the attribute is missing
    pub alt: String,
}

/// Text and media extracted from one page
#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    /// Whitespace-normalized `<title>`, empty when absent
    pub title: String,

    /// Normalized plain text of the content region
    pub text: String,

    /// Images in document order
    pub images: Vec<ImageCandidate>,
}

/// Extracts content using an ordered list of region selectors
#[derive(Debug)]
pub struct Extractor {
    selectors: Vec<Selector>,
    body: Selector,
    title: Selector,
    images: Selector,
}

impl Extractor {
    /// Creates an extractor; selectors are tried in the given order
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ConfigError> {
        let selectors = selectors
            .iter()
            .map(|s| parse_selector(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            selectors,
            body: parse_selector("body")?,
            title: parse_selector("title")?,
            images: parse_selector("img[src]")?,
        })
    }

    /// Extracts title, text and images from a parsed document
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use url::Url;
    /// use zeiler_migrate::config::DEFAULT_CONTENT_SELECTORS;
    /// use zeiler_migrate::crawler::Extractor;
    ///
    /// let html = r#"<html><head><title>Test</title></head>
    ///     <body><nav>Menü</nav><main><p>Inhalt</p></main></body></html>"#;
    /// let document = Html::parse_document(html);
    /// let page_url = Url::parse("https://www.zeiler.me/detlef/x").unwrap();
    ///
    /// let extractor = Extractor::new(DEFAULT_CONTENT_SELECTORS).unwrap();
    /// let content = extractor.extract(&document, &page_url);
    /// assert_eq!(content.title, "Test");
    /// assert_eq!(content.text, "Inhalt");
    /// ```
    pub fn extract(&self, document: &Html, page_url: &Url) -> ExtractedContent {
        let title = self.extract_title(document);

        let region = self
            .selectors
            .iter()
            .find_map(|selector| document.select(selector).next())
            .or_else(|| document.select(&self.body).next())
            .unwrap_or_else(|| document.root_element());

        let mut raw_text = String::new();
        collect_text(region, &mut raw_text);

        let images = document
            .select(&self.images)
            .filter(|image| !removed_from_region(image, &region))
            .filter_map(|image| image_candidate(&image, page_url))
            .collect();

        ExtractedContent {
            title,
            text: normalize_whitespace(&raw_text),
            images,
        }
    }

    fn extract_title(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .unwrap_or_default()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Returns true if the element and its subtree should be ignored
fn is_excluded(element: &ElementRef) -> bool {
    let value = element.value();
    EXCLUDED_TAGS.contains(&value.name())
        || value.classes().any(|class| EXCLUDED_CLASSES.contains(&class))
}

/// Walks the region, appending the text of kept elements
fn collect_text(element: ElementRef, text: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_excluded(&child_element) {
                    continue;
                }

                let name = child_element.value().name();
                let is_block = BLOCK_TAGS.contains(&name);
                if is_block {
                    text.push_str("\n\n");
                }
                collect_text(child_element, text);
                if is_block {
                    text.push_str("\n\n");
                }
            }
            _ => {}
        }
    }
}

/// Returns true if the image sits in an excluded subtree of the region
fn removed_from_region(image: &ElementRef, region: &ElementRef) -> bool {
    let mut excluded = false;
    for ancestor in image.ancestors() {
        if ancestor.id() == region.id() {
            return excluded;
        }
        if let Some(element) = ElementRef::wrap(ancestor) {
            excluded |= is_excluded(&element);
        }
    }
    false
}

fn image_candidate(element: &ElementRef, page_url: &Url) -> Option<ImageCandidate> {
    let src = element.value().attr("src")?.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let url = page_url.join(src).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    Some(ImageCandidate {
        url: url.to_string(),
        alt: element.value().attr("alt").unwrap_or_default().trim().to_string(),
    })
}
