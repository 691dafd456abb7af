//! Records produced by a crawl and persisted as JSON
//!
//! Field names match the JSON documents consumed by the integrator, so
//! older crawl output keeps loading after a rebuild.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One successfully extracted page
///
/// Missing fields fall back to their defaults when loading, which lets the
/// integrator accept hand-edited or partial crawl output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// Sequential id, starting at 1, in discovery order
    pub id: u32,

    /// Absolute URL of the page
    pub url: String,

    /// Path (and query) relative to the crawl base
    pub relative_url: String,

    pub title: String,

    /// Normalized plain text of the content region
    pub content: String,

    pub author: String,

    /// Second path segment of the page URL, empty if there is none
    pub category: String,

    pub images: Vec<ImageRef>,

    pub word_count: usize,

    /// Estimated minutes, never below 1
    pub reading_time: usize,

    /// RFC 3339 capture timestamp
    pub scraped_at: String,

    pub scraped_url: String,
}

/// An image downloaded while crawling a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    /// File name inside the assets directory
    pub src: String,

    pub alt: String,

    /// Absolute source URL the image was downloaded from
    pub original_url: String,
}

/// Aggregate summary written next to the record list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub total_articles: usize,

    /// Distinct non-empty categories, sorted
    pub categories: Vec<String>,

    /// Distinct non-empty authors, sorted
    pub authors: Vec<String>,

    pub total_words: usize,

    pub scraped_at: String,
}

impl CrawlSummary {
    /// Builds the summary for a list of records
    pub fn from_records(records: &[PageRecord], scraped_at: String) -> Self {
        let categories: BTreeSet<&str> = records
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        let authors: BTreeSet<&str> = records
            .iter()
            .map(|r| r.author.as_str())
            .filter(|a| !a.is_empty())
            .collect();

        Self {
            total_articles: records.len(),
            categories: categories.into_iter().map(String::from).collect(),
            authors: authors.into_iter().map(String::from).collect(),
            total_words: records.iter().map(|r| r.word_count).sum(),
            scraped_at,
        }
    }
}
