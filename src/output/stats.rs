//! Statistics printing for crawl output
//!
//! These functions write human-readable reports to stdout; they back the
//! final status of `crawl` and the `stats` subcommand.

use crate::crawler::CrawlReport;
use crate::record::{CrawlSummary, PageRecord};
use std::collections::BTreeMap;

/// Prints the counters of a finished crawl
pub fn print_crawl_report(report: &CrawlReport, summary: &CrawlSummary) {
    println!("\n{}", "=".repeat(50));
    println!("SCRAPING COMPLETED");
    println!("{}", "=".repeat(50));
    println!("Total articles scraped: {}", summary.total_articles);
    println!("Total images downloaded: {}", report.images_downloaded);
    println!("Pages fetched: {}", report.pages_fetched);
    println!("Pages skipped (insufficient content): {}", report.pages_skipped);
    println!("Fetch failures: {}", report.fetch_failures);
    if report.image_failures > 0 {
        println!("Image failures: {}", report.image_failures);
    }
    println!("URLs left in frontier: {}", report.frontier_remaining);
    println!("Total words: {}", summary.total_words);
}

/// Prints statistics for a persisted record list
pub fn print_statistics(records: &[PageRecord]) {
    let summary = CrawlSummary::from_records(records, String::new());

    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total articles: {}", summary.total_articles);
    println!("  Total words: {}", summary.total_words);
    println!(
        "  Images: {}",
        records.iter().map(|r| r.images.len()).sum::<usize>()
    );
    println!();

    println!("Articles by Category:");
    for (category, count) in count_by(records, |r| r.category.as_str()) {
        let label = if category.is_empty() { "(none)" } else { category };
        println!("  {}: {}", label, count);
    }
    println!();

    println!("Articles by Author:");
    for (author, count) in count_by(records, |r| r.author.as_str()) {
        println!("  {}: {}", author, count);
    }
}

/// Counts records per key, sorted by count (descending) then key
fn count_by<'a, F>(records: &'a [PageRecord], key: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a PageRecord) -> &'a str,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    counts
}
