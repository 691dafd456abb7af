//! Crawler module for page fetching and extraction
//!
//! This module contains the crawl pipeline, including:
//! - HTTP fetching with a fixed timeout
//! - Content, title and image extraction
//! - Same-origin link discovery
//! - The sequential crawl loop
//!
//! Everything runs one request at a time; the only pauses are the request
//! timeout and the politeness delay between iterations.

mod coordinator;
mod extractor;
mod fetcher;
mod images;
mod links;

pub use coordinator::{
    author_for, category_segment, relative_path, Coordinator, CrawlPhase, CrawlReport, CrawlSession,
};
pub use extractor::{ExtractedContent, Extractor, ImageCandidate};
pub use fetcher::{build_http_client, Fetcher};
pub use images::{download_image, image_filename, ImageError};
pub use links::LinkDiscoverer;

use crate::config::Config;
use crate::output::{save_records, save_summary};
use crate::record::CrawlSummary;
use crate::MigrateError;
use std::path::Path;

/// Result of a complete crawl run
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub report: CrawlReport,
    pub summary: CrawlSummary,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and extractor
/// 2. Crawl from the base URL until the frontier is empty or the budget is spent
/// 3. Write the record list and the summary
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished and output was written
/// * `Err(MigrateError)` - Setup failed or an output file could not be written
///
/// # Example
///
/// ```no_run
/// use zeiler_migrate::config::Config;
/// use zeiler_migrate::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// println!("{} articles", outcome.summary.total_articles);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, MigrateError> {
    let mut coordinator = Coordinator::new(config)?;
    let report = coordinator.run().await;
    let records = coordinator.into_records();

    let summary = CrawlSummary::from_records(&records, chrono::Utc::now().to_rfc3339());

    save_records(&records, Path::new(&config.output.data_path))?;
    save_summary(&summary, Path::new(&config.output.summary_path))?;

    Ok(CrawlOutcome { report, summary })
}
