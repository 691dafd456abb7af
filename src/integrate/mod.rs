//! Content integrator
//!
//! Turns persisted crawl output into the front end's data module:
//! - Title and content cleanup
//! - Excerpts, categories and reading times
//! - Search and lookup over the processed list
//! - JavaScript module generation
//!
//! Missing or unusable crawl output is not an error; the built-in sample
//! articles take its place. Only writing the module can fail a run.

mod article;
mod category;
mod clean;
mod excerpt;
mod index;
mod module;
mod samples;

pub use article::{display_url, process_records, ArticleImage, ProcessedArticle};
pub use category::{categorize, DEFAULT_CATEGORY};
pub use clean::{clean_content, clean_title, UNKNOWN_TITLE};
pub use excerpt::{generate_excerpt, ELLIPSIS};
pub use index::{normalize_lookup_url, ArticleIndex, ArticleStats, MIN_QUERY_LENGTH};
pub use module::render_module;
pub use samples::sample_records;

use crate::config::Config;
use crate::output::{load_records, write_text};
use crate::record::PageRecord;
use crate::MigrateError;
use std::path::{Path, PathBuf};

/// Where the integrated records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    CrawlOutput,
    Samples,
}

/// Result of an integrator run
#[derive(Debug, Clone)]
pub struct IntegrationOutcome {
    pub source: InputSource,

    /// Records read before filtering
    pub records_read: usize,

    pub index: ArticleIndex,
    pub stats: ArticleStats,
    pub module_path: PathBuf,
}

/// Runs the integrator end to end
///
/// Reads `output.data-path`, processes every record and writes the data
/// module to `integrator.module-path`.
///
/// # Returns
///
/// * `Ok(IntegrationOutcome)` - Module was written
/// * `Err(MigrateError)` - The module could not be written
pub fn run_integrate(config: &Config) -> Result<IntegrationOutcome, MigrateError> {
    let data_path = Path::new(&config.output.data_path);
    let (records, source) = match load_crawl_output(data_path) {
        Some(records) => (records, InputSource::CrawlOutput),
        None => (sample_records()?, InputSource::Samples),
    };

    let articles = process_records(&records, &config.integrator, &config.crawler.site_name);
    tracing::info!(
        "Processed {} of {} records ({} skipped)",
        articles.len(),
        records.len(),
        records.len() - articles.len()
    );

    let index = ArticleIndex::new(articles);
    let stats = index.stats();
    let generated_at = chrono::Utc::now().to_rfc3339();
    let module = render_module(index.articles(), &stats, &generated_at)?;

    let module_path = PathBuf::from(&config.integrator.module_path);
    write_text(&module, &module_path)?;
    tracing::info!("Wrote data module to {}", module_path.display());

    Ok(IntegrationOutcome {
        source,
        records_read: records.len(),
        index,
        stats,
        module_path,
    })
}

/// Loads crawl output, or `None` when it is missing, unreadable or empty
fn load_crawl_output(path: &Path) -> Option<Vec<PageRecord>> {
    if !path.exists() {
        tracing::warn!(
            "No crawl output at {}, using built-in sample articles",
            path.display()
        );
        return None;
    }

    match load_records(path) {
        Ok(records) if records.is_empty() => {
            tracing::warn!(
                "Crawl output {} is empty, using built-in sample articles",
                path.display()
            );
            None
        }
        Ok(records) => {
            tracing::info!("Loaded {} records from {}", records.len(), path.display());
            Some(records)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load {}: {}, using built-in sample articles",
                path.display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_input_loads_nothing() {
        let dir = tempdir().unwrap();
        assert!(load_crawl_output(&dir.path().join("missing.json")).is_none());
    }

    #[test]
    fn test_unparsable_input_loads_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped_data.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_crawl_output(&path).is_none());
    }

    #[test]
    fn test_empty_input_loads_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped_data.json");
        fs::write(&path, "[]").unwrap();

        assert!(load_crawl_output(&path).is_none());
    }

    #[test]
    fn test_partial_records_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped_data.json");
        fs::write(&path, r#"[{"title": "Nur ein Titel"}]"#).unwrap();

        let records = load_crawl_output(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Nur ein Titel");
    }
}
