use crate::record::PageRecord;

const SAMPLE_RECORDS: &str = include_str!("samples.json");

/// Built-in articles used when no crawl output is available
///
/// They are stored as crawl records, so they pass through the same cleanup
/// and categorization as real data.
pub fn sample_records() -> serde_json::Result<Vec<PageRecord>> {
    serde_json::from_str(SAMPLE_RECORDS)
}
