use crate::output::{OutputError, OutputResult};
use crate::record::{CrawlSummary, PageRecord};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Writes the record list as pretty-printed UTF-8 JSON
///
/// # Arguments
///
/// * `records` - Records in discovery order
/// * `path` - Destination file, overwritten if present
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Serialization or the write failed
pub fn save_records(records: &[PageRecord], path: &Path) -> OutputResult<()> {
    write_json(records, path)?;
    tracing::info!("Saved {} articles to {}", records.len(), path.display());
    Ok(())
}

/// Writes the crawl summary as pretty-printed UTF-8 JSON
pub fn save_summary(summary: &CrawlSummary, path: &Path) -> OutputResult<()> {
    write_json(summary, path)?;
    tracing::info!("Saved summary to {}", path.display());
    Ok(())
}

/// Loads a persisted record list
pub fn load_records(path: &Path) -> crate::Result<Vec<PageRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes text to a file, creating parent directories first
pub fn write_text(content: &str, path: &Path) -> OutputResult<()> {
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> OutputResult<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_text(&json, path)
}
