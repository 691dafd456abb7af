//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the page record list and the crawl summary as JSON
//! - Loading a persisted record list back
//! - Printing crawl statistics
//!
//! Writes overwrite existing files and create missing parent directories.
//! A failed write is the one error the command-line tools treat as fatal.

mod json;
pub mod stats;

pub use json::{load_records, save_records, save_summary, write_text};
pub use stats::{print_crawl_report, print_statistics};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
