//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error: every value has a default matching the
//! stock migration of www.zeiler.me.
//!
//! # Example
//!
//! ```no_run
//! use zeiler_migrate::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("migrate.toml")).unwrap();
//! println!("Crawler will record at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, IntegratorConfig, OutputConfig, UserAgentConfig,
    DEFAULT_CONTENT_SELECTORS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
