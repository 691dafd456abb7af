use serde::{Deserialize, Serialize};

/// Default region selectors, tried in order
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "main",
    ".content",
    ".post-content",
    ".article-content",
    "#content",
    "article",
];

/// Browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure
///
/// Every section and field has a default, so an empty file (or no file at
/// all) describes the stock migration of www.zeiler.me.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub integrator: IntegratorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Start page; also defines the origin links must share
    pub base_url: String,

    /// Stop after this many pages have been recorded
    pub max_pages: usize,

    /// Politeness pause between iterations (milliseconds)
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Pages with less normalized text (characters) are rejected
    pub min_content_length: usize,

    /// CSS selectors for the content region, first match wins
    pub content_selectors: Vec<String>,

    /// Author used when the URL names no known author
    pub site_name: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.zeiler.me".to_string(),
            max_pages: 50,
            delay_ms: 1000,
            timeout_secs: 10,
            min_content_length: 100,
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            site_name: "ZEILER.me".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Crawl output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// JSON list of page records; also the integrator's input
    pub data_path: String,

    /// JSON crawl summary
    pub summary_path: String,

    /// Directory downloaded images are written to
    pub assets_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_path: "scraped_data.json".to_string(),
            summary_path: "scrape_summary.json".to_string(),
            assets_dir: "src/assets".to_string(),
        }
    }
}

/// Content integrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IntegratorConfig {
    /// Generated JavaScript data module
    pub module_path: String,

    /// Excerpt cap in characters, ellipsis not included
    pub excerpt_length: usize,

    /// Cleaned content shorter than this (characters) is skipped
    pub min_content_length: usize,

    pub words_per_minute: usize,

    /// Public path the front end serves the assets directory under
    pub asset_url_prefix: String,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            module_path: "src/data/articles_comprehensive.js".to_string(),
            excerpt_length: 200,
            min_content_length: 100,
            words_per_minute: crate::text::DEFAULT_WORDS_PER_MINUTE,
            asset_url_prefix: "/src/assets".to_string(),
        }
    }
}
