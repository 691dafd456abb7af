//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Managing the frontier and visited set
//! - Fetching pages one at a time with a politeness delay
//! - Extracting content and images, discovering links
//! - Building page records
//!
//! Frontier pop order is hash-set iteration order. Which pages end up in the
//! output when the page budget runs out is therefore not defined.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::extractor::{ExtractedContent, Extractor, ImageCandidate};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::images::download_image;
use crate::crawler::links::LinkDiscoverer;
use crate::record::{ImageRef, PageRecord};
use crate::text::{char_len, reading_time, word_count, DEFAULT_WORDS_PER_MINUTE};
use crate::MigrateError;
use scraper::Html;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Author names keyed by the URL segment that identifies them
const AUTHOR_SEGMENTS: &[(&str, &str)] = &[
    ("/detlef/", "Detlef Zeiler"),
    ("/julian/", "Julian Zeiler"),
];

/// Lifecycle of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Created, not started
    Idle,
    /// Working through the frontier
    Running,
    /// Frontier empty or page budget exhausted
    Done,
}

/// Mutable state of one crawl
#[derive(Debug, Default)]
pub struct CrawlSession {
    /// URLs discovered but not visited yet
    pub frontier: HashSet<String>,

    /// URLs that were popped and attempted
    pub visited: HashSet<String>,

    /// Image source URLs already attempted, across all pages
    pub seen_images: HashSet<String>,

    /// Recorded pages in discovery order
    pub records: Vec<PageRecord>,
}

impl CrawlSession {
    /// Creates a session whose frontier holds only the seed URL
    pub fn seeded(seed: &Url) -> Self {
        let mut session = Self::default();
        session.frontier.insert(seed.to_string());
        session
    }

    /// Removes and returns an arbitrary frontier URL
    pub fn pop(&mut self) -> Option<String> {
        let url = self.frontier.iter().next().cloned()?;
        self.frontier.remove(&url);
        Some(url)
    }

    /// Adds unvisited URLs to the frontier, returning how many were new
    pub fn enqueue(&mut self, urls: HashSet<String>) -> usize {
        let mut added = 0;
        for url in urls {
            if !self.visited.contains(&url) && self.frontier.insert(url) {
                added += 1;
            }
        }
        added
    }
}

/// Counters reported at the end of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Pages turned into records
    pub pages_recorded: usize,

    /// Pages rejected for insufficient content
    pub pages_skipped: usize,

    /// URLs dropped because the fetch failed
    pub fetch_failures: usize,

    pub images_downloaded: usize,

    pub image_failures: usize,

    /// URLs still queued when the crawl stopped
    pub frontier_remaining: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    assets_dir: PathBuf,
    base: Url,
    fetcher: Fetcher,
    extractor: Extractor,
    links: LinkDiscoverer,
    session: CrawlSession,
    phase: CrawlPhase,
    report: CrawlReport,
}

impl Coordinator {
    /// Creates a new coordinator seeded with the configured base URL
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(MigrateError)` - Invalid base URL or selectors, or the HTTP client failed to build
    pub fn new(config: &Config) -> Result<Self, MigrateError> {
        let base = Url::parse(&config.crawler.base_url)?;
        let fetcher = Fetcher::new(&config.crawler, &config.user_agent)?;
        let extractor = Extractor::new(config.crawler.content_selectors.as_slice())?;

        Ok(Self {
            config: config.crawler.clone(),
            assets_dir: PathBuf::from(&config.output.assets_dir),
            links: LinkDiscoverer::new(base.clone()),
            session: CrawlSession::seeded(&base),
            base,
            fetcher,
            extractor,
            phase: CrawlPhase::Idle,
            report: CrawlReport::default(),
        })
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.session.records
    }

    /// Consumes the coordinator, returning the recorded pages
    pub fn into_records(self) -> Vec<PageRecord> {
        self.session.records
    }

    /// Runs the crawl loop until the frontier is empty or the budget is spent
    ///
    /// Errors for individual URLs are logged and the URL is dropped; the
    /// loop itself never fails.
    pub async fn run(&mut self) -> CrawlReport {
        tracing::info!("Starting to scrape {}", self.base);
        self.phase = CrawlPhase::Running;

        while self.has_budget() {
            let Some(url) = self.session.pop() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            if !self.session.visited.insert(url.clone()) {
                tracing::debug!("Already visited {}", url);
                continue;
            }

            if let Err(e) = self.process_url(&url).await {
                tracing::warn!("Error scraping {}: {}", url, e);
                self.report.fetch_failures += 1;
            }

            if self.has_budget() && !self.session.frontier.is_empty() && self.config.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
            }
        }

        self.phase = CrawlPhase::Done;
        self.report.pages_recorded = self.session.records.len();
        self.report.frontier_remaining = self.session.frontier.len();

        tracing::info!(
            "Scraping completed. Found {} articles ({} still queued)",
            self.report.pages_recorded,
            self.report.frontier_remaining
        );

        self.report.clone()
    }

    fn has_budget(&self) -> bool {
        self.session.records.len() < self.config.max_pages
    }

    /// Processes a single URL
    ///
    /// This method:
    /// 1. Fetches the page
    /// 2. Extracts content and discovers links from the same response
    /// 3. Queues new links
    /// 4. Rejects pages with too little text
    /// 5. Downloads new images and appends the page record
    async fn process_url(&mut self, url: &str) -> Result<(), MigrateError> {
        tracing::info!("Scraping: {}", url);

        let page_url = Url::parse(url)?;
        let body = self.fetcher.fetch_text(url).await?;
        self.report.pages_fetched += 1;

        let (content, links) = self.parse_page(&body, &page_url);

        let added = self.session.enqueue(links);
        tracing::debug!("Queued {} new links from {}", added, url);

        if char_len(&content.text) < self.config.min_content_length {
            tracing::info!("Skipping {} - insufficient content", url);
            self.report.pages_skipped += 1;
            return Ok(());
        }

        let images = self.download_images(&content.images).await;
        let record = self.build_record(&page_url, content, images);

        tracing::info!(
            "Scraped {}/{}: {}",
            record.id,
            self.config.max_pages,
            record.title.chars().take(50).collect::<String>()
        );
        self.session.records.push(record);

        Ok(())
    }

    /// Parses the body once for both extraction and link discovery
    fn parse_page(&self, body: &str, page_url: &Url) -> (ExtractedContent, HashSet<String>) {
        let document = Html::parse_document(body);
        let content = self.extractor.extract(&document, page_url);
        let links = self.links.discover(&document, page_url, &self.session.visited);
        (content, links)
    }

    /// Downloads images not seen before in this crawl
    ///
    /// Every source URL is attempted at most once; failures are logged and
    /// the image is left out.
    async fn download_images(&mut self, candidates: &[ImageCandidate]) -> Vec<ImageRef> {
        let mut images = Vec::new();

        for image in candidates {
            if !self.session.seen_images.insert(image.url.clone()) {
                continue;
            }

            match download_image(&self.fetcher, image, &self.assets_dir).await {
                Ok(image_ref) => {
                    self.report.images_downloaded += 1;
                    images.push(image_ref);
                }
                Err(e) => {
                    tracing::warn!("Failed to download image {}: {}", image.url, e);
                    self.report.image_failures += 1;
                }
            }
        }

        images
    }

    fn build_record(&self, page_url: &Url, content: ExtractedContent, images: Vec<ImageRef>) -> PageRecord {
        let url = page_url.to_string();
        let words = word_count(&content.text);

        PageRecord {
            id: self.session.records.len() as u32 + 1,
            relative_url: relative_path(page_url),
            title: content.title,
            author: author_for(&url, &self.config.site_name),
            category: category_segment(page_url),
            images,
            word_count: words,
            reading_time: reading_time(words, DEFAULT_WORDS_PER_MINUTE),
            scraped_at: chrono::Utc::now().to_rfc3339(),
            scraped_url: url.clone(),
            content: content.text,
            url,
        }
    }
}

/// Path and query of a URL, as the front end routes it
pub fn relative_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Author derived from a URL segment, or the site name
pub fn author_for(url: &str, site_name: &str) -> String {
    AUTHOR_SEGMENTS
        .iter()
        .find(|(segment, _)| url.contains(segment))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| site_name.to_string())
}

/// Second path segment (`/detlef/geschichte/x` -> `geschichte`), or empty
pub fn category_segment(url: &Url) -> String {
    url.path()
        .trim_matches('/')
        .split('/')
        .nth(1)
        .unwrap_or_default()
        .to_string()
}
