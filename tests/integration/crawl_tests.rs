//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small copy of the site and test
//! the full crawl cycle end-to-end.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeiler_migrate::config::Config;
use zeiler_migrate::crawler::{run_crawl, Coordinator, CrawlPhase};
use zeiler_migrate::output::load_records;
use zeiler_migrate::CrawlSummary;

const FILLER: &str = "Dieser Absatz enthält genug Text, damit die Seite die Mindestlänge \
                      für einen Artikel deutlich überschreitet und gespeichert wird.";

/// Creates a test configuration pointing at the mock server, writing into `dir`
pub fn create_test_config(base_url: &str, dir: &Path, max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.max_pages = max_pages;
    config.crawler.delay_ms = 0;
    config.crawler.timeout_secs = 5;
    config.output.data_path = dir.join("scraped_data.json").display().to_string();
    config.output.summary_path = dir.join("scrape_summary.json").display().to_string();
    config.output.assets_dir = dir.join("assets").display().to_string();
    config.integrator.module_path = dir.join("data").join("articles.js").display().to_string();
    config
}

fn page(title: &str, main: &str) -> String {
    format!(
        "<html><head><title>{}</title></head>\
         <body><header>Kopfzeile</header><main>{}</main><footer>Fußzeile</footer></body></html>",
        title, main
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves a home page, three article pages, a short page and a broken link
pub async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        page(
            "ZEILER.me - Startseite",
            &format!(
                r#"<nav>Navigationstext <a href="/detlef/geschichte/tocqueville">Tocqueville</a></nav>
                <h1>Willkommen</h1><p>{filler}</p>
                <a href="/julian/techzap/linux#abschnitt">Linux</a>
                <a href="/detlef/kurz">Kurz</a>
                <a href="/fehlt">Fehlt</a>
                <a href="/unterlagen/skript.PDF">Skript</a>
                <a href="https://example.org/extern">Extern</a>
                <a href="mailto:info@zeiler.me">Mail</a>"#,
                filler = FILLER
            ),
        ),
    )
    .await;

    mount_page(
        server,
        "/detlef/geschichte/tocqueville",
        page(
            "ZEILER.me - Tocqueville über Grausamkeit",
            &format!(
                r#"<p>Alexis de Tocqueville über die plötzliche Grausamkeit.</p>
                <img src="/img/portrait.jpg" alt="Portrait">
                <p>{filler}</p><a href="/">Startseite</a>"#,
                filler = FILLER
            ),
        ),
    )
    .await;

    mount_page(
        server,
        "/julian/techzap/linux",
        page(
            "Linux Server Administration",
            &format!(
                r#"<p>Grundlagen der Linux Administration.</p>
                <img src="/img/portrait.jpg" alt="Doppelt">
                <img src="/img/kaputt.png" alt="Fehlt">
                <p>{filler}</p>"#,
                filler = FILLER
            ),
        ),
    )
    .await;

    mount_page(server, "/detlef/kurz", page("Kurz", "<p>Zu kurz.</p>")).await;

    Mock::given(method("GET"))
        .and(path("/img/portrait.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/unterlagen/skript.PDF"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;

    // Everything else, including /fehlt and /img/kaputt.png, gets a 404
}

#[tokio::test]
async fn test_full_crawl_of_mock_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 10);

    let mut coordinator = Coordinator::new(&config).unwrap();
    assert_eq!(coordinator.phase(), CrawlPhase::Idle);

    let report = coordinator.run().await;

    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert_eq!(report.pages_recorded, 3);
    assert_eq!(report.pages_fetched, 4);
    assert_eq!(report.pages_skipped, 1);
    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.images_downloaded, 1);
    assert_eq!(report.image_failures, 1);
    assert_eq!(report.frontier_remaining, 0);

    // Home, three linked pages and the broken link; no PDF, mail or off-site URL
    assert_eq!(coordinator.session().visited.len(), 5);
    assert!(coordinator
        .session()
        .visited
        .iter()
        .all(|url| url.starts_with(&server.uri()) && !url.contains('#')));

    let records = coordinator.records();
    let mut relative: Vec<&str> = records.iter().map(|r| r.relative_url.as_str()).collect();
    relative.sort();
    assert_eq!(
        relative,
        vec!["/", "/detlef/geschichte/tocqueville", "/julian/techzap/linux"]
    );

    let mut ids: Vec<u32> = records.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);

    for record in records {
        assert!(!record.content.contains("Navigationstext"));
        assert!(!record.content.contains("Kopfzeile"));
        assert!(!record.content.contains("Fußzeile"));
        assert!(record.content.chars().count() >= 100);
        assert!(record.word_count > 0);
        assert!(record.reading_time >= 1);
    }

    let tocqueville = records
        .iter()
        .find(|r| r.relative_url == "/detlef/geschichte/tocqueville")
        .unwrap();
    assert_eq!(tocqueville.title, "ZEILER.me - Tocqueville über Grausamkeit");
    assert_eq!(tocqueville.author, "Detlef Zeiler");
    assert_eq!(tocqueville.category, "geschichte");

    let linux = records
        .iter()
        .find(|r| r.relative_url == "/julian/techzap/linux")
        .unwrap();
    assert_eq!(linux.author, "Julian Zeiler");
    assert_eq!(linux.category, "techzap");

    let home = records.iter().find(|r| r.relative_url == "/").unwrap();
    assert_eq!(home.author, "ZEILER.me");
    assert_eq!(home.category, "");

    // The portrait appears on two pages but is downloaded and recorded once
    let requests = server.received_requests().await.unwrap();
    let portrait_fetches = requests
        .iter()
        .filter(|request| request.url.path() == "/img/portrait.jpg")
        .count();
    assert_eq!(portrait_fetches, 1);

    let images: Vec<_> = records.iter().flat_map(|r| &r.images).collect();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].src, "portrait.jpg");
    assert_eq!(images[0].original_url, format!("{}/img/portrait.jpg", server.uri()));
    assert_eq!(
        fs::read(dir.path().join("assets").join("portrait.jpg")).unwrap(),
        vec![0xFF, 0xD8, 0xFF, 0xE0]
    );
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 1);

    let mut coordinator = Coordinator::new(&config).unwrap();
    let report = coordinator.run().await;

    // Only the home page is fetched; its links stay queued
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(report.pages_recorded, 1);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(coordinator.records()[0].relative_url, "/");
    assert_eq!(coordinator.session().visited.len(), 1);
    assert_eq!(report.frontier_remaining, 4);
}

/// Crawls a one-page site whose content region holds `length` characters
async fn crawl_single_page(length: usize) -> (usize, usize) {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Grenzfall", &format!("<p>{}</p>", "ä".repeat(length)))).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 10);

    let mut coordinator = Coordinator::new(&config).unwrap();
    let report = coordinator.run().await;
    (report.pages_skipped, coordinator.records().len())
}

#[tokio::test]
async fn test_min_content_length_counts_characters() {
    // Two bytes per character, so a byte count would keep both pages
    assert_eq!(crawl_single_page(99).await, (1, 0));
    assert_eq!(crawl_single_page(100).await, (0, 1));
}

#[tokio::test]
async fn test_run_crawl_writes_output() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 10);

    let outcome = run_crawl(&config).await.unwrap();

    assert_eq!(outcome.summary.total_articles, 3);
    assert_eq!(outcome.report.pages_recorded, 3);

    let records = load_records(Path::new(&config.output.data_path)).unwrap();
    assert_eq!(records.len(), 3);

    let summary: CrawlSummary =
        serde_json::from_str(&fs::read_to_string(&config.output.summary_path).unwrap()).unwrap();
    assert_eq!(summary.total_articles, 3);
    assert_eq!(summary.categories, vec!["geschichte", "techzap"]);
    assert_eq!(
        summary.authors,
        vec!["Detlef Zeiler", "Julian Zeiler", "ZEILER.me"]
    );
    assert_eq!(
        summary.total_words,
        records.iter().map(|r| r.word_count).sum::<usize>()
    );
    assert!(!summary.scraped_at.is_empty());
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_output() {
    let dir = TempDir::new().unwrap();
    // Nothing listens on port 1
    let config = create_test_config("http://127.0.0.1:1", dir.path(), 10);

    let outcome = run_crawl(&config).await.unwrap();

    assert_eq!(outcome.report.fetch_failures, 1);
    assert_eq!(outcome.summary.total_articles, 0);
    assert_eq!(
        fs::read_to_string(&config.output.data_path).unwrap(),
        "[]\n"
    );
}
