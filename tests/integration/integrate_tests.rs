//! Integration tests for the content integrator

use crate::crawl_tests::{create_test_config, mount_site};
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;
use zeiler_migrate::crawler::run_crawl;
use zeiler_migrate::integrate::{run_integrate, InputSource};
use zeiler_migrate::output::save_records;
use zeiler_migrate::PageRecord;

fn article_record(
    id: u32,
    relative_url: &str,
    title: &str,
    content: &str,
    author: &str,
) -> PageRecord {
    PageRecord {
        id,
        url: format!("https://www.zeiler.me{}", relative_url),
        relative_url: relative_url.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        scraped_url: format!("https://www.zeiler.me{}", relative_url),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_crawl_then_integrate() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), dir.path(), 10);

    run_crawl(&config).await.unwrap();
    let outcome = run_integrate(&config).unwrap();

    assert_eq!(outcome.source, InputSource::CrawlOutput);
    assert_eq!(outcome.records_read, 3);
    assert_eq!(outcome.stats.total, 3);

    let tocqueville = outcome
        .index
        .find_by_url("/#/detlef/geschichte/tocqueville")
        .unwrap();
    assert_eq!(tocqueville.title, "Tocqueville über Grausamkeit");
    assert_eq!(tocqueville.category, "geschichte");

    let module = fs::read_to_string(&config.integrator.module_path).unwrap();
    assert!(module.contains("export const articles = ["));
    assert!(module.contains("\"display_url\": \"/#/detlef/geschichte/tocqueville\""));
    assert!(module.contains("export const articleStats = {"));
}

#[test]
fn test_missing_input_falls_back_to_samples() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("https://www.zeiler.me", dir.path(), 10);

    let outcome = run_integrate(&config).unwrap();

    assert_eq!(outcome.source, InputSource::Samples);
    assert_eq!(outcome.records_read, 10);
    assert_eq!(outcome.stats.total, 10);
    assert_eq!(
        outcome.stats.categories,
        vec!["geschichte", "medien", "deutsch", "techzap"]
    );
    assert_eq!(outcome.stats.authors, vec!["Detlef Zeiler", "Julian Zeiler"]);

    let found = outcome
        .index
        .find_by_url("/DETLEF/geschichte/tocqueville-grausamkeit/")
        .unwrap();
    assert_eq!(found.images[0].src, "/src/assets/tocqueville_portrait_531.jpg");

    let module = fs::read_to_string(&config.integrator.module_path).unwrap();
    assert!(module.contains("/#/detlef/geschichte/tocqueville-grausamkeit"));
}

#[test]
fn test_integrator_cleans_and_filters_records() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("https://www.zeiler.me", dir.path(), 10);
    let body = "Die Ballade erzählt von einem Vater, der mit seinem Kind durch die Nacht reitet. \
                Am Ende erreichen sie den Hof.";

    let records = vec![
        article_record(
            1,
            "/detlef/deutsch/erlkoenig",
            "ZEILER.me - Goethe: Der Erlkönig",
            &format!(
                "Skip to main content Menü Skip to navigation {}\n\n\n\nCopyright © 2010 - 2024 Detlef und Julian Zeiler Impressum",
                body
            ),
            "Detlef Zeiler",
        ),
        article_record(2, "/impressum", "Impressum", "Angaben gemäß § 5 TMG", ""),
        article_record(
            3,
            "/sonstiges/unterricht",
            "Literatur im Unterricht",
            &format!("{} {}", body, body),
            "",
        ),
    ];
    save_records(&records, std::path::Path::new(&config.output.data_path)).unwrap();

    let outcome = run_integrate(&config).unwrap();
    let articles = outcome.index.articles();

    assert_eq!(outcome.source, InputSource::CrawlOutput);
    assert_eq!(outcome.records_read, 3);
    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].title, "Goethe: Der Erlkönig");
    assert_eq!(articles[0].content, body);
    assert_eq!(articles[0].category, "deutsch");

    assert_eq!(articles[1].id, 3);
    assert_eq!(articles[1].category, "deutsch");
    assert_eq!(articles[1].author, "ZEILER.me");

    assert_eq!(outcome.index.search("zeiler.me").len(), 1);
}

#[test]
fn test_statistics_are_stable_across_runs() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config("https://www.zeiler.me", dir.path(), 10);

    let first = run_integrate(&config).unwrap();
    let second = run_integrate(&config).unwrap();

    assert_eq!(first.stats, second.stats);
    assert_eq!(first.index.articles(), second.index.articles());
}

#[test]
fn test_unwritable_module_path_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config("https://www.zeiler.me", dir.path(), 10);
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    config.integrator.module_path = blocker.join("articles.js").display().to_string();

    assert!(run_integrate(&config).is_err());
}
