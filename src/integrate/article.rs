use super::{categorize, clean_content, clean_title, generate_excerpt};
use crate::config::IntegratorConfig;
use crate::record::{ImageRef, PageRecord};
use crate::text::{char_len, reading_time, word_count};
use serde::{Deserialize, Serialize};

/// An article as the front end consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub content: String,

    /// Relative URL of the original page
    pub url: String,

    /// Hash-routed path, e.g. `/#/detlef/geschichte/tocqueville-grausamkeit`
    pub display_url: String,

    pub images: Vec<ArticleImage>,
    pub author: String,
    pub category: String,
    pub scraped_url: String,
    pub word_count: usize,
    pub reading_time: usize,
}

/// Image reference with its public path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleImage {
    pub src: String,
    pub alt: String,
}

/// Turns crawl records into front-end articles
///
/// Records whose cleaned content is shorter than the configured minimum
/// are dropped. `default_author` fills in records without an author.
pub fn process_records(
    records: &[PageRecord],
    config: &IntegratorConfig,
    default_author: &str,
) -> Vec<ProcessedArticle> {
    let mut articles = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let title = clean_title(&record.title);
        let content = clean_content(&record.content);

        let length = char_len(&content);
        if length < config.min_content_length {
            tracing::debug!(
                "Skipping \"{}\": {} characters after cleaning",
                title,
                length
            );
            continue;
        }

        let id = if record.id > 0 {
            record.id
        } else {
            index as u32 + 1
        };
        let url = first_non_empty(&record.relative_url, &record.url).to_string();
        let words = word_count(&content);

        articles.push(ProcessedArticle {
            id,
            excerpt: generate_excerpt(&content, config.excerpt_length),
            display_url: display_url(&url, id),
            images: record
                .images
                .iter()
                .map(|image| article_image(image, &title, &config.asset_url_prefix))
                .collect(),
            author: first_non_empty(&record.author, default_author).to_string(),
            category: categorize(&url, &title, &content),
            scraped_url: first_non_empty(&record.scraped_url, &record.url).to_string(),
            word_count: words,
            reading_time: reading_time(words, config.words_per_minute),
            title,
            content,
            url,
        });
    }

    articles
}

/// Hash-routed path for an article URL
///
/// ```
/// use zeiler_migrate::integrate::display_url;
///
/// assert_eq!(display_url("/detlef/medien/fake-news/", 3), "/#/detlef/medien/fake-news");
/// assert_eq!(display_url("", 3), "/#/artikel-3");
/// assert_eq!(display_url("/", 1), "/#/artikel-1");
/// ```
pub fn display_url(url: &str, id: u32) -> String {
    let path = url.trim_matches('/');
    if path.is_empty() {
        format!("/#/artikel-{}", id)
    } else {
        format!("/#/{}", path)
    }
}

fn article_image(image: &ImageRef, title: &str, prefix: &str) -> ArticleImage {
    let alt = if image.alt.trim().is_empty() {
        format!("Bild zu {}", title)
    } else {
        image.alt.clone()
    };

    ArticleImage {
        src: format!("{}/{}", prefix.trim_end_matches('/'), image.src),
        alt,
    }
}

fn first_non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
