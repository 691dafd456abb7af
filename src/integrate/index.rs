use super::ProcessedArticle;
use serde::{Deserialize, Serialize};

/// Queries shorter than this (after trimming) match every article
pub const MIN_QUERY_LENGTH: usize = 2;

/// Aggregate figures over a processed article list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total: usize,

    /// Distinct categories in first-seen order
    pub categories: Vec<String>,

    /// Distinct authors in first-seen order
    pub authors: Vec<String>,

    pub total_words: usize,

    /// Mean reading time rounded to the nearest minute, 0 for no articles
    pub average_reading_time: usize,
}

/// Search and lookup over processed articles
///
/// The generated data module exposes the same operations to the front end.
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    articles: Vec<ProcessedArticle>,
}

impl ArticleIndex {
    pub fn new(articles: Vec<ProcessedArticle>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[ProcessedArticle] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Case-insensitive substring search
    ///
    /// Title, excerpt, content, author and category are searched as one
    /// space-joined text.
    pub fn search(&self, query: &str) -> Vec<&ProcessedArticle> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return self.articles.iter().collect();
        }

        let query = query.to_lowercase();
        self.articles
            .iter()
            .filter(|article| {
                [
                    article.title.as_str(),
                    article.excerpt.as_str(),
                    article.content.as_str(),
                    article.author.as_str(),
                    article.category.as_str(),
                ]
                .join(" ")
                .to_lowercase()
                .contains(&query)
            })
            .collect()
    }

    /// Finds an article by its stored or display URL
    ///
    /// Both sides are normalized with [`normalize_lookup_url`]. An exact
    /// match wins over a suffix match.
    pub fn find_by_url(&self, url: &str) -> Option<&ProcessedArticle> {
        let wanted = normalize_lookup_url(url);
        if wanted.is_empty() {
            return None;
        }

        let keys = |article: &ProcessedArticle| {
            [
                normalize_lookup_url(&article.url),
                normalize_lookup_url(&article.display_url),
            ]
        };

        self.articles
            .iter()
            .find(|article| keys(article).iter().any(|key| *key == wanted))
            .or_else(|| {
                self.articles
                    .iter()
                    .find(|article| keys(article).iter().any(|key| key.ends_with(&wanted)))
            })
    }

    pub fn by_category(&self, category: &str) -> Vec<&ProcessedArticle> {
        self.articles
            .iter()
            .filter(|article| article.category == category)
            .collect()
    }

    pub fn stats(&self) -> ArticleStats {
        let mut categories: Vec<String> = Vec::new();
        let mut authors: Vec<String> = Vec::new();
        for article in &self.articles {
            if !categories.contains(&article.category) {
                categories.push(article.category.clone());
            }
            if !authors.contains(&article.author) {
                authors.push(article.author.clone());
            }
        }

        let total = self.articles.len();
        let reading_minutes: usize = self.articles.iter().map(|a| a.reading_time).sum();
        let average_reading_time = if total == 0 {
            0
        } else {
            (2 * reading_minutes + total) / (2 * total)
        };

        ArticleStats {
            total,
            categories,
            authors,
            total_words: self.articles.iter().map(|a| a.word_count).sum(),
            average_reading_time,
        }
    }
}

/// Lower-cases a URL and strips surrounding whitespace, slashes and `#`
///
/// ```
/// use zeiler_migrate::integrate::normalize_lookup_url;
///
/// assert_eq!(normalize_lookup_url(" /#/Detlef/Medien/ "), "detlef/medien");
/// ```
pub fn normalize_lookup_url(url: &str) -> String {
    url.trim()
        .to_lowercase()
        .trim_matches(|c: char| c == '/' || c == '#')
        .to_string()
}
