//! JavaScript data module generation
//!
//! The module embeds the article list as a JSON literal, so every string is
//! escaped by `serde_json` rather than by hand.

use super::{ArticleStats, ProcessedArticle};

/// Lookup helpers shipped with every generated module
///
/// `getArticleByUrl` normalizes exactly like
/// [`normalize_lookup_url`](super::normalize_lookup_url).
const HELPERS: &str = r#"// Suchfunktion
export function searchArticles(query) {
  const trimmed = String(query ?? '').trim();
  if (trimmed.length < 2) return articles;

  const needle = trimmed.toLowerCase();
  return articles.filter(article =>
    [article.title, article.excerpt, article.content, article.author, article.category]
      .join(' ')
      .toLowerCase()
      .includes(needle)
  );
}

function normalizeUrl(value) {
  return String(value ?? '').trim().toLowerCase().replace(/^[\/#]+|[\/#]+$/g, '');
}

// Artikel nach URL finden
export function getArticleByUrl(url) {
  const wanted = normalizeUrl(url);
  if (!wanted) return null;

  const keys = article => [normalizeUrl(article.url), normalizeUrl(article.display_url)];
  return articles.find(article => keys(article).includes(wanted))
    || articles.find(article => keys(article).some(key => key.endsWith(wanted)))
    || null;
}

// Artikel nach Kategorie filtern
export function getArticlesByCategory(category) {
  return articles.filter(article => article.category === category);
}
"#;

/// Renders the data module source
///
/// `generated_at` only appears in the header comment; the same articles
/// always produce the same module body.
pub fn render_module(
    articles: &[ProcessedArticle],
    stats: &ArticleStats,
    generated_at: &str,
) -> serde_json::Result<String> {
    let mut module = String::new();

    module.push_str("// Automatisch generierte Artikeldaten von ZEILER.me\n");
    module.push_str(&format!("// Generated at: {}\n", generated_at));
    module.push_str(&format!("// Articles: {}\n\n", articles.len()));

    module.push_str("export const articles = ");
    module.push_str(&serde_json::to_string_pretty(articles)?);
    module.push_str(";\n\n");

    module.push_str(HELPERS);
    module.push('\n');

    module.push_str("// Statistiken\nexport const articleStats = ");
    module.push_str(&serde_json::to_string_pretty(stats)?);
    module.push_str(";\n");

    Ok(module)
}
