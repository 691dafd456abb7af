//! Title and content cleanup for crawled records

use regex::Regex;
use std::sync::LazyLock;

/// Title used when nothing is left after cleaning
pub const UNKNOWN_TITLE: &str = "Unbekannter Titel";

/// Site-wide title prefixes, checked in order; the first match is removed
const TITLE_PREFIXES: &[&str] = &["ZEILER.me - ", "IT & Medien, Geschichte, Deutsch - "];

/// Google Sites chrome that ends up in the extracted text
///
/// Applied in order to the whole text, case-insensitively, with `.`
/// matching newlines. `^` and `$` anchor at the start and end of the text.
static BOILERPLATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)^Search this site.*?Skip to navigation\s*",
        r"(?is)^Skip to main content.*?Skip to navigation\s*",
        r"(?is)Startseite\s+Detlef Zeiler\s+Deutsch.*?Selfmade\s*",
        r"(?is)Copyright © \d{4} - \d{4} Detlef und Julian Zeiler.*?$",
        r"(?is)Google Sites\s+Report abuse.*?$",
        r"(?is)Made with Google Sites\s*$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("hardcoded regex pattern is valid"))
    .collect()
});

static LINE_EDGE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]+|[^\S\n]+$").expect("hardcoded regex pattern is valid"));

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("hardcoded regex pattern is valid"));

/// Removes a redundant site prefix from a title
///
/// # Examples
///
/// ```
/// use zeiler_migrate::integrate::clean_title;
///
/// assert_eq!(clean_title("ZEILER.me - Goethe: Der Erlkönig"), "Goethe: Der Erlkönig");
/// assert_eq!(clean_title("   "), "Unbekannter Titel");
/// ```
pub fn clean_title(title: &str) -> String {
    let title = title.trim_start();
    let stripped = TITLE_PREFIXES
        .iter()
        .find_map(|prefix| title.strip_prefix(prefix))
        .unwrap_or(title)
        .trim();

    if stripped.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        stripped.to_string()
    }
}

/// Strips site boilerplate and tidies whitespace
///
/// Paragraph breaks survive: each line is trimmed, and three or more
/// consecutive newlines become one blank line.
pub fn clean_content(content: &str) -> String {
    let mut cleaned = content.to_string();
    for pattern in BOILERPLATE_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    let cleaned = LINE_EDGE_WHITESPACE.replace_all(&cleaned, "");
    let cleaned = EXCESS_BLANK_LINES.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}
