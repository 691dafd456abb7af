//! Plain-text helpers shared by the crawler and the integrator

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Reading speed assumed for reading-time estimates
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*\n\s*").expect("hardcoded regex pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded regex pattern is valid"));

/// Normalizes whitespace in extracted text
///
/// Runs of blank lines become exactly one blank line; any other run of
/// whitespace becomes a single space. Leading and trailing whitespace is
/// removed.
///
/// # Examples
///
/// ```
/// use zeiler_migrate::text::normalize_whitespace;
///
/// let text = "  Erste   Zeile\n  weiter\n\n\n\nZweiter  Absatz ";
/// assert_eq!(normalize_whitespace(text), "Erste Zeile weiter\n\nZweiter Absatz");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    PARAGRAPH_BREAK
        .split(text)
        .map(|paragraph| WHITESPACE_RUN.replace_all(paragraph, " ").trim().to_string())
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collapses every whitespace run, newlines included, into one space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Length in characters, which is what every length threshold measures
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Counts whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in minutes, at least 1
///
/// Rounds to the nearest minute; exact halves go to the even neighbour, so
/// 500 words at 200 per minute take 2 minutes and 700 words take 4.
pub fn reading_time(word_count: usize, words_per_minute: usize) -> usize {
    let wpm = words_per_minute.max(1);
    let (minutes, rest) = (word_count / wpm, word_count % wpm);

    let rounded = match (2 * rest).cmp(&wpm) {
        Ordering::Less => minutes,
        Ordering::Greater => minutes + 1,
        Ordering::Equal => minutes + minutes % 2,
    };
    rounded.max(1)
}
