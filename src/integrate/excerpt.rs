use crate::text::{char_len, collapse_whitespace};
use regex::Regex;
use std::sync::LazyLock;

/// Appended when an excerpt is cut inside a sentence
pub const ELLIPSIS: &str = "...";

static NON_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.!?]").expect("hardcoded regex pattern is valid"));

/// Derives a short teaser from article content
///
/// Punctuation other than `.`, `!` and `?` is replaced by spaces and all
/// whitespace collapses to single spaces. Text of at most `max_length`
/// characters is returned unchanged. Longer text is cut at the last sentence
/// end if that lies beyond 70% of the cap, otherwise at the last word
/// boundary (or hard at the cap) with [`ELLIPSIS`] appended.
///
/// The result never exceeds `max_length` characters plus the ellipsis.
pub fn generate_excerpt(content: &str, max_length: usize) -> String {
    let clean = collapse_whitespace(&NON_TEXT.replace_all(content, " "));
    if char_len(&clean) <= max_length {
        return clean;
    }

    let cut = clean
        .char_indices()
        .nth(max_length)
        .map(|(index, _)| index)
        .unwrap_or(clean.len());
    let truncated = &clean[..cut];

    if let Some(end) = truncated.rfind(|c: char| matches!(c, '.' | '!' | '?')) {
        if char_len(&truncated[..end]) * 10 > max_length * 7 {
            return truncated[..=end].to_string();
        }
    }

    match truncated.rfind(' ') {
        Some(space) if space > 0 => format!("{}{}", &truncated[..space], ELLIPSIS),
        _ => format!("{}{}", truncated, ELLIPSIS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_unchanged_apart_from_punctuation() {
        assert_eq!(
            generate_excerpt("Ein „kurzer“ Text,  mit\n\nAbsatz!", 200),
            "Ein kurzer Text mit Absatz!"
        );
    }

    #[test]
    fn test_cut_at_sentence_end_beyond_threshold() {
        // Sentence end at character 79, threshold is 70
        let content = format!("{}. {}", "a".repeat(79), "b ".repeat(40));
        let excerpt = generate_excerpt(&content, 100);

        assert_eq!(excerpt, format!("{}.", "a".repeat(79)));
    }

    #[test]
    fn test_early_sentence_end_falls_back_to_word_boundary() {
        let content = format!("Kurz. {}", "wort ".repeat(40));
        let excerpt = generate_excerpt(&content, 50);

        assert!(excerpt.ends_with(ELLIPSIS));
        assert!(!excerpt.ends_with(" ..."));
        assert!(excerpt.starts_with("Kurz. wort"));
        assert!(char_len(&excerpt) <= 50 + ELLIPSIS.len());
    }

    #[test]
    fn test_hard_truncation_without_spaces() {
        let content = "x".repeat(300);
        assert_eq!(generate_excerpt(&content, 20), format!("{}...", "x".repeat(20)));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let content = "ä".repeat(30);
        assert_eq!(generate_excerpt(&content, 30), content);
        assert_eq!(generate_excerpt(&content, 10), format!("{}...", "ä".repeat(10)));
    }

    #[test]
    fn test_length_bound_holds() {
        let inputs = [
            "Über die Demokratie in Amerika. Tocqueville reiste 1831 durch die USA!".repeat(5),
            "Wer reitet so spät durch Nacht und Wind? Es ist der Vater mit seinem Kind.".repeat(4),
            "ein-sehr-langes-wort ".repeat(30),
            "?".repeat(250),
        ];

        for input in &inputs {
            for cap in [10, 50, 200] {
                let excerpt = generate_excerpt(input, cap);
                assert!(
                    char_len(&excerpt) <= cap + ELLIPSIS.len(),
                    "excerpt too long for cap {}: {:?}",
                    cap,
                    excerpt
                );
            }
        }
    }
}
