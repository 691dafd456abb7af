/// Category used when neither the URL nor any keyword decides
pub const DEFAULT_CATEGORY: &str = "andere";

/// Sections under `/detlef/`, checked in order
const DETLEF_SECTIONS: &[&str] = &["geschichte", "medien", "deutsch", "projekte"];

/// Keywords per category, checked in order against lower-cased text
const KEYWORD_RULES: &[(&str, &[&str])] = &[
    (
        "geschichte",
        &["geschichte", "mittelalter", "revolution", "reformation"],
    ),
    ("medien", &["medien", "fake news", "journalismus"]),
    (
        "deutsch",
        &["literatur", "gedicht", "ballade", "erörterung", "interpretation"],
    ),
    (
        "techzap",
        &["programmierung", "linux", "javascript", "react", "css"],
    ),
    ("projekte", &["projekt"]),
];

/// Assigns a category to a cleaned article
///
/// URL segments decide first. Without a recognized author segment the
/// title is searched for keywords, then the content.
pub fn categorize(url: &str, title: &str, content: &str) -> String {
    category_from_url(url)
        .or_else(|| category_from_keywords(title))
        .or_else(|| category_from_keywords(content))
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

fn category_from_url(url: &str) -> Option<&'static str> {
    let has_segment = |segment: &str| url.contains(&format!("/{}/", segment));

    if has_segment("detlef") {
        let section = DETLEF_SECTIONS
            .iter()
            .copied()
            .find(|section| has_segment(section));
        return Some(section.unwrap_or("detlef"));
    }

    if has_segment("julian") {
        return Some(if has_segment("techzap") {
            "techzap"
        } else {
            "julian"
        });
    }

    None
}

fn category_from_keywords(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(category, _)| *category)
}
