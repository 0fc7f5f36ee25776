//! Caption tokenization shared by keyword grouping and content keys.

/// Common English filler words. Words of three characters or fewer are
/// already dropped by length, so only longer ones need listing.
pub(crate) const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "also", "been", "before", "being", "could", "does", "doing",
    "down", "each", "even", "every", "from", "have", "having", "here", "into", "just", "like",
    "made", "make", "many", "more", "most", "much", "only", "other", "over", "really", "same",
    "should", "some", "such", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "those", "very", "were", "what", "when", "where", "which", "while", "will", "with",
    "would", "your", "yours",
];

const MIN_TOKEN_CHARS: usize = 4;

/// Splits a caption into lowercased significant words, in caption order.
///
/// Hashtags and mentions are skipped, surrounding punctuation is trimmed, and
/// words shorter than four characters or in [`STOP_WORDS`] are dropped.
/// Repeated words are kept.
#[must_use]
pub(crate) fn significant_tokens(caption: &str) -> Vec<String> {
    caption
        .split_whitespace()
        .filter(|raw| !raw.starts_with('#') && !raw.starts_with('@'))
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Like [`significant_tokens`] but with repeats removed, first occurrence kept.
#[must_use]
pub(crate) fn unique_significant_tokens(caption: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    significant_tokens(caption)
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
