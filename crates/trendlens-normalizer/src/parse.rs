//! Caption text scanning for hashtags and mentions.

use std::sync::LazyLock;

use regex::Regex;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

// A mention must not be glued to a preceding word character, so e-mail
// addresses are not picked up. Dots are allowed inside but not at the end.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w])@(\w+(?:\.\w+)*)").expect("valid mention regex")
});

/// Extracts `#tag` tokens from a caption, lowercased with the `#` kept.
///
/// Order follows the caption and duplicates are preserved.
#[must_use]
pub(crate) fn extract_hashtags(caption: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(caption)
        .map(|c| format!("#{}", c[1].to_lowercase()))
        .collect()
}

/// Extracts `@handle` tokens from a caption, original case, `@` stripped.
#[must_use]
pub(crate) fn extract_mentions(caption: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(caption)
        .map(|c| c[1].to_string())
        .collect()
}
