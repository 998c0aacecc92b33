//! Text normalization ahead of sentiment scoring.
//!
//! Ordered passes, each feeding the next: URLs, @-mentions, #-tags,
//! punctuation, digit runs, then lowercase + trim. Matched spans are
//! replaced with the empty string, never a separator, so adjacent words
//! keep their original boundaries.

use std::sync::LazyLock;

use regex::Regex;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").unwrap());
static RE_MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static RE_HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());
static RE_SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Normalize free text for scoring. Pure and total: any input string maps
/// to a cleaned, lowercased, trimmed output. Idempotent.
pub fn normalize(text: &str) -> String {
    let text = RE_URL.replace_all(text, "");
    let text = RE_MENTION.replace_all(&text, "");
    let text = RE_HASHTAG.replace_all(&text, "");
    let text = RE_SPECIAL.replace_all(&text, "");
    let text = RE_DIGITS.replace_all(&text, "");
    text.to_lowercase().trim().to_string()
}
