//! Text normalization applied before vectorization.
//!
//! Steps, in order:
//! 1. drop URL tokens (`http` followed by non-whitespace)
//! 2. drop every character that is neither alphanumeric nor whitespace
//! 3. lowercase
//! 4. collapse whitespace runs to a single space and trim
//!
//! The vectorizer was fitted on text cleaned exactly this way, so any change
//! here changes model inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// A URL ends at whitespace, information separators included
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[^\s\x1C-\x1F]+").expect("URL pattern is a valid regex")
});

/// Normalize raw email text. Pure and idempotent; any input is accepted.
pub fn normalize(text: &str) -> String {
    let once = normalize_pass(text);

    // Dropping punctuation or case can splice a URL back together
    // ("h.ttp://x", "HTTP://x"). One more pass removes it for good.
    if URL_PATTERN.is_match(&once) {
        normalize_pass(&once)
    } else {
        once
    }
}

fn normalize_pass(text: &str) -> String {
    let without_urls = strip_urls(text);
    let without_punctuation = strip_punctuation(&without_urls);
    let lowered = lowercase(&without_punctuation);
    collapse_whitespace(&lowered)
}

/// Remove URL tokens
pub fn strip_urls(text: &str) -> Cow<'_, str> {
    URL_PATTERN.replace_all(text, "")
}

/// Unicode whitespace plus the U+001C..U+001F information separators
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || is_space(c)
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|&c| is_kept(c)).collect()
}

// Whole-string lowercasing keeps word-final sigma. Some mappings expand
// into combining marks (U+0130 becomes "i\u{307}"); those are dropped.
fn lowercase(text: &str) -> String {
    text.to_lowercase().chars().filter(|&c| is_kept(c)).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
