//! Post text cleaning.
//!
//! Strips @-mentions, URLs, and any character outside the ASCII
//! alphanumeric-and-space set, then collapses runs of whitespace. The result
//! is what gets handed to the sentiment scorer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches, in order: @-mentions, scheme://-style URLs, and any single
/// character outside ASCII alphanumerics, spaces, and tabs.
static STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(@[A-Za-z0-9]+)|(\w+://\S+)|([^A-Za-z0-9 \t])").unwrap());

/// Clean post text for sentiment analysis.
///
/// Deterministic and stateless: the same input always yields the same
/// output, and the output never contains `@` or URL fragments.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let stripped = STRIP.replace_all(text, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
