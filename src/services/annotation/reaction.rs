//! Reaction notation extraction, e.g. `(n,gamma)`, `(p,p')`, `(α,γ)`.
//!
//! Matches are kept verbatim: reaction notation has no canonical form, so
//! `(n, gamma)` and `(n,gamma)` are distinct identifiers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static REACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\(",
        r"[A-Za-z0-9αγ',]+", // incoming
        r",",
        r"[A-Za-z0-9αγ'xnpdt ]+", // outgoing
        r"\)",
    ))
    .expect("reaction pattern should compile")
});

/// Extract reaction notations, deduplicated and sorted as strings.
///
/// Scanning is leftmost-first and non-overlapping. Unbalanced or malformed
/// parentheses simply produce no match.
pub fn extract_reactions(text: &str) -> Vec<String> {
    let found: BTreeSet<&str> = REACTION.find_iter(text).map(|m| m.as_str()).collect();
    found.into_iter().map(str::to_string).collect()
}
