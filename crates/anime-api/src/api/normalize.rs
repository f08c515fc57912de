//! Canonical form of title identifiers for the detail endpoint.
//!
//! The remote API only matches the exact canonical form and answers with an
//! empty result set for anything else.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a title identifier before requesting its detail.
///
/// Drops any query-string suffix, encodes colons, turns whitespace runs into
/// hyphens and lower-cases the result. Applying it twice gives the same
/// string as applying it once.
pub fn normalize_detail_id(raw: &str) -> String {
    let without_query = raw.split('?').next().unwrap_or_default().trim();
    let encoded = without_query.replace(':', "%3A");
    WHITESPACE_RUN
        .replace_all(&encoded, "-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_space_and_case() {
        assert_eq!(normalize_detail_id("One Piece: Season 2"), "one-piece%3a-season-2");
    }

    #[test]
    fn test_query_suffix_is_dropped() {
        assert_eq!(normalize_detail_id("  Naruto Shippuden ?ref=home"), "naruto-shippuden");
        assert_eq!(normalize_detail_id("?only=query"), "");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(normalize_detail_id("Boku  no\tHero\nAcademia"), "boku-no-hero-academia");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "One Piece: Season 2",
            "already-normal",
            "Re:Zero  kara Hajimeru",
            "  spaced  ",
            "MIXED Case?x=1",
            "",
            "a:b:c d",
            "one-piece%3a-season-2",
        ];
        for input in inputs {
            let once = normalize_detail_id(input);
            assert_eq!(normalize_detail_id(&once), once, "input: {input:?}");
        }
    }
}
