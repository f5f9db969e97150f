// src/normalize.rs
// Canonicalizes free-text person names into the key space used for matching.

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

const HONORIFIC_TOKENS: &str = "mr|mrs|ms|miss|dr|prof|sir|dame|jr|sr|ii|iii|iv|v|phd|md|dds|dvm";

// Honorifics and suffixes removed as whole words, each optionally followed
// by a period. Word-boundary anchored so "Mr" inside "Mrajesh" survives.
static HONORIFIC_DOTTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({})\b\.?\s*", HONORIFIC_TOKENS)).unwrap());

// Second pass after punctuation removal catches tokens that only become
// whole words once punctuation is gone, and makes the pipeline idempotent.
static HONORIFIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({})\b", HONORIFIC_TOKENS)).unwrap());

/// Normalize a raw name into its matching key: ASCII-folded, lowercase,
/// honorifics/suffixes removed, everything but `[a-z ]` dropped, whitespace
/// collapsed. Unparseable input degrades to the empty string; never fails.
///
/// Idempotent: `normalize_name(normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let folded = deunicode(trimmed).to_lowercase();
    let dotted_stripped = HONORIFIC_DOTTED_RE.replace_all(&folded, "");
    let letters_only: String = dotted_stripped
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let stripped = HONORIFIC_RE.replace_all(&letters_only, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("..."), "");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_name("  Harsha   Kumar  "), "harsha kumar");
        assert_eq!(normalize_name("HARSHA"), "harsha");
    }

    #[test]
    fn folds_diacritics_to_ascii() {
        assert_eq!(normalize_name("José Ángel"), "jose angel");
        assert_eq!(normalize_name("Renée Müller"), "renee muller");
    }

    #[test]
    fn strips_honorifics_and_suffixes() {
        assert_eq!(normalize_name("Dr. Jane O'Connor Jr."), "jane oconnor");
        assert_eq!(normalize_name("jane oconnor"), "jane oconnor");
        assert_eq!(normalize_name("Mr. Harsha N."), "harsha n");
        assert_eq!(normalize_name("Prof Amit Kumar PhD"), "amit kumar");
    }

    #[test]
    fn honorific_removal_is_word_anchored() {
        // "Mr" embedded in a longer word must survive.
        assert_eq!(normalize_name("Mrajesh Patel"), "mrajesh patel");
        assert_eq!(normalize_name("Srinivas"), "srinivas");
    }

    #[test]
    fn drops_digits_and_punctuation() {
        assert_eq!(normalize_name("Anita-Kumari_42"), "anitakumari");
        assert_eq!(normalize_name("a.b.c"), "abc");
    }

    #[test]
    fn idempotent() {
        for raw in ["Dr. Jane O'Connor Jr.", "José Ángel", "  Harsha   N. ", ""] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }
}
