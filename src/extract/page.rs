// src/extract/page.rs
// Derives a participant name from one certificate page: largest-font-size
// lines first, then a top-to-bottom line scan, both behind the same
// boilerplate skip heuristic.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One word of extracted page content with its layout attributes, as
/// produced by the external text extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct PageWord {
    pub text: String,
    /// Vertical position of the word on the page (smaller is higher).
    pub top: f64,
    /// Font size of the word.
    pub size: f64,
}

/// Extracted content of one page.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedPage {
    pub text: String,
    #[serde(default)]
    pub words: Vec<PageWord>,
}

/// No usable candidate name exists on the page. Expected for boilerplate
/// pages; callers log it and continue with the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNotFound {
    pub reason: String,
}

impl fmt::Display for NameNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no usable participant name: {}", self.reason)
    }
}

impl std::error::Error for NameNotFound {}

// Header/footer/template phrases that rule a line out as a name.
const SKIP_KEYWORDS: [&str; 31] = [
    "certificate",
    "certifies",
    "congratulations",
    "participant",
    "diploma",
    "completion",
    "attendance",
    "workshop",
    "seminar",
    "course",
    "training",
    "program",
    "event",
    "this",
    "is awarded to",
    "hackathon",
    "date",
    "signed",
    "winner",
    "certificate of",
    "issued to",
    "presented to",
    "name",
    "student",
    "the",
    "and",
    "for",
    "this is to",
    "we present",
    "in recognition of",
    "please find",
];

// Lines that start with one of these are administrative even when they are
// otherwise all-alphabetic.
const ADMIN_FIRST_WORDS: [&str; 6] = [
    "certificate",
    "this",
    "issued",
    "presented",
    "participant",
    "congratulations",
];

/// True when a line is likely template text rather than a person's name.
/// Two rules, both deliberate: a keyword hit rejects the line, unless the
/// line is two-or-more purely alphabetic tokens whose first word is not
/// administrative, in which case it is accepted as a plausible name even
/// with a coincidental keyword substring (e.g. "Amanda Theroux").
pub fn looks_like_boilerplate(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() >= 2 && words.iter().all(|w| w.chars().all(char::is_alphabetic)) {
        let first = words[0].to_lowercase();
        if !ADMIN_FIRST_WORDS.contains(&first.as_str()) {
            return false;
        }
    }
    let line_lower = line.to_lowercase();
    SKIP_KEYWORDS.iter().any(|kw| line_lower.contains(kw))
}

/// Strip non-letter characters and collapse whitespace.
fn clean_candidate(line: &str) -> String {
    let spaced: String = line
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn accept_candidate(line: &str) -> Option<String> {
    if looks_like_boilerplate(line) {
        return None;
    }
    let cleaned = clean_candidate(line);
    if cleaned.chars().count() >= 2 && cleaned.to_lowercase() != "name" {
        Some(cleaned)
    } else {
        None
    }
}

/// Extract the participant name from a page. Tries the three largest-font
/// lines first, then falls back to scanning all text lines top to bottom.
pub fn extract_participant_name(
    page_text: &str,
    words: &[PageWord],
) -> Result<String, NameNotFound> {
    let lines: Vec<&str> = page_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() && words.is_empty() {
        return Err(NameNotFound {
            reason: "no text found on page".to_string(),
        });
    }

    // Font-size pass: group words into lines by rounded vertical position,
    // rank lines by average size, examine the top 3.
    if !words.is_empty() {
        let mut by_line: BTreeMap<i64, Vec<&PageWord>> = BTreeMap::new();
        for word in words {
            by_line.entry(word.top.round() as i64).or_default().push(word);
        }

        let mut ranked: Vec<(f64, String)> = by_line
            .values()
            .map(|line_words| {
                let text = line_words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let avg_size =
                    line_words.iter().map(|w| w.size).sum::<f64>() / line_words.len() as f64;
                (avg_size, text.trim().to_string())
            })
            .collect();
        // Stable sort keeps page order among equal sizes.
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        for (_, line) in ranked.iter().take(3) {
            if let Some(name) = accept_candidate(line) {
                return Ok(name);
            }
        }
    }

    // Fallback: plain line scan, top to bottom.
    for line in &lines {
        if let Some(name) = accept_candidate(line) {
            return Ok(name);
        }
    }

    Err(NameNotFound {
        reason: format!("no candidate among {} lines", lines.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, top: f64, size: f64) -> PageWord {
        PageWord {
            text: text.to_string(),
            top,
            size,
        }
    }

    #[test]
    fn boilerplate_lines_are_rejected() {
        assert!(looks_like_boilerplate("Certificate of Participation"));
        assert!(looks_like_boilerplate("This is to certify that"));
        assert!(looks_like_boilerplate("Date: 23 August 2025"));
        assert!(looks_like_boilerplate("CONGRATULATIONS!"));
    }

    #[test]
    fn plausible_names_override_keyword_hits() {
        // "Theroux" contains the skip keyword "the"; two alphabetic tokens
        // with a non-administrative first word are still accepted.
        assert!(!looks_like_boilerplate("Amanda Theroux"));
        assert!(!looks_like_boilerplate("Dateo Fernandez"));
        // But an administrative first word keeps the rejection.
        assert!(looks_like_boilerplate("Certificate Participation"));
        assert!(looks_like_boilerplate("This Certifies"));
    }

    #[test]
    fn largest_font_line_wins() {
        let words = vec![
            word("Certificate", 10.0, 30.0),
            word("of", 10.0, 30.0),
            word("Participation", 10.0, 30.0),
            word("Harsha", 50.0, 42.0),
            word("Kumar", 50.0, 42.0),
            word("for", 90.0, 14.0),
            word("outstanding", 90.0, 14.0),
        ];
        let text = "Certificate of Participation\nHarsha Kumar\nfor outstanding";
        assert_eq!(
            extract_participant_name(text, &words).unwrap(),
            "Harsha Kumar"
        );
    }

    #[test]
    fn falls_back_to_line_scan_without_word_data() {
        let text = "Certificate of Participation\nHarsha Kumar\nDate: 23 August 2025";
        assert_eq!(extract_participant_name(text, &[]).unwrap(), "Harsha Kumar");
    }

    #[test]
    fn cleans_stray_characters_from_candidate() {
        let text = "Certificate of Participation\n*Harsha  Kumar*";
        assert_eq!(extract_participant_name(text, &[]).unwrap(), "Harsha Kumar");
    }

    #[test]
    fn page_without_usable_name_fails() {
        let text = "Certificate of Participation\nDate: 23 August 2025\nSigned";
        let err = extract_participant_name(text, &[]).unwrap_err();
        assert!(err.reason.contains("no candidate"));
    }

    #[test]
    fn empty_page_fails() {
        assert!(extract_participant_name("", &[]).is_err());
        assert!(extract_participant_name("   \n  ", &[]).is_err());
    }
}
