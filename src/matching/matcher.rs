// src/matching/matcher.rs
// Three-tier resolution of a normalized name key against the certificate
// index: exact lookup, then whole-string fuzzy similarity, then partial
// token containment. Ordered cheapest and most precise first.

use strsim::normalized_levenshtein;

use crate::matching::index::CertificateIndex;
use crate::models::{KeyMatch, MatchStatus, MatchTier};

pub const DEFAULT_CANDIDATE_FLOOR: f64 = 0.70;
pub const DEFAULT_FUZZY_ACCEPT: f64 = 0.70;
pub const DEFAULT_PARTIAL_ACCEPT: f64 = 0.60;

/// Tunable similarity thresholds. The defaults mirror the shipped tuning:
/// fuzzy candidates below `candidate_floor` are never considered, fuzzy
/// matches below `fuzzy_accept` are reported as low-confidence, and partial
/// matches need `partial_accept` on the full key to count at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    pub candidate_floor: f64,
    pub fuzzy_accept: f64,
    pub partial_accept: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            candidate_floor: DEFAULT_CANDIDATE_FLOOR,
            fuzzy_accept: DEFAULT_FUZZY_ACCEPT,
            partial_accept: DEFAULT_PARTIAL_ACCEPT,
        }
    }
}

/// Resolve a normalized key against the index. Pure function of its inputs
/// and the configured thresholds.
pub fn match_key(key: &str, index: &CertificateIndex, config: &MatcherConfig) -> KeyMatch {
    if key.is_empty() {
        return KeyMatch::not_found();
    }

    // Tier 1: exact.
    if let Some(filename) = index.get(key) {
        return KeyMatch {
            certificate_filename: Some(filename.to_string()),
            tier: MatchTier::Exact,
            confidence: 1.0,
            status: MatchStatus::Matched,
        };
    }

    // Tier 2: fuzzy. Best whole-string similarity over all index keys;
    // ties break to the first key in sorted order (strictly-greater wins).
    if let Some((best_key, similarity)) = best_similarity(key, index.keys(), config.candidate_floor)
    {
        let status = if similarity >= config.fuzzy_accept {
            MatchStatus::Matched
        } else {
            MatchStatus::LowConfidenceMatch
        };
        return KeyMatch {
            certificate_filename: index.get(&best_key).map(str::to_string),
            tier: MatchTier::Fuzzy,
            confidence: similarity,
            status,
        };
    }

    // Tier 3: partial. Only when fuzzy found nothing: candidates share the
    // key's first token, ranked by similarity against the full key.
    let first_token = key.split_whitespace().next().unwrap_or("");
    if !first_token.is_empty() {
        let candidates = index
            .keys()
            .filter(|k| k.starts_with(first_token) || k.contains(first_token));
        if let Some((best_key, similarity)) = best_similarity(key, candidates, config.partial_accept)
        {
            return KeyMatch {
                certificate_filename: index.get(&best_key).map(str::to_string),
                tier: MatchTier::Partial,
                confidence: similarity,
                status: MatchStatus::Matched,
            };
        }
    }

    KeyMatch::not_found()
}

/// Highest-similarity candidate at or above `floor`, first occurrence
/// winning ties. Candidates must be supplied in a deterministic order.
fn best_similarity<'a, I>(key: &str, candidates: I, floor: f64) -> Option<(String, f64)>
where
    I: Iterator<Item = &'a str>,
{
    let mut best: Option<(String, f64)> = None;
    for candidate in candidates {
        let similarity = normalized_levenshtein(key, candidate);
        if similarity < floor {
            continue;
        }
        match &best {
            Some((_, best_sim)) if similarity <= *best_sim => {}
            _ => best = Some((candidate.to_string(), similarity)),
        }
    }
    best
}
