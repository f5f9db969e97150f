// src/models/mod.rs
// Core data types shared by the matching pipeline and the report builder.

use serde::{Deserialize, Serialize};

/// One raw (name, email) pair read from the roster, with its source row index.
/// Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub row_index: usize,
    pub name: String,
    pub email: String,
}

/// Resolution tier, in decreasing precision order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Fuzzy,
    Partial,
    None,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::Partial => "partial",
            MatchTier::None => "none",
        }
    }
}

/// Per-row status taxonomy. Mutually exclusive, assigned in priority order:
/// invalid email disqualifies a row before any matching is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InvalidEmail,
    Matched,
    LowConfidenceMatch,
    CertificateNotFound,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::InvalidEmail => "invalid_email",
            MatchStatus::Matched => "matched",
            MatchStatus::LowConfidenceMatch => "low_confidence_match",
            MatchStatus::CertificateNotFound => "certificate_not_found",
        }
    }

    /// Rows with these statuses are the only ones forwarded to the sender.
    pub fn is_sendable(&self) -> bool {
        matches!(self, MatchStatus::Matched | MatchStatus::LowConfidenceMatch)
    }
}

/// Result of resolving one normalized key against the certificate index.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMatch {
    pub certificate_filename: Option<String>,
    pub tier: MatchTier,
    pub confidence: f64,
    pub status: MatchStatus,
}

impl KeyMatch {
    pub fn not_found() -> Self {
        KeyMatch {
            certificate_filename: None,
            tier: MatchTier::None,
            confidence: 0.0,
            status: MatchStatus::CertificateNotFound,
        }
    }
}

/// One reconciliation report record. Write-once per roster row; the report
/// is an ordered sequence of these, one per input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub row_index: usize,
    pub original_name: String,
    pub original_email: String,
    pub cleaned_email: String,
    pub normalized_name: String,
    pub valid_email: bool,
    pub certificate_found: bool,
    pub certificate_filename: Option<String>,
    pub match_tier: MatchTier,
    pub confidence: f64,
    pub status: MatchStatus,
}

/// Observable side effects of index construction, for the caller to log and
/// assert on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub indexed: usize,
    pub skipped_empty_key: usize,
    pub overwritten: usize,
}

/// Per-status counts over a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub matched: usize,
    pub low_confidence: usize,
    pub not_found: usize,
    pub invalid_email: usize,
}

impl ReportSummary {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut summary = ReportSummary {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.status {
                MatchStatus::Matched => summary.matched += 1,
                MatchStatus::LowConfidenceMatch => summary.low_confidence += 1,
                MatchStatus::CertificateNotFound => summary.not_found += 1,
                MatchStatus::InvalidEmail => summary.invalid_email += 1,
            }
        }
        summary
    }

    pub fn sendable(&self) -> usize {
        self.matched + self.low_confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_sendability() {
        assert!(MatchStatus::Matched.is_sendable());
        assert!(MatchStatus::LowConfidenceMatch.is_sendable());
        assert!(!MatchStatus::CertificateNotFound.is_sendable());
        assert!(!MatchStatus::InvalidEmail.is_sendable());
    }

    #[test]
    fn summary_counts_every_status() {
        let record = |status| MatchRecord {
            row_index: 0,
            original_name: String::new(),
            original_email: String::new(),
            cleaned_email: String::new(),
            normalized_name: String::new(),
            valid_email: false,
            certificate_found: false,
            certificate_filename: None,
            match_tier: MatchTier::None,
            confidence: 0.0,
            status,
        };
        let records = vec![
            record(MatchStatus::Matched),
            record(MatchStatus::Matched),
            record(MatchStatus::LowConfidenceMatch),
            record(MatchStatus::InvalidEmail),
            record(MatchStatus::CertificateNotFound),
        ];
        let summary = ReportSummary::from_records(&records);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.low_confidence, 1);
        assert_eq!(summary.invalid_email, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.sendable(), 3);
    }
}
