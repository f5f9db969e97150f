// src/report.rs
// Builds the reconciliation report: one MatchRecord per roster row, in
// input order, with the email checked before any matching is attempted.

use anyhow::{bail, Context, Result};
use log::info;
use std::path::Path;

use crate::matching::email::clean_email;
use crate::matching::{match_key, CertificateIndex, MatcherConfig};
use crate::models::{KeyMatch, MatchRecord, MatchStatus, RosterRow};
use crate::normalize::normalize_name;

/// Heuristic header detection: the first row's first two cells look like
/// the literal column names. Not a strict schema check.
pub fn looks_like_header(row: &RosterRow) -> bool {
    row.name.to_lowercase().contains("name") && row.email.to_lowercase().contains("email")
}

/// Reconcile a single roster row against the index. Email validation runs
/// first and short-circuits: an unreachable recipient is disqualifying
/// regardless of certificate availability.
pub fn reconcile_row(row: &RosterRow, index: &CertificateIndex, config: &MatcherConfig) -> MatchRecord {
    let cleaned_email = clean_email(&row.email);
    let valid_email = !cleaned_email.is_empty();
    let normalized_name = normalize_name(&row.name);

    let key_match = if valid_email {
        match_key(&normalized_name, index, config)
    } else {
        KeyMatch {
            status: MatchStatus::InvalidEmail,
            ..KeyMatch::not_found()
        }
    };

    MatchRecord {
        row_index: row.row_index,
        original_name: row.name.clone(),
        original_email: row.email.clone(),
        cleaned_email,
        normalized_name,
        valid_email,
        certificate_found: key_match.certificate_filename.is_some(),
        certificate_filename: key_match.certificate_filename,
        match_tier: key_match.tier,
        confidence: key_match.confidence,
        status: key_match.status,
    }
}

/// Build the full report, invoking `on_row` after each processed row (used
/// by the binary for progress reporting). A detected header row is skipped
/// and does not produce a record. Output order matches input row order.
pub fn build_report_with<F>(
    rows: &[RosterRow],
    index: &CertificateIndex,
    config: &MatcherConfig,
    mut on_row: F,
) -> Vec<MatchRecord>
where
    F: FnMut(&MatchRecord),
{
    let data_rows = match rows.first() {
        Some(first) if looks_like_header(first) => {
            info!("Header row detected, skipping row {}", first.row_index);
            &rows[1..]
        }
        _ => rows,
    };

    let mut records = Vec::with_capacity(data_rows.len());
    for row in data_rows {
        let record = reconcile_row(row, index, config);
        on_row(&record);
        records.push(record);
    }
    records
}

pub fn build_report(
    rows: &[RosterRow],
    index: &CertificateIndex,
    config: &MatcherConfig,
) -> Vec<MatchRecord> {
    build_report_with(rows, index, config, |_| {})
}

/// The subset of records forwarded to the downstream sender.
pub fn sendable(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    records.iter().filter(|r| r.status.is_sendable()).collect()
}

/// Read the roster from a CSV file without assuming a header; the report
/// builder detects one by content. Rows keep their 0-based file position.
pub fn read_roster_csv(path: &Path) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open roster {}", path.display()))?;

    let mut rows = Vec::new();
    let mut widest = 0;
    for (row_index, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read roster row {}", row_index))?;
        widest = widest.max(record.len());
        rows.push(RosterRow {
            row_index,
            name: record.get(0).unwrap_or("").trim().to_string(),
            email: record.get(1).unwrap_or("").trim().to_string(),
        });
    }

    if rows.is_empty() {
        bail!("Roster {} is empty", path.display());
    }
    if widest < 2 {
        bail!(
            "Roster {} must have at least 2 columns (name, email)",
            path.display()
        );
    }
    Ok(rows)
}

/// Serialize the report to CSV, one record per roster row.
pub fn write_report_csv(path: &Path, records: &[MatchRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write report row {}", record.row_index))?;
    }
    writer.flush().context("Failed to flush report")?;
    info!("Match report saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchTier;

    fn index() -> CertificateIndex {
        CertificateIndex::build([
            "Certificate_Harsha_N_pg001.pdf",
            "Certificate_Amit_Kumar_2.pdf",
        ])
        .0
    }

    fn row(row_index: usize, name: &str, email: &str) -> RosterRow {
        RosterRow {
            row_index,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn header_detection() {
        assert!(looks_like_header(&row(0, "Name", "Email")));
        assert!(looks_like_header(&row(0, "Full Name", "Email Address")));
        assert!(!looks_like_header(&row(0, "Harsha N", "harsha@gmail.com")));
    }

    #[test]
    fn invalid_email_short_circuits_before_matching() {
        let record = reconcile_row(
            &row(3, "Harsha N", "not-an-email"),
            &index(),
            &MatcherConfig::default(),
        );
        assert_eq!(record.status, MatchStatus::InvalidEmail);
        assert_eq!(record.match_tier, MatchTier::None);
        assert_eq!(record.confidence, 0.0);
        assert!(!record.certificate_found);
        // The name would have matched: the email check must win.
        assert_eq!(record.normalized_name, "harsha n");
    }

    #[test]
    fn end_to_end_row_with_repaired_email() {
        let record = reconcile_row(
            &row(1, "Mr. Harsha N.", "harsha@gmsil.com"),
            &index(),
            &MatcherConfig::default(),
        );
        assert_eq!(record.cleaned_email, "harsha@gmail.com");
        assert_eq!(record.normalized_name, "harsha n");
        assert_eq!(record.match_tier, MatchTier::Exact);
        assert_eq!(record.status, MatchStatus::Matched);
        assert_eq!(
            record.certificate_filename.as_deref(),
            Some("Certificate_Harsha_N_pg001.pdf")
        );
    }

    #[test]
    fn report_preserves_row_order_and_length() {
        let rows = vec![
            row(0, "Name", "Email"),
            row(1, "Amit Kumar", "amit@gmail.com"),
            row(2, "Nobody Here", "nobody@gmail.com"),
            row(3, "Bad Row", "broken"),
        ];
        let records = build_report(&rows, &index(), &MatcherConfig::default());
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.row_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(records[0].status, MatchStatus::Matched);
        assert_eq!(records[1].status, MatchStatus::CertificateNotFound);
        assert_eq!(records[2].status, MatchStatus::InvalidEmail);
    }

    #[test]
    fn no_header_row_means_no_skip() {
        let rows = vec![row(0, "Amit Kumar", "amit@gmail.com")];
        let records = build_report(&rows, &index(), &MatcherConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].row_index, 0);
    }

    #[test]
    fn sendable_filters_to_matched_and_low_confidence() {
        let rows = vec![
            row(0, "Amit Kumar", "amit@gmail.com"),
            row(1, "Nobody Here", "nobody@gmail.com"),
        ];
        let records = build_report(&rows, &index(), &MatcherConfig::default());
        let to_send = sendable(&records);
        assert_eq!(to_send.len(), 1);
        assert_eq!(to_send[0].row_index, 0);
    }
}
