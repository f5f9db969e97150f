// src/lib.rs
// Certificate reconciliation pipeline: normalizes participant names from a
// roster and a directory of per-person certificate files into one key
// space, matches them under uncertainty, and produces an auditable report.

pub mod extract;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod report;
pub mod utils;

pub use matching::{match_key, CertificateIndex, MatcherConfig};
pub use models::{MatchRecord, MatchStatus, MatchTier, ReportSummary, RosterRow};
pub use normalize::normalize_name;
