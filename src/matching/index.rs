// src/matching/index.rs
// Builds the normalized-name -> certificate-file mapping from a directory
// of per-participant files named after extracted page content.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::IndexStats;
use crate::normalize::normalize_name;

pub const CERTIFICATE_EXTENSION: &str = ".pdf";

// Filenames encode a name via a fixed stripping convention:
// Certificate_<Name>_pg<NNN>.pdf, Certificate_<Name>_<NNN>.pdf or <Name>.pdf.
static LEADING_CERT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^certificate[_\-\s]*").unwrap());
static PAGE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_pg\d+$").unwrap());
static NUMERIC_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\d+$").unwrap());

/// Read-only mapping from normalized name key to certificate filename.
/// Built once per run; the certificate directory is the source of truth.
#[derive(Debug, Default, Clone)]
pub struct CertificateIndex {
    entries: BTreeMap<String, String>,
}

impl CertificateIndex {
    /// Build the index from a list of filenames. Input is sorted before
    /// insertion so duplicate-key resolution is deterministic regardless of
    /// directory iteration order: the lexicographically greatest filename
    /// wins, and each overwrite is logged.
    pub fn build<I, S>(filenames: I) -> (Self, IndexStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = filenames
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        sorted.sort();

        let mut entries = BTreeMap::new();
        let mut stats = IndexStats::default();

        for filename in sorted {
            let Some(key) = key_for_filename(&filename) else {
                continue;
            };
            if key.is_empty() {
                debug!("Skipping '{}': empty key after stripping", filename);
                stats.skipped_empty_key += 1;
                continue;
            }
            if let Some(previous) = entries.insert(key.clone(), filename.clone()) {
                warn!(
                    "Duplicate certificate key '{}': '{}' overwrites '{}'",
                    key, filename, previous
                );
                stats.overwritten += 1;
            }
        }

        stats.indexed = entries.len();
        info!("Certificate index built: {} entries", stats.indexed);
        (CertificateIndex { entries }, stats)
    }

    /// Build the index from the files of a certificate directory.
    pub fn from_dir(dir: &Path) -> Result<(Self, IndexStats)> {
        let mut filenames = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read certificate directory {}", dir.display()))?
        {
            let entry = entry.context("Failed to read certificate directory entry")?;
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                if let Some(name) = entry.file_name().to_str() {
                    filenames.push(name.to_string());
                }
            }
        }
        Ok(Self::build(filenames))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in natural (sorted) order. The matcher relies on this order for
    /// its deterministic tie-break.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the normalized key encoded in a certificate filename, or None if
/// the file does not carry the certificate extension. Separator characters
/// in the name part become spaces so "Amit_Kumar" keys as "amit kumar".
fn key_for_filename(filename: &str) -> Option<String> {
    if !filename.to_lowercase().ends_with(CERTIFICATE_EXTENSION) {
        return None;
    }
    let base = &filename[..filename.len() - CERTIFICATE_EXTENSION.len()];
    let no_prefix = LEADING_CERT_RE.replace(base, "");
    let no_page = PAGE_SUFFIX_RE.replace(&no_prefix, "");
    let no_counter = NUMERIC_SUFFIX_RE.replace(&no_page, "");
    let spaced = no_counter.replace(['_', '-'], " ");
    Some(normalize_name(&spaced))
}
