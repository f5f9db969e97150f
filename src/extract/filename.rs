// src/extract/filename.rs
// Turns an extracted name into a safe file identifier and hands out
// deterministic suffixes when the same name appears on multiple pages.

use anyhow::{bail, Result};
use std::collections::HashMap;

const MAX_FILENAME_LEN: usize = 50;
const FILESYSTEM_RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Convert an extracted name into a safe file identifier: reserved
/// characters become underscores, everything outside
/// alphanumeric/space/hyphen/underscore is dropped, whitespace is
/// collapsed, stray separators are trimmed from both ends, and the result
/// is truncated to 50 characters. Fails if nothing survives.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let replaced: String = name
        .chars()
        .map(|c| if FILESYSTEM_RESERVED.contains(&c) { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c| matches!(c, ' ' | '.' | '_' | '-'));
    if trimmed.is_empty() {
        bail!("filename became empty after sanitization");
    }
    Ok(trimmed.chars().take(MAX_FILENAME_LEN).collect())
}

/// Explicit accumulator for duplicate base names, threaded through the
/// per-page loop in strict page order: first occurrence keeps the bare
/// name, repeats get _1, _2, ...
#[derive(Debug, Default)]
pub struct DuplicateCounter {
    counts: HashMap<String, u32>,
}

impl DuplicateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the final identifier for one more occurrence of `base`.
    pub fn assign(&mut self, base: &str) -> String {
        match self.counts.get_mut(base) {
            Some(seen) => {
                *seen += 1;
                format!("{}_{}", base, seen)
            }
            None => {
                self.counts.insert(base.to_string(), 0);
                base.to_string()
            }
        }
    }
}
