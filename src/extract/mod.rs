// src/extract/mod.rs

pub mod filename;
pub mod page;

pub use filename::{sanitize_filename, DuplicateCounter};
pub use page::{extract_participant_name, ExtractedPage, NameNotFound, PageWord};
