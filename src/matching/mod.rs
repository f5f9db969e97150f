// src/matching/mod.rs

pub mod email;
pub mod index;
pub mod matcher;

pub use index::CertificateIndex;
pub use matcher::{match_key, MatcherConfig};
