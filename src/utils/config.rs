// src/utils/config.rs
// Explicit configuration object built once at startup. Library components
// receive it as a parameter and never read ambient environment state.

use chrono::Local;
use log::info;
use std::env;
use std::path::PathBuf;

use crate::matching::MatcherConfig;

const DEFAULT_ROSTER: &str = "attendance.csv";
const DEFAULT_CERTIFICATE_DIR: &str = "renamed_certificates";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub roster_path: PathBuf,
    pub certificate_dir: PathBuf,
    pub report_path: PathBuf,
    pub matcher: MatcherConfig,
}

impl PipelineConfig {
    /// Read configuration from environment variables (a .env file is loaded
    /// by the binaries before this runs). Unset or unparseable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        let defaults = MatcherConfig::default();
        PipelineConfig {
            roster_path: env_path("CERTMATCH_ROSTER", DEFAULT_ROSTER),
            certificate_dir: env_path("CERTMATCH_CERT_DIR", DEFAULT_CERTIFICATE_DIR),
            report_path: env::var("CERTMATCH_REPORT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_report_path()),
            matcher: MatcherConfig {
                candidate_floor: env_threshold("CERTMATCH_CANDIDATE_FLOOR", defaults.candidate_floor),
                fuzzy_accept: env_threshold("CERTMATCH_FUZZY_ACCEPT", defaults.fuzzy_accept),
                partial_accept: env_threshold("CERTMATCH_PARTIAL_ACCEPT", defaults.partial_accept),
            },
        }
    }

    /// Log the effective settings.
    pub fn log_config(&self) {
        info!("Roster: {}", self.roster_path.display());
        info!("Certificate directory: {}", self.certificate_dir.display());
        info!("Report output: {}", self.report_path.display());
        info!(
            "Matcher thresholds: candidate {:.2}, fuzzy accept {:.2}, partial accept {:.2}",
            self.matcher.candidate_floor, self.matcher.fuzzy_accept, self.matcher.partial_accept
        );
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "match_report_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn env_threshold(var: &str, default: f64) -> f64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}
