// src/main.rs
// Roster reconciliation: build the certificate index, match every roster
// row against it, and write the match report consumed by the email sender.

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

use certmatch_lib::matching::CertificateIndex;
use certmatch_lib::report::{build_report_with, read_roster_csv, sendable, write_report_csv};
use certmatch_lib::models::ReportSummary;
use certmatch_lib::utils::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "certmatch", about = "Match a roster of participants against generated certificate files")]
struct Cli {
    /// Roster CSV with name and email columns (header auto-detected)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Directory of per-participant certificate files
    #[arg(long)]
    certificates: Option<PathBuf>,

    /// Output path for the match report CSV
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();
    if let Some(roster) = cli.roster {
        config.roster_path = roster;
    }
    if let Some(certificates) = cli.certificates {
        config.certificate_dir = certificates;
    }
    if let Some(report) = cli.report {
        config.report_path = report;
    }

    info!("Starting certificate reconciliation pipeline");
    config.log_config();
    let run_start = Instant::now();

    info!("Phase 1: Loading roster");
    let rows = read_roster_csv(&config.roster_path)?;
    info!("Loaded roster with {} rows", rows.len());

    info!("Phase 2: Building certificate index");
    let (index, index_stats) = CertificateIndex::from_dir(&config.certificate_dir)?;
    if index.is_empty() {
        bail!(
            "No usable certificate files found in {}",
            config.certificate_dir.display()
        );
    }
    info!(
        "📁 Indexed {} certificates ({} skipped, {} duplicate keys overwritten)",
        index_stats.indexed, index_stats.skipped_empty_key, index_stats.overwritten
    );

    info!("Phase 3: Matching roster rows");
    let match_pb = ProgressBar::new(rows.len() as u64);
    match_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    match_pb.set_message("Matching roster rows...");
    let records = build_report_with(&rows, &index, &config.matcher, |_| match_pb.inc(1));
    match_pb.finish_with_message("Matching complete");

    info!("Phase 4: Writing report");
    write_report_csv(&config.report_path, &records)
        .with_context(|| format!("Failed to write {}", config.report_path.display()))?;

    let summary = ReportSummary::from_records(&records);
    info!("📋 Match summary:");
    info!("  matched: {}", summary.matched);
    info!("  low_confidence_match: {}", summary.low_confidence);
    info!("  certificate_not_found: {}", summary.not_found);
    info!("  invalid_email: {}", summary.invalid_email);

    if summary.not_found > 0 || summary.low_confidence > 0 || summary.invalid_email > 0 {
        warn!(
            "Issues: {} missing, {} low-confidence, {} invalid emails",
            summary.not_found, summary.low_confidence, summary.invalid_email
        );
    }

    let to_send = sendable(&records);
    info!(
        "{} of {} rows are eligible for sending",
        to_send.len(),
        summary.total
    );

    info!(
        "Reconciliation completed in {:.2?}: {} report rows written to {}",
        run_start.elapsed(),
        records.len(),
        config.report_path.display()
    );
    Ok(())
}
