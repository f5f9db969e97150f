// src/bin/assign_certificate_names.rs
// Page-side pipeline: consume extracted page content, derive a sanitized
// per-participant filename for each page, and write the rename plan.
// Failing pages are logged and skipped; the batch continues.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use certmatch_lib::extract::{extract_participant_name, sanitize_filename, DuplicateCounter, ExtractedPage};
use certmatch_lib::matching::index::CERTIFICATE_EXTENSION;

#[derive(Parser, Debug)]
#[command(
    name = "assign_certificate_names",
    about = "Derive per-participant certificate filenames from extracted page content"
)]
struct Cli {
    /// JSON file with extracted page text and word layout data
    #[arg(long)]
    pages: PathBuf,

    /// Output path for the rename-plan CSV
    #[arg(long, default_value = "rename_plan.csv")]
    plan: PathBuf,

    /// Log file for pages where no name could be extracted
    #[arg(long, default_value = "skipped_pages.txt")]
    skipped_log: PathBuf,
}

#[derive(Debug, Serialize)]
struct PlanRow {
    page: usize,
    filename: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    info!("Starting certificate name assignment");
    let run_start = Instant::now();

    let raw = fs::read_to_string(&cli.pages)
        .with_context(|| format!("Failed to read pages file {}", cli.pages.display()))?;
    let pages: Vec<ExtractedPage> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse pages file {}", cli.pages.display()))?;
    if pages.is_empty() {
        bail!("Pages file {} contains no pages", cli.pages.display());
    }
    info!("Loaded {} extracted pages", pages.len());

    let page_pb = ProgressBar::new(pages.len() as u64);
    page_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    page_pb.set_message("Extracting names...");

    // Duplicate suffixes depend on strict page order.
    let mut counter = DuplicateCounter::new();
    let mut plan = Vec::new();
    let mut skipped = Vec::new();

    for (page_idx, page) in pages.iter().enumerate() {
        let page_num = page_idx + 1;
        let assigned = extract_participant_name(&page.text, &page.words)
            .map_err(anyhow::Error::from)
            .and_then(|name| sanitize_filename(&name));
        match assigned {
            Ok(base) => {
                let final_name = counter.assign(&base);
                plan.push(PlanRow {
                    page: page_num,
                    filename: format!("{}{}", final_name, CERTIFICATE_EXTENSION),
                });
            }
            Err(e) => {
                warn!("Page {} skipped: {}", page_num, e);
                skipped.push(format!("Page {} - skipped | Reason: {}", page_num, e));
            }
        }
        page_pb.inc(1);
    }
    page_pb.finish_with_message("Extraction complete");

    let mut writer = csv::Writer::from_path(&cli.plan)
        .with_context(|| format!("Failed to create plan {}", cli.plan.display()))?;
    for row in &plan {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write plan row for page {}", row.page))?;
    }
    writer.flush().context("Failed to flush rename plan")?;

    let mut skipped_log = format!("Skipped pages log - {}\n\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
    for line in &skipped {
        skipped_log.push_str(line);
        skipped_log.push('\n');
    }
    fs::write(&cli.skipped_log, skipped_log)
        .with_context(|| format!("Failed to write skipped log {}", cli.skipped_log.display()))?;

    info!("Name assignment completed in {:.2?}", run_start.elapsed());
    info!("  Total pages: {}", pages.len());
    info!("  Named: {}", plan.len());
    info!("  Skipped: {}", skipped.len());
    info!("  Rename plan: {}", cli.plan.display());
    info!("  Skipped details: {}", cli.skipped_log.display());
    Ok(())
}
