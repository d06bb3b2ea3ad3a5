//! Batch command - extract many KOM workbooks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use kom_core::grid::SUPPORTED_EXTENSIONS;
use kom_core::{KomExtractor, KomRecord};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input workbooks
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Pretty-print the JSON files
    #[arg(long)]
    pretty: bool,
}

/// Result of extracting a single file.
struct ExtractResult {
    path: PathBuf,
    record: Option<KomRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = matching_files(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = Arc::new(KomExtractor::with_config(config));
    let total = files.len();

    // `buffered` keeps results in input order while up to `jobs` run at once
    let mut pending = stream::iter(files.into_iter().map(|path| {
        let extractor = Arc::clone(&extractor);
        async move {
            let file_start = Instant::now();
            let task_path = path.clone();
            let outcome =
                tokio::task::spawn_blocking(move || extractor.extract_file(&task_path)).await;

            let (record, error) = match outcome {
                Ok(Ok(record)) => (Some(record), None),
                Ok(Err(e)) => (None, Some(e.to_string())),
                Err(e) => (None, Some(format!("extraction task failed: {}", e))),
            };

            ExtractResult {
                path,
                record,
                error,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            }
        }
    }))
    .buffered(args.jobs.max(1));

    let mut results = Vec::with_capacity(total);
    while let Some(result) = pending.next().await {
        overall_pb.inc(1);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                overall_pb.abandon();
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let Some(record) = &result.record {
            let output_path = output_path_for(&result.path, args.output_dir.as_deref());
            fs::write(&output_path, record.to_json(args.pretty)?)?;
            debug!(
                "Wrote output to {} ({}ms)",
                output_path.display(),
                result.processing_time_ms
            );
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let with_warnings = successful
        .iter()
        .filter(|r| r.record.as_ref().is_some_and(|rec| !rec.validation_warnings.is_empty()))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} with warnings), {} failed",
        style(successful.len()).green(),
        style(with_warnings).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Spreadsheet files matching `pattern`, skipping Office lock files.
fn matching_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            let lock_file = p
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("~$"));
            SUPPORTED_EXTENSIONS.contains(&ext.as_str()) && !lock_file
        })
        .collect();
    files.sort();
    Ok(files)
}

fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("kom");
            dir.join(format!("{}.json", stem))
        }
        None => input.with_extension("json"),
    }
}

fn write_summary(path: &Path, results: &[ExtractResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "proposal_number",
        "job_number",
        "line_items",
        "equipment_rows",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                record.text("proposal_number"),
                record.text("job_number"),
                &record.line_items.len().to_string(),
                &record.equipment_required.len().to_string(),
                &record.validation_warnings.len().to_string(),
                &time_ms,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                &time_ms,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
