//! Inspect command - report section positions and template drift.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::warn;

use kom_core::inspect::{compare, inspect, DriftReport, SheetReport, DEFAULT_MAX_ROW};
use kom_core::open_sheet;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Workbooks to inspect
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Last row scanned for section headers
    #[arg(long, default_value_t = DEFAULT_MAX_ROW)]
    max_row: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct InspectOutput {
    files: Vec<SheetReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<DriftReport>,
    errors: Vec<FileError>,
}

#[derive(Serialize)]
struct FileError {
    file: String,
    error: String,
}

pub async fn run(args: InspectArgs) -> anyhow::Result<()> {
    let mut reports = Vec::new();
    let mut errors = Vec::new();

    for path in &args.files {
        match open_sheet(path) {
            Ok(grid) => reports.push(inspect(&grid, path.display().to_string(), args.max_row)),
            Err(e) => {
                warn!("Cannot inspect {}: {}", path.display(), e);
                errors.push(FileError {
                    file: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    if reports.is_empty() {
        anyhow::bail!("None of the {} file(s) could be read", args.files.len());
    }

    let comparison = (reports.len() > 1).then(|| compare(&reports));

    if args.json {
        let output = InspectOutput {
            files: reports,
            comparison,
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }
    if let Some(drift) = &comparison {
        print_drift(drift);
    }
    for failure in &errors {
        println!("{} {}: {}", style("✗").red(), failure.file, failure.error);
    }

    Ok(())
}

fn print_report(report: &SheetReport) {
    println!("{}", style(&report.file).bold());
    println!("  Dimensions: {} rows x {} columns", report.max_row, report.max_col);
    println!("  Section headers ({}):", report.sections.len());
    for section in &report.sections {
        println!(
            "    row {:>3}, col {:>2}  {:<24} {}",
            section.row, section.col, section.keyword, section.text
        );
    }

    if report.tank_markers.is_empty() {
        println!("  Tank markers: none");
    } else {
        println!("  Tank markers:");
        for marker in &report.tank_markers {
            let cells: Vec<String> = marker
                .cells
                .iter()
                .map(|(col, text)| format!("{}={}", col, text))
                .collect();
            println!("    row {:>3} {:<4} {}", marker.row, marker.marker, cells.join(", "));
        }
    }
    println!();
}

fn print_drift(drift: &DriftReport) {
    println!("{}", style(format!("Comparison of {} files", drift.files)).bold());

    if drift.drifting.is_empty() {
        println!(
            "  {} All section headers are at the same position",
            style("✓").green()
        );
        return;
    }

    for keyword in &drift.drifting {
        println!("  {} {}", style("⚠").yellow(), keyword);
        for position in drift.positions.get(keyword).into_iter().flatten() {
            println!(
                "      {}: row {}, col {}",
                position.file, position.row, position.col
            );
        }
        let found = drift.positions.get(keyword).map_or(0, Vec::len);
        if found < drift.files {
            println!("      missing in {} file(s)", drift.files - found);
        }
    }
}
