//! Extract command - extract one KOM workbook.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kom_core::{KomExtractor, WorkbookLoader};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input workbook (.xlsx, .xlsm, .xls, .ods)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worksheet to read (default: the first one)
    #[arg(long)]
    sheet: Option<String>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Exit with an error when validation warnings were produced
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let loader = match &args.sheet {
        Some(name) => WorkbookLoader::new().with_sheet(name.clone()),
        None => WorkbookLoader::new(),
    };

    let extractor = KomExtractor::with_config(config);
    let record = extractor.extract_file_with(&args.input, &loader)?;
    let output = record.to_json(args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let warnings = &record.validation_warnings;
    if !warnings.is_empty() {
        eprintln!(
            "{} {} validation warning(s)",
            style("⚠").yellow(),
            warnings.len()
        );
        for warning in warnings {
            eprintln!("  - {}", warning);
        }
    }

    info!(
        "Extracted {} line items and {} equipment rows",
        record.line_items.len(),
        record.equipment_required.len()
    );
    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && !warnings.is_empty() {
        anyhow::bail!(
            "{} validation warning(s) in {} (--strict)",
            warnings.len(),
            args.input.display()
        );
    }

    Ok(())
}
