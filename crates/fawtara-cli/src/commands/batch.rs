//! Batch processing command for multiple documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use fawtara_core::{
    assemble_pages, Currency, CurrencyTotals, Extraction, InvoiceParser, InvoicePipeline,
};

use super::output::{format_record, InvoiceRecord, OutputFormat};
use super::{is_supported_input, load_config, read_page_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Include the OCR text in JSON output
    #[arg(long)]
    include_text: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    index: usize,
    path: PathBuf,
    extraction: Option<Extraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = Arc::new(InvoicePipeline::from_config(&config.extraction)?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported_input(p))
        .collect();

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

    // Each file runs on a blocking worker; the semaphore bounds how many at once.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let pipeline = Arc::clone(&pipeline);
        let pb = overall_pb.clone();

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &pipeline);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            pb.inc(1);

            match outcome {
                Ok(extraction) => ProcessResult {
                    index,
                    path,
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => ProcessResult {
                    index,
                    path,
                    extraction: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            }
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|r| r.index);

    overall_pb.finish_with_message("Complete");

    for result in &results {
        if let Some(err) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), err);
            } else {
                error!("Failed to process {}: {}", result.path.display(), err);
                anyhow::bail!("Processing failed: {}", err);
            }
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            write_output(result, output_dir, &args)?;
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

    let totals = CurrencyTotals::from_results(
        successful
            .iter()
            .filter_map(|r| r.extraction.as_ref())
            .map(|e| &e.result),
    );

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );
    for currency in [Currency::Usd, Currency::Iqd] {
        println!("   {} total: {}", currency, totals.total(currency));
    }

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

/// Each batch input is a single-page document.
fn process_single_file(path: &Path, pipeline: &InvoicePipeline) -> anyhow::Result<Extraction> {
    let text = assemble_pages([read_page_text(path)?]);
    if text.is_empty() {
        anyhow::bail!("No text found in {}", path.display());
    }

    Ok(pipeline.parse(&text))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_output(result: &ProcessResult, output_dir: &Path, args: &BatchArgs) -> anyhow::Result<()> {
    let Some(extraction) = &result.extraction else {
        return Ok(());
    };

    let output_name = result
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("invoice");
    let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

    let record = InvoiceRecord::new(file_name(&result.path), extraction.clone(), args.include_text);
    fs::write(&output_path, format_record(&record, args.format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoice_date",
        "total_amount",
        "currency",
        "category",
        "language",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = file_name(&result.path);

        if let Some(extraction) = &result.extraction {
            let fields = &extraction.result;
            wtr.write_record([
                filename.as_str(),
                "success",
                &fields.invoice_date.to_string(),
                &fields.total_amount.to_string(),
                fields.currency.code(),
                fields.category.label(),
                fields.language.code(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename.as_str(),
                "error",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
