//! Process command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use fawtara_core::{assemble_pages, InvoiceParser, InvoicePipeline};

use super::output::{format_record, InvoiceRecord, OutputFormat};
use super::{load_config, read_page_text, STDIN_PAGE};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Page files of one document in page order (OCR text or PDF), or "-" for stdin
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include the OCR text in JSON output
    #[arg(long)]
    include_text: bool,

    /// Show fields that fell back to defaults
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = InvoicePipeline::from_config(&config.extraction)?;

    let pb = ProgressBar::new(args.pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let mut pages = Vec::with_capacity(args.pages.len());
    for path in &args.pages {
        info!("Reading page: {}", path.display());
        pb.set_message(format!("Reading {}", path.display()));
        pages.push(read_page_text(path)?);
        pb.inc(1);
    }

    let text = assemble_pages(&pages);
    if text.is_empty() {
        pb.abandon();
        anyhow::bail!("No text found in input");
    }

    pb.set_message("Extracting invoice fields...");
    let extraction = pipeline.parse(&text);
    pb.finish_and_clear();

    let filename = document_name(&args.pages);
    let record = InvoiceRecord::new(filename, extraction, args.include_text);

    if args.show_warnings {
        for warning in &record.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let output = format_record(&record, args.format)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Name a document after its first page.
fn document_name(pages: &[PathBuf]) -> String {
    match pages.first() {
        Some(path) if path.as_os_str() == STDIN_PAGE => "stdin".to_string(),
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => String::new(),
    }
}
