//! # outliner-cli
//!
//! Batch command-line interface: outline every PDF in a directory.

mod batch;
mod output;

use anyhow::{Context, Result};
use batch::{discover_inputs, BatchReport, BatchRunner, DocumentStatus};
use clap::Parser;
use colored::Colorize;
use outliner_core::{HeuristicConfig, OutlineEngine};
use outliner_pdf::extractor::PdfiumLineSource;
use outliner_pdf::{engine_with_ocr, PdfOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// outliner - Extract title and heading outlines from PDF documents
#[derive(Parser)]
#[command(name = "outliner")]
#[command(author, version, about = "Infer document outlines from PDF typography", long_about = None)]
struct Cli {
    /// Directory containing the PDF documents to process
    #[arg(value_name = "INPUT_DIR", default_value = "/app/input")]
    input: PathBuf,

    /// Directory receiving one JSON record per document
    #[arg(value_name = "OUTPUT_DIR", default_value = "/app/output")]
    output: PathBuf,

    /// Per-document time budget in seconds
    #[arg(short, long, default_value_t = 60)]
    timeout: u64,

    /// Heuristic overrides (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only read pages START-END (1-based, inclusive)
    #[arg(long, value_name = "START-END", value_parser = parse_page_range)]
    pages: Option<(usize, usize)>,

    /// Tesseract language for the OCR fallback
    #[arg(long, default_value = "eng")]
    ocr_language: String,

    /// Directory containing the PDFium shared library
    #[arg(long, value_name = "DIR")]
    pdfium_path: Option<PathBuf>,

    /// Disable the OCR fallback
    #[arg(long)]
    no_ocr: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_page_range(raw: &str) -> Result<(usize, usize), String> {
    let (start, end) = match raw.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (raw.trim(), raw.trim()),
    };
    let start: usize = start
        .parse()
        .map_err(|_| format!("invalid start page: '{start}'"))?;
    let end: usize = end.parse().map_err(|_| format!("invalid end page: '{end}'"))?;
    if start == 0 || end < start {
        return Err(format!("invalid page range: '{raw}'"));
    }
    Ok((start, end))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(run(cli));
    // Abandoned documents may still be parsing; don't wait on them.
    runtime.shutdown_timeout(Duration::from_secs(1));

    result.map(|_| ())
}

async fn run(cli: Cli) -> Result<BatchReport> {
    let config = match &cli.config {
        Some(path) => HeuristicConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => HeuristicConfig::default(),
    };

    let options = PdfOptions {
        page_range: cli.pages,
        pdfium_path: cli.pdfium_path.clone(),
        ocr_language: cli.ocr_language.clone(),
        ..Default::default()
    };

    let engine = if cli.no_ocr {
        OutlineEngine::new(config)
    } else {
        engine_with_ocr(config, options.clone())
    };
    let source = PdfiumLineSource::new(options);

    let inputs = discover_inputs(&cli.input)?;
    if inputs.is_empty() {
        println!(
            "{} No PDF documents found in {}",
            "!".yellow(),
            cli.input.display()
        );
        return Ok(BatchReport::default());
    }
    tracing::info!("Processing {} documents from {}", inputs.len(), cli.input.display());

    let runner = BatchRunner::new(
        engine,
        source,
        &cli.output,
        Duration::from_secs(cli.timeout),
    );
    let report = runner.run(&inputs).await?;

    for doc in &report.documents {
        match &doc.status {
            DocumentStatus::Success {
                output,
                headings,
                elapsed,
            } => println!(
                "{} {} → {} ({:.2}s, {} headings)",
                "✔".green(),
                doc.name,
                output.display(),
                elapsed.as_secs_f64(),
                headings
            ),
            DocumentStatus::Timeout { budget } => println!(
                "{} Skipped {} (timeout after {}s)",
                "⌛".yellow(),
                doc.name,
                budget.as_secs()
            ),
            DocumentStatus::Failed { reason } => {
                println!("{} {}: {}", "✖".red(), doc.name, reason)
            }
        }
    }

    println!(
        "\n{}: {} succeeded, {} timed out, {} failed",
        "Summary".bold(),
        report.succeeded(),
        report.timed_out(),
        report.failed()
    );
    Ok(report)
}
