//! Batch command - extract fields from every processed text file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use plandoc_core::export::{write_csv, write_json};
use plandoc_core::{
    discover_sources, AcquisitionError, BatchReport, BatchRunner, ProcessedTextReader,
};

use super::{build_parser, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory of processed text files (default: acquisition.processed_dir)
    input_dir: Option<PathBuf>,

    /// Output directory (default: output.output_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of parallel workers (default: output.jobs)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Text file extension (default: acquisition.text_extension)
    #[arg(long)]
    extension: Option<String>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = args.input_dir {
        config.acquisition.processed_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output.output_dir = dir;
    }
    if let Some(jobs) = args.jobs {
        config.output.jobs = jobs;
    }
    if let Some(ext) = args.extension {
        config.acquisition.text_extension = ext;
    }

    let input_dir = config.acquisition.processed_dir.clone();
    let sources = match discover_sources(&input_dir, &config.acquisition.text_extension) {
        Ok(sources) => sources,
        Err(AcquisitionError::MissingDirectory(_)) => Vec::new(),
        Err(e) => anyhow::bail!("Cannot list {}: {}", input_dir.display(), e),
    };

    if sources.is_empty() {
        println!(
            "{} No .{} files found in {}",
            style("ℹ").blue(),
            config.acquisition.text_extension,
            input_dir.display()
        );
    } else {
        println!(
            "{} Found {} files to process",
            style("ℹ").blue(),
            sources.len()
        );
    }

    let parser = build_parser(&config)?;

    let pb = if args.quiet || sources.is_empty() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(sources.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let progress = pb.clone();
    let runner = BatchRunner::new(Arc::new(parser), Arc::new(ProcessedTextReader::new()))
        .with_jobs(config.output.jobs)
        .on_record(move |_| progress.inc(1));

    let report = tokio::task::spawn_blocking(move || runner.run(&sources)).await?;
    pb.finish_and_clear();

    let (json_path, csv_path) = config.output_paths();
    let rows = report.rows();
    write_json(&json_path, &rows)?;
    write_csv(&csv_path, &rows)?;
    debug!("Wrote {} and {}", json_path.display(), csv_path.display());

    print_summary(&report, &json_path, &csv_path);
    info!("Batch finished in {:?}", report.elapsed);

    Ok(())
}

fn print_summary(report: &BatchReport, json_path: &Path, csv_path: &Path) {
    println!(
        "{} Processed {} files in {:.2?}",
        style("✓").green(),
        report.records.len(),
        report.elapsed
    );
    println!(
        "   {} successful, {} failed",
        style(report.succeeded()).green(),
        style(report.failures.len()).red()
    );
    println!(
        "{} Results written to {} and {}",
        style("✓").green(),
        json_path.display(),
        csv_path.display()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.filename, failure.reason);
        }
    }
}
