//! Acquire command - turn PDF text layers into processed text files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use plandoc_core::{discover_sources, AcquisitionError, PdfTextLayer, SourceDocument, TextSource};

use super::load_config;

/// Arguments for the acquire command.
#[derive(Args)]
pub struct AcquireArgs {
    /// Directory of source PDFs (default: acquisition.raw_dir)
    input_dir: Option<PathBuf>,

    /// Directory for text files (default: acquisition.processed_dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not insert `--- Page N ---` markers
    #[arg(long)]
    no_page_markers: bool,

    /// Overwrite existing text files
    #[arg(long)]
    force: bool,
}

enum Outcome {
    Written,
    Skipped,
    Empty,
    Failed(String),
}

pub async fn run(args: AcquireArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let input_dir = args.input_dir.unwrap_or(config.acquisition.raw_dir);
    let output_dir = args.output_dir.unwrap_or(config.acquisition.processed_dir);
    let extension = config.acquisition.text_extension;
    let page_markers = config.acquisition.page_markers && !args.no_page_markers;

    let sources = match discover_sources(&input_dir, "pdf") {
        Ok(sources) => sources,
        Err(AcquisitionError::MissingDirectory(dir)) => {
            anyhow::bail!("Input directory not found: {}", dir.display())
        }
        Err(e) => return Err(e.into()),
    };

    if sources.is_empty() {
        println!(
            "{} No PDF files found in {}",
            style("ℹ").blue(),
            input_dir.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let layer = PdfTextLayer::new().with_page_markers(page_markers);
    let progress = pb.clone();
    let outcomes = tokio::task::spawn_blocking(move || {
        sources
            .iter()
            .map(|doc| {
                progress.set_message(doc.filename.clone());
                let outcome = acquire_one(&layer, doc, &output_dir, &extension, args.force);
                progress.inc(1);
                (doc.filename.clone(), outcome)
            })
            .collect::<Vec<_>>()
    })
    .await?;
    pb.finish_and_clear();

    let mut written = 0;
    let mut skipped = 0;
    let mut empty = Vec::new();
    let mut failed = Vec::new();
    for (filename, outcome) in outcomes {
        match outcome {
            Outcome::Written => written += 1,
            Outcome::Skipped => skipped += 1,
            Outcome::Empty => empty.push(filename),
            Outcome::Failed(reason) => failed.push((filename, reason)),
        }
    }

    println!(
        "{} Wrote {} text files ({} skipped, {} without text, {} failed)",
        style("✓").green(),
        written,
        skipped,
        empty.len(),
        failed.len()
    );

    if !empty.is_empty() {
        println!();
        println!(
            "{}",
            style("No text layer (needs OCR):").yellow()
        );
        for filename in &empty {
            println!("  - {}", filename);
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (filename, reason) in &failed {
            println!("  - {}: {}", filename, reason);
        }
    }

    Ok(())
}

fn acquire_one(
    layer: &PdfTextLayer,
    doc: &SourceDocument,
    output_dir: &Path,
    extension: &str,
    force: bool,
) -> Outcome {
    let target = output_dir.join(&doc.filename).with_extension(extension);
    if target.exists() && !force {
        debug!("{} exists, skipping", target.display());
        return Outcome::Skipped;
    }

    let text = match layer.read_text(&doc.path) {
        Ok(text) => text,
        Err(e) => {
            warn!("{}: {}", doc.filename, e);
            return Outcome::Failed(e.to_string());
        }
    };

    if text.trim().is_empty() {
        return Outcome::Empty;
    }

    match fs::write(&target, text) {
        Ok(()) => {
            debug!("Wrote {}", target.display());
            Outcome::Written
        }
        Err(e) => Outcome::Failed(e.to_string()),
    }
}
