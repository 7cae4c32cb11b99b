//! Extract command - pull fields out of a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use plandoc_core::export::write_csv_to;
use plandoc_core::models::config::PlandocConfig;
use plandoc_core::{
    DocumentParser, ExtractionRecord, PdfTextLayer, ProcessedTextReader, RecordRow, TextSource,
};

use super::{build_parser, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (processed .txt or a PDF with a text layer)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the extraction method of each field (text format)
    #[arg(long)]
    show_method: bool,

    /// Characters of leading text given to the entity recognizer
    #[arg(long)]
    prefix_chars: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(chars) = args.prefix_chars {
        config.extraction.entity_prefix_chars = chars;
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting from {}", args.input.display());

    let parser = build_parser(&config)?;
    let filename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let record = match read_document(&args.input, &config) {
        Ok(text) => {
            let result = parser.parse(&filename, &text);
            for warning in &result.warnings {
                debug!("{}", warning);
            }
            result.record
        }
        Err(e) => {
            warn!("{}", e);
            eprintln!(
                "{} Could not read {}: {}",
                style("⚠").yellow(),
                args.input.display(),
                e
            );
            ExtractionRecord::absent(filename)
        }
    };

    let output = format_record(&record, args.format, args.show_method)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_document(path: &Path, config: &PlandocConfig) -> plandoc_core::acquire::Result<String> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        PdfTextLayer::new()
            .with_page_markers(config.acquisition.page_markers)
            .read_text(path)
    } else {
        ProcessedTextReader::new().read_text(path)
    }
}

fn format_record(
    record: &ExtractionRecord,
    format: OutputFormat,
    show_method: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let row = RecordRow::from(record);
            Ok(format!("{}\n", serde_json::to_string_pretty(&row)?))
        }
        OutputFormat::Csv => {
            let mut out = Vec::new();
            write_csv_to(&mut out, &[RecordRow::from(record)])?;
            Ok(String::from_utf8(out)?)
        }
        OutputFormat::Text => Ok(format_text(record, show_method)),
    }
}

fn format_text(record: &ExtractionRecord, show_method: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n\n", record.filename));

    for (name, field) in record.fields() {
        let value = field.value().unwrap_or("-");
        if show_method {
            output.push_str(&format!(
                "  {:<10} {} ({:.1}, {})\n",
                name, value, field.confidence, field.method
            ));
        } else {
            output.push_str(&format!("  {:<10} {} ({:.1})\n", name, value, field.confidence));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use plandoc_core::{ExtractedField, ExtractionMethod};

    fn record() -> ExtractionRecord {
        let mut record = ExtractionRecord::absent("notice.txt");
        record.reference = ExtractedField::matched("23/01234/FUL", ExtractionMethod::Regex);
        record.applicant = ExtractedField::matched("Jane Smith", ExtractionMethod::EntityRecognition);
        record
    }

    #[test]
    fn test_text_format_shows_method() {
        let text = format_text(&record(), true);
        assert!(text.contains("23/01234/FUL (1.0, regex)"));
        assert!(text.contains("Jane Smith (0.6, entity-recognition)"));
        assert!(text.contains("decision   - (0.0, none)"));
    }

    #[test]
    fn test_csv_format_has_header() {
        let csv = format_record(&record(), OutputFormat::Csv, false).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(RecordRow::COLUMNS.join(",").as_str()));
        assert!(lines.next().unwrap().starts_with("notice.txt,23/01234/FUL,1.0,"));
    }
}
