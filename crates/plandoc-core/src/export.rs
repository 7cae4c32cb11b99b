//! JSON and CSV serialization of extraction records.
//!
//! Both formats carry the same flat [`RecordRow`] schema, so reading either
//! file back yields identical rows.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::ExportError;
use crate::models::record::{ExtractionRecord, RecordRow};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Flatten records into output rows.
pub fn to_rows(records: &[ExtractionRecord]) -> Vec<RecordRow> {
    records.iter().map(RecordRow::from).collect()
}

/// Write rows as a pretty-printed JSON array.
pub fn write_json_to<W: Write>(writer: W, rows: &[RecordRow]) -> Result<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write rows as CSV. The header row is always written, even with no rows.
pub fn write_csv_to<W: Write>(writer: W, rows: &[RecordRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(RecordRow::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_json_from<R: Read>(reader: R) -> Result<Vec<RecordRow>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read CSV rows. Empty cells become absent values.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<RecordRow>> {
    let mut reader = csv::Reader::from_reader(reader);
    let rows = reader.deserialize().collect::<std::result::Result<Vec<RecordRow>, _>>()?;
    Ok(rows)
}

pub fn write_json(path: &Path, rows: &[RecordRow]) -> Result<()> {
    let file = create(path)?;
    write_json_to(BufWriter::new(file), rows)?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_csv(path: &Path, rows: &[RecordRow]) -> Result<()> {
    let file = create(path)?;
    write_csv_to(BufWriter::new(file), rows)?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Vec<RecordRow>> {
    read_json_from(BufReader::new(File::open(path)?))
}

pub fn read_csv(path: &Path) -> Result<Vec<RecordRow>> {
    read_csv_from(BufReader::new(File::open(path)?))
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{ExtractedField, ExtractionMethod};
    use pretty_assertions::assert_eq;

    fn sample_rows() -> Vec<RecordRow> {
        let mut record = ExtractionRecord::absent("a.txt");
        record.reference = ExtractedField::matched("23/01234/FUL", ExtractionMethod::Regex);
        record.address = ExtractedField::matched("14 Mill Lane, York", ExtractionMethod::Regex);
        record.applicant = ExtractedField::matched("Jane Smith", ExtractionMethod::EntityRecognition);
        to_rows(&[record, ExtractionRecord::absent("b.txt")])
    }

    #[test]
    fn test_csv_header_without_rows() {
        let mut out = Vec::new();
        write_csv_to(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", RecordRow::COLUMNS.join(",")));
    }

    #[test]
    fn test_csv_null_is_empty_cell() {
        let mut out = Vec::new();
        write_csv_to(&mut out, &sample_rows()[1..]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("b.txt,,0.0,,0.0,,0.0,,0.0,,0.0"));
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_csv_to(&mut out, &rows).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"14 Mill Lane, York\""));

        let mut out = Vec::new();
        write_csv_to(&mut out, &rows).unwrap();
        assert_eq!(read_csv_from(out.as_slice()).unwrap(), rows);
    }

    #[test]
    fn test_json_and_csv_files_agree() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("out").join("extracted_data.json");
        let csv_path = dir.path().join("out").join("extracted_data.csv");
        let rows = sample_rows();

        write_json(&json_path, &rows).unwrap();
        write_csv(&csv_path, &rows).unwrap();

        let from_json = read_json(&json_path).unwrap();
        let from_csv = read_csv(&csv_path).unwrap();
        assert_eq!(from_json, rows);
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn test_empty_json_is_array() {
        let mut out = Vec::new();
        write_json_to(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
