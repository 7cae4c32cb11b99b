//! End-to-end extraction properties over the public API.

use std::path::Path;
use std::sync::Arc;

use plandoc_core::export::{read_csv, read_json, to_rows, write_csv, write_json};
use plandoc_core::extract::rules::{extract_decision, extract_reference};
use plandoc_core::{
    discover_sources, BatchRunner, DocumentParser, Entity, EntityLabel, EntityRecognizer,
    ExtractionMethod, ExtractionRecord, GazetteerRecognizer, PlanningDocumentParser,
    ProcessedTextReader, RecognitionError,
};
use pretty_assertions::assert_eq;

const NOTICE: &str = "--- Page 1 ---
WESTSHIRE DISTRICT COUNCIL
TOWN AND COUNTRY PLANNING ACT 1990

Application No: 23/01234/FUL
Applicant: Mrs Jane Smith

At:
42 High Street, Springfield

Proposal: Erection of a two storey side extension

--- Page 2 ---
The Council hereby gives notice that planning permission is GRANTED.
Dated 14 March 2024";

/// Recognizer that panics when it sees a poison marker.
struct Touchy;

impl EntityRecognizer for Touchy {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError> {
        if text.contains("POISON") {
            panic!("recognizer crashed");
        }
        GazetteerRecognizer::new().recognize(text)
    }

    fn name(&self) -> &str {
        "touchy"
    }
}

fn gazetteer_parser() -> PlanningDocumentParser {
    let recognizer =
        GazetteerRecognizer::new().with_places(vec!["Springfield".to_string()]);
    PlanningDocumentParser::new(Arc::new(recognizer))
}

fn write(dir: &Path, name: &str, content: &[u8]) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn extraction_is_idempotent() {
    let parser = gazetteer_parser();
    let first = parser.parse("notice.txt", NOTICE).record;
    let second = parser.parse("notice.txt", NOTICE).record;
    assert_eq!(first, second);
}

#[test]
fn notice_yields_every_field() {
    let record = gazetteer_parser().parse("notice.txt", NOTICE).record;

    assert_eq!(record.reference.value(), Some("23/01234/FUL"));
    assert_eq!(record.date.value(), Some("14 March 2024"));
    assert_eq!(record.address.value(), Some("42 High Street, Springfield"));
    assert_eq!(record.address.confidence, 1.0);
    assert_eq!(record.decision.value(), Some("GRANTED"));
    assert_eq!(record.applicant.value(), Some("Jane Smith"));
    assert_eq!(record.applicant.method, ExtractionMethod::EntityRecognition);
}

#[test]
fn confidence_tracks_presence() {
    let parser = gazetteer_parser();
    let texts = [NOTICE, "", "nothing to see", "Decision: refused", "At:\n   \n"];

    for text in texts {
        let record = parser.parse("doc.txt", text).record;
        assert_eq!(record.fields().count(), 5);
        for (name, field) in record.fields() {
            assert!(
                (0.0..=1.0).contains(&field.confidence),
                "{} confidence out of range",
                name
            );
            assert_eq!(field.value.is_none(), field.confidence == 0.0, "{}", name);
        }
    }
}

#[test]
fn decision_is_uppercased() {
    for text in ["granted", "Granted", "GRANTED"] {
        assert_eq!(extract_decision(text), Some("GRANTED".to_string()));
    }
}

#[test]
fn reference_requires_full_shape() {
    assert_eq!(
        extract_reference("Our ref 23/01234/FUL refers."),
        Some("23/01234/FUL".to_string())
    );
    assert_eq!(extract_reference("Our ref 23/1/FU refers."), None);
}

#[test]
fn address_falls_back_to_place_entity() {
    let text = "Proposal: new dwelling on land east of Springfield\nGRANTED";
    let record = gazetteer_parser().parse("fallback.txt", text).record;

    assert_eq!(record.address.value(), Some("Springfield"));
    assert_eq!(record.address.confidence, 0.6);
    assert_eq!(record.address.method, ExtractionMethod::EntityRecognition);
}

#[test]
fn fixed_entities_drive_entity_fields() {
    struct Fixed;

    impl EntityRecognizer for Fixed {
        fn recognize(&self, _text: &str) -> Result<Vec<Entity>, RecognitionError> {
            Ok(vec![
                Entity::new("Leeds", EntityLabel::GeoPoliticalEntity, 30, 35),
                Entity::new("Ann Price", EntityLabel::Person, 12, 21),
                Entity::new("Bob Stone", EntityLabel::Person, 0, 9),
            ])
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    let record = PlanningDocumentParser::new(Arc::new(Fixed))
        .parse("fixed.txt", "Bob Stone / Ann Price, site in Leeds")
        .record;
    assert_eq!(record.applicant.value(), Some("Bob Stone"));
    assert_eq!(record.address.value(), Some("Leeds"));
}

#[test]
fn batch_isolates_malformed_documents() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "01.txt", NOTICE.as_bytes());
    write(dir.path(), "02.txt", &[0x50, 0x6c, 0xe9, 0xff]);
    write(dir.path(), "03.txt", b"Appeal DISMISSED on 2 May 2024");

    let sources = discover_sources(dir.path(), "txt").unwrap();
    let runner = BatchRunner::new(Arc::new(gazetteer_parser()), Arc::new(ProcessedTextReader::new()));
    let report = runner.run(&sources);

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[1], ExtractionRecord::absent("02.txt"));
    assert_eq!(report.records[2].decision.value(), Some("DISMISSED"));
    assert_eq!(report.failures.len(), 1);
}

#[test]
fn batch_survives_panicking_recognizer() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", b"Mr Tom Hughes, Leeds");
    write(dir.path(), "b.txt", b"POISON 23/01234/FUL");
    write(dir.path(), "c.txt", b"Ms Ann Price, York");

    let sources = discover_sources(dir.path(), "txt").unwrap();
    let parser = PlanningDocumentParser::new(Arc::new(Touchy));
    let report = BatchRunner::new(Arc::new(parser), Arc::new(ProcessedTextReader::new()))
        .with_jobs(2)
        .run(&sources);

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].applicant.value(), Some("Tom Hughes"));
    assert_eq!(report.records[1], ExtractionRecord::absent("b.txt"));
    assert_eq!(report.records[2].applicant.value(), Some("Ann Price"));
    assert!(report.failures[0].reason.contains("recognizer crashed"));
}

#[test]
fn json_and_csv_outputs_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let parser = gazetteer_parser();
    let records = vec![
        parser.parse("notice.txt", NOTICE).record,
        parser.parse("empty.txt", "").record,
    ];
    let rows = to_rows(&records);

    let json_path = dir.path().join("extracted_data.json");
    let csv_path = dir.path().join("extracted_data.csv");
    write_json(&json_path, &rows).unwrap();
    write_csv(&csv_path, &rows).unwrap();

    assert_eq!(read_json(&json_path).unwrap(), rows);
    assert_eq!(read_csv(&csv_path).unwrap(), rows);
}
