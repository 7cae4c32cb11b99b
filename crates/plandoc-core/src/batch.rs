//! Batch extraction over many source documents.
//!
//! A document that cannot be read, or whose extraction panics, becomes an
//! all-absent record plus a [`BatchFailure`]. The batch itself never aborts.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::acquire::{SourceDocument, TextSource};
use crate::extract::DocumentParser;
use crate::models::record::{ExtractionRecord, RecordRow};

/// A document that degraded to an all-absent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub filename: String,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One record per source, in input order.
    pub records: Vec<ExtractionRecord>,
    /// Documents that could not be processed.
    pub failures: Vec<BatchFailure>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn rows(&self) -> Vec<RecordRow> {
        self.records.iter().map(RecordRow::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of documents processed without failure.
    pub fn succeeded(&self) -> usize {
        self.records.len() - self.failures.len()
    }
}

type Progress = Box<dyn Fn(&ExtractionRecord) + Send + Sync>;

/// Runs a parser over source documents.
pub struct BatchRunner {
    parser: Arc<dyn DocumentParser>,
    source: Arc<dyn TextSource>,
    jobs: usize,
    on_record: Option<Progress>,
}

impl BatchRunner {
    pub fn new(parser: Arc<dyn DocumentParser>, source: Arc<dyn TextSource>) -> Self {
        Self {
            parser,
            source,
            jobs: 1,
            on_record: None,
        }
    }

    /// Number of parallel workers. Zero or one runs sequentially.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Callback invoked after each document, from the worker thread.
    pub fn on_record(mut self, callback: impl Fn(&ExtractionRecord) + Send + Sync + 'static) -> Self {
        self.on_record = Some(Box::new(callback));
        self
    }

    /// Process every source, returning records in input order.
    pub fn run(&self, sources: &[SourceDocument]) -> BatchReport {
        let start = Instant::now();
        info!("Processing {} documents with {} workers", sources.len(), self.jobs.max(1));

        let outcomes: Vec<(ExtractionRecord, Option<BatchFailure>)> = if self.jobs > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| sources.par_iter().map(|doc| self.process(doc)).collect()),
                Err(e) => {
                    warn!("Could not start worker pool, running sequentially: {}", e);
                    sources.iter().map(|doc| self.process(doc)).collect()
                }
            }
        } else {
            sources.iter().map(|doc| self.process(doc)).collect()
        };

        let mut records = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (record, failure) in outcomes {
            records.push(record);
            failures.extend(failure);
        }

        let elapsed = start.elapsed();
        info!(
            "Processed {} documents ({} failed) in {:.2?}",
            records.len(),
            failures.len(),
            elapsed
        );

        BatchReport {
            records,
            failures,
            elapsed,
        }
    }

    fn process(&self, doc: &SourceDocument) -> (ExtractionRecord, Option<BatchFailure>) {
        let outcome = match self.source.read_text(&doc.path) {
            Ok(text) => {
                let parsed =
                    panic::catch_unwind(AssertUnwindSafe(|| self.parser.parse(&doc.filename, &text)));
                match parsed {
                    Ok(result) => {
                        debug!(
                            "{}: {} warnings in {} ms",
                            doc.filename,
                            result.warnings.len(),
                            result.processing_time_ms
                        );
                        (result.record, None)
                    }
                    Err(payload) => {
                        let reason = format!("extraction panicked: {}", panic_message(payload.as_ref()));
                        warn!("{}: {}", doc.filename, reason);
                        self.failed(doc, reason)
                    }
                }
            }
            Err(e) => {
                warn!("{}: {}", doc.filename, e);
                self.failed(doc, e.to_string())
            }
        };

        if let Some(callback) = &self.on_record {
            callback(&outcome.0);
        }
        outcome
    }

    fn failed(&self, doc: &SourceDocument, reason: String) -> (ExtractionRecord, Option<BatchFailure>) {
        let failure = BatchFailure {
            filename: doc.filename.clone(),
            reason,
        };
        (ExtractionRecord::absent(&doc.filename), Some(failure))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
