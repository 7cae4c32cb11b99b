//! Recognizer loaded on first use.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use super::{build_recognizer, Entity, EntityRecognizer};
use crate::error::RecognitionError;
use crate::models::config::{RecognizerBackend, RecognizerConfig};

/// Defers loading the configured recognizer until the first document needs
/// it. Loading happens at most once, even with concurrent callers.
pub struct LazyRecognizer {
    config: RecognizerConfig,
    inner: OnceCell<Arc<dyn EntityRecognizer>>,
}

impl LazyRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            inner: OnceCell::new(),
        }
    }

    /// Load the recognizer now, surfacing missing artifacts before any
    /// document is processed.
    pub fn preload(&self) -> Result<&Arc<dyn EntityRecognizer>, RecognitionError> {
        self.inner.get_or_try_init(|| {
            info!("Loading {:?} entity recognizer", self.config.backend);
            build_recognizer(&self.config)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl EntityRecognizer for LazyRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError> {
        self.preload()?.recognize(text)
    }

    fn name(&self) -> &str {
        match self.inner.get() {
            Some(recognizer) => recognizer.name(),
            None => match self.config.backend {
                RecognizerBackend::Gazetteer => "gazetteer",
                RecognizerBackend::Onnx => "onnx",
            },
        }
    }
}
