//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the plandoc pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlandocConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Entity recognizer configuration.
    pub recognizer: RecognizerConfig,

    /// Text acquisition configuration.
    pub acquisition: AcquisitionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading characters handed to the entity recognizer.
    /// Bounds recognition latency; later text is never consulted.
    pub entity_prefix_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            entity_prefix_chars: 2000,
        }
    }
}

/// Which entity recognizer implementation to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerBackend {
    /// Built-in dictionary and pattern recognizer.
    #[default]
    Gazetteer,
    /// ONNX token-classification model (requires the `onnx` feature).
    Onnx,
}

/// Entity recognizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Recognizer implementation.
    pub backend: RecognizerBackend,

    /// Directory containing the ONNX model files.
    pub model_dir: PathBuf,

    /// ONNX model file name.
    pub model_file: String,

    /// HuggingFace tokenizer file name.
    pub tokenizer_file: String,

    /// Model config file holding the `id2label` map.
    pub labels_file: String,

    /// Maximum number of tokens per recognition call.
    pub max_tokens: usize,

    /// ONNX Runtime intra-op threads.
    pub num_threads: usize,

    /// Additional place names for the gazetteer recognizer.
    pub extra_places: Vec<String>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            backend: RecognizerBackend::Gazetteer,
            model_dir: PathBuf::from("models/ner"),
            model_file: "model.onnx".to_string(),
            tokenizer_file: "tokenizer.json".to_string(),
            labels_file: "config.json".to_string(),
            max_tokens: 512,
            num_threads: 1,
            extra_places: Vec::new(),
        }
    }
}

impl RecognizerConfig {
    /// Full paths of the model, tokenizer and label files.
    pub fn artifact_paths(&self) -> [PathBuf; 3] {
        [
            self.model_dir.join(&self.model_file),
            self.model_dir.join(&self.tokenizer_file),
            self.model_dir.join(&self.labels_file),
        ]
    }
}

/// Text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Directory holding the source PDFs.
    pub raw_dir: PathBuf,

    /// Directory holding OCR output text files.
    pub processed_dir: PathBuf,

    /// Extension of OCR output text files.
    pub text_extension: String,

    /// Prefix each page with a `--- Page N ---` marker.
    pub page_markers: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
            text_extension: "txt".to_string(),
            page_markers: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for batch outputs.
    pub output_dir: PathBuf,

    /// JSON output file name.
    pub json_file: String,

    /// CSV output file name.
    pub csv_file: String,

    /// Number of parallel extraction workers.
    pub jobs: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            json_file: "extracted_data.json".to_string(),
            csv_file: "extracted_data.csv".to_string(),
            jobs: 1,
        }
    }
}

impl PlandocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Paths of the JSON and CSV batch outputs.
    pub fn output_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.output.output_dir.join(&self.output.json_file),
            self.output.output_dir.join(&self.output.csv_file),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PlandocConfig =
            serde_json::from_str(r#"{"extraction": {"entity_prefix_chars": 500}}"#).unwrap();
        assert_eq!(config.extraction.entity_prefix_chars, 500);
        assert_eq!(config.recognizer.backend, RecognizerBackend::Gazetteer);
        assert_eq!(config.output.json_file, "extracted_data.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PlandocConfig::default();
        config.recognizer.backend = RecognizerBackend::Onnx;
        config.recognizer.extra_places = vec!["Little Snoring".to_string()];
        config.save(&path).unwrap();

        let loaded = PlandocConfig::from_file(&path).unwrap();
        assert_eq!(loaded.recognizer.backend, RecognizerBackend::Onnx);
        assert_eq!(loaded.recognizer.extra_places, vec!["Little Snoring".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PlandocConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
