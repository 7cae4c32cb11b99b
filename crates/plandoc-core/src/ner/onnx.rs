//! Token-classification recognizer running an ONNX model.

use std::collections::BTreeMap;
use std::path::Path;

use plandoc_inference::{InferenceBackend, InputTensor, OrtBackend, SessionOptions};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::bio::decode_entities;
use super::{Entity, EntityRecognizer};
use crate::error::RecognitionError;
use crate::models::config::RecognizerConfig;

/// Recognizer backed by a HuggingFace token-classification export.
///
/// Expects `model.onnx`, `tokenizer.json` and a `config.json` carrying the
/// model's `id2label` map in the configured model directory.
pub struct OnnxRecognizer<B: InferenceBackend = OrtBackend> {
    backend: B,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxRecognizer<OrtBackend> {
    /// Load the model, tokenizer and labels named by the configuration.
    pub fn load(config: &RecognizerConfig) -> Result<Self, RecognitionError> {
        let [model_path, tokenizer_path, labels_path] = config.artifact_paths();
        for path in [&model_path, &tokenizer_path, &labels_path] {
            if !path.exists() {
                return Err(RecognitionError::MissingArtifact(path.clone()));
            }
        }

        let backend = OrtBackend::from_file(
            &model_path,
            SessionOptions {
                intra_threads: config.num_threads.max(1),
            },
        )?;
        let tokenizer = load_tokenizer(&tokenizer_path, config.max_tokens)?;
        let labels = load_labels(&labels_path)?;

        info!(
            "Loaded ONNX recognizer from {} ({} labels)",
            config.model_dir.display(),
            labels.len()
        );
        Ok(Self::with_backend(backend, tokenizer, labels))
    }
}

impl<B: InferenceBackend> OnnxRecognizer<B> {
    /// Assemble a recognizer from already loaded parts.
    pub fn with_backend(backend: B, tokenizer: Tokenizer, labels: Vec<String>) -> Self {
        Self {
            backend,
            tokenizer,
            labels,
        }
    }

    fn label(&self, class: usize) -> &str {
        self.labels.get(class).map(String::as_str).unwrap_or("O")
    }
}

impl<B: InferenceBackend> EntityRecognizer for OnnxRecognizer<B> {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| RecognitionError::Failed(format!("tokenize: {}", e)))?;
        if encoding.get_ids().is_empty() {
            return Ok(Vec::new());
        }

        let mut inputs = vec![
            (
                "input_ids",
                InputTensor::single_row("input_ids", encoding.get_ids().iter().copied())?,
            ),
            (
                "attention_mask",
                InputTensor::single_row(
                    "attention_mask",
                    encoding.get_attention_mask().iter().copied(),
                )?,
            ),
        ];
        if self.backend.accepts_input("token_type_ids") {
            inputs.push((
                "token_type_ids",
                InputTensor::single_row("token_type_ids", encoding.get_type_ids().iter().copied())?,
            ));
        }

        let outputs = self.backend.run(&inputs)?;
        let logits = outputs
            .iter()
            .find(|(name, _)| name == "logits")
            .or_else(|| outputs.first())
            .map(|(_, tensor)| tensor)
            .ok_or_else(|| RecognitionError::Failed("model produced no outputs".to_string()))?;

        let classes = logits.argmax_last_axis().ok_or_else(|| {
            RecognitionError::Failed(format!(
                "expected [batch, tokens, labels] logits, got {:?}",
                logits.shape()
            ))
        })?;

        let tags: Vec<&str> = classes.iter().map(|&c| self.label(c)).collect();
        let entities = decode_entities(text, encoding.get_offsets(), &tags);
        debug!(
            "ONNX recognizer tagged {} tokens, {} entities",
            tags.len(),
            entities.len()
        );
        Ok(entities)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

fn load_tokenizer(path: &Path, max_tokens: usize) -> Result<Tokenizer, RecognitionError> {
    let mut tokenizer = Tokenizer::from_file(path)
        .map_err(|e| RecognitionError::ModelLoad(format!("tokenizer {}: {}", path.display(), e)))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_tokens.max(2),
            ..Default::default()
        }))
        .map_err(|e| RecognitionError::ModelLoad(format!("truncation: {}", e)))?;
    Ok(tokenizer)
}

/// Read `id2label` from a HuggingFace model config into an index-ordered list.
fn load_labels(path: &Path) -> Result<Vec<String>, RecognitionError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RecognitionError::ModelLoad(format!("{}: {}", path.display(), e)))?;
    parse_labels(&content)
        .map_err(|reason| RecognitionError::ModelLoad(format!("{}: {}", path.display(), reason)))
}

fn parse_labels(content: &str) -> Result<Vec<String>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let map = value
        .get("id2label")
        .and_then(|v| v.as_object())
        .ok_or_else(|| "missing id2label map".to_string())?;

    let mut by_index = BTreeMap::new();
    for (id, label) in map {
        let index: usize = id
            .parse()
            .map_err(|_| format!("label id {:?} is not an integer", id))?;
        let label = label
            .as_str()
            .ok_or_else(|| format!("label {} is not a string", id))?;
        by_index.insert(index, label.to_string());
    }

    let labels: Vec<String> = (0..by_index.len())
        .map(|i| by_index.get(&i).cloned().unwrap_or_else(|| "O".to_string()))
        .collect();
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_orders_by_id() {
        let labels = parse_labels(r#"{"id2label": {"2": "I-PER", "0": "O", "1": "B-PER"}}"#).unwrap();
        assert_eq!(labels, vec!["O", "B-PER", "I-PER"]);
    }

    #[test]
    fn test_parse_labels_rejects_missing_map() {
        assert!(parse_labels(r#"{"label2id": {}}"#).is_err());
        assert!(parse_labels(r#"{"id2label": {"x": "O"}}"#).is_err());
    }

    #[test]
    fn test_load_reports_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecognizerConfig {
            model_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        match OnnxRecognizer::load(&config) {
            Err(RecognitionError::MissingArtifact(path)) => {
                assert!(path.ends_with("model.onnx"));
            }
            _ => panic!("expected a missing artifact error"),
        }
    }
}
