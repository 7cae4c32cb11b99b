//! Subcommand implementations and the setup they share.

pub mod acquire;
pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use plandoc_core::models::config::PlandocConfig;
use plandoc_core::{LazyRecognizer, PlanningDocumentParser, RecognitionError};
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plandoc")
        .join("config.json")
}

/// The file `--config` points at, or the default location.
pub fn config_file(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; the default path is
/// optional and falls back to built-in defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<PlandocConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            PlandocConfig::from_file(path)
                .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))
        }
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using config file {}", path.display());
                PlandocConfig::from_file(&path)
                    .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))
            } else {
                Ok(PlandocConfig::default())
            }
        }
    }
}

/// Build the document parser, loading the recognizer up front so that
/// missing model files stop the run before any document is touched.
pub fn build_parser(config: &PlandocConfig) -> anyhow::Result<PlanningDocumentParser> {
    let recognizer = Arc::new(LazyRecognizer::new(config.recognizer.clone()));

    if let Err(e) = recognizer.preload() {
        match e {
            RecognitionError::MissingArtifact(path) => anyhow::bail!(
                "Entity recognition model file not found: {}\n\n\
                 Place the model, tokenizer and config.json in {} or set recognizer.backend to \"gazetteer\".",
                path.display(),
                config.recognizer.model_dir.display()
            ),
            other => anyhow::bail!("Failed to load entity recognizer: {}", other),
        }
    }

    Ok(PlanningDocumentParser::new(recognizer)
        .with_entity_prefix_chars(config.extraction.entity_prefix_chars))
}
