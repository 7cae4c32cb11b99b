//! Error types for the inference layer.

use thiserror::Error;

/// Errors that can occur while loading or running an ONNX model.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The model file could not be parsed or committed to a session.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Session options were rejected by the runtime.
    #[error("failed to configure session: {0}")]
    Session(String),

    /// An input tensor could not be built or converted.
    #[error("invalid input '{name}': {reason}")]
    InvalidInput { name: String, reason: String },

    /// The runtime failed while executing the graph.
    #[error("inference failed: {0}")]
    Run(String),

    /// The model produced no output with the requested name.
    #[error("model has no output named '{0}'")]
    MissingOutput(String),

    /// An output used an element type this crate does not read.
    #[error("unsupported element type for output '{0}'")]
    UnsupportedOutput(String),

    /// I/O error when loading model files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
