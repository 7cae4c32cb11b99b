//! ONNX inference abstraction layer for plandoc.
//!
//! Entity recognition models are exported as ONNX token-classification graphs
//! and run through ONNX Runtime (`ort`). The [`InferenceBackend`] trait keeps
//! the recognizer independent of the runtime so tests can substitute a fake.

mod backend;
mod error;
mod tensor;

pub use backend::InferenceBackend;
pub use backend::ort::{OrtBackend, SessionOptions};
pub use error::InferenceError;
pub use tensor::{InputTensor, OutputTensor, TensorType};

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
