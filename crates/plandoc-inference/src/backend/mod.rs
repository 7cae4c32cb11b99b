//! Inference backend implementations.

pub mod ort;

use crate::{InputTensor, OutputTensor, Result};

/// Trait for ONNX inference backends.
///
/// Implementations must be shareable across batch workers, so a backend that
/// wraps a mutable session is expected to guard it internally.
pub trait InferenceBackend: Send + Sync {
    /// Run inference with the given named inputs.
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>>;

    /// Get the input names expected by the model.
    fn input_names(&self) -> &[String];

    /// Get the output names produced by the model.
    fn output_names(&self) -> &[String];

    /// Whether the model declares an input with the given name.
    fn accepts_input(&self, name: &str) -> bool {
        self.input_names().iter().any(|n| n == name)
    }
}
