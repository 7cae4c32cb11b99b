//! ONNX Runtime (ort) backend.

use std::path::Path;
use std::sync::Mutex;

use ndarray::ArrayD;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use tracing::debug;

use crate::error::InferenceError;
use crate::tensor::{InputTensor, OutputTensor};
use crate::{InferenceBackend, Result};

/// Session tuning applied when a model is loaded.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Threads used inside a single operator.
    pub intra_threads: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

/// Backend using ONNX Runtime for native inference.
pub struct OrtBackend {
    session: Mutex<Session>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl OrtBackend {
    /// Load a model from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P, options: SessionOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading ONNX model from: {}", path.display());

        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    /// Load a model from bytes.
    pub fn from_bytes(bytes: &[u8], options: SessionOptions) -> Result<Self> {
        debug!("Loading ONNX model from {} bytes", bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError::Session(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Session(e.to_string()))?
            .with_intra_threads(options.intra_threads.max(1))
            .map_err(|e| InferenceError::Session(e.to_string()))?
            .commit_from_memory(bytes)
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?;

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|i| i.name().to_string())
            .collect();

        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|o| o.name().to_string())
            .collect();

        debug!("Model inputs: {:?}", input_names);
        debug!("Model outputs: {:?}", output_names);

        Ok(Self {
            session: Mutex::new(session),
            input_names,
            output_names,
        })
    }

    fn convert_input(name: &str, tensor: &InputTensor) -> Result<SessionInputValue<'static>> {
        let shape: Vec<i64> = tensor.shape().iter().map(|&s| s as i64).collect();
        let data: Vec<i64> = tensor.array().iter().copied().collect();
        Tensor::from_array((shape, data))
            .map(Into::into)
            .map_err(|e| InferenceError::InvalidInput {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

impl InferenceBackend for OrtBackend {
    fn run(&self, inputs: &[(&str, InputTensor)]) -> Result<Vec<(String, OutputTensor)>> {
        let ort_inputs: Vec<(&str, SessionInputValue<'static>)> = inputs
            .iter()
            .map(|(name, tensor)| Ok((*name, Self::convert_input(name, tensor)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::Run(format!("session lock poisoned: {}", e)))?;

        let outputs = session
            .run(ort_inputs)
            .map_err(|e| InferenceError::Run(e.to_string()))?;

        let mut results = Vec::with_capacity(outputs.len());

        for (name, value) in outputs.iter() {
            let tensor = if let Ok((shape, data)) = value.try_extract_tensor::<f32>() {
                let shape: Vec<usize> = shape.iter().map(|&s| s as usize).collect();
                ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data.to_vec())
                    .map(OutputTensor::Float32)
                    .map_err(|_| InferenceError::UnsupportedOutput(name.to_string()))?
            } else if let Ok((shape, data)) = value.try_extract_tensor::<i64>() {
                let shape: Vec<usize> = shape.iter().map(|&s| s as usize).collect();
                ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data.to_vec())
                    .map(OutputTensor::Int64)
                    .map_err(|_| InferenceError::UnsupportedOutput(name.to_string()))?
            } else {
                return Err(InferenceError::UnsupportedOutput(name.to_string()));
            };

            results.push((name.to_string(), tensor));
        }

        Ok(results)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
