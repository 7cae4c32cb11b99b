//! Tensor types for inference input/output.

use ndarray::{ArrayD, Ix3, IxDyn};

use crate::{InferenceError, Result};

/// Supported tensor element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorType {
    Float32,
    Int64,
}

/// Input tensor for inference.
///
/// Token-classification models only take integer inputs (ids, masks and
/// segment ids), so inputs are always `i64`.
#[derive(Debug, Clone)]
pub struct InputTensor(ArrayD<i64>);

impl InputTensor {
    /// Build a tensor from row-major data and a shape.
    pub fn from_i64(name: &str, data: Vec<i64>, shape: &[usize]) -> Result<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), data)
            .map(Self)
            .map_err(|e| InferenceError::InvalidInput {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Build a `[1, len]` batch from a single token sequence.
    pub fn single_row<I, T>(name: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<i64>,
    {
        let data: Vec<i64> = values.into_iter().map(Into::into).collect();
        let len = data.len();
        Self::from_i64(name, data, &[1, len])
    }

    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Borrow the underlying array.
    pub fn array(&self) -> &ArrayD<i64> {
        &self.0
    }
}

/// Output tensor from inference.
#[derive(Debug, Clone)]
pub enum OutputTensor {
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
}

impl OutputTensor {
    /// Get the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        match self {
            OutputTensor::Float32(arr) => arr.shape(),
            OutputTensor::Int64(arr) => arr.shape(),
        }
    }

    /// Get the element type of the tensor.
    pub fn dtype(&self) -> TensorType {
        match self {
            OutputTensor::Float32(_) => TensorType::Float32,
            OutputTensor::Int64(_) => TensorType::Int64,
        }
    }

    /// Try to get the inner Float32 array.
    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            OutputTensor::Float32(arr) => Some(arr),
            _ => None,
        }
    }

    /// Per-position argmax over the last axis of a `[batch, seq, classes]`
    /// logits tensor, for the first batch row.
    pub fn argmax_last_axis(&self) -> Option<Vec<usize>> {
        let logits = self.as_f32()?.view().into_dimensionality::<Ix3>().ok()?;
        if logits.shape()[0] == 0 {
            return Some(Vec::new());
        }

        let row = logits.index_axis(ndarray::Axis(0), 0);
        let classes = row
            .outer_iter()
            .map(|scores| {
                scores
                    .iter()
                    .enumerate()
                    .fold((0usize, f32::NEG_INFINITY), |best, (i, &s)| {
                        if s > best.1 { (i, s) } else { best }
                    })
                    .0
            })
            .collect();
        Some(classes)
    }
}
