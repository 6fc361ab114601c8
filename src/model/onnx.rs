//! ONNX Runtime backed engine.

use std::sync::Mutex;

use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

use crate::error::BoxError;
use crate::image::InputTensor;

use super::InferenceEngine;

/// Engine running an ONNX model through ONNX Runtime.
///
/// The model takes a single `(1, side, side, 3)` f32 input and its first
/// output holds the class scores.
pub struct OnnxEngine {
    session: Mutex<Session>,
}

impl std::fmt::Debug for OnnxEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEngine").finish_non_exhaustive()
    }
}

impl InferenceEngine for OnnxEngine {
    fn from_model_bytes(bytes: &[u8]) -> Result<Self, BoxError> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_memory(bytes)?;

        tracing::debug!(
            "ONNX session ready: {} input(s), {} output(s)",
            session.inputs.len(),
            session.outputs.len()
        );

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn infer(&self, input: &InputTensor) -> Result<Vec<f32>, BoxError> {
        let input_value = TensorRef::from_array_view(input.view())?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| "inference session lock poisoned")?;

        let outputs = session.run(ort::inputs![input_value])?;

        // Get first output
        let output = outputs
            .values()
            .next()
            .ok_or("model produced no outputs")?;

        // Scores are (1, classes) or (classes); flatten either way
        let (_, scores) = output.try_extract_tensor::<f32>()?;

        Ok(scores.to_vec())
    }
}
