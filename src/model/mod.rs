//! Inference engine boundary.

mod onnx;

pub use onnx::OnnxEngine;

use crate::error::BoxError;
use crate::image::InputTensor;

/// A loaded model that maps an input tensor to one score per label.
///
/// `infer` takes `&self` so a single engine can serve every classification
/// call without external locking.
pub trait InferenceEngine: Sized {
    /// Build the engine from raw model bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a model this engine accepts.
    fn from_model_bytes(bytes: &[u8]) -> Result<Self, BoxError>;

    /// Run the model on one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the forward pass fails.
    fn infer(&self, input: &InputTensor) -> Result<Vec<f32>, BoxError>;
}
