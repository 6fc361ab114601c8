//! Image classification on top of an inference engine.

mod argmax;
mod classify;

pub use argmax::argmax;
pub use classify::{Classifier, ClassifierConfig, Prediction};
