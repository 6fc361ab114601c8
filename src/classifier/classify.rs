//! The classifier: preprocess, infer, pick the best label.

use std::path::PathBuf;

use image::DynamicImage;

use crate::assets::{self, AssetStore, LabelList};
use crate::error::{Error, Result};
use crate::image::{preprocess, InputTensor, ResizeFilter, DEFAULT_INPUT_SIZE};
use crate::model::InferenceEngine;

use super::argmax;

/// Configuration for building a [`Classifier`] from bundled assets.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Model file, relative to the asset store.
    pub model_path: PathBuf,

    /// Label file, relative to the asset store.
    pub label_path: PathBuf,

    /// Side of the square image the model expects.
    pub input_size: u32,

    /// Filter used when scaling images to `input_size`.
    pub filter: ResizeFilter,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            label_path: PathBuf::from("labels.txt"),
            input_size: DEFAULT_INPUT_SIZE,
            filter: ResizeFilter::default(),
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        validate_input_size(self.input_size)?;

        if self.model_path.as_os_str().is_empty() {
            return Err(Error::InvalidParameter {
                name: "model_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.label_path.as_os_str().is_empty() {
            return Err(Error::InvalidParameter {
                name: "label_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_input_size(input_size: u32) -> Result<()> {
    if input_size == 0 {
        return Err(Error::InvalidParameter {
            name: "input_size".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

/// Winning class of a classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Position in the label list and score vector.
    pub index: usize,
    pub label: String,
    /// Raw engine score; not necessarily a probability.
    pub score: f32,
}

/// Image classifier holding a loaded engine and its labels.
///
/// Immutable once built. Share it by reference (or `Arc`) between callers.
#[derive(Debug)]
pub struct Classifier<E> {
    engine: E,
    labels: LabelList,
    input_size: u32,
    filter: ResizeFilter,
}

impl<E: InferenceEngine> Classifier<E> {
    /// Load the model and labels from `store` and build a classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an asset cannot
    /// be loaded.
    pub fn new<S>(store: &S, config: &ClassifierConfig) -> Result<Self>
    where
        S: AssetStore + ?Sized,
    {
        config.validate()?;

        tracing::info!(
            "Initializing classifier: model={}, labels={}, input={}x{}",
            config.model_path.display(),
            config.label_path.display(),
            config.input_size,
            config.input_size
        );

        let (engine, labels) =
            assets::load_assets(store, &config.model_path, &config.label_path)?;

        Ok(Self::from_parts(engine, labels, config.input_size)?.with_filter(config.filter))
    }

    /// Build a classifier from an engine and labels loaded elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_size` is zero or `labels` is empty.
    pub fn from_parts(engine: E, labels: LabelList, input_size: u32) -> Result<Self> {
        validate_input_size(input_size)?;

        if labels.is_empty() {
            return Err(Error::InvalidParameter {
                name: "labels".to_string(),
                reason: "must contain at least one label".to_string(),
            });
        }

        Ok(Self {
            engine,
            labels,
            input_size,
            filter: ResizeFilter::default(),
        })
    }

    /// Use a different resize filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Classify an image and return the best label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an image with no pixels,
    /// [`Error::EngineInvocation`] if inference fails and
    /// [`Error::DimensionMismatch`] if the engine does not return one score
    /// per label.
    pub fn recognize(&self, img: &DynamicImage) -> Result<String> {
        self.classify(img).map(|prediction| prediction.label)
    }

    /// Classify an image and return the best label with its score.
    ///
    /// # Errors
    ///
    /// See [`Classifier::recognize`].
    pub fn classify(&self, img: &DynamicImage) -> Result<Prediction> {
        if img.width() == 0 || img.height() == 0 {
            return Err(Error::InvalidParameter {
                name: "image".to_string(),
                reason: format!("has zero size ({}x{})", img.width(), img.height()),
            });
        }

        let tensor = self.preprocess(img);
        self.classify_tensor(&tensor)
    }

    /// Classify an already preprocessed tensor.
    ///
    /// # Errors
    ///
    /// See [`Classifier::recognize`].
    pub fn classify_tensor(&self, tensor: &InputTensor) -> Result<Prediction> {
        let scores = self.engine.infer(tensor).map_err(Error::engine)?;
        let prediction = self.select(&scores)?;

        tracing::debug!(
            "Predicted {:?} (index {}, score {:.4})",
            prediction.label,
            prediction.index,
            prediction.score
        );

        Ok(prediction)
    }

    /// Resize and normalize an image the way the model expects.
    #[must_use]
    pub fn preprocess(&self, img: &DynamicImage) -> InputTensor {
        preprocess(img, self.input_size, self.filter)
    }

    fn select(&self, scores: &[f32]) -> Result<Prediction> {
        if scores.len() != self.labels.len() {
            return Err(Error::DimensionMismatch {
                labels: self.labels.len(),
                scores: scores.len(),
            });
        }

        // Lengths match and labels are never empty
        let index = argmax(scores).ok_or(Error::DimensionMismatch {
            labels: self.labels.len(),
            scores: 0,
        })?;

        Ok(Prediction {
            index,
            label: self.labels[index].to_string(),
            score: scores[index],
        })
    }

    #[must_use]
    pub fn labels(&self) -> &LabelList {
        &self.labels
    }

    #[must_use]
    pub const fn input_size(&self) -> u32 {
        self.input_size
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }
}
