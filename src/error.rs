//! Custom error types for leafscan.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error produced by an inference engine implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the leafscan library.
#[derive(Error, Debug)]
pub enum Error {
    /// A bundled asset does not exist at the given path.
    #[error("asset not found: {path}: {source}")]
    AssetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inference engine rejected the model bytes.
    #[error("failed to load model {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The inference call itself failed.
    #[error("model inference failed: {source}")]
    EngineInvocation {
        #[source]
        source: BoxError,
    },

    /// The engine returned a different number of scores than there are labels.
    #[error("engine returned {scores} scores for {labels} labels")]
    DimensionMismatch { labels: usize, scores: usize },

    /// The label file contains no lines.
    #[error("label file {path} contains no labels")]
    EmptyLabels { path: PathBuf },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to decode in-memory image bytes.
    #[error("failed to decode image: {source}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an engine failure raised while running inference.
    pub fn engine<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::EngineInvocation {
            source: source.into(),
        }
    }

    /// Whether this error only affects a single classification call.
    ///
    /// Initialization errors are fatal to the classifier; per-call errors
    /// leave it usable for the next image.
    #[must_use]
    pub const fn is_per_call(&self) -> bool {
        matches!(
            self,
            Self::EngineInvocation { .. }
                | Self::DimensionMismatch { .. }
                | Self::ImageLoad { .. }
                | Self::ImageDecode { .. }
        )
    }
}

/// Result type alias for leafscan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            labels: 5,
            scores: 4,
        };
        assert_eq!(err.to_string(), "engine returned 4 scores for 5 labels");
    }

    #[test]
    fn test_per_call_classification() {
        assert!(Error::engine("boom").is_per_call());
        assert!(Error::DimensionMismatch {
            labels: 1,
            scores: 2
        }
        .is_per_call());
        assert!(!Error::EmptyLabels {
            path: PathBuf::from("labels.txt")
        }
        .is_per_call());
    }
}
