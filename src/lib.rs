//! # leafscan
//!
//! Classify a photo with a pretrained image model bundled alongside the
//! application.
//!
//! The model and its label list are loaded once from an [`AssetStore`]. Each
//! call to [`Classifier::recognize`] scales the image to the model's square
//! input, normalizes the RGB channels to `[0, 1]`, runs the
//! [`InferenceEngine`] and returns the label with the highest score.
//!
//! ## Example
//!
//! ```no_run
//! use leafscan::{Classifier, ClassifierConfig, DirAssets, OnnxEngine};
//!
//! # fn main() -> leafscan::Result<()> {
//! let assets = DirAssets::new("assets");
//! let classifier = Classifier::<OnnxEngine>::new(&assets, &ClassifierConfig::default())?;
//!
//! let photo = leafscan::image::load_image("leaf.jpg")?;
//! println!("{}", classifier.recognize(&photo)?);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod classifier;
pub mod error;
pub mod image;
pub mod model;

pub use assets::{AssetStore, DirAssets, LabelList, MemoryAssets};
pub use classifier::{argmax, Classifier, ClassifierConfig, Prediction};
pub use error::{Error, Result};
pub use image::{InputTensor, ResizeFilter};
pub use model::{InferenceEngine, OnnxEngine};
