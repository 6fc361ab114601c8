//! Image loading and tensor preprocessing.

mod load;
mod tensor;

pub use load::{decode_image, load_image};
pub use tensor::{preprocess, InputTensor, ResizeFilter};

/// Number of channels fed to the model (alpha is dropped).
pub const RGB_CHANNELS: usize = 3;

/// Default square input resolution of the bundled model.
pub const DEFAULT_INPUT_SIZE: u32 = 224;
