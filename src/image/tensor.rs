//! Conversion of images into the model's input tensor.

use image::{imageops::FilterType, DynamicImage};
use ndarray::{Array4, ArrayView4};

use super::RGB_CHANNELS;

/// Resampling filter used to scale images to the model resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeFilter {
    Nearest,
    /// Linear interpolation; closest to the platform bitmap scaler.
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => Self::Nearest,
            ResizeFilter::Bilinear => Self::Triangle,
            ResizeFilter::CatmullRom => Self::CatmullRom,
            ResizeFilter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Normalized image tensor in NHWC layout `(1, side, side, 3)`.
///
/// The backing array is always in standard layout, so its flat view is the
/// pixels in row-major order with R, G, B interleaved per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Array4<f32>,
}

impl InputTensor {
    /// Side length of the square image.
    #[must_use]
    pub fn side(&self) -> usize {
        self.data.dim().1
    }

    /// Number of `f32` values, `3 * side * side`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape as `[batch, height, width, channels]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 4] {
        let (n, h, w, c) = self.data.dim();
        [n, h, w, c]
    }

    /// Flat channel-interleaved values.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        self.data
            .as_slice()
            .unwrap_or_else(|| unreachable!("input tensor is built in standard layout"))
    }

    #[must_use]
    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// Raw buffer in native byte order, for engines that consume bytes.
    #[must_use]
    pub fn to_native_bytes(&self) -> Vec<u8> {
        self.as_slice().iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[must_use]
    pub fn into_array(self) -> Array4<f32> {
        self.data
    }
}

/// Resize an image to `size x size` and normalize it to `[0, 1]`.
///
/// Alpha is discarded; each R, G, B byte is divided by 255.
#[must_use]
pub fn preprocess(img: &DynamicImage, size: u32, filter: ResizeFilter) -> InputTensor {
    let rgb = img.resize_exact(size, size, filter.into()).to_rgb8();

    let side = size as usize;
    let values: Vec<f32> = rgb
        .into_raw()
        .into_iter()
        .map(|channel| f32::from(channel) / 255.0)
        .collect();

    let data = Array4::from_shape_vec((1, side, side, RGB_CHANNELS), values)
        .unwrap_or_else(|_| unreachable!("rgb8 buffer holds side * side * 3 bytes"));

    InputTensor { data }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn test_tensor_shape() {
        let img = DynamicImage::new_rgb8(100, 60);
        let tensor = preprocess(&img, 224, ResizeFilter::default());

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.len(), 3 * 224 * 224);
        assert_eq!(tensor.side(), 224);
    }

    #[test]
    fn test_normalization_range() {
        let img = RgbImage::from_fn(37, 53, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
        });
        let tensor = preprocess(&DynamicImage::ImageRgb8(img), 32, ResizeFilter::Lanczos3);

        assert!(tensor.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_channel_order_and_alpha_dropped() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 51, 0]));
        let tensor = preprocess(&DynamicImage::ImageRgba8(img), 2, ResizeFilter::Nearest);

        for pixel in tensor.as_slice().chunks(3) {
            assert!((pixel[0] - 1.0).abs() < f32::EPSILON);
            assert!(pixel[1].abs() < f32::EPSILON);
            assert!((pixel[2] - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_row_major_pixel_order() {
        // 2x2 image, nearest filter at the same size keeps pixels as-is
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 255, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));

        let tensor = preprocess(&DynamicImage::ImageRgb8(img), 2, ResizeFilter::Nearest);

        assert_eq!(
            tensor.as_slice(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert!((tensor.view()[[0, 0, 1, 0]] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_view_is_contiguous() {
        let img = DynamicImage::new_rgb8(5, 7);
        let tensor = preprocess(&img, 6, ResizeFilter::default());

        assert!(tensor.view().is_standard_layout());
        assert_eq!(tensor.view().as_slice().map(<[f32]>::len), Some(3 * 6 * 6));
    }

    #[test]
    fn test_native_bytes() {
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
        let tensor = preprocess(&DynamicImage::ImageRgb8(img), 1, ResizeFilter::Nearest);

        let bytes = tensor.to_native_bytes();
        assert_eq!(bytes.len(), 4 * 3);
        assert_eq!(&bytes[..4], &1.0_f32.to_ne_bytes());
    }
}
