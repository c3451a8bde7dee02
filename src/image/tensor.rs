//! Conversion between RGBA images and planar model tensors.

use std::borrow::Cow;

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use ndarray::Array4;

use crate::error::{Error, Result};

use super::{tensor_len, ImageTensor, RGB_CHANNELS};

/// Per-channel normalization applied when encoding: `(value / 255 - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Mean for R, G and B.
    pub mean: [f32; 3],
    /// Standard deviation for R, G and B.
    pub std: [f32; 3],
}

impl Default for Normalization {
    /// Maps `[0, 255]` onto `[-1, 1]`.
    fn default() -> Self {
        Self {
            mean: [0.5; 3],
            std: [0.5; 3],
        }
    }
}

impl Normalization {
    /// Validate the normalization parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a mean is not finite or a std is not finite and positive.
    pub fn validate(&self) -> Result<()> {
        for (i, (&mean, &std)) in self.mean.iter().zip(&self.std).enumerate() {
            if !mean.is_finite() {
                return Err(Error::InvalidParameter {
                    name: format!("mean[{i}]"),
                    reason: format!("must be finite, got {mean}"),
                });
            }
            if !std.is_finite() || std <= 0.0 {
                return Err(Error::InvalidParameter {
                    name: format!("std[{i}]"),
                    reason: format!("must be finite and greater than 0, got {std}"),
                });
            }
        }
        Ok(())
    }
}

/// Convert an image to a normalized `(1, 3, side, side)` tensor.
///
/// The image is resized directly to `side`×`side` (no crop, aspect ratio is not kept)
/// with a bilinear filter, alpha is dropped, and each channel is normalized into its
/// own plane.
///
/// # Errors
///
/// Returns an error if the image has zero area, `side` is zero or the normalization
/// is invalid.
#[allow(clippy::cast_possible_truncation)]
pub fn image_to_tensor(image: &RgbaImage, side: u32, norm: &Normalization) -> Result<ImageTensor> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage {
            width,
            height,
            reason: "image has zero area".to_string(),
        });
    }
    if side == 0 {
        return Err(Error::InvalidParameter {
            name: "side".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    norm.validate()?;

    let resized: Cow<'_, RgbaImage> = if (width, height) == (side, side) {
        Cow::Borrowed(image)
    } else {
        tracing::debug!("resizing {width}x{height} input to {side}x{side}");
        Cow::Owned(imageops::resize(image, side, side, FilterType::Triangle))
    };

    let size = side as usize;
    let mut tensor = Array4::<f32>::zeros((1, RGB_CHANNELS, size, size));

    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..RGB_CHANNELS {
            tensor[[0, c, y, x]] = (f32::from(pixel[c]) / 255.0 - norm.mean[c]) / norm.std[c];
        }
    }

    Ok(tensor)
}

/// Convert a planar tensor with values in [-1, 1] to an opaque `side`×`side` image.
///
/// Only the element count is checked; any shape holding `3 * side * side` values is
/// read in its logical (row-major) order.
///
/// # Errors
///
/// Returns an error if `side` is zero or the tensor does not hold exactly
/// `3 * side * side` values.
pub fn tensor_to_image(tensor: &ImageTensor, side: u32) -> Result<RgbaImage> {
    if side == 0 {
        return Err(Error::InvalidParameter {
            name: "side".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    let expected = tensor_len(side);
    if tensor.len() != expected {
        return Err(Error::ShapeMismatch {
            expected: format!("{expected} values (3x{side}x{side})"),
            actual: format!("{} values {:?}", tensor.len(), tensor.shape()),
        });
    }

    let standard = tensor.as_standard_layout();
    let data = standard.as_slice().ok_or_else(|| Error::ShapeMismatch {
        expected: "contiguous tensor".to_string(),
        actual: "non-contiguous tensor".to_string(),
    })?;

    let plane = expected / RGB_CHANNELS;
    let (red, rest) = data.split_at(plane);
    let (green, blue) = rest.split_at(plane);

    let mut img = RgbaImage::new(side, side);
    for (pixel, ((&r, &g), &b)) in img.pixels_mut().zip(red.iter().zip(green).zip(blue)) {
        *pixel = Rgba([denormalize(r), denormalize(g), denormalize(b), u8::MAX]);
    }

    Ok(img)
}

/// Denormalize a value from [-1, 1] to [0, 255], rounding and clamping.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn denormalize(value: f32) -> u8 {
    // NaN survives the clamp and casts to 0.
    ((value + 1.0) / 2.0 * 255.0).round().clamp(0.0, 255.0) as u8
}
