//! Image loading, orientation, tensor conversion and saving.

#[cfg(test)]
pub(crate) mod fixtures;
mod load;
pub mod orientation;
mod save;
mod tensor;

pub use load::load_image;
pub use orientation::{normalize, read_orientation, OrientationTag};
pub use save::save_image;
pub use tensor::{image_to_tensor, tensor_to_image, Normalization};

use ndarray::Array4;

/// Image tensor in NCHW format (batch, channels, height, width).
///
/// Always kept in standard layout, so the flat order is planar: every red value,
/// then every green value, then every blue value, each plane row-major.
pub type ImageTensor = Array4<f32>;

/// Side of the square input the style model expects.
pub const MODEL_INPUT_SIZE: u32 = 240;

/// Number of color channels fed to the model.
pub const RGB_CHANNELS: usize = 3;

/// Number of `f32` values in a planar tensor for a `side`×`side` image.
#[must_use]
pub const fn tensor_len(side: u32) -> usize {
    RGB_CHANNELS * side as usize * side as usize
}
