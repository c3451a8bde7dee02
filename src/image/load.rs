//! Image loading utilities.

use std::fs;
use std::path::Path;

use image::RgbaImage;

use crate::error::{Error, Result};

use super::orientation::{read_orientation, OrientationTag};

/// Load an image from disk together with its EXIF orientation.
///
/// The image is returned as stored, without applying the orientation. Files without
/// usable EXIF data get [`OrientationTag::Undefined`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<(RgbaImage, OrientationTag)> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&bytes).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let orientation = read_orientation(&bytes);
    tracing::debug!(
        "loaded {} ({}x{}, orientation {orientation:?})",
        path.display(),
        img.width(),
        img.height()
    );

    Ok((img.to_rgba8(), orientation))
}
