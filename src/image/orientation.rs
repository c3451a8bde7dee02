//! EXIF orientation handling.
//!
//! Phone cameras usually store the sensor image as captured and record the rotation
//! needed to show it upright in EXIF tag 0x0112. Only the pure rotations are acted on;
//! mirrored orientations are treated as unknown and left alone.

use std::io::Cursor;

use image::{imageops, RgbaImage};

/// Rotation needed to display an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationTag {
    /// Already upright.
    Normal,
    /// Rotate 90 degrees clockwise.
    Rotate90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise.
    Rotate270,
    /// Tag missing, unreadable or not a pure rotation.
    #[default]
    Undefined,
}

impl OrientationTag {
    /// Map an EXIF orientation value to a tag.
    #[must_use]
    pub const fn from_exif(value: u32) -> Self {
        match value {
            1 => Self::Normal,
            3 => Self::Rotate180,
            6 => Self::Rotate90,
            8 => Self::Rotate270,
            _ => Self::Undefined,
        }
    }

    /// Dimensions of a `width`×`height` image once normalized with this tag.
    #[must_use]
    pub const fn upright_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Rotate90 | Self::Rotate270 => (height, width),
            Self::Normal | Self::Rotate180 | Self::Undefined => (width, height),
        }
    }
}

/// Read the orientation tag from the raw bytes of an image file.
///
/// Never fails: missing or corrupt EXIF data yields [`OrientationTag::Undefined`].
#[must_use]
pub fn read_orientation(bytes: &[u8]) -> OrientationTag {
    let mut cursor = Cursor::new(bytes);
    let exif = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(err) => {
            tracing::debug!("no readable EXIF data: {err}");
            return OrientationTag::Undefined;
        }
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map_or(OrientationTag::Undefined, OrientationTag::from_exif)
}

/// Rotate `image` so that it displays upright.
///
/// `Normal` and `Undefined` hand the image back untouched. Rotations remap the pixel
/// buffer itself; 90 and 270 swap width and height.
#[must_use]
pub fn normalize(image: RgbaImage, tag: OrientationTag) -> RgbaImage {
    match tag {
        OrientationTag::Normal => image,
        OrientationTag::Undefined => {
            tracing::debug!("orientation unknown, leaving image as is");
            image
        }
        OrientationTag::Rotate90 => {
            tracing::debug!("rotating image by 90 degrees");
            imageops::rotate90(&image)
        }
        OrientationTag::Rotate180 => {
            tracing::debug!("rotating image by 180 degrees");
            imageops::rotate180(&image)
        }
        OrientationTag::Rotate270 => {
            tracing::debug!("rotating image by 270 degrees");
            imageops::rotate270(&image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 3x2 image where every pixel has a distinct value.
    #[allow(clippy::cast_possible_truncation)]
    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(3, 2, |x, y| Rgba([(x * 10 + y) as u8, x as u8, y as u8, 255]))
    }

    #[test]
    fn test_from_exif() {
        assert_eq!(OrientationTag::from_exif(1), OrientationTag::Normal);
        assert_eq!(OrientationTag::from_exif(3), OrientationTag::Rotate180);
        assert_eq!(OrientationTag::from_exif(6), OrientationTag::Rotate90);
        assert_eq!(OrientationTag::from_exif(8), OrientationTag::Rotate270);
        for value in [0, 2, 4, 5, 7, 9, 42] {
            assert_eq!(OrientationTag::from_exif(value), OrientationTag::Undefined);
        }
    }

    #[test]
    fn test_rotate90_convention() {
        let input = gradient();
        let (w, h) = input.dimensions();
        let output = normalize(input.clone(), OrientationTag::Rotate90);

        assert_eq!(output.dimensions(), (h, w));
        for y in 0..output.height() {
            for x in 0..output.width() {
                assert_eq!(output.get_pixel(x, y), input.get_pixel(y, h - 1 - x));
            }
        }
    }

    #[test]
    fn test_rotate180_twice_is_identity() {
        let input = gradient();
        let once = normalize(input.clone(), OrientationTag::Rotate180);
        assert_eq!(once.dimensions(), input.dimensions());
        assert_ne!(once, input);

        let twice = normalize(once, OrientationTag::Rotate180);
        assert_eq!(twice, input);
    }

    #[test]
    fn test_rotate270_thrice_equals_rotate90() {
        let input = gradient();
        let mut rotated = input.clone();
        for _ in 0..3 {
            rotated = normalize(rotated, OrientationTag::Rotate270);
        }
        assert_eq!(rotated, normalize(input, OrientationTag::Rotate90));
    }

    #[test]
    fn test_identity_tags() {
        let input = gradient();
        assert_eq!(normalize(input.clone(), OrientationTag::Normal), input);
        assert_eq!(normalize(input.clone(), OrientationTag::Undefined), input);
        assert_eq!(
            normalize(input.clone(), OrientationTag::from_exif(5)),
            input
        );
    }

    #[test]
    fn test_upright_dimensions() {
        assert_eq!(OrientationTag::Rotate90.upright_dimensions(4, 3), (3, 4));
        assert_eq!(OrientationTag::Rotate270.upright_dimensions(4, 3), (3, 4));
        assert_eq!(OrientationTag::Rotate180.upright_dimensions(4, 3), (4, 3));
        assert_eq!(OrientationTag::Undefined.upright_dimensions(4, 3), (4, 3));
    }

    #[test]
    fn test_read_orientation_from_tiff() {
        let tiff = crate::image::fixtures::orientation_tiff(6);
        assert_eq!(tiff.len(), 26);
        assert_eq!(read_orientation(&tiff), OrientationTag::Rotate90);
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&[]), OrientationTag::Undefined);
        assert_eq!(read_orientation(b"not an image"), OrientationTag::Undefined);
    }
}
