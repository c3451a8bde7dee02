//! Test images carrying EXIF orientation.

use image::{codecs::jpeg::JpegEncoder, DynamicImage, Rgb, RgbImage};

/// Little-endian TIFF block with a single IFD0 entry: Orientation (SHORT) = `value`.
pub fn orientation_tiff(value: u16) -> Vec<u8> {
    let mut tiff = vec![0x49, 0x49, 0x2a, 0x00, 0x08, 0x00, 0x00, 0x00];
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&[0x00, 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    tiff
}

/// Solid-color JPEG with an APP1 Exif segment right after SOI.
#[allow(clippy::cast_possible_truncation)]
pub fn jpeg_with_orientation(width: u32, height: u32, value: u16) -> Vec<u8> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, 95);
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([40, 160, 220])))
        .write_with_encoder(encoder)
        .expect("encode jpeg");

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&orientation_tiff(value));

    let mut app1 = vec![0xff, 0xe1];
    app1.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    app1.extend_from_slice(&payload);

    assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
    let tail = jpeg.split_off(2);
    jpeg.extend(app1);
    jpeg.extend(tail);
    jpeg
}
