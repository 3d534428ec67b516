//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{Bitmap, DecodeError, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from the content, so anything the `image` crate
/// was built with (JPEG, PNG, WebP, GIF, BMP) is accepted.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    into_bitmap(apply_orientation(img, orientation))
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    into_bitmap(read_dynamic(bytes)?)
}

/// Read and decode an image file from disk.
///
/// `apply_exif` controls whether the EXIF orientation tag is honored.
pub fn decode_image_file(path: &Path, apply_exif: bool) -> Result<Bitmap, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    if apply_exif {
        decode_image(&bytes)
    } else {
        decode_image_no_orientation(&bytes)
    }
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn into_bitmap(img: DynamicImage) -> Result<Bitmap, DecodeError> {
    let bitmap = Bitmap::from_rgba_image(img.into_rgba8());
    if bitmap.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(bitmap)
}

/// Missing or unreadable EXIF counts as upright.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(_) => Orientation::Upright,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    let turned = match orientation.quarter_turns() {
        1 => img.rotate90(),
        2 => img.rotate180(),
        3 => img.rotate270(),
        _ => img,
    };
    if orientation.is_mirrored() {
        turned.fliph()
    } else {
        turned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 10) as u8, (y * 10) as u8, 7, 255])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// A JPEG carrying an APP1 EXIF segment with the given Orientation tag.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let jpeg =
            crate::encode::encode_jpeg(&Bitmap::filled(width, height, [90, 90, 90, 255]), 90)
                .unwrap();

        // Big-endian TIFF header, one IFD entry: 0x0112 SHORT x1
        let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08\x00\x01\x01\x12\x00\x03\x00\x00\x00\x01".to_vec();
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

        let mut payload = b"Exif\x00\x00".to_vec();
        payload.extend_from_slice(&tiff);
        let segment_len = (payload.len() + 2) as u16;

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_png() {
        let bitmap = decode_image(&png_bytes(6, 4)).unwrap();
        assert_eq!(bitmap.width, 6);
        assert_eq!(bitmap.height, 4);
        assert_eq!(bitmap.pixels.len(), 6 * 4 * 4);
        assert_eq!(bitmap.pixel(2, 1), Some([20, 10, 7, 255]));
    }

    #[test]
    fn test_decode_invalid_data() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_data() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(8, 8);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_defaults_to_normal_without_exif() {
        assert_eq!(get_orientation(&png_bytes(2, 2)), Orientation::Upright);
        assert_eq!(get_orientation(&[1, 2, 3]), Orientation::Upright);
    }

    #[test]
    fn test_orientation_read_from_jpeg_exif() {
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 6)), Orientation::Rotated90);
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 3)), Orientation::Rotated180);
        assert_eq!(get_orientation(&jpeg_with_orientation(4, 2, 1)), Orientation::Upright);
    }

    #[test]
    fn test_decode_jpeg_applies_exif_rotation() {
        let bytes = jpeg_with_orientation(16, 8, 6);

        let upright = decode_image(&bytes).unwrap();
        assert_eq!((upright.width, upright.height), (8, 16));

        let raw = decode_image_no_orientation(&bytes).unwrap();
        assert_eq!((raw.width, raw.height), (16, 8));
    }

    #[test]
    fn test_decode_file_can_skip_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turned.jpg");
        std::fs::write(&path, jpeg_with_orientation(16, 8, 8)).unwrap();

        let corrected = decode_image_file(&path, true).unwrap();
        assert_eq!((corrected.width, corrected.height), (8, 16));
        let raw = decode_image_file(&path, false).unwrap();
        assert_eq!((raw.width, raw.height), (16, 8));
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(10, 4));
        let rotated = apply_orientation(img, Orientation::Rotated90);
        assert_eq!((rotated.width(), rotated.height()), (4, 10));
    }

    #[test]
    fn test_decode_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        std::fs::write(&path, png_bytes(5, 3)).unwrap();

        let bitmap = decode_image_file(&path, true).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (5, 3));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_image_file(Path::new("/nonexistent/photo.jpg"), true);
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }
}
