//! JPEG encoding for gallery export.
//!
//! JPEG has no alpha channel, so RGBA bitmaps are flattened against black
//! before encoding: each color channel is multiplied by `alpha / 255`. A
//! bitmap whose alpha was reduced by a filter (fade) therefore saves darker,
//! matching how premultiplied platform bitmaps are written out.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{Bitmap, CHANNELS};

/// Quality used for gallery exports.
pub const EXPORT_QUALITY: u8 = 100;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA bitmap to JPEG bytes.
///
/// # Arguments
///
/// * `bitmap` - Source image (alpha is flattened against black)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero-sized bitmaps and
/// `EncodeError::InvalidPixelData` when the buffer length doesn't match.
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (bitmap.width, bitmap.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = bitmap.pixel_count() * CHANNELS;
    if bitmap.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: bitmap.pixels.len(),
        });
    }

    let rgb = flatten_alpha(&bitmap.pixels);
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Drop alpha by compositing RGBA pixels onto black.
fn flatten_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / CHANNELS * 3);
    for px in rgba.chunks_exact(CHANNELS) {
        let alpha = px[3] as u32;
        if alpha == 255 {
            rgb.extend_from_slice(&px[..3]);
        } else {
            for &c in &px[..3] {
                // Rounded c * alpha / 255
                rgb.push(((c as u32 * alpha + 127) / 255) as u8);
            }
        }
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces a well-framed JPEG for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 1u8..=100,
            alpha in any::<u8>(),
        ) {
            let bitmap = Bitmap::filled(width, height, [90, 160, 30, alpha]);
            let jpeg_bytes = encode_jpeg(&bitmap, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Flattening never brightens a channel.
        #[test]
        fn prop_flatten_never_brightens(px in any::<[u8; 4]>()) {
            let out = flatten_alpha(&px);
            for c in 0..3 {
                prop_assert!(out[c] <= px[c]);
            }
        }
    }
}
