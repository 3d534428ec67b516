//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG, PNG, WebP, GIF or BMP image to RGBA
//! - [`image_orientation`] - Read the EXIF orientation tag without decoding
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@photoedit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsBitmap;
use photoedit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// The format is detected from the content and EXIF orientation is applied,
/// so the result is upright.
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognized
/// - The data is corrupted or truncated
/// - The image has zero width or height
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation tag (1-8) from image bytes.
///
/// Returns 1 (normal) when there is no EXIF data or no orientation tag.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_without_exif_is_normal() {
        assert_eq!(image_orientation(&[0, 1, 2, 3]), 1);
        assert_eq!(image_orientation(&[]), 1);
    }

    #[test]
    fn test_decode_encoded_jpeg() {
        let source = photoedit_core::Bitmap::filled(3, 2, [128, 128, 128, 255]);
        let bytes = photoedit_core::encode_jpeg(&source, 90).unwrap();

        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.byte_length(), 3 * 2 * 4);
    }
}
