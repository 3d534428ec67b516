//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGBA pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsBitmap to JPEG bytes
//!
//! JPEG has no alpha channel; transparent pixels are flattened against black,
//! so a faded image exports darker than it previews over a white page.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@photoedit/wasm';
//!
//! const jpegBytes = encode_jpeg_from_image(image, 100);
//! ```

use crate::types::JsBitmap;
use photoedit_core::{encode, Bitmap};
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100; saved images use 100)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    let bitmap = Bitmap {
        width,
        height,
        pixels: pixels.to_vec(),
    };
    encode::encode_jpeg(&bitmap, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsBitmap to JPEG bytes.
///
/// # Example
///
/// ```typescript
/// const jpeg = encode_jpeg_from_image(image, 100);
/// const blob = new Blob([jpeg], { type: 'image/jpeg' });
/// ```
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.as_bitmap(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Note: Most encode tests use functions that return `Result<T, JsValue>`, which
/// only work on wasm32 targets. For comprehensive encode testing, see the tests
/// in `photoedit_core::encode` which test the underlying functionality.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_from_image_creates_valid_jpeg() {
        let img = JsBitmap::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let jpeg = encode_jpeg_from_image(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_raw_pixels() {
        let pixels = vec![200u8; 8 * 4 * 4];
        let jpeg = encode_jpeg(&pixels, 8, 4, 100).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
