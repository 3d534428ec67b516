//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core photoedit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use photoedit_core::Bitmap;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`, ready for `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// A buffer of the wrong length is padded with transparent black or
    /// truncated.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, mut pixels: Vec<u8>) -> JsBitmap {
        let expected = width as usize * height as usize * 4;
        pixels.resize(expected, 0);
        JsBitmap {
            inner: Bitmap::new(width, height, pixels),
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn as_bitmap(&self) -> &Bitmap {
        &self.inner
    }
}
