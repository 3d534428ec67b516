//! The in-memory raster and the errors and metadata that come with decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Why an image could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Unrecognized container or codec.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// Recognized, but the decoder gave up.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has no pixels.
    #[error("Decoded image is empty")]
    EmptyImage,

    /// The file could not be read.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// How a camera stored the image relative to upright, from the EXIF
/// `Orientation` tag. Discriminants are the tag values.
///
/// Every value decomposes into clockwise quarter turns followed by an
/// optional horizontal mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Upright = 1,
    Mirrored = 2,
    Rotated180 = 3,
    MirroredVertical = 4,
    MirroredRotated90 = 5,
    Rotated90 = 6,
    MirroredRotated270 = 7,
    Rotated270 = 8,
}

impl Orientation {
    /// Map a raw tag value; anything outside 1-8 counts as upright.
    pub fn from_exif(value: u32) -> Self {
        use Orientation::*;
        [
            Upright,
            Mirrored,
            Rotated180,
            MirroredVertical,
            MirroredRotated90,
            Rotated90,
            MirroredRotated270,
            Rotated270,
        ]
        .get((value as usize).wrapping_sub(1))
        .copied()
        .unwrap_or_default()
    }

    /// Clockwise quarter turns needed to make the image upright.
    pub fn quarter_turns(self) -> u32 {
        match self {
            Orientation::Upright | Orientation::Mirrored => 0,
            Orientation::Rotated90 | Orientation::MirroredRotated90 => 1,
            Orientation::Rotated180 | Orientation::MirroredVertical => 2,
            Orientation::Rotated270 | Orientation::MirroredRotated270 => 3,
        }
    }

    /// Whether a horizontal mirror follows the turns.
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::Mirrored
                | Orientation::MirroredVertical
                | Orientation::MirroredRotated90
                | Orientation::MirroredRotated270
        )
    }
}

/// An in-memory RGBA raster.
///
/// Pixels are stored row-major, 4 bytes per pixel (R, G, B, A). A `Bitmap`
/// is always owned by exactly one holder; anything that needs to retain the
/// pixels (history snapshots, background saves) takes its own clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data, length `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a bitmap where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a Bitmap from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGBA value at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.pixels.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of the pixel buffer.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// True when there is nothing to edit.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() || self.pixel_count() == 0
    }
}
