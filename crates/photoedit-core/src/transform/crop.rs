//! Crop geometry: mapping an on-screen selection back to source pixels.
//!
//! The user drags a rectangle over the displayed image. The display scales
//! the image uniformly into its container, either covering it (`Fill`, the
//! overflow cropped symmetrically) or fitting inside it (`Fit`, letterboxed
//! symmetrically). Converting the selection to source pixels undoes that
//! scaling:
//!
//! ```text
//! scale    = max(cw / iw, ch / ih)        (Fill)
//!          = min(cw / iw, ch / ih)        (Fit)
//! offset   = (image - container / scale) / 2       per axis
//! source   = offset + display / scale
//! ```
//!
//! Under `Fit` the offset is negative: the letterbox padding maps to
//! coordinates left of / above the image and is clamped away.

use serde::{Deserialize, Serialize};

use crate::decode::{Bitmap, CHANNELS};

/// A point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either side is zero (or negative).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// How the image is scaled into its display container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentScale {
    /// Cover the container; overflow is cropped symmetrically.
    #[default]
    Fill,
    /// Fit inside the container; unused space is split symmetrically.
    Fit,
}

/// A normalized selection rectangle in display coordinates.
///
/// Invariant: `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropRect {
    /// Build a rectangle from two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(left, top), Point::new(left + width, top + height))
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True if the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Tracks a drag gesture that draws a crop selection.
///
/// The gesture starts at one point and accumulates movement deltas; after
/// every move the selection is the normalized rectangle between the start
/// point and the current end point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropDrag {
    start: Point,
    end: Point,
}

impl CropDrag {
    /// Start a drag at `at`; the selection is initially empty.
    pub fn begin(at: Point) -> Self {
        Self { start: at, end: at }
    }

    /// Move the end point by a delta and return the updated selection.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> CropRect {
        self.end.x += dx;
        self.end.y += dy;
        self.rect()
    }

    /// The current selection.
    pub fn rect(&self) -> CropRect {
        CropRect::from_corners(self.start, self.end)
    }
}

/// An integer rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Map a display-space selection to a source-pixel rectangle.
///
/// # Arguments
///
/// * `rect` - Selection in display coordinates, relative to the container
/// * `container` - Size of the display container
/// * `image_width` / `image_height` - Source image size in pixels
/// * `mode` - How the image is scaled into the container
///
/// # Returns
///
/// The clamped pixel rectangle, or `None` when the geometry is degenerate
/// (empty selection, empty container, empty image, or a selection that
/// rounds to zero pixels). Callers treat `None` as "skip the crop".
pub fn compute_crop(
    rect: &CropRect,
    container: Size,
    image_width: u32,
    image_height: u32,
    mode: ContentScale,
) -> Option<PixelRect> {
    if rect.is_empty() || container.is_empty() || image_width == 0 || image_height == 0 {
        return None;
    }

    let src_w = image_width as f64;
    let src_h = image_height as f64;

    let scale_x = container.width / src_w;
    let scale_y = container.height / src_h;
    let scale = match mode {
        ContentScale::Fill => scale_x.max(scale_y),
        ContentScale::Fit => scale_x.min(scale_y),
    };

    let offset_x = (src_w - container.width / scale) / 2.0;
    let offset_y = (src_h - container.height / scale) / 2.0;

    let left_src = offset_x + rect.left / scale;
    let top_src = offset_y + rect.top / scale;
    let width_src = rect.width() / scale;
    let height_src = rect.height() / scale;

    let left = (left_src.max(0.0).round() as u32).min(image_width - 1);
    let top = (top_src.max(0.0).round() as u32).min(image_height - 1);
    let width = (width_src.round() as u32).min(image_width - left);
    let height = (height_src.round() as u32).min(image_height - top);

    if width == 0 || height == 0 {
        return None;
    }

    Some(PixelRect {
        x: left,
        y: top,
        width,
        height,
    })
}

/// Copy a pixel region out of an image.
///
/// The region is clamped to the image bounds; the output is at least 1×1
/// for a non-empty source.
pub fn crop_bitmap(image: &Bitmap, rect: &PixelRect) -> Bitmap {
    let px_left = rect.x.min(image.width.saturating_sub(1));
    let px_top = rect.y.min(image.height.saturating_sub(1));
    let px_right = px_left.saturating_add(rect.width).min(image.width);
    let px_bottom = px_top.saturating_add(rect.height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1) as usize;
    let out_height = px_bottom.saturating_sub(px_top).max(1) as usize;
    let src_stride = image.width as usize * CHANNELS;
    let row_bytes = out_width * CHANNELS;

    let mut output = Vec::with_capacity(out_width * out_height * CHANNELS);
    for y in 0..out_height {
        let start = (px_top as usize + y) * src_stride + px_left as usize * CHANNELS;
        match image.pixels.get(start..start + row_bytes) {
            Some(row) => output.extend_from_slice(row),
            None => output.resize(output.len() + row_bytes, 0),
        }
    }

    Bitmap {
        width: out_width as u32,
        height: out_height as u32,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
