//! Geometric edits: quarter-turn rotation and cropping.
//!
//! Both operations are destructive: they produce a new working bitmap which
//! the edit session then records in its history.
//!
//! # Coordinate System
//!
//! - Rotation is clockwise in 90° steps; the tracked angle stays in [0, 360)
//! - Crop selections are drawn in display coordinates and mapped back to
//!   source pixels through the display's [`ContentScale`]
//! - Origin is top-left corner

mod crop;
mod rotation;

pub use crop::{
    compute_crop, crop_bitmap, ContentScale, CropDrag, CropRect, PixelRect, Point, Size,
};
pub use rotation::{
    next_rotation, normalize_degrees, rotate_cw90, rotate_quarter_turns, ROTATION_STEP,
};
