//! Photoedit Core - Photo editing library
//!
//! This crate provides the editing core behind photoedit: a fixed set of
//! color-matrix filters, linear undo/redo history, crop geometry for
//! fill/fit displays, quarter-turn rotation, and background load/save into
//! a gallery.

pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod gallery;
pub mod history;
pub mod session;
#[cfg(not(target_arch = "wasm32"))]
pub mod tasks;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use decode::{decode_image, decode_image_file, Bitmap, DecodeError};
pub use encode::{encode_jpeg, EncodeError};
pub use filter::{apply_filter, ColorMatrix, FilterKind, ParseFilterError};
pub use gallery::{DirectoryGallery, GalleryError, GalleryWriter};
pub use history::{EditHistory, EditSnapshot};
pub use session::{
    CommandOutcome, EditCommand, EditSession, SaveStatus, SessionError, SessionState,
};
pub use transform::{
    compute_crop, crop_bitmap, rotate_cw90, ContentScale, CropRect, PixelRect, Point, Size,
};

/// Crate version, as reported by the CLI and the wasm bindings.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
