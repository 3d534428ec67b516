//! Image decoding for photoedit.
//!
//! This module turns the bytes handed over by an image picker into the RGBA
//! [`Bitmap`] the rest of the crate edits:
//! - Format sniffing and decoding through the `image` crate
//! - EXIF orientation correction (optional)
//!
//! Decoding is synchronous. Native front-ends run it off the interactive
//! thread through [`crate::tasks::load_image`].
//!
//! # Examples
//!
//! ```ignore
//! use photoedit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{
    decode_image, decode_image_file, decode_image_no_orientation, get_orientation,
};
pub use types::{Bitmap, DecodeError, Orientation, CHANNELS};
