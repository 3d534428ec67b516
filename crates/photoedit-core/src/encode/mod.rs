//! Image encoding for photoedit.
//!
//! This module provides functionality for:
//! - Encoding edited bitmaps to JPEG for the gallery (quality 100 by default)
//!
//! # Examples
//!
//! ```ignore
//! use photoedit_core::decode::Bitmap;
//! use photoedit_core::encode::{encode_jpeg, EXPORT_QUALITY};
//!
//! let bitmap = Bitmap::filled(100, 100, [128, 128, 128, 255]);
//! let jpeg_bytes = encode_jpeg(&bitmap, EXPORT_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, EXPORT_QUALITY};
