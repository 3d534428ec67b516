//! Gallery export.
//!
//! The [`GalleryWriter`] trait is the narrow interface to whatever stores
//! finished images (a platform media store, a directory, a test double).
//! Callers treat any failure as non-fatal: the working image and history
//! are never touched by a save.
//!
//! The production implementation, [`DirectoryGallery`], encodes JPEG and
//! writes `<root>/<folder>/<prefix><unix millis>.jpg`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::info;

use crate::config::EditorConfig;
use crate::decode::Bitmap;
use crate::encode::{encode_jpeg, EncodeError};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("Gallery rejected the image: {0}")]
    Rejected(String),
}

/// Destination for saved images.
pub trait GalleryWriter: Send + Sync {
    /// Store `image` under the given folder label.
    ///
    /// Returns the location of the stored image.
    fn write(&self, image: &Bitmap, folder: &str) -> Result<PathBuf, GalleryError>;
}

/// A gallery backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    root: PathBuf,
    file_prefix: String,
    quality: u8,
}

impl DirectoryGallery {
    /// Create a gallery rooted at `root` with default naming and quality.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &EditorConfig::default())
    }

    /// Create a gallery using the naming and quality from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &EditorConfig) -> Self {
        Self {
            root: root.into(),
            file_prefix: config.file_prefix.clone(),
            quality: config.jpeg_quality,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(&self, millis: u128, attempt: u32) -> String {
        if attempt == 0 {
            format!("{}{}.jpg", self.file_prefix, millis)
        } else {
            format!("{}{}_{}.jpg", self.file_prefix, millis, attempt)
        }
    }
}

impl GalleryWriter for DirectoryGallery {
    fn write(&self, image: &Bitmap, folder: &str) -> Result<PathBuf, GalleryError> {
        let jpeg = encode_jpeg(image, self.quality)?;

        let dir = self.root.join(folder);
        fs::create_dir_all(&dir)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        // Two saves within the same millisecond get a numeric suffix
        let mut attempt = 0;
        let (path, mut file) = loop {
            let path = dir.join(self.file_name(millis, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        };
        file.write_all(&jpeg)?;
        file.sync_all()?;

        info!(path = %path.display(), bytes = jpeg.len(), "image saved to gallery");
        Ok(path)
    }
}
