//! Editor configuration.
//!
//! Loaded from a TOML file. Every key is optional; unknown keys are rejected
//! to catch typos early.
//!
//! ```toml
//! gallery_folder = "Pictures/PhotoEditorCompose"  # relative to the gallery root
//! file_prefix = "PhotoEditor_"                    # saved as <prefix><unix millis>.jpg
//! jpeg_quality = 100                              # 1-100
//! history_limit = 50                              # omit for unlimited undo
//! apply_exif_orientation = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

use crate::encode::EXPORT_QUALITY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Destination folder label, relative to the gallery root.
    pub gallery_folder: String,
    /// File name prefix for saved images.
    pub file_prefix: String,
    /// JPEG quality for saved images (1-100).
    pub jpeg_quality: u8,
    /// Maximum number of undo snapshots, `None` for unlimited.
    pub history_limit: Option<usize>,
    /// Honor the EXIF orientation tag when loading images.
    pub apply_exif_orientation: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gallery_folder: "Pictures/PhotoEditorCompose".to_string(),
            file_prefix: "PhotoEditor_".to_string(),
            jpeg_quality: EXPORT_QUALITY,
            history_limit: None,
            apply_exif_orientation: true,
        }
    }
}

impl EditorConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a config file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Validation(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Validation(
                "history_limit must be at least 1".into(),
            ));
        }
        if self.file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "file_prefix must not be empty".into(),
            ));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "file_prefix must not contain path separators".into(),
            ));
        }
        let folder = Path::new(&self.gallery_folder);
        if !folder
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(format!(
                "gallery_folder must be a relative path without '..', got {:?}",
                self.gallery_folder
            )));
        }
        Ok(())
    }
}
