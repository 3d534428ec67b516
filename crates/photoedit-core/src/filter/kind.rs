//! The closed set of color filters and their coefficient table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ColorMatrix;

/// Error returned when a filter name doesn't match any [`FilterKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown filter: {0}")]
pub struct ParseFilterError(pub String);

/// A named color filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// No filter; the image is left untouched.
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Vintage,
    Cool,
    Warm,
    Bright,
    Dark,
    Contrast,
    Saturate,
    Vivid,
    Fade,
    BlueTint,
    RedTint,
}

impl FilterKind {
    /// Every filter, in the order a picker lists them.
    pub const ALL: [FilterKind; 15] = [
        FilterKind::None,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Vintage,
        FilterKind::Cool,
        FilterKind::Warm,
        FilterKind::Bright,
        FilterKind::Dark,
        FilterKind::Contrast,
        FilterKind::Saturate,
        FilterKind::Vivid,
        FilterKind::Fade,
        FilterKind::BlueTint,
        FilterKind::RedTint,
    ];

    /// Stable identifier used in config files, CLI arguments and bindings.
    pub fn id(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Vintage => "vintage",
            FilterKind::Cool => "cool",
            FilterKind::Warm => "warm",
            FilterKind::Bright => "bright",
            FilterKind::Dark => "dark",
            FilterKind::Contrast => "contrast",
            FilterKind::Saturate => "saturate",
            FilterKind::Vivid => "vivid",
            FilterKind::Fade => "fade",
            FilterKind::BlueTint => "blue_tint",
            FilterKind::RedTint => "red_tint",
        }
    }

    /// Human-readable label for filter pickers.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::None => "None",
            FilterKind::Grayscale => "Grayscale",
            FilterKind::Sepia => "Sepia",
            FilterKind::Invert => "Invert",
            FilterKind::Vintage => "Vintage",
            FilterKind::Cool => "Cool",
            FilterKind::Warm => "Warm",
            FilterKind::Bright => "Bright",
            FilterKind::Dark => "Dark",
            FilterKind::Contrast => "Contrast",
            FilterKind::Saturate => "Saturate",
            FilterKind::Vivid => "Vivid",
            FilterKind::Fade => "Fade",
            FilterKind::BlueTint => "Blue tint",
            FilterKind::RedTint => "Red tint",
        }
    }

    /// The color matrix realizing this filter.
    ///
    /// One table serves both the on-screen preview and the saved output.
    pub fn matrix(self) -> ColorMatrix {
        match self {
            FilterKind::None => ColorMatrix::IDENTITY,
            FilterKind::Grayscale => ColorMatrix::saturation(0.0),
            FilterKind::Sepia => ColorMatrix::from_rows(
                [0.393, 0.769, 0.189, 0.0, 0.0],
                [0.349, 0.686, 0.168, 0.0, 0.0],
                [0.272, 0.534, 0.131, 0.0, 0.0],
            ),
            FilterKind::Invert => ColorMatrix::from_rows(
                [-1.0, 0.0, 0.0, 0.0, 255.0],
                [0.0, -1.0, 0.0, 0.0, 255.0],
                [0.0, 0.0, -1.0, 0.0, 255.0],
            ),
            FilterKind::Vintage => ColorMatrix::from_rows(
                [0.6, 0.3, 0.1, 0.0, 30.0],
                [0.2, 0.6, 0.2, 0.0, 20.0],
                [0.2, 0.2, 0.5, 0.0, 10.0],
            ),
            FilterKind::Cool => ColorMatrix::scale(0.8, 0.9, 1.2, 1.0),
            FilterKind::Warm => ColorMatrix::scale(1.2, 1.05, 0.8, 1.0),
            FilterKind::Bright => ColorMatrix::scale(1.3, 1.3, 1.3, 1.0),
            FilterKind::Dark => ColorMatrix::scale(0.7, 0.7, 0.7, 1.0),
            FilterKind::Contrast => ColorMatrix::from_rows(
                [1.5, 0.0, 0.0, 0.0, -64.0],
                [0.0, 1.5, 0.0, 0.0, -64.0],
                [0.0, 0.0, 1.5, 0.0, -64.0],
            ),
            FilterKind::Saturate => ColorMatrix::saturation(1.8),
            FilterKind::Vivid => ColorMatrix::saturation(2.0),
            FilterKind::Fade => ColorMatrix::scale(1.0, 1.0, 1.0, 0.7),
            FilterKind::BlueTint => ColorMatrix::scale(0.9, 0.9, 1.3, 1.0),
            FilterKind::RedTint => ColorMatrix::scale(1.3, 0.9, 0.9, 1.0),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterKind {
    type Err = ParseFilterError;

    /// Accepts the identifier, case-insensitively, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}
