//! Appearance settings forwarded verbatim to the presenter

use serde::{Deserialize, Serialize};

/// Show/hide animation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationType {
    #[default]
    Fade,
    Zoom,
    ZoomOut,
    ZoomIn,
}

/// Backdrop behind the bezel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    #[default]
    SolidColor,
    Blur,
}

/// Layout hints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Vertical offset of the bezel from the container centre
    pub offset_y: f32,
    pub margin: f32,
    /// Minimum bezel size (width, height)
    pub min_size: (f32, f32),
    /// Force equal width and height
    pub square: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            offset_y: 0.0,
            margin: crate::config::DEFAULT_MARGIN,
            min_size: (0.0, 0.0),
            square: false,
        }
    }
}
