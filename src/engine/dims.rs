// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output dimension policy: aspect tags, preview scaling, video presets

use serde::{Deserialize, Serialize};

/// Base linear size for full-resolution image output
pub const FULL_BASE: u32 = 768;

/// Base linear size for preview image output
pub const PREVIEW_BASE: u32 = 384;

/// Output dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Halve both axes, used for retry-at-reduced-resolution. Never drops below 1.
    pub fn halved(self) -> Self {
        Self {
            width: (self.width / 2).max(1),
            height: (self.height / 2).max(1),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Recognized aspect ratio tags for image generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    Square,
    Wide16x9,
    Tall9x16,
    Wide3x2,
    Tall2x3,
}

impl Aspect {
    /// Parse an aspect tag. Unrecognized or missing tags normalize to 1:1.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("1:1") => Self::Square,
            Some("16:9") => Self::Wide16x9,
            Some("9:16") => Self::Tall9x16,
            Some("3:2") => Self::Wide3x2,
            Some("2:3") => Self::Tall2x3,
            _ => Self::Square,
        }
    }

    /// Width:height ratio as integer numerator/denominator
    pub fn ratio(self) -> (u32, u32) {
        match self {
            Self::Square => (1, 1),
            Self::Wide16x9 => (16, 9),
            Self::Tall9x16 => (9, 16),
            Self::Wide3x2 => (3, 2),
            Self::Tall2x3 => (2, 3),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Wide16x9 => "16:9",
            Self::Tall9x16 => "9:16",
            Self::Wide3x2 => "3:2",
            Self::Tall2x3 => "2:3",
        }
    }
}

/// Compute image output dimensions from an aspect tag and the preview flag.
///
/// Pure integer arithmetic: width = base * num / den (floor), height = base.
pub fn compute_dimensions(aspect: Aspect, preview: bool) -> Dimensions {
    let base = if preview { PREVIEW_BASE } else { FULL_BASE };
    let (num, den) = aspect.ratio();
    Dimensions {
        width: base * num / den,
        height: base,
    }
}

/// Fixed video resolution presets. Video output size is chosen from these
/// independently of the aspect field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoResolution {
    P576,
    P720,
}

impl VideoResolution {
    /// Parse a resolution tag. A missing tag defaults to 576p; a present but
    /// unrecognized tag selects 720p.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None | Some("576p") => Self::P576,
            Some(_) => Self::P720,
        }
    }

    pub fn dimensions(self) -> Dimensions {
        match self {
            Self::P576 => Dimensions::new(1024, 576),
            Self::P720 => Dimensions::new(1280, 720),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::P576 => "576p",
            Self::P720 => "720p",
        }
    }
}
