// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edit endpoint request types and validation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleRequest {
    pub image_url: String,
    /// Upscale factor, 2 or 4
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_scale() -> u32 {
    2
}

impl UpscaleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.scale != 2 && self.scale != 4 {
            return Err(format!("scale must be 2 or 4, got {}", self.scale));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreFaceRequest {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBgRequest {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRequest {
    pub image_url: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.w == 0 || self.h == 0 {
            return Err("crop width and height must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeRequest {
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

impl ResizeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("width and height must be > 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    pub image_url: String,
}
