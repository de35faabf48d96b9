// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation request types, defaults and validation

use serde::{Deserialize, Serialize};

/// Default inference step count
pub const DEFAULT_STEPS: u32 = 20;
/// Default classifier-free guidance scale
pub const DEFAULT_GUIDANCE: f32 = 7.0;
/// Default frames per second for video output
pub const DEFAULT_FPS: u32 = 12;
/// Default video duration in seconds
pub const DEFAULT_DURATION_SEC: u32 = 4;
/// Default redaction mode (redact-if-unsafe)
pub const DEFAULT_MODE: u8 = 1;

/// Controlnet conditioning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlnetParams {
    /// Conditioning type: canny, depth or pose
    #[serde(rename = "type")]
    pub control_type: String,
    #[serde(default)]
    pub strength: Option<f32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request body for the image generation family
/// (txt2img, img2img, inpaint, controlnet)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub guidance_scale: Option<f32>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub mode: Option<u8>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub init_image_url: Option<String>,
    #[serde(default)]
    pub mask_url: Option<String>,
    #[serde(default)]
    pub controlnet: Option<ControlnetParams>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl GenerateImageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        if let Some(ref cn) = self.controlnet {
            if !matches!(cn.control_type.as_str(), "canny" | "depth" | "pose") {
                return Err(format!(
                    "invalid controlnet type '{}'; allowed: canny, depth, pose",
                    cn.control_type
                ));
            }
        }
        Ok(())
    }

    /// Steps clamped into the backend-safe range
    pub fn steps(&self) -> u32 {
        self.steps.unwrap_or(DEFAULT_STEPS).clamp(1, 150)
    }

    /// Guidance scale clamped into the backend-safe range
    pub fn guidance_scale(&self) -> f32 {
        self.guidance_scale.unwrap_or(DEFAULT_GUIDANCE).clamp(1.0, 20.0)
    }

    pub fn mode(&self) -> u8 {
        self.mode.unwrap_or(DEFAULT_MODE)
    }
}

/// Request body for the video generation family (t2v, animate, stylize)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoRequest {
    pub prompt: String,
    #[serde(default)]
    pub mode: Option<u8>,
    #[serde(default)]
    pub fps: Option<u32>,
    #[serde(default)]
    pub duration_sec: Option<u32>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub source_image_url: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl GenerateVideoRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        Ok(())
    }

    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or(DEFAULT_FPS).clamp(1, 60)
    }

    pub fn duration_sec(&self) -> u32 {
        self.duration_sec.unwrap_or(DEFAULT_DURATION_SEC).clamp(1, 60)
    }

    pub fn mode(&self) -> u8 {
        self.mode.unwrap_or(DEFAULT_MODE)
    }
}
