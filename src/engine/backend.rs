// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation backend contract: operation families, job inputs, tagged outcomes

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::dims::Dimensions;

/// Operation families served by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Txt2Img,
    Img2Img,
    Inpaint,
    Controlnet,
    TextToVideo,
    Animate,
    Stylize,
    Upscale,
    RestoreFace,
    RemoveBg,
    Crop,
    Resize,
}

impl OperationKind {
    /// Whether this family produces video output
    pub fn is_video(self) -> bool {
        matches!(self, Self::TextToVideo | Self::Animate | Self::Stylize)
    }

    /// Whether the operation cannot run without resolved reference bytes
    pub fn requires_reference(self) -> bool {
        matches!(
            self,
            Self::Img2Img
                | Self::Inpaint
                | Self::Controlnet
                | Self::Animate
                | Self::Stylize
                | Self::Upscale
                | Self::RestoreFace
                | Self::RemoveBg
                | Self::Crop
                | Self::Resize
        )
    }

    /// Key prefix for persisted artifacts of this family
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Txt2Img => "txt2img",
            Self::Img2Img => "img2img",
            Self::Inpaint => "inpaint",
            Self::Controlnet => "controlnet",
            Self::TextToVideo => "t2v",
            Self::Animate => "animate",
            Self::Stylize => "stylize",
            Self::Upscale => "upscale",
            Self::RestoreFace => "restore-face",
            Self::RemoveBg => "remove-bg",
            Self::Crop => "crop",
            Self::Resize => "resize",
        }
    }
}

/// Controlnet conditioning types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Canny,
    Depth,
    Pose,
}

/// Resolved controlnet conditioning input
#[derive(Debug, Clone)]
pub struct ControlInput {
    pub kind: ControlKind,
    pub strength: f32,
    pub image: Option<Vec<u8>>,
}

/// Normalized inputs for one generation attempt. Reference bytes are resolved
/// by the caller before the invoker runs; a missing required reference makes
/// every real backend unavailable for the job.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub op: OperationKind,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub steps: u32,
    pub guidance_scale: f32,
    pub seed: Option<u64>,
    pub fps: u32,
    pub duration_sec: u32,
    pub reference: Option<Vec<u8>>,
    pub mask: Option<Vec<u8>>,
    pub control: Option<ControlInput>,
}

impl GenerationJob {
    /// Minimal job for prompt-only operations
    pub fn from_prompt(op: OperationKind, prompt: &str) -> Self {
        Self {
            op,
            prompt: prompt.to_string(),
            negative_prompt: None,
            steps: 20,
            guidance_scale: 7.0,
            seed: None,
            fps: 12,
            duration_sec: 4,
            reference: None,
            mask: None,
            control: None,
        }
    }

    /// Whether a reference the operation depends on is missing
    pub fn missing_required_reference(&self) -> bool {
        if !self.op.requires_reference() {
            return false;
        }
        match self.op {
            OperationKind::Inpaint => self.reference.is_none() || self.mask.is_none(),
            OperationKind::Controlnet => self
                .control
                .as_ref()
                .map(|c| c.image.is_none())
                .unwrap_or(true),
            _ => self.reference.is_none(),
        }
    }
}

/// Tagged result of one backend attempt. The invoker's fallback and retry
/// logic operates on these states, never on caught panics or blanket errors.
#[derive(Debug, Clone)]
pub enum BackendOutcome {
    Success(Vec<u8>),
    Unavailable { reason: String },
    ResourceExhausted { reason: String },
}

impl BackendOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn exhausted(reason: impl Into<String>) -> Self {
        Self::ResourceExhausted {
            reason: reason.into(),
        }
    }
}

/// A generation engine able to produce image/video bytes for one attempt
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Stable identifier used for candidate ordering and the response model hash
    fn id(&self) -> &str;

    async fn invoke(&self, job: &GenerationJob, dims: Dimensions) -> BackendOutcome;
}
