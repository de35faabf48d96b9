// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic placeholder generator used when no real backend is available

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;

use super::backend::{BackendOutcome, GenerationBackend, GenerationJob};
use super::dims::Dimensions;

/// Fill color for placeholder images
pub const PLACEHOLDER_RGB: [u8; 3] = [88, 101, 124];

/// Fill value for the uniform-gray redacted preview
pub const REDACTED_GRAY: u8 = 128;

/// Edge size of the fixed redacted preview artifact
pub const REDACTED_PREVIEW_SIZE: u32 = 256;

/// Magic prefix of the synthetic video placeholder byte stream
const VIDEO_MAGIC: &[u8; 4] = b"MFV0";

/// Encode a solid-color PNG at the given dimensions. Falls back to the raw
/// pixel buffer if in-memory PNG encoding ever fails, so the result is always
/// non-empty.
pub fn solid_png(dims: Dimensions, rgb: [u8; 3]) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(dims.width.max(1), dims.height.max(1), Rgb(rgb));
    let mut cursor = Cursor::new(Vec::new());
    if img.write_to(&mut cursor, ImageFormat::Png).is_err() {
        return img.into_raw();
    }
    cursor.into_inner()
}

/// Placeholder image output for a failed/absent image backend
pub fn placeholder_image(dims: Dimensions) -> Vec<u8> {
    solid_png(dims, PLACEHOLDER_RGB)
}

/// Fixed-size uniform-gray redacted preview artifact
pub fn redacted_preview_png() -> Vec<u8> {
    solid_png(
        Dimensions::new(REDACTED_PREVIEW_SIZE, REDACTED_PREVIEW_SIZE),
        [REDACTED_GRAY, REDACTED_GRAY, REDACTED_GRAY],
    )
}

/// Synthetic video placeholder: a framed byte sequence sized by the requested
/// dimensions, fps and duration. Header carries width/height/fps/frame count,
/// followed by one 16-byte record per frame. Deterministic for equal inputs.
pub fn placeholder_video(dims: Dimensions, fps: u32, duration_sec: u32) -> Vec<u8> {
    let frames = fps.max(1) * duration_sec.max(1);
    let mut out = Vec::with_capacity(20 + frames as usize * 16);
    out.extend_from_slice(VIDEO_MAGIC);
    out.extend_from_slice(&dims.width.to_le_bytes());
    out.extend_from_slice(&dims.height.to_le_bytes());
    out.extend_from_slice(&fps.to_le_bytes());
    out.extend_from_slice(&frames.to_le_bytes());
    for frame in 0..frames {
        out.extend_from_slice(&frame.to_le_bytes());
        out.extend_from_slice(&dims.width.to_le_bytes());
        out.extend_from_slice(&dims.height.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
    }
    out
}

/// Produce the placeholder output for a job at the given dimensions
pub fn generate(job: &GenerationJob, dims: Dimensions) -> Vec<u8> {
    if job.op.is_video() {
        placeholder_video(dims, job.fps, job.duration_sec)
    } else {
        placeholder_image(dims)
    }
}

/// The always-succeeding terminal backend in every candidate chain
pub struct StubBackend;

pub const STUB_BACKEND_ID: &str = "stub";

#[async_trait]
impl GenerationBackend for StubBackend {
    fn id(&self) -> &str {
        STUB_BACKEND_ID
    }

    async fn invoke(&self, job: &GenerationJob, dims: Dimensions) -> BackendOutcome {
        BackendOutcome::Success(generate(job, dims))
    }
}
