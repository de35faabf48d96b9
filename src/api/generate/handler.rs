// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation endpoint handlers for the image and video operation families

use axum::{extract::State, Json};
use serde_json::json;
use tracing::debug;

use super::request::{GenerateImageRequest, GenerateVideoRequest};
use super::response::GenerateResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::engine::{
    compute_dimensions, Aspect, ControlInput, ControlKind, GenerationJob, OperationKind,
    VideoResolution,
};

fn enforce_rate_limit(state: &AppState, session_id: Option<&str>) -> Result<(), ApiError> {
    if let Some(sid) = session_id {
        if !state.rate_limiter.try_acquire(sid) {
            return Err(ApiError::RateLimitExceeded { retry_after: 60 });
        }
    }
    Ok(())
}

fn control_kind(tag: &str) -> ControlKind {
    match tag {
        "depth" => ControlKind::Depth,
        "pose" => ControlKind::Pose,
        _ => ControlKind::Canny,
    }
}

/// Shared pipeline for the image generation family. Reference fetch failures
/// are folded into missing bytes here; the invoker then treats the real
/// backends as unavailable and degrades to the stub.
async fn run_image_op(
    state: AppState,
    op: OperationKind,
    request: GenerateImageRequest,
) -> Result<Json<GenerateResponse>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    enforce_rate_limit(&state, request.session_id.as_deref())?;

    let aspect = Aspect::from_tag(request.aspect.as_deref());
    let dims = compute_dimensions(aspect, request.preview);
    debug!("Image op {:?}: aspect={}, dims={}", op, aspect.tag(), dims);

    let reference = state
        .fetcher
        .fetch_optional(request.init_image_url.as_deref())
        .await;
    let mask = state
        .fetcher
        .fetch_optional(request.mask_url.as_deref())
        .await;
    let control = match request.controlnet.as_ref() {
        Some(cn) => Some(ControlInput {
            kind: control_kind(&cn.control_type),
            strength: cn.strength.unwrap_or(1.0).clamp(0.0, 1.0),
            image: state.fetcher.fetch_optional(cn.image_url.as_deref()).await,
        }),
        None => None,
    };

    let job = GenerationJob {
        op,
        prompt: request.prompt.clone(),
        negative_prompt: request.negative_prompt.clone(),
        steps: request.steps(),
        guidance_scale: request.guidance_scale(),
        seed: request.seed,
        fps: 0,
        duration_sec: 0,
        reference,
        mask,
        control,
    };

    let echo = json!({
        "op": op,
        "prompt": request.prompt,
        "negativePrompt": request.negative_prompt,
        "steps": request.steps(),
        "guidanceScale": request.guidance_scale(),
        "aspect": aspect.tag(),
        "preview": request.preview,
        "mode": request.mode(),
        "seed": request.seed,
        "modelId": request.model_id,
    });

    let output = state
        .pipeline
        .run(job, dims, request.model_id.as_deref(), request.mode())
        .await?;
    Ok(Json(GenerateResponse::from_output(output, echo)))
}

/// Shared pipeline for the video generation family
async fn run_video_op(
    state: AppState,
    op: OperationKind,
    request: GenerateVideoRequest,
) -> Result<Json<GenerateResponse>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    enforce_rate_limit(&state, request.session_id.as_deref())?;

    let resolution = VideoResolution::from_tag(request.resolution.as_deref());
    let dims = resolution.dimensions();
    debug!("Video op {:?}: resolution={}, dims={}", op, resolution.tag(), dims);

    let reference = state
        .fetcher
        .fetch_optional(request.source_image_url.as_deref())
        .await;

    let job = GenerationJob {
        op,
        prompt: request.prompt.clone(),
        negative_prompt: None,
        steps: 20,
        guidance_scale: 7.0,
        seed: request.seed,
        fps: request.fps(),
        duration_sec: request.duration_sec(),
        reference,
        mask: None,
        control: None,
    };

    let echo = json!({
        "op": op,
        "prompt": request.prompt,
        "fps": request.fps(),
        "durationSec": request.duration_sec(),
        "resolution": resolution.tag(),
        "mode": request.mode(),
        "seed": request.seed,
        "modelId": request.model_id,
    });

    let output = state
        .pipeline
        .run(job, dims, request.model_id.as_deref(), request.mode())
        .await?;
    Ok(Json(GenerateResponse::from_output(output, echo)))
}

/// POST /infer/txt2img
pub async fn txt2img_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_image_op(state, OperationKind::Txt2Img, request).await
}

/// POST /infer/img2img
pub async fn img2img_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_image_op(state, OperationKind::Img2Img, request).await
}

/// POST /infer/inpaint
pub async fn inpaint_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_image_op(state, OperationKind::Inpaint, request).await
}

/// POST /infer/controlnet
pub async fn controlnet_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_image_op(state, OperationKind::Controlnet, request).await
}

/// POST /infer/t2v
pub async fn t2v_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_video_op(state, OperationKind::TextToVideo, request).await
}

/// POST /infer/animate
pub async fn animate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_video_op(state, OperationKind::Animate, request).await
}

/// POST /infer/stylize
pub async fn stylize_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    run_video_op(state, OperationKind::Stylize, request).await
}
