// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edit endpoint handlers: upscale, restore-face, remove-bg, crop, resize, caption
//!
//! Crop, resize and upscale run locally on the CPU; restore-face and remove-bg
//! go through the backend invoker and degrade to the placeholder when no real
//! backend serves them. Sources that fail to fetch or decode degrade to the
//! placeholder as well, never to a request failure.

use axum::{extract::State, Json};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::io::Cursor;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::request::{
    CaptionRequest, CropRequest, RemoveBgRequest, ResizeRequest, RestoreFaceRequest,
    UpscaleRequest,
};
use super::response::{CaptionResponse, EditResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::engine::{stub, Dimensions, GenerationJob, OperationKind};
use crate::safety::MODE_NEVER_REDACT;
use crate::storage::ArtifactMetadata;

/// Dimensions used for the degraded placeholder when a source is unusable
const FALLBACK_DIMS: Dimensions = Dimensions {
    width: 768,
    height: 768,
};

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ApiError> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| ApiError::InternalError(format!("PNG encoding failed: {}", e)))?;
    Ok(cursor.into_inner())
}

async fn fetch_and_decode(state: &AppState, image_url: &str) -> Option<DynamicImage> {
    let bytes = state.fetcher.fetch_optional(Some(image_url)).await?;
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            debug!("Source image failed to decode ({}): {}", image_url, e);
            None
        }
    }
}

async fn store_edit_artifact(
    state: &AppState,
    op: OperationKind,
    bytes: Vec<u8>,
    dims: Dimensions,
    started: Instant,
) -> Result<Json<EditResponse>, ApiError> {
    let key = format!("{}/{}.png", op.key_prefix(), Uuid::new_v4());
    let artifact = ArtifactMetadata::from_bytes(&bytes, dims);
    let output_url = state
        .sink
        .put(&key, bytes, "image/png")
        .await
        .map_err(|e| ApiError::StorageFailure(e.to_string()))?;

    let duration_ms = started.elapsed().as_millis() as u64;
    info!("Edit {:?} completed: dims={}, {}ms", op, dims, duration_ms);
    Ok(Json(EditResponse {
        output_url,
        duration_ms,
        artifact,
    }))
}

/// Run a local image transform on the blocking pool
async fn transform_blocking(
    img: DynamicImage,
    f: impl FnOnce(DynamicImage) -> DynamicImage + Send + 'static,
) -> Result<DynamicImage, ApiError> {
    tokio::task::spawn_blocking(move || f(img))
        .await
        .map_err(|e| ApiError::InternalError(format!("image task failed: {}", e)))
}

/// POST /edit/upscale
pub async fn upscale_handler(
    State(state): State<AppState>,
    Json(request): Json<UpscaleRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    let started = Instant::now();

    match fetch_and_decode(&state, &request.image_url).await {
        Some(img) => {
            let scale = request.scale;
            let dims = Dimensions::new(img.width() * scale, img.height() * scale);
            let scaled = transform_blocking(img, move |img| {
                img.resize_exact(
                    img.width() * scale,
                    img.height() * scale,
                    FilterType::Lanczos3,
                )
            })
            .await?;
            let bytes = encode_png(&scaled)?;
            store_edit_artifact(&state, OperationKind::Upscale, bytes, dims, started).await
        }
        None => {
            let dims = FALLBACK_DIMS;
            let bytes = stub::placeholder_image(dims);
            store_edit_artifact(&state, OperationKind::Upscale, bytes, dims, started).await
        }
    }
}

/// POST /edit/crop
pub async fn crop_handler(
    State(state): State<AppState>,
    Json(request): Json<CropRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    let started = Instant::now();

    match fetch_and_decode(&state, &request.image_url).await {
        Some(img) => {
            if request.x >= img.width() || request.y >= img.height() {
                return Err(ApiError::ValidationError {
                    field: "x".to_string(),
                    message: format!(
                        "crop origin ({}, {}) outside image {}x{}",
                        request.x,
                        request.y,
                        img.width(),
                        img.height()
                    ),
                });
            }
            // Clamp the rect to the image bounds
            let w = request.w.min(img.width() - request.x);
            let h = request.h.min(img.height() - request.y);
            let (x, y) = (request.x, request.y);
            let cropped = transform_blocking(img, move |img| img.crop_imm(x, y, w, h)).await?;
            let dims = Dimensions::new(w, h);
            let bytes = encode_png(&cropped)?;
            store_edit_artifact(&state, OperationKind::Crop, bytes, dims, started).await
        }
        None => {
            let dims = Dimensions::new(request.w, request.h);
            let bytes = stub::placeholder_image(dims);
            store_edit_artifact(&state, OperationKind::Crop, bytes, dims, started).await
        }
    }
}

/// POST /edit/resize
pub async fn resize_handler(
    State(state): State<AppState>,
    Json(request): Json<ResizeRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;
    let started = Instant::now();
    let dims = Dimensions::new(request.width, request.height);

    match fetch_and_decode(&state, &request.image_url).await {
        Some(img) => {
            let (width, height) = (request.width, request.height);
            let resized = transform_blocking(img, move |img| {
                img.resize_exact(width, height, FilterType::Lanczos3)
            })
            .await?;
            let bytes = encode_png(&resized)?;
            store_edit_artifact(&state, OperationKind::Resize, bytes, dims, started).await
        }
        None => {
            let bytes = stub::placeholder_image(dims);
            store_edit_artifact(&state, OperationKind::Resize, bytes, dims, started).await
        }
    }
}

/// Run a reference-required edit operation through the invoker chain
async fn run_backend_edit(
    state: AppState,
    op: OperationKind,
    image_url: &str,
) -> Result<Json<EditResponse>, ApiError> {
    let started = Instant::now();
    let reference = state.fetcher.fetch_optional(Some(image_url)).await;
    let dims = reference
        .as_deref()
        .and_then(|b| image::load_from_memory(b).ok())
        .map(|img| Dimensions::new(img.width(), img.height()))
        .unwrap_or(FALLBACK_DIMS);

    let mut job = GenerationJob::from_prompt(op, "");
    job.reference = reference;

    let output = state
        .pipeline
        .run(job, dims, None, MODE_NEVER_REDACT)
        .await?;
    let duration_ms = started.elapsed().as_millis() as u64;
    let output_url = output
        .output_url
        .ok_or_else(|| ApiError::InternalError("missing output URL".to_string()))?;
    Ok(Json(EditResponse {
        output_url,
        duration_ms,
        artifact: output.artifact,
    }))
}

/// POST /edit/restore-face
pub async fn restore_face_handler(
    State(state): State<AppState>,
    Json(request): Json<RestoreFaceRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    run_backend_edit(state, OperationKind::RestoreFace, &request.image_url).await
}

/// POST /edit/remove-bg
pub async fn remove_bg_handler(
    State(state): State<AppState>,
    Json(request): Json<RemoveBgRequest>,
) -> Result<Json<EditResponse>, ApiError> {
    run_backend_edit(state, OperationKind::RemoveBg, &request.image_url).await
}

/// POST /edit/caption - deterministic fallback caption when no captioning
/// backend is available
pub async fn caption_handler(
    State(state): State<AppState>,
    Json(request): Json<CaptionRequest>,
) -> Result<Json<CaptionResponse>, ApiError> {
    let started = Instant::now();
    let caption = match fetch_and_decode(&state, &request.image_url).await {
        Some(img) => format!("an image, {}x{} pixels", img.width(), img.height()),
        None => "an image".to_string(),
    };
    Ok(Json(CaptionResponse {
        caption,
        duration_ms: started.elapsed().as_millis() as u64,
    }))
}
