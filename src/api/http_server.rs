// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server: router assembly, shared state, health endpoint

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::edit::{
    caption_handler, crop_handler, remove_bg_handler, resize_handler, restore_face_handler,
    upscale_handler,
};
use super::generate::{
    animate_handler, controlnet_handler, img2img_handler, inpaint_handler, stylize_handler,
    t2v_handler, txt2img_handler,
};
use super::rate_limiter::SessionRateLimiter;
use crate::config::NodeConfig;
use crate::engine::GenerationPipeline;
use crate::fetch::ReferenceFetcher;
use crate::storage::ArtifactSink;
use crate::version;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GenerationPipeline>,
    pub fetcher: Arc<ReferenceFetcher>,
    pub sink: Arc<dyn ArtifactSink>,
    pub rate_limiter: Arc<SessionRateLimiter>,
    pub config: Arc<NodeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub model: String,
    pub version: String,
}

/// GET /health - readiness plus the active model identifier
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(HealthResponse {
        ok: true,
        model: state.pipeline.default_model().to_string(),
        version: version::VERSION.to_string(),
    })
}

/// Assemble the full route table
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Image generation family
        .route("/infer/txt2img", post(txt2img_handler))
        .route("/infer/img2img", post(img2img_handler))
        .route("/infer/inpaint", post(inpaint_handler))
        .route("/infer/controlnet", post(controlnet_handler))
        // Video generation family
        .route("/infer/t2v", post(t2v_handler))
        .route("/infer/animate", post(animate_handler))
        .route("/infer/stylize", post(stylize_handler))
        // Edit family
        .route("/edit/upscale", post(upscale_handler))
        .route("/edit/restore-face", post(restore_face_handler))
        .route("/edit/remove-bg", post(remove_bg_handler))
        .route("/edit/crop", post(crop_handler))
        .route("/edit/resize", post(resize_handler))
        .route("/edit/caption", post(caption_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
