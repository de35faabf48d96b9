// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-request generation pipeline: dims -> invoke -> persist -> score -> redact

use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::backend::{GenerationBackend, GenerationJob};
use super::dims::Dimensions;
use super::invoker::{BackendInvoker, InvokeError};
use super::registry::BackendRegistry;
use super::stub;
use crate::safety::{RedactionPolicy, SafetyScorer, SafetyScores};
use crate::storage::{ArtifactMetadata, ArtifactSink};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Exhausted(#[from] InvokeError),
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Assembled pipeline result, wrapped into the HTTP response by the handler
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub output_url: Option<String>,
    pub preview_urls: Vec<String>,
    pub model_hash: String,
    pub duration_ms: u64,
    pub safety_scores: SafetyScores,
    pub artifact: ArtifactMetadata,
    pub stubbed: bool,
}

/// Shared per-process pipeline state. Each request runs through `run`
/// independently; the only cross-request state is the registry's lazily
/// initialized backend handles.
pub struct GenerationPipeline {
    registry: Arc<BackendRegistry>,
    invoker: BackendInvoker,
    sink: Arc<dyn ArtifactSink>,
    scorer: SafetyScorer,
    redaction: RedactionPolicy,
    default_model: String,
}

impl GenerationPipeline {
    pub fn new(
        registry: Arc<BackendRegistry>,
        invoker: BackendInvoker,
        sink: Arc<dyn ArtifactSink>,
        scorer: SafetyScorer,
        redaction: RedactionPolicy,
        default_model: &str,
    ) -> Self {
        Self {
            registry,
            invoker,
            sink,
            scorer,
            redaction,
            default_model: default_model.to_string(),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Ordered candidate backends for a request: the explicitly requested
    /// model first, then the default sidecar model. The stub is appended
    /// implicitly by the invoker.
    async fn candidates(&self, requested_model: Option<&str>) -> Vec<Arc<dyn GenerationBackend>> {
        let mut out: Vec<Arc<dyn GenerationBackend>> = Vec::new();
        if let Some(model) = requested_model {
            if let Some(handle) = self.registry.get_or_init(model).await {
                out.push(handle);
            }
        }
        if requested_model != Some(self.default_model.as_str()) {
            if let Some(handle) = self.registry.get_or_init(&self.default_model).await {
                out.push(handle);
            }
        }
        out
    }

    /// Run the full request state machine and persist every produced artifact.
    ///
    /// The primary artifact and a redacted preview are two independent writes;
    /// there is no transactional guarantee across them.
    pub async fn run(
        &self,
        job: GenerationJob,
        dims: Dimensions,
        requested_model: Option<&str>,
        mode: u8,
    ) -> Result<PipelineOutput, PipelineError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        let candidates = self.candidates(requested_model).await;
        let result = self.invoker.generate(&job, dims, &candidates).await?;

        let (content_type, ext) = if job.op.is_video() {
            ("video/mp4", "mp4")
        } else {
            ("image/png", "png")
        };
        let key = format!("{}/{}.{}", job.op.key_prefix(), request_id, ext);
        let output_url = self
            .sink
            .put(&key, result.bytes.clone(), content_type)
            .await
            .map_err(|e| PipelineError::Storage(e.to_string()))?;

        let artifact = ArtifactMetadata::from_bytes(&result.bytes, result.dims);

        let safety_scores = self.scorer.score(&job.prompt, Some(&result.bytes)).await;
        let decision = self.redaction.decide(&safety_scores, mode);

        let mut preview_urls = Vec::new();
        let mut primary = Some(output_url);
        if decision.redact {
            warn!(
                "Redacting output for request {} (nsfw={})",
                request_id, safety_scores.nsfw
            );
            let preview_key = format!("{}/{}-redacted.png", job.op.key_prefix(), request_id);
            let preview_url = self
                .sink
                .put(&preview_key, stub::redacted_preview_png(), "image/png")
                .await
                .map_err(|e| PipelineError::Storage(e.to_string()))?;
            preview_urls.push(preview_url);
            if self.redaction.suppress_primary {
                primary = None;
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "Request {} completed: op={:?}, backend={}, dims={}, stubbed={}, {}ms",
            request_id, job.op, result.backend_id, result.dims, result.stubbed, duration_ms
        );

        Ok(PipelineOutput {
            output_url: primary,
            preview_urls,
            model_hash: model_hash(&result.backend_id),
            duration_ms,
            safety_scores,
            artifact,
            stubbed: result.stubbed,
        })
    }
}

/// SHA-256 digest of the producing backend identifier
pub fn model_hash(backend_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(backend_id.as_bytes());
    hex::encode(hasher.finalize())
}
