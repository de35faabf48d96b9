// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP sidecar backend speaking the OpenAI-compatible images API

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use async_trait::async_trait;

use super::backend::{BackendOutcome, GenerationBackend, GenerationJob, OperationKind};
use super::dims::Dimensions;

/// Body phrases that classify a sidecar failure as resource exhaustion.
/// "oom" is additionally matched as a standalone token, not a substring,
/// so words like "room" or "bloom" in an error body do not count.
const OOM_PHRASES: &[&str] = &["out of memory", "cuda out of memory"];

/// Client for an OpenAI-compatible generation sidecar. Connection failures and
/// unsupported operations surface as `Unavailable`; out-of-memory class
/// responses surface as `ResourceExhausted` so the invoker can retry smaller.
pub struct SidecarBackend {
    client: Client,
    endpoint: String,
    model_id: String,
}

#[derive(Debug, Deserialize)]
struct SidecarImageResponse {
    data: Vec<SidecarImageData>,
}

#[derive(Debug, Deserialize)]
struct SidecarImageData {
    b64_json: Option<String>,
}

impl SidecarBackend {
    pub fn new(endpoint: &str, model_id: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        debug!(
            "Sidecar backend configured: endpoint={}, model={}",
            endpoint, model_id
        );
        Ok(Self {
            client,
            endpoint,
            model_id: model_id.to_string(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Check whether the sidecar answers its health endpoint
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Sidecar health check failed: {}", e);
                false
            }
        }
    }

    fn generation_path(op: OperationKind) -> &'static str {
        if op.is_video() {
            "/v1/videos/generations"
        } else {
            "/v1/images/generations"
        }
    }

    fn build_body(&self, job: &GenerationJob, dims: Dimensions) -> serde_json::Value {
        let mut body = serde_json::json!({
            "prompt": job.prompt,
            "model": self.model_id,
            "operation": job.op,
            "size": format!("{}x{}", dims.width, dims.height),
            "n": 1,
            "response_format": "b64_json",
            "guidance_scale": job.guidance_scale,
            "num_inference_steps": job.steps,
        });
        if let Some(seed) = job.seed {
            body["seed"] = serde_json::json!(seed);
        }
        if let Some(ref neg) = job.negative_prompt {
            body["negative_prompt"] = serde_json::json!(neg);
        }
        if let Some(ref reference) = job.reference {
            body["image"] = serde_json::json!(BASE64.encode(reference));
        }
        if let Some(ref mask) = job.mask {
            body["mask"] = serde_json::json!(BASE64.encode(mask));
        }
        if let Some(ref control) = job.control {
            body["controlnet"] = serde_json::json!({
                "type": control.kind,
                "strength": control.strength,
                "image": control.image.as_ref().map(|b| BASE64.encode(b)),
            });
        }
        if job.op.is_video() {
            body["fps"] = serde_json::json!(job.fps);
            body["duration_sec"] = serde_json::json!(job.duration_sec);
        }
        body
    }

    fn classify_failure(status: reqwest::StatusCode, body: &str) -> BackendOutcome {
        let lower = body.to_lowercase();
        let oom = status == reqwest::StatusCode::INSUFFICIENT_STORAGE
            || OOM_PHRASES.iter().any(|m| lower.contains(m))
            || lower
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|token| token == "oom");
        if oom {
            BackendOutcome::exhausted(format!("sidecar returned {}: {}", status, body))
        } else {
            BackendOutcome::unavailable(format!("sidecar returned {}: {}", status, body))
        }
    }
}

#[async_trait]
impl GenerationBackend for SidecarBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(&self, job: &GenerationJob, dims: Dimensions) -> BackendOutcome {
        if job.missing_required_reference() {
            return BackendOutcome::unavailable("required reference bytes missing");
        }
        // Edit-family operations are not served by the generation sidecar
        if matches!(
            job.op,
            OperationKind::Upscale
                | OperationKind::RestoreFace
                | OperationKind::RemoveBg
                | OperationKind::Crop
                | OperationKind::Resize
        ) {
            return BackendOutcome::unavailable(format!(
                "operation {:?} not supported by sidecar",
                job.op
            ));
        }

        let url = format!("{}{}", self.endpoint, Self::generation_path(job.op));
        let body = self.build_body(job, dims);
        debug!("Sidecar invoke POST {} ({})", url, dims);

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                return BackendOutcome::unavailable(format!("sidecar unreachable: {}", e));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Sidecar generation failed: {} {}", status, text);
            return Self::classify_failure(status, &text);
        }

        let parsed: SidecarImageResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return BackendOutcome::unavailable(format!("malformed sidecar response: {}", e));
            }
        };

        let b64 = match parsed.data.into_iter().next().and_then(|d| d.b64_json) {
            Some(b) => b,
            None => return BackendOutcome::unavailable("empty sidecar response"),
        };

        match BASE64.decode(b64.as_bytes()) {
            Ok(bytes) if !bytes.is_empty() => BackendOutcome::Success(bytes),
            Ok(_) => BackendOutcome::unavailable("sidecar returned zero-length payload"),
            Err(e) => BackendOutcome::unavailable(format!("invalid b64_json payload: {}", e)),
        }
    }
}
