// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation response types

use serde::{Deserialize, Serialize};

use crate::engine::PipelineOutput;
use crate::safety::SafetyScores;
use crate::storage::ArtifactMetadata;

/// Response for every generation operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// URL of the primary artifact; null only when redaction suppresses it
    pub output_url: Option<String>,
    /// Redacted preview URLs (zero or one entries)
    pub preview_urls: Vec<String>,
    /// SHA-256 of the producing backend identifier
    pub model_hash: String,
    /// Wall-clock processing time
    pub duration_ms: u64,
    /// Combined per-category safety scores
    pub safety_scores: SafetyScores,
    /// Content-addressable artifact metadata
    pub artifact: ArtifactMetadata,
    /// Normalized request echoed back to the caller
    pub echo: serde_json::Value,
}

impl GenerateResponse {
    pub fn from_output(output: PipelineOutput, echo: serde_json::Value) -> Self {
        Self {
            output_url: output.output_url,
            preview_urls: output.preview_urls,
            model_hash: output.model_hash,
            duration_ms: output.duration_ms,
            safety_scores: output.safety_scores,
            artifact: output.artifact,
            echo,
        }
    }
}
