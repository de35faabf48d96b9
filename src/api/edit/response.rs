// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edit endpoint response types

use serde::{Deserialize, Serialize};

use crate::storage::ArtifactMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub output_url: String,
    pub duration_ms: u64,
    pub artifact: ArtifactMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResponse {
    pub caption: String,
    pub duration_ms: u64,
}
