// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content-addressable artifact metadata

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::dims::Dimensions;

/// Derived metadata for a persisted artifact. A pure function of the bytes
/// and dimensions: the same input always yields the same hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub byte_length: u64,
    pub content_hash: String,
    pub width: u32,
    pub height: u32,
}

impl ArtifactMetadata {
    pub fn from_bytes(bytes: &[u8], dims: Dimensions) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            byte_length: bytes.len() as u64,
            content_hash: hex::encode(hasher.finalize()),
            width: dims.width,
            height: dims.height,
        }
    }
}
