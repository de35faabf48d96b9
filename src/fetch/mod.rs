// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reference input fetching with prefix allow-list and data-URI support

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Timeout applied to every network fetch of a reference input
pub const FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL not allowed: {0}")]
    Denied(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),
    #[error("fetch failed: {0}")]
    Network(String),
    #[error("fetch returned status {0}")]
    BadStatus(u16),
}

/// Resolves reference images/masks for generation and edit operations.
///
/// http(s) URLs are gated by a configurable prefix allow-list; an empty list
/// permits any http/https URL. Inline base64 `data:` URIs bypass the network
/// entirely and are always permitted. Callers fold a fetch failure into
/// "no reference bytes" — the dependent operation becomes unavailable, the
/// request itself never fails on a bad reference.
pub struct ReferenceFetcher {
    client: Client,
    allowed_prefixes: Vec<String>,
}

impl ReferenceFetcher {
    pub fn new(allowed_prefixes: Vec<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            allowed_prefixes,
        })
    }

    /// Whether a reference string may be resolved at all
    pub fn is_allowed(&self, reference: &str) -> bool {
        if reference.starts_with("data:") {
            return true;
        }
        let parsed = match Url::parse(reference) {
            Ok(u) => u,
            Err(_) => return false,
        };
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }
        if self.allowed_prefixes.is_empty() {
            return true;
        }
        self.allowed_prefixes
            .iter()
            .any(|p| reference.starts_with(p.as_str()))
    }

    /// Resolve a reference to raw bytes
    pub async fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        if reference.starts_with("data:") {
            return decode_data_uri(reference);
        }
        if !self.is_allowed(reference) {
            return Err(FetchError::Denied(reference.to_string()));
        }
        Url::parse(reference).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        debug!("Fetching reference {}", reference);
        let response = self
            .client
            .get(reference)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Resolve an optional reference, folding any failure into `None`
    pub async fn fetch_optional(&self, reference: Option<&str>) -> Option<Vec<u8>> {
        let reference = reference?;
        match self.fetch(reference).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("Reference unavailable ({}): {}", reference, e);
                None
            }
        }
    }
}

/// Decode a base64 `data:` URI of the form `data:<media-type>;base64,<payload>`
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, FetchError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| FetchError::InvalidDataUri("missing data: prefix".to_string()))?;
    let comma = rest
        .find(',')
        .ok_or_else(|| FetchError::InvalidDataUri("missing payload separator".to_string()))?;
    let (header, payload) = rest.split_at(comma);
    if !header.ends_with(";base64") {
        return Err(FetchError::InvalidDataUri(
            "only base64 data URIs are supported".to_string(),
        ));
    }
    BASE64
        .decode(payload[1..].as_bytes())
        .map_err(|e| FetchError::InvalidDataUri(e.to_string()))
}
