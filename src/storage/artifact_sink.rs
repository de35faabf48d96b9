// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Artifact persistence: object store sink trait, S3-style client, in-memory fake

use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Stores raw bytes under a key with a content type and returns a retrievable
/// URL. Any failure is fatal to the owning request.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Path-style object store client (MinIO/S3-compatible). Writes
/// `PUT {endpoint}/{bucket}/{key}` and returns the public URL for the object.
pub struct S3ArtifactSink {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl S3ArtifactSink {
    pub fn new(endpoint: &str, bucket: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ArtifactSink for S3ArtifactSink {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let url = self.object_url(key);
        debug!("Storing artifact: {} ({} bytes)", url, bytes.len());

        let response = self
            .client
            .put(&url)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Artifact store rejected {}: {} {}", key, status, text);
            return Err(StorageError::Server(format!("{}: {}", status, text)));
        }

        Ok(self.object_url(key))
    }
}

/// In-memory sink used in tests and when no object store is configured.
/// Supports error injection in the same style as the storage mocks elsewhere
/// in the stack.
pub struct MemoryArtifactSink {
    objects: Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>,
    injected_error: Arc<Mutex<Option<StorageError>>>,
}

impl MemoryArtifactSink {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            injected_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Fail the next `put` with the given error
    pub async fn inject_error(&self, error: StorageError) {
        *self.injected_error.lock().await = Some(error);
    }

    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(key).map(|(b, _)| b.clone())
    }

    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects.lock().await.get(key).map(|(_, ct)| ct.clone())
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

impl Default for MemoryArtifactSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactSink for MemoryArtifactSink {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if let Some(error) = self.injected_error.lock().await.take() {
            return Err(error);
        }
        self.objects
            .lock()
            .await
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(format!("memory://{}", key))
    }
}
