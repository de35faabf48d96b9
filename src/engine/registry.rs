// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Lazily-initialized backend handle cache

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::sidecar::SidecarBackend;

/// Process-wide cache of sidecar backend handles, keyed by model identifier.
///
/// The first caller needing a given model constructs the handle; later callers
/// reuse it read-only. A failed construction leaves the slot empty so a later
/// call can retry. All access goes through `get_or_init`.
pub struct BackendRegistry {
    sidecar_endpoint: Option<String>,
    handles: Mutex<HashMap<String, Arc<SidecarBackend>>>,
}

impl BackendRegistry {
    pub fn new(sidecar_endpoint: Option<String>) -> Self {
        Self {
            sidecar_endpoint: sidecar_endpoint.map(|e| e.trim_end_matches('/').to_string()),
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Whether any sidecar endpoint is configured at all
    pub fn has_endpoint(&self) -> bool {
        self.sidecar_endpoint.is_some()
    }

    /// Get the cached handle for a model, constructing it on first use.
    /// Returns `None` when no sidecar endpoint is configured or construction
    /// fails; the cache stays empty on failure.
    pub async fn get_or_init(&self, model_id: &str) -> Option<Arc<SidecarBackend>> {
        let endpoint = self.sidecar_endpoint.as_deref()?;
        let mut handles = self.handles.lock().await;
        if let Some(existing) = handles.get(model_id) {
            return Some(Arc::clone(existing));
        }
        match SidecarBackend::new(endpoint, model_id) {
            Ok(backend) => {
                debug!("Initialized sidecar backend for model {}", model_id);
                let handle = Arc::new(backend);
                handles.insert(model_id.to_string(), Arc::clone(&handle));
                Some(handle)
            }
            Err(e) => {
                warn!("Failed to initialize backend for model {}: {}", model_id, e);
                None
            }
        }
    }

    /// Number of initialized handles (test visibility)
    pub async fn initialized_count(&self) -> usize {
        self.handles.lock().await.len()
    }
}
