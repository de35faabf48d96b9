// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ordered-candidate backend invocation with bounded retry on exhaustion

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::backend::{BackendOutcome, GenerationBackend, GenerationJob};
use super::dims::Dimensions;
use super::stub::{self, STUB_BACKEND_ID};

/// Additional attempts granted after the first `ResourceExhausted`,
/// each at halved resolution
pub const MAX_EXHAUSTION_RETRIES: u32 = 2;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("generation exhausted resources after {attempts} attempts: {reason}")]
    Exhausted { attempts: u32, reason: String },
}

/// Successful invocation result with the dimensions actually used
#[derive(Debug, Clone)]
pub struct InvokeSuccess {
    pub bytes: Vec<u8>,
    pub dims: Dimensions,
    pub backend_id: String,
    pub stubbed: bool,
}

/// Attempts an ordered list of candidate backends and falls back to the
/// deterministic stub when every candidate is unavailable.
///
/// Retry contract: an unavailable candidate is skipped immediately and the
/// next candidate sees the original dimensions. A resource-exhausted candidate
/// is retried at halved resolution up to `MAX_EXHAUSTION_RETRIES` times; a
/// third exhaustion is fatal when `fail_on_exhausted` is set, otherwise the
/// chain continues toward the stub.
pub struct BackendInvoker {
    fail_on_exhausted: bool,
}

impl BackendInvoker {
    pub fn new(fail_on_exhausted: bool) -> Self {
        Self { fail_on_exhausted }
    }

    pub async fn generate(
        &self,
        job: &GenerationJob,
        dims: Dimensions,
        candidates: &[Arc<dyn GenerationBackend>],
    ) -> Result<InvokeSuccess, InvokeError> {
        for backend in candidates {
            let mut attempt_dims = dims;
            for attempt in 0..=MAX_EXHAUSTION_RETRIES {
                match backend.invoke(job, attempt_dims).await {
                    BackendOutcome::Success(bytes) => {
                        debug!(
                            "Backend {} produced {} bytes at {}",
                            backend.id(),
                            bytes.len(),
                            attempt_dims
                        );
                        return Ok(InvokeSuccess {
                            bytes,
                            dims: attempt_dims,
                            backend_id: backend.id().to_string(),
                            stubbed: false,
                        });
                    }
                    BackendOutcome::Unavailable { reason } => {
                        debug!("Backend {} unavailable: {}", backend.id(), reason);
                        break;
                    }
                    BackendOutcome::ResourceExhausted { reason } => {
                        if attempt == MAX_EXHAUSTION_RETRIES {
                            warn!(
                                "Backend {} exhausted after {} attempts: {}",
                                backend.id(),
                                attempt + 1,
                                reason
                            );
                            if self.fail_on_exhausted {
                                return Err(InvokeError::Exhausted {
                                    attempts: attempt + 1,
                                    reason,
                                });
                            }
                            break;
                        }
                        attempt_dims = attempt_dims.halved();
                        warn!(
                            "Backend {} exhausted ({}), retrying at {}",
                            backend.id(),
                            reason,
                            attempt_dims
                        );
                    }
                }
            }
        }

        debug!("All candidates exhausted, producing stub output at {}", dims);
        Ok(InvokeSuccess {
            bytes: stub::generate(job, dims),
            dims,
            backend_id: STUB_BACKEND_ID.to_string(),
            stubbed: true,
        })
    }
}
