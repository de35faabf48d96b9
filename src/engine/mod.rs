// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation engine: dimension policy, backend contract, invocation, pipeline

pub mod backend;
pub mod dims;
pub mod invoker;
pub mod pipeline;
pub mod registry;
pub mod sidecar;
pub mod stub;

pub use backend::{
    BackendOutcome, ControlInput, ControlKind, GenerationBackend, GenerationJob, OperationKind,
};
pub use dims::{compute_dimensions, Aspect, Dimensions, VideoResolution, FULL_BASE, PREVIEW_BASE};
pub use invoker::{BackendInvoker, InvokeError, InvokeSuccess, MAX_EXHAUSTION_RETRIES};
pub use pipeline::{model_hash, GenerationPipeline, PipelineError, PipelineOutput};
pub use registry::BackendRegistry;
pub use sidecar::SidecarBackend;
pub use stub::{StubBackend, STUB_BACKEND_ID};
