// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod engine;
pub mod fetch;
pub mod safety;
pub mod storage;
pub mod version;

// Re-export main types
pub use api::{build_router, start_server, ApiError, AppState, SessionRateLimiter};
pub use config::NodeConfig;
pub use engine::{
    compute_dimensions, Aspect, BackendInvoker, BackendOutcome, BackendRegistry, Dimensions,
    GenerationBackend, GenerationJob, GenerationPipeline, OperationKind, VideoResolution,
};
pub use fetch::{FetchError, ReferenceFetcher};
pub use safety::{RedactionPolicy, SafetyScorer, SafetyScores};
pub use storage::{ArtifactMetadata, ArtifactSink, MemoryArtifactSink, S3ArtifactSink};
