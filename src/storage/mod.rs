// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod artifact_sink;
pub mod metadata;

pub use artifact_sink::{ArtifactSink, MemoryArtifactSink, S3ArtifactSink, StorageError};
pub use metadata::ArtifactMetadata;
