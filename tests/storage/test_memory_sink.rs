// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the in-memory artifact sink

use mediaforge_node::storage::{ArtifactSink, MemoryArtifactSink, StorageError};

#[tokio::test]
async fn test_put_returns_retrievable_url() {
    let sink = MemoryArtifactSink::new();
    let url = sink
        .put("txt2img/abc.png", vec![1, 2, 3], "image/png")
        .await
        .unwrap();
    assert_eq!(url, "memory://txt2img/abc.png");
    assert_eq!(sink.object("txt2img/abc.png").await, Some(vec![1, 2, 3]));
    assert_eq!(
        sink.content_type("txt2img/abc.png").await.as_deref(),
        Some("image/png")
    );
    assert_eq!(sink.len().await, 1);
}

#[tokio::test]
async fn test_missing_object_is_none() {
    let sink = MemoryArtifactSink::new();
    assert!(sink.object("nope").await.is_none());
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_injected_error_fails_next_put_only() {
    let sink = MemoryArtifactSink::new();
    sink.inject_error(StorageError::Server("boom".to_string()))
        .await;

    let err = sink.put("k", vec![1], "image/png").await.unwrap_err();
    assert!(matches!(err, StorageError::Server(_)));

    // The injected error is consumed; subsequent writes succeed
    sink.put("k", vec![1], "image/png").await.unwrap();
    assert_eq!(sink.len().await, 1);
}
