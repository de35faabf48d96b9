// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end pipeline tests with the in-memory sink and no real backends

use std::sync::Arc;

use mediaforge_node::engine::{
    compute_dimensions, Aspect, BackendInvoker, BackendRegistry, GenerationJob,
    GenerationPipeline, OperationKind, PipelineError, VideoResolution,
};
use mediaforge_node::safety::{RedactionPolicy, SafetyScorer, MODE_NEVER_REDACT, MODE_REDACT_IF_UNSAFE};
use mediaforge_node::storage::{ArtifactSink, MemoryArtifactSink, StorageError};

fn make_pipeline(suppress_primary: bool) -> (GenerationPipeline, Arc<MemoryArtifactSink>) {
    let sink = Arc::new(MemoryArtifactSink::new());
    let pipeline = GenerationPipeline::new(
        Arc::new(BackendRegistry::new(None)),
        BackendInvoker::new(true),
        Arc::clone(&sink) as Arc<dyn ArtifactSink>,
        SafetyScorer::default(),
        RedactionPolicy::new(suppress_primary),
        "sdxl-base",
    );
    (pipeline, sink)
}

#[tokio::test]
async fn test_clean_prompt_produces_stored_preview_artifact() {
    let (pipeline, sink) = make_pipeline(false);
    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "a calm lake at sunrise");
    let dims = compute_dimensions(Aspect::from_tag(Some("16:9")), true);

    let output = pipeline
        .run(job, dims, None, MODE_REDACT_IF_UNSAFE)
        .await
        .unwrap();

    let url = output.output_url.expect("primary output present");
    assert!(url.starts_with("memory://txt2img/"));
    assert!(url.ends_with(".png"));
    assert!(output.preview_urls.is_empty());
    assert_eq!(output.safety_scores.nsfw, 0.0);
    assert_eq!(output.artifact.width, 682);
    assert_eq!(output.artifact.height, 384);
    assert!(output.stubbed);
    assert!(!output.model_hash.is_empty());
    assert_eq!(sink.len().await, 1);

    let key = url.strip_prefix("memory://").unwrap();
    let stored = sink.object(key).await.unwrap();
    assert_eq!(stored.len() as u64, output.artifact.byte_length);
    assert_eq!(sink.content_type(key).await.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_flagged_prompt_gets_one_redacted_preview() {
    let (pipeline, sink) = make_pipeline(false);
    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "explicit nsfw content");
    let dims = compute_dimensions(Aspect::from_tag(None), false);

    let output = pipeline
        .run(job, dims, None, MODE_REDACT_IF_UNSAFE)
        .await
        .unwrap();

    assert_eq!(output.safety_scores.nsfw, 1.0);
    assert_eq!(output.preview_urls.len(), 1);
    assert!(output.preview_urls[0].ends_with("-redacted.png"));
    // Advisory by default: the primary artifact is still returned
    assert!(output.output_url.is_some());
    assert_eq!(sink.len().await, 2);
}

#[tokio::test]
async fn test_mode_never_redact_skips_preview() {
    let (pipeline, sink) = make_pipeline(false);
    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "explicit nsfw content");
    let dims = compute_dimensions(Aspect::from_tag(None), false);

    let output = pipeline.run(job, dims, None, MODE_NEVER_REDACT).await.unwrap();

    assert_eq!(output.safety_scores.nsfw, 1.0);
    assert!(output.preview_urls.is_empty());
    assert!(output.output_url.is_some());
    assert_eq!(sink.len().await, 1);
}

#[tokio::test]
async fn test_suppress_primary_hides_output_url() {
    let (pipeline, _sink) = make_pipeline(true);
    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "nude figure study");
    let dims = compute_dimensions(Aspect::from_tag(None), false);

    let output = pipeline
        .run(job, dims, None, MODE_REDACT_IF_UNSAFE)
        .await
        .unwrap();

    assert!(output.output_url.is_none());
    assert_eq!(output.preview_urls.len(), 1);
}

#[tokio::test]
async fn test_storage_failure_is_fatal() {
    let (pipeline, sink) = make_pipeline(false);
    sink.inject_error(StorageError::Server("503: slow down".to_string()))
        .await;

    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "a calm lake at sunrise");
    let dims = compute_dimensions(Aspect::from_tag(None), false);

    let err = pipeline
        .run(job, dims, None, MODE_REDACT_IF_UNSAFE)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Storage(_)));
}

#[tokio::test]
async fn test_video_job_stores_mp4_artifact() {
    let (pipeline, sink) = make_pipeline(false);
    let mut job = GenerationJob::from_prompt(OperationKind::TextToVideo, "waves on a beach");
    job.fps = 12;
    job.duration_sec = 2;
    let dims = VideoResolution::from_tag(Some("576p")).dimensions();

    let output = pipeline
        .run(job, dims, None, MODE_REDACT_IF_UNSAFE)
        .await
        .unwrap();

    let url = output.output_url.unwrap();
    assert!(url.starts_with("memory://t2v/"));
    assert!(url.ends_with(".mp4"));
    assert_eq!(output.artifact.width, 1024);
    assert_eq!(output.artifact.height, 576);

    let key = url.strip_prefix("memory://").unwrap();
    assert_eq!(sink.content_type(key).await.as_deref(), Some("video/mp4"));
}

#[tokio::test]
async fn test_unknown_mode_behaves_like_redact_if_unsafe() {
    let (pipeline, _sink) = make_pipeline(false);
    let job = GenerationJob::from_prompt(OperationKind::Txt2Img, "explicit nsfw content");
    let dims = compute_dimensions(Aspect::from_tag(None), false);

    let output = pipeline.run(job, dims, None, 7).await.unwrap();
    assert_eq!(output.preview_urls.len(), 1);
}
