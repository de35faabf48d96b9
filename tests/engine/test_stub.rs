// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the deterministic placeholder generator

use mediaforge_node::engine::stub::{
    placeholder_image, placeholder_video, redacted_preview_png, REDACTED_GRAY,
    REDACTED_PREVIEW_SIZE,
};
use mediaforge_node::engine::Dimensions;

#[test]
fn test_placeholder_image_decodes_at_requested_dims() {
    let dims = Dimensions::new(682, 384);
    let bytes = placeholder_image(dims);
    assert!(!bytes.is_empty());

    let img = image::load_from_memory(&bytes).expect("placeholder must be a valid image");
    assert_eq!(img.width(), 682);
    assert_eq!(img.height(), 384);
}

#[test]
fn test_placeholder_image_is_deterministic() {
    let dims = Dimensions::new(256, 256);
    assert_eq!(placeholder_image(dims), placeholder_image(dims));
}

#[test]
fn test_placeholder_image_differs_across_dims() {
    assert_ne!(
        placeholder_image(Dimensions::new(256, 256)),
        placeholder_image(Dimensions::new(384, 384))
    );
}

#[test]
fn test_redacted_preview_is_uniform_gray() {
    let bytes = redacted_preview_png();
    let img = image::load_from_memory(&bytes).expect("redacted preview must decode");
    assert_eq!(img.width(), REDACTED_PREVIEW_SIZE);
    assert_eq!(img.height(), REDACTED_PREVIEW_SIZE);

    let rgb = img.to_rgb8();
    let center = rgb.get_pixel(REDACTED_PREVIEW_SIZE / 2, REDACTED_PREVIEW_SIZE / 2);
    assert_eq!(center.0, [REDACTED_GRAY, REDACTED_GRAY, REDACTED_GRAY]);
}

#[test]
fn test_placeholder_video_is_framed_and_deterministic() {
    let dims = Dimensions::new(1024, 576);
    let bytes = placeholder_video(dims, 12, 4);
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[0..4], b"MFV0");
    // Header (20 bytes) plus one 16-byte record per frame
    assert_eq!(bytes.len(), 20 + 12 * 4 * 16);
    assert_eq!(bytes, placeholder_video(dims, 12, 4));
}

#[test]
fn test_placeholder_video_scales_with_fps_and_duration() {
    let dims = Dimensions::new(1280, 720);
    let short = placeholder_video(dims, 12, 4);
    let long = placeholder_video(dims, 24, 8);
    assert!(long.len() > short.len());
}
