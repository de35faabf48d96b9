// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the dimension policy

use mediaforge_node::engine::{
    compute_dimensions, Aspect, Dimensions, VideoResolution, FULL_BASE, PREVIEW_BASE,
};

#[test]
fn test_all_aspects_yield_positive_dimensions() {
    let aspects = [
        Aspect::Square,
        Aspect::Wide16x9,
        Aspect::Tall9x16,
        Aspect::Wide3x2,
        Aspect::Tall2x3,
    ];
    for aspect in aspects {
        for preview in [false, true] {
            let dims = compute_dimensions(aspect, preview);
            assert!(dims.width > 0, "{:?} preview={} width", aspect, preview);
            assert!(dims.height > 0, "{:?} preview={} height", aspect, preview);
        }
    }
}

#[test]
fn test_dimensions_are_deterministic() {
    for aspect in [Aspect::Square, Aspect::Wide16x9, Aspect::Tall2x3] {
        for preview in [false, true] {
            let first = compute_dimensions(aspect, preview);
            let second = compute_dimensions(aspect, preview);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_square_full_resolution() {
    let dims = compute_dimensions(Aspect::Square, false);
    assert_eq!(dims, Dimensions::new(FULL_BASE, FULL_BASE));
}

#[test]
fn test_preview_halves_base_size() {
    let dims = compute_dimensions(Aspect::Square, true);
    assert_eq!(dims, Dimensions::new(PREVIEW_BASE, PREVIEW_BASE));
    assert_eq!(PREVIEW_BASE * 2, FULL_BASE);
}

#[test]
fn test_wide_16_9_uses_integer_ratio_math() {
    // width = base * 16 / 9, floored
    let full = compute_dimensions(Aspect::Wide16x9, false);
    assert_eq!(full, Dimensions::new(768 * 16 / 9, 768));
    assert_eq!(full.width, 1365);

    let preview = compute_dimensions(Aspect::Wide16x9, true);
    assert_eq!(preview, Dimensions::new(682, 384));
}

#[test]
fn test_portrait_aspects() {
    let tall = compute_dimensions(Aspect::Tall9x16, false);
    assert_eq!(tall, Dimensions::new(768 * 9 / 16, 768));
    assert!(tall.width < tall.height);

    let tall23 = compute_dimensions(Aspect::Tall2x3, false);
    assert_eq!(tall23, Dimensions::new(512, 768));
}

#[test]
fn test_unrecognized_aspect_normalizes_to_square() {
    assert_eq!(Aspect::from_tag(Some("4:3")), Aspect::Square);
    assert_eq!(Aspect::from_tag(Some("")), Aspect::Square);
    assert_eq!(Aspect::from_tag(Some("16x9")), Aspect::Square);
    assert_eq!(Aspect::from_tag(None), Aspect::Square);

    let invalid = compute_dimensions(Aspect::from_tag(Some("banana")), true);
    let square = compute_dimensions(Aspect::Square, true);
    assert_eq!(invalid, square);
}

#[test]
fn test_recognized_aspect_tags_round_trip() {
    for tag in ["1:1", "16:9", "9:16", "3:2", "2:3"] {
        assert_eq!(Aspect::from_tag(Some(tag)).tag(), tag);
    }
}

#[test]
fn test_video_resolution_presets_ignore_aspect() {
    assert_eq!(
        VideoResolution::from_tag(Some("576p")).dimensions(),
        Dimensions::new(1024, 576)
    );
    assert_eq!(
        VideoResolution::from_tag(Some("720p")).dimensions(),
        Dimensions::new(1280, 720)
    );
    // Any other present tag selects 720p
    assert_eq!(
        VideoResolution::from_tag(Some("1080p")).dimensions(),
        Dimensions::new(1280, 720)
    );
}

#[test]
fn test_missing_resolution_defaults_to_576p() {
    let preset = VideoResolution::from_tag(None);
    assert_eq!(preset.dimensions(), Dimensions::new(1024, 576));
    assert_eq!(preset.tag(), "576p");
}

#[test]
fn test_halved_dimensions() {
    let dims = Dimensions::new(1024, 576);
    assert_eq!(dims.halved(), Dimensions::new(512, 288));
    assert_eq!(dims.halved().halved(), Dimensions::new(256, 144));
    // Never collapses to zero
    assert_eq!(Dimensions::new(1, 1).halved(), Dimensions::new(1, 1));
}
