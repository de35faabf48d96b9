// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the MediaForge node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-stub-fallback-2026-08-30";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-30";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "txt2img",
    "img2img",
    "inpaint",
    "controlnet",
    "text-to-video",
    "animate",
    "stylize",
    "edit-ops",
    "stub-fallback",
    "safety-scoring",
    "advisory-redaction",
    "rate-limiting",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("MediaForge Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
