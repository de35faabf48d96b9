// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safety scoring and redaction policy for generated content

pub mod redaction;
pub mod scorer;

pub use redaction::{RedactionDecision, RedactionPolicy, MODE_NEVER_REDACT, MODE_REDACT_IF_UNSAFE};
pub use scorer::{ContentScorer, SafetyScorer, SafetyScores, NSFW_KEYWORDS};
