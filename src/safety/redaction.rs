// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Redaction policy applied to scored outputs

use serde::{Deserialize, Serialize};

use super::scorer::SafetyScores;

/// Caller mode: redact when the combined score flags the output
pub const MODE_REDACT_IF_UNSAFE: u8 = 1;

/// Caller mode: never redact, regardless of score
pub const MODE_NEVER_REDACT: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionDecision {
    pub redact: bool,
}

/// Decides whether a redacted preview accompanies (or, when
/// `suppress_primary` is set, replaces) the primary output.
#[derive(Debug, Clone, Copy)]
pub struct RedactionPolicy {
    pub suppress_primary: bool,
}

impl RedactionPolicy {
    pub fn new(suppress_primary: bool) -> Self {
        Self { suppress_primary }
    }

    /// Mode 2 never redacts; any other mode redacts on a non-zero nsfw score.
    pub fn decide(&self, scores: &SafetyScores, mode: u8) -> RedactionDecision {
        let redact = mode != MODE_NEVER_REDACT && scores.nsfw > 0.0;
        RedactionDecision { redact }
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(false)
    }
}
