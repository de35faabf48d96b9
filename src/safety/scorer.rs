// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! NSFW scoring from a keyword text signal and an optional content scorer

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Keywords whose presence in a prompt yields a 1.0 text signal.
/// Matched case-insensitively as substrings.
pub const NSFW_KEYWORDS: &[&str] = &["nsfw", "nude", "nudity", "explicit", "adult"];

/// Per-category safety scores. The only category currently scored is "nsfw".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyScores {
    pub nsfw: f32,
}

/// Content-based scorer over produced image/video bytes. Implementations are
/// optional at runtime; a failure contributes 0.0, never a request failure.
#[async_trait]
pub trait ContentScorer: Send + Sync {
    async fn score(&self, bytes: &[u8]) -> anyhow::Result<f32>;
}

/// Combines the binary keyword text signal with the optional content signal.
/// The final score per category is the maximum of the contributing signals:
/// one strong signal is sufficient to flag.
pub struct SafetyScorer {
    content: Option<Arc<dyn ContentScorer>>,
}

impl SafetyScorer {
    pub fn new(content: Option<Arc<dyn ContentScorer>>) -> Self {
        Self { content }
    }

    /// Keyword signal: 1.0 when any blocklist keyword appears in the prompt
    /// (case-insensitive substring), 0.0 otherwise. Binary, not graded.
    pub fn text_signal(prompt: &str) -> f32 {
        let lower = prompt.to_lowercase();
        if NSFW_KEYWORDS.iter().any(|k| lower.contains(k)) {
            1.0
        } else {
            0.0
        }
    }

    pub async fn score(&self, prompt: &str, content: Option<&[u8]>) -> SafetyScores {
        let text = Self::text_signal(prompt);

        let content_signal = match (&self.content, content) {
            (Some(scorer), Some(bytes)) => match scorer.score(bytes).await {
                Ok(v) => v.clamp(0.0, 1.0),
                Err(e) => {
                    debug!("Content scorer failed, contributing 0.0: {}", e);
                    0.0
                }
            },
            _ => 0.0,
        };

        SafetyScores {
            nsfw: text.max(content_signal),
        }
    }
}

impl Default for SafetyScorer {
    fn default() -> Self {
        Self::new(None)
    }
}
