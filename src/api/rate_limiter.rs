// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-session sliding-window rate limiter for generation requests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window limiter keyed by session id. Admission and recording are a
/// single `try_acquire` call under one lock, so two concurrent requests from
/// the same session cannot both slip under the limit. Requests without a
/// session id are not limited; that decision sits with the handlers.
pub struct SessionRateLimiter {
    sessions: Mutex<HashMap<String, VecDeque<Instant>>>,
    max_per_window: usize,
    window: Duration,
}

impl SessionRateLimiter {
    /// Create a limiter with a default 60-second window
    pub fn new(max_per_minute: usize) -> Self {
        Self::with_window(max_per_minute, Duration::from_secs(60))
    }

    /// Create a limiter with a custom window duration (for testing)
    pub fn with_window(max_per_window: usize, window: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_per_window,
            window,
        }
    }

    /// Admit a request for the session, recording it on success. Returns
    /// `false` when the session already spent its allowance for the current
    /// window. Sessions whose entire history has aged out are dropped on the
    /// way, so the map only holds sessions active within the last window.
    pub fn try_acquire(&self, session_id: &str) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().unwrap();

        sessions.retain(|_, stamps| {
            while stamps
                .front()
                .is_some_and(|&t| now.duration_since(t) >= self.window)
            {
                stamps.pop_front();
            }
            !stamps.is_empty()
        });

        let stamps = sessions.entry(session_id.to_string()).or_default();
        if stamps.len() >= self.max_per_window {
            return false;
        }
        stamps.push_back(now);
        true
    }

    /// Number of sessions currently tracked (test visibility)
    pub fn tracked_sessions(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}
