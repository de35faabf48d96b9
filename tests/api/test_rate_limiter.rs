// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the per-session rate limiter

use mediaforge_node::api::SessionRateLimiter;
use std::time::Duration;

#[test]
fn test_unknown_session_is_admitted() {
    let limiter = SessionRateLimiter::new(5);
    assert!(limiter.try_acquire("sess-1"));
}

#[test]
fn test_allowance_is_consumed_per_session() {
    let limiter = SessionRateLimiter::new(3);
    for _ in 0..3 {
        assert!(limiter.try_acquire("sess-1"));
    }
    assert!(!limiter.try_acquire("sess-1"));
    // Other sessions are unaffected
    assert!(limiter.try_acquire("sess-2"));
}

#[test]
fn test_denied_acquire_does_not_extend_the_window() {
    let limiter = SessionRateLimiter::with_window(1, Duration::from_millis(30));
    assert!(limiter.try_acquire("sess-1"));
    // Denied attempts must not count as activity
    assert!(!limiter.try_acquire("sess-1"));
    assert!(!limiter.try_acquire("sess-1"));

    std::thread::sleep(Duration::from_millis(50));
    assert!(limiter.try_acquire("sess-1"));
}

#[test]
fn test_window_expiry_restores_allowance() {
    let limiter = SessionRateLimiter::with_window(1, Duration::from_millis(30));
    assert!(limiter.try_acquire("sess-1"));
    assert!(!limiter.try_acquire("sess-1"));

    std::thread::sleep(Duration::from_millis(50));
    assert!(limiter.try_acquire("sess-1"));
}

#[test]
fn test_idle_sessions_are_pruned() {
    let limiter = SessionRateLimiter::with_window(5, Duration::from_millis(30));
    assert!(limiter.try_acquire("sess-1"));
    assert!(limiter.try_acquire("sess-2"));
    assert_eq!(limiter.tracked_sessions(), 2);

    std::thread::sleep(Duration::from_millis(50));
    // The next acquire sweeps out sessions with no activity in the window
    assert!(limiter.try_acquire("sess-3"));
    assert_eq!(limiter.tracked_sessions(), 1);
}
