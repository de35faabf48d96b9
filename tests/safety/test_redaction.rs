// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the redaction policy

use mediaforge_node::safety::{
    RedactionPolicy, SafetyScores, MODE_NEVER_REDACT, MODE_REDACT_IF_UNSAFE,
};

fn scores(nsfw: f32) -> SafetyScores {
    SafetyScores { nsfw }
}

#[test]
fn test_mode_two_never_redacts() {
    let policy = RedactionPolicy::default();
    assert!(!policy.decide(&scores(0.0), MODE_NEVER_REDACT).redact);
    assert!(!policy.decide(&scores(0.5), MODE_NEVER_REDACT).redact);
    assert!(!policy.decide(&scores(1.0), MODE_NEVER_REDACT).redact);
}

#[test]
fn test_mode_one_redacts_on_any_positive_score() {
    let policy = RedactionPolicy::default();
    assert!(policy.decide(&scores(1.0), MODE_REDACT_IF_UNSAFE).redact);
    assert!(policy.decide(&scores(0.01), MODE_REDACT_IF_UNSAFE).redact);
    assert!(!policy.decide(&scores(0.0), MODE_REDACT_IF_UNSAFE).redact);
}

#[test]
fn test_unknown_modes_behave_like_redact_if_unsafe() {
    let policy = RedactionPolicy::default();
    assert!(policy.decide(&scores(0.7), 0).redact);
    assert!(policy.decide(&scores(0.7), 9).redact);
    assert!(!policy.decide(&scores(0.0), 0).redact);
}

#[test]
fn test_suppress_primary_flag_does_not_change_decision() {
    let advisory = RedactionPolicy::new(false);
    let enforced = RedactionPolicy::new(true);
    assert_eq!(
        advisory.decide(&scores(1.0), MODE_REDACT_IF_UNSAFE).redact,
        enforced.decide(&scores(1.0), MODE_REDACT_IF_UNSAFE).redact
    );
    assert!(enforced.suppress_primary);
    assert!(!advisory.suppress_primary);
}
