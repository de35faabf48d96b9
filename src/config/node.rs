// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Node configuration parsed from environment variables

use std::env;

/// Runtime configuration for the node. Every field has a documented default
/// so the node starts with no environment at all (stub backends, in-memory
/// artifact store).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// HTTP listen port (API_PORT)
    pub api_port: u16,
    /// Object store endpoint, e.g. http://minio:9000 (S3_ENDPOINT)
    pub s3_endpoint: Option<String>,
    /// Object store bucket (S3_BUCKET)
    pub s3_bucket: String,
    /// Generation sidecar endpoint (SIDECAR_ENDPOINT)
    pub sidecar_endpoint: Option<String>,
    /// Default model identifier (MODEL_ID)
    pub model_id: String,
    /// Comma-separated URL prefixes allowed for reference fetches
    /// (FETCH_ALLOWLIST); empty permits any http/https URL
    pub fetch_allowlist: Vec<String>,
    /// Whether exhausted resource retries fail the request (FAIL_ON_EXHAUSTED,
    /// default true). When false the request degrades to the stub instead.
    pub fail_on_exhausted: bool,
    /// Whether redaction suppresses the primary output URL
    /// (SUPPRESS_PRIMARY_ON_REDACTION, default false: advisory redaction)
    pub suppress_primary_on_redaction: bool,
    /// Per-session generation requests per minute (RATE_LIMIT_PER_MINUTE)
    pub rate_limit_per_minute: usize,
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| {
            let v = v.to_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(default)
}

impl NodeConfig {
    pub fn from_env() -> Self {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        let fetch_allowlist = env::var("FETCH_ALLOWLIST")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            api_port,
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| "artifacts".to_string()),
            sidecar_endpoint: env::var("SIDECAR_ENDPOINT").ok().filter(|v| !v.is_empty()),
            model_id: env::var("MODEL_ID").unwrap_or_else(|_| "sdxl-base".to_string()),
            fetch_allowlist,
            fail_on_exhausted: env_bool("FAIL_ON_EXHAUSTED", true),
            suppress_primary_on_redaction: env_bool("SUPPRESS_PRIMARY_ON_REDACTION", false),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_port: 8080,
            s3_endpoint: None,
            s3_bucket: "artifacts".to_string(),
            sidecar_endpoint: None,
            model_id: "sdxl-base".to_string(),
            fetch_allowlist: Vec::new(),
            fail_on_exhausted: true,
            suppress_primary_on_redaction: false,
            rate_limit_per_minute: 30,
        }
    }
}
