// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::{env, sync::Arc};
use tracing::{info, warn};

use mediaforge_node::api::{start_server, AppState, SessionRateLimiter};
use mediaforge_node::config::NodeConfig;
use mediaforge_node::engine::{BackendInvoker, BackendRegistry, GenerationPipeline};
use mediaforge_node::fetch::ReferenceFetcher;
use mediaforge_node::safety::{RedactionPolicy, SafetyScorer};
use mediaforge_node::storage::{ArtifactSink, MemoryArtifactSink, S3ArtifactSink};

#[derive(Parser, Debug)]
#[command(name = "mediaforge-node", about = "Image/video generation node")]
struct Args {
    /// HTTP listen port (overrides API_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = NodeConfig::from_env();
    if let Some(port) = args.port {
        config.api_port = port;
    }

    info!("{}", mediaforge_node::version::get_version_string());
    info!(
        "Config: port={}, model={}, sidecar={:?}, store={:?}",
        config.api_port, config.model_id, config.sidecar_endpoint, config.s3_endpoint
    );

    let sink: Arc<dyn ArtifactSink> = match config.s3_endpoint.as_deref() {
        Some(endpoint) => Arc::new(S3ArtifactSink::new(endpoint, &config.s3_bucket)?),
        None => {
            warn!("No S3_ENDPOINT configured, artifacts stored in memory only");
            Arc::new(MemoryArtifactSink::new())
        }
    };

    let registry = Arc::new(BackendRegistry::new(config.sidecar_endpoint.clone()));
    if !registry.has_endpoint() {
        warn!("No SIDECAR_ENDPOINT configured, all output will be stub placeholders");
    }

    let pipeline = Arc::new(GenerationPipeline::new(
        registry,
        BackendInvoker::new(config.fail_on_exhausted),
        Arc::clone(&sink),
        SafetyScorer::default(),
        RedactionPolicy::new(config.suppress_primary_on_redaction),
        &config.model_id,
    ));

    let state = AppState {
        pipeline,
        fetcher: Arc::new(ReferenceFetcher::new(config.fetch_allowlist.clone())?),
        sink,
        rate_limiter: Arc::new(SessionRateLimiter::new(config.rate_limit_per_minute)),
        config: Arc::new(config.clone()),
    };

    start_server(state, config.api_port).await
}
