//! Tag relay entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration** from environment variables ([`config::ServiceConfig`]).
//! 2. **Wire observability**: `tracing-subscriber` with an env filter, plain or
//!    JSON output, and an optional OpenTelemetry OTLP exporter
//!    ([`telemetry::init`]).
//! 3. **Construct infrastructure**: one pooled HTTP client shared by the
//!    [`github::RawContentFetcher`] and [`github::DispatchClient`] adapters,
//!    injected into a [`pipeline::Relay`].
//! 4. **Serve** the HTTP listener until Ctrl-C or SIGTERM.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use github::{build_http_client, DispatchClient, RawContentFetcher};
use pipeline::Relay;
use tracing::info;

use crate::config::ServiceConfig;

const SERVICE_NAME: &str = "tag-relay";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _telemetry = telemetry::init(SERVICE_NAME)?;

    let config = ServiceConfig::from_env().context("loading configuration")?;
    info!(
        port = config.port,
        api_url = %config.api_url,
        raw_url = %config.raw_url,
        target_repository = %config.target_repository,
        deployment_repository = %config.deployment_repository,
        deployment_branch = %config.deployment_branch,
        default_credential = config.default_credential.is_some(),
        "Configuration loaded"
    );

    let client = build_http_client(config.timeout)?;
    let fetcher = RawContentFetcher::new(
        client.clone(),
        config.raw_url.clone(),
        config.deployment_branch.clone(),
    );
    let sender = DispatchClient::new(client, config.api_url.clone());
    let relay = Arc::new(Relay::new(
        config.relay_settings(),
        Arc::new(fetcher),
        Arc::new(sender),
    ));

    listener::serve(config.listen_addr(), relay)
        .await
        .context("running HTTP listener")?;
    Ok(())
}
