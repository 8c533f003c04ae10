//! # pkgs-observer-report
//!
//! Turns a package inventory into a report and delivers it:
//! - Agent configuration (defaults, YAML file, environment)
//! - Host identity (hostname, protected machine id)
//! - JSON envelope
//! - Single-shot HTTP delivery to the ingest endpoint

pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod payload;

pub use client::{user_agent, IngestClient};
pub use config::{AgentConfig, ConfigLoader};
pub use error::{Error, Result};
pub use host::HostIdentity;
pub use payload::{Payload, SCHEMA_VERSION};

use pkgs_observer_core::{Inventory, InventoryPipeline};
use tracing::info;

/// Build the report for an inventory using the running host's identity
pub async fn assemble(inventory: Inventory, config: &AgentConfig) -> Result<Payload> {
    let host = HostIdentity::collect(&config.app_id, config.send_machine_id).await?;
    Ok(Payload::new(inventory, host))
}

/// Run the pipeline and build the report, without sending it
pub async fn collect(pipeline: &InventoryPipeline, config: &AgentConfig) -> Result<Payload> {
    let inventory = pipeline.run().await?;
    assemble(inventory, config).await
}

/// Run the pipeline and post the report
///
/// The first failure ends the run; nothing reaches the endpoint unless the
/// whole inventory was collected.
pub async fn report(
    pipeline: &InventoryPipeline,
    config: &AgentConfig,
    client: &IngestClient,
) -> Result<Payload> {
    let payload = collect(pipeline, config).await?;
    client.send(&payload).await?;

    info!(
        "Reported {} package(s) for {}",
        payload.packages.len(),
        payload.hostname
    );
    Ok(payload)
}
