//! Command implementations

pub mod detect;
pub mod list;
pub mod report;
pub mod version;

use std::time::Duration;

use anyhow::{Context, Result};
use camino::Utf8Path;
use pkgs_observer_core::{InventoryPipeline, PackageManagerId};
use pkgs_observer_report::{AgentConfig, ConfigLoader};

use crate::cli::InventoryArgs;

/// Load the agent config, from `path` when given
pub fn load_config(path: Option<&Utf8Path>) -> Result<AgentConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    loader
        .load()
        .with_context(|| format!("Failed to load configuration from {}", loader.path()))
}

/// Parse a `--manager` value
pub fn parse_manager(name: Option<&str>) -> Result<Option<PackageManagerId>> {
    name.map(|name| name.parse::<PackageManagerId>())
        .transpose()
        .context("Invalid --manager value")
}

/// Package manager timeout; `--command-timeout 0` disables a configured one
fn command_timeout(config: &AgentConfig, args: &InventoryArgs) -> Option<Duration> {
    match args.command_timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.command_timeout(),
    }
}

/// Build the inventory pipeline for the running host
pub fn pipeline(config: &AgentConfig, args: &InventoryArgs) -> Result<InventoryPipeline> {
    let mut pipeline = InventoryPipeline::new().with_timeout(command_timeout(config, args));
    if let Some(id) = parse_manager(args.manager.as_deref())? {
        pipeline = pipeline.with_package_manager(id);
    }
    Ok(pipeline)
}
