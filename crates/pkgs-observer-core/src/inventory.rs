//! Package inventory pipeline
//!
//! Platform identification, package-manager selection, command dispatch and
//! output normalization, run once and in that order. The first failing stage
//! ends the run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::command::{dispatch, CommandSpec};
use crate::error::Result;
use crate::manager::{select_package_manager, PackageManagerId};
use crate::normalizer::{OutputNormalizer, PackageRecord};
use crate::platform::{DistributionTag, PlatformIdentifier};

/// Upgradable packages of one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub distribution: DistributionTag,
    pub package_manager: PackageManagerId,
    pub packages: Vec<PackageRecord>,
}

/// What the pipeline would run, without running it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryPlan {
    pub distribution: DistributionTag,
    pub package_manager: PackageManagerId,
    pub command: CommandSpec,
}

/// Configurable inventory pipeline
#[derive(Debug, Clone, Default)]
pub struct InventoryPipeline {
    identifier: PlatformIdentifier,
    manager_override: Option<PackageManagerId>,
    normalizer: OutputNormalizer,
}

impl InventoryPipeline {
    /// Pipeline for the running host
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different platform identifier
    pub fn with_identifier(mut self, identifier: PlatformIdentifier) -> Self {
        self.identifier = identifier;
        self
    }

    /// Skip package-manager selection and use `id`
    ///
    /// The platform is still identified, so unsupported hosts fail as usual.
    pub fn with_package_manager(mut self, id: PackageManagerId) -> Self {
        self.manager_override = Some(id);
        self
    }

    /// Bound the package manager's run time
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.normalizer = match timeout {
            Some(limit) => OutputNormalizer::with_timeout(limit),
            None => OutputNormalizer::new(),
        };
        self
    }

    /// Resolve distribution, package manager and command
    pub fn plan(&self) -> Result<InventoryPlan> {
        let distribution = self.identifier.identify()?;
        let package_manager = match self.manager_override {
            Some(id) => id,
            None => select_package_manager(distribution)?,
        };
        let command = dispatch(package_manager)?;

        info!(
            "Using {} on {}: `{}`",
            package_manager, distribution, command
        );

        Ok(InventoryPlan {
            distribution,
            package_manager,
            command,
        })
    }

    /// Produce the package inventory
    pub async fn run(&self) -> Result<Inventory> {
        let plan = self.plan()?;
        let packages = self.normalizer.run(&plan.command).await?;

        info!("Found {} upgradable package(s)", packages.len());

        Ok(Inventory {
            distribution: plan.distribution,
            package_manager: plan.package_manager,
            packages,
        })
    }
}

/// Produce the package inventory of the running host
pub async fn produce_inventory() -> Result<Inventory> {
    InventoryPipeline::new().run().await
}
