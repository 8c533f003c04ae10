//! Report envelope

use pkgs_observer_core::{DistributionTag, Inventory, PackageManagerId, PackageRecord};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::HostIdentity;

/// Envelope schema version
pub const SCHEMA_VERSION: &str = "1";

/// JSON body posted to the ingest endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Envelope schema version
    pub version: String,

    /// Reporting host
    pub hostname: String,

    /// Protected machine id, omitted when unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,

    pub distribution: DistributionTag,

    pub package_manager: PackageManagerId,

    /// Upgradable packages, one raw output line each
    pub packages: Vec<PackageRecord>,
}

impl Payload {
    /// Assemble the envelope for an inventory
    pub fn new(inventory: Inventory, host: HostIdentity) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            hostname: host.hostname,
            machine_id: host.machine_id,
            distribution: inventory.distribution,
            package_manager: inventory.package_manager,
            packages: inventory.packages,
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
