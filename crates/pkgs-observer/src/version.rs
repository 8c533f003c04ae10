//! Version information for the pkgs-observer CLI

use serde::{Deserialize, Serialize};

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: String,

    /// User agent sent with reports
    pub user_agent: String,

    /// Report envelope schema version
    pub schema_version: String,
}

impl VersionInfo {
    /// Create version info for current build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            user_agent: pkgs_observer_report::user_agent(),
            schema_version: pkgs_observer_report::SCHEMA_VERSION.to_string(),
        }
    }

    /// Format as display string
    pub fn display(&self) -> String {
        format!("pkgs-observer {}", self.version)
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
