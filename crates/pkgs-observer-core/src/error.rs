//! Error types for pkgs-observer-core

use std::io;

use thiserror::Error;

/// Result type alias using pkgs-observer-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the inventory pipeline
///
/// Every stage returns these to its caller without local recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// The operating system family is neither Linux nor macOS
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// A supported family, but no distribution could be matched
    #[error("Unsupported distribution: {distribution}")]
    UnsupportedDistribution { distribution: String },

    /// A package manager with no known upgradable-list command
    #[error("Unsupported package manager: {package_manager}")]
    UnsupportedPackageManager { package_manager: String },

    /// The package manager could not be run, or it failed
    #[error("Failed to execute `{command}`: {source}")]
    CommandExecutionFailed {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an unsupported platform error
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create an unsupported distribution error
    pub fn unsupported_distribution(distribution: impl Into<String>) -> Self {
        Self::UnsupportedDistribution {
            distribution: distribution.into(),
        }
    }

    /// Create an unsupported package manager error
    pub fn unsupported_package_manager(package_manager: impl Into<String>) -> Self {
        Self::UnsupportedPackageManager {
            package_manager: package_manager.into(),
        }
    }

    /// Create a command execution error
    pub fn command_failed(command: impl Into<String>, source: io::Error) -> Self {
        Self::CommandExecutionFailed {
            command: command.into(),
            source,
        }
    }
}
