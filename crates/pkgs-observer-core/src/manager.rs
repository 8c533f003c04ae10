//! Package-manager selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::DistributionTag;

/// Supported package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerId {
    /// APT (Debian/Ubuntu)
    Apt,
    /// Apk (Alpine)
    Apk,
    /// Pacman (Arch)
    Pacman,
    /// Yum (RHEL/CentOS)
    Yum,
    /// Homebrew (macOS)
    Homebrew,
}

impl PackageManagerId {
    /// All supported package managers
    pub const ALL: [PackageManagerId; 5] = [
        Self::Apt,
        Self::Apk,
        Self::Pacman,
        Self::Yum,
        Self::Homebrew,
    ];

    /// Wire name of the package manager
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Apk => "apk",
            Self::Pacman => "pacman",
            Self::Yum => "yum",
            Self::Homebrew => "homebrew",
        }
    }
}

impl fmt::Display for PackageManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::unsupported_package_manager(s))
    }
}

/// Select the package manager used on a distribution
pub fn select_package_manager(distribution: DistributionTag) -> Result<PackageManagerId> {
    let id = match distribution {
        DistributionTag::Ubuntu | DistributionTag::Debian => PackageManagerId::Apt,
        DistributionTag::Arch => PackageManagerId::Pacman,
        DistributionTag::CentOS => PackageManagerId::Yum,
        DistributionTag::MacOS => PackageManagerId::Homebrew,
    };
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total() {
        let expected = [
            (DistributionTag::Ubuntu, PackageManagerId::Apt),
            (DistributionTag::Debian, PackageManagerId::Apt),
            (DistributionTag::Arch, PackageManagerId::Pacman),
            (DistributionTag::CentOS, PackageManagerId::Yum),
            (DistributionTag::MacOS, PackageManagerId::Homebrew),
        ];
        for (tag, id) in expected {
            assert_eq!(select_package_manager(tag).unwrap(), id, "tag {}", tag);
        }
        assert_eq!(expected.len(), DistributionTag::ALL.len());
    }

    #[test]
    fn test_mapping_is_stable() {
        for tag in DistributionTag::ALL {
            let first = select_package_manager(tag).unwrap();
            let second = select_package_manager(tag).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_package_manager_parse() {
        for id in PackageManagerId::ALL {
            assert_eq!(id.as_str().parse::<PackageManagerId>().unwrap(), id);
        }
        match "brew".parse::<PackageManagerId>() {
            Err(Error::UnsupportedPackageManager { package_manager }) => {
                assert_eq!(package_manager, "brew")
            }
            other => panic!("expected UnsupportedPackageManager, got {:?}", other),
        }
    }

    #[test]
    fn test_package_manager_display() {
        assert_eq!(PackageManagerId::Homebrew.to_string(), "homebrew");
        assert_eq!(PackageManagerId::Apt.to_string(), "apt");
    }
}
