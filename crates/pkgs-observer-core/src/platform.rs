//! Platform identification module
//!
//! Maps the running host to a distribution tag. Linux distributions are told
//! apart by marker files under `/etc`, checked in a fixed priority order.
//! macOS needs no further disambiguation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Distribution marker files, in priority order.
///
/// Ubuntu also ships `/etc/debian_version`, so `/etc/lsb-release` must be
/// probed first.
pub const MARKER_FILES: [(&str, DistributionTag); 4] = [
    ("/etc/lsb-release", DistributionTag::Ubuntu),
    ("/etc/debian_version", DistributionTag::Debian),
    ("/etc/arch-release", DistributionTag::Arch),
    ("/etc/centos-release", DistributionTag::CentOS),
];

/// Operating system family
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Linux
    Linux,
    /// macOS (Darwin)
    MacOS,
    /// Anything else, keeping the reported name
    Other(String),
}

impl OsFamily {
    /// The family of the running host
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name to a family
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOS,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOS => write!(f, "macos"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Supported distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionTag {
    Ubuntu,
    Debian,
    Arch,
    CentOS,
    MacOS,
}

impl DistributionTag {
    /// All supported tags
    pub const ALL: [DistributionTag; 5] = [
        Self::Ubuntu,
        Self::Debian,
        Self::Arch,
        Self::CentOS,
        Self::MacOS,
    ];

    /// Wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::Debian => "debian",
            Self::Arch => "arch",
            Self::CentOS => "centos",
            Self::MacOS => "macos",
        }
    }
}

impl fmt::Display for DistributionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| Error::unsupported_distribution(s))
    }
}

/// Identifies the distribution of a host
///
/// Marker paths are resolved under `root`, which is `/` for the live host.
#[derive(Debug, Clone)]
pub struct PlatformIdentifier {
    family: OsFamily,
    root: PathBuf,
}

impl PlatformIdentifier {
    /// Identifier for the running host
    pub fn new() -> Self {
        Self {
            family: OsFamily::current(),
            root: PathBuf::from("/"),
        }
    }

    /// Identifier for a simulated host whose filesystem lives under `root`
    pub fn with_root(family: OsFamily, root: impl Into<PathBuf>) -> Self {
        Self {
            family,
            root: root.into(),
        }
    }

    /// The OS family being identified
    pub fn family(&self) -> &OsFamily {
        &self.family
    }

    /// Identify the distribution
    pub fn identify(&self) -> Result<DistributionTag> {
        let tag = match &self.family {
            OsFamily::Linux => self.identify_linux()?,
            OsFamily::MacOS => DistributionTag::MacOS,
            OsFamily::Other(os) => return Err(Error::unsupported_platform(os.as_str())),
        };

        info!("Detected distribution: {}", tag);
        Ok(tag)
    }

    fn identify_linux(&self) -> Result<DistributionTag> {
        for (marker, tag) in MARKER_FILES {
            let path = self.resolve(marker);
            let present = path.exists();
            debug!("Marker {} present: {}", path.display(), present);
            if present {
                return Ok(tag);
            }
        }

        Err(Error::unsupported_distribution(
            "no known distribution marker found",
        ))
    }

    fn resolve(&self, marker: &str) -> PathBuf {
        let relative = Path::new(marker).strip_prefix("/").unwrap_or(Path::new(marker));
        self.root.join(relative)
    }
}

impl Default for PlatformIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn host_with_markers(markers: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        for marker in markers {
            let path = root.path().join(marker.trim_start_matches('/'));
            fs::write(path, "").unwrap();
        }
        root
    }

    #[test]
    fn test_os_family_from_name() {
        assert_eq!(OsFamily::from_os_name("linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_os_name("macos"), OsFamily::MacOS);
        assert_eq!(
            OsFamily::from_os_name("windows"),
            OsFamily::Other("windows".to_string())
        );
    }

    #[test]
    fn test_ubuntu_wins_over_debian() {
        let root = host_with_markers(&["/etc/lsb-release", "/etc/debian_version"]);
        let identifier = PlatformIdentifier::with_root(OsFamily::Linux, root.path());
        assert_eq!(identifier.identify().unwrap(), DistributionTag::Ubuntu);
    }

    #[test]
    fn test_each_marker_alone() {
        for (marker, expected) in MARKER_FILES {
            let root = host_with_markers(&[marker]);
            let identifier = PlatformIdentifier::with_root(OsFamily::Linux, root.path());
            assert_eq!(identifier.identify().unwrap(), expected, "marker {}", marker);
        }
    }

    #[test]
    fn test_debian_before_arch_and_centos() {
        let root = host_with_markers(&[
            "/etc/centos-release",
            "/etc/arch-release",
            "/etc/debian_version",
        ]);
        let identifier = PlatformIdentifier::with_root(OsFamily::Linux, root.path());
        assert_eq!(identifier.identify().unwrap(), DistributionTag::Debian);
    }

    #[test]
    fn test_linux_without_markers() {
        let root = host_with_markers(&[]);
        let identifier = PlatformIdentifier::with_root(OsFamily::Linux, root.path());
        assert!(matches!(
            identifier.identify(),
            Err(Error::UnsupportedDistribution { .. })
        ));
    }

    #[test]
    fn test_macos_ignores_markers() {
        let root = host_with_markers(&["/etc/arch-release"]);
        let identifier = PlatformIdentifier::with_root(OsFamily::MacOS, root.path());
        assert_eq!(identifier.identify().unwrap(), DistributionTag::MacOS);
    }

    #[test]
    fn test_other_family_is_unsupported_platform() {
        let root = host_with_markers(&["/etc/lsb-release"]);
        let identifier =
            PlatformIdentifier::with_root(OsFamily::Other("freebsd".to_string()), root.path());
        match identifier.identify() {
            Err(Error::UnsupportedPlatform { os }) => assert_eq!(os, "freebsd"),
            other => panic!("expected UnsupportedPlatform, got {:?}", other),
        }
    }

    #[test]
    fn test_distribution_tag_parse() {
        assert_eq!(
            "centos".parse::<DistributionTag>().unwrap(),
            DistributionTag::CentOS
        );
        assert!(matches!(
            "gentoo".parse::<DistributionTag>(),
            Err(Error::UnsupportedDistribution { .. })
        ));
    }

    #[test]
    fn test_distribution_tag_serializes_lowercase() {
        for tag in DistributionTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }
}
