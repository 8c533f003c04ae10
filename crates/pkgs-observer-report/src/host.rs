//! Host identity
//!
//! The hostname, plus an optional machine id. The raw machine id never
//! leaves the host: reports carry an HMAC-SHA256 of the application id keyed
//! by it, so ids are stable per host but differ between applications.

use std::sync::LazyLock;

use hmac::{Hmac, Mac};
use regex::Regex;
use sha2::Sha256;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Linux machine id files, in lookup order
pub const MACHINE_ID_FILES: [&str; 2] = ["/var/lib/dbus/machine-id", "/etc/machine-id"];

/// Pre-compiled regex for the platform UUID in `ioreg` output
static IOREG_UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""IOPlatformUUID"\s*=\s*"([^"]+)""#).expect("ioreg regex is valid")
});

/// Identity of the reporting host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub hostname: String,
    pub machine_id: Option<String>,
}

impl HostIdentity {
    /// Collect the identity of the running host
    ///
    /// A missing machine id is not fatal; the identity then carries none.
    pub async fn collect(app_id: &str, include_machine_id: bool) -> Result<Self> {
        let hostname = hostname()?;

        let machine_id = if include_machine_id {
            match machine_id(app_id).await {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!("Reporting without machine id: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            hostname,
            machine_id,
        })
    }
}

/// Hostname of the running host
pub fn hostname() -> Result<String> {
    let name = ::hostname::get().map_err(|e| Error::host_identity("hostname", e.to_string()))?;
    Ok(name.to_string_lossy().into_owned())
}

/// Protected machine id of the running host
pub async fn machine_id(app_id: &str) -> Result<String> {
    let raw = read_machine_id().await?;
    Ok(protect(&raw, app_id))
}

/// HMAC-SHA256 of `app_id` keyed by the raw machine id, hex encoded
pub fn protect(raw_id: &str, app_id: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(raw_id.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(app_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(target_os = "linux")]
async fn read_machine_id() -> Result<String> {
    read_machine_id_file(&MACHINE_ID_FILES).await
}

#[cfg(target_os = "macos")]
async fn read_machine_id() -> Result<String> {
    let output = tokio::process::Command::new("ioreg")
        .args(["-rd1", "-c", "IOPlatformExpertDevice"])
        .output()
        .await
        .map_err(|e| Error::host_identity("machine id", e.to_string()))?;

    if !output.status.success() {
        return Err(Error::host_identity(
            "machine id",
            format!("ioreg exited unsuccessfully ({})", output.status),
        ));
    }

    parse_ioreg_uuid(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| Error::host_identity("machine id", "IOPlatformUUID not found"))
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
async fn read_machine_id() -> Result<String> {
    Err(Error::host_identity(
        "machine id",
        format!("not supported on {}", std::env::consts::OS),
    ))
}

/// First non-empty machine id among `paths`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
async fn read_machine_id_file<P: AsRef<std::path::Path>>(paths: &[P]) -> Result<String> {
    for path in paths {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) if !content.trim().is_empty() => {
                debug!("Machine id read from {}", path.display());
                return Ok(content.trim().to_string());
            }
            Ok(_) => debug!("{} is empty", path.display()),
            Err(e) => debug!("Cannot read {}: {}", path.display(), e),
        }
    }

    Err(Error::host_identity("machine id", "no machine-id file found"))
}

/// Extract `IOPlatformUUID` from `ioreg -rd1 -c IOPlatformExpertDevice`
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_ioreg_uuid(output: &str) -> Option<String> {
    IOREG_UUID_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
