//! Output normalizer
//!
//! Runs a package manager's upgradable-list command and turns its stdout
//! into package records. Each supported manager prints one header line
//! before the package lines; that line is dropped by position, whatever it
//! contains. Lines are otherwise kept verbatim, since column layouts differ
//! between managers and interpreting them is left to the backend.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::command::CommandSpec;
use crate::error::{Error, Result};

/// One upgradable package, as printed by the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// The output line, unmodified
    pub raw: String,
}

impl PackageRecord {
    /// Create a record from a raw output line
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// Parse captured stdout into package records
///
/// Drops the first line and every empty line. Output without any line
/// after the header yields an empty list.
pub fn parse_upgradable(stdout: &[u8]) -> Vec<PackageRecord> {
    stdout
        .split(|byte| *byte == b'\n')
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| PackageRecord::new(String::from_utf8_lossy(line)))
        .collect()
}

/// Executes upgradable-list commands and normalizes their output
#[derive(Debug, Clone, Default)]
pub struct OutputNormalizer {
    /// Upper bound on the command's run time; `None` waits indefinitely
    timeout: Option<Duration>,
}

impl OutputNormalizer {
    /// Create a normalizer that waits for the command to finish
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Create a normalizer that kills the command after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Get the configured timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `spec` and parse its stdout
    pub async fn run(&self, spec: &CommandSpec) -> Result<Vec<PackageRecord>> {
        let command_line = spec.to_string();
        let stdout = self
            .capture(spec)
            .await
            .map_err(|e| Error::command_failed(command_line.as_str(), e))?;

        let packages = parse_upgradable(&stdout);
        debug!("`{}` reported {} upgradable package(s)", command_line, packages.len());
        Ok(packages)
    }

    /// Spawn the command and return its stdout once it exits successfully
    async fn capture(&self, spec: &CommandSpec) -> io::Result<Vec<u8>> {
        let program = which::which(&spec.program)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;

        debug!("Running {} {:?}", program.display(), spec.args);

        let mut cmd = Command::new(program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("no result after {}s", limit.as_secs_f64()),
                    )
                })??,
            None => cmd.output().await?,
        };

        if !output.stderr.is_empty() {
            debug!("stderr: {}", String::from_utf8_lossy(&output.stderr).trim_end());
        }

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "process exited unsuccessfully ({})",
                output.status
            )));
        }

        trace!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        Ok(output.stdout)
    }
}
