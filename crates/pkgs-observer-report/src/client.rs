//! Ingest endpoint client
//!
//! One POST per run. There is no retry: a transport error or a non-success
//! status fails the run.

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::payload::Payload;

/// User agent sent with every report
pub fn user_agent() -> String {
    format!("pkgs.observer-agent/{}", env!("CARGO_PKG_VERSION"))
}

/// Install the process-wide rustls crypto provider
///
/// Required by rustls 0.23+ before any client is built. Later calls are no-ops.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

/// HTTP client for the ingest endpoint
pub struct IngestClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl IngestClient {
    /// Create a client posting to `endpoint`
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| Error::invalid_endpoint(endpoint, e.to_string()))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::invalid_endpoint(
                endpoint.as_str(),
                "scheme must be http or https",
            ));
        }

        install_crypto_provider();

        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post the report
    pub async fn send(&self, payload: &Payload) -> Result<()> {
        debug!(
            "Posting {} package(s) to {}",
            payload.packages.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rejected {
                status: status.as_u16(),
            });
        }

        info!("Report accepted by {} ({})", self.endpoint, status);
        Ok(())
    }
}
