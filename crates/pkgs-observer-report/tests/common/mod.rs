//! Shared helpers for ingest tests

#![allow(dead_code)]

use pkgs_observer_core::{DistributionTag, Inventory, PackageManagerId, PackageRecord};
use pkgs_observer_report::{HostIdentity, Payload};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock ingest endpoint listens on
pub const INGEST_PATH: &str = "/v1/packages";

/// Set up an ingest endpoint answering with `status`
pub async fn mock_ingest(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(INGEST_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Full URL of the mock ingest endpoint
pub fn ingest_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), INGEST_PATH)
}

/// A two-package apt report
pub fn sample_payload() -> Payload {
    let inventory = Inventory {
        distribution: DistributionTag::Debian,
        package_manager: PackageManagerId::Apt,
        packages: vec![
            PackageRecord::new("curl/stable 7.88.1-10+deb12u5 amd64 [upgradable from: 7.88.1-10+deb12u4]"),
            PackageRecord::new("openssl/stable 3.0.13-1~deb12u1 amd64 [upgradable from: 3.0.11-1~deb12u2]"),
        ],
    };
    let host = HostIdentity {
        hostname: "db-02".to_string(),
        machine_id: Some("5f1b".to_string()),
    };
    Payload::new(inventory, host)
}
