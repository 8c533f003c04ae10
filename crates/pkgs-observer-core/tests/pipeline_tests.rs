//! Integration tests for the inventory pipeline against simulated hosts

use std::fs;

use pkgs_observer_core::{
    DistributionTag, Error, InventoryPipeline, OsFamily, PackageManagerId, PlatformIdentifier,
};
use tempfile::TempDir;

/// Create a fake filesystem root carrying the given marker files
fn simulated_host(markers: &[&str]) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("etc")).unwrap();
    for marker in markers {
        fs::write(root.path().join("etc").join(marker), "").unwrap();
    }
    root
}

fn linux_pipeline(root: &TempDir) -> InventoryPipeline {
    InventoryPipeline::new().with_identifier(PlatformIdentifier::with_root(
        OsFamily::Linux,
        root.path(),
    ))
}

#[test]
fn test_plan_per_distribution() {
    let cases = [
        ("lsb-release", DistributionTag::Ubuntu, PackageManagerId::Apt, "apt"),
        ("debian_version", DistributionTag::Debian, PackageManagerId::Apt, "apt"),
        ("arch-release", DistributionTag::Arch, PackageManagerId::Pacman, "pacman"),
        ("centos-release", DistributionTag::CentOS, PackageManagerId::Yum, "yum"),
    ];

    for (marker, distribution, manager, program) in cases {
        let root = simulated_host(&[marker]);
        let plan = linux_pipeline(&root).plan().unwrap();
        assert_eq!(plan.distribution, distribution);
        assert_eq!(plan.package_manager, manager);
        assert_eq!(plan.command.program, program);
    }
}

#[test]
fn test_ubuntu_host_with_debian_marker() {
    let root = simulated_host(&["debian_version", "lsb-release"]);
    let plan = linux_pipeline(&root).plan().unwrap();
    assert_eq!(plan.distribution, DistributionTag::Ubuntu);
}

#[test]
fn test_macos_plan() {
    let pipeline = InventoryPipeline::new().with_identifier(PlatformIdentifier::with_root(
        OsFamily::MacOS,
        "/nonexistent",
    ));
    let plan = pipeline.plan().unwrap();
    assert_eq!(plan.package_manager, PackageManagerId::Homebrew);
    assert_eq!(plan.command.to_string(), "brew outdated --verbose");
}

#[tokio::test]
async fn test_unknown_linux_distribution() {
    let root = simulated_host(&["gentoo-release"]);
    let result = linux_pipeline(&root).run().await;
    assert!(matches!(result, Err(Error::UnsupportedDistribution { .. })));
}

#[tokio::test]
async fn test_unsupported_platform() {
    let pipeline = InventoryPipeline::new().with_identifier(PlatformIdentifier::with_root(
        OsFamily::Other("windows".to_string()),
        "/nonexistent",
    ));
    match pipeline.run().await {
        Err(Error::UnsupportedPlatform { os }) => assert_eq!(os, "windows"),
        other => panic!("expected UnsupportedPlatform, got {:?}", other),
    }
}
