//! CLI integration tests using the real elskom-check binary

mod common;

use common::{RID, TestToolchain, elskom_check_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    elskom_check_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Elskom workload packs"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("uninstall"));
}

#[test]
fn test_version_output() {
    elskom_check_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "elskom-check {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_missing_subcommand_fails() {
    elskom_check_cmd().assert().failure();
}

#[test]
fn test_install_without_feed_fails() {
    let toolchain = TestToolchain::with_published("8.0.100");

    elskom_check_cmd()
        .arg("install")
        .arg("--dotnet-root")
        .arg(&toolchain.root)
        .args(["--sdk", "8.0.100", "--rid", RID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package feed configured"))
        .stderr(predicate::str::contains("help:"));

    assert!(!toolchain.manifest_path().exists());
}

#[test]
fn test_feed_from_environment() {
    let toolchain = TestToolchain::with_published("8.0.100");

    elskom_check_cmd()
        .env("ELSKOM_CHECK_FEED", &toolchain.feed)
        .env("DOTNET_ROOT", &toolchain.root)
        .args(["install", "--sdk", "8.0.100", "--rid", RID])
        .assert()
        .success();

    assert!(toolchain.manifest_path().is_file());
}

#[test]
fn test_unsupported_sdk_is_rejected() {
    let toolchain = TestToolchain::with_published("8.0.100");

    toolchain
        .cmd_without_overrides("install")
        .args(["--sdk", "7.0.100", "--rid", RID])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unsupported .NET SDK version: 7.0.100",
        ));

    assert!(!toolchain.root.join("sdk-manifests").exists());
}

#[test]
fn test_sdk_override_selects_band() {
    let toolchain = TestToolchain::with_published("8.0.100");

    toolchain
        .cmd_without_overrides("install")
        .args(["--sdk", "8.0.204", "--rid", RID])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected .NET SDK").not());

    assert!(
        toolchain
            .root
            .join("sdk-manifests")
            .join("8.0.200")
            .join("elskom")
            .join("WorkloadManifest.json")
            .is_file()
    );
}

#[test]
fn test_custom_bundle_file() {
    let toolchain = TestToolchain::with_published("8.0.100");
    let bundle = toolchain.root.parent().unwrap().join("bundle.yaml");
    std::fs::write(
        &bundle,
        "name: mini\ndescription: Just the sdk\npacks:\n  - name: Elskom.Sdk\n    kind: sdk\n",
    )
    .unwrap();

    toolchain
        .cmd("install")
        .arg("--bundle-file")
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully installed workload package 'Elskom.Sdk'.",
        ))
        .stdout(predicate::str::contains("Elskom.Sdk.App").not());

    let manifest_dir = toolchain
        .root
        .join("sdk-manifests")
        .join("8.0.100")
        .join("mini");
    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(manifest_dir.join("WorkloadManifest.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["workloads"]["mini"]["description"], "Just the sdk");
    assert_eq!(manifest["packs"]["Elskom.Sdk"]["version"], "8.0.100");
    assert!(!toolchain.root.join("shared").exists());
}

#[test]
fn test_invalid_bundle_file() {
    let toolchain = TestToolchain::with_published("8.0.100");
    let bundle = toolchain.root.parent().unwrap().join("bundle.yaml");
    std::fs::write(&bundle, "name: broken\npacks: []\n").unwrap();

    toolchain
        .cmd("install")
        .arg("--bundle-file")
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid bundle definition"));
}
