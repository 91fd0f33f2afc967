//! Common test utilities for elskom-check integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Runtime identifier every fixture installs for
pub const RID: &str = "linux-x64";

/// A fake .NET SDK installation plus a local package feed
pub struct TestToolchain {
    temp: TempDir,
    /// The .NET root (`sdk/8.0.100` is present)
    pub root: PathBuf,
    /// The feed directory passed with `--feed`
    pub feed: PathBuf,
}

impl TestToolchain {
    /// Create a toolchain with an 8.0.100 SDK and an empty feed
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("dotnet");
        let feed = temp.path().join("feed");

        let sdk = root.join("sdk").join("8.0.100");
        std::fs::create_dir_all(&sdk).expect("Failed to create sdk directory");
        std::fs::write(sdk.join("dotnet.dll"), "").expect("Failed to write sdk file");
        std::fs::write(sdk.join("dotnet.runtimeconfig.json"), "{}")
            .expect("Failed to write sdk file");
        std::fs::create_dir_all(&feed).expect("Failed to create feed directory");

        Self { temp, root, feed }
    }

    /// Create a toolchain whose feed publishes every workload pack at `version`
    pub fn with_published(version: &str) -> Self {
        let toolchain = Self::new();
        toolchain.publish_all(version);
        toolchain
    }

    /// Publish all four workload packs at `version`
    pub fn publish_all(&self, version: &str) {
        self.publish_sdk(version);
        self.publish_ref(version);
        self.publish_runtime(version);
        self.publish_templates(version);
    }

    pub fn publish_sdk(&self, version: &str) {
        let dir = self.package_dir("elskom.sdk", version);
        write(&dir.join("Sdk").join("Sdk.props"), "<Project />");
        write(&dir.join("Elskom.Sdk.nuspec"), "<package />");
        write(&dir.join("[Content_Types].xml"), "<Types />");
        write(&dir.join("_rels").join(".rels"), "<Relationships />");
    }

    pub fn publish_ref(&self, version: &str) {
        let dir = self.package_dir("elskom.sdk.app.ref", version);
        write(
            &dir.join("ref").join("net8.0").join("Elskom.Common.dll"),
            "ref",
        );
    }

    pub fn publish_runtime(&self, version: &str) {
        let dir = self.package_dir(&format!("elskom.sdk.app.runtime.{RID}"), version);
        write(
            &dir.join("runtimes")
                .join(RID)
                .join("lib")
                .join("net8.0")
                .join("Elskom.Common.dll"),
            "lib",
        );
        write(
            &dir.join("runtimes")
                .join(RID)
                .join("native")
                .join("libzlib.so"),
            "native",
        );
        write(&dir.join("Elskom.Sdk.App.versions.txt"), version);
        write(&dir.join("Elskom.Sdk.App.Runtime.nuspec"), "<package />");
    }

    pub fn publish_templates(&self, version: &str) {
        let dir = self.package_dir("elskom.sdk.templates", version);
        write(
            &dir.join("content").join("plugin").join("Plugin.csproj"),
            "<Project />",
        );
    }

    fn package_dir(&self, id: &str, version: &str) -> PathBuf {
        self.feed.join(id).join(version)
    }

    /// `elskom-check` pointed at this toolchain and feed, with detection bypassed
    pub fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = self.cmd_without_overrides(subcommand);
        cmd.args(["--sdk", "8.0.100", "--rid", RID]);
        cmd
    }

    /// `elskom-check` pointed at this toolchain and feed; sdk and rid are left to the caller
    pub fn cmd_without_overrides(&self, subcommand: &str) -> Command {
        let mut cmd = elskom_check_cmd();
        cmd.arg(subcommand)
            .arg("--dotnet-root")
            .arg(&self.root)
            .arg("--feed")
            .arg(&self.feed);
        cmd
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_dir().join("WorkloadManifest.json")
    }

    pub fn targets_path(&self) -> PathBuf {
        self.manifest_dir().join("WorkloadManifest.targets")
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.root
            .join("sdk-manifests")
            .join("8.0.100")
            .join("elskom")
    }

    pub fn workload_marker(&self) -> PathBuf {
        self.root
            .join("metadata")
            .join("workloads")
            .join("8.0.100")
            .join("InstalledWorkloads")
            .join("elskom")
    }

    pub fn pack_marker(&self, name: &str, version: &str) -> PathBuf {
        self.root
            .join("metadata")
            .join("workloads")
            .join("InstalledPacks")
            .join("v1")
            .join(name)
            .join(version)
            .join("8.0.100")
    }

    /// `packs/<name>/<version>`
    pub fn pack_path(&self, name: &str, version: &str) -> PathBuf {
        self.root.join("packs").join(name).join(version)
    }

    /// `shared/<name>/<version>`
    pub fn shared_path(&self, name: &str, version: &str) -> PathBuf {
        self.root.join("shared").join(name).join(version)
    }

    /// The manifest as parsed JSON
    pub fn manifest_json(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.manifest_path()).expect("Failed to read manifest");
        serde_json::from_str(&text).expect("Failed to parse manifest")
    }

    /// Version recorded in the manifest for `pack`
    pub fn recorded_version(&self, pack: &str) -> String {
        self.manifest_json()["packs"][pack]["version"]
            .as_str()
            .expect("pack missing from manifest")
            .to_string()
    }
}

impl Default for TestToolchain {
    fn default() -> Self {
        Self::new()
    }
}

/// The binary with every configuration variable cleared
pub fn elskom_check_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("elskom-check").expect("binary not built");
    cmd.env_remove("DOTNET_ROOT")
        .env_remove("ELSKOM_CHECK_FEED")
        .env_remove("ELSKOM_CHECK_BUNDLE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolchain_creation() {
        let toolchain = TestToolchain::with_published("8.0.100");
        assert!(toolchain.root.join("sdk").join("8.0.100").is_dir());
        assert!(toolchain.feed.join("elskom.sdk").join("8.0.100").is_dir());
    }
}
