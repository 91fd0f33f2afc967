//! Paths inside a .NET SDK installation
//!
//! ```text
//! <root>/
//!   sdk-manifests/<band>/<bundle>/WorkloadManifest.json
//!   sdk-manifests/<band>/<bundle>/WorkloadManifest.targets
//!   packs/<pack>/<version>/...                 # sdk, framework and template packs
//!   shared/<pack>/<version>/...                # runtime packs
//!   metadata/workloads/<band>/InstalledWorkloads/<bundle>
//!   metadata/workloads/InstalledPacks/v1/<pack>/<version>/<band>
//! ```

use std::path::{Path, PathBuf};

use crate::domain::{PackKind, VersionBand};

const SDK_MANIFESTS_DIR: &str = "sdk-manifests";
const METADATA_DIR: &str = "metadata";
const WORKLOADS_DIR: &str = "workloads";
const INSTALLED_WORKLOADS_DIR: &str = "InstalledWorkloads";
const INSTALLED_PACKS_DIR: &str = "InstalledPacks";
const INSTALLED_PACKS_SCHEMA: &str = "v1";

/// File name of the workload manifest
pub const MANIFEST_FILE: &str = "WorkloadManifest.json";

/// File name of the build-integration file written next to the manifest
pub const TARGETS_FILE: &str = "WorkloadManifest.targets";

/// Directory layout of one toolchain root for one feature band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainLayout {
    root: PathBuf,
    band: VersionBand,
}

impl ToolchainLayout {
    pub fn new(root: impl Into<PathBuf>, band: VersionBand) -> Self {
        Self {
            root: root.into(),
            band,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `sdk-manifests/<band>/<bundle>`
    pub fn manifest_dir(&self, bundle: &str) -> PathBuf {
        self.root
            .join(SDK_MANIFESTS_DIR)
            .join(self.band.to_string())
            .join(bundle)
    }

    pub fn manifest_path(&self, bundle: &str) -> PathBuf {
        self.manifest_dir(bundle).join(MANIFEST_FILE)
    }

    #[cfg(test)]
    pub fn targets_path(&self, bundle: &str) -> PathBuf {
        self.manifest_dir(bundle).join(TARGETS_FILE)
    }

    /// Root directory a kind of pack is unpacked into (`packs` or `shared`)
    pub fn unpack_root(&self, kind: PackKind) -> PathBuf {
        self.root.join(kind.policy().unpack_root.dir_name())
    }

    /// `<unpack root>/<pack>`; holds one directory per installed version
    pub fn pack_dir(&self, name: &str, kind: PackKind) -> PathBuf {
        self.unpack_root(kind).join(name)
    }

    pub fn pack_version_dir(&self, name: &str, kind: PackKind, version: &str) -> PathBuf {
        self.pack_dir(name, kind).join(version)
    }

    /// `metadata/workloads/<band>/InstalledWorkloads/<bundle>`
    pub fn installed_workload_marker(&self, bundle: &str) -> PathBuf {
        self.root
            .join(METADATA_DIR)
            .join(WORKLOADS_DIR)
            .join(self.band.to_string())
            .join(INSTALLED_WORKLOADS_DIR)
            .join(bundle)
    }

    /// `metadata/workloads/InstalledPacks/v1/<pack>`
    pub fn installed_pack_marker_dir(&self, name: &str) -> PathBuf {
        self.root
            .join(METADATA_DIR)
            .join(WORKLOADS_DIR)
            .join(INSTALLED_PACKS_DIR)
            .join(INSTALLED_PACKS_SCHEMA)
            .join(name)
    }

    /// `metadata/workloads/InstalledPacks/v1/<pack>/<version>/<band>`
    pub fn installed_pack_marker(&self, name: &str, version: &str) -> PathBuf {
        self.installed_pack_marker_dir(name)
            .join(version)
            .join(self.band.to_string())
    }
}
