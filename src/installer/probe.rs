//! Installed state probe
//!
//! Reads which version of each pack is unpacked under the toolchain root.
//! A pack directory is expected to hold exactly one version directory.

use std::path::Path;

use crate::config::PackDefinition;
use crate::domain::PackKind;
use crate::domain::version::{self, DEV_SUFFIX};
use crate::toolchain::ToolchainLayout;

/// What the probe found for one pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPack {
    pub name: String,
    pub kind: PackKind,

    /// Installed version, empty when the pack is not installed
    pub version: String,

    /// Whether the installation marker for `version` exists
    pub marker_present: bool,
}

impl InstalledPack {
    pub fn is_installed(&self) -> bool {
        !self.version.is_empty()
    }
}

/// Snapshot of the installed packs, in bundle order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledState {
    packs: Vec<InstalledPack>,
}

impl InstalledState {
    pub fn get(&self, name: &str) -> Option<&InstalledPack> {
        self.packs.iter().find(|p| p.name == name)
    }

    /// Installed version of `name`, or `""` when absent
    pub fn version(&self, name: &str) -> &str {
        self.get(name).map_or("", |p| p.version.as_str())
    }
}

/// Read-only inspection of the toolchain's pack directories
pub struct InstalledStateProbe<'a> {
    layout: &'a ToolchainLayout,
}

impl<'a> InstalledStateProbe<'a> {
    pub fn new(layout: &'a ToolchainLayout) -> Self {
        Self { layout }
    }

    pub fn probe(&self, packs: &[PackDefinition]) -> InstalledState {
        InstalledState {
            packs: packs
                .iter()
                .map(|pack| self.probe_pack(&pack.name, pack.kind))
                .collect(),
        }
    }

    pub fn probe_pack(&self, name: &str, kind: PackKind) -> InstalledPack {
        let version = installed_version(&self.layout.pack_dir(name, kind));
        let marker_present = kind.policy().tracks_marker
            && !version.is_empty()
            && self.layout.installed_pack_marker(name, &version).is_file();

        tracing::debug!(pack = %name, %kind, %version, marker_present, "probed pack");
        InstalledPack {
            name: name.to_string(),
            kind,
            version,
            marker_present,
        }
    }
}

fn installed_version(pack_dir: &Path) -> String {
    let entries = match std::fs::read_dir(pack_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return String::new(),
        Err(e) => {
            tracing::warn!(dir = %pack_dir.display(), error = %e, "could not read pack directory");
            return String::new();
        }
    };

    let mut versions: Vec<String> = entries
        .flatten()
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();

    match versions.len() {
        0 => String::new(),
        1 => versions.remove(0),
        _ => {
            tracing::warn!(
                dir = %pack_dir.display(),
                versions = ?versions,
                "multiple versions installed, expected one"
            );
            pick_version(versions)
        }
    }
}

/// A development build wins, otherwise the greatest version
fn pick_version(versions: Vec<String>) -> String {
    if let Some(dev) = versions
        .iter()
        .filter(|v| v.ends_with(DEV_SUFFIX))
        .max_by(|a, b| version::total_order(a, b))
    {
        return dev.clone();
    }
    versions
        .into_iter()
        .max_by(|a, b| version::total_order(a, b))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BundleDefinition;
    use crate::domain::VersionBand;
    use tempfile::TempDir;

    fn layout(temp: &TempDir) -> ToolchainLayout {
        ToolchainLayout::new(temp.path(), VersionBand::from_version("8.0.100").unwrap())
    }

    #[test]
    fn test_probe_empty_toolchain() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let bundle = BundleDefinition::elskom();

        let state = InstalledStateProbe::new(&layout).probe(&bundle.packs);

        for pack in &bundle.packs {
            let probed = state.get(&pack.name).unwrap();
            assert!(!probed.is_installed());
            assert!(!probed.marker_present);
        }
        assert_eq!(state.version("Elskom.Sdk"), "");
    }

    #[test]
    fn test_probe_reads_single_version_and_marker() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        std::fs::create_dir_all(layout.pack_version_dir("Elskom.Sdk", PackKind::Sdk, "8.0.100"))
            .unwrap();
        crate::common::fs::touch(&layout.installed_pack_marker("Elskom.Sdk", "8.0.100")).unwrap();
        std::fs::create_dir_all(layout.pack_version_dir(
            "Elskom.Sdk.App",
            PackKind::Runtime,
            "8.0.100",
        ))
        .unwrap();

        let probe = InstalledStateProbe::new(&layout);
        let sdk = probe.probe_pack("Elskom.Sdk", PackKind::Sdk);
        assert_eq!(sdk.version, "8.0.100");
        assert!(sdk.marker_present);

        let runtime = probe.probe_pack("Elskom.Sdk.App", PackKind::Runtime);
        assert_eq!(runtime.version, "8.0.100");
        assert!(!runtime.marker_present);
    }

    #[test]
    fn test_probe_multiple_versions_takes_greatest() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        for v in ["8.0.100", "8.0.300", "8.0.200"] {
            std::fs::create_dir_all(layout.pack_version_dir("Elskom.Sdk", PackKind::Sdk, v))
                .unwrap();
        }
        let pack = InstalledStateProbe::new(&layout).probe_pack("Elskom.Sdk", PackKind::Sdk);
        assert_eq!(pack.version, "8.0.300");
    }

    #[test]
    fn test_pick_version_prefers_dev_build() {
        let picked = pick_version(vec!["9.0.100".to_string(), "8.0.100-dev".to_string()]);
        assert_eq!(picked, "8.0.100-dev");
    }

    #[test]
    fn test_probe_ignores_files_in_pack_dir() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let dir = layout.pack_dir("Elskom.Sdk.Templates", PackKind::Template);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stray.txt"), "").unwrap();

        let pack =
            InstalledStateProbe::new(&layout).probe_pack("Elskom.Sdk.Templates", PackKind::Template);
        assert!(!pack.is_installed());
    }
}
