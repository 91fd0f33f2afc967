//! Pack domain types
//!
//! Every pack carries an explicit [`PackKind`]. Anything that behaves differently
//! for the runtime pack asks [`PackKind::policy`] instead of comparing names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a workload pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackKind {
    /// MSBuild SDK pack; its version is the workload manifest version
    Sdk,
    /// Reference (targeting) framework pack
    Framework,
    /// Runtime framework pack, published per runtime identifier
    Runtime,
    /// Project template pack
    Template,
}

/// Directory under the toolchain root that a pack is unpacked into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackRoot {
    Packs,
    Shared,
}

impl UnpackRoot {
    pub fn dir_name(self) -> &'static str {
        match self {
            UnpackRoot::Packs => "packs",
            UnpackRoot::Shared => "shared",
        }
    }
}

/// How a kind of pack is stored and tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindPolicy {
    /// Where the pack content lives
    pub unpack_root: UnpackRoot,
    /// Whether an InstalledPacks marker records the installation.
    /// Runtime packs are tracked by directory presence only because every
    /// runtime identifier variant shares one logical pack name.
    pub tracks_marker: bool,
    /// Whether only the runtime-identifier subtree of the package is extracted
    pub selective_extract: bool,
}

impl PackKind {
    pub fn policy(self) -> KindPolicy {
        match self {
            PackKind::Runtime => KindPolicy {
                unpack_root: UnpackRoot::Shared,
                tracks_marker: false,
                selective_extract: true,
            },
            PackKind::Sdk | PackKind::Framework | PackKind::Template => KindPolicy {
                unpack_root: UnpackRoot::Packs,
                tracks_marker: true,
                selective_extract: false,
            },
        }
    }

    /// Kind string written to `WorkloadManifest.json`
    pub fn manifest_kind(self) -> &'static str {
        match self {
            PackKind::Sdk => "sdk",
            PackKind::Framework | PackKind::Runtime => "framework",
            PackKind::Template => "template",
        }
    }

    /// Parse a kind string read from `WorkloadManifest.json`
    ///
    /// The manifest cannot distinguish runtime from reference framework packs;
    /// both come back as [`PackKind::Framework`].
    pub fn from_manifest_kind(kind: &str) -> Option<Self> {
        match kind {
            "sdk" => Some(PackKind::Sdk),
            "framework" => Some(PackKind::Framework),
            "template" => Some(PackKind::Template),
            _ => None,
        }
    }
}

impl fmt::Display for PackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackKind::Sdk => "sdk",
            PackKind::Framework => "framework",
            PackKind::Runtime => "runtime",
            PackKind::Template => "template",
        };
        f.write_str(name)
    }
}

/// A pack at a specific version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    pub name: String,
    pub kind: PackKind,
    pub version: String,
}

impl Pack {
    pub fn new(name: impl Into<String>, kind: PackKind, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_policy() {
        let policy = PackKind::Runtime.policy();
        assert_eq!(policy.unpack_root, UnpackRoot::Shared);
        assert!(!policy.tracks_marker);
        assert!(policy.selective_extract);
    }

    #[test]
    fn test_non_runtime_policy() {
        for kind in [PackKind::Sdk, PackKind::Framework, PackKind::Template] {
            let policy = kind.policy();
            assert_eq!(policy.unpack_root, UnpackRoot::Packs);
            assert!(policy.tracks_marker);
            assert!(!policy.selective_extract);
        }
    }

    #[test]
    fn test_manifest_kind_strings() {
        assert_eq!(PackKind::Sdk.manifest_kind(), "sdk");
        assert_eq!(PackKind::Runtime.manifest_kind(), "framework");
        assert_eq!(PackKind::Template.manifest_kind(), "template");
        assert_eq!(PackKind::from_manifest_kind("framework"), Some(PackKind::Framework));
        assert_eq!(PackKind::from_manifest_kind("library"), None);
    }

    #[test]
    fn test_kind_yaml_names() {
        let kind: PackKind = serde_yaml::from_str("runtime").unwrap();
        assert_eq!(kind, PackKind::Runtime);
    }
}
