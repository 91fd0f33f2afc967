//! Workload manifest (`WorkloadManifest.json`)
//!
//! The manifest records the aggregate installed state of one bundle for one
//! feature band:
//!
//! ```json
//! {
//!   "version": "8.0.100",
//!   "workloads": { "elskom": { "description": "...", "packs": ["Elskom.Sdk", "..."] } },
//!   "packs": { "Elskom.Sdk": { "kind": "sdk", "version": "8.0.100" } }
//! }
//! ```
//!
//! `packs` is the only record of pack versions. The top-level `version` must
//! equal the sdk pack's version whenever the manifest is saved; callers stage
//! their changes and call [`Manifest::sync_version`] before [`Manifest::save`].

pub mod serialization;
pub mod targets;


use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::BundleDefinition;
use crate::config::manifest::serialization::{deserialize_manifest, serialize_manifest};
use crate::domain::{Pack, PackKind};
use crate::error::{CheckError, Result, fs as fs_error, manifest as manifest_error};
use crate::toolchain::layout::TARGETS_FILE;

#[cfg(test)]
thread_local! {
    static SAVES: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of [`Manifest::save`] calls made on the current thread
#[cfg(test)]
pub(crate) fn save_count() -> usize {
    SAVES.with(std::cell::Cell::get)
}

/// A workload entry: which packs make up the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub name: String,
    pub description: String,
    pub packs: Vec<String>,
}

/// The workload manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Manifest version; equals the sdk pack's version once synced
    pub version: String,

    pub workloads: Vec<Workload>,

    /// Installed packs in bundle order
    pub packs: Vec<Pack>,
}

impl Serialize for Manifest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_manifest(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_manifest(deserializer)
    }
}

impl Manifest {
    /// Build the initial manifest for `bundle` from installed pack versions
    pub fn create(bundle: &BundleDefinition, packs: Vec<Pack>) -> Result<Self> {
        let mut manifest = Self {
            version: String::new(),
            workloads: vec![Workload {
                name: bundle.name.clone(),
                description: bundle.description.clone(),
                packs: bundle.pack_names(),
            }],
            packs,
        };
        if manifest.sdk_pack().is_none() {
            return Err(manifest_error::invalid(format!(
                "workload '{}' has no sdk pack",
                bundle.name
            )));
        }
        manifest.sync_version();
        Ok(manifest)
    }

    /// Parse a manifest from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the manifest to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Load the manifest at `path`
    ///
    /// Kinds of packs declared by `bundle` are taken from the bundle, so a
    /// runtime pack (stored as `framework`) comes back as a runtime pack.
    pub fn load(path: &Path, bundle: &BundleDefinition) -> Result<Self> {
        if !path.is_file() {
            return Err(manifest_error::not_installed(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;
        let mut manifest = Self::from_json(&json).map_err(|e| match e {
            CheckError::ManifestParseFailed { reason, .. } => {
                manifest_error::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })?;
        manifest.apply_bundle_kinds(bundle);
        tracing::debug!(path = %path.display(), version = %manifest.version, "loaded manifest");
        Ok(manifest)
    }

    fn apply_bundle_kinds(&mut self, bundle: &BundleDefinition) {
        for pack in &mut self.packs {
            if let Some(definition) = bundle.pack(&pack.name) {
                pack.kind = definition.kind;
            }
        }
    }

    /// Replace the manifest file and its sibling targets file
    pub fn save(&self, path: &Path, bundle: &BundleDefinition) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| fs_error::write_failed(path.display().to_string(), "no parent directory"))?;
        std::fs::create_dir_all(dir)
            .map_err(|e| fs_error::write_failed(dir.display().to_string(), e.to_string()))?;

        write_replacing(path, &self.to_json()?)?;

        let sdk_pack = self.sdk_pack().map_or("", |p| p.name.as_str());
        let runtime_version = self.runtime_pack().map_or("", |p| p.version.as_str());
        let targets = targets::render(sdk_pack, &bundle.framework_version_property, runtime_version);
        write_replacing(&dir.join(TARGETS_FILE), &targets)?;

        #[cfg(test)]
        SAVES.with(|saves| saves.set(saves.get() + 1));
        tracing::debug!(path = %path.display(), version = %self.version, "saved manifest");
        Ok(())
    }

    pub fn pack(&self, name: &str) -> Option<&Pack> {
        self.packs.iter().find(|p| p.name == name)
    }

    pub fn sdk_pack(&self) -> Option<&Pack> {
        self.packs.iter().find(|p| p.kind == PackKind::Sdk)
    }

    pub fn runtime_pack(&self) -> Option<&Pack> {
        self.packs.iter().find(|p| p.kind == PackKind::Runtime)
    }

    /// Set the version of pack `name`; returns whether the stored value changed
    pub fn update_pack_version(&mut self, name: &str, version: &str) -> bool {
        match self.packs.iter_mut().find(|p| p.name == name) {
            Some(pack) if pack.version != version => {
                pack.version = version.to_string();
                true
            }
            _ => false,
        }
    }

    /// Insert `pack`, replacing an existing entry with the same name
    ///
    /// Returns whether the manifest changed.
    pub fn insert_pack(&mut self, pack: Pack) -> bool {
        match self.packs.iter().position(|p| p.name == pack.name) {
            Some(index) if self.packs[index].kind == pack.kind => {
                self.update_pack_version(&pack.name, &pack.version)
            }
            Some(index) => {
                self.packs[index] = pack;
                true
            }
            None => {
                self.packs.push(pack);
                true
            }
        }
    }

    /// Set the manifest version to the sdk pack's version; returns whether it changed
    pub fn sync_version(&mut self) -> bool {
        let Some(sdk_version) = self.sdk_pack().map(|p| p.version.clone()) else {
            return false;
        };
        if self.version == sdk_version {
            return false;
        }
        self.version = sdk_version;
        true
    }
}

/// Write `content` to a temporary file next to `path`, then move it into place
fn write_replacing(path: &Path, content: &str) -> Result<()> {
    let failed = |e: std::io::Error| fs_error::write_failed(path.display().to_string(), e.to_string());
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(failed)?;
    file.write_all(content.as_bytes()).map_err(failed)?;
    file.persist(path).map_err(|e| failed(e.error))?;
    Ok(())
}
