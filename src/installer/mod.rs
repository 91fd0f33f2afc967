//! Pack placement and removal
//!
//! This module handles:
//! - Materializing a pack version under `packs/` or `shared/`
//! - Writing and deleting per-pack installation markers
//! - Probing what is currently installed ([`probe`])

pub mod probe;

use std::path::PathBuf;

use crate::common::fs::{prune_empty_dirs, remove_dir_all_if_exists, remove_file_if_exists, touch};
use crate::config::PackDefinition;
use crate::error::{Result, fs as fs_error};
use crate::source::{FetchRequest, PackFetcher, Selection};
use crate::toolchain::ToolchainLayout;

pub use probe::{InstalledPack, InstalledState, InstalledStateProbe};

/// Result of removing a pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    AlreadyUninstalled,
}

/// Filesystem side effects for packs of one toolchain
pub struct PackStore<'a> {
    layout: &'a ToolchainLayout,
    fetcher: &'a dyn PackFetcher,
    runtime_identifier: &'a str,
    target_framework: &'a str,
}

impl<'a> PackStore<'a> {
    pub fn new(
        layout: &'a ToolchainLayout,
        fetcher: &'a dyn PackFetcher,
        runtime_identifier: &'a str,
        target_framework: &'a str,
    ) -> Self {
        Self {
            layout,
            fetcher,
            runtime_identifier,
            target_framework,
        }
    }

    fn fetch_request(&self, pack: &PackDefinition, version: &str, destination: PathBuf) -> FetchRequest {
        let selection = if pack.kind.policy().selective_extract {
            Selection::Runtime {
                runtime_identifier: self.runtime_identifier.to_string(),
                target_framework: self.target_framework.to_string(),
                versions_file: format!("{}.versions.txt", pack.name),
            }
        } else {
            Selection::Everything
        };

        FetchRequest {
            registry_id: pack.registry_id(self.runtime_identifier),
            version: version.to_string(),
            destination,
            selection,
        }
    }

    /// Materialize `version` of `pack` and record its installation marker
    ///
    /// A failed fetch leaves no version directory behind.
    pub fn place(&self, pack: &PackDefinition, version: &str) -> Result<PathBuf> {
        let destination = self.layout.pack_version_dir(&pack.name, pack.kind, version);
        let dest_str = destination.display().to_string();

        remove_dir_all_if_exists(&destination)
            .map_err(|e| fs_error::remove_failed(&dest_str, e.to_string()))?;
        std::fs::create_dir_all(&destination)
            .map_err(|e| fs_error::write_failed(&dest_str, e.to_string()))?;

        let request = self.fetch_request(pack, version, destination.clone());
        if let Err(err) = self.fetcher.fetch(&request) {
            if let Err(cleanup) = remove_dir_all_if_exists(&destination) {
                tracing::warn!(path = %dest_str, error = %cleanup, "could not clean up partial pack");
            }
            prune_empty_dirs(
                &self.layout.pack_dir(&pack.name, pack.kind),
                &self.layout.unpack_root(pack.kind),
            );
            return Err(err);
        }

        if pack.kind.policy().tracks_marker {
            self.write_marker(&pack.name, version)?;
        }

        tracing::info!(pack = %pack.name, %version, path = %dest_str, "placed pack");
        Ok(destination)
    }

    /// Write the installation marker of a probed pack if it is missing
    ///
    /// Returns whether a marker was written.
    pub fn restore_marker(&self, installed: &InstalledPack) -> Result<bool> {
        if !installed.kind.policy().tracks_marker
            || !installed.is_installed()
            || installed.marker_present
        {
            return Ok(false);
        }
        self.write_marker(&installed.name, &installed.version)?;
        tracing::info!(pack = %installed.name, version = %installed.version, "restored pack marker");
        Ok(true)
    }

    fn write_marker(&self, name: &str, version: &str) -> Result<()> {
        let marker = self.layout.installed_pack_marker(name, version);
        touch(&marker)
            .map_err(|e| fs_error::write_failed(marker.display().to_string(), e.to_string()))
    }

    /// Delete every installed version of `pack` and the markers for `marker_versions`
    ///
    /// Removing a pack that is not there is not an error.
    pub fn remove(&self, pack: &PackDefinition, marker_versions: &[&str]) -> Result<RemoveOutcome> {
        let pack_dir = self.layout.pack_dir(&pack.name, pack.kind);
        let removed = remove_dir_all_if_exists(&pack_dir)
            .map_err(|e| fs_error::remove_failed(pack_dir.display().to_string(), e.to_string()))?;

        if pack.kind.policy().tracks_marker {
            for version in marker_versions.iter().filter(|v| !v.is_empty()) {
                self.remove_marker(pack, version)?;
            }
        }

        let outcome = if removed {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::AlreadyUninstalled
        };
        tracing::info!(pack = %pack.name, ?outcome, "removed pack");
        Ok(outcome)
    }

    fn remove_marker(&self, pack: &PackDefinition, version: &str) -> Result<()> {
        let marker = self.layout.installed_pack_marker(&pack.name, version);
        remove_file_if_exists(&marker)
            .map_err(|e| fs_error::remove_failed(marker.display().to_string(), e.to_string()))?;
        let marker_dir = self.layout.installed_pack_marker_dir(&pack.name);
        if let (Some(version_dir), Some(schema_dir)) = (marker.parent(), marker_dir.parent()) {
            prune_empty_dirs(version_dir, schema_dir);
        }
        Ok(())
    }
}
