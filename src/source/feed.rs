//! Local directory feed
//!
//! A mirror of the package registry's flat container layout, with packages
//! already unpacked:
//!
//! ```text
//! <feed>/<lowercase package id>/<version>/...
//! ```

use std::path::{Path, PathBuf};

use crate::common::fs::{CopyOptions, copy_dir_recursive, copy_runtime_assets};
use crate::domain::version::{self, PackVersion};
use crate::error::{Result, pack};

use super::{FetchRequest, PackFetcher, Selection, VersionOracle};

/// Version oracle and pack fetcher backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalFeed {
    root: PathBuf,
}

impl LocalFeed {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn package_dir(&self, registry_id: &str) -> PathBuf {
        self.root.join(registry_id.to_lowercase())
    }

    fn version_dir(&self, registry_id: &str, version: &str) -> Option<PathBuf> {
        let package = self.package_dir(registry_id);
        [version.to_string(), version.to_lowercase()]
            .into_iter()
            .map(|v| package.join(v))
            .find(|dir| dir.is_dir())
    }
}

impl VersionOracle for LocalFeed {
    fn resolve(&self, registry_id: &str) -> Result<Option<String>> {
        let package = self.package_dir(registry_id);
        if !package.is_dir() {
            tracing::debug!(%registry_id, "package not present in feed");
            return Ok(None);
        }

        let entries = std::fs::read_dir(&package)
            .map_err(|e| pack::feed_read_failed(package.display().to_string(), e.to_string()))?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| pack::feed_read_failed(package.display().to_string(), e.to_string()))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if PackVersion::parse(&name).is_none() {
                tracing::debug!(%registry_id, dir = %name, "ignoring non-version directory in feed");
                continue;
            }
            versions.push(name);
        }

        let latest = versions.into_iter().max_by(|a, b| version::total_order(a, b));
        tracing::debug!(%registry_id, version = ?latest, "resolved from feed");
        Ok(latest)
    }
}

impl PackFetcher for LocalFeed {
    fn fetch(&self, request: &FetchRequest) -> Result<()> {
        let source = self
            .version_dir(&request.registry_id, &request.version)
            .ok_or_else(|| {
                pack::fetch_failed(
                    &request.registry_id,
                    &request.version,
                    format!("not found in feed {}", self.root.display()),
                )
            })?;

        let failed =
            |e: std::io::Error| pack::fetch_failed(&request.registry_id, &request.version, e.to_string());

        match &request.selection {
            Selection::Everything => {
                copy_dir_recursive(
                    &source,
                    &request.destination,
                    CopyOptions::exclude_package_metadata(),
                )
                .map_err(failed)?;
            }
            Selection::Runtime {
                runtime_identifier,
                target_framework,
                versions_file,
            } => {
                let copied = copy_runtime_assets(
                    &source,
                    &request.destination,
                    runtime_identifier,
                    target_framework,
                    versions_file,
                )
                .map_err(failed)?;
                if copied == 0 {
                    tracing::warn!(
                        registry_id = %request.registry_id,
                        %runtime_identifier,
                        "runtime package contained no assets"
                    );
                }
            }
        }

        tracing::debug!(
            registry_id = %request.registry_id,
            version = %request.version,
            destination = %request.destination.display(),
            "fetched package"
        );
        Ok(())
    }
}
