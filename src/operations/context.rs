//! Shared context for lifecycle operations
//!
//! One context lives for one CLI invocation and is passed explicitly into each
//! operation; nothing here is process-global.

use std::path::PathBuf;

use crate::config::BundleDefinition;
use crate::error::Result;
use crate::installer::{InstalledState, InstalledStateProbe, PackStore};
use crate::progress::ProgressDisplay;
use crate::resolver::DesiredVersions;
use crate::source::{PackFetcher, VersionOracle};
use crate::toolchain::{ToolchainInfo, ToolchainLayout};

pub struct LifecycleContext<'a> {
    pub layout: ToolchainLayout,
    pub toolchain: ToolchainInfo,
    pub bundle: BundleDefinition,
    pub oracle: &'a dyn VersionOracle,
    pub fetcher: &'a dyn PackFetcher,

    /// Draw a progress bar while packs are processed
    pub show_progress: bool,
}

impl<'a> LifecycleContext<'a> {
    pub fn new(
        layout: ToolchainLayout,
        toolchain: ToolchainInfo,
        bundle: BundleDefinition,
        oracle: &'a dyn VersionOracle,
        fetcher: &'a dyn PackFetcher,
    ) -> Self {
        Self {
            layout,
            toolchain,
            bundle,
            oracle,
            fetcher,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn runtime_identifier(&self) -> &str {
        &self.toolchain.runtime_identifier
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.layout.manifest_dir(&self.bundle.name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.layout.manifest_path(&self.bundle.name)
    }

    pub fn installed_workload_marker(&self) -> PathBuf {
        self.layout.installed_workload_marker(&self.bundle.name)
    }

    pub fn store(&self) -> PackStore<'_> {
        PackStore::new(
            &self.layout,
            self.fetcher,
            &self.toolchain.runtime_identifier,
            &self.bundle.target_framework,
        )
    }

    pub fn probe(&self) -> InstalledState {
        InstalledStateProbe::new(&self.layout).probe(&self.bundle.packs)
    }

    pub fn resolve_desired(&self) -> Result<DesiredVersions> {
        DesiredVersions::resolve(&self.bundle, self.oracle, self.runtime_identifier())
    }

    pub fn progress(&self) -> ProgressDisplay {
        if self.show_progress {
            ProgressDisplay::new(self.bundle.packs.len() as u64)
        } else {
            ProgressDisplay::hidden()
        }
    }
}
