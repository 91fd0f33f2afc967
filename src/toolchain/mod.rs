//! Toolchain information consumed by the lifecycle operations
//!
//! - [`detection`] - locating the SDK root, feature band and runtime identifier
//! - [`layout`] - paths of manifests, packs and markers under the root

pub mod detection;
pub mod layout;

use std::path::Path;

use crate::domain::VersionBand;
use crate::error::Result;

pub use layout::ToolchainLayout;

/// Feature band and runtime identifier of the host toolchain
///
/// The lifecycle treats this as opaque input; how it was obtained (flags,
/// filesystem detection) does not matter past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInfo {
    pub feature_band: VersionBand,
    pub runtime_identifier: String,
}

impl ToolchainInfo {
    pub fn new(feature_band: VersionBand, runtime_identifier: impl Into<String>) -> Self {
        Self {
            feature_band,
            runtime_identifier: runtime_identifier.into(),
        }
    }

    /// Build toolchain info from explicit overrides, detecting what is missing
    pub fn resolve(root: &Path, sdk_version: Option<&str>, rid: Option<&str>) -> Result<Self> {
        let runtime_identifier = match rid.map(str::trim).filter(|r| !r.is_empty()) {
            Some(rid) => rid.to_string(),
            None => detection::host_runtime_identifier(),
        };

        let feature_band = match sdk_version.map(str::trim).filter(|v| !v.is_empty()) {
            Some(version) => detection::supported_band(version)?,
            None => {
                let version = detection::newest_sdk_version(root)?;
                println!(".NET SDK Location: {}", root.display());
                println!("Detected .NET SDK Version: {version}");
                let band = detection::supported_band(&version)?;
                println!("Detected .NET SDK Band as: {band}");
                band
            }
        };

        tracing::debug!(%feature_band, %runtime_identifier, "resolved toolchain");
        Ok(Self::new(feature_band, runtime_identifier))
    }

    pub fn layout(&self, root: &Path) -> ToolchainLayout {
        ToolchainLayout::new(root, self.feature_band)
    }
}
