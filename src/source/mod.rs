//! Pack sources
//!
//! The lifecycle talks to a pack source through two collaborators:
//! - [`VersionOracle`]: which version of a package is published
//! - [`PackFetcher`]: materialize a published version into a directory
//!
//! [`feed::LocalFeed`] implements both over a directory mirror of the registry.

pub mod feed;

use std::path::PathBuf;

use crate::error::{CheckError, Result};

pub use feed::LocalFeed;

/// Resolves the desired version of a package
pub trait VersionOracle {
    /// Latest published version of `registry_id`
    ///
    /// `Ok(None)` means the package has no published version; errors are reserved
    /// for faults reading the source itself.
    fn resolve(&self, registry_id: &str) -> Result<Option<String>>;
}

/// Retrieves and unpacks package contents
pub trait PackFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<()>;
}

/// Which entries of a package end up in the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The whole package, directory structure preserved
    Everything,

    /// Only the runtime assets for one runtime identifier, flattened
    ///
    /// Files under `runtimes/<rid>/lib/<target_framework>/` and
    /// `runtimes/<rid>/native/` are copied into the destination root, and
    /// `versions_file` is renamed to `.version`.
    Runtime {
        runtime_identifier: String,
        target_framework: String,
        versions_file: String,
    },
}

/// One package version to materialize into `destination`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub registry_id: String,
    pub version: String,
    pub destination: PathBuf,
    pub selection: Selection,
}

/// Source used when no feed is configured; every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeed;

impl VersionOracle for NoFeed {
    fn resolve(&self, _registry_id: &str) -> Result<Option<String>> {
        Err(CheckError::FeedNotConfigured)
    }
}

impl PackFetcher for NoFeed {
    fn fetch(&self, _request: &FetchRequest) -> Result<()> {
        Err(CheckError::FeedNotConfigured)
    }
}
