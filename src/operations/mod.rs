//! Lifecycle operations for installing, updating and uninstalling a bundle
//!
//! Each operation sequences the same building blocks:
//! - probe the installed state (from the installer module)
//! - decide per pack (from the resolver module)
//! - place or remove packs (from the installer module)
//! - persist the manifest (from the config module)
//!
//! Packs are processed sequentially in bundle order. Nothing is journaled: an
//! interrupted run is reconciled by the next run's probe.

pub mod context;
pub mod display;
pub mod install;
pub mod uninstall;
pub mod update;


pub use context::LifecycleContext;
pub use install::InstallOperation;
pub use uninstall::UninstallOperation;
pub use update::UpdateOperation;

/// What happened to one pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    Installed { name: String, version: String },
    Updated { name: String, from: String, to: String },
    /// A locally installed version was recorded instead of the published one
    OverrideAdopted { name: String, version: String },
    AlreadyInstalled { name: String, version: String },
    UpToDate { name: String, version: String },
    Unresolved { name: String },
    Uninstalled { name: String },
    AlreadyUninstalled { name: String },
    Failed { name: String, reason: String },
}

impl PackOutcome {
    pub fn name(&self) -> &str {
        match self {
            PackOutcome::Installed { name, .. }
            | PackOutcome::Updated { name, .. }
            | PackOutcome::OverrideAdopted { name, .. }
            | PackOutcome::AlreadyInstalled { name, .. }
            | PackOutcome::UpToDate { name, .. }
            | PackOutcome::Unresolved { name }
            | PackOutcome::Uninstalled { name }
            | PackOutcome::AlreadyUninstalled { name }
            | PackOutcome::Failed { name, .. } => name,
        }
    }
}

/// Summary of one lifecycle operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub packs: Vec<PackOutcome>,

    /// Whether the manifest file was written
    pub manifest_saved: bool,

    /// Manifest version after the operation, if a manifest remains
    pub manifest_version: Option<String>,
}

impl LifecycleReport {
    #[cfg(test)]
    pub fn outcome(&self, name: &str) -> Option<&PackOutcome> {
        self.packs.iter().find(|o| o.name() == name)
    }
}
