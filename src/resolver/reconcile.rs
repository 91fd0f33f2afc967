//! Per-pack reconciliation of desired and installed versions
//!
//! Rules, applied in order:
//! 1. nothing installed: install the desired version
//! 2. the installed version is a development build (and the desired one is not),
//!    or is newer than the desired one: keep the installed version
//! 3. the versions differ: remove the installed version, then install the desired one
//! 4. otherwise the desired version is already installed
//!
//! Versions that do not parse are never "newer", so a differing malformed pair
//! always ends up in rule 3.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::version::{self, is_dev_build};

/// What to do with one pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Not installed yet
    Install { version: String },

    /// Remove `from`, then install `to`
    Update { from: String, to: String },

    /// A locally installed version overrides the desired one
    ///
    /// No files change, but the manifest must record `version`.
    Skip { version: String },

    /// The desired version is exactly what is installed
    AlreadyInstalled { version: String },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Install { version } => write!(f, "install {version}"),
            Decision::Update { from, to } => write!(f, "update {from} -> {to}"),
            Decision::Skip { version } => write!(f, "keep installed {version}"),
            Decision::AlreadyInstalled { version } => write!(f, "already installed {version}"),
        }
    }
}

/// Decide what to do with a pack given the desired and installed versions
///
/// `desired` must be a resolved (non-empty) version; `installed` is empty when
/// nothing is installed.
pub fn decide(desired: &str, installed: &str) -> Decision {
    debug_assert!(!desired.is_empty(), "desired version must be resolved");

    if installed.is_empty() {
        return Decision::Install {
            version: desired.to_string(),
        };
    }

    if overrides(installed, desired) {
        return Decision::Skip {
            version: installed.to_string(),
        };
    }

    if installed != desired {
        return Decision::Update {
            from: installed.to_string(),
            to: desired.to_string(),
        };
    }

    Decision::AlreadyInstalled {
        version: installed.to_string(),
    }
}

/// Whether an installed version takes precedence over the desired one
fn overrides(installed: &str, desired: &str) -> bool {
    (is_dev_build(installed) && !is_dev_build(desired))
        || version::compare(installed, desired) == Some(Ordering::Greater)
}
