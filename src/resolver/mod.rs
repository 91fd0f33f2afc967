//! Version resolution
//!
//! Resolves the desired version of every pack in the bundle through a
//! [`VersionOracle`], then reconciles each pack against what is installed
//! ([`reconcile`]).

pub mod reconcile;

use crate::config::BundleDefinition;
use crate::error::{CheckError, Result};
use crate::source::VersionOracle;

pub use reconcile::{Decision, decide};

/// Desired versions for the packs of a bundle, in bundle order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredVersions {
    entries: Vec<(String, Option<String>)>,
}

impl DesiredVersions {
    /// Resolve every pack of `bundle`
    ///
    /// Lookups are read-only and independent; nothing is mutated until all of
    /// them have completed.
    pub fn resolve(
        bundle: &BundleDefinition,
        oracle: &dyn VersionOracle,
        runtime_identifier: &str,
    ) -> Result<Self> {
        let mut entries = Vec::with_capacity(bundle.packs.len());
        for pack in &bundle.packs {
            let registry_id = pack.registry_id(runtime_identifier);
            let version = oracle.resolve(&registry_id)?.filter(|v| !v.is_empty());
            tracing::debug!(pack = %pack.name, %registry_id, ?version, "resolved desired version");
            entries.push((pack.name.clone(), version));
        }
        Ok(Self { entries })
    }

    /// Desired version of `name`, `None` when nothing is published
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Packs without a published version
    pub fn unresolved(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Fail unless every pack resolved
    pub fn require_all(&self) -> Result<()> {
        let missing = self.unresolved();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CheckError::ResolutionFailed {
            names: missing.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapOracle(HashMap<&'static str, &'static str>);

    impl VersionOracle for MapOracle {
        fn resolve(&self, registry_id: &str) -> Result<Option<String>> {
            Ok(self.0.get(registry_id).map(|v| v.to_string()))
        }
    }

    #[test]
    fn test_resolve_uses_runtime_registry_id() {
        let oracle = MapOracle(HashMap::from([
            ("Elskom.Sdk", "8.0.100"),
            ("Elskom.Sdk.App.Ref", "8.0.100"),
            ("Elskom.Sdk.App.Runtime.linux-x64", "8.0.101"),
            ("Elskom.Sdk.Templates", "8.0.100"),
        ]));

        let desired =
            DesiredVersions::resolve(&BundleDefinition::elskom(), &oracle, "linux-x64").unwrap();

        assert_eq!(desired.get("Elskom.Sdk.App"), Some("8.0.101"));
        assert!(desired.unresolved().is_empty());
        assert!(desired.require_all().is_ok());
    }

    #[test]
    fn test_require_all_names_missing_packs() {
        let oracle = MapOracle(HashMap::from([("Elskom.Sdk", "8.0.100"), ("Elskom.Sdk.Templates", "")]));

        let desired =
            DesiredVersions::resolve(&BundleDefinition::elskom(), &oracle, "linux-x64").unwrap();

        assert_eq!(
            desired.unresolved(),
            vec!["Elskom.Sdk.App.Ref", "Elskom.Sdk.App", "Elskom.Sdk.Templates"]
        );
        match desired.require_all().unwrap_err() {
            CheckError::ResolutionFailed { names } => {
                assert_eq!(names, "Elskom.Sdk.App.Ref, Elskom.Sdk.App, Elskom.Sdk.Templates");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
