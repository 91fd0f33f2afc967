//! Bundle definition (which packs make up the workload)
//!
//! The built-in definition is the `elskom` workload. A custom definition can be
//! loaded from YAML:
//!
//! ```yaml
//! name: elskom
//! description: .NET SDK Workload for building Els_kom, and it's plugins.
//! packs:
//!   - name: Elskom.Sdk
//!     kind: sdk
//!   - name: Elskom.Sdk.App
//!     kind: runtime
//! runtime_identifiers: [linux-x64, win-x64]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Pack, PackKind};
use crate::error::{CheckError, Result, config, toolchain::unsupported_rid};

const DEFAULT_TARGET_FRAMEWORK: &str = "net8.0";
const DEFAULT_FRAMEWORK_PROPERTY: &str = "ElskomSdkFrameworkVersion";

/// Runtime identifiers the default workload publishes runtime packs for
const DEFAULT_RUNTIME_IDENTIFIERS: [&str; 8] = [
    "win-x86",
    "win-x64",
    "win-arm64",
    "linux-x64",
    "linux-arm",
    "linux-arm64",
    "osx-x64",
    "osx-arm64",
];

/// A pack as declared by the bundle (name and kind, no version)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDefinition {
    pub name: String,
    pub kind: PackKind,

    /// Package id in the feed, when it differs from the pack name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
}

impl PackDefinition {
    pub fn new(name: impl Into<String>, kind: PackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            registry_id: None,
        }
    }

    /// Package id to resolve and fetch from the feed
    ///
    /// Runtime packs are published once per runtime identifier as
    /// `<id>.Runtime.<rid>` but installed under the logical pack name.
    pub fn registry_id(&self, runtime_identifier: &str) -> String {
        let base = self.registry_id.as_deref().unwrap_or(&self.name);
        match self.kind {
            PackKind::Runtime => format!("{base}.Runtime.{runtime_identifier}"),
            PackKind::Sdk | PackKind::Framework | PackKind::Template => base.to_string(),
        }
    }

    pub fn at(&self, version: impl Into<String>) -> Pack {
        Pack::new(self.name.clone(), self.kind, version)
    }
}

/// The named collection of packs managed together under one manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDefinition {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub packs: Vec<PackDefinition>,

    #[serde(default = "default_runtime_identifiers")]
    pub runtime_identifiers: Vec<String>,

    /// Target framework folder selected from runtime packs (`runtimes/<rid>/lib/<tfm>/`)
    #[serde(default = "default_target_framework")]
    pub target_framework: String,

    /// MSBuild property carrying the runtime pack version in the `.targets` file
    #[serde(default = "default_framework_property")]
    pub framework_version_property: String,
}

fn default_runtime_identifiers() -> Vec<String> {
    DEFAULT_RUNTIME_IDENTIFIERS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_target_framework() -> String {
    DEFAULT_TARGET_FRAMEWORK.to_string()
}

fn default_framework_property() -> String {
    DEFAULT_FRAMEWORK_PROPERTY.to_string()
}

impl Default for BundleDefinition {
    fn default() -> Self {
        Self::elskom()
    }
}

impl BundleDefinition {
    /// The built-in `elskom` workload
    pub fn elskom() -> Self {
        Self {
            name: "elskom".to_string(),
            description: ".NET SDK Workload for building Els_kom, and it's plugins.".to_string(),
            packs: vec![
                PackDefinition::new("Elskom.Sdk", PackKind::Sdk),
                PackDefinition::new("Elskom.Sdk.App.Ref", PackKind::Framework),
                PackDefinition::new("Elskom.Sdk.App", PackKind::Runtime),
                PackDefinition::new("Elskom.Sdk.Templates", PackKind::Template),
            ],
            runtime_identifiers: default_runtime_identifiers(),
            target_framework: default_target_framework(),
            framework_version_property: default_framework_property(),
        }
    }

    /// Parse a bundle definition from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load a bundle definition file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            CheckError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Load the definition at `path`, or the built-in one when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::elskom()),
        }
    }

    /// Validate the invariants the lifecycle relies on
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(config::invalid("bundle name cannot be empty"));
        }
        if self.packs.is_empty() {
            return Err(config::invalid(format!(
                "bundle '{}' declares no packs",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for pack in &self.packs {
            if !seen.insert(pack.name.as_str()) {
                return Err(config::invalid(format!(
                    "pack '{}' is declared more than once",
                    pack.name
                )));
            }
        }

        let count = |kind: PackKind| self.packs.iter().filter(|p| p.kind == kind).count();
        if count(PackKind::Sdk) != 1 {
            return Err(config::invalid(format!(
                "bundle '{}' must declare exactly one sdk pack",
                self.name
            )));
        }
        if count(PackKind::Runtime) > 1 {
            return Err(config::invalid(format!(
                "bundle '{}' declares more than one runtime pack",
                self.name
            )));
        }

        Ok(())
    }

    pub fn pack(&self, name: &str) -> Option<&PackDefinition> {
        self.packs.iter().find(|p| p.name == name)
    }

    pub fn runtime_pack(&self) -> Option<&PackDefinition> {
        self.packs.iter().find(|p| p.kind == PackKind::Runtime)
    }

    pub fn pack_names(&self) -> Vec<String> {
        self.packs.iter().map(|p| p.name.clone()).collect()
    }

    /// Fail when the bundle ships a runtime pack but not for `runtime_identifier`
    pub fn ensure_runtime_supported(&self, runtime_identifier: &str) -> Result<()> {
        if self.runtime_pack().is_none()
            || self
                .runtime_identifiers
                .iter()
                .any(|rid| rid == runtime_identifier)
        {
            return Ok(());
        }
        Err(unsupported_rid(runtime_identifier, &self.runtime_identifiers))
    }
}
