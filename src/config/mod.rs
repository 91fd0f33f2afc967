//! Configuration file handling for elskom-check
//!
//! This module contains data structures for:
//! - bundle definition (built-in `elskom` workload or a YAML file)
//! - `WorkloadManifest.json` - installed state of a bundle for one feature band

pub mod bundle;
pub mod manifest;

// Re-export commonly used types
pub use bundle::{BundleDefinition, PackDefinition};
pub use manifest::Manifest;
