//! Domain models for elskom-check
//!
//! This module contains pure domain objects representing core business entities.
//! These types are free of filesystem access and carry the version rules.

pub mod pack;
pub mod version;

pub use pack::{Pack, PackKind};
pub use version::VersionBand;
