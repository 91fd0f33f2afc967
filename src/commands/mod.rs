//! Command implementations for elskom-check CLI

pub mod helpers;
pub mod install;
pub mod uninstall;
pub mod update;
pub mod version;
