//! Uninstall operation
//!
//! Removes the manifest directory, the workload marker and every pack. A pack
//! that fails to uninstall does not stop the others; the failures are reported
//! together at the end.

use crate::common::fs::{prune_empty_dirs, remove_dir_all_if_exists, remove_file_if_exists};
use crate::config::Manifest;
use crate::error::{CheckError, Result, fs as fs_error};
use crate::installer::RemoveOutcome;

use super::display::outcome_message;
use super::{LifecycleContext, LifecycleReport, PackOutcome};

pub struct UninstallOperation<'a> {
    ctx: &'a LifecycleContext<'a>,
}

impl<'a> UninstallOperation<'a> {
    pub fn new(ctx: &'a LifecycleContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> Result<LifecycleReport> {
        let ctx = self.ctx;

        // recorded versions locate markers of packs whose directories are gone
        let manifest = match Manifest::load(&ctx.manifest_path(), &ctx.bundle) {
            Ok(manifest) => Some(manifest),
            Err(CheckError::WorkloadNotInstalled { .. }) => None,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable manifest");
                None
            }
        };

        let manifest_dir = ctx.manifest_dir();
        remove_dir_all_if_exists(&manifest_dir).map_err(|e| {
            fs_error::remove_failed(manifest_dir.display().to_string(), e.to_string())
        })?;
        let marker = ctx.installed_workload_marker();
        remove_file_if_exists(&marker)
            .map_err(|e| fs_error::remove_failed(marker.display().to_string(), e.to_string()))?;
        if let Some(parent) = marker.parent() {
            prune_empty_dirs(parent, ctx.layout.root());
        }

        let state = ctx.probe();
        let store = ctx.store();
        let progress = ctx.progress();
        let total = ctx.bundle.packs.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, definition) in ctx.bundle.packs.iter().enumerate() {
            progress.update_pack(&definition.name, index + 1, total);
            let name = definition.name.clone();
            let installed = state.version(&definition.name);
            let recorded = manifest
                .as_ref()
                .and_then(|m| m.pack(&definition.name))
                .map_or("", |p| p.version.as_str());

            let outcome = match store.remove(definition, &[installed, recorded]) {
                Ok(RemoveOutcome::Removed) => PackOutcome::Uninstalled { name },
                Ok(RemoveOutcome::AlreadyUninstalled) => PackOutcome::AlreadyUninstalled { name },
                Err(err) => {
                    tracing::error!(pack = %name, error = %err, "failed to uninstall pack");
                    PackOutcome::Failed {
                        name,
                        reason: err.to_string(),
                    }
                }
            };

            progress.println(&outcome_message(&outcome));
            progress.inc_pack();
            outcomes.push(outcome);
        }
        progress.finish();

        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|o| matches!(o, PackOutcome::Failed { .. }))
            .map(PackOutcome::name)
            .collect();
        if !failed.is_empty() {
            return Err(CheckError::UninstallIncomplete {
                count: failed.len(),
                names: failed.join(", "),
            });
        }

        tracing::info!(bundle = %ctx.bundle.name, "workload uninstalled");
        Ok(LifecycleReport {
            packs: outcomes,
            manifest_saved: false,
            manifest_version: None,
        })
    }
}
