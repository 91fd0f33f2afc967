//! Install operation
//!
//! All desired versions are resolved before anything is written. Only packs
//! that are not installed get placed; a bundle that is already fully installed
//! (packs, manifest and workload marker) is reported as a conflict.

use crate::common::fs::touch;
use crate::config::Manifest;
use crate::domain::Pack;
use crate::error::{CheckError, Result, fs as fs_error};
use crate::installer::InstalledState;
use crate::progress::ProgressDisplay;
use crate::resolver::{Decision, DesiredVersions, decide};

use super::display::outcome_message;
use super::{LifecycleContext, LifecycleReport, PackOutcome};

pub struct InstallOperation<'a> {
    ctx: &'a LifecycleContext<'a>,
}

impl<'a> InstallOperation<'a> {
    pub fn new(ctx: &'a LifecycleContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> Result<LifecycleReport> {
        let ctx = self.ctx;
        ctx.bundle.ensure_runtime_supported(ctx.runtime_identifier())?;

        let desired = ctx.resolve_desired()?;
        for name in desired.unresolved() {
            println!(
                "{}",
                outcome_message(&PackOutcome::Unresolved {
                    name: name.to_string()
                })
            );
        }
        desired.require_all()?;

        let state = ctx.probe();
        let progress = ctx.progress();
        let (outcomes, packs) = match self.apply(&desired, &state, &progress) {
            Ok(applied) => applied,
            Err(err) => {
                progress.abandon();
                return Err(err);
            }
        };
        progress.finish();

        let placed = outcomes
            .iter()
            .any(|o| matches!(o, PackOutcome::Installed { .. }));
        let manifest_path = ctx.manifest_path();
        let marker = ctx.installed_workload_marker();
        if !placed && manifest_path.is_file() && marker.is_file() {
            return Err(CheckError::AlreadyInstalled {
                bundle: ctx.bundle.name.clone(),
            });
        }

        let manifest = Manifest::create(&ctx.bundle, packs)?;
        manifest.save(&manifest_path, &ctx.bundle)?;
        touch(&marker)
            .map_err(|e| fs_error::write_failed(marker.display().to_string(), e.to_string()))?;
        tracing::info!(
            bundle = %ctx.bundle.name,
            version = %manifest.version,
            "workload installed"
        );

        Ok(LifecycleReport {
            packs: outcomes,
            manifest_saved: true,
            manifest_version: Some(manifest.version),
        })
    }

    fn apply(
        &self,
        desired: &DesiredVersions,
        state: &InstalledState,
        progress: &ProgressDisplay,
    ) -> Result<(Vec<PackOutcome>, Vec<Pack>)> {
        let ctx = self.ctx;
        let store = ctx.store();
        let total = ctx.bundle.packs.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut packs = Vec::with_capacity(total);

        for (index, definition) in ctx.bundle.packs.iter().enumerate() {
            progress.update_pack(&definition.name, index + 1, total);
            let Some(wanted) = desired.get(&definition.name) else {
                continue;
            };
            let installed = state.version(&definition.name);
            let decision = decide(wanted, installed);
            tracing::debug!(pack = %definition.name, %decision, "install decision");

            let outcome = match &decision {
                Decision::Install { version } => {
                    store.place(definition, version)?;
                    packs.push(definition.at(version.as_str()));
                    PackOutcome::Installed {
                        name: definition.name.clone(),
                        version: version.clone(),
                    }
                }
                Decision::Skip { version } => {
                    packs.push(definition.at(version.as_str()));
                    PackOutcome::OverrideAdopted {
                        name: definition.name.clone(),
                        version: version.clone(),
                    }
                }
                Decision::Update { .. } | Decision::AlreadyInstalled { .. } => {
                    packs.push(definition.at(installed));
                    PackOutcome::AlreadyInstalled {
                        name: definition.name.clone(),
                        version: installed.to_string(),
                    }
                }
            };

            progress.println(&outcome_message(&outcome));
            progress.inc_pack();
            outcomes.push(outcome);
        }

        Ok((outcomes, packs))
    }
}
