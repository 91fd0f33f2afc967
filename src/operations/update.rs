//! Update operation
//!
//! Compares each published version against the version the manifest records,
//! except that a locally installed override found by the probe is adopted as is.
//! The manifest is written once, and only when something changed.

use crate::common::fs::touch;
use crate::config::{Manifest, PackDefinition};
use crate::error::{Result, fs as fs_error};
use crate::installer::{InstalledState, PackStore};
use crate::progress::ProgressDisplay;
use crate::resolver::{Decision, DesiredVersions, decide};

use super::display::{
    manifest_version_message, outcome_message, pack_version_message, update_found_message,
};
use super::{LifecycleContext, LifecycleReport, PackOutcome};

pub struct UpdateOperation<'a> {
    ctx: &'a LifecycleContext<'a>,
}

impl<'a> UpdateOperation<'a> {
    pub fn new(ctx: &'a LifecycleContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> Result<LifecycleReport> {
        let ctx = self.ctx;
        ctx.bundle.ensure_runtime_supported(ctx.runtime_identifier())?;

        let manifest_path = ctx.manifest_path();
        let mut manifest = Manifest::load(&manifest_path, &ctx.bundle)?;
        let desired = ctx.resolve_desired()?;
        let state = ctx.probe();

        let progress = ctx.progress();
        let (outcomes, packs_changed) =
            match self.apply(&mut manifest, &desired, &state, &progress) {
                Ok(applied) => applied,
                Err(err) => {
                    progress.abandon();
                    return Err(err);
                }
            };
        progress.finish();

        let version_changed = manifest.sync_version();
        let manifest_saved = packs_changed || version_changed;
        if manifest_saved {
            manifest.save(&manifest_path, &ctx.bundle)?;
            if version_changed {
                println!("{}", manifest_version_message(&manifest.version));
            }
            for outcome in &outcomes {
                let version = match outcome {
                    PackOutcome::Updated { to, .. } => to,
                    PackOutcome::OverrideAdopted { version, .. } => version,
                    _ => continue,
                };
                if let Some(definition) = ctx.bundle.pack(outcome.name()) {
                    println!("{}", pack_version_message(definition.kind, version));
                }
            }
        }

        let marker = ctx.installed_workload_marker();
        if !marker.is_file() {
            touch(&marker)
                .map_err(|e| fs_error::write_failed(marker.display().to_string(), e.to_string()))?;
        }

        tracing::info!(
            bundle = %ctx.bundle.name,
            version = %manifest.version,
            manifest_saved,
            "workload updated"
        );
        Ok(LifecycleReport {
            packs: outcomes,
            manifest_saved,
            manifest_version: Some(manifest.version),
        })
    }

    fn apply(
        &self,
        manifest: &mut Manifest,
        desired: &DesiredVersions,
        state: &InstalledState,
        progress: &ProgressDisplay,
    ) -> Result<(Vec<PackOutcome>, bool)> {
        let ctx = self.ctx;
        let store = ctx.store();
        let total = ctx.bundle.packs.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut changed = false;

        for (index, definition) in ctx.bundle.packs.iter().enumerate() {
            progress.update_pack(&definition.name, index + 1, total);
            let name = definition.name.clone();

            let outcome = match desired.get(&definition.name) {
                None => PackOutcome::Unresolved { name },
                Some(wanted) => {
                    let installed = state.version(&definition.name);
                    let recorded = manifest.pack(&definition.name).map(|p| p.version.clone());
                    let (outcome, pack_changed) = self.update_pack(
                        &store,
                        manifest,
                        definition,
                        wanted,
                        installed,
                        recorded.as_deref(),
                        progress,
                    )?;
                    changed |= pack_changed;
                    outcome
                }
            };

            if matches!(outcome, PackOutcome::UpToDate { .. } | PackOutcome::OverrideAdopted { .. }) {
                if let Some(installed) = state.get(&definition.name) {
                    store.restore_marker(installed)?;
                }
            }

            progress.println(&outcome_message(&outcome));
            progress.inc_pack();
            outcomes.push(outcome);
        }

        Ok((outcomes, changed))
    }

    #[allow(clippy::too_many_arguments)]
    fn update_pack(
        &self,
        store: &PackStore<'_>,
        manifest: &mut Manifest,
        definition: &PackDefinition,
        wanted: &str,
        installed: &str,
        recorded: Option<&str>,
        progress: &ProgressDisplay,
    ) -> Result<(PackOutcome, bool)> {
        let name = definition.name.clone();

        // probe first: a missing pack is reinstalled, a local override is adopted
        match decide(wanted, installed) {
            Decision::Install { version } => {
                store.place(definition, &version)?;
                let changed = manifest.insert_pack(definition.at(version.as_str()));
                return Ok((PackOutcome::Installed { name, version }, changed));
            }
            Decision::Skip { version } => {
                let changed = manifest.insert_pack(definition.at(version.as_str()));
                let outcome = if changed {
                    PackOutcome::OverrideAdopted { name, version }
                } else {
                    PackOutcome::UpToDate { name, version }
                };
                return Ok((outcome, changed));
            }
            Decision::Update { .. } | Decision::AlreadyInstalled { .. } => {}
        }

        let baseline = recorded.filter(|v| !v.is_empty()).unwrap_or(installed);
        let decision = decide(wanted, baseline);
        tracing::debug!(pack = %name, %baseline, %installed, %decision, "update decision");

        if matches!(decision, Decision::AlreadyInstalled { .. }) && installed == wanted {
            return Ok((
                PackOutcome::UpToDate {
                    name,
                    version: wanted.to_string(),
                },
                false,
            ));
        }

        progress.println(&update_found_message(&name));
        if installed != wanted {
            store.remove(definition, &[installed, baseline])?;
            store.place(definition, wanted)?;
        }
        let changed = manifest.insert_pack(definition.at(wanted));
        Ok((
            PackOutcome::Updated {
                name,
                from: baseline.to_string(),
                to: wanted.to_string(),
            },
            changed,
        ))
    }
}
