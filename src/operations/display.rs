//! User-facing messages for lifecycle outcomes

use console::Style;

use super::PackOutcome;
use crate::domain::PackKind;

/// The line printed for a pack outcome
pub fn outcome_message(outcome: &PackOutcome) -> String {
    match outcome {
        PackOutcome::Installed { name, .. } => {
            format!("Successfully installed workload package '{name}'.")
        }
        PackOutcome::Updated { name, .. } => {
            format!("Successfully updated workload package '{name}'.")
        }
        PackOutcome::OverrideAdopted { name, .. } => {
            format!("Picked up newer installed workload package '{name}', using that instead.")
        }
        PackOutcome::AlreadyInstalled { name, .. } => format!(
            "Workload package '{name}' is already installed. Did you intend to run 'update'?"
        ),
        PackOutcome::UpToDate { name, .. } => {
            format!("No updates found for workload package '{name}'.")
        }
        PackOutcome::Unresolved { name } => {
            format!("No version for workload package '{name}' is published to the configured feed.")
        }
        PackOutcome::Uninstalled { name } => {
            format!("Successfully uninstalled workload package '{name}'.")
        }
        PackOutcome::AlreadyUninstalled { name } => {
            format!("Workload package '{name}' was already uninstalled.")
        }
        PackOutcome::Failed { name, reason } => {
            format!("Failed to uninstall workload package '{name}': {reason}")
        }
    }
}

pub fn update_found_message(name: &str) -> String {
    format!("Update found for workload package '{name}'.")
}

pub fn manifest_version_message(version: &str) -> String {
    format!("Workload Manifest is now version: '{version}'.")
}

/// Printed after an update for each pack whose recorded version changed
pub fn pack_version_message(kind: PackKind, version: &str) -> String {
    let label = match kind {
        PackKind::Sdk => "Sdk",
        PackKind::Runtime => "Runtime Pack",
        PackKind::Framework => "Reference Pack",
        PackKind::Template => "Template Pack",
    };
    format!("Workload {label} is now version: '{version}'.")
}

/// Closing line of a command, e.g. `Installed workload 'elskom' (8.0.100)`
pub fn summary_line(action: &str, bundle: &str, version: Option<&str>) -> String {
    let action = Style::new().green().bold().apply_to(action);
    match version {
        Some(version) => format!("{action} workload '{bundle}' ({version})"),
        None => format!("{action} workload '{bundle}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_pack() {
        let outcome = PackOutcome::AlreadyInstalled {
            name: "Elskom.Sdk".to_string(),
            version: "8.0.100".to_string(),
        };
        assert_eq!(
            outcome_message(&outcome),
            "Workload package 'Elskom.Sdk' is already installed. Did you intend to run 'update'?"
        );
        assert_eq!(
            outcome_message(&PackOutcome::AlreadyUninstalled {
                name: "Elskom.Sdk.App".to_string()
            }),
            "Workload package 'Elskom.Sdk.App' was already uninstalled."
        );
        assert_eq!(
            manifest_version_message("8.0.200"),
            "Workload Manifest is now version: '8.0.200'."
        );
    }

    #[test]
    fn test_pack_version_message_by_kind() {
        assert_eq!(
            pack_version_message(PackKind::Sdk, "8.0.200"),
            "Workload Sdk is now version: '8.0.200'."
        );
        assert_eq!(
            pack_version_message(PackKind::Runtime, "8.0.200"),
            "Workload Runtime Pack is now version: '8.0.200'."
        );
        assert_eq!(
            pack_version_message(PackKind::Framework, "8.0.200"),
            "Workload Reference Pack is now version: '8.0.200'."
        );
        assert_eq!(
            pack_version_message(PackKind::Template, "2.1.0-dev"),
            "Workload Template Pack is now version: '2.1.0-dev'."
        );
    }
}
