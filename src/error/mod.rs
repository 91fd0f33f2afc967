//! Error types and handling for elskom-check
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Bundle definition errors
//! - [`fs`]: File system errors
//! - [`manifest`]: Workload manifest errors
//! - [`pack`]: Pack resolution, placement and removal errors
//! - [`toolchain`]: Toolchain detection errors

pub mod config;
pub mod fs;
pub mod manifest;
pub mod pack;
pub mod toolchain;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for elskom-check operations
#[derive(Error, Diagnostic, Debug)]
pub enum CheckError {
    // Toolchain errors
    #[error("Could not find a .NET SDK installation (searched: {searched})")]
    #[diagnostic(
        code(elskom_check::toolchain::not_found),
        help("Install the .NET SDK or point DOTNET_ROOT (or --dotnet-root) at its directory")
    )]
    ToolchainNotFound { searched: String },

    #[error("No .NET SDK versions found under: {path}")]
    #[diagnostic(
        code(elskom_check::toolchain::sdk_not_detected),
        help("Pass the SDK version explicitly with --sdk")
    )]
    SdkNotDetected { path: String },

    #[error("Unsupported .NET SDK version: {version}")]
    #[diagnostic(
        code(elskom_check::toolchain::unsupported_sdk),
        help("This tool is compatible only with .NET 8.0.100 SDK or newer.")
    )]
    UnsupportedSdk { version: String },

    #[error("Invalid version: '{version}'")]
    #[diagnostic(code(elskom_check::toolchain::invalid_version))]
    InvalidVersion { version: String },

    #[error("Unsupported runtime identifier: {rid}")]
    #[diagnostic(
        code(elskom_check::toolchain::unsupported_rid),
        help("Supported runtime identifiers: {supported}")
    )]
    UnsupportedRuntimeIdentifier { rid: String, supported: String },

    // Pack errors
    #[error("Could not install the workload due to failure to obtain package versions: {names}")]
    #[diagnostic(code(elskom_check::pack::resolution_failed))]
    ResolutionFailed { names: String },

    #[error("The workload '{bundle}' was already installed.")]
    #[diagnostic(
        code(elskom_check::pack::already_installed),
        help("Run 'elskom-check update' to update the installed workload")
    )]
    AlreadyInstalled { bundle: String },

    #[error("Failed to fetch workload package '{name}' version {version}: {reason}")]
    #[diagnostic(code(elskom_check::pack::fetch_failed))]
    PackFetchFailed {
        name: String,
        version: String,
        reason: String,
    },

    #[error("Failed to uninstall {count} workload package(s): {names}")]
    #[diagnostic(
        code(elskom_check::pack::uninstall_incomplete),
        help("Fix the errors above and run 'elskom-check uninstall' again")
    )]
    UninstallIncomplete { count: usize, names: String },

    // Feed errors
    #[error("No package feed configured")]
    #[diagnostic(
        code(elskom_check::feed::not_configured),
        help("Pass --feed <DIR> or set ELSKOM_CHECK_FEED")
    )]
    FeedNotConfigured,

    #[error("Failed to read package feed at '{path}': {reason}")]
    #[diagnostic(code(elskom_check::feed::read_failed))]
    FeedReadFailed { path: String, reason: String },

    // Manifest errors
    #[error("Workload is not installed: {path} does not exist")]
    #[diagnostic(
        code(elskom_check::manifest::not_installed),
        help("Run 'elskom-check install' first")
    )]
    WorkloadNotInstalled { path: String },

    #[error("Failed to parse workload manifest: {path}")]
    #[diagnostic(code(elskom_check::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid workload manifest: {message}")]
    #[diagnostic(code(elskom_check::manifest::invalid))]
    ManifestInvalid { message: String },

    // Configuration errors
    #[error("Failed to read bundle definition: {path}")]
    #[diagnostic(code(elskom_check::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse bundle definition: {path}")]
    #[diagnostic(code(elskom_check::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid bundle definition: {message}")]
    #[diagnostic(code(elskom_check::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(elskom_check::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(elskom_check::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove: {path}")]
    #[diagnostic(code(elskom_check::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(elskom_check::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        CheckError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CheckError {
    fn from(err: serde_yaml::Error) -> Self {
        CheckError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = CheckError::AlreadyInstalled {
            bundle: "elskom".to_string(),
        };
        assert_eq!(err.to_string(), "The workload 'elskom' was already installed.");
    }

    #[test]
    fn test_error_code() {
        let err = CheckError::AlreadyInstalled {
            bundle: "elskom".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("elskom_check::pack::already_installed".to_string())
        );
    }

    #[test]
    fn test_already_installed_suggests_update() {
        let err = CheckError::AlreadyInstalled {
            bundle: "elskom".to_string(),
        };
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("update"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CheckError = io_err.into();
        assert!(matches!(err, CheckError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("{ not json");
        let err: CheckError = parse_result.unwrap_err().into();
        assert!(matches!(err, CheckError::ManifestParseFailed { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: CheckError = parse_result.unwrap_err().into();
        assert!(matches!(err, CheckError::ConfigParseFailed { .. }));
    }

    test_error_contains!(
        test_feed_not_configured_error,
        CheckError::FeedNotConfigured,
        "No package feed configured"
    );

    test_error_contains!(
        test_resolution_failed_error,
        CheckError::ResolutionFailed {
            names: "Elskom.Sdk, Elskom.Sdk.App".to_string()
        },
        "failure to obtain package versions",
        "Elskom.Sdk.App"
    );

    test_error_contains!(
        test_uninstall_incomplete_error,
        CheckError::UninstallIncomplete {
            count: 2,
            names: "a, b".to_string()
        },
        "2 workload package(s)"
    );

    #[test]
    fn test_constructors() {
        assert!(matches!(
            fs::write_failed("/x", "disk full"),
            CheckError::FileWriteFailed { .. }
        ));
        assert!(matches!(
            manifest::not_installed("/x/WorkloadManifest.json"),
            CheckError::WorkloadNotInstalled { .. }
        ));
        assert!(matches!(
            pack::fetch_failed("Elskom.Sdk", "8.0.100", "not found"),
            CheckError::PackFetchFailed { .. }
        ));
        assert!(matches!(
            toolchain::unsupported_sdk("7.0.100"),
            CheckError::UnsupportedSdk { .. }
        ));
        assert!(matches!(
            config::invalid("no sdk pack"),
            CheckError::ConfigInvalid { .. }
        ));
    }
}
