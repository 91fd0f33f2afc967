//! Workload manifest errors

use super::CheckError;

/// Creates a workload not installed error
pub fn not_installed(path: impl Into<String>) -> CheckError {
    CheckError::WorkloadNotInstalled { path: path.into() }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid manifest error
pub fn invalid(message: impl Into<String>) -> CheckError {
    CheckError::ManifestInvalid {
        message: message.into(),
    }
}
