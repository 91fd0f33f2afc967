//! Toolchain detection errors

use super::CheckError;

/// Creates an unsupported SDK error
pub fn unsupported_sdk(version: impl Into<String>) -> CheckError {
    CheckError::UnsupportedSdk {
        version: version.into(),
    }
}

/// Creates an invalid version error
pub fn invalid_version(version: impl Into<String>) -> CheckError {
    CheckError::InvalidVersion {
        version: version.into(),
    }
}

/// Creates an unsupported runtime identifier error
pub fn unsupported_rid(rid: impl Into<String>, supported: &[String]) -> CheckError {
    CheckError::UnsupportedRuntimeIdentifier {
        rid: rid.into(),
        supported: supported.join(", "),
    }
}
