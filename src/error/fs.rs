//! File system errors

use super::CheckError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a remove failed error
pub fn remove_failed(path: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::RemoveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
