//! Pack resolution, placement and removal errors

use super::CheckError;

/// Creates a pack fetch failed error
pub fn fetch_failed(
    name: impl Into<String>,
    version: impl Into<String>,
    reason: impl Into<String>,
) -> CheckError {
    CheckError::PackFetchFailed {
        name: name.into(),
        version: version.into(),
        reason: reason.into(),
    }
}

/// Creates a feed read failed error
pub fn feed_read_failed(path: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::FeedReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
