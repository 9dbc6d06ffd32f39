//! Error types for version parsing.

use thiserror::Error;

/// Errors that can occur when reading versions and ranges.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid version range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },

    #[error("Range pattern error: {0}")]
    Pattern(#[from] regex_lite::Error),
}

impl VersionError {
    pub fn invalid_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_range(input: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionError::InvalidRange {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;
