//! Enhancer outcomes.

use crate::ValidationFailure;
use serde::{Deserialize, Serialize};

/// Result of running one enhancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancerResult {
    /// The enhancer that ran.
    pub enhancer_name: String,
    /// Whether the enhancer completed its work.
    pub success: bool,
    /// Diagnostic explaining an unsuccessful run.
    pub validation_failure: Option<ValidationFailure>,
}

impl EnhancerResult {
    /// A successful run.
    pub fn ok(enhancer_name: impl Into<String>) -> Self {
        Self {
            enhancer_name: enhancer_name.into(),
            success: true,
            validation_failure: None,
        }
    }

    /// An unsuccessful run with its diagnostic.
    pub fn failed(enhancer_name: impl Into<String>, message: impl Into<String>) -> Self {
        let enhancer_name = enhancer_name.into();
        let failure = ValidationFailure::error(enhancer_name.clone(), message);
        Self {
            enhancer_name,
            success: false,
            validation_failure: Some(failure),
        }
    }
}
