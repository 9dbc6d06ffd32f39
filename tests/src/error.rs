//! Error types for scenario runs.

use metaed_pipeline::PipelineError;
use thiserror::Error;

/// Errors raised while running or checking a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario '{scenario}' failed to run: {source}")]
    Pipeline {
        scenario: String,
        #[source]
        source: PipelineError,
    },

    #[error("Scenario '{scenario}' assertion failed: {message}")]
    AssertionFailed { scenario: String, message: String },

    #[error("Scenario '{scenario}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        scenario: String,
        pattern: String,
        reason: String,
    },
}

impl ScenarioError {
    pub fn pipeline(scenario: impl Into<String>, source: PipelineError) -> Self {
        Self::Pipeline {
            scenario: scenario.into(),
            source,
        }
    }

    pub fn assertion_failed(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn invalid_pattern(
        scenario: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            scenario: scenario.into(),
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for scenario runs.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
