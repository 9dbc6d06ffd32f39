//! Configuration errors.

use metaed_model::BuildError;
use thiserror::Error;

/// Errors that abort a run before any entity is built.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Namespace {namespace} depends on {dependency}, which is not a configured namespace")]
    UnknownDependency {
        namespace: String,
        dependency: String,
    },

    #[error("Namespace names {first} and {second} differ only by letter case")]
    CaseOnlyDifference { first: String, second: String },

    #[error("Namespace {0} is configured more than once")]
    DuplicateNamespace(String),

    #[error("Core namespace {namespace} cannot depend on extension namespace {dependency}")]
    CoreDependsOnExtension {
        namespace: String,
        dependency: String,
    },

    #[error("Project {0} has no usable namespace name")]
    EmptyNamespaceName(String),

    #[error("Namespace pattern error: {0}")]
    Pattern(#[from] regex_lite::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] BuildError),
}

impl ConfigurationError {
    pub fn unknown_dependency(namespace: impl Into<String>, dependency: impl Into<String>) -> Self {
        ConfigurationError::UnknownDependency {
            namespace: namespace.into(),
            dependency: dependency.into(),
        }
    }

    pub fn case_only_difference(first: impl Into<String>, second: impl Into<String>) -> Self {
        ConfigurationError::CaseOnlyDifference {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn core_depends_on_extension(
        namespace: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        ConfigurationError::CoreDependsOnExtension {
            namespace: namespace.into(),
            dependency: dependency.into(),
        }
    }
}

/// Result type for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigurationError>;
