//! Pipeline error types.

use crate::Stage;
use metaed_builder::WalkError;
use metaed_model::BuildError;
use metaed_namespace::ConfigurationError;
use metaed_version::VersionError;
use thiserror::Error;

/// Errors that stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Project configuration was rejected before building.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Symbol building failed for at least one namespace.
    #[error("build error: {0}")]
    Build(#[from] WalkError),

    /// Graph setup failed.
    #[error("graph error: {0}")]
    Graph(#[from] BuildError),

    /// A configured version could not be parsed.
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    /// Configuration JSON could not be read.
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stages must run in order, each exactly once.
    #[error("invalid stage transition: {from} -> {to}")]
    InvalidStageTransition { from: Stage, to: Stage },

    /// A plugin depends on a short name nobody registered.
    #[error("plugin '{plugin}' depends on unknown plugin '{dependency}'")]
    UnknownPluginDependency { plugin: String, dependency: String },

    /// Plugin dependencies loop.
    #[error("plugin dependency cycle among: {}", .0.join(", "))]
    PluginDependencyCycle(Vec<String>),

    /// Two plugins registered the same short name.
    #[error("duplicate plugin short name: {0}")]
    DuplicatePluginShortName(String),
}

impl PipelineError {
    pub fn invalid_stage_transition(from: Stage, to: Stage) -> Self {
        Self::InvalidStageTransition { from, to }
    }

    pub fn unknown_plugin_dependency(
        plugin: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        Self::UnknownPluginDependency {
            plugin: plugin.into(),
            dependency: dependency.into(),
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
