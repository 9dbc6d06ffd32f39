//! Errors raised while populating the entity graph or its side data.

use crate::ModelType;
use metaed_core::{EntityId, NamespaceId, SourceMap};
use thiserror::Error;

/// Errors that can occur while building the entity graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(
        "{} named {name} is a duplicate declaration of that name in namespace {namespace}",
        .model_type.display_name()
    )]
    DuplicateEntity {
        model_type: ModelType,
        name: String,
        namespace: String,
        source_map: Option<SourceMap>,
    },

    #[error("Namespace {0} is declared more than once")]
    DuplicateNamespace(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("Namespace not found: {0}")]
    NamespaceNotFound(NamespaceId),

    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Namespace dependencies are fixed once entities have been built")]
    DependenciesFrozen,

    #[error("The entity graph is sealed; no entities may be added after building")]
    GraphSealed,
}

impl BuildError {
    pub fn duplicate_entity(
        model_type: ModelType,
        name: impl Into<String>,
        namespace: impl Into<String>,
        source_map: Option<&SourceMap>,
    ) -> Self {
        BuildError::DuplicateEntity {
            model_type,
            name: name.into(),
            namespace: namespace.into(),
            source_map: source_map.cloned(),
        }
    }

    pub fn unknown_namespace(name: impl Into<String>) -> Self {
        BuildError::UnknownNamespace(name.into())
    }
}

/// Result type for graph building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur when a plugin touches its side data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SideDataError {
    #[error("Plugin state for {0} is already installed")]
    AlreadyInstalled(String),

    #[error("Plugin state for {0} has not been installed")]
    NotInstalled(String),

    #[error("Plugin state for {short_name} is not a {expected}")]
    TypeMismatch {
        short_name: String,
        expected: &'static str,
    },
}

/// Result type for side-data access.
pub type SideDataResult<T> = Result<T, SideDataError>;
