//! Namespace-aware validators.

mod base;
mod merge;
mod namespace;
mod naming;
mod reference;

pub use base::*;
pub use merge::*;
pub use namespace::*;
pub use naming::*;
pub use reference::*;

use metaed_core::{SourceField, ValidationFailure};
use metaed_model::{Entity, EntityGraph, Property};

/// An error located at an entity's name.
pub(crate) fn entity_failure(
    validator: &str,
    entity: &Entity,
    message: String,
) -> ValidationFailure {
    ValidationFailure::error(validator, message)
        .with_source(entity.source_map.primary())
        .with_file(entity.file_map.clone())
}

/// An error located at a property's name, in its entity's file.
pub(crate) fn property_failure(
    validator: &str,
    graph: &EntityGraph,
    property: &Property,
    message: String,
) -> ValidationFailure {
    let file_map = graph
        .entity(property.parent_entity())
        .and_then(|entity| entity.file_map.clone());
    ValidationFailure::error(validator, message)
        .with_source(
            property
                .source_map
                .get(SourceField::MetaEdName)
                .or_else(|| property.source_map.primary()),
        )
        .with_file(file_map)
}
