//! Extensions and subclasses need a base.

use super::entity_failure;
use metaed_core::{SourceField, ValidationFailure};
use metaed_model::MetaEdEnvironment;
use metaed_resolver::resolve_base;

pub const EXTENSION_AND_SUBCLASS_BASE_MUST_EXIST: &str = "ExtensionAndSubclassBaseMustExist";

/// Every extension and subclass must name a resolvable base entity.
pub fn extension_and_subclass_base_must_exist(env: &MetaEdEnvironment) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    graph
        .entities()
        .filter_map(|entity| {
            let base = entity.base()?;
            if resolve_base(graph, entity.id).is_some() {
                return None;
            }
            let failure = entity_failure(
                EXTENSION_AND_SUBCLASS_BASE_MUST_EXIST,
                entity,
                format!(
                    "{} named {} refers to base entity {} in namespace {}, which does not exist.",
                    entity.model_type().display_name(),
                    entity.meta_ed_name(),
                    base.name,
                    base.namespace_name
                ),
            );
            Some(match entity.source_map.get(SourceField::BaseEntityName) {
                Some(location) => failure.with_source(Some(location)),
                None => failure,
            })
        })
        .collect()
}
