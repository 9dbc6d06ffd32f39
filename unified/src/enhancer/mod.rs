//! Enhancers caching resolution results on the graph.

use metaed_core::{EntityId, EnhancerResult, PropertyId};
use metaed_model::MetaEdEnvironment;
use metaed_resolver::{resolve_base, resolve_reference};
use tracing::debug;

pub const REFERENCED_ENTITY_ENHANCER: &str = "ReferencedEntityEnhancer";
pub const BASE_ENTITY_ENHANCER: &str = "BaseEntityEnhancer";

/// Cache the resolved target of every referential property.
///
/// Unresolvable references are left empty; the reference validators report them.
pub fn referenced_entity_enhancer(env: &mut MetaEdEnvironment) -> EnhancerResult {
    let resolved: Vec<(PropertyId, Option<EntityId>)> = env
        .graph
        .properties()
        .filter(|property| property.reference().is_some())
        .map(|property| (property.id, resolve_reference(&env.graph, property.id)))
        .collect();

    let mut unresolved = 0;
    for (id, target) in resolved {
        if target.is_none() {
            unresolved += 1;
        }
        if let Some(reference) = env.graph.property_mut(id).and_then(|p| p.reference_mut()) {
            reference.referenced_entity = target;
        }
    }
    debug!(unresolved, "cached referenced entities");
    EnhancerResult::ok(REFERENCED_ENTITY_ENHANCER)
}

/// Cache the resolved base entity of every extension and subclass.
pub fn base_entity_enhancer(env: &mut MetaEdEnvironment) -> EnhancerResult {
    let resolved: Vec<(EntityId, Option<EntityId>)> = env
        .graph
        .entities()
        .filter(|entity| entity.base().is_some())
        .map(|entity| (entity.id, resolve_base(&env.graph, entity.id)))
        .collect();

    for (id, target) in resolved {
        if let Err(err) = env.graph.set_base_entity(id, target) {
            return EnhancerResult::failed(BASE_ENTITY_ENHANCER, err.to_string());
        }
    }
    EnhancerResult::ok(BASE_ENTITY_ENHANCER)
}
