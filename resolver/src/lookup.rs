//! Entity lookup by name across a namespace and its dependencies.

use metaed_core::{EntityId, NamespaceId, PropertyId};
use metaed_model::{EntityGraph, ModelType, Namespace};
use tracing::trace;

/// Find an entity by name, searching outward from a namespace.
///
/// With no namespace qualifier, or one naming `from` itself, `from` is searched
/// first and then each dependency in order. A qualifier naming another
/// namespace restricts the search to the dependency of that name. At each
/// namespace every kind is tried in order before moving on.
pub fn resolve(
    graph: &EntityGraph,
    name: &str,
    explicit_namespace_name: &str,
    from: NamespaceId,
    kinds: &[ModelType],
) -> Option<EntityId> {
    let origin = graph.namespace(from)?;
    let unqualified =
        explicit_namespace_name.is_empty() || explicit_namespace_name == origin.name();

    if unqualified {
        if let Some(id) = find_in(origin, name, kinds) {
            return Some(id);
        }
    }

    let found = origin
        .dependencies()
        .iter()
        .filter_map(|id| graph.namespace(*id))
        .filter(|ns| unqualified || ns.name() == explicit_namespace_name)
        .find_map(|ns| find_in(ns, name, kinds));

    if found.is_none() {
        trace!(
            entity = name,
            namespace = explicit_namespace_name,
            from = %origin.name(),
            "no match"
        );
    }
    found
}

fn find_in(namespace: &Namespace, name: &str, kinds: &[ModelType]) -> Option<EntityId> {
    kinds.iter().find_map(|kind| namespace.entity(*kind, name))
}

/// Resolve the entity a referential property names.
///
/// Simple properties and unknown ids resolve to nothing.
pub fn resolve_reference(graph: &EntityGraph, property: PropertyId) -> Option<EntityId> {
    let property = graph.property(property)?;
    let reference = property.reference()?;
    let kinds = property.reference_type()?.referenced_model_types();
    resolve(
        graph,
        &reference.referenced_type,
        &reference.referenced_namespace_name,
        property.namespace(),
        kinds,
    )
}

/// Resolve the base entity of an extension or subclass.
pub fn resolve_base(graph: &EntityGraph, entity: EntityId) -> Option<EntityId> {
    let entity = graph.entity(entity)?;
    let base = entity.base()?;
    resolve(
        graph,
        &base.name,
        &base.namespace_name,
        entity.namespace(),
        entity.model_type().base_model_types(),
    )
}

/// Every entity of the given kinds, namespace by namespace in dependency order.
pub fn all_entities_of_kinds(graph: &EntityGraph, kinds: &[ModelType]) -> Vec<EntityId> {
    graph
        .namespaces()
        .flat_map(|ns| kinds.iter().flat_map(move |kind| ns.entities_of(*kind).iter().copied()))
        .collect()
}

/// Entities of the given kinds declared in the given namespaces, in the order given.
pub fn entities_in_namespaces(
    graph: &EntityGraph,
    namespaces: &[NamespaceId],
    kinds: &[ModelType],
) -> Vec<EntityId> {
    namespaces
        .iter()
        .filter_map(|id| graph.namespace(*id))
        .flat_map(|ns| kinds.iter().flat_map(move |kind| ns.entities_of(*kind).iter().copied()))
        .collect()
}
