//! Namespace reference and dependency rules.

use super::property_failure;
use metaed_core::{SourceField, ValidationFailure};
use metaed_model::MetaEdEnvironment;

pub const PROPERTIES_MUST_REFER_TO_VALID_NAMESPACE: &str = "PropertiesMustReferToValidNamespace";
pub const NAMESPACE_DEPENDENCIES_MUST_NOT_BE_CYCLIC: &str = "NamespaceDependenciesMustNotBeCyclic";

/// A referential property may only name its own namespace or one of its dependencies.
pub fn properties_must_refer_to_valid_namespace(env: &MetaEdEnvironment) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    graph
        .properties()
        .filter_map(|property| {
            let reference = property.reference()?;
            let namespace = graph.namespace(property.namespace())?;
            let target = reference.referenced_namespace_name.as_str();
            let visible = target == namespace.name()
                || namespace
                    .dependencies()
                    .iter()
                    .any(|dependency| graph.namespace_name(*dependency) == target);
            if visible {
                return None;
            }
            let failure = property_failure(
                PROPERTIES_MUST_REFER_TO_VALID_NAMESPACE,
                graph,
                property,
                format!(
                    "Property '{}' refers to namespace {}, which is neither {} nor one of its dependencies.",
                    property.meta_ed_name,
                    target,
                    namespace.name()
                ),
            );
            Some(match property.source_map.get(SourceField::ReferencedNamespaceName) {
                Some(location) => failure.with_source(Some(location)),
                None => failure,
            })
        })
        .collect()
}

/// Namespace dependencies may not loop back.
///
/// Dependency lists are transitively closed, so a loop shows up as two
/// namespaces listing each other. Each namespace on a loop is reported once.
pub fn namespace_dependencies_must_not_be_cyclic(
    env: &MetaEdEnvironment,
) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    graph
        .namespaces()
        .filter_map(|namespace| {
            let partner = namespace
                .dependencies()
                .iter()
                .filter_map(|dependency| graph.namespace(*dependency))
                .find(|dependency| dependency.dependencies().contains(&namespace.id))?;
            Some(ValidationFailure::error(
                NAMESPACE_DEPENDENCIES_MUST_NOT_BE_CYCLIC,
                format!(
                    "Namespace {} has a cyclic dependency with namespace {}.",
                    namespace.name(),
                    partner.name()
                ),
            ))
        })
        .collect()
}
