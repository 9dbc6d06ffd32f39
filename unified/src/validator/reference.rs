//! Referential properties must name a declared entity.

use super::property_failure;
use metaed_core::ValidationFailure;
use metaed_model::{MetaEdEnvironment, PropertyType, ReferenceType};
use metaed_resolver::resolve_reference;

/// Validator name for one referential kind, e.g. `DomainEntityPropertyMustMatchADomainEntity`.
pub fn reference_validator_name(reference_type: ReferenceType) -> String {
    let kind: String = reference_type
        .target_model_type()
        .display_name()
        .split_whitespace()
        .collect();
    let article = if kind.starts_with(['A', 'E', 'I', 'O', 'U']) { "An" } else { "A" };
    format!("{kind}PropertyMustMatch{article}{kind}")
}

/// Report every property of a kind whose referenced entity cannot be resolved.
pub fn property_must_match_entity(
    env: &MetaEdEnvironment,
    reference_type: ReferenceType,
) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    let validator = reference_validator_name(reference_type);
    let kind = reference_type.target_model_type().display_name();

    graph
        .property_index()
        .of_type(PropertyType::Reference(reference_type))
        .iter()
        .filter(|id| resolve_reference(graph, **id).is_none())
        .filter_map(|id| graph.property(*id))
        .filter_map(|property| {
            let reference = property.reference()?;
            Some(property_failure(
                &validator,
                graph,
                property,
                format!(
                    "{} property '{}' does not match any declared {} in namespace {}.",
                    kind, property.meta_ed_name, kind, reference.referenced_namespace_name
                ),
            ))
        })
        .collect()
}
