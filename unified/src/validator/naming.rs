//! Entity and namespace naming rules.

use super::entity_failure;
use metaed_core::ValidationFailure;
use metaed_model::{MetaEdEnvironment, ModelType};
use std::collections::BTreeMap;

pub const CANNOT_DUPLICATE_NAMES_IN_DEPENDENCY_NAMESPACE: &str =
    "CannotDuplicateNamesInDependencyNamespace";
pub const MOST_ENTITIES_CANNOT_HAVE_SAME_NAME: &str = "MostEntitiesCannotHaveSameName";
pub const NAMESPACE_NAMES_MUST_NOT_HAVE_ONLY_DIFFERENT_CASING: &str =
    "NamespacesNamesMustNotHaveOnlyDifferentCasing";

/// Kinds that share one name space within a namespace.
const SAME_NAME_KINDS: [ModelType; 8] = [
    ModelType::Association,
    ModelType::AssociationSubclass,
    ModelType::Choice,
    ModelType::Common,
    ModelType::CommonSubclass,
    ModelType::DomainEntity,
    ModelType::DomainEntitySubclass,
    ModelType::InlineCommon,
];

/// An extension namespace may not redeclare a name of the same kind from a dependency.
///
/// Extension kinds are exempt: extending by name is their purpose. Each
/// offending entity is reported once, citing the first dependency declaring it.
pub fn cannot_duplicate_names_in_dependency_namespace(
    env: &MetaEdEnvironment,
) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    let mut failures = Vec::new();

    for namespace in graph.namespaces().filter(|ns| ns.is_extension()) {
        for id in namespace.all_entities() {
            let Some(entity) = graph.entity(id) else { continue };
            let model_type = entity.model_type();
            if model_type.is_extension() {
                continue;
            }
            let clash = namespace
                .dependencies()
                .iter()
                .filter_map(|dependency| graph.namespace(*dependency))
                .find(|dependency| dependency.entity(model_type, entity.meta_ed_name()).is_some());
            if let Some(dependency) = clash {
                failures.push(entity_failure(
                    CANNOT_DUPLICATE_NAMES_IN_DEPENDENCY_NAMESPACE,
                    entity,
                    format!(
                        "{} named {} in namespace {} is a duplicate declaration of that name in dependency namespace {}.",
                        model_type.display_name(),
                        entity.meta_ed_name(),
                        namespace.name(),
                        dependency.name()
                    ),
                ));
            }
        }
    }
    failures
}

/// Within a namespace, associations, commons, choices and domain entities may not share names.
pub fn most_entities_cannot_have_same_name(env: &MetaEdEnvironment) -> Vec<ValidationFailure> {
    let graph = &env.graph;
    let mut failures = Vec::new();

    for namespace in graph.namespaces() {
        let mut by_name: BTreeMap<&str, Vec<ModelType>> = BTreeMap::new();
        for kind in SAME_NAME_KINDS {
            for id in namespace.entities_of(kind) {
                if let Some(entity) = graph.entity(*id) {
                    by_name.entry(entity.meta_ed_name()).or_default().push(kind);
                }
            }
        }

        for (name, kinds) in by_name.into_iter().filter(|(_, kinds)| kinds.len() > 1) {
            for kind in &kinds {
                let found = namespace.entity(*kind, name).and_then(|id| graph.entity(id));
                let Some(entity) = found else {
                    continue;
                };
                let others: Vec<&str> = kinds
                    .iter()
                    .filter(|other| *other != kind)
                    .map(|other| other.display_name())
                    .collect();
                failures.push(entity_failure(
                    MOST_ENTITIES_CANNOT_HAVE_SAME_NAME,
                    entity,
                    format!(
                        "{} named {} has the same name as a {} in namespace {}. Most entities may not share a name.",
                        kind.display_name(),
                        name,
                        others.join(", "),
                        namespace.name()
                    ),
                ));
            }
        }
    }
    failures
}

/// Namespace names may not differ only by letter case.
pub fn namespace_names_must_not_have_only_different_casing(
    env: &MetaEdEnvironment,
) -> Vec<ValidationFailure> {
    let namespaces: Vec<_> = env.graph.namespaces().collect();
    let mut failures = Vec::new();
    for (index, first) in namespaces.iter().enumerate() {
        for second in &namespaces[index + 1..] {
            if first.name() != second.name() && first.name().eq_ignore_ascii_case(second.name()) {
                failures.push(ValidationFailure::error(
                    NAMESPACE_NAMES_MUST_NOT_HAVE_ONLY_DIFFERENT_CASING,
                    format!(
                        "Namespace names {} and {} differ only by letter case.",
                        first.name(),
                        second.name()
                    ),
                ));
            }
        }
    }
    failures
}
