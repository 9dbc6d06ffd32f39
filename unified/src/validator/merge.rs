//! Merge directive rules.

use metaed_core::ValidationFailure;
use metaed_model::MetaEdEnvironment;
use metaed_resolver::source_path_starts_with_property;
use metaed_version::{version_satisfies, V3_OR_GREATER};

pub const MERGE_DIRECTIVE_MUST_START_SOURCE_PATH_WITH_PROPERTY_NAME: &str =
    "MergeDirectiveMustStartSourcePathWithPropertyName";

/// A merge directive's source path must begin with the property declaring it.
pub fn merge_directive_must_start_source_path_with_property_name(
    env: &MetaEdEnvironment,
) -> Vec<ValidationFailure> {
    if !version_satisfies(&env.data_standard_version, V3_OR_GREATER) {
        return Vec::new();
    }

    let graph = &env.graph;
    let mut failures = Vec::new();
    for property in graph.properties() {
        let Some(reference) = property.reference() else { continue };
        for directive in &reference.merge_directives {
            if source_path_starts_with_property(directive, property) {
                continue;
            }
            let file_map = graph
                .entity(property.parent_entity())
                .and_then(|entity| entity.file_map.clone());
            failures.push(
                ValidationFailure::error(
                    MERGE_DIRECTIVE_MUST_START_SOURCE_PATH_WITH_PROPERTY_NAME,
                    format!(
                        "Merge directive must start first property path with the referencing property name. Property name: {}, first property path element: {}",
                        property.full_property_name,
                        directive
                            .source_property_path_strings
                            .first()
                            .map(String::as_str)
                            .unwrap_or("")
                    ),
                )
                .with_source(directive.source_map.as_ref())
                .with_file(file_map),
            );
        }
    }
    failures
}
