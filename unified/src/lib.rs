//! MetaEd Unified Plugin
//!
//! The standard namespace-aware checks every run needs:
//! - Reference, base-entity and namespace validators
//! - Enhancers caching resolved references and base entities
//! - A deterministic model summary generator

mod enhancer;
mod generator;
mod validator;

pub use enhancer::*;
pub use generator::*;
pub use validator::*;

use metaed_pipeline::MetaEdPlugin;
use metaed_model::ReferenceType;

/// Short name of this plugin.
pub const SHORT_NAME: &str = "edfiUnified";

/// The unified plugin with all of its passes.
pub fn initialize() -> MetaEdPlugin {
    let mut plugin = MetaEdPlugin::new(SHORT_NAME);
    for reference_type in ReferenceType::ALL {
        plugin = plugin.validator(
            reference_validator_name(reference_type),
            move |env| property_must_match_entity(env, reference_type),
        );
    }
    plugin
        .validator(
            CANNOT_DUPLICATE_NAMES_IN_DEPENDENCY_NAMESPACE,
            cannot_duplicate_names_in_dependency_namespace,
        )
        .validator(MOST_ENTITIES_CANNOT_HAVE_SAME_NAME, most_entities_cannot_have_same_name)
        .validator(
            PROPERTIES_MUST_REFER_TO_VALID_NAMESPACE,
            properties_must_refer_to_valid_namespace,
        )
        .validator(
            MERGE_DIRECTIVE_MUST_START_SOURCE_PATH_WITH_PROPERTY_NAME,
            merge_directive_must_start_source_path_with_property_name,
        )
        .validator(
            EXTENSION_AND_SUBCLASS_BASE_MUST_EXIST,
            extension_and_subclass_base_must_exist,
        )
        .validator(
            NAMESPACE_DEPENDENCIES_MUST_NOT_BE_CYCLIC,
            namespace_dependencies_must_not_be_cyclic,
        )
        .validator(
            NAMESPACE_NAMES_MUST_NOT_HAVE_ONLY_DIFFERENT_CASING,
            namespace_names_must_not_have_only_different_casing,
        )
        .enhancer(REFERENCED_ENTITY_ENHANCER, referenced_entity_enhancer)
        .enhancer(BASE_ENTITY_ENHANCER, base_entity_enhancer)
        .generator(MODEL_SUMMARY_GENERATOR, model_summary_generator)
}
