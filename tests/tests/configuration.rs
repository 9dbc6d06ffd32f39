//! Plugin configuration rules applied during the run.

use metaed_pipeline::{ConfigMatch, ConfigRule, Pipeline};
use metaed_tests::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn configuration() -> MetaEdConfiguration {
    MetaEdConfiguration::new(vec![edfi_project(), sample_project()])
        .plugin_version("edfiUnified", "7.1.0")
        .rule(
            "edfiUnified",
            ConfigRule::new("odsExtension", json!({ "tableName": { "prefix": "edfi" } }))
                .matching(ConfigMatch::entity(ModelType::DomainEntity).core()),
        )
        .rule(
            "edfiUnified",
            ConfigRule::new("odsExtension", json!({ "tableName": { "suffix": "Core" } }))
                .matching(
                    ConfigMatch::entity(ModelType::DomainEntity)
                        .in_namespace("EdFi")
                        .named("School"),
                ),
        )
        .rule("edfiUnified", ConfigRule::new("global", json!({ "strict": true })))
}

// ========== TEST: rules_annotate_entities ==========
#[test]
fn test_matching_rules_merge_into_entity_config() {
    init_tracing();

    // GIVEN two rules matching EdFi.School
    let plugins = vec![metaed_plugin_unified::initialize()];
    let mut pipeline = Pipeline::new(configuration(), plugins).unwrap();

    // WHEN building
    pipeline.build(&ParseTree::new().namespace(edfi_core()).namespace(sample_applicant())).unwrap();

    // THEN the data is deep-merged per entity and plugin-wide data is separate
    let env = pipeline.environment();
    let plugin = env.plugin_environment("edfiUnified").unwrap();
    let school = env
        .graph
        .namespace_by_name("EdFi")
        .and_then(|ns| ns.entity(ModelType::DomainEntity, "School"))
        .unwrap();
    assert_eq!(
        plugin.entity_config[&school],
        json!({ "tableName": { "prefix": "edfi", "suffix": "Core" } })
    );
    assert_eq!(plugin.config, json!({ "strict": true }));
    assert_eq!(plugin.target_technology_version.to_string(), "7.1.0");

    // AND extension entities were not matched
    let applicant = env
        .graph
        .namespace_by_name("Sample")
        .and_then(|ns| ns.entity(ModelType::DomainEntity, "Applicant"))
        .unwrap();
    assert!(!plugin.entity_config.contains_key(&applicant));
}

// ========== TEST: unknown_namespace_in_rule ==========
#[test]
fn test_rule_naming_missing_namespace_is_reported() {
    let report = Scenario::new("rule_missing_namespace")
        .project(edfi_project())
        .declare(edfi_core())
        .rule(
            "edfiUnified",
            ConfigRule::new("odsExtension", json!({}))
                .matching(ConfigMatch::entity(ModelType::DomainEntity).in_namespace("Nowhere")),
        )
        .expect(|e| e.errors(1).from_validator("AnnotateModelWithConfiguration", 1))
        .run()
        .unwrap();
    assert_eq!(report.exit_code(), 1);
}

// ========== TEST: configuration_from_json ==========
#[test]
fn test_configuration_reads_from_json() {
    let configuration = MetaEdConfiguration::from_json(
        r#"{
            "projects": [
                { "projectName": "Ed-Fi", "namespaceName": "EdFi", "projectVersion": "3.2.0" },
                {
                    "projectName": "Sample",
                    "projectExtension": "Sample",
                    "projectVersion": "1.0.0",
                    "isExtension": true
                }
            ],
            "pluginTechVersion": { "edfiUnified": "7.1.0" }
        }"#,
    )
    .unwrap();

    let report = metaed_pipeline::execute_pipeline(
        configuration,
        vec![metaed_plugin_unified::initialize()],
        &ParseTree::new().namespace(edfi_core()).namespace(sample_applicant()),
    )
    .unwrap();
    assert_eq!(report.exit_code(), 0);
}
