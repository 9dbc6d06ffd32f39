//! Side data, enhancement, snapshots and name resolution over built models.

use metaed_builder::walk_builders;
use metaed_model::{BuildError, EntityKind, GraphSnapshot, PluginKey, SideTable};
use metaed_namespace::initialize_namespaces;
use metaed_pipeline::{run_enhancers, run_generators, run_validators, Pipeline, Stage};
use metaed_resolver::resolve;
use metaed_tests::prelude::*;
use metaed_version::parse_version;
use pretty_assertions::assert_eq;

fn built_environment(tree: ParseTree) -> MetaEdEnvironment {
    let mut env = MetaEdEnvironment::new(parse_version("3.2.0").unwrap());
    initialize_namespaces(&mut env.graph, &[edfi_project(), sample_project()]).unwrap();
    walk_builders(&mut env, &tree).unwrap();
    env
}

fn model() -> ParseTree {
    ParseTree::new().namespace(edfi_core()).namespace(sample_applicant())
}

mod side_data {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Humanized {
        names: SideTable<String>,
    }

    const HUMANIZER: PluginKey<Humanized> = PluginKey::new("humanizer");

    fn humanizer() -> MetaEdPlugin {
        MetaEdPlugin::new("humanizer")
            .enhancer("HumanizeNames", |env| {
                let mut state = Humanized::default();
                for entity in env.graph.entities() {
                    state.names.insert(entity.id, entity.meta_ed_name().to_lowercase());
                }
                match env.install_plugin_state(&HUMANIZER, state) {
                    Ok(_) => EnhancerResult::ok("HumanizeNames"),
                    Err(e) => EnhancerResult::failed("HumanizeNames", e.to_string()),
                }
            })
            .enhancer("CheckEveryEntityHumanized", |env| {
                let Ok(state) = env.plugin_state(&HUMANIZER) else {
                    return EnhancerResult::failed("CheckEveryEntityHumanized", "state missing");
                };
                if env.graph.entities().all(|entity| state.names.contains(entity.id)) {
                    EnhancerResult::ok("CheckEveryEntityHumanized")
                } else {
                    EnhancerResult::failed("CheckEveryEntityHumanized", "entity without a slot")
                }
            })
    }

    // ========== TEST: later_enhancer_sees_side_data ==========
    #[test]
    fn test_second_enhancer_never_sees_an_absent_slot() {
        // GIVEN a plugin whose first enhancer fills a slot for every entity
        let mut pipeline = Pipeline::new(
            MetaEdConfiguration::new(vec![edfi_project(), sample_project()]),
            vec![humanizer()],
        )
        .unwrap();
        pipeline.build(&model()).unwrap();
        pipeline.validate().unwrap();

        // WHEN enhancing
        pipeline.enhance().unwrap();

        // THEN both enhancers succeed and the data is readable by key
        let env = pipeline.environment();
        assert!(env.enhancer_results.iter().all(|result| result.success));
        let state = env.plugin_state(&HUMANIZER).unwrap();
        assert_eq!(state.names.len(), env.graph.entity_count());
        assert_eq!(pipeline.stage(), Stage::Enhanced);
    }

    // ========== TEST: graph_sealed_after_build ==========
    #[test]
    fn test_adding_an_entity_after_build_is_rejected() {
        let mut env = built_environment(model());
        let edfi = env.graph.namespace_by_name("EdFi").map(|ns| ns.id).unwrap();

        let result = env.graph.add_entity(edfi, "Staff", EntityKind::Common).done();

        assert_eq!(result, Err(BuildError::GraphSealed));
    }
}

mod enhancement {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: enhance_twice ==========
    #[test]
    fn test_running_enhancers_twice_changes_nothing() {
        // GIVEN a built and enhanced model
        let plugins = vec![metaed_plugin_unified::initialize()];
        let mut env = built_environment(model());
        assert_eq!(run_enhancers(&mut env, &plugins), 0);
        let once = env.graph.clone();

        // WHEN enhancing again
        assert_eq!(run_enhancers(&mut env, &plugins), 0);

        // THEN the graph is unchanged
        assert_eq!(env.graph, once);
    }

    #[test]
    fn test_validation_after_enhancement_finds_nothing_new() {
        let plugins = vec![metaed_plugin_unified::initialize()];
        let mut env = built_environment(model());
        run_enhancers(&mut env, &plugins);
        assert_eq!(run_validators(&mut env, &plugins), 0);
    }
}

mod snapshot {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: snapshot_round_trip ==========
    #[test]
    fn test_reloaded_snapshot_generates_identical_output() {
        // GIVEN an enhanced model and its generated output
        let plugins = vec![metaed_plugin_unified::initialize()];
        let mut env = built_environment(model());
        run_enhancers(&mut env, &plugins);
        let original = run_generators(&mut env, &plugins);

        // WHEN saving and reloading the graph
        let json = GraphSnapshot::capture(&env).to_json().unwrap();
        let mut reloaded = GraphSnapshot::from_json(&json).unwrap().into_environment();

        // THEN generators produce byte-identical output
        let regenerated = run_generators(&mut reloaded, &plugins);
        assert!(!original.is_empty());
        assert_eq!(original, regenerated);
        assert_eq!(
            reloaded.graph.property_index().len(),
            env.graph.property_index().len()
        );
    }
}

mod resolution {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========== TEST: resolution_locality ==========
    #[test]
    fn test_local_declaration_shadows_dependency() {
        // GIVEN School declared in both EdFi and Sample
        let tree = ParseTree::new().namespace(edfi_core()).namespace(
            NamespaceNode::new("Sample").declare(
                DeclarationNode::new(ModelType::DomainEntity, "School")
                    .property(identity_string("SchoolId")),
            ),
        );
        let env = built_environment(tree);
        let edfi = env.graph.namespace_by_name("EdFi").unwrap();
        let sample = env.graph.namespace_by_name("Sample").unwrap();
        let kinds = ReferenceType::DomainEntity.referenced_model_types();

        // WHEN resolving from each namespace
        let from_sample = resolve(&env.graph, "School", "", sample.id, kinds);
        let qualified = resolve(&env.graph, "School", "EdFi", sample.id, kinds);
        let from_edfi = resolve(&env.graph, "School", "", edfi.id, kinds);

        // THEN the nearest declaration wins unless qualified
        assert_eq!(from_sample, sample.entity(ModelType::DomainEntity, "School"));
        assert_eq!(qualified, edfi.entity(ModelType::DomainEntity, "School"));
        assert_eq!(from_edfi, qualified);
        assert_ne!(from_sample, from_edfi);
    }

    #[test]
    fn test_core_never_sees_extension_entities() {
        let env = built_environment(model());
        let edfi = env.graph.namespace_by_name("EdFi").unwrap();
        let found = resolve(
            &env.graph,
            "Applicant",
            "",
            edfi.id,
            ReferenceType::DomainEntity.referenced_model_types(),
        );
        assert_eq!(found, None);
    }
}
