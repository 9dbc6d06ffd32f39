//! Unified plugin validators run through the whole pipeline.

use metaed_plugin_unified::{
    reference_validator_name, CANNOT_DUPLICATE_NAMES_IN_DEPENDENCY_NAMESPACE,
    MERGE_DIRECTIVE_MUST_START_SOURCE_PATH_WITH_PROPERTY_NAME,
    PROPERTIES_MUST_REFER_TO_VALID_NAMESPACE,
};
use metaed_tests::prelude::*;

mod clean_model {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("clean_model")
            .project(edfi_project())
            .project(sample_project())
            .declare(edfi_core())
            .declare(sample_applicant())
            .expect(|e| {
                e.clean()
                    .exit_code(0)
                    .failed_enhancers(0)
                    .output_file("Sample-Summary.txt")
            })
    }

    #[test]
    fn test_core_and_extension_model_validates_cleanly() {
        scenario().run().unwrap();
    }
}

mod duplicate_in_dependency {
    use super::*;

    fn student_id() -> DeclarationNode {
        DeclarationNode::new(ModelType::DomainEntity, "StudentId")
            .property(identity_string("Value"))
    }

    pub fn scenario() -> Scenario {
        Scenario::new("duplicate_in_dependency")
            .project(edfi_project())
            .project(sample_project())
            .declare(NamespaceNode::new("EdFi").declare(student_id()))
            .declare(NamespaceNode::new("Sample").declare(student_id()))
            .expect(|e| {
                e.errors(1)
                    .exit_code(1)
                    .from_validator(CANNOT_DUPLICATE_NAMES_IN_DEPENDENCY_NAMESPACE, 1)
                    .message_matching(r"StudentId in namespace Sample .* dependency namespace EdFi")
            })
    }

    #[test]
    fn test_redeclaring_core_entity_in_extension_is_one_error() {
        scenario().run().unwrap();
    }
}

mod missing_association {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("missing_association")
            .project(edfi_project())
            .project(sample_project())
            .declare(edfi_core())
            .declare(
                NamespaceNode::new("Sample").declare(
                    DeclarationNode::new(ModelType::DomainEntity, "Applicant")
                        .property(identity_string("ApplicantIdentifier"))
                        .property(
                            reference(ReferenceType::Association, "Foo").in_namespace("EdFi"),
                        ),
                ),
            )
            .expect(|e| {
                e.errors(1)
                    .from_validator(&reference_validator_name(ReferenceType::Association), 1)
                    .message_containing("Foo")
                    .message_containing("EdFi")
            })
    }

    #[test]
    fn test_unresolved_qualified_association_is_reported() {
        scenario().run().unwrap();
    }
}

mod core_refers_to_extension {
    use super::*;

    #[test]
    fn test_core_reference_into_extension_namespace_is_invalid() {
        // GIVEN EdFi naming an entity in Sample, which it does not depend on
        let scenario = Scenario::new("core_refers_to_extension")
            .project(edfi_project())
            .project(sample_project())
            .declare(
                NamespaceNode::new("EdFi").declare(
                    DeclarationNode::new(ModelType::DomainEntity, "School")
                        .property(identity_string("SchoolId"))
                        .property(
                            reference(ReferenceType::DomainEntity, "Applicant")
                                .in_namespace("Sample"),
                        ),
                ),
            )
            .declare(
                NamespaceNode::new("Sample").declare(
                    DeclarationNode::new(ModelType::DomainEntity, "Applicant")
                        .property(identity_string("ApplicantIdentifier")),
                ),
            )
            .expect(|e| e.from_validator(PROPERTIES_MUST_REFER_TO_VALID_NAMESPACE, 1));

        // THEN the namespace rule fires and so does the reference rule
        let report = scenario.run().unwrap();
        assert_eq!(report.error_count(), 2);
    }
}

mod merge_directive {
    use super::*;

    fn model() -> NamespaceNode {
        NamespaceNode::new("EdFi")
            .declare(
                DeclarationNode::new(ModelType::DomainEntity, "Session")
                    .property(identity_string("SessionName")),
            )
            .declare(
                DeclarationNode::new(ModelType::DomainEntity, "Section")
                    .property(identity_string("SectionIdentifier"))
                    .property(reference(ReferenceType::DomainEntity, "Session").identity()),
            )
            .declare(
                DeclarationNode::new(ModelType::Association, "StudentSectionAssociation")
                    .property(identity_string("BeginDate"))
                    .property(reference(ReferenceType::DomainEntity, "Section").identity())
                    .property(
                        reference(ReferenceType::DomainEntity, "Session")
                            .identity()
                            .merge("Session", "Section.Session"),
                    ),
            )
    }

    #[test]
    fn test_source_path_starting_with_property_name_passes() {
        Scenario::new("merge_directive")
            .project(edfi_project())
            .declare(model())
            .expect(|e| e.clean())
            .run()
            .unwrap();
    }

    #[test]
    fn test_wrong_first_segment_is_reported() {
        let model = NamespaceNode::new("EdFi")
            .declare(
                DeclarationNode::new(ModelType::DomainEntity, "Session")
                    .property(identity_string("SessionName")),
            )
            .declare(
                DeclarationNode::new(ModelType::Association, "StudentSessionAssociation")
                    .property(identity_string("BeginDate"))
                    .property(
                        reference(ReferenceType::DomainEntity, "Session")
                            .merge("Term.Session", "Session"),
                    ),
            );

        Scenario::new("merge_directive_wrong_segment")
            .project(edfi_project())
            .declare(model.clone())
            .expect(|e| {
                e.errors(1)
                    .from_validator(MERGE_DIRECTIVE_MUST_START_SOURCE_PATH_WITH_PROPERTY_NAME, 1)
                    .message_containing("first property path element: Term")
            })
            .run()
            .unwrap();

        // AND the rule does not apply before data standard 3.0
        Scenario::new("merge_directive_v2")
            .project(edfi_project())
            .data_standard("2.2.0")
            .declare(model)
            .expect(|e| e.clean())
            .run()
            .unwrap();
    }
}

mod configuration_errors {
    use super::*;
    use metaed_pipeline::PipelineError;

    #[test]
    fn test_case_only_namespace_names_stop_the_run() {
        let result = Scenario::new("case_only_names")
            .project(edfi_project())
            .project(ProjectConfiguration::extension("EDFI", "Ext", "1.0.0").namespace("EDFI"))
            .execute();
        assert!(matches!(
            result,
            Err(ScenarioError::Pipeline { source: PipelineError::Configuration(_), .. })
        ));
    }

    #[test]
    fn test_duplicate_declaration_is_a_build_error() {
        let result = Scenario::new("duplicate_declaration")
            .project(edfi_project())
            .declare(
                NamespaceNode::new("EdFi")
                    .declare(DeclarationNode::new(ModelType::Common, "Address"))
                    .declare(DeclarationNode::new(ModelType::Common, "Address")),
            )
            .execute();
        assert!(matches!(
            result,
            Err(ScenarioError::Pipeline { source: PipelineError::Build(_), .. })
        ));
    }
}

mod determinism {
    use super::*;

    fn messy() -> Scenario {
        Scenario::new("determinism")
            .project(edfi_project())
            .project(sample_project())
            .declare(edfi_core())
            .declare(
                NamespaceNode::new("Sample")
                    .declare(
                        DeclarationNode::new(ModelType::DomainEntity, "School")
                            .property(identity_string("SchoolId")),
                    )
                    .declare(
                        DeclarationNode::new(ModelType::DomainEntity, "Applicant")
                            .property(identity_string("ApplicantIdentifier"))
                            .property(
                                reference(ReferenceType::Association, "Foo").in_namespace("EdFi"),
                            )
                            .property(reference(ReferenceType::Descriptor, "Gender"))
                            .property(reference(ReferenceType::Common, "Address")),
                    ),
            )
    }

    #[test]
    fn test_validation_output_is_identical_across_runs() {
        // GIVEN a model with several independent failures
        let render = |report: RunReport| -> Vec<String> {
            report.validation_failures.all().iter().map(ToString::to_string).collect()
        };

        // WHEN running it twice
        let first = render(messy().execute().unwrap());
        let second = render(messy().execute().unwrap());

        // THEN the failures match in content and order
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }
}
