//! Shared projects and declarations.

use metaed_builder::{DeclarationNode, NameNode, NamespaceNode, PropertyNode};
use metaed_model::{ModelType, PropertyType, ReferenceType, SimpleType};
use metaed_namespace::ProjectConfiguration;

/// The Ed-Fi core data standard project.
pub fn edfi_project() -> ProjectConfiguration {
    ProjectConfiguration::core("Ed-Fi", "3.2.0").namespace("EdFi")
}

/// A Sample extension of the core.
pub fn sample_project() -> ProjectConfiguration {
    ProjectConfiguration::extension("Sample", "Sample", "1.0.0").depends_on("EdFi")
}

/// A string property, part of identity.
pub fn identity_string(name: &str) -> PropertyNode {
    PropertyNode::new(PropertyType::Simple(SimpleType::String), name).identity()
}

/// A required reference to an entity.
pub fn reference(reference_type: ReferenceType, name: &str) -> PropertyNode {
    PropertyNode::new(PropertyType::Reference(reference_type), name)
}

/// A small core model: School, Student and a StudentSchoolAssociation.
pub fn edfi_core() -> NamespaceNode {
    NamespaceNode::new("EdFi")
        .declare(
            DeclarationNode::new(ModelType::DomainEntity, "School")
                .documentation("An educational organization.")
                .property(identity_string("SchoolId")),
        )
        .declare(
            DeclarationNode::new(ModelType::DomainEntity, "Student")
                .documentation("A person enrolled in a school.")
                .property(identity_string("StudentUniqueId")),
        )
        .declare(
            DeclarationNode::new(ModelType::Association, "StudentSchoolAssociation")
                .property(reference(ReferenceType::DomainEntity, "Student").identity())
                .property(reference(ReferenceType::DomainEntity, "School").identity()),
        )
}

/// An extension entity referring to core entities without qualification.
pub fn sample_applicant() -> NamespaceNode {
    NamespaceNode::new("Sample")
        .declare(
            DeclarationNode::new(ModelType::DomainEntity, "Applicant")
                .property(identity_string("ApplicantIdentifier"))
                .property(reference(ReferenceType::DomainEntity, "School")),
        )
        .declare(
            DeclarationNode::new(ModelType::DomainEntityExtension, "Student")
                .based_on(NameNode::qualified("EdFi", "Student"))
                .property(reference(ReferenceType::DomainEntity, "Applicant").role_name("Sibling")),
        )
}
