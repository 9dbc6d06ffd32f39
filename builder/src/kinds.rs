//! Per-kind declaration builders.

use crate::{DeclarationNode, NameNode};
use metaed_model::{
    DescriptorData, DomainData, EntityKind, EnumerationItem, InterchangeData, ModelType,
    NamedRef, TopLevelFlags,
};

/// Turns declarations of some entity kinds into entity payloads.
///
/// The shared part of building (names, provenance, properties, duplicate
/// detection) is done by the walker; a builder only supplies the payload.
pub trait DeclarationBuilder: Send + Sync {
    /// Name reported in build diagnostics.
    fn name(&self) -> &'static str;

    /// Entity kinds this builder accepts.
    fn handles(&self) -> &'static [ModelType];

    /// Build the kind-specific payload for a declaration.
    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind;
}

/// The standard builders, one per family of entity kinds.
pub fn default_builders() -> Vec<Box<dyn DeclarationBuilder>> {
    vec![
        Box::new(DomainEntityBuilder),
        Box::new(AssociationBuilder),
        Box::new(CommonBuilder),
        Box::new(DescriptorBuilder),
        Box::new(EnumerationBuilder),
        Box::new(SharedSimpleBuilder),
        Box::new(DomainBuilder),
        Box::new(InterchangeBuilder),
    ]
}

fn named_ref(node: &NameNode, namespace_name: &str) -> NamedRef {
    let namespace = node
        .namespace
        .as_ref()
        .map(|token| token.text.as_str())
        .unwrap_or(namespace_name);
    NamedRef::new(node.name.text.clone(), namespace)
}

fn base_ref(node: &DeclarationNode, namespace_name: &str) -> NamedRef {
    node.base
        .as_ref()
        .map(|base| named_ref(base, namespace_name))
        .unwrap_or_else(|| NamedRef::new("", namespace_name))
}

fn flags(node: &DeclarationNode) -> TopLevelFlags {
    TopLevelFlags {
        is_abstract: node.is_abstract,
        allow_primary_key_updates: node.allow_primary_key_updates,
    }
}

fn items(node: &DeclarationNode) -> Vec<EnumerationItem> {
    node.items
        .iter()
        .map(|item| EnumerationItem {
            short_description: item.short_description.clone(),
            documentation: item.documentation.clone(),
        })
        .collect()
}

fn members(members: &[NameNode], namespace_name: &str) -> Vec<NamedRef> {
    members
        .iter()
        .map(|member| named_ref(member, namespace_name))
        .collect()
}

/// Domain entities, their extensions and subclasses.
pub struct DomainEntityBuilder;

impl DeclarationBuilder for DomainEntityBuilder {
    fn name(&self) -> &'static str {
        "DomainEntityBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[
            ModelType::DomainEntity,
            ModelType::DomainEntityExtension,
            ModelType::DomainEntitySubclass,
        ]
    }

    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind {
        match node.kind {
            ModelType::DomainEntityExtension => EntityKind::DomainEntityExtension {
                base: base_ref(node, namespace_name),
            },
            ModelType::DomainEntitySubclass => EntityKind::DomainEntitySubclass {
                base: base_ref(node, namespace_name),
                flags: flags(node),
            },
            _ => EntityKind::DomainEntity(flags(node)),
        }
    }
}

/// Associations, their extensions and subclasses.
pub struct AssociationBuilder;

impl DeclarationBuilder for AssociationBuilder {
    fn name(&self) -> &'static str {
        "AssociationBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[
            ModelType::Association,
            ModelType::AssociationExtension,
            ModelType::AssociationSubclass,
        ]
    }

    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind {
        match node.kind {
            ModelType::AssociationExtension => EntityKind::AssociationExtension {
                base: base_ref(node, namespace_name),
            },
            ModelType::AssociationSubclass => EntityKind::AssociationSubclass {
                base: base_ref(node, namespace_name),
                flags: flags(node),
            },
            _ => EntityKind::Association(flags(node)),
        }
    }
}

/// Commons, inline commons and choices.
pub struct CommonBuilder;

impl DeclarationBuilder for CommonBuilder {
    fn name(&self) -> &'static str {
        "CommonBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[
            ModelType::Common,
            ModelType::CommonExtension,
            ModelType::CommonSubclass,
            ModelType::InlineCommon,
            ModelType::Choice,
        ]
    }

    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind {
        match node.kind {
            ModelType::CommonExtension => EntityKind::CommonExtension {
                base: base_ref(node, namespace_name),
            },
            ModelType::CommonSubclass => EntityKind::CommonSubclass {
                base: base_ref(node, namespace_name),
            },
            ModelType::InlineCommon => EntityKind::InlineCommon,
            ModelType::Choice => EntityKind::Choice,
            _ => EntityKind::Common,
        }
    }
}

/// Descriptors.
pub struct DescriptorBuilder;

impl DeclarationBuilder for DescriptorBuilder {
    fn name(&self) -> &'static str {
        "DescriptorBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[ModelType::Descriptor]
    }

    fn entity_kind(&self, node: &DeclarationNode, _namespace_name: &str) -> EntityKind {
        EntityKind::Descriptor(DescriptorData {
            is_map_type_required: node.is_map_type_required,
            is_map_type_optional: node.is_map_type_optional,
            map_type_items: items(node),
        })
    }
}

/// Enumerations and the school year enumeration.
pub struct EnumerationBuilder;

impl DeclarationBuilder for EnumerationBuilder {
    fn name(&self) -> &'static str {
        "EnumerationBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[ModelType::Enumeration, ModelType::SchoolYearEnumeration]
    }

    fn entity_kind(&self, node: &DeclarationNode, _namespace_name: &str) -> EntityKind {
        match node.kind {
            ModelType::SchoolYearEnumeration => EntityKind::SchoolYearEnumeration {
                items: items(node),
            },
            _ => EntityKind::Enumeration { items: items(node) },
        }
    }
}

/// Shared simple types.
pub struct SharedSimpleBuilder;

impl DeclarationBuilder for SharedSimpleBuilder {
    fn name(&self) -> &'static str {
        "SharedSimpleBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[
            ModelType::SharedDecimal,
            ModelType::SharedInteger,
            ModelType::SharedShort,
            ModelType::SharedString,
        ]
    }

    fn entity_kind(&self, node: &DeclarationNode, _namespace_name: &str) -> EntityKind {
        let facets = node.facets.clone();
        match node.kind {
            ModelType::SharedDecimal => EntityKind::SharedDecimal(facets),
            ModelType::SharedInteger => EntityKind::SharedInteger(facets),
            ModelType::SharedShort => EntityKind::SharedShort(facets),
            _ => EntityKind::SharedString(facets),
        }
    }
}

/// Domains and subdomains.
pub struct DomainBuilder;

impl DeclarationBuilder for DomainBuilder {
    fn name(&self) -> &'static str {
        "DomainBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[ModelType::Domain, ModelType::Subdomain]
    }

    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind {
        let data = DomainData {
            domain_items: members(&node.members, namespace_name),
            footer_documentation: String::new(),
        };
        match node.kind {
            ModelType::Subdomain => EntityKind::Subdomain {
                parent: base_ref(node, namespace_name),
                data,
            },
            _ => EntityKind::Domain(data),
        }
    }
}

/// Interchanges and their extensions.
pub struct InterchangeBuilder;

impl DeclarationBuilder for InterchangeBuilder {
    fn name(&self) -> &'static str {
        "InterchangeBuilder"
    }

    fn handles(&self) -> &'static [ModelType] {
        &[ModelType::Interchange, ModelType::InterchangeExtension]
    }

    fn entity_kind(&self, node: &DeclarationNode, namespace_name: &str) -> EntityKind {
        let data = InterchangeData {
            element_items: members(&node.members, namespace_name),
            identity_template_items: members(&node.identity_templates, namespace_name),
            extended_documentation: String::new(),
        };
        match node.kind {
            ModelType::InterchangeExtension => EntityKind::InterchangeExtension {
                base: base_ref(node, namespace_name),
                data,
            },
            _ => EntityKind::Interchange(data),
        }
    }
}
