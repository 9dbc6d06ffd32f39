//! Top-level entities and their per-kind payloads.

use crate::ModelType;
use metaed_core::{EntityId, FileMap, NamespaceId, PropertyId, SourceMaps};
use serde::{Deserialize, Serialize};

/// A named reference to another entity, resolved lazily.
///
/// The name pair is the source of truth; `entity` is a cache filled by an
/// enhancer and cleared whenever the graph is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub name: String,
    pub namespace_name: String,
    #[serde(default)]
    pub entity: Option<EntityId>,
}

impl NamedRef {
    /// Create an unresolved reference.
    pub fn new(name: impl Into<String>, namespace_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace_name: namespace_name.into(),
            entity: None,
        }
    }
}

/// Facets shared by simple properties and shared simple types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleFacets {
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub total_digits: Option<String>,
    pub decimal_places: Option<String>,
}

/// One value of an enumeration or descriptor map type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationItem {
    pub short_description: String,
    pub documentation: String,
}

/// Payload of an association or domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLevelFlags {
    pub is_abstract: bool,
    pub allow_primary_key_updates: bool,
}

/// Payload of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorData {
    pub is_map_type_required: bool,
    pub is_map_type_optional: bool,
    pub map_type_items: Vec<EnumerationItem>,
}

/// Payload of a domain or subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainData {
    pub domain_items: Vec<NamedRef>,
    pub footer_documentation: String,
}

/// Payload of an interchange or interchange extension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterchangeData {
    pub element_items: Vec<NamedRef>,
    pub identity_template_items: Vec<NamedRef>,
    pub extended_documentation: String,
}

/// Kind-specific part of a top-level entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EntityKind {
    Association(TopLevelFlags),
    AssociationExtension { base: NamedRef },
    AssociationSubclass { base: NamedRef, flags: TopLevelFlags },
    Choice,
    Common,
    CommonExtension { base: NamedRef },
    CommonSubclass { base: NamedRef },
    Descriptor(DescriptorData),
    Domain(DomainData),
    DomainEntity(TopLevelFlags),
    DomainEntityExtension { base: NamedRef },
    DomainEntitySubclass { base: NamedRef, flags: TopLevelFlags },
    Enumeration { items: Vec<EnumerationItem> },
    InlineCommon,
    Interchange(InterchangeData),
    InterchangeExtension { base: NamedRef, data: InterchangeData },
    SchoolYearEnumeration { items: Vec<EnumerationItem> },
    SharedDecimal(SimpleFacets),
    SharedInteger(SimpleFacets),
    SharedShort(SimpleFacets),
    SharedString(SimpleFacets),
    Subdomain { parent: NamedRef, data: DomainData },
}

impl EntityKind {
    /// The closed kind tag for this payload.
    pub fn model_type(&self) -> ModelType {
        match self {
            EntityKind::Association(_) => ModelType::Association,
            EntityKind::AssociationExtension { .. } => ModelType::AssociationExtension,
            EntityKind::AssociationSubclass { .. } => ModelType::AssociationSubclass,
            EntityKind::Choice => ModelType::Choice,
            EntityKind::Common => ModelType::Common,
            EntityKind::CommonExtension { .. } => ModelType::CommonExtension,
            EntityKind::CommonSubclass { .. } => ModelType::CommonSubclass,
            EntityKind::Descriptor(_) => ModelType::Descriptor,
            EntityKind::Domain(_) => ModelType::Domain,
            EntityKind::DomainEntity(_) => ModelType::DomainEntity,
            EntityKind::DomainEntityExtension { .. } => ModelType::DomainEntityExtension,
            EntityKind::DomainEntitySubclass { .. } => ModelType::DomainEntitySubclass,
            EntityKind::Enumeration { .. } => ModelType::Enumeration,
            EntityKind::InlineCommon => ModelType::InlineCommon,
            EntityKind::Interchange(_) => ModelType::Interchange,
            EntityKind::InterchangeExtension { .. } => ModelType::InterchangeExtension,
            EntityKind::SchoolYearEnumeration { .. } => ModelType::SchoolYearEnumeration,
            EntityKind::SharedDecimal(_) => ModelType::SharedDecimal,
            EntityKind::SharedInteger(_) => ModelType::SharedInteger,
            EntityKind::SharedShort(_) => ModelType::SharedShort,
            EntityKind::SharedString(_) => ModelType::SharedString,
            EntityKind::Subdomain { .. } => ModelType::Subdomain,
        }
    }

    /// Base-entity reference of an extension or subclass.
    pub fn base(&self) -> Option<&NamedRef> {
        match self {
            EntityKind::AssociationExtension { base }
            | EntityKind::AssociationSubclass { base, .. }
            | EntityKind::CommonExtension { base }
            | EntityKind::CommonSubclass { base }
            | EntityKind::DomainEntityExtension { base }
            | EntityKind::DomainEntitySubclass { base, .. }
            | EntityKind::InterchangeExtension { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Mutable base-entity reference of an extension or subclass.
    pub fn base_mut(&mut self) -> Option<&mut NamedRef> {
        match self {
            EntityKind::AssociationExtension { base }
            | EntityKind::AssociationSubclass { base, .. }
            | EntityKind::CommonExtension { base }
            | EntityKind::CommonSubclass { base }
            | EntityKind::DomainEntityExtension { base }
            | EntityKind::DomainEntitySubclass { base, .. }
            | EntityKind::InterchangeExtension { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Abstract/primary-key flags, for kinds that carry them.
    pub fn flags(&self) -> Option<&TopLevelFlags> {
        match self {
            EntityKind::Association(flags)
            | EntityKind::DomainEntity(flags)
            | EntityKind::AssociationSubclass { flags, .. }
            | EntityKind::DomainEntitySubclass { flags, .. } => Some(flags),
            _ => None,
        }
    }
}

/// A top-level MetaEd entity.
///
/// The property sequences are owned by the graph: properties are appended only
/// through `EntityGraph::add_property`, which also sets their parent back-reference.
/// Name, namespace and kind key the namespace repositories and are fixed once
/// the entity is added:
///
/// ```compile_fail
/// use metaed_model::{EntityGraph, EntityKind, NamespaceInfo};
///
/// let mut graph = EntityGraph::new();
/// let ns = graph.add_namespace(NamespaceInfo::new("EdFi")).unwrap();
/// let id = graph.add_entity(ns, "Student", EntityKind::Common).done().unwrap();
/// graph.entity_mut(id).unwrap().meta_ed_name = "Learner".to_string();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub(crate) meta_ed_name: String,
    pub(crate) namespace: NamespaceId,
    pub documentation: String,
    pub(crate) kind: EntityKind,
    pub is_deprecated: bool,
    pub deprecation_reason: String,
    pub source_map: SourceMaps,
    pub file_map: Option<FileMap>,
    pub(crate) properties: Vec<PropertyId>,
    pub(crate) identity_properties: Vec<PropertyId>,
    pub(crate) queryable_fields: Vec<PropertyId>,
}

impl Entity {
    /// The declared name.
    pub fn meta_ed_name(&self) -> &str {
        &self.meta_ed_name
    }

    /// The namespace the entity was declared in.
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Kind-specific payload.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// The entity's kind tag.
    pub fn model_type(&self) -> ModelType {
        self.kind.model_type()
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    /// Identity properties in declaration order.
    pub fn identity_properties(&self) -> &[PropertyId] {
        &self.identity_properties
    }

    /// Properties declared as queryable-only fields.
    pub fn queryable_fields(&self) -> &[PropertyId] {
        &self.queryable_fields
    }

    /// Base-entity reference, for extensions and subclasses.
    pub fn base(&self) -> Option<&NamedRef> {
        self.kind.base()
    }
}
