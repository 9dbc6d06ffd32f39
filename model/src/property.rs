//! Entity properties.

use crate::{PropertyType, ReferenceType, SimpleFacets, SimpleType};
use metaed_core::{EntityId, NamespaceId, PropertyId, SourceField, SourceMap, SourceMaps};
use serde::{Deserialize, Serialize};

/// A rule collapsing two property paths that reach the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeDirective {
    /// Path from the declaring property, one segment per property name.
    pub source_property_path_strings: Vec<String>,
    /// Path from the declaring entity to the merge target.
    pub target_property_path_strings: Vec<String>,
    pub source_map: Option<SourceMap>,
}

impl MergeDirective {
    /// Create a directive from dot-separated paths.
    pub fn new(source_path: &str, target_path: &str) -> Self {
        Self {
            source_property_path_strings: split_path(source_path),
            target_property_path_strings: split_path(target_path),
            source_map: None,
        }
    }

    /// Attach the location of the directive.
    pub fn at(mut self, source_map: SourceMap) -> Self {
        self.source_map = Some(source_map);
        self
    }

    /// The source path joined back with dots.
    pub fn source_path(&self) -> String {
        self.source_property_path_strings.join(".")
    }

    /// The target path joined back with dots.
    pub fn target_path(&self) -> String {
        self.target_property_path_strings.join(".")
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// The referential part of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Name of the referenced entity.
    pub referenced_type: String,
    /// Namespace the reference names; the declaring namespace when not given.
    pub referenced_namespace_name: String,
    pub merge_directives: Vec<MergeDirective>,
    pub is_weak: bool,
    /// Resolution cache, filled by an enhancer.
    #[serde(default)]
    pub referenced_entity: Option<EntityId>,
}

impl Reference {
    /// Create an unresolved reference.
    pub fn new(
        referenced_type: impl Into<String>,
        referenced_namespace_name: impl Into<String>,
    ) -> Self {
        Self {
            referenced_type: referenced_type.into(),
            referenced_namespace_name: referenced_namespace_name.into(),
            merge_directives: Vec::new(),
            is_weak: false,
            referenced_entity: None,
        }
    }
}

/// Kind-specific part of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    Simple { simple_type: SimpleType, facets: SimpleFacets },
    Reference { reference_type: ReferenceType, reference: Reference },
}

impl PropertyKind {
    /// A simple property without facets.
    pub fn simple(simple_type: SimpleType) -> Self {
        PropertyKind::Simple {
            simple_type,
            facets: SimpleFacets::default(),
        }
    }

    /// A referential property naming an entity.
    pub fn reference(reference_type: ReferenceType, reference: Reference) -> Self {
        PropertyKind::Reference {
            reference_type,
            reference,
        }
    }

    /// The flattened kind used as the index key.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyKind::Simple { simple_type, .. } => PropertyType::Simple(*simple_type),
            PropertyKind::Reference { reference_type, .. } => {
                PropertyType::Reference(*reference_type)
            }
        }
    }
}

/// A property of a top-level entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub meta_ed_name: String,
    pub(crate) kind: PropertyKind,
    pub documentation: String,
    pub role_name: Option<String>,
    pub short_role_name: Option<String>,
    pub full_property_name: String,
    pub is_part_of_identity: bool,
    pub is_identity_rename: bool,
    pub base_key_name: Option<String>,
    pub is_required: bool,
    pub is_optional: bool,
    pub is_required_collection: bool,
    pub is_optional_collection: bool,
    pub(crate) is_queryable_only: bool,
    pub is_deprecated: bool,
    pub source_map: SourceMaps,
    pub(crate) parent_entity: EntityId,
    pub(crate) namespace: NamespaceId,
}

impl Property {
    /// The entity that declares this property.
    pub fn parent_entity(&self) -> EntityId {
        self.parent_entity
    }

    /// The namespace of the declaring entity.
    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Kind-specific payload.
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Check if the property is a queryable-only field, kept out of the index.
    pub fn is_queryable_only(&self) -> bool {
        self.is_queryable_only
    }

    /// The flattened kind of this property.
    pub fn property_type(&self) -> PropertyType {
        self.kind.property_type()
    }

    /// Referential part, for referential kinds.
    pub fn reference(&self) -> Option<&Reference> {
        match &self.kind {
            PropertyKind::Reference { reference, .. } => Some(reference),
            PropertyKind::Simple { .. } => None,
        }
    }

    /// Mutable referential part, for referential kinds.
    pub fn reference_mut(&mut self) -> Option<&mut Reference> {
        match &mut self.kind {
            PropertyKind::Reference { reference, .. } => Some(reference),
            PropertyKind::Simple { .. } => None,
        }
    }

    /// Referential kind, for referential kinds.
    pub fn reference_type(&self) -> Option<ReferenceType> {
        match &self.kind {
            PropertyKind::Reference { reference_type, .. } => Some(*reference_type),
            PropertyKind::Simple { .. } => None,
        }
    }

    /// Check if the property is any kind of collection.
    pub fn is_collection(&self) -> bool {
        self.is_required_collection || self.is_optional_collection
    }
}

/// How often a property occurs on its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    #[default]
    Required,
    Optional,
    RequiredCollection,
    OptionalCollection,
    QueryableOnly,
}

/// Definition of a property before the graph assigns its identity.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub meta_ed_name: String,
    pub kind: PropertyKind,
    pub documentation: String,
    pub role_name: Option<String>,
    pub short_role_name: Option<String>,
    pub is_part_of_identity: bool,
    pub is_identity_rename: bool,
    pub base_key_name: Option<String>,
    pub cardinality: Cardinality,
    pub is_deprecated: bool,
    pub source_map: SourceMaps,
}

impl PropertyDef {
    /// Create a required property definition.
    pub fn new(meta_ed_name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            meta_ed_name: meta_ed_name.into(),
            kind,
            documentation: String::new(),
            role_name: None,
            short_role_name: None,
            is_part_of_identity: false,
            is_identity_rename: false,
            base_key_name: None,
            cardinality: Cardinality::Required,
            is_deprecated: false,
            source_map: SourceMaps::new(),
        }
    }

    /// Set documentation.
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Set the role name.
    pub fn role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Set the shortened role name.
    pub fn shorten_to(mut self, short_role_name: impl Into<String>) -> Self {
        self.short_role_name = Some(short_role_name.into());
        self
    }

    /// Mark as part of the entity's identity.
    pub fn identity(mut self) -> Self {
        self.is_part_of_identity = true;
        self
    }

    /// Mark as an identity rename of the given base key.
    pub fn identity_rename(mut self, base_key_name: impl Into<String>) -> Self {
        self.is_part_of_identity = true;
        self.is_identity_rename = true;
        self.base_key_name = Some(base_key_name.into());
        self
    }

    /// Set cardinality.
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Mark as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Record provenance of one field.
    pub fn source(mut self, field: SourceField, map: SourceMap) -> Self {
        self.source_map.insert(field, map);
        self
    }

    /// The name used for duplicate detection and merge paths.
    ///
    /// A role name that repeats the property name adds nothing.
    pub fn full_property_name(&self) -> String {
        match &self.role_name {
            Some(role) if role != &self.meta_ed_name => format!("{}{}", role, self.meta_ed_name),
            _ => self.meta_ed_name.clone(),
        }
    }

    pub(crate) fn into_property(
        self,
        id: PropertyId,
        parent_entity: EntityId,
        namespace: NamespaceId,
    ) -> Property {
        let full_property_name = self.full_property_name();
        let cardinality = self.cardinality;
        Property {
            id,
            meta_ed_name: self.meta_ed_name,
            kind: self.kind,
            documentation: self.documentation,
            role_name: self.role_name,
            short_role_name: self.short_role_name,
            full_property_name,
            is_part_of_identity: self.is_part_of_identity,
            is_identity_rename: self.is_identity_rename,
            base_key_name: self.base_key_name,
            is_required: cardinality == Cardinality::Required,
            is_optional: cardinality == Cardinality::Optional,
            is_required_collection: cardinality == Cardinality::RequiredCollection,
            is_optional_collection: cardinality == Cardinality::OptionalCollection,
            is_queryable_only: cardinality == Cardinality::QueryableOnly,
            is_deprecated: self.is_deprecated,
            source_map: self.source_map,
            parent_entity,
            namespace,
        }
    }
}
