//! The entity graph: namespaces, entities and properties in arenas.

use crate::{
    BuildError, BuildResult, Entity, EntityKind, Namespace, NamespaceInfo, Property, PropertyDef,
    PropertyIndex,
};
use metaed_core::{EntityId, FileMap, NamespaceId, PropertyId, SourceField, SourceMap, SourceMaps};
use serde::{Deserialize, Serialize};

/// Arena-backed entity graph.
///
/// Namespaces are stored in dependency order. Entities and properties are
/// addressed by their arena ids; all cross-links are ids, never references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityGraph {
    namespaces: Vec<Namespace>,
    entities: Vec<Entity>,
    properties: Vec<Property>,
    #[serde(skip)]
    property_index: PropertyIndex,
    sealed: bool,
}

impl EntityGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Namespaces ====================

    /// Add a namespace. Namespaces must be added in dependency order.
    pub fn add_namespace(&mut self, info: NamespaceInfo) -> BuildResult<NamespaceId> {
        if self.sealed {
            return Err(BuildError::GraphSealed);
        }
        if self.namespace_by_name(&info.namespace_name).is_some() {
            return Err(BuildError::DuplicateNamespace(info.namespace_name));
        }
        let id = NamespaceId::new(self.namespaces.len() as u32);
        self.namespaces.push(Namespace::new(id, info));
        Ok(id)
    }

    /// Fix the dependency list of a namespace. Self-references are dropped.
    pub fn set_dependencies(
        &mut self,
        namespace: NamespaceId,
        dependencies: Vec<NamespaceId>,
    ) -> BuildResult<()> {
        if !self.entities.is_empty() {
            return Err(BuildError::DependenciesFrozen);
        }
        let target = self
            .namespaces
            .get_mut(namespace.index())
            .ok_or(BuildError::NamespaceNotFound(namespace))?;
        target.dependencies = dependencies
            .into_iter()
            .filter(|dependency| *dependency != namespace)
            .collect();
        Ok(())
    }

    /// Get a namespace by id.
    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(id.index())
    }

    /// Get a namespace by exact name.
    pub fn namespace_by_name(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name() == name)
    }

    /// Namespaces in dependency order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    /// Number of namespaces.
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Name of a namespace, or the empty string for an unknown id.
    pub fn namespace_name(&self, id: NamespaceId) -> &str {
        self.namespace(id).map(|ns| ns.name()).unwrap_or("")
    }

    // ==================== Entities ====================

    /// Start adding an entity to a namespace.
    pub fn add_entity(
        &mut self,
        namespace: NamespaceId,
        name: impl Into<String>,
        kind: EntityKind,
    ) -> EntityBuilder<'_> {
        EntityBuilder {
            graph: self,
            namespace,
            name: name.into(),
            kind,
            documentation: String::new(),
            is_deprecated: false,
            deprecation_reason: String::new(),
            source_map: SourceMaps::new(),
            file_map: None,
        }
    }

    /// Get an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Get an entity by id for content changes.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    /// Every entity in build order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ==================== Properties ====================

    /// Append a property to an entity.
    ///
    /// Sets the property's parent and namespace, records identity and
    /// queryable-only membership, and updates the property index.
    pub fn add_property(&mut self, entity: EntityId, def: PropertyDef) -> BuildResult<PropertyId> {
        if self.sealed {
            return Err(BuildError::GraphSealed);
        }
        let id = PropertyId::new(self.properties.len() as u32);
        let owner = self
            .entities
            .get_mut(entity.index())
            .ok_or(BuildError::EntityNotFound(entity))?;

        let property = def.into_property(id, entity, owner.namespace);
        if property.is_queryable_only {
            owner.queryable_fields.push(id);
        } else {
            owner.properties.push(id);
            if property.is_part_of_identity {
                owner.identity_properties.push(id);
            }
            self.property_index.add(property.property_type(), id);
        }
        self.properties.push(property);
        Ok(id)
    }

    /// Get a property by id.
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(id.index())
    }

    /// Get a property by id for content changes.
    pub fn property_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        self.properties.get_mut(id.index())
    }

    /// Every property in build order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Properties of one entity, in declaration order.
    pub fn properties_of(&self, entity: EntityId) -> impl Iterator<Item = &Property> {
        self.entity(entity)
            .map(|e| e.properties.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.property(*id))
    }

    /// The property index.
    pub fn property_index(&self) -> &PropertyIndex {
        &self.property_index
    }

    // ==================== Lifecycle ====================

    /// Close the graph to structural changes.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check if the graph has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Cache the resolved base of an extension or subclass.
    ///
    /// Entities without a base are left untouched.
    pub fn set_base_entity(&mut self, entity: EntityId, base: Option<EntityId>) -> BuildResult<()> {
        let target = self
            .entities
            .get_mut(entity.index())
            .ok_or(BuildError::EntityNotFound(entity))?;
        if let Some(named) = target.kind.base_mut() {
            named.entity = base;
        }
        Ok(())
    }

    /// Forget every cached resolution.
    pub fn clear_resolution_cache(&mut self) {
        for property in &mut self.properties {
            if let Some(reference) = property.reference_mut() {
                reference.referenced_entity = None;
            }
        }
        for entity in &mut self.entities {
            if let Some(base) = entity.kind.base_mut() {
                base.entity = None;
            }
        }
    }

    /// Rebuild the property index from the property arena.
    pub(crate) fn reindex(&mut self) {
        let mut index = PropertyIndex::new();
        for property in &self.properties {
            if !property.is_queryable_only {
                index.add(property.property_type(), property.id);
            }
        }
        self.property_index = index;
    }
}

/// Builder for a top-level entity.
pub struct EntityBuilder<'a> {
    graph: &'a mut EntityGraph,
    namespace: NamespaceId,
    name: String,
    kind: EntityKind,
    documentation: String,
    is_deprecated: bool,
    deprecation_reason: String,
    source_map: SourceMaps,
    file_map: Option<FileMap>,
}

impl<'a> EntityBuilder<'a> {
    /// Set documentation.
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Mark as deprecated with a reason.
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.is_deprecated = true;
        self.deprecation_reason = reason.into();
        self
    }

    /// Record provenance of one field.
    pub fn source(mut self, field: SourceField, map: SourceMap) -> Self {
        self.source_map.insert(field, map);
        self
    }

    /// Record the file the declaration came from.
    pub fn file(mut self, file_map: Option<FileMap>) -> Self {
        self.file_map = file_map;
        self
    }

    /// Finish building this entity.
    pub fn done(self) -> BuildResult<EntityId> {
        if self.graph.sealed {
            return Err(BuildError::GraphSealed);
        }
        let model_type = self.kind.model_type();
        let id = EntityId::new(self.graph.entities.len() as u32);

        let namespace = self
            .graph
            .namespaces
            .get_mut(self.namespace.index())
            .ok_or(BuildError::NamespaceNotFound(self.namespace))?;
        let repository = namespace.entities.entry(model_type).or_default();
        if !repository.insert(&self.name, id) {
            return Err(BuildError::duplicate_entity(
                model_type,
                self.name,
                namespace.name(),
                self.source_map.primary(),
            ));
        }

        self.graph.entities.push(Entity {
            id,
            meta_ed_name: self.name,
            namespace: self.namespace,
            documentation: self.documentation,
            kind: self.kind,
            is_deprecated: self.is_deprecated,
            deprecation_reason: self.deprecation_reason,
            source_map: self.source_map,
            file_map: self.file_map,
            properties: Vec::new(),
            identity_properties: Vec::new(),
            queryable_fields: Vec::new(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cardinality, ModelType, PropertyKind, PropertyType, SimpleType, TopLevelFlags};

    fn graph_with_namespace() -> (EntityGraph, NamespaceId) {
        let mut graph = EntityGraph::new();
        let ns = graph.add_namespace(NamespaceInfo::new("EdFi")).unwrap();
        (graph, ns)
    }

    // ========== TEST: add_entity ==========
    #[test]
    fn test_add_entity_registers_in_namespace() {
        // GIVEN a graph with namespace EdFi
        let (mut graph, ns) = graph_with_namespace();

        // WHEN adding a domain entity
        let id = graph
            .add_entity(ns, "Student", EntityKind::DomainEntity(TopLevelFlags::default()))
            .documentation("A student")
            .done()
            .unwrap();

        // THEN the namespace finds it by kind and name
        let namespace = graph.namespace(ns).unwrap();
        assert_eq!(namespace.entity(ModelType::DomainEntity, "Student"), Some(id));
        assert_eq!(graph.entity(id).unwrap().documentation, "A student");
    }

    // ========== TEST: duplicate_entity ==========
    #[test]
    fn test_duplicate_entity_is_rejected() {
        // GIVEN a namespace already containing Common Address
        let (mut graph, ns) = graph_with_namespace();
        graph.add_entity(ns, "Address", EntityKind::Common).done().unwrap();

        // WHEN adding Common Address again
        let result = graph.add_entity(ns, "Address", EntityKind::Common).done();

        // THEN a duplicate-entity error is returned and nothing is overwritten
        assert!(matches!(result, Err(BuildError::DuplicateEntity { .. })));
        assert_eq!(graph.entity_count(), 1);
    }

    // ========== TEST: same_name_different_kind ==========
    #[test]
    fn test_same_name_different_kind_is_allowed() {
        // GIVEN a namespace containing Common Address
        let (mut graph, ns) = graph_with_namespace();
        graph.add_entity(ns, "Address", EntityKind::Common).done().unwrap();

        // WHEN adding Inline Common Address
        let result = graph.add_entity(ns, "Address", EntityKind::InlineCommon).done();

        // THEN the kinds do not collide
        assert!(result.is_ok());
    }

    // ========== TEST: add_property_links_parent ==========
    #[test]
    fn test_add_property_links_parent_and_index() {
        // GIVEN an entity
        let (mut graph, ns) = graph_with_namespace();
        let entity = graph
            .add_entity(ns, "Student", EntityKind::DomainEntity(TopLevelFlags::default()))
            .done()
            .unwrap();

        // WHEN adding an identity property and a queryable-only field
        let identity = graph
            .add_property(
                entity,
                PropertyDef::new("StudentUniqueId", PropertyKind::simple(SimpleType::String))
                    .identity(),
            )
            .unwrap();
        let queryable = graph
            .add_property(
                entity,
                PropertyDef::new("Nickname", PropertyKind::simple(SimpleType::String))
                    .cardinality(Cardinality::QueryableOnly),
            )
            .unwrap();

        // THEN parent and owner agree, and only the real property is indexed
        let owner = graph.entity(entity).unwrap();
        assert_eq!(owner.properties(), &[identity]);
        assert_eq!(owner.identity_properties(), &[identity]);
        assert_eq!(owner.queryable_fields(), &[queryable]);
        assert_eq!(graph.property(identity).unwrap().parent_entity(), entity);
        assert_eq!(
            graph
                .property_index()
                .of_type(PropertyType::Simple(SimpleType::String)),
            &[identity]
        );
    }

    // ========== TEST: sealed_graph ==========
    #[test]
    fn test_sealed_graph_rejects_entities() {
        // GIVEN a sealed graph
        let (mut graph, ns) = graph_with_namespace();
        graph.seal();

        // WHEN adding an entity
        let result = graph.add_entity(ns, "Late", EntityKind::Common).done();

        // THEN the graph refuses it
        assert_eq!(result, Err(BuildError::GraphSealed));
    }

    // ========== TEST: dependencies_frozen ==========
    #[test]
    fn test_dependencies_frozen_after_build_starts() {
        // GIVEN two namespaces and one built entity
        let (mut graph, core) = graph_with_namespace();
        let ext = graph
            .add_namespace(NamespaceInfo::new("Sample").extension("Sample"))
            .unwrap();
        graph.add_entity(core, "Address", EntityKind::Common).done().unwrap();

        // WHEN changing dependencies
        let result = graph.set_dependencies(ext, vec![core]);

        // THEN the change is refused
        assert_eq!(result, Err(BuildError::DependenciesFrozen));
    }

    // ========== TEST: self_dependency_dropped ==========
    #[test]
    fn test_self_dependency_is_dropped() {
        let (mut graph, core) = graph_with_namespace();
        graph.set_dependencies(core, vec![core]).unwrap();
        assert!(graph.namespace(core).unwrap().dependencies().is_empty());
    }

    // ========== TEST: sealed_entity_keeps_its_key ==========
    #[test]
    fn test_content_edits_after_seal_keep_lookup_consistent() {
        // GIVEN a sealed graph with EdFi.Student and an extension of it
        let (mut graph, ns) = graph_with_namespace();
        let student = graph
            .add_entity(ns, "Student", EntityKind::DomainEntity(TopLevelFlags::default()))
            .done()
            .unwrap();
        let extension = graph
            .add_entity(
                ns,
                "Student",
                EntityKind::DomainEntityExtension {
                    base: crate::NamedRef::new("Student", "EdFi"),
                },
            )
            .done()
            .unwrap();
        graph.seal();

        // WHEN an enhancer edits content and caches the base
        graph.entity_mut(student).unwrap().documentation = "A learner".to_string();
        graph.set_base_entity(extension, Some(student)).unwrap();
        graph.set_base_entity(student, Some(extension)).unwrap();

        // THEN name and kind still match the namespace repository
        let entity = graph.entity(student).unwrap();
        assert_eq!(entity.meta_ed_name(), "Student");
        assert_eq!(entity.model_type(), ModelType::DomainEntity);
        assert_eq!(
            graph.namespace(ns).unwrap().entity(ModelType::DomainEntity, "Student"),
            Some(student)
        );

        // AND only the entity with a base got the cache
        assert_eq!(graph.entity(extension).unwrap().base().unwrap().entity, Some(student));
        assert!(graph.entity(student).unwrap().base().is_none());
        assert_eq!(
            graph.set_base_entity(EntityId::new(99), None),
            Err(BuildError::EntityNotFound(EntityId::new(99)))
        );
    }
}
